// Resume evaluation: prompt building, model reply handling, response parsing
// and the per-resume pipeline. All model calls go through llm_client.

pub mod form;
pub mod handlers;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod reply;
