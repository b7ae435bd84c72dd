pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers;
use crate::state::AppState;
use crate::ui;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Web UI
        .route("/", get(ui::handle_index))
        .route("/evaluate", post(ui::handle_evaluate))
        // Evaluation API
        .route(
            "/api/v1/evaluations",
            post(handlers::handle_create_evaluation),
        )
        .route(
            "/api/v1/reports/:id",
            get(handlers::handle_download_report),
        )
        .layer(body_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::evaluation::pipeline::tests::{service_down, well_formed, ScriptedEvaluator};
    use crate::llm_client::LlmError;

    const BOUNDARY: &str = "evaluator-test-boundary";

    fn app(replies: Vec<Result<String, LlmError>>) -> (Router, Arc<ScriptedEvaluator>) {
        let evaluator = Arc::new(ScriptedEvaluator::new(replies));
        let state = AppState::new(evaluator.clone(), Config::for_tests());
        (build_router(state), evaluator)
    }

    fn multipart_request(uri: &str, fields: &[(&str, &str)], files: &[(&str, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for (file_name, content) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resumes\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app(vec![]);
        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_index_serves_upload_form() {
        let (app, _) = app(vec![]);
        let response = app.oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Evaluate Resumes"));
    }

    #[tokio::test]
    async fn test_api_evaluation_then_single_download() {
        let (app, evaluator) = app(vec![
            Ok(well_formed("Ann", "80%")),
            Err(service_down()),
            Ok("no json at all".to_string()),
        ]);

        let request = multipart_request(
            "/api/v1/evaluations",
            &[("job_description", "Rust backend engineer"), ("profile_link", "")],
            &[("ann.txt", &b"ann"[..]), ("bob.txt", &b"bob"[..]), ("cat.txt", &b"cat"[..])],
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(evaluator.calls(), 3);

        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["report_rows"], 2);
        assert_eq!(json["resumes"].as_array().unwrap().len(), 3);
        assert_eq!(json["resumes"][0]["status"], "evaluated");
        assert_eq!(json["resumes"][0]["result"]["candidate_name"], "Ann");
        assert_eq!(json["resumes"][1]["result"]["jd_match"], "N/A");
        assert_eq!(json["resumes"][2]["status"], "skipped");
        assert_eq!(json["resumes"][2]["position"], 3);

        let url = json["download_url"].as_str().unwrap().to_string();
        let response = app.clone().oneshot(get_request(&url)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        assert!(response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .contains("ats_report.csv"));

        let csv = body_text(response).await;
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Resume File,JD Match,Candidate Name"));
        assert!(lines[1].starts_with("ann.txt,80%,Ann,"));
        assert!(lines[2].starts_with("bob.txt,N/A,,"));

        let response = app.oneshot(get_request(&url)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_api_rejects_blank_job_description() {
        let (app, evaluator) = app(vec![]);
        let request = multipart_request(
            "/api/v1/evaluations",
            &[("job_description", "   ")],
            &[("ann.pdf", &b"%PDF"[..])],
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(evaluator.calls(), 0);

        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_api_ignores_empty_file_part() {
        let (app, evaluator) = app(vec![]);
        let request = multipart_request(
            "/api/v1/evaluations",
            &[("job_description", "Rust engineer")],
            &[("", &b""[..])],
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(evaluator.calls(), 0);
    }

    #[tokio::test]
    async fn test_api_no_rows_means_no_report() {
        let (app, _) = app(vec![Ok("sorry".to_string())]);
        let request = multipart_request(
            "/api/v1/evaluations",
            &[("job_description", "Rust engineer")],
            &[("ann.txt", &b"ann"[..])],
        );
        let response = app.oneshot(request).await.unwrap();
        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["report_rows"], 0);
        assert!(json["report_id"].is_null());
        assert!(json["download_url"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_report_is_404() {
        let (app, _) = app(vec![]);
        let response = app
            .oneshot(get_request(
                "/api/v1/reports/00000000-0000-0000-0000-000000000000",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ui_form_without_files_rerenders_with_error() {
        let (app, evaluator) = app(vec![]);
        let request = multipart_request(
            "/evaluate",
            &[("job_description", "Data engineer"), ("profile_link", "")],
            &[],
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(evaluator.calls(), 0);

        let html = body_text(response).await;
        assert!(html.contains("Please provide both a job description and at least one resume."));
        assert!(html.contains("Data engineer"));
    }

    fn oversized_file() -> Vec<u8> {
        vec![b'x'; Config::for_tests().max_upload_bytes * 2]
    }

    #[tokio::test]
    async fn test_ui_oversized_upload_rerenders_form() {
        let (app, evaluator) = app(vec![]);
        let big = oversized_file();
        let request = multipart_request(
            "/evaluate",
            &[("job_description", "Rust engineer")],
            &[("huge.pdf", &big[..])],
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert_eq!(evaluator.calls(), 0);

        let html = body_text(response).await;
        assert!(html.contains("Evaluate Resumes"));
        assert!(html.contains(r#"class="error""#));
        assert!(!html.contains("PAYLOAD_TOO_LARGE"));
    }

    #[tokio::test]
    async fn test_api_oversized_upload_is_413() {
        let (app, evaluator) = app(vec![]);
        let big = oversized_file();
        let request = multipart_request(
            "/api/v1/evaluations",
            &[("job_description", "Rust engineer")],
            &[("huge.pdf", &big[..])],
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(evaluator.calls(), 0);

        let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_ui_malformed_upload_rerenders_form() {
        let (app, evaluator) = app(vec![]);
        let request = Request::builder()
            .method("POST")
            .uri("/evaluate")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from("this is not a multipart body"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(evaluator.calls(), 0);
        assert!(body_text(response).await.contains("Evaluate Resumes"));
    }

    #[tokio::test]
    async fn test_ui_renders_results_with_download_link() {
        let (app, _) = app(vec![Ok(well_formed("Ann", "91%"))]);
        let request = multipart_request(
            "/evaluate",
            &[("job_description", "Rust engineer")],
            &[("ann.txt", &b"ann"[..])],
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("ann.txt"));
        assert!(html.contains("91%"));
        assert!(html.contains("Download CSV Report"));
        assert!(html.contains("Evaluation complete."));
    }
}
