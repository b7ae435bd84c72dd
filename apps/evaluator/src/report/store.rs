//! In-memory holding area for finished reports until the user downloads them.
//!
//! A report is handed out once: `take` removes it. When more than `capacity`
//! reports are waiting, the oldest is dropped.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;
use uuid::Uuid;

use super::Report;

#[derive(Default)]
struct Inner {
    reports: HashMap<Uuid, Report>,
    order: VecDeque<Uuid>,
}

#[derive(Clone)]
pub struct ReportStore {
    inner: Arc<Mutex<Inner>>,
    capacity: usize,
}

impl ReportStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Stores a report and returns the id it can be downloaded under.
    pub fn insert(&self, report: Report) -> Uuid {
        let id = Uuid::new_v4();
        let mut inner = self.lock();
        inner.reports.insert(id, report);
        inner.order.push_back(id);

        while inner.order.len() > self.capacity {
            if let Some(evicted) = inner.order.pop_front() {
                inner.reports.remove(&evicted);
                debug!("Evicted undownloaded report {evicted}");
            }
        }
        id
    }

    /// Removes and returns the report, if it is still waiting.
    pub fn take(&self, id: &Uuid) -> Option<Report> {
        let mut inner = self.lock();
        let report = inner.reports.remove(id)?;
        inner.order.retain(|waiting| waiting != id);
        Some(report)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().reports.len()
    }
}
