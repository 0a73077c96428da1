use chrono::NaiveDate;
use cupcake_order::workflows::order::{ShareError, SharePayload, ShareTarget};
use metrics_exporter_prometheus::PrometheusHandle;
use std::io::Write;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Prints shared orders to stdout for terminal sessions.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct StdoutShareTarget;

impl ShareTarget for StdoutShareTarget {
    fn share(&self, payload: &SharePayload) -> Result<(), ShareError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "Subject: {}\n\n{}", payload.subject, payload.summary)
            .map_err(|err| ShareError::Unavailable(err.to_string()))
    }
}

/// Keeps shared orders in memory for the HTTP service.
#[derive(Default, Clone)]
pub(crate) struct InMemoryShareOutbox {
    shared: Arc<Mutex<Vec<SharePayload>>>,
}

impl ShareTarget for InMemoryShareOutbox {
    fn share(&self, payload: &SharePayload) -> Result<(), ShareError> {
        let mut guard = self
            .shared
            .lock()
            .map_err(|_| ShareError::Unavailable("share outbox poisoned".to_string()))?;
        guard.push(payload.clone());
        info!(queued = guard.len(), "order placed in share outbox");
        Ok(())
    }
}

impl InMemoryShareOutbox {
    #[cfg(test)]
    pub(crate) fn shared(&self) -> Vec<SharePayload> {
        self.shared.lock().expect("share mutex poisoned").clone()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
