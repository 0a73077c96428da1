use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::order::{
    order_router, ManualClock, OrderController, OrderLocale, OrderWizard, ShareError,
    SharePayload, ShareTarget,
};

pub(super) fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date")
}

pub(super) fn wizard() -> OrderWizard {
    let clock = Arc::new(ManualClock::new(monday()));
    OrderWizard::new(OrderController::new(OrderLocale::en_us(), clock))
}

/// Wizard parked on the summary with six vanilla cupcakes for today.
pub(super) fn summary_wizard() -> OrderWizard {
    let wizard = wizard();
    wizard.start_order(6).expect("start order");
    wizard.select_flavor("Vanilla");
    wizard.advance().expect("advance to pickup");
    wizard.select_pickup_date("Mon Jan 5");
    wizard.advance().expect("advance to summary");
    wizard
}

#[derive(Default)]
pub(super) struct MemoryShareTarget {
    shared: Mutex<Vec<SharePayload>>,
}

impl MemoryShareTarget {
    pub(super) fn shared(&self) -> Vec<SharePayload> {
        self.shared.lock().expect("share mutex poisoned").clone()
    }
}

impl ShareTarget for MemoryShareTarget {
    fn share(&self, payload: &SharePayload) -> Result<(), ShareError> {
        self.shared
            .lock()
            .expect("share mutex poisoned")
            .push(payload.clone());
        Ok(())
    }
}

pub(super) struct OfflineShareTarget;

impl ShareTarget for OfflineShareTarget {
    fn share(&self, _payload: &SharePayload) -> Result<(), ShareError> {
        Err(ShareError::Unavailable("no share sheet".to_string()))
    }
}

pub(super) fn router_with_wizard(wizard: OrderWizard) -> axum::Router {
    order_router(Arc::new(wizard), Arc::new(MemoryShareTarget::default()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
