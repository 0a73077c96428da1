use super::state::OrderState;
use serde::Serialize;

pub const SHARE_SUBJECT: &str = "New Cupcake Order";

/// Text handed to whatever share facility the host offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub subject: String,
    pub summary: String,
}

impl SharePayload {
    pub fn from_state(state: &OrderState) -> Self {
        let summary = format!(
            "Quantity: {}\nFlavor: {}\nPickup date: {}\nTotal: {}\n\nThank you!",
            quantity_phrase(state.quantity()),
            state.flavor(),
            state.pickup_date(),
            state.price(),
        );

        Self {
            subject: SHARE_SUBJECT.to_string(),
            summary,
        }
    }
}

pub fn quantity_phrase(quantity: u32) -> String {
    match quantity {
        1 => "1 cupcake".to_string(),
        n => format!("{n} cupcakes"),
    }
}

/// Outbound hook standing in for a platform share sheet.
pub trait ShareTarget: Send + Sync {
    fn share(&self, payload: &SharePayload) -> Result<(), ShareError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("share target unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_every_order_field() {
        let state = OrderState::from_parts(
            6,
            "Vanilla".to_string(),
            "Mon Jan 5".to_string(),
            "$15.00".to_string(),
            Vec::new(),
        );

        let payload = SharePayload::from_state(&state);

        assert_eq!(payload.subject, "New Cupcake Order");
        assert_eq!(
            payload.summary,
            "Quantity: 6 cupcakes\nFlavor: Vanilla\nPickup date: Mon Jan 5\nTotal: $15.00\n\nThank you!"
        );
    }

    #[test]
    fn single_cupcake_is_not_pluralized() {
        assert_eq!(quantity_phrase(1), "1 cupcake");
        assert_eq!(quantity_phrase(12), "12 cupcakes");
    }
}
