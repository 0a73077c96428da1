//! Cupcake order state, pricing, and the four-stage ordering wizard.

pub mod calendar;
mod catalog;
mod controller;
pub mod domain;
mod locale;
pub mod pricing;
pub mod router;
pub mod share;
mod state;
mod wizard;

#[cfg(test)]
mod tests;

pub use calendar::{Clock, ManualClock, OffsetClock, SystemClock};
pub use catalog::{OrderCatalog, QuantityOption};
pub use controller::OrderController;
pub use domain::{OrderError, OrderStage};
pub use locale::OrderLocale;
pub use pricing::{CurrencyFormat, PricingPolicy, SymbolPlacement};
pub use router::order_router;
pub use share::{SharePayload, ShareError, ShareTarget};
pub use state::OrderState;
pub use wizard::{OrderWizard, WizardError, WizardView};
