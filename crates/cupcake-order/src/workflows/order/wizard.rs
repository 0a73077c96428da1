use super::controller::OrderController;
use super::domain::{OrderError, OrderStage};
use super::share::{SharePayload, ShareError, ShareTarget};
use super::state::OrderState;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// Serializable picture of the wizard for renderers.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub stage: OrderStage,
    pub stage_label: &'static str,
    pub can_navigate_back: bool,
    pub can_advance: bool,
    pub order: OrderState,
}

/// Four-stage ordering flow layered over an [`OrderController`].
///
/// Stage changes and order mutations go through the stage lock, so a shared
/// wizard sees one caller at a time.
#[derive(Debug)]
pub struct OrderWizard {
    controller: OrderController,
    stage: Mutex<OrderStage>,
}

impl OrderWizard {
    pub fn new(controller: OrderController) -> Self {
        Self {
            controller,
            stage: Mutex::new(OrderStage::Start),
        }
    }

    pub fn controller(&self) -> &OrderController {
        &self.controller
    }

    pub fn stage(&self) -> OrderStage {
        *self.stage_guard()
    }

    pub fn select_quantity(&self, quantity: i64) -> Result<(), WizardError> {
        let _stage = self.stage_guard();
        self.controller.set_quantity(quantity)?;
        Ok(())
    }

    /// Picks a quantity on the start screen and moves straight to flavors.
    /// A zero quantity is refused before the order is touched.
    pub fn start_order(&self, quantity: i64) -> Result<OrderStage, WizardError> {
        let mut stage = self.stage_guard();
        if *stage != OrderStage::Start {
            return Err(WizardError::WrongStage {
                expected: OrderStage::Start,
                actual: *stage,
            });
        }
        if quantity == 0 {
            return Err(WizardError::SelectionRequired(OrderStage::Start));
        }
        self.controller.set_quantity(quantity)?;
        self.advance_locked(&mut stage)
    }

    pub fn select_flavor(&self, flavor: &str) {
        let _stage = self.stage_guard();
        self.controller.set_flavor(flavor);
    }

    pub fn select_pickup_date(&self, pickup_date: &str) {
        let _stage = self.stage_guard();
        self.controller.set_date(pickup_date);
    }

    pub fn advance(&self) -> Result<OrderStage, WizardError> {
        let mut stage = self.stage_guard();
        self.advance_locked(&mut stage)
    }

    /// Steps back one stage, keeping selections. Returns false at the start.
    pub fn back(&self) -> bool {
        let mut stage = self.stage_guard();
        match stage.previous() {
            Some(previous) => {
                debug!(from = ?*stage, to = ?previous, "wizard navigated back");
                *stage = previous;
                true
            }
            None => false,
        }
    }

    /// Discards the order and returns to the start screen.
    pub fn cancel(&self) {
        let mut stage = self.stage_guard();
        info!(from = ?*stage, "order cancelled");
        self.controller.reset();
        *stage = OrderStage::Start;
    }

    pub fn share_payload(&self) -> Result<SharePayload, WizardError> {
        let stage = self.stage_guard();
        if *stage != OrderStage::Summary {
            return Err(WizardError::WrongStage {
                expected: OrderStage::Summary,
                actual: *stage,
            });
        }
        Ok(SharePayload::from_state(&self.controller.current_state()))
    }

    pub fn share<T>(&self, target: &T) -> Result<SharePayload, WizardError>
    where
        T: ShareTarget + ?Sized,
    {
        let payload = self.share_payload()?;
        target.share(&payload)?;
        info!(subject = %payload.subject, "order shared");
        Ok(payload)
    }

    pub fn view(&self) -> WizardView {
        let stage = self.stage_guard();
        let order = self.controller.current_state();
        WizardView {
            stage: *stage,
            stage_label: stage.label(),
            can_navigate_back: stage.previous().is_some(),
            can_advance: stage.next().is_some() && selection_made(*stage, &order),
            order: OrderState::clone(&order),
        }
    }

    fn advance_locked(&self, stage: &mut OrderStage) -> Result<OrderStage, WizardError> {
        let next = stage.next().ok_or(WizardError::NoNextStage)?;
        if !selection_made(*stage, &self.controller.current_state()) {
            return Err(WizardError::SelectionRequired(*stage));
        }
        debug!(from = ?*stage, to = ?next, "wizard advanced");
        *stage = next;
        Ok(next)
    }

    fn stage_guard(&self) -> MutexGuard<'_, OrderStage> {
        self.stage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn selection_made(stage: OrderStage, order: &OrderState) -> bool {
    match stage {
        OrderStage::Start => order.has_quantity(),
        OrderStage::Flavor => order.has_flavor(),
        OrderStage::Pickup => order.has_pickup_date(),
        OrderStage::Summary => true,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("a selection is required before leaving the {} step", .0.label())]
    SelectionRequired(OrderStage),
    #[error("the order summary is the final step")]
    NoNextStage,
    #[error("expected the {} step but the wizard is at {}", .expected.label(), .actual.label())]
    WrongStage {
        expected: OrderStage,
        actual: OrderStage,
    },
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Share(#[from] ShareError),
}
