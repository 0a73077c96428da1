use super::calendar::{pickup_labels, Clock};
use super::domain::OrderError;
use super::locale::OrderLocale;
use super::pricing::PricingPolicy;
use super::state::OrderState;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Sole writer of the current order snapshot.
///
/// Each mutation reads the latest snapshot, derives a replacement and
/// publishes it to subscribers. The read-then-replace runs under the watch
/// channel's write lock so concurrent callers cannot interleave.
#[derive(Debug)]
pub struct OrderController {
    policy: PricingPolicy,
    locale: OrderLocale,
    clock: Arc<dyn Clock>,
    state: watch::Sender<Arc<OrderState>>,
}

impl OrderController {
    pub fn new(locale: OrderLocale, clock: Arc<dyn Clock>) -> Self {
        Self::with_policy(PricingPolicy::standard(), locale, clock)
    }

    pub fn with_policy(policy: PricingPolicy, locale: OrderLocale, clock: Arc<dyn Clock>) -> Self {
        let initial = blank_order(&policy, &locale, clock.as_ref());
        let (state, _) = watch::channel(Arc::new(initial));
        Self {
            policy,
            locale,
            clock,
            state,
        }
    }

    pub fn set_quantity(&self, quantity: i64) -> Result<(), OrderError> {
        let quantity =
            u32::try_from(quantity).map_err(|_| OrderError::InvalidQuantity(quantity))?;

        self.replace(|current| {
            let price = self.price_for(quantity, current.pickup_date(), current.pickup_options());
            current.with_quantity(quantity, price)
        });
        Ok(())
    }

    pub fn set_flavor(&self, flavor: &str) {
        self.replace(|current| current.with_flavor(flavor.to_owned()));
    }

    /// Labels outside the offered pickup options are accepted; they simply
    /// never match today's option and so carry no surcharge.
    pub fn set_date(&self, pickup_date: &str) {
        self.replace(|current| {
            if !current
                .pickup_options()
                .iter()
                .any(|option| option == pickup_date)
            {
                warn!(pickup_date, "pickup date is not one of the offered options");
            }
            let price = self.price_for(current.quantity(), pickup_date, current.pickup_options());
            current.with_pickup_date(pickup_date.to_owned(), price)
        });
    }

    pub fn reset(&self) {
        self.replace(|_| blank_order(&self.policy, &self.locale, self.clock.as_ref()));
    }

    pub fn current_state(&self) -> Arc<OrderState> {
        Arc::clone(&self.state.borrow())
    }

    /// Receiver that observes every snapshot published after this call.
    pub fn subscribe(&self) -> watch::Receiver<Arc<OrderState>> {
        self.state.subscribe()
    }

    /// Pickup labels for the clock's current date, computed fresh on each call.
    pub fn pickup_options(&self) -> Vec<String> {
        pickup_labels(self.clock.today(), &self.locale)
    }

    pub fn locale(&self) -> &OrderLocale {
        &self.locale
    }

    fn price_for(&self, quantity: u32, pickup_date: &str, pickup_options: &[String]) -> String {
        let same_day = pickup_options
            .first()
            .is_some_and(|today| today == pickup_date);
        self.locale
            .format_price(self.policy.subtotal(quantity, same_day))
    }

    fn replace<F>(&self, update: F)
    where
        F: FnOnce(&OrderState) -> OrderState,
    {
        self.state.send_modify(|current| {
            let next = update(current);
            debug!(
                quantity = next.quantity(),
                flavor = next.flavor(),
                pickup_date = next.pickup_date(),
                price = next.price(),
                "order snapshot replaced"
            );
            *current = Arc::new(next);
        });
    }
}

fn blank_order(policy: &PricingPolicy, locale: &OrderLocale, clock: &dyn Clock) -> OrderState {
    let pickup_options = pickup_labels(clock.today(), locale);
    let price = locale.format_price(policy.subtotal(0, false));
    OrderState::new(pickup_options, price)
}
