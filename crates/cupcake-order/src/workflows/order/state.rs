use serde::Serialize;

/// Immutable snapshot of an order.
///
/// The controller never edits a snapshot; every selection produces a new
/// value, so a renderer can hold on to one without it changing underneath.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderState {
    quantity: u32,
    flavor: String,
    pickup_date: String,
    price: String,
    pickup_options: Vec<String>,
}

impl OrderState {
    /// Blank order: no quantity, flavor or pickup date chosen yet.
    pub fn new(pickup_options: Vec<String>, price: String) -> Self {
        Self::from_parts(0, String::new(), String::new(), price, pickup_options)
    }

    pub fn from_parts(
        quantity: u32,
        flavor: String,
        pickup_date: String,
        price: String,
        pickup_options: Vec<String>,
    ) -> Self {
        Self {
            quantity,
            flavor,
            pickup_date,
            price,
            pickup_options,
        }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn flavor(&self) -> &str {
        &self.flavor
    }

    pub fn pickup_date(&self) -> &str {
        &self.pickup_date
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn pickup_options(&self) -> &[String] {
        &self.pickup_options
    }

    pub fn has_quantity(&self) -> bool {
        self.quantity > 0
    }

    pub fn has_flavor(&self) -> bool {
        !self.flavor.is_empty()
    }

    pub fn has_pickup_date(&self) -> bool {
        !self.pickup_date.is_empty()
    }

    pub fn is_same_day_pickup(&self) -> bool {
        self.pickup_options
            .first()
            .is_some_and(|today| today == &self.pickup_date)
    }

    pub(crate) fn with_quantity(&self, quantity: u32, price: String) -> Self {
        Self {
            quantity,
            price,
            ..self.clone()
        }
    }

    pub(crate) fn with_flavor(&self, flavor: String) -> Self {
        Self {
            flavor,
            ..self.clone()
        }
    }

    pub(crate) fn with_pickup_date(&self, pickup_date: String, price: String) -> Self {
        Self {
            pickup_date,
            price,
            ..self.clone()
        }
    }
}
