use serde::{Deserialize, Serialize};

/// Flat price per cupcake, in minor currency units.
pub const PRICE_PER_CUPCAKE: u64 = 200;
/// Added when the order is collected on the day it was placed.
pub const SAME_DAY_PICKUP_SURCHARGE: u64 = 300;
/// Number of consecutive pickup days offered, today included.
pub const PICKUP_WINDOW_DAYS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStage {
    Start,
    Flavor,
    Pickup,
    Summary,
}

impl OrderStage {
    pub const fn ordered() -> [Self; 4] {
        [Self::Start, Self::Flavor, Self::Pickup, Self::Summary]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Start => "Cupcake",
            Self::Flavor => "Choose Flavor",
            Self::Pickup => "Choose Pickup Date",
            Self::Summary => "Order Summary",
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::Flavor),
            Self::Flavor => Some(Self::Pickup),
            Self::Pickup => Some(Self::Summary),
            Self::Summary => None,
        }
    }

    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Start => None,
            Self::Flavor => Some(Self::Start),
            Self::Pickup => Some(Self::Flavor),
            Self::Summary => Some(Self::Pickup),
        }
    }
}

/// Failure raised by the order controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("quantity must be a non-negative count, got {0}")]
    InvalidQuantity(i64),
}
