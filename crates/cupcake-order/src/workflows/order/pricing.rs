use super::domain::{PRICE_PER_CUPCAKE, SAME_DAY_PICKUP_SURCHARGE};
use serde::Serialize;

/// Unit price and surcharge, both in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PricingPolicy {
    pub price_per_unit: u64,
    pub same_day_surcharge: u64,
}

impl PricingPolicy {
    pub const fn standard() -> Self {
        Self {
            price_per_unit: PRICE_PER_CUPCAKE,
            same_day_surcharge: SAME_DAY_PICKUP_SURCHARGE,
        }
    }

    pub fn subtotal(&self, quantity: u32, same_day_pickup: bool) -> u64 {
        let base = u64::from(quantity) * self.price_per_unit;
        if same_day_pickup {
            base + self.same_day_surcharge
        } else {
            base
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolPlacement {
    Prefix,
    Suffix,
}

/// Renders minor-unit amounts the way a locale writes money.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: &'static str,
    pub placement: SymbolPlacement,
    pub decimal_separator: char,
    pub group_separator: char,
    /// When false the amount is rounded to whole units.
    pub show_minor_units: bool,
    /// Puts a space between the amount and the symbol.
    pub spaced: bool,
}

impl CurrencyFormat {
    pub fn format(&self, minor_units: u64) -> String {
        let major = minor_units / 100;
        let minor = minor_units % 100;

        let mut amount = if self.show_minor_units {
            let mut amount = group_digits(major, self.group_separator);
            amount.push(self.decimal_separator);
            amount.push_str(&format!("{minor:02}"));
            amount
        } else {
            let rounded = if minor >= 50 { major + 1 } else { major };
            group_digits(rounded, self.group_separator)
        };

        let gap = if self.spaced { " " } else { "" };
        match self.placement {
            SymbolPlacement::Prefix => format!("{}{gap}{amount}", self.symbol),
            SymbolPlacement::Suffix => {
                amount.push_str(gap);
                amount.push_str(self.symbol);
                amount
            }
        }
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}
