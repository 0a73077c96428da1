use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuantityOption {
    pub label: &'static str,
    pub quantity: u32,
}

/// Selections offered on the start and flavor screens.
#[derive(Debug)]
pub struct OrderCatalog {
    quantities: Vec<QuantityOption>,
    flavors: Vec<&'static str>,
}

impl OrderCatalog {
    pub fn standard() -> Self {
        Self {
            quantities: vec![
                QuantityOption {
                    label: "One Cupcake",
                    quantity: 1,
                },
                QuantityOption {
                    label: "Six Cupcakes",
                    quantity: 6,
                },
                QuantityOption {
                    label: "Twelve Cupcakes",
                    quantity: 12,
                },
            ],
            flavors: vec![
                "Vanilla",
                "Chocolate",
                "Red Velvet",
                "Salted Caramel",
                "Coffee",
            ],
        }
    }

    pub fn quantity_options(&self) -> &[QuantityOption] {
        &self.quantities
    }

    pub fn flavors(&self) -> &[&'static str] {
        &self.flavors
    }

    pub fn quantity_option(&self, quantity: u32) -> Option<&QuantityOption> {
        self.quantities
            .iter()
            .find(|option| option.quantity == quantity)
    }

    pub fn contains_flavor(&self, name: &str) -> bool {
        self.flavors
            .iter()
            .any(|flavor| flavor.eq_ignore_ascii_case(name.trim()))
    }
}
