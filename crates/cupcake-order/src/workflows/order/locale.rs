use super::pricing::{CurrencyFormat, SymbolPlacement};
use chrono::{Locale, NaiveDate};

/// Currency and date-label conventions used when rendering an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLocale {
    tag: &'static str,
    currency: CurrencyFormat,
    date_pattern: &'static str,
    date_locale: Locale,
}

impl OrderLocale {
    pub const SUPPORTED: [&'static str; 6] = ["en-US", "en-GB", "de-DE", "fr-FR", "id-ID", "ja-JP"];

    pub fn en_us() -> Self {
        Self {
            tag: "en-US",
            currency: CurrencyFormat {
                symbol: "$",
                placement: SymbolPlacement::Prefix,
                decimal_separator: '.',
                group_separator: ',',
                show_minor_units: true,
                spaced: false,
            },
            date_pattern: "%a %b %-d",
            date_locale: Locale::en_US,
        }
    }

    /// Resolves a BCP 47 style tag such as `de-DE` or `en_gb`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        let locale = match normalized.as_str() {
            "en-us" | "en" => Self::en_us(),
            "en-gb" => Self {
                tag: "en-GB",
                currency: CurrencyFormat {
                    symbol: "£",
                    ..Self::en_us().currency
                },
                date_pattern: "%a %-d %b",
                date_locale: Locale::en_GB,
            },
            "de-de" | "de" => Self {
                tag: "de-DE",
                currency: CurrencyFormat {
                    symbol: "€",
                    placement: SymbolPlacement::Suffix,
                    decimal_separator: ',',
                    group_separator: '.',
                    show_minor_units: true,
                    spaced: true,
                },
                date_pattern: "%a %-d. %b",
                date_locale: Locale::de_DE,
            },
            "fr-fr" | "fr" => Self {
                tag: "fr-FR",
                currency: CurrencyFormat {
                    symbol: "€",
                    placement: SymbolPlacement::Suffix,
                    decimal_separator: ',',
                    group_separator: ' ',
                    show_minor_units: true,
                    spaced: true,
                },
                date_pattern: "%a %-d %b",
                date_locale: Locale::fr_FR,
            },
            "id-id" | "id" => Self {
                tag: "id-ID",
                currency: CurrencyFormat {
                    symbol: "Rp",
                    placement: SymbolPlacement::Prefix,
                    decimal_separator: ',',
                    group_separator: '.',
                    show_minor_units: true,
                    spaced: false,
                },
                date_pattern: "%a %-d %b",
                date_locale: Locale::id_ID,
            },
            "ja-jp" | "ja" => Self {
                tag: "ja-JP",
                currency: CurrencyFormat {
                    symbol: "¥",
                    placement: SymbolPlacement::Prefix,
                    decimal_separator: '.',
                    group_separator: ',',
                    show_minor_units: false,
                    spaced: false,
                },
                date_pattern: "%-m月%-d日 (%a)",
                date_locale: Locale::ja_JP,
            },
            _ => return None,
        };
        Some(locale)
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.currency
    }

    pub fn format_price(&self, minor_units: u64) -> String {
        self.currency.format(minor_units)
    }

    /// Renders a date with this locale's pattern and weekday/month names.
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format_localized(self.date_pattern, self.date_locale)
            .to_string()
    }
}

impl Default for OrderLocale {
    fn default() -> Self {
        Self::en_us()
    }
}
