//! Price parsing and best-effort basket totaling

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use cellier_core::QuantityError;
use cellier_units::{ConversionTable, MixedQuantities, Quantity};

/// `<value><currency>[/<quantity>]` — currency is any run of characters
/// that is neither a digit nor the quantity separator
static PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9.]+)([^0-9/]+)(?:/(.*))?$").expect("valid price regex"));

/// A monetary value per reference quantity
#[derive(Debug, Clone, PartialEq)]
pub struct Price {
    pub value: f64,
    pub currency: String,
    /// The quantity the value is denominated against; carries the
    /// conversion rules declared alongside the price.
    pub quantity: Quantity,
}

impl Price {
    /// Parse a price, with an optional newline-separated conversion-rule
    /// block in scope for its reference quantity.
    pub fn parse(text: &str, conversions: &str) -> Result<Price, QuantityError> {
        let caps = PRICE_RE
            .captures(text)
            .ok_or_else(|| QuantityError::InvalidPrice(text.to_string()))?;

        let value: f64 = caps[1]
            .parse()
            .map_err(|_| QuantityError::InvalidPrice(text.to_string()))?;
        let currency = caps[2].to_string();
        let table = Arc::new(ConversionTable::parse(conversions)?);

        let quantity = match caps.get(3).map(|m| m.as_str()).filter(|s| !s.is_empty()) {
            // a bare unit suffix like `/kg` means "per one kilogram"
            Some(suffix) => {
                let token = if suffix.starts_with(|c: char| c.is_ascii_digit()) {
                    suffix.to_string()
                } else {
                    format!("1{suffix}")
                };
                Quantity::parse(&token, table)
                    .map_err(|_| QuantityError::InvalidQuantity(suffix.to_string()))?
            }
            // no suffix: per one, dimensionless
            None => Quantity::from_parts(1.0, "", table),
        };

        Ok(Price {
            value,
            currency,
            quantity,
        })
    }

    /// Total this price over a requested basket: each present dimension is
    /// divided by the reference quantity (sharing the price's conversion
    /// rules), scaled by the value, and summed, rounded to 2 decimals.
    ///
    /// Incompatibility is expected for heterogeneous baskets; it is logged
    /// and reported as `None` instead of propagated.
    pub fn total_for(&self, quantities: &MixedQuantities) -> Option<TotalPrice> {
        match self.compute_total(quantities) {
            Ok(value) => Some(TotalPrice {
                value,
                currency: self.currency.clone(),
            }),
            Err(err) => {
                tracing::error!(%err, "no total price for this quantity");
                None
            }
        }
    }

    fn compute_total(&self, quantities: &MixedQuantities) -> Result<f64, QuantityError> {
        let mut total = 0.0;

        for part in quantities.quantities() {
            let part = part.with_conversions(self.quantity.conversions().clone());
            total += part.divide(&self.quantity)? * self.value;
        }

        Ok(round_to_cents(total))
    }
}

/// A computed total: value and currency, no reference quantity left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalPrice {
    pub value: f64,
    pub currency: String,
}

impl fmt::Display for TotalPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", round_to_cents(self.value), self.currency)
    }
}

/// Render a total as `<value rounded to 2 decimals><currency>`
pub fn serialize_total_price(price: &TotalPrice) -> String {
    price.to_string()
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
