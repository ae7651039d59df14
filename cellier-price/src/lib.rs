//! Cellier Price - Valuation of quantities
//!
//! Associates a monetary value with a reference quantity (`4kr/kg` is
//! "4 kroner per kilogram") and totals a requested basket against it.
//! Totaling is best-effort: quantities that cannot be related to the
//! reference, even through the declared conversion rules, yield no price
//! rather than failing the caller's larger computation.

mod price;

pub use price::{serialize_total_price, Price, TotalPrice};

pub use cellier_core::QuantityError;
