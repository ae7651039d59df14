//! Errors reported by the quantity algebra
//!
//! Two families share one enum: malformed input (a token, conversion rule
//! or price string that does not parse) and semantic incompatibility
//! (operating on quantities of unrelated kinds once conversion has been
//! attempted). Callers that tolerate incompatibility, like price totaling,
//! match on the variant rather than the message.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for quantity operations
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum QuantityError {
    /// A quantity token that does not match `<number><unit>`
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// A conversion rule line without exactly one `/` separator
    #[error("Invalid conversion rule: {0}")]
    InvalidConversionRule(String),

    /// A price string that does not match `<value><currency>[/<quantity>]`
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Two unknown-unit quantities with different unit strings
    #[error("Incompatible units: {left} vs. {right}")]
    IncompatibleUnits { left: String, right: String },

    /// Two quantities of different kinds with no conversion rule between them
    #[error("Incompatible types: {left} vs. {right}")]
    IncompatibleTypes { left: String, right: String },

    /// Division between composite quantities that is not a same-kind ratio
    #[error("Division unsupported for these quantities: {left} / {right}")]
    UnsupportedDivision { left: String, right: String },
}

impl QuantityError {
    /// Whether this error is a semantic incompatibility rather than a
    /// malformed-input failure.
    pub fn is_incompatibility(&self) -> bool {
        matches!(
            self,
            QuantityError::IncompatibleUnits { .. }
                | QuantityError::IncompatibleTypes { .. }
                | QuantityError::UnsupportedDivision { .. }
        )
    }
}
