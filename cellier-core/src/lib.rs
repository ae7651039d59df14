//! Cellier Core - Fundamental types
//!
//! This crate provides the types shared by the whole workspace:
//! - `QuantityError`: every failure the quantity algebra can report

mod error;

pub use error::QuantityError;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::QuantityError;
}
