//! Cellier Units - Quantity Algebra
//!
//! Represents grocery-scale physical quantities and the arithmetic the
//! list/recipe layers need: parsing compact tokens (`300g`, `4.2cl`,
//! `6 gousses`), addition, scalar multiplication and division-as-ratio,
//! including across dimensions through caller-declared conversion rules.
//!
//! Dimensions:
//! - Volume (ml, c-à-c, cl, c-à-s, dl, l), stored in milliliters
//! - Mass (mg, g, hg, kg), stored in milligrams
//! - Length (mm through km), stored in millimeters
//! - Area (squared length units, three spellings each), stored in mm²
//!
//! Anything else is tracked under its own literal unit string. All values
//! are immutable; every operation returns a new instance. Conversion
//! tables are parsed once and shared read-only via `Arc`.

mod area;
mod convert;
mod helpers;
mod length;
mod mass;
mod mixed;
mod quantity;
mod volume;

pub use area::Area;
pub use convert::ConversionTable;
pub use length::Length;
pub use mass::Mass;
pub use mixed::MixedQuantities;
pub use quantity::{Kind, Quantity};
pub use volume::Volume;

pub use cellier_core::QuantityError;
