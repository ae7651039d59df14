//! Volume, stored as whole milliliters
//!
//! The unit table covers the metric kitchen range plus the French spoon
//! units (`c-à-c` teaspoon, `c-à-s` tablespoon). Spoons are parse-only:
//! rendering picks among ml, cl, dl and l.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::helpers::{format_count, scale_for_display};

/// A volume as a rounded count of milliliters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Volume {
    milliliters: i64,
}

impl Volume {
    /// Recognized unit symbols, smallest first
    pub const UNITS: &'static [&'static str] = &["ml", "c-à-c", "cl", "c-à-s", "dl", "l"];

    /// Create from a milliliter count, rounding to the nearest integer
    pub fn new(milliliters: f64) -> Self {
        Volume {
            milliliters: milliliters.round() as i64,
        }
    }

    pub fn supports_unit(unit: &str) -> bool {
        Self::unit_factor(unit).is_some()
    }

    /// Milliliters per unit, `None` for unrecognized symbols
    fn unit_factor(unit: &str) -> Option<i64> {
        match unit {
            "ml" => Some(1),
            "c-à-c" => Some(5),
            "cl" => Some(10),
            "c-à-s" => Some(15),
            "dl" => Some(100),
            "l" => Some(1000),
            _ => None,
        }
    }

    /// Create from a count in any recognized unit
    pub fn from_unit(count: f64, unit: &str) -> Option<Self> {
        Self::unit_factor(unit).map(|factor| Volume::new(count * factor as f64))
    }

    pub fn milliliters(&self) -> i64 {
        self.milliliters
    }

    pub fn add(&self, other: &Volume) -> Volume {
        Volume {
            milliliters: self.milliliters + other.milliliters,
        }
    }

    pub fn multiply(&self, factor: f64) -> Volume {
        Volume::new(self.milliliters as f64 * factor)
    }

    /// Dimensionless ratio of the two counts, exact
    pub fn divide(&self, other: &Volume) -> f64 {
        self.milliliters as f64 / other.milliliters as f64
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (divisor, unit) = if self.milliliters >= 1000 {
            (1000, "l")
        } else if self.milliliters >= 100 {
            (100, "dl")
        } else if self.milliliters >= 10 {
            (10, "cl")
        } else {
            (1, "ml")
        };

        let count = scale_for_display(self.milliliters, divisor);
        write!(f, "{}{}", format_count(count), unit)
    }
}
