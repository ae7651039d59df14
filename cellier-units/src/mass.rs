//! Mass, stored as whole milligrams
//!
//! `hg` is parse-only: rendering jumps straight from grams to kilograms.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::helpers::{format_count, scale_for_display};

/// A mass as a rounded count of milligrams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mass {
    milligrams: i64,
}

impl Mass {
    /// Recognized unit symbols, smallest first
    pub const UNITS: &'static [&'static str] = &["mg", "g", "hg", "kg"];

    /// Create from a milligram count, rounding to the nearest integer
    pub fn new(milligrams: f64) -> Self {
        Mass {
            milligrams: milligrams.round() as i64,
        }
    }

    pub fn supports_unit(unit: &str) -> bool {
        Self::unit_factor(unit).is_some()
    }

    /// Milligrams per unit, `None` for unrecognized symbols
    fn unit_factor(unit: &str) -> Option<i64> {
        match unit {
            "mg" => Some(1),
            "g" => Some(1_000),
            "hg" => Some(100_000),
            "kg" => Some(1_000_000),
            _ => None,
        }
    }

    /// Create from a count in any recognized unit
    pub fn from_unit(count: f64, unit: &str) -> Option<Self> {
        Self::unit_factor(unit).map(|factor| Mass::new(count * factor as f64))
    }

    pub fn milligrams(&self) -> i64 {
        self.milligrams
    }

    pub fn add(&self, other: &Mass) -> Mass {
        Mass {
            milligrams: self.milligrams + other.milligrams,
        }
    }

    pub fn multiply(&self, factor: f64) -> Mass {
        Mass::new(self.milligrams as f64 * factor)
    }

    /// Dimensionless ratio of the two counts, exact
    pub fn divide(&self, other: &Mass) -> f64 {
        self.milligrams as f64 / other.milligrams as f64
    }
}

impl fmt::Display for Mass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (divisor, unit) = if self.milligrams >= 1_000_000 {
            (1_000_000, "kg")
        } else if self.milligrams >= 1_000 {
            (1_000, "g")
        } else {
            (1, "mg")
        };

        let count = scale_for_display(self.milligrams, divisor);
        write!(f, "{}{}", format_count(count), unit)
    }
}
