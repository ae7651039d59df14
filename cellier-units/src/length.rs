//! Length, stored as whole millimeters
//!
//! The full metric ladder parses; rendering only uses mm, cm, m and km.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::helpers::{format_count, scale_for_display};

/// A length as a rounded count of millimeters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Length {
    millimeters: i64,
}

impl Length {
    /// Recognized unit symbols, smallest first
    pub const UNITS: &'static [&'static str] = &["mm", "cm", "dm", "m", "dam", "hm", "km"];

    /// Create from a millimeter count, rounding to the nearest integer
    pub fn new(millimeters: f64) -> Self {
        Length {
            millimeters: millimeters.round() as i64,
        }
    }

    pub fn supports_unit(unit: &str) -> bool {
        Self::unit_factor(unit).is_some()
    }

    /// Millimeters per unit, `None` for unrecognized symbols.
    /// Also feeds the area table, which squares these factors.
    pub(crate) fn unit_factor(unit: &str) -> Option<i64> {
        match unit {
            "mm" => Some(1),
            "cm" => Some(10),
            "dm" => Some(100),
            "m" => Some(1_000),
            "dam" => Some(10_000),
            "hm" => Some(100_000),
            "km" => Some(1_000_000),
            _ => None,
        }
    }

    /// Create from a count in any recognized unit
    pub fn from_unit(count: f64, unit: &str) -> Option<Self> {
        Self::unit_factor(unit).map(|factor| Length::new(count * factor as f64))
    }

    pub fn millimeters(&self) -> i64 {
        self.millimeters
    }

    pub fn add(&self, other: &Length) -> Length {
        Length {
            millimeters: self.millimeters + other.millimeters,
        }
    }

    pub fn multiply(&self, factor: f64) -> Length {
        Length::new(self.millimeters as f64 * factor)
    }

    /// Dimensionless ratio of the two counts, exact
    pub fn divide(&self, other: &Length) -> f64 {
        self.millimeters as f64 / other.millimeters as f64
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (divisor, unit) = if self.millimeters >= 1_000_000 {
            (1_000_000, "km")
        } else if self.millimeters >= 1_000 {
            (1_000, "m")
        } else if self.millimeters >= 10 {
            (10, "cm")
        } else {
            (1, "mm")
        };

        let count = scale_for_display(self.millimeters, divisor);
        write!(f, "{}{}", format_count(count), unit)
    }
}
