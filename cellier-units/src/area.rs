//! Area, stored as whole squared millimeters
//!
//! Units are the squared length units, each accepted in three spellings:
//! `cm2`, `cm^2` and `cm²`. Rendering always uses the `²` spelling and
//! only mm², cm², m² and km².

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::helpers::{format_count, scale_for_display};
use crate::length::Length;

/// An area as a rounded count of squared millimeters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Area {
    squared_millimeters: i64,
}

impl Area {
    /// Recognized unit symbols: every length unit squared, three spellings each
    pub const UNITS: &'static [&'static str] = &[
        "mm2", "mm^2", "mm²", "cm2", "cm^2", "cm²", "dm2", "dm^2", "dm²", "m2", "m^2", "m²",
        "dam2", "dam^2", "dam²", "hm2", "hm^2", "hm²", "km2", "km^2", "km²",
    ];

    /// Create from a squared-millimeter count, rounding to the nearest integer
    pub fn new(squared_millimeters: f64) -> Self {
        Area {
            squared_millimeters: squared_millimeters.round() as i64,
        }
    }

    pub fn supports_unit(unit: &str) -> bool {
        Self::unit_factor(unit).is_some()
    }

    /// Squared millimeters per unit: the squared factor of the underlying
    /// length unit, whatever the exponent spelling.
    fn unit_factor(unit: &str) -> Option<i64> {
        let side = unit
            .strip_suffix("^2")
            .or_else(|| unit.strip_suffix('²'))
            .or_else(|| unit.strip_suffix('2'))?;
        let factor = Length::unit_factor(side)?;
        Some(factor * factor)
    }

    /// Create from a count in any recognized unit
    pub fn from_unit(count: f64, unit: &str) -> Option<Self> {
        Self::unit_factor(unit).map(|factor| Area::new(count * factor as f64))
    }

    pub fn squared_millimeters(&self) -> i64 {
        self.squared_millimeters
    }

    pub fn add(&self, other: &Area) -> Area {
        Area {
            squared_millimeters: self.squared_millimeters + other.squared_millimeters,
        }
    }

    pub fn multiply(&self, factor: f64) -> Area {
        Area::new(self.squared_millimeters as f64 * factor)
    }

    /// Dimensionless ratio of the two counts, exact
    pub fn divide(&self, other: &Area) -> f64 {
        self.squared_millimeters as f64 / other.squared_millimeters as f64
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (divisor, unit) = if self.squared_millimeters >= 1_000_000_000_000 {
            (1_000_000_000_000, "km²")
        } else if self.squared_millimeters >= 1_000_000 {
            (1_000_000, "m²")
        } else if self.squared_millimeters >= 100 {
            (100, "cm²")
        } else {
            (1, "mm²")
        };

        let count = scale_for_display(self.squared_millimeters, divisor);
        write!(f, "{}{}", format_count(count), unit)
    }
}
