//! Mixed quantities: an additive inventory across dimensions
//!
//! A recipe line or a shopping-list total rarely stays in one dimension,
//! so this container holds at most one scalar per physical dimension plus
//! an open, insertion-ordered map of unknown-unit counts. The textual form
//! is pipe-delimited: `4.2cl|300g|6 gousses`.

use std::fmt;

use cellier_core::QuantityError;

use crate::convert::ConversionTable;
use crate::helpers::format_count;
use crate::quantity::{split_token, Kind, Quantity};
use crate::{Area, Length, Mass, Volume};

/// Up to one quantity per dimension, plus unknown units keyed by their
/// literal string. The empty unit `""` is a valid, distinct key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MixedQuantities {
    volume: Option<Volume>,
    mass: Option<Mass>,
    length: Option<Length>,
    area: Option<Area>,
    unknown: Vec<(String, f64)>,
}

impl MixedQuantities {
    pub fn empty() -> Self {
        MixedQuantities::default()
    }

    /// A bare number: a single unknown entry with the empty unit
    pub fn from_count(count: f64) -> Self {
        MixedQuantities::from_parts(count, "")
    }

    /// Classify one count/unit pair into the matching dimension slot,
    /// reusing the quantity dispatch (and its diagnostics). Composite
    /// quantities never resolve cross-dimension conversions.
    pub fn from_parts(count: f64, unit: &str) -> Self {
        let quantity = Quantity::from_parts(count, unit, ConversionTable::empty());

        match quantity.kind() {
            Kind::Volume(value) => MixedQuantities {
                volume: Some(*value),
                ..MixedQuantities::default()
            },
            Kind::Mass(value) => MixedQuantities {
                mass: Some(*value),
                ..MixedQuantities::default()
            },
            Kind::Length(value) => MixedQuantities {
                length: Some(*value),
                ..MixedQuantities::default()
            },
            Kind::Area(value) => MixedQuantities {
                area: Some(*value),
                ..MixedQuantities::default()
            },
            Kind::Unknown { unit, count } => MixedQuantities {
                unknown: vec![(unit.clone(), *count)],
                ..MixedQuantities::default()
            },
        }
    }

    /// Parse a pipe-delimited composite. Segments that do not match the
    /// token grammar are dropped, so the empty string parses to the empty
    /// inventory and `parse(x.to_string())` is total.
    pub fn parse(text: &str) -> Self {
        text.split('|')
            .filter_map(split_token)
            .map(|(count, unit)| MixedQuantities::from_parts(count, unit))
            .fold(MixedQuantities::empty(), |acc, item| acc.add(&item))
    }

    pub fn volume(&self) -> Option<&Volume> {
        self.volume.as_ref()
    }

    pub fn mass(&self) -> Option<&Mass> {
        self.mass.as_ref()
    }

    pub fn length(&self) -> Option<&Length> {
        self.length.as_ref()
    }

    pub fn area(&self) -> Option<&Area> {
        self.area.as_ref()
    }

    pub fn unknown(&self) -> &[(String, f64)] {
        &self.unknown
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions().is_empty()
    }

    /// Field-wise sum: a missing side is the identity, unknown entries
    /// merge by key with the left side's insertion order first.
    pub fn add(&self, other: &MixedQuantities) -> MixedQuantities {
        let mut unknown = self.unknown.clone();
        for (key, value) in &other.unknown {
            match unknown.iter_mut().find(|(existing, _)| existing == key) {
                Some(entry) => entry.1 += value,
                None => unknown.push((key.clone(), *value)),
            }
        }

        MixedQuantities {
            volume: merge(self.volume, other.volume, |a, b| a.add(&b)),
            mass: merge(self.mass, other.mass, |a, b| a.add(&b)),
            length: merge(self.length, other.length, |a, b| a.add(&b)),
            area: merge(self.area, other.area, |a, b| a.add(&b)),
            unknown,
        }
    }

    /// Scale every present field. Zero is absorbing: it empties the
    /// inventory outright instead of leaving zero-valued entries behind.
    pub fn multiply(&self, factor: f64) -> MixedQuantities {
        if factor == 0.0 {
            return MixedQuantities::empty();
        }

        MixedQuantities {
            volume: self.volume.map(|value| value.multiply(factor)),
            mass: self.mass.map(|value| value.multiply(factor)),
            length: self.length.map(|value| value.multiply(factor)),
            area: self.area.map(|value| value.multiply(factor)),
            unknown: self
                .unknown
                .iter()
                .map(|(key, value)| (key.clone(), value * factor))
                .collect(),
        }
    }

    /// Ratio between two inventories. Defined only when the numerator is
    /// empty (ratio 0 against anything non-empty) or both sides hold
    /// exactly the same single key.
    ///
    /// An unknown unit literally named `volume`, `mass`, `length` or
    /// `area` shares its key with that dimension (the same ambiguity the
    /// conversion table has). A dimension arm only applies when both sides
    /// actually hold the dimension; otherwise the unknown entries decide,
    /// and a key held as a dimension on one side and as an unknown unit on
    /// the other is unsupported.
    pub fn divide(&self, other: &MixedQuantities) -> Result<f64, QuantityError> {
        let these = self.dimensions();
        let those = other.dimensions();

        if these.is_empty() && !those.is_empty() {
            return Ok(0.0);
        }

        if these.len() == 1 && those.len() == 1 && these[0] == those[0] {
            let key = these[0].as_str();

            let ratio = match key {
                "volume" => ratio_of(self.volume, other.volume, |a, b| a.divide(&b)),
                "mass" => ratio_of(self.mass, other.mass, |a, b| a.divide(&b)),
                "length" => ratio_of(self.length, other.length, |a, b| a.divide(&b)),
                "area" => ratio_of(self.area, other.area, |a, b| a.divide(&b)),
                _ => None,
            }
            .or_else(|| {
                let count = |mixed: &MixedQuantities| {
                    mixed
                        .unknown
                        .iter()
                        .find(|(unit, _)| unit.as_str() == key)
                        .map(|(_, count)| *count)
                };
                Some(count(self)? / count(other)?)
            });

            if let Some(ratio) = ratio {
                return Ok(ratio);
            }
        }

        Err(QuantityError::UnsupportedDivision {
            left: self.to_string(),
            right: other.to_string(),
        })
    }

    /// The keys with a non-empty presence: dimension names in fixed order,
    /// then unknown unit strings in insertion order.
    pub fn dimensions(&self) -> Vec<String> {
        let mut keys = Vec::new();
        if self.volume.is_some() {
            keys.push("volume".to_string());
        }
        if self.mass.is_some() {
            keys.push("mass".to_string());
        }
        if self.length.is_some() {
            keys.push("length".to_string());
        }
        if self.area.is_some() {
            keys.push("area".to_string());
        }
        for (unit, _) in &self.unknown {
            keys.push(unit.clone());
        }
        keys
    }

    /// The inventory as single-dimension quantities (no conversions
    /// attached), in rendering order. The price layer rewraps these with
    /// its own table.
    pub fn quantities(&self) -> Vec<Quantity> {
        let mut parts = Vec::new();
        if let Some(value) = self.volume {
            parts.push(Quantity::new(Kind::Volume(value), ConversionTable::empty()));
        }
        if let Some(value) = self.mass {
            parts.push(Quantity::new(Kind::Mass(value), ConversionTable::empty()));
        }
        if let Some(value) = self.length {
            parts.push(Quantity::new(Kind::Length(value), ConversionTable::empty()));
        }
        if let Some(value) = self.area {
            parts.push(Quantity::new(Kind::Area(value), ConversionTable::empty()));
        }
        for (unit, count) in &self.unknown {
            parts.push(Quantity::new(
                Kind::Unknown {
                    unit: unit.clone(),
                    count: *count,
                },
                ConversionTable::empty(),
            ));
        }
        parts
    }
}

fn ratio_of<T: Copy>(
    left: Option<T>,
    right: Option<T>,
    divide: impl Fn(T, T) -> f64,
) -> Option<f64> {
    Some(divide(left?, right?))
}

fn merge<T: Copy>(left: Option<T>, right: Option<T>, add: impl Fn(T, T) -> T) -> Option<T> {
    match (left, right) {
        (Some(a), Some(b)) => Some(add(a, b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}

impl fmt::Display for MixedQuantities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments: Vec<String> = Vec::new();

        if let Some(value) = &self.volume {
            segments.push(value.to_string());
        }
        if let Some(value) = &self.mass {
            segments.push(value.to_string());
        }
        if let Some(value) = &self.length {
            segments.push(value.to_string());
        }
        if let Some(value) = &self.area {
            segments.push(value.to_string());
        }
        for (unit, count) in &self.unknown {
            if unit.is_empty() {
                segments.push(format_count(*count));
            } else {
                segments.push(format!("{} {}", format_count(*count), unit));
            }
        }

        write!(f, "{}", segments.join("|"))
    }
}
