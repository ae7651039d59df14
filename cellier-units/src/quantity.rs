//! Single-dimension quantity: one value tagged with its kind
//!
//! `Quantity` is the unit of exchange with the spreadsheet layers: one
//! parsed token, either a recognized physical dimension or an arbitrary
//! unknown unit (`gousses`, `pièces`, or no unit at all). It carries a
//! shared, read-only conversion table and resolves cross-dimension
//! arithmetic through it before giving up with a typed error.

use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use cellier_core::QuantityError;

use crate::convert::ConversionTable;
use crate::helpers::format_count;
use crate::{Area, Length, Mass, Volume};

/// `<number><optional whitespace><unit>` — the single-token grammar
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9.]+)\s*(\S*)$").expect("valid token regex"));

/// Split a token into count and unit text. `None` when the token does not
/// match the grammar or the number does not parse.
pub(crate) fn split_token(text: &str) -> Option<(f64, &str)> {
    let caps = TOKEN_RE.captures(text)?;
    let count: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    Some((count, unit))
}

/// The kind of a quantity: one variant per physical dimension, plus the
/// open bucket for unrecognized units. Every consumer matches exhaustively,
/// so a new dimension cannot be half-wired.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Volume(Volume),
    Mass(Mass),
    Length(Length),
    Area(Area),
    Unknown { unit: String, count: f64 },
}

/// A tagged quantity plus a reference to its conversion rules
#[derive(Debug, Clone)]
pub struct Quantity {
    kind: Kind,
    conversions: Arc<ConversionTable>,
}

impl Quantity {
    pub fn new(kind: Kind, conversions: Arc<ConversionTable>) -> Self {
        Quantity { kind, conversions }
    }

    /// A bare number: an unknown quantity with the empty unit
    pub fn from_count(count: f64) -> Self {
        Quantity::from_parts(count, "", ConversionTable::empty())
    }

    /// Dispatch a count and unit text through the dimension tables.
    /// Anything unrecognized lands in `Unknown` with the unit trimmed;
    /// that case warns unless the unit is empty or the servings marker `p`.
    pub fn from_parts(count: f64, unit: &str, conversions: Arc<ConversionTable>) -> Self {
        if let Some(value) = Volume::from_unit(count, unit) {
            return Quantity::new(Kind::Volume(value), conversions);
        }

        if let Some(value) = Mass::from_unit(count, unit) {
            return Quantity::new(Kind::Mass(value), conversions);
        }

        if let Some(value) = Length::from_unit(count, unit) {
            return Quantity::new(Kind::Length(value), conversions);
        }

        if let Some(value) = Area::from_unit(count, unit) {
            return Quantity::new(Kind::Area(value), conversions);
        }

        let trimmed = unit.trim();
        if !matches!(trimmed, "" | "p") {
            tracing::warn!(unit = trimmed, "Unrecognized unit");
        }

        Quantity::new(
            Kind::Unknown {
                unit: trimmed.to_string(),
                count,
            },
            conversions,
        )
    }

    /// Parse one quantity token
    pub fn parse(text: &str, conversions: Arc<ConversionTable>) -> Result<Self, QuantityError> {
        let (count, unit) = split_token(text)
            .ok_or_else(|| QuantityError::InvalidQuantity(text.to_string()))?;
        Ok(Quantity::from_parts(count, unit, conversions))
    }

    /// Parse one quantity token together with its conversion-rule block
    pub fn parse_with_rules(text: &str, rules: &str) -> Result<Self, QuantityError> {
        let conversions = Arc::new(ConversionTable::parse(rules)?);
        Quantity::parse(text, conversions)
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn conversions(&self) -> &Arc<ConversionTable> {
        &self.conversions
    }

    /// Same value, different conversion table
    pub fn with_conversions(&self, conversions: Arc<ConversionTable>) -> Self {
        Quantity::new(self.kind.clone(), conversions)
    }

    /// The identifier this quantity is addressed by in a conversion table:
    /// the dimension name, or the literal unit string for unknowns. Two
    /// quantities are the same kind iff their unit keys are equal.
    pub fn unit_key(&self) -> &str {
        match &self.kind {
            Kind::Volume(_) => "volume",
            Kind::Mass(_) => "mass",
            Kind::Length(_) => "length",
            Kind::Area(_) => "area",
            Kind::Unknown { unit, .. } => unit,
        }
    }

    /// The kind tag, as it appears in incompatibility errors
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            Kind::Volume(_) => "volume",
            Kind::Mass(_) => "mass",
            Kind::Length(_) => "length",
            Kind::Area(_) => "area",
            Kind::Unknown { .. } => "unknown",
        }
    }

    /// Resolve this quantity into `target`'s kind if a conversion rule
    /// bridges the two unit keys, in either declared direction. Without a
    /// rule the quantity is returned unchanged and the caller's arithmetic
    /// decides whether the kinds still line up.
    pub fn try_convert_to(&self, target: &Quantity) -> Result<Quantity, QuantityError> {
        if let Some((from, to)) = self.conversions.get(self.unit_key(), target.unit_key()) {
            let scale = self.divide(from)?;
            return Ok(Quantity::new(to.kind.clone(), self.conversions.clone()).multiply(scale));
        }

        // Reverse direction: the rule was declared target-first, so its
        // first element is the one to scale.
        if let Some((to, from)) = self.conversions.get(target.unit_key(), self.unit_key()) {
            let scale = self.divide(from)?;
            return Ok(Quantity::new(to.kind.clone(), self.conversions.clone()).multiply(scale));
        }

        Ok(self.clone())
    }

    /// Sum with another quantity, converting it to this kind first when a
    /// rule applies. No operand is the identity.
    pub fn add(&self, other: Option<&Quantity>) -> Result<Quantity, QuantityError> {
        let Some(other) = other else {
            return Ok(self.clone());
        };

        let converted = other.try_convert_to(self)?;

        match &self.kind {
            Kind::Volume(value) => {
                if let Kind::Volume(other) = &converted.kind {
                    return Ok(self.with_kind(Kind::Volume(value.add(other))));
                }
            }
            Kind::Mass(value) => {
                if let Kind::Mass(other) = &converted.kind {
                    return Ok(self.with_kind(Kind::Mass(value.add(other))));
                }
            }
            Kind::Length(value) => {
                if let Kind::Length(other) = &converted.kind {
                    return Ok(self.with_kind(Kind::Length(value.add(other))));
                }
            }
            Kind::Area(value) => {
                if let Kind::Area(other) = &converted.kind {
                    return Ok(self.with_kind(Kind::Area(value.add(other))));
                }
            }
            Kind::Unknown { unit, count } => {
                if let Kind::Unknown {
                    unit: other_unit,
                    count: other_count,
                } = &converted.kind
                {
                    if unit != other_unit {
                        return Err(QuantityError::IncompatibleUnits {
                            left: unit.clone(),
                            right: other_unit.clone(),
                        });
                    }

                    return Ok(self.with_kind(Kind::Unknown {
                        unit: unit.clone(),
                        count: count + other_count,
                    }));
                }
            }
        }

        Err(QuantityError::IncompatibleTypes {
            left: self.type_name().to_string(),
            right: converted.type_name().to_string(),
        })
    }

    /// Scale by a dimensionless factor
    pub fn multiply(&self, factor: f64) -> Quantity {
        let kind = match &self.kind {
            Kind::Volume(value) => Kind::Volume(value.multiply(factor)),
            Kind::Mass(value) => Kind::Mass(value.multiply(factor)),
            Kind::Length(value) => Kind::Length(value.multiply(factor)),
            Kind::Area(value) => Kind::Area(value.multiply(factor)),
            Kind::Unknown { unit, count } => Kind::Unknown {
                unit: unit.clone(),
                count: count * factor,
            },
        };

        self.with_kind(kind)
    }

    /// Ratio against another quantity of the same kind, converting it to
    /// this kind first when a rule applies. The result carries no dimension
    /// and no rounding.
    pub fn divide(&self, other: &Quantity) -> Result<f64, QuantityError> {
        let converted = other.try_convert_to(self)?;

        match &self.kind {
            Kind::Volume(value) => {
                if let Kind::Volume(other) = &converted.kind {
                    return Ok(value.divide(other));
                }
            }
            Kind::Mass(value) => {
                if let Kind::Mass(other) = &converted.kind {
                    return Ok(value.divide(other));
                }
            }
            Kind::Length(value) => {
                if let Kind::Length(other) = &converted.kind {
                    return Ok(value.divide(other));
                }
            }
            Kind::Area(value) => {
                if let Kind::Area(other) = &converted.kind {
                    return Ok(value.divide(other));
                }
            }
            Kind::Unknown { unit, count } => {
                if let Kind::Unknown {
                    unit: other_unit,
                    count: other_count,
                } = &converted.kind
                {
                    if unit != other_unit {
                        return Err(QuantityError::IncompatibleUnits {
                            left: unit.clone(),
                            right: other_unit.clone(),
                        });
                    }

                    return Ok(count / other_count);
                }
            }
        }

        Err(QuantityError::IncompatibleTypes {
            left: self.type_name().to_string(),
            right: converted.type_name().to_string(),
        })
    }

    fn with_kind(&self, kind: Kind) -> Quantity {
        Quantity::new(kind, self.conversions.clone())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Volume(value) => value.fmt(f),
            Kind::Mass(value) => value.fmt(f),
            Kind::Length(value) => value.fmt(f),
            Kind::Area(value) => value.fmt(f),
            Kind::Unknown { unit, count } => {
                if unit.is_empty() {
                    write!(f, "{}", format_count(*count))
                } else {
                    write!(f, "{} {}", format_count(*count), unit)
                }
            }
        }
    }
}

impl PartialEq for Quantity {
    /// Value equality; the conversion table is context, not value
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Quantity {
        Quantity::parse(text, ConversionTable::empty()).unwrap()
    }

    #[test]
    fn test_from_parts_recognizes_dimensions() {
        assert_eq!(
            *Quantity::from_parts(4.0, "cl", ConversionTable::empty()).kind(),
            Kind::Volume(Volume::from_unit(4.0, "cl").unwrap())
        );
        assert_eq!(
            *Quantity::from_parts(300.0, "g", ConversionTable::empty()).kind(),
            Kind::Mass(Mass::from_unit(300.0, "g").unwrap())
        );
        assert_eq!(
            *Quantity::from_parts(2.0, "m", ConversionTable::empty()).kind(),
            Kind::Length(Length::from_unit(2.0, "m").unwrap())
        );
        assert_eq!(
            *Quantity::from_parts(3.0, "m²", ConversionTable::empty()).kind(),
            Kind::Area(Area::from_unit(3.0, "m²").unwrap())
        );
    }

    #[test]
    fn test_from_parts_tracks_unknown_units() {
        let q = Quantity::from_parts(6.0, " gousses ", ConversionTable::empty());
        assert_eq!(
            *q.kind(),
            Kind::Unknown {
                unit: "gousses".to_string(),
                count: 6.0
            }
        );
        assert_eq!(q.unit_key(), "gousses");
    }

    #[test]
    fn test_parse() {
        assert_eq!(plain("300g").to_string(), "300g");
        assert_eq!(plain("4.2cl").to_string(), "4.2cl");
        assert_eq!(plain("6 gousses").to_string(), "6 gousses");
        assert_eq!(plain("4").to_string(), "4");
        assert!(Quantity::parse("abc", ConversionTable::empty()).is_err());
        assert!(Quantity::parse("", ConversionTable::empty()).is_err());
        assert!(Quantity::parse("1.2.3g", ConversionTable::empty()).is_err());
    }

    #[test]
    fn test_unit_keys() {
        assert_eq!(plain("1l").unit_key(), "volume");
        assert_eq!(plain("1kg").unit_key(), "mass");
        assert_eq!(plain("1m").unit_key(), "length");
        assert_eq!(plain("1m2").unit_key(), "area");
        assert_eq!(plain("1 p").unit_key(), "p");
        assert_eq!(plain("4").unit_key(), "");
    }

    #[test]
    fn test_add_same_dimension() {
        let sum = plain("4cl").add(Some(&plain("1 c-à-s"))).unwrap();
        assert_eq!(sum.to_string(), "5.5cl");
    }

    #[test]
    fn test_add_identity() {
        let q = plain("300g");
        assert_eq!(q.add(None).unwrap(), q);
    }

    #[test]
    fn test_add_unknown_units_must_match() {
        let sum = plain("2 gousses").add(Some(&plain("3 gousses"))).unwrap();
        assert_eq!(sum.to_string(), "5 gousses");

        let err = plain("2 gousses").add(Some(&plain("3 pièces"))).unwrap_err();
        assert_eq!(
            err,
            QuantityError::IncompatibleUnits {
                left: "gousses".to_string(),
                right: "pièces".to_string()
            }
        );
    }

    #[test]
    fn test_add_incompatible_types() {
        let err = plain("1l").add(Some(&plain("300g"))).unwrap_err();
        assert_eq!(
            err,
            QuantityError::IncompatibleTypes {
                left: "volume".to_string(),
                right: "mass".to_string()
            }
        );
    }

    #[test]
    fn test_multiply() {
        assert_eq!(plain("4cl").multiply(2.0).to_string(), "8cl");
        assert_eq!(plain("6 gousses").multiply(0.5).to_string(), "3 gousses");
    }

    #[test]
    fn test_divide() {
        assert_eq!(plain("1l").divide(&plain("25cl")).unwrap(), 4.0);
        assert_eq!(plain("6 gousses").divide(&plain("2 gousses")).unwrap(), 3.0);
        assert!(plain("1l").divide(&plain("1kg")).is_err());
    }

    #[test]
    fn test_convert_forward() {
        // declared volume-first: 100ml of the product weighs 150g
        let volume = Quantity::parse_with_rules("200ml", "100ml/150g").unwrap();
        let mass = plain("1g");

        let converted = volume.try_convert_to(&mass).unwrap();
        assert_eq!(converted.to_string(), "300g");
    }

    #[test]
    fn test_convert_reverse() {
        let mass = Quantity::parse_with_rules("300g", "100ml/150g").unwrap();
        let volume = plain("1ml");

        let converted = mass.try_convert_to(&volume).unwrap();
        assert_eq!(converted.to_string(), "2dl");
    }

    #[test]
    fn test_convert_without_rule_is_identity() {
        let q = plain("300g");
        assert_eq!(q.try_convert_to(&plain("1l")).unwrap(), q);
    }

    #[test]
    fn test_add_across_dimensions_with_rule() {
        let volume = Quantity::parse_with_rules("100ml", "100ml/150g").unwrap();
        let mass = Quantity::parse_with_rules("150g", "100ml/150g").unwrap();

        // operand gets converted into the receiver's dimension
        assert_eq!(volume.add(Some(&mass)).unwrap().to_string(), "2dl");
        assert_eq!(mass.add(Some(&volume)).unwrap().to_string(), "300g");
    }

    #[test]
    fn test_divide_across_dimensions_with_rule() {
        let volume = Quantity::parse_with_rules("200ml", "100ml/150g").unwrap();
        let mass = Quantity::parse_with_rules("150g", "100ml/150g").unwrap();

        assert_eq!(volume.divide(&mass).unwrap(), 2.0);
    }

    #[test]
    fn test_conversion_rule_to_unknown() {
        // one sachet is 8 grams
        let mass = Quantity::parse_with_rules("16g", "1 sachet/8g").unwrap();
        let sachet = plain("1 sachet");

        let converted = mass.try_convert_to(&sachet).unwrap();
        assert_eq!(converted.to_string(), "2 sachet");
    }

    #[test]
    fn test_display_unknown_with_empty_unit() {
        assert_eq!(Quantity::from_count(4.0).to_string(), "4");
    }
}
