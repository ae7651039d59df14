//! Caller-declared conversion rules between quantity kinds
//!
//! A rule `100ml/150g` states that 100 ml of some product weighs 150 g.
//! Rules are declared one per line, parsed once, and the resulting table is
//! shared read-only (`Arc`) by every quantity derived from the same
//! context. The table is keyed directionally by unit key in declared
//! order; lookups query both directions.
//!
//! Known ambiguity, kept as-is: an unknown unit literally named `volume`,
//! `mass`, `length` or `area` shares its key with that dimension, and the
//! table does not disambiguate the two.

use std::collections::HashMap;
use std::sync::Arc;

use cellier_core::QuantityError;

use crate::quantity::Quantity;

/// Two-level mapping: unit key of the first side → unit key of the second
/// side → the declared rule pair.
#[derive(Debug, Default)]
pub struct ConversionTable {
    rules: HashMap<String, HashMap<String, (Quantity, Quantity)>>,
}

impl ConversionTable {
    /// A shared empty table
    pub fn empty() -> Arc<ConversionTable> {
        Arc::new(ConversionTable::default())
    }

    /// Parse a newline-separated block of rules. Blank lines are skipped;
    /// a later duplicate of the same key pair replaces the earlier rule.
    pub fn parse(text: &str) -> Result<ConversionTable, QuantityError> {
        let mut table = ConversionTable::default();

        for line in text.split('\n') {
            if line.is_empty() {
                continue;
            }

            let (first, second) = Self::parse_rule(line)?;
            table
                .rules
                .entry(first.unit_key().to_string())
                .or_default()
                .insert(second.unit_key().to_string(), (first, second));
        }

        Ok(table)
    }

    /// Parse one `<quantityA>/<quantityB>` rule line. Each side is a
    /// standalone quantity with no conversions of its own in scope.
    fn parse_rule(line: &str) -> Result<(Quantity, Quantity), QuantityError> {
        let sides: Vec<&str> = line.split('/').collect();
        let &[first, second] = sides.as_slice() else {
            return Err(QuantityError::InvalidConversionRule(line.to_string()));
        };

        Ok((
            Quantity::parse(first, ConversionTable::empty())?,
            Quantity::parse(second, ConversionTable::empty())?,
        ))
    }

    /// Look up the rule declared as `from`/`to`, in that order
    pub fn get(&self, from: &str, to: &str) -> Option<&(Quantity, Quantity)> {
        self.rules.get(from)?.get(to)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
