//! Property-based tests for the quantity algebra
//!
//! Verifies the algebraic laws (commutativity, associativity, identity,
//! distributivity) under rounded integer arithmetic, the serialization
//! round-trip fixed point, and conversion-rule resolution.

use proptest::prelude::*;

use cellier_units::{
    ConversionTable, Mass, MixedQuantities, Quantity, QuantityError, Volume,
};

/// Strategy for volumes in the grocery range
fn arb_volume() -> impl Strategy<Value = Volume> {
    (0i64..2_000_000).prop_map(|ml| Volume::new(ml as f64))
}

fn arb_mass() -> impl Strategy<Value = Mass> {
    (0i64..10_000_000).prop_map(|mg| Mass::new(mg as f64))
}

/// Unit strings that none of the dimension tables recognize
fn arb_unknown_unit() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zéè]{3,8}")
        .unwrap()
        .prop_filter("must not collide with a recognized unit", |unit| {
            Quantity::from_parts(1.0, unit, ConversionTable::empty()).type_name() == "unknown"
                && unit != "p"
        })
}

/// Any single-dimension quantity
fn arb_quantity() -> impl Strategy<Value = Quantity> {
    prop_oneof![
        (0i64..2_000_000).prop_map(|n| Quantity::from_parts(
            n as f64,
            "ml",
            ConversionTable::empty()
        )),
        (0i64..10_000_000).prop_map(|n| Quantity::from_parts(
            n as f64,
            "mg",
            ConversionTable::empty()
        )),
        (0i64..1_000_000).prop_map(|n| Quantity::from_parts(
            n as f64,
            "mm",
            ConversionTable::empty()
        )),
        (0i64..1_000_000).prop_map(|n| Quantity::from_parts(
            n as f64,
            "mm2",
            ConversionTable::empty()
        )),
        (arb_unknown_unit(), 0u32..10_000).prop_map(|(unit, n)| Quantity::from_parts(
            n as f64,
            &unit,
            ConversionTable::empty()
        )),
    ]
}

fn arb_mixed() -> impl Strategy<Value = MixedQuantities> {
    prop::collection::vec(arb_quantity(), 0..4).prop_map(|parts| {
        parts
            .iter()
            .fold(MixedQuantities::empty(), |acc, quantity| {
                acc.add(&MixedQuantities::parse(&quantity.to_string()))
            })
    })
}

proptest! {
    #[test]
    fn add_commutes(a in arb_volume(), b in arb_volume()) {
        prop_assert_eq!(a.add(&b), b.add(&a));
    }

    #[test]
    fn add_associates(a in arb_volume(), b in arb_volume(), c in arb_volume()) {
        prop_assert_eq!(a.add(&b.add(&c)), a.add(&b).add(&c));
    }

    #[test]
    fn zero_is_identity(a in arb_mass()) {
        prop_assert_eq!(a.add(&Mass::new(0.0)), a);
        prop_assert_eq!(a.multiply(1.0), a);
        prop_assert_eq!(a.multiply(0.0), Mass::new(0.0));
    }

    #[test]
    fn multiply_distributes_over_add(a in arb_mass(), m in 0u32..1000, n in 0u32..1000) {
        // integer factors keep the rounded arithmetic exact
        prop_assert_eq!(
            a.multiply((m + n) as f64),
            a.multiply(m as f64).add(&a.multiply(n as f64))
        );
    }

    #[test]
    fn multiply_then_divide_recovers_the_factor(base in 1i64..2_000_000, n in 1u32..10_000) {
        let a = Volume::new(base as f64);
        let ratio = a.multiply(n as f64).divide(&a);
        prop_assert!((ratio - n as f64).abs() < 1e-9);
    }

    #[test]
    fn quantity_multiply_then_divide(q in arb_quantity(), n in 1u32..1000) {
        // skip zero-count quantities, the ratio is undefined there
        let nonzero = q.multiply(1.0).divide(&q).map(|r| r.is_finite()).unwrap_or(false);
        if nonzero {
            let ratio = q.multiply(n as f64).divide(&q).unwrap();
            prop_assert!((ratio - n as f64).abs() < 1e-6);
        }
    }

    #[test]
    fn quantity_add_commutes(q in arb_quantity(), r in arb_quantity()) {
        match (q.add(Some(&r)), r.add(Some(&q))) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => {
                // both fail the same way, with sides swapped
                prop_assert_eq!(a.is_incompatibility(), b.is_incompatibility());
            }
            _ => prop_assert!(false, "add must fail symmetrically"),
        }
    }

    #[test]
    fn serialization_is_a_fixed_point(q in arb_quantity()) {
        // the first render may shift the value up (ceiling bias, e.g.
        // 999999mm renders as 1000m which reparses to 1km); after one
        // normalization pass the round-trip is exact
        let normalized = Quantity::parse(&q.to_string(), ConversionTable::empty()).unwrap();
        let rendered = normalized.to_string();
        let reparsed = Quantity::parse(&rendered, ConversionTable::empty()).unwrap();
        prop_assert_eq!(reparsed.to_string(), rendered);
        prop_assert_eq!(reparsed, normalized);
    }

    #[test]
    fn mixed_serialization_is_a_fixed_point(m in arb_mixed()) {
        let normalized = MixedQuantities::parse(&m.to_string());
        let rendered = normalized.to_string();
        let reparsed = MixedQuantities::parse(&rendered);
        prop_assert_eq!(reparsed.to_string(), rendered);
        prop_assert_eq!(reparsed, normalized);
    }

    #[test]
    fn mixed_multiply_by_zero_absorbs(m in arb_mixed()) {
        prop_assert!(m.multiply(0.0).is_empty());
    }

    #[test]
    fn mixed_empty_divided_by_nonempty_is_zero(m in arb_mixed()) {
        if !m.is_empty() {
            prop_assert_eq!(MixedQuantities::empty().divide(&m).unwrap(), 0.0);
        }
    }

    #[test]
    fn mixed_divide_across_dimensions_fails(ml in 1i64..100_000, mg in 1i64..100_000) {
        let volume = MixedQuantities::parse(&format!("{}ml", ml));
        let mass = MixedQuantities::parse(&format!("{}mg", mg));
        let err = volume.divide(&mass).unwrap_err();
        prop_assert!(
            matches!(err, QuantityError::UnsupportedDivision { .. }),
            "unexpected error: {}",
            err
        );
    }

    #[test]
    fn conversion_bridges_add_in_both_directions(k1 in 1u32..1000, k2 in 1u32..1000) {
        let rules = "100ml/150g";
        let volume = Quantity::parse_with_rules(&format!("{}ml", k1 * 100), rules).unwrap();
        let mass = Quantity::parse_with_rules(&format!("{}g", k2 * 150), rules).unwrap();

        // each receiver keeps its own dimension
        let as_volume = volume.add(Some(&mass)).unwrap();
        let as_mass = mass.add(Some(&volume)).unwrap();
        prop_assert_eq!(as_volume.unit_key(), "volume");
        prop_assert_eq!(as_mass.unit_key(), "mass");

        // and both orders agree once converted to the same dimension
        let mass_target = Quantity::parse_with_rules("1g", rules).unwrap();
        prop_assert_eq!(as_volume.try_convert_to(&mass_target).unwrap(), as_mass);
    }

    #[test]
    fn conversion_scales_linearly(k in 1u32..10_000) {
        let volume = Quantity::parse_with_rules(&format!("{}ml", k * 100), "100ml/150g").unwrap();
        let gram = Quantity::parse_with_rules("150g", "100ml/150g").unwrap();
        prop_assert!((volume.divide(&gram).unwrap() - k as f64).abs() < 1e-9);
    }
}
