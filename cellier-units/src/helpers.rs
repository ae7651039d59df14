//! Crate-private rendering helpers

/// Scale a base-unit count down by `divisor` for display, with 2-decimal
/// precision and a ceiling bias: a rendered quantity never understates the
/// stored one. Round-tripping the rendered text is a fixed point after one
/// normalization pass, but the first render may shift the value up by the
/// granularity of the chosen unit.
pub(crate) fn scale_for_display(base: i64, divisor: i64) -> f64 {
    (base as f64 * 100.0 / divisor as f64).ceil() / 100.0
}

/// Render a count the way the spreadsheet cells expect: shortest decimal
/// form, no trailing zeros (`5.5`, `300`, `4.2`).
pub(crate) fn format_count(count: f64) -> String {
    format!("{}", count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_uses_ceiling() {
        // 1001 ml in liters: nearest-rounding would give 1.0, the
        // ceiling keeps the extra milliliter visible.
        assert_eq!(scale_for_display(1001, 1000), 1.01);
        assert_eq!(scale_for_display(55, 10), 5.5);
        assert_eq!(scale_for_display(42, 10), 4.2);
        // 1 mg short of a gram still renders above, never below
        assert_eq!(scale_for_display(999, 1), 999.0);
        assert_eq!(scale_for_display(1234, 1000), 1.24);
    }

    #[test]
    fn test_format_count_drops_trailing_zeros() {
        assert_eq!(format_count(5.5), "5.5");
        assert_eq!(format_count(300.0), "300");
        assert_eq!(format_count(4.2), "4.2");
    }
}
