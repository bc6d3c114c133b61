//! Number and date formatting for axis labels and tables.
//!
//! Values use US-locale compact notation (`1.23M`) with at most two
//! fraction digits, rounded half away from zero on the exact decimal value
//! of the input (`1.115` is stored just below the tie and shows `1.11`).
//! Dates render as `dd.MM` in UTC.

use chrono::DateTime;

/// Compact-notation units, smallest first
const COMPACT_UNITS: [(f64, &str); 4] = [(1e3, "K"), (1e6, "M"), (1e9, "B"), (1e12, "T")];

const MAX_FRACTION_DIGITS: usize = 2;

/// `10^MAX_FRACTION_DIGITS`
const FRACTION_SCALE: f64 = 100.0;

/// `magnitude / unit` rounded half away from zero to two fraction digits
///
/// The scaled value is one rounded float operation away from the exact
/// one, which can land it on a `.5` the exact value never reaches. The
/// fused multiply-add residual recovers which side of the tie it is on.
fn round_fraction(magnitude: f64, unit: f64) -> f64 {
    let (scaled, residual) = if unit > 1.0 {
        let divisor = unit / FRACTION_SCALE;
        let quotient = magnitude / divisor;
        (quotient, (-quotient).mul_add(divisor, magnitude))
    } else {
        let product = magnitude * FRACTION_SCALE;
        (product, magnitude.mul_add(FRACTION_SCALE, -product))
    };

    let rounded = if scaled.fract() == 0.5 && residual < 0.0 {
        scaled.trunc()
    } else {
        scaled.round()
    };

    rounded / FRACTION_SCALE
}

/// Trims trailing zeros and a dangling decimal point.
fn trim_fraction(formatted: String) -> String {
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

/// Format a value in short compact notation (`999`, `1.5K`, `1.23M`, `2.5B`)
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let magnitude = value.abs();

    // Index into COMPACT_UNITS, None for plain numbers
    let mut unit = COMPACT_UNITS
        .iter()
        .rposition(|(threshold, _)| magnitude >= *threshold);

    let mut scaled = match unit {
        Some(i) => round_fraction(magnitude, COMPACT_UNITS[i].0),
        None => round_fraction(magnitude, 1.0),
    };

    // Rounding can carry into the next unit: 999.999 -> 1K
    while scaled >= 1000.0 {
        let next = unit.map_or(0, |i| i + 1);
        if next >= COMPACT_UNITS.len() {
            break;
        }
        unit = Some(next);
        scaled = round_fraction(magnitude, COMPACT_UNITS[next].0);
    }

    if scaled == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let suffix = unit.map_or("", |i| COMPACT_UNITS[i].1);
    let digits = trim_fraction(format!("{:.1$}", scaled, MAX_FRACTION_DIGITS));

    format!("{}{}{}", sign, digits, suffix)
}

/// Format Unix seconds as `dd.MM` (UTC)
pub fn format_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%d.%m").to_string())
        .unwrap_or_else(|| "--.--".to_string())
}

/// Format Unix seconds as `YYYY-MM-DD` (UTC)
pub fn format_full_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(7.0), "7");
        assert_eq!(format_value(999.0), "999");
        assert_eq!(format_value(123.456), "123.46");
        assert_eq!(format_value(0.125), "0.13");
        assert_eq!(format_value(0.001), "0");
    }

    #[test]
    fn test_compact_units() {
        assert_eq!(format_value(1000.0), "1K");
        assert_eq!(format_value(1234.0), "1.23K");
        assert_eq!(format_value(1500.0), "1.5K");
        assert_eq!(format_value(1_234_567.0), "1.23M");
        assert_eq!(format_value(2.5e9), "2.5B");
        assert_eq!(format_value(1e12), "1T");
        assert_eq!(format_value(1e15), "1000T");
    }

    #[test]
    fn test_rounding_promotes_unit() {
        assert_eq!(format_value(999.999), "1K");
        assert_eq!(format_value(999_999.0), "1M");
        assert_eq!(format_value(999_999_000.0), "1B");
    }

    #[test]
    fn test_rounding_uses_exact_decimal_value() {
        // 1.115 is stored as 1.11499999..., but 1.115 * 100 rounds to 111.5
        assert_eq!(format_value(1.115), "1.11");
        assert_eq!(format_value(-1.115), "-1.11");
        assert_eq!(format_value(1.005), "1");
        // Exact ties round away from zero
        assert_eq!(format_value(1.125), "1.13");
        assert_eq!(format_value(1115.0), "1.12K");
        assert_eq!(format_value(1_005_000.0), "1.01M");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(format_value(-1500.0), "-1.5K");
        assert_eq!(format_value(-42.0), "-42");
        assert_eq!(format_value(-0.001), "0");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "∞");
        assert_eq!(format_value(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(0), "01.01");
        assert_eq!(format_date(1_704_067_200), "01.01");
        // 2024-03-05T23:59:59Z
        assert_eq!(format_date(1_709_683_199), "05.03");
        assert_eq!(format_date(i64::MAX), "--.--");
    }

    #[test]
    fn test_format_full_date() {
        assert_eq!(format_full_date(1_704_153_600), "2024-01-02");
        assert_eq!(format_full_date(i64::MIN), "-");
    }
}
