//! Text <-> number conversion at the state machine boundaries
//!
//! Operands are accumulated as text and only parsed to `f64` when an
//! operator is applied. Results are rendered back to text here, including
//! the overflow fallback to scientific notation.

/// Magnitude at and above which plain rendering switches to exponent form
const EXPONENT_UPPER: f64 = 1e21;
/// Magnitude below which plain rendering switches to exponent form
const EXPONENT_LOWER: f64 = 1e-6;
/// Mantissa decimals that hold any f64 exactly
const EXACT_DIGITS: usize = 800;

/// Parses operand text into a number.
///
/// Text without any digit (`""`, `"."`, `"-"`) is a zero operand, matching
/// the `0` the display shows for it. Other unparseable text is NaN.
#[must_use]
pub fn parse_operand(text: &str) -> f64 {
    if text.chars().all(|c| matches!(c, '-' | '.')) {
        return 0.0;
    }
    text.parse().unwrap_or(f64::NAN)
}

/// Renders a number as plain text: shortest round-trip digits, with
/// exponent form only for very large or very small magnitudes.
#[must_use]
pub fn render_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (EXPONENT_LOWER..EXPONENT_UPPER).contains(&magnitude) {
        format!("{value}")
    } else {
        signed_exponent(&format!("{value:e}"))
    }
}

/// Renders a number in scientific notation with `precision` mantissa
/// decimals, e.g. `9.99998e+11`.
///
/// The mantissa is rounded half away from zero on the exact binary value,
/// so `12345650000` becomes `1.23457e+10`. Rust's own `{:e}` rounding
/// would pick the even digit on such ties.
#[must_use]
pub fn render_scientific(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return render_number(value);
    }

    // Every f64 has at most 767 significant decimal digits, so this is exact
    let exact = format!("{:.*e}", precision.max(EXACT_DIGITS), value.abs());
    let (mantissa, exponent) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    let mut kept = digits[..=precision].to_vec();
    if digits.get(precision + 1).is_some_and(|&d| d >= 5) && round_up(&mut kept) {
        exponent += 1;
    }

    let mut out = String::with_capacity(precision + 8);
    if value.is_sign_negative() && value != 0.0 {
        out.push('-');
    }
    for (i, d) in kept.iter().enumerate() {
        if i == 1 {
            out.push('.');
        }
        out.push(char::from(b'0' + d));
    }
    let sign = if exponent < 0 { '-' } else { '+' };
    out.push_str(&format!("e{sign}{}", exponent.unsigned_abs()));
    out
}

/// Adds one unit in the last place; returns true when the carry ran out of
/// digits (`9.99` -> `1.00`) and the exponent must grow.
fn round_up(digits: &mut [u8]) -> bool {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return false;
        }
    }
    if let Some(first) = digits.first_mut() {
        *first = 1;
    }
    true
}

/// Renders an evaluation result, falling back to scientific notation when
/// the plain text is longer than `max_len` characters.
#[must_use]
pub fn render_result(value: f64, max_len: usize, precision: usize) -> String {
    let plain = render_number(value);
    if value.is_finite() && plain.chars().count() > max_len {
        render_scientific(value, precision)
    } else {
        plain
    }
}

/// Flips the sign of operand text.
///
/// Zero and NaN values are returned unchanged; everything else gains or
/// loses its leading `-`, so a partially typed entry such as `1.` survives.
#[must_use]
pub fn negate_text(text: &str) -> String {
    let value = parse_operand(text);
    if value == 0.0 || value.is_nan() {
        return text.to_string();
    }
    match text.strip_prefix('-') {
        Some(rest) => rest.to_string(),
        None => format!("-{text}"),
    }
}

/// Rust prints `1e21`; the display wants an explicit sign: `1e+21`.
fn signed_exponent(formatted: &str) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ===== parse_operand =====

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_operand("12"), 12.0);
    }

    #[test]
    fn test_parse_negative_decimal() {
        assert_eq!(parse_operand("-1.5"), -1.5);
    }

    #[test]
    fn test_parse_trailing_separator() {
        assert_eq!(parse_operand("1."), 1.0);
    }

    #[test]
    fn test_parse_digitless_text_is_zero() {
        assert_eq!(parse_operand(""), 0.0);
        assert_eq!(parse_operand("."), 0.0);
        assert_eq!(parse_operand("-"), 0.0);
        assert_eq!(parse_operand("-."), 0.0);
    }

    #[test]
    fn test_parse_scientific_result() {
        assert_eq!(parse_operand("9.99998e+11"), 999_998_000_000.0);
    }

    #[test]
    fn test_parse_special_values() {
        assert_eq!(parse_operand("Infinity"), f64::INFINITY);
        assert_eq!(parse_operand("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_operand("NaN").is_nan());
    }

    #[test]
    fn test_parse_garbage_is_nan() {
        assert!(parse_operand("Error").is_nan());
    }

    // ===== render_number =====

    #[test]
    fn test_render_integer_has_no_fraction() {
        assert_eq!(render_number(20.0), "20");
        assert_eq!(render_number(-123.0), "-123");
    }

    #[test]
    fn test_render_shortest_round_trip() {
        assert_eq!(render_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(render_number(1.5), "1.5");
    }

    #[test]
    fn test_render_negative_zero() {
        assert_eq!(render_number(-0.0), "0");
    }

    #[test]
    fn test_render_special_values() {
        assert_eq!(render_number(f64::INFINITY), "Infinity");
        assert_eq!(render_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(render_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_render_exponent_thresholds() {
        assert_eq!(render_number(1e20), "100000000000000000000");
        assert_eq!(render_number(1e21), "1e+21");
        assert_eq!(render_number(0.000001), "0.000001");
        assert_eq!(render_number(1e-7), "1e-7");
    }

    // ===== render_scientific / render_result =====

    #[test]
    fn test_render_scientific_five_digits() {
        assert_eq!(render_scientific(999_998_000_001.0, 5), "9.99998e+11");
        assert_eq!(render_scientific(0.1 + 0.2, 5), "3.00000e-1");
    }

    #[test]
    fn test_render_scientific_rounds_ties_away_from_zero() {
        assert_eq!(render_scientific(12_345_650_000.0, 5), "1.23457e+10");
        assert_eq!(render_scientific(-12_345_650_000.0, 5), "-1.23457e+10");
        assert_eq!(render_scientific(2.5, 0), "3e+0");
        assert_eq!(render_scientific(0.125, 1), "1.3e-1");
    }

    #[test]
    fn test_render_scientific_non_tie_rounding() {
        assert_eq!(render_scientific(12_345_750_000.0, 5), "1.23458e+10");
        assert_eq!(render_scientific(12_345_649_999.0, 5), "1.23456e+10");
    }

    #[test]
    fn test_render_scientific_carry_grows_exponent() {
        assert_eq!(render_scientific(99_999_950_000.0, 5), "1.00000e+11");
        assert_eq!(render_scientific(999_999.5, 5), "1.00000e+6");
    }

    #[test]
    fn test_render_scientific_zero() {
        assert_eq!(render_scientific(0.0, 2), "0.00e+0");
        assert_eq!(render_scientific(-0.0, 2), "0.00e+0");
    }

    #[test]
    fn test_render_scientific_passes_specials_through() {
        assert_eq!(render_scientific(f64::INFINITY, 5), "Infinity");
    }

    #[test]
    fn test_render_result_within_limit() {
        assert_eq!(render_result(1_234_567_890.0, 10, 5), "1234567890");
    }

    #[test]
    fn test_render_result_overflow() {
        assert_eq!(render_result(12_345_678_901.0, 10, 5), "1.23457e+10");
        assert_eq!(render_result(999_998_000_001.0, 10, 5), "9.99998e+11");
    }

    #[test]
    fn test_render_result_long_fraction() {
        assert_eq!(render_result(1.0 / 3.0, 10, 5), "3.33333e-1");
    }

    #[test]
    fn test_render_result_never_rewrites_infinity() {
        assert_eq!(render_result(f64::NEG_INFINITY, 4, 5), "-Infinity");
    }

    // ===== negate_text =====

    #[test]
    fn test_negate_text() {
        assert_eq!(negate_text("1.5"), "-1.5");
        assert_eq!(negate_text("-1.5"), "1.5");
        assert_eq!(negate_text("1."), "-1.");
        assert_eq!(negate_text("Infinity"), "-Infinity");
    }

    #[test]
    fn test_negate_text_zero_and_nan_unchanged() {
        assert_eq!(negate_text("0"), "0");
        assert_eq!(negate_text("0."), "0.");
        assert_eq!(negate_text("NaN"), "NaN");
    }

    proptest! {
        #[test]
        fn prop_render_parse_round_trip(v in -1e15f64..1e15f64) {
            prop_assert_eq!(parse_operand(&render_number(v)), v);
        }

        #[test]
        fn prop_render_result_respects_limit(v in -1e300f64..1e300f64) {
            let text = render_result(v, 10, 5);
            prop_assert!(text.chars().count() <= 13, "too long: {}", text);
        }

        #[test]
        fn prop_render_scientific_close_to_value(v in -1e300f64..1e300f64) {
            let text = render_scientific(v, 5);
            let back = parse_operand(&text);
            // Within half a unit of the sixth significant digit
            prop_assert!((back - v).abs() <= v.abs() * 5.0001e-6, "{} -> {}", v, text);
        }

        #[test]
        fn prop_negate_text_twice_is_identity(digits in "[1-9][0-9]{0,8}(\\.[0-9]{0,4})?") {
            prop_assert_eq!(negate_text(&negate_text(&digits)), digits);
        }
    }
}
