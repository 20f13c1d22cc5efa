//! pt-BR number and currency formatting.
//!
//! Thousands are grouped with `.`, decimals use `,` and amounts carry the
//! `R$` symbol. Rounding is half away from zero at the last shown digit.

/// Currency symbol printed before every amount.
pub const CURRENCY_SYMBOL: &str = "R$";

const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

/// Formats a currency amount, e.g. `46028.29` as `"R$ 46.028,29"` and
/// `-76028.29` as `"-R$ 76.028,29"`.
///
/// Non-finite values format as zero.
pub fn format_currency(value: f64) -> String {
    let (negative, digits) = fixed_point(value, 2);
    let sign = if negative { "-" } else { "" };
    format!("{}{} {}", sign, CURRENCY_SYMBOL, digits)
}

/// Formats a plain number with `decimals` fractional digits, e.g.
/// `format_number(1548.0, 0)` is `"1.548"`.
pub fn format_number(value: f64, decimals: u32) -> String {
    let (negative, digits) = fixed_point(value, decimals);
    if negative { format!("-{}", digits) } else { digits }
}

/// Formats an energy figure in whole kilowatt-hours, e.g. `"1.548 kWh"`.
pub fn format_kwh(value: f64) -> String {
    format!("{} kWh", format_number(value, 0))
}

/// Rounds `value` to `decimals` digits and renders its magnitude with the
/// locale separators. The flag reports a negative result; a value that
/// rounds to zero is never negative.
fn fixed_point(value: f64, decimals: u32) -> (bool, String) {
    let scale = 10u64.pow(decimals);
    let scaled = if value.is_finite() { (value * scale as f64).round() } else { 0.0 };
    // `as` saturates, which is fine for amounts far beyond any proposal.
    let scaled = scaled as i128;
    let magnitude = scaled.unsigned_abs();

    let integer = group_thousands(magnitude / u128::from(scale));
    let digits = if decimals == 0 {
        integer
    } else {
        format!(
            "{}{}{:0width$}",
            integer,
            DECIMAL_SEPARATOR,
            magnitude % u128::from(scale),
            width = decimals as usize
        )
    };
    (scaled < 0, digits)
}

fn group_thousands(value: u128) -> String {
    let raw = value.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_positive_amounts() {
        assert_eq!(format_currency(46028.29), "R$ 46.028,29");
        assert_eq!(format_currency(30000.0), "R$ 30.000,00");
        assert_eq!(format_currency(1460.0), "R$ 1.460,00");
        assert_eq!(format_currency(999.999), "R$ 1.000,00");
        assert_eq!(format_currency(1234567.5), "R$ 1.234.567,50");
    }

    #[test]
    fn negative_amounts_keep_sign_and_precision() {
        let formatted = format_currency(-76028.29);
        assert_eq!(formatted, "-R$ 76.028,29");
        let digits_at = formatted.find("76.028,29").unwrap();
        assert!(formatted[..digits_at].starts_with('-'));
    }

    #[test]
    fn zero_is_a_real_amount() {
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(-0.0), "R$ 0,00");
        assert_eq!(format_currency(-0.004), "R$ 0,00");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(format_currency(0.125), "R$ 0,13");
        assert_eq!(format_currency(-0.125), "-R$ 0,13");
        assert_eq!(format_currency(2.5e-3), "R$ 0,00");
        assert_eq!(format_number(2.5, 0), "3");
        assert_eq!(format_number(-2.5, 0), "-3");
    }

    #[test]
    fn non_finite_values_format_as_zero() {
        assert_eq!(format_currency(f64::NAN), "R$ 0,00");
        assert_eq!(format_currency(f64::INFINITY), "R$ 0,00");
    }

    #[test]
    fn numbers_group_thousands() {
        assert_eq!(format_number(1548.0, 0), "1.548");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1386.034, 2), "1.386,03");
        assert_eq!(format_kwh(1460.4), "1.460 kWh");
    }
}
