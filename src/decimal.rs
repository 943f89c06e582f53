use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// display precision used by the calculator front end
pub const DEFAULT_DISPLAY_DP: u32 = 2;

/// largest supported display precision
pub const MAX_DISPLAY_DP: u32 = 8;

/// magnitude from which browsers print `toFixed` results in exponent form
const EXPONENT_FORM_THRESHOLD: f64 = 1e21;

/// money type for presenting calculated amounts
///
/// Calculations run in `f64`; this wraps the finite results in a decimal so
/// they print at a fixed number of places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d)
    }

    /// create from a calculated float, keeping its exact binary value
    ///
    /// `0.015` is really `0.01499999...` and must stay below the midpoint.
    /// `None` for NaN, infinities and out of range values.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Decimal::from_f64_retain(value).map(Money)
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round half away from zero and pad to exactly `dp` places
    pub fn round_dp(&self, dp: u32) -> Self {
        let mut rounded = self.0.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(dp);
        Money(rounded)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// format a calculated amount for display, e.g. `£1169.18`
///
/// Follows `Number.prototype.toFixed`: the exact binary value is rounded
/// half away from zero, magnitudes of 1e21 and above print in exponent form
/// (`1e+21`), and non-finite values print as `NaN`, `Infinity`, `-Infinity`.
pub fn format_amount(value: f64, currency_symbol: &str, dp: u32) -> String {
    let dp = dp.min(MAX_DISPLAY_DP);

    let digits = if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value.abs() >= EXPONENT_FORM_THRESHOLD {
        exponent_form(value)
    } else {
        match Money::from_f64(value) {
            Some(money) => money.round_dp(dp).to_string(),
            None => exponent_form(value),
        }
    };

    format!("{currency_symbol}{digits}")
}

/// shortest round-trip digits with a signed exponent, `1.5e+22`
fn exponent_form(value: f64) -> String {
    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_rounding() {
        let m = Money::from_f64(1169.1800830159602).unwrap();
        assert_eq!(m.round_dp(2).to_string(), "1169.18");

        let m = Money::from_decimal(dec!(2.675));
        assert_eq!(m.round_dp(2).as_decimal(), dec!(2.68));
    }

    #[test]
    fn test_money_padding() {
        let m = Money::from_f64(450_000.0).unwrap();
        assert_eq!(m.round_dp(2).to_string(), "450000.00");
        assert_eq!(Money::ZERO.round_dp(2).to_string(), "0.00");
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Money::from_f64(f64::NAN).is_none());
        assert!(Money::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1169.1800830159602, "£", 2), "£1169.18");
        assert_eq!(format_amount(833.3333333333334, "£", 2), "£833.33");
        assert_eq!(format_amount(450_000.0, "£", 2), "£450000.00");
        assert_eq!(format_amount(f64::NAN, "£", 2), "£NaN");
        assert_eq!(format_amount(f64::INFINITY, "$", 2), "$Infinity");
        assert_eq!(format_amount(f64::NEG_INFINITY, "£", 2), "£-Infinity");
    }

    #[test]
    fn test_format_amount_rounds_binary_value() {
        // each sits just below its decimal midpoint
        assert_eq!(format_amount(0.015, "£", 2), "£0.01");
        assert_eq!(format_amount(1.005, "£", 2), "£1.00");
        assert_eq!(format_amount(0.105, "", 2), "0.10");
        // exactly representable midpoint rounds away from zero
        assert_eq!(format_amount(0.125, "", 2), "0.13");
        assert_eq!(format_amount(-0.125, "", 2), "-0.13");
    }

    #[test]
    fn test_format_amount_exponent_form() {
        assert_eq!(format_amount(1e21, "£", 2), "£1e+21");
        assert_eq!(format_amount(1.5e22, "", 2), "1.5e+22");
        assert_eq!(format_amount(-2.5e30, "", 2), "-2.5e+30");
        assert_eq!(format_amount(1e20, "", 2), "100000000000000000000.00");
    }

    #[test]
    fn test_format_amount_precision_capped() {
        assert_eq!(format_amount(1.5, "", 20), "1.50000000");
        assert_eq!(format_amount(1.5, "", 0), "2");
    }
}
