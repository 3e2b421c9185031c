//! Money
//!
//! Exact conversions between decimal amounts and whole minor units. Nothing in
//! here rounds: an amount that is not a whole number of minor units is an error.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Findable, Money, iso::Currency};
use thiserror::Error;

/// Errors produced while validating or parsing a monetary amount.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The amount carries fractions of the currency's minor unit (e.g. `1.005 USD`).
    #[error("{amount} has fractions of a minor {currency} unit")]
    FractionalMinorUnits {
        /// The rejected amount, as written
        amount: String,
        /// ISO code of the currency the amount was checked against
        currency: &'static str,
    },

    /// Prices and targets cannot be negative.
    #[error("{0} is negative")]
    Negative(Decimal),

    /// The amount does not fit in an `i64` count of minor units.
    #[error("{0} is too large to represent in minor units")]
    OutOfRange(String),

    /// The text is not a plain decimal amount.
    #[error("not a valid amount: {0:?}")]
    Unparseable(String),

    /// Unknown ISO currency code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Number of minor units in one major unit of `currency` (100 for USD, 1 for JPY).
///
/// Returns `None` if the currency's exponent is too large to express as an `i64`.
pub fn minor_unit_factor(currency: &Currency) -> Option<i64> {
    10_i64.checked_pow(currency.exponent)
}

/// Convert a decimal amount into an exact count of minor units.
///
/// # Errors
///
/// - [`AmountError::Negative`]: the amount is below zero.
/// - [`AmountError::FractionalMinorUnits`]: the amount has more fractional digits than the currency allows.
/// - [`AmountError::OutOfRange`]: the amount cannot be held in an `i64` of minor units.
pub fn to_minor_units(amount: Decimal, currency: &Currency) -> Result<i64, AmountError> {
    if amount < Decimal::ZERO {
        return Err(AmountError::Negative(amount));
    }

    let out_of_range = || AmountError::OutOfRange(amount.to_string());

    let factor = minor_unit_factor(currency).ok_or_else(out_of_range)?;

    let scaled = amount
        .checked_mul(Decimal::from(factor))
        .ok_or_else(out_of_range)?;

    if !scaled.fract().is_zero() {
        return Err(AmountError::FractionalMinorUnits {
            amount: amount.to_string(),
            currency: currency.iso_alpha_code,
        });
    }

    scaled.to_i64().ok_or_else(out_of_range)
}

/// Re-check an existing [`Money`] value and return its exact minor units.
///
/// `Money::from_decimal` happily stores `1.005 USD`, so anything handed to us
/// as `Money` is validated again before it is used in integer arithmetic.
///
/// # Errors
///
/// Returns an [`AmountError`] if the amount is negative, fractional in minor units or out of range.
pub fn minor_units_of(money: &Money<'_, Currency>) -> Result<i64, AmountError> {
    to_minor_units(*money.amount(), money.currency())
}

/// Build a [`Money`] value from a decimal amount, rejecting sub-minor-unit precision.
///
/// # Errors
///
/// Returns an [`AmountError`] if the amount is not a whole, non-negative number of minor units.
pub fn money_from_decimal(
    amount: Decimal,
    currency: &Currency,
) -> Result<Money<'_, Currency>, AmountError> {
    Ok(Money::from_minor(to_minor_units(amount, currency)?, currency))
}

/// Parse an amount such as `15.05`, `$15.05` or `.50`.
///
/// Any number of leading `$` signs or the currency's own symbol are accepted, the
/// rest must be digits with an optional fractional part. Signs, exponents and
/// thousands separators are rejected.
///
/// Precision is judged on the text itself, so digits beyond what a [`Decimal`]
/// can hold are rejected rather than rounded away.
///
/// # Errors
///
/// Returns [`AmountError::Unparseable`] for malformed text,
/// [`AmountError::FractionalMinorUnits`] for significant digits below the minor unit,
/// [`AmountError::OutOfRange`] for amounts too large to hold, or any error from
/// [`to_minor_units`].
pub fn parse_amount<'a>(text: &str, currency: &'a Currency) -> Result<Money<'a, Currency>, AmountError> {
    let trimmed = text.trim();
    let mut digits = trimmed.trim_start_matches('$');

    if !currency.symbol.is_empty() {
        digits = digits.trim_start_matches(currency.symbol).trim_start_matches('$');
    }

    if !is_plain_decimal(digits) {
        return Err(AmountError::Unparseable(trimmed.to_string()));
    }

    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    let whole = match whole.trim_start_matches('0') {
        "" => "0",
        whole => whole,
    };
    let fraction = fraction.trim_end_matches('0');

    if fraction.len() > usize::try_from(currency.exponent).unwrap_or(usize::MAX) {
        return Err(AmountError::FractionalMinorUnits {
            amount: trimmed.to_string(),
            currency: currency.iso_alpha_code,
        });
    }

    let canonical = if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    };

    let amount = Decimal::from_str_exact(&canonical)
        .map_err(|_err| AmountError::OutOfRange(trimmed.to_string()))?;

    money_from_decimal(amount, currency)
}

/// Look up an ISO currency by code, case-insensitively.
///
/// # Errors
///
/// Returns [`AmountError::UnknownCurrency`] if the code is not an ISO 4217 currency.
pub fn find_currency(code: &str) -> Result<&'static Currency, AmountError> {
    Currency::find(&code.trim().to_ascii_uppercase())
        .ok_or_else(|| AmountError::UnknownCurrency(code.to_string()))
}

/// `digits*` optionally followed by `.digits+`, with at least one digit overall.
fn is_plain_decimal(text: &str) -> bool {
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    match text.split_once('.') {
        Some((whole, fraction)) => all_digits(whole) && !fraction.is_empty() && all_digits(fraction),
        None => !text.is_empty() && all_digits(text),
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, JPY, USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn to_minor_units_accepts_whole_cents() -> TestResult {
        assert_eq!(to_minor_units(Decimal::new(1505, 2), USD)?, 1505);
        assert_eq!(to_minor_units(Decimal::new(3, 0), USD)?, 300);
        assert_eq!(to_minor_units(Decimal::new(2500, 3), USD)?, 250);

        Ok(())
    }

    #[test]
    fn to_minor_units_rejects_fractions_of_a_cent() {
        let result = to_minor_units(Decimal::new(1005, 3), USD);

        assert_eq!(
            result,
            Err(AmountError::FractionalMinorUnits {
                amount: "1.005".to_string(),
                currency: "USD",
            })
        );
    }

    #[test]
    fn to_minor_units_respects_currency_exponent() -> TestResult {
        assert_eq!(to_minor_units(Decimal::new(500, 0), JPY)?, 500);
        assert!(matches!(
            to_minor_units(Decimal::new(5, 1), JPY),
            Err(AmountError::FractionalMinorUnits { .. })
        ));

        Ok(())
    }

    #[test]
    fn to_minor_units_rejects_negative_amounts() {
        assert_eq!(
            to_minor_units(Decimal::new(-100, 2), USD),
            Err(AmountError::Negative(Decimal::new(-100, 2)))
        );
    }

    #[test]
    fn minor_units_of_rechecks_money_built_from_decimal() {
        let sneaky = Money::from_decimal(Decimal::new(1005, 3), USD);

        assert!(matches!(
            minor_units_of(&sneaky),
            Err(AmountError::FractionalMinorUnits { .. })
        ));
    }

    #[test]
    fn parse_amount_accepts_symbols_and_bare_fractions() -> TestResult {
        assert_eq!(parse_amount("$15.05", USD)?, Money::from_minor(1505, USD));
        assert_eq!(parse_amount("$$2", USD)?, Money::from_minor(200, USD));
        assert_eq!(parse_amount(".50", USD)?, Money::from_minor(50, USD));
        assert_eq!(parse_amount("£3.20", GBP)?, Money::from_minor(320, GBP));

        Ok(())
    }

    #[test]
    fn parse_amount_rejects_malformed_text() {
        for text in ["", "$", "abc", "1.", "1.2.3", "-1.00", "1e3", "1,000"] {
            assert!(
                matches!(parse_amount(text, USD), Err(AmountError::Unparseable(_))),
                "expected {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn parse_amount_rejects_sub_cent_precision() {
        for text in ["1.005", "$0.001", "1.000000000000000000000000000001"] {
            assert!(
                matches!(
                    parse_amount(text, USD),
                    Err(AmountError::FractionalMinorUnits { .. })
                ),
                "expected {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn parse_amount_ignores_trailing_and_leading_zeros() -> TestResult {
        assert_eq!(
            parse_amount("001.500000000000000000000000000000000", USD)?,
            Money::from_minor(150, USD)
        );
        assert_eq!(parse_amount("7.0", JPY)?, Money::from_minor(7, JPY));

        Ok(())
    }

    #[test]
    fn parse_amount_reports_huge_amounts_as_out_of_range() {
        for text in ["123456789012345678901234567890", "92233720368547758.08"] {
            assert!(
                matches!(parse_amount(text, USD), Err(AmountError::OutOfRange(_))),
                "expected {text:?} to be out of range"
            );
        }
    }

    #[test]
    fn find_currency_is_case_insensitive() -> TestResult {
        assert_eq!(find_currency("usd")?, USD);
        assert_eq!(
            find_currency("ABC"),
            Err(AmountError::UnknownCurrency("ABC".to_string()))
        );

        Ok(())
    }
}
