use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::{AppError, Result};

/// Decimal places kept for every stored monetary value
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to cents, half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a percentage to one decimal place, half away from zero.
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Smallest representable amount (0.01)
pub fn smallest_unit() -> Decimal {
    Decimal::new(1, MONEY_SCALE)
}

/// Largest magnitude a `DECIMAL(15,2)` column stores
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999_999, MONEY_SCALE)
}

/// Rejects amounts whose magnitude exceeds `max_amount()`.
pub fn within_storage_range(field: &str, amount: Decimal) -> Result<Decimal> {
    if amount.abs() > max_amount() {
        return Err(AppError::validation(format!(
            "{} is out of the allowed range (at most {}), got {}",
            field,
            max_amount(),
            amount
        )));
    }

    Ok(amount)
}

/// Normalises a signed amount to cents and checks its range.
pub fn signed_amount(field: &str, amount: Decimal) -> Result<Decimal> {
    within_storage_range(field, round_money(amount))
}

/// Validates a non-negative amount and normalises it to cents.
///
/// `field` names the offending input in the error message.
pub fn non_negative_amount(field: &str, amount: Decimal) -> Result<Decimal> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AppError::validation(format!(
            "{} cannot be negative, got {}",
            field, amount
        )));
    }

    within_storage_range(field, round_money(amount))
}

/// Validates a strictly positive amount and normalises it to cents.
pub fn positive_amount(field: &str, amount: Decimal) -> Result<Decimal> {
    let rounded = round_money(amount);
    if rounded <= Decimal::ZERO {
        return Err(AppError::validation(format!(
            "{} must be greater than zero, got {}",
            field, amount
        )));
    }

    within_storage_range(field, rounded)
}
