use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use shared::errors::ServiceError;

/// Σ(price × quantity) in exact decimal arithmetic.
pub fn order_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, i32)>,
{
    lines
        .into_iter()
        .map(|(price, quantity)| price * Decimal::from(quantity))
        .sum()
}

/// Converts a major-unit amount (rupees) to the gateway's minor units (paise).
pub fn to_minor_units(amount: Decimal) -> Result<i64, ServiceError> {
    if amount.is_sign_negative() {
        return Err(ServiceError::Validation(vec![format!(
            "Amount must not be negative, got {amount}"
        )]));
    }

    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| ServiceError::Internal(format!("Amount {amount} overflows minor units")))
}
