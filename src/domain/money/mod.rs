//! Monetary normalization shared by every balance-affecting operation.

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::{Error, Result};

/// Fractional digits kept for every stored amount.
pub const SCALE: u32 = 2;

/// Rounds to [`SCALE`] places with banker's rounding and pads the scale, so
/// `1000` comes back as `1000.00`.
///
/// Values too large to carry two fractional digits are rejected instead of
/// silently keeping a smaller scale.
pub fn normalize(amount: Decimal) -> Result<Decimal> {
    let mut rounded = amount.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(SCALE);

    if rounded.scale() != SCALE {
        return Err(Error::AmountOutOfRange { amount });
    }

    Ok(rounded)
}

/// Normalizes `amount` and rejects it unless the result is strictly positive.
///
/// A magnitude like `0.001` rounds to zero and is rejected as well.
pub fn positive(amount: Decimal) -> Result<Decimal> {
    let normalized = normalize(amount)?;

    if normalized <= Decimal::ZERO {
        return Err(Error::InvalidAmount { amount });
    }

    Ok(normalized)
}

/// `balance + amount`, normalized; fails rather than overflow or lose scale.
pub fn add(balance: Decimal, amount: Decimal) -> Result<Decimal> {
    balance
        .checked_add(amount)
        .ok_or(Error::AmountOutOfRange { amount })
        .and_then(normalize)
        .map_err(|_| Error::AmountOutOfRange { amount })
}
