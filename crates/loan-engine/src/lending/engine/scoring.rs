use std::num::NonZeroU32;

use rust_decimal::{Decimal, RoundingStrategy};

/// Scale the modifier/amount ratio is rounded to before it is scaled by the period.
const RATIO_SCALE: u32 = 2;

/// `round_half_up(modifier / amount, 2) * period`.
///
/// A ratio too large to represent can only mean a vanishingly small amount, so it saturates
/// instead of failing.
pub(crate) fn credit_score(
    risk_modifier: NonZeroU32,
    amount: Decimal,
    period_months: u32,
) -> Decimal {
    Decimal::from(risk_modifier.get())
        .checked_div(amount)
        .map(|ratio| {
            ratio.round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::MidpointAwayFromZero)
        })
        .and_then(|ratio| ratio.checked_mul(Decimal::from(period_months)))
        .unwrap_or(Decimal::MAX)
}

/// Largest amount the modifier supports over the given period, before the product cap.
pub(crate) fn max_amount_for_period(risk_modifier: NonZeroU32, period_months: u32) -> Decimal {
    Decimal::from(u64::from(risk_modifier.get()) * u64::from(period_months))
}

/// Whole months needed for the amount to become affordable; partial months round up.
pub(crate) fn suggested_period(amount: Decimal, risk_modifier: NonZeroU32) -> Decimal {
    (amount / Decimal::from(risk_modifier.get())).ceil()
}
