use std::num::NonZeroU32;

use rust_decimal::prelude::ToPrimitive;

use super::super::domain::{DecisionOutcome, DeclineReason, LoanOffer, LoanRequest};
use super::config::ProductLimits;
use super::scoring::{credit_score, max_amount_for_period, suggested_period};

/// Picks the offer for an eligible applicant.
///
/// A score at or above the threshold keeps the requested period and offers the largest
/// amount the modifier supports, capped at the product maximum. A lower score keeps the
/// requested amount and stretches the period instead, which only succeeds when the
/// stretched period sits strictly inside the product bounds.
pub(crate) fn select_terms(
    limits: &ProductLimits,
    risk_modifier: NonZeroU32,
    request: &LoanRequest,
) -> DecisionOutcome {
    let amount = request.requested_amount();
    let period_months = request.requested_period_months();
    let score = credit_score(risk_modifier, amount, period_months);

    if score >= limits.required_credit_score {
        let max_amount = max_amount_for_period(risk_modifier, period_months);
        let amount = if max_amount >= limits.max_loan_amount {
            limits.max_loan_amount
        } else {
            max_amount
        };
        return DecisionOutcome::Granted(LoanOffer {
            amount,
            period_months,
        });
    }

    let suggested = suggested_period(amount, risk_modifier);
    match suggested.to_u32() {
        Some(period_months) if limits.period_strictly_within(suggested) => {
            DecisionOutcome::Granted(LoanOffer {
                amount,
                period_months,
            })
        }
        _ => DecisionOutcome::Declined(DeclineReason::SuggestedPeriodOutOfRange {
            suggested_period_months: suggested,
        }),
    }
}
