mod config;
mod policy;
mod scoring;

pub use config::ProductLimits;

use super::domain::{
    ApplicantProfile, CreditStanding, DecisionOutcome, DeclineReason, LoanDecision, LoanRequest,
};
use policy::select_terms;

/// Stateless evaluator applying the product limits to a resolved profile.
///
/// Pure: no I/O, no logging, nothing shared is mutated, so one engine can serve any number
/// of concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine {
    limits: ProductLimits,
}

impl DecisionEngine {
    pub fn new(limits: ProductLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &ProductLimits {
        &self.limits
    }

    /// Decide on `request` for the given profile; `None` means the lookup found no record.
    pub fn decide(
        &self,
        profile: Option<&ApplicantProfile>,
        request: LoanRequest,
    ) -> LoanDecision {
        let risk_modifier = match profile.map(|profile| profile.standing) {
            None => return LoanDecision::declined(request, DeclineReason::NoCreditRecord),
            Some(CreditStanding::Debtor) => {
                return LoanDecision::declined(request, DeclineReason::Debtor)
            }
            Some(CreditStanding::Eligible { risk_modifier }) => risk_modifier,
        };

        match select_terms(&self.limits, risk_modifier, &request) {
            DecisionOutcome::Granted(offer) => LoanDecision::granted(request, offer),
            DecisionOutcome::Declined(reason) => LoanDecision::declined(request, reason),
        }
    }
}
