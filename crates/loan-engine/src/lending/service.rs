use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{
    ApplicantProfile, DecisionOutcome, LoanApplication, LoanDecision, LoanRequest, ProfileError,
    RequestError,
};
use super::engine::{DecisionEngine, ProductLimits};
use super::repository::{ProfileRepository, RepositoryError};

/// Service composing the profile lookup with the decision engine.
pub struct LoanDecisionService<R> {
    repository: Arc<R>,
    engine: Arc<DecisionEngine>,
}

impl<R> LoanDecisionService<R>
where
    R: ProfileRepository + 'static,
{
    pub fn new(repository: Arc<R>, limits: ProductLimits) -> Self {
        Self {
            repository,
            engine: Arc::new(DecisionEngine::new(limits)),
        }
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Validate an incoming application, resolve the applicant's profile and decide.
    pub fn decide(
        &self,
        application: LoanApplication,
    ) -> Result<LoanDecision, DecisionServiceError> {
        let request = LoanRequest::try_from(application)?;
        self.decide_request(request)
    }

    /// Decide an already validated request.
    pub fn decide_request(
        &self,
        request: LoanRequest,
    ) -> Result<LoanDecision, DecisionServiceError> {
        let applicant_id = request.applicant_id().clone();

        let record = self.repository.find_profile(&applicant_id).map_err(|err| {
            warn!(%applicant_id, error = %err, "credit profile lookup failed");
            err
        })?;

        let profile = record
            .map(ApplicantProfile::try_from)
            .transpose()
            .map_err(|err| {
                warn!(%applicant_id, error = %err, "stored credit profile is inconsistent");
                err
            })?;

        let decision = self.engine.decide(profile.as_ref(), request);

        match decision.outcome() {
            DecisionOutcome::Granted(offer) => info!(
                %applicant_id,
                offered_amount = %offer.amount,
                offered_period_months = offer.period_months,
                "loan granted"
            ),
            DecisionOutcome::Declined(reason) => info!(
                %applicant_id,
                reason = reason.label(),
                "loan declined"
            ),
        }

        Ok(decision)
    }
}

/// Error raised by the decision service. A decline is never an error.
#[derive(Debug, thiserror::Error)]
pub enum DecisionServiceError {
    #[error(transparent)]
    InvalidInput(#[from] RequestError),
    #[error(transparent)]
    InvalidProfile(#[from] ProfileError),
    #[error(transparent)]
    LookupFailure(#[from] RepositoryError),
}
