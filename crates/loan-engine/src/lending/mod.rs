//! Loan decisioning: applicant credit profiles, the scoring engine, and the request plumbing
//! around it.
//!
//! The engine is a pure function of a resolved profile and a validated request. Everything
//! that can fail (input validation, the profile lookup, inconsistent stored data) happens in
//! the service before the engine is called, so a decline is always an ordinary result.

pub mod domain;
pub mod engine;
pub mod repository;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicantId, ApplicantProfile, CreditRecord, CreditStanding, DecisionOutcome, DeclineReason,
    LoanApplication, LoanDecision, LoanDecisionView, LoanOffer, LoanRequest, ProfileError,
    RequestError,
};
pub use engine::{DecisionEngine, ProductLimits};
pub use repository::{ProfileRepository, RepositoryError};
pub use router::{decision_router, DECISION_PATH};
pub use service::{DecisionServiceError, LoanDecisionService};
pub use store::{InMemoryProfileStore, ProfileStoreError};
