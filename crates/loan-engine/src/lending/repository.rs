use super::domain::{ApplicantId, CreditRecord};

/// Keyed lookup of applicant credit records.
///
/// A missing record is `Ok(None)`. Errors are reserved for the store itself failing.
pub trait ProfileRepository: Send + Sync {
    fn find_profile(&self, applicant_id: &ApplicantId)
        -> Result<Option<CreditRecord>, RepositoryError>;
}

/// Error enumeration for profile store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}
