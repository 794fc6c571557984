use std::num::NonZeroU32;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::lending::domain::{ApplicantId, ApplicantProfile, CreditRecord, LoanRequest};
use crate::lending::engine::{DecisionEngine, ProductLimits};
use crate::lending::repository::{ProfileRepository, RepositoryError};
use crate::lending::service::LoanDecisionService;
use crate::lending::store::InMemoryProfileStore;

pub(super) const DEBTOR: &str = "49002010965";
pub(super) const SEGMENT_ONE: &str = "49002010976";
pub(super) const SEGMENT_TWO: &str = "49002010987";
pub(super) const SEGMENT_THREE: &str = "49002010998";

pub(super) fn engine() -> DecisionEngine {
    DecisionEngine::new(ProductLimits::default())
}

pub(super) fn request(amount: Decimal, period_months: u32) -> LoanRequest {
    LoanRequest::new("1234", amount, period_months).expect("valid request")
}

pub(super) fn eligible(risk_modifier: u32) -> ApplicantProfile {
    ApplicantProfile::eligible(
        "1234",
        NonZeroU32::new(risk_modifier).expect("non-zero modifier"),
    )
}

pub(super) fn seeded_store() -> InMemoryProfileStore {
    InMemoryProfileStore::with_records([
        CreditRecord::debtor(DEBTOR),
        CreditRecord::with_modifier(SEGMENT_ONE, 100),
        CreditRecord::with_modifier(SEGMENT_TWO, 300),
        CreditRecord::with_modifier(SEGMENT_THREE, 1000),
    ])
}

pub(super) fn build_service() -> (
    LoanDecisionService<InMemoryProfileStore>,
    Arc<InMemoryProfileStore>,
) {
    let store = Arc::new(seeded_store());
    let service = LoanDecisionService::new(store.clone(), ProductLimits::default());
    (service, store)
}

/// Store whose backend is down.
pub(super) struct UnavailableRepository;

impl ProfileRepository for UnavailableRepository {
    fn find_profile(
        &self,
        _applicant_id: &ApplicantId,
    ) -> Result<Option<CreditRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Counts lookups so tests can tell whether the store was consulted.
#[derive(Default)]
pub(super) struct CountingRepository {
    pub(super) lookups: AtomicUsize,
}

impl CountingRepository {
    pub(super) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl ProfileRepository for CountingRepository {
    fn find_profile(
        &self,
        _applicant_id: &ApplicantId,
    ) -> Result<Option<CreditRecord>, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
