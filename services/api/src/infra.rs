use loan_engine::config::ProfileStoreConfig;
use loan_engine::lending::{CreditRecord, InMemoryProfileStore, ProfileStoreError};
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Demo applicants: one debtor and three credit segments.
pub(crate) fn default_credit_records() -> Vec<CreditRecord> {
    vec![
        CreditRecord::debtor("49002010965"),
        CreditRecord::with_modifier("49002010976", 100),
        CreditRecord::with_modifier("49002010987", 300),
        CreditRecord::with_modifier("49002010998", 1000),
    ]
}

pub(crate) fn load_profile_store(
    config: &ProfileStoreConfig,
) -> Result<InMemoryProfileStore, ProfileStoreError> {
    match &config.csv_path {
        Some(path) => {
            let store = InMemoryProfileStore::from_path(path)?;
            info!(path = %path.display(), records = store.len(), "loaded credit records");
            Ok(store)
        }
        None => {
            let store = InMemoryProfileStore::with_records(default_credit_records());
            info!(records = store.len(), "using built-in demo credit records");
            Ok(store)
        }
    }
}

pub(crate) fn parse_amount(raw: &str) -> Result<Decimal, String> {
    Decimal::from_str(raw.trim())
        .map_err(|err| format!("failed to parse '{raw}' as a decimal amount ({err})"))
}
