use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::RwLock;

use serde::Deserialize;

use super::domain::{ApplicantId, CreditRecord};
use super::repository::{ProfileRepository, RepositoryError};

/// Thread-safe in-memory credit record table keyed by applicant.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    records: RwLock<HashMap<ApplicantId, CreditRecord>>,
}

impl InMemoryProfileStore {
    /// Later records replace earlier ones with the same applicant id.
    pub fn with_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CreditRecord>,
    {
        let records = records
            .into_iter()
            .map(|record| (record.applicant_id.clone(), record))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ProfileStoreError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Load `personal_code,credit_modifier,is_debtor` rows. An empty modifier cell means none.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ProfileStoreError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = HashMap::new();

        for row in csv_reader.deserialize::<CreditRow>() {
            let record = CreditRecord::from(row?);
            if records.contains_key(&record.applicant_id) {
                return Err(ProfileStoreError::DuplicateApplicant(record.applicant_id));
            }
            records.insert(record.applicant_id.clone(), record);
        }

        Ok(Self {
            records: RwLock::new(records),
        })
    }

    pub fn upsert(&self, record: CreditRecord) -> Result<(), RepositoryError> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| RepositoryError::Unavailable("profile table lock poisoned".to_string()))?;
        guard.insert(record.applicant_id.clone(), record);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProfileRepository for InMemoryProfileStore {
    fn find_profile(
        &self,
        applicant_id: &ApplicantId,
    ) -> Result<Option<CreditRecord>, RepositoryError> {
        let guard = self
            .records
            .read()
            .map_err(|_| RepositoryError::Unavailable("profile table lock poisoned".to_string()))?;
        Ok(guard.get(applicant_id).cloned())
    }
}

#[derive(Debug, Deserialize)]
struct CreditRow {
    #[serde(alias = "applicant_id")]
    personal_code: String,
    #[serde(default)]
    credit_modifier: Option<u32>,
    is_debtor: bool,
}

impl From<CreditRow> for CreditRecord {
    fn from(row: CreditRow) -> Self {
        Self {
            applicant_id: ApplicantId(row.personal_code),
            credit_modifier: row.credit_modifier,
            is_debtor: row.is_debtor,
        }
    }
}

/// Failures while loading a credit record table.
#[derive(Debug, thiserror::Error)]
pub enum ProfileStoreError {
    #[error("failed to read credit records: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid credit record data: {0}")]
    Csv(#[from] csv::Error),
    #[error("duplicate credit record for applicant {0}")]
    DuplicateApplicant(ApplicantId),
}
