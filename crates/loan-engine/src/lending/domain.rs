use std::fmt;
use std::num::NonZeroU32;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque applicant identifier (a national personal code in the seeded store).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub String);

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ApplicantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Loan application exactly as it arrives from a client, before any validation.
///
/// Field aliases keep older clients working: they post `personalCode` (or
/// `loanApplicantPersonalCode`), `loanAmount` and `loanPeriod`, sometimes with the numbers
/// quoted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    #[serde(alias = "personalCode", alias = "loanApplicantPersonalCode")]
    pub applicant_id: String,
    #[serde(alias = "loanAmount")]
    pub requested_amount: Decimal,
    #[serde(alias = "loanPeriod", deserialize_with = "lenient_integer")]
    pub requested_period_months: i64,
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(raw) => raw.trim().parse::<i64>().map_err(|err| {
            serde::de::Error::custom(format!("failed to parse '{raw}' as whole months ({err})"))
        }),
    }
}

/// Validated loan request. Holding one proves the amount and period are positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    applicant_id: ApplicantId,
    requested_amount: Decimal,
    requested_period_months: u32,
}

impl LoanRequest {
    pub fn new(
        applicant_id: impl Into<String>,
        requested_amount: Decimal,
        requested_period_months: u32,
    ) -> Result<Self, RequestError> {
        let applicant_id: String = applicant_id.into();
        let applicant_id = applicant_id.trim().to_string();
        if applicant_id.is_empty() {
            return Err(RequestError::BlankApplicantId);
        }
        if requested_amount <= Decimal::ZERO {
            return Err(RequestError::NonPositiveAmount(requested_amount));
        }
        if requested_period_months == 0 {
            return Err(RequestError::NonPositivePeriod(0));
        }

        Ok(Self {
            applicant_id: ApplicantId(applicant_id),
            requested_amount,
            requested_period_months,
        })
    }

    pub fn applicant_id(&self) -> &ApplicantId {
        &self.applicant_id
    }

    pub fn requested_amount(&self) -> Decimal {
        self.requested_amount
    }

    pub fn requested_period_months(&self) -> u32 {
        self.requested_period_months
    }
}

impl TryFrom<LoanApplication> for LoanRequest {
    type Error = RequestError;

    fn try_from(application: LoanApplication) -> Result<Self, Self::Error> {
        let period = application.requested_period_months;
        if period <= 0 {
            return Err(RequestError::NonPositivePeriod(period));
        }
        let period = u32::try_from(period).map_err(|_| RequestError::PeriodTooLong(period))?;

        Self::new(application.applicant_id, application.requested_amount, period)
    }
}

/// Reasons a loan application cannot be turned into a request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("applicant identifier must not be blank")]
    BlankApplicantId,
    #[error("requested amount must be greater than zero (got {0})")]
    NonPositiveAmount(Decimal),
    #[error("requested period must be at least one month (got {0})")]
    NonPositivePeriod(i64),
    #[error("requested period of {0} months is out of range")]
    PeriodTooLong(i64),
}

/// Credit information row as kept by the profile store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditRecord {
    pub applicant_id: ApplicantId,
    pub credit_modifier: Option<u32>,
    pub is_debtor: bool,
}

impl CreditRecord {
    pub fn debtor(applicant_id: impl Into<String>) -> Self {
        Self {
            applicant_id: ApplicantId(applicant_id.into()),
            credit_modifier: None,
            is_debtor: true,
        }
    }

    pub fn with_modifier(applicant_id: impl Into<String>, credit_modifier: u32) -> Self {
        Self {
            applicant_id: ApplicantId(applicant_id.into()),
            credit_modifier: Some(credit_modifier),
            is_debtor: false,
        }
    }
}

/// Whether an applicant can be offered credit at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "standing")]
pub enum CreditStanding {
    Debtor,
    /// Higher modifiers earn a better score for the same amount and period.
    Eligible { risk_modifier: NonZeroU32 },
}

/// Credit profile the decision engine works from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub applicant_id: ApplicantId,
    pub standing: CreditStanding,
}

impl ApplicantProfile {
    pub fn eligible(applicant_id: impl Into<String>, risk_modifier: NonZeroU32) -> Self {
        Self {
            applicant_id: ApplicantId(applicant_id.into()),
            standing: CreditStanding::Eligible { risk_modifier },
        }
    }

    pub fn debtor(applicant_id: impl Into<String>) -> Self {
        Self {
            applicant_id: ApplicantId(applicant_id.into()),
            standing: CreditStanding::Debtor,
        }
    }
}

impl TryFrom<CreditRecord> for ApplicantProfile {
    type Error = ProfileError;

    fn try_from(record: CreditRecord) -> Result<Self, Self::Error> {
        if record.is_debtor {
            return Ok(Self {
                applicant_id: record.applicant_id,
                standing: CreditStanding::Debtor,
            });
        }

        match record.credit_modifier.and_then(NonZeroU32::new) {
            Some(risk_modifier) => Ok(Self {
                applicant_id: record.applicant_id,
                standing: CreditStanding::Eligible { risk_modifier },
            }),
            None => Err(ProfileError::MissingRiskModifier(record.applicant_id)),
        }
    }
}

/// Stored credit data that breaks the non-debtor-has-modifier rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("non-debtor profile {0} has no positive credit modifier")]
    MissingRiskModifier(ApplicantId),
}

/// Terms offered to a granted applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanOffer {
    pub amount: Decimal,
    pub period_months: u32,
}

/// Why no offer was made. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclineReason {
    NoCreditRecord,
    Debtor,
    SuggestedPeriodOutOfRange { suggested_period_months: Decimal },
}

impl DeclineReason {
    pub fn label(&self) -> &'static str {
        match self {
            DeclineReason::NoCreditRecord => "no_credit_record",
            DeclineReason::Debtor => "debtor",
            DeclineReason::SuggestedPeriodOutOfRange { .. } => "suggested_period_out_of_range",
        }
    }

    pub fn summary(&self) -> String {
        match self {
            DeclineReason::NoCreditRecord => "declined: no credit record on file".to_string(),
            DeclineReason::Debtor => "declined: applicant has outstanding debt".to_string(),
            DeclineReason::SuggestedPeriodOutOfRange {
                suggested_period_months,
            } => format!(
                "declined: affordable period of {suggested_period_months} months is outside product limits"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionOutcome {
    Granted(LoanOffer),
    Declined(DeclineReason),
}

/// Result of one decision call, echoing the request it was made for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanDecision {
    outcome: DecisionOutcome,
    original_request: LoanRequest,
}

impl LoanDecision {
    pub(crate) fn granted(original_request: LoanRequest, offer: LoanOffer) -> Self {
        Self {
            outcome: DecisionOutcome::Granted(offer),
            original_request,
        }
    }

    pub(crate) fn declined(original_request: LoanRequest, reason: DeclineReason) -> Self {
        Self {
            outcome: DecisionOutcome::Declined(reason),
            original_request,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self.outcome, DecisionOutcome::Granted(_))
    }

    pub fn outcome(&self) -> &DecisionOutcome {
        &self.outcome
    }

    pub fn offer(&self) -> Option<&LoanOffer> {
        match &self.outcome {
            DecisionOutcome::Granted(offer) => Some(offer),
            DecisionOutcome::Declined(_) => None,
        }
    }

    pub fn decline_reason(&self) -> Option<&DeclineReason> {
        match &self.outcome {
            DecisionOutcome::Granted(_) => None,
            DecisionOutcome::Declined(reason) => Some(reason),
        }
    }

    pub fn original_request(&self) -> &LoanRequest {
        &self.original_request
    }

    pub fn view(&self) -> LoanDecisionView {
        let offer = self.offer();
        LoanDecisionView {
            granted: self.is_granted(),
            offered_amount: offer.map(|offer| offer.amount),
            offered_period_months: offer.map(|offer| offer.period_months),
            original_request: self.original_request.clone(),
            decline_reason: self.decline_reason().map(DeclineReason::label),
        }
    }
}

/// Wire representation of a decision. Offer fields are omitted, not zeroed, on decline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDecisionView {
    pub granted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offered_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offered_period_months: Option<u32>,
    pub original_request: LoanRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<&'static str>,
}
