use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product limits the offer policy works within.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLimits {
    pub max_loan_amount: Decimal,
    pub min_period_months: u32,
    pub max_period_months: u32,
    pub required_credit_score: Decimal,
}

impl ProductLimits {
    /// Both bounds are exclusive.
    pub(crate) fn period_strictly_within(&self, period_months: Decimal) -> bool {
        Decimal::from(self.min_period_months) < period_months
            && period_months < Decimal::from(self.max_period_months)
    }
}

impl Default for ProductLimits {
    fn default() -> Self {
        Self {
            max_loan_amount: Decimal::from(10_000),
            min_period_months: 12,
            max_period_months: 60,
            required_credit_score: Decimal::ONE,
        }
    }
}
