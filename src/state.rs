use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CalculationResult, RepaymentType};

/// form lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FormStatus {
    /// no result on display
    #[default]
    Empty,
    /// last submission produced a result
    Populated,
}

/// form state: raw field text plus the last result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    // raw inputs
    pub amount: String,
    pub term: String,
    pub rate: String,
    pub repayment_type: RepaymentType,

    // output
    pub result: Option<CalculationResult>,
    pub status: FormStatus,

    // tracking
    pub calculation_count: u32,
    pub last_calculated_at: Option<DateTime<Utc>>,
    pub last_cleared_at: Option<DateTime<Utc>>,
}

impl FormState {
    /// create empty form state
    pub fn new(default_repayment_type: RepaymentType) -> Self {
        Self {
            amount: String::new(),
            term: String::new(),
            rate: String::new(),
            repayment_type: default_repayment_type,
            result: None,
            status: FormStatus::Empty,
            calculation_count: 0,
            last_calculated_at: None,
            last_cleared_at: None,
        }
    }

    /// store a fresh result
    pub fn record_result(&mut self, result: CalculationResult, now: DateTime<Utc>) {
        self.result = Some(result);
        self.status = FormStatus::Populated;
        self.calculation_count = self.calculation_count.saturating_add(1);
        self.last_calculated_at = Some(now);
    }

    /// drop the result and restore inputs to their empty values
    pub fn reset(&mut self, default_repayment_type: RepaymentType, now: DateTime<Utc>) {
        self.amount.clear();
        self.term.clear();
        self.rate.clear();
        self.repayment_type = default_repayment_type;
        self.result = None;
        self.status = FormStatus::Empty;
        self.last_cleared_at = Some(now);
    }

    /// true when every input is at its empty value
    pub fn inputs_empty(&self, default_repayment_type: RepaymentType) -> bool {
        self.amount.is_empty()
            && self.term.is_empty()
            && self.rate.is_empty()
            && self.repayment_type == default_repayment_type
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(RepaymentType::default())
    }
}
