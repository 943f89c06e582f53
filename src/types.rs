use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CalculatorError;

/// unique identifier for a form session
pub type SessionId = Uuid;

/// mortgage repayment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RepaymentType {
    /// each payment covers interest and reduces principal
    #[default]
    Repayment,
    /// payments cover interest only, principal repaid at term end
    InterestOnly,
}

impl RepaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepaymentType::Repayment => "repayment",
            RepaymentType::InterestOnly => "interest-only",
        }
    }
}

impl fmt::Display for RepaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepaymentType {
    type Err = CalculatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "repayment" => Ok(RepaymentType::Repayment),
            "interest-only" | "interest_only" | "interestonly" => Ok(RepaymentType::InterestOnly),
            _ => Err(CalculatorError::InvalidInput {
                field: "repayment_type".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// form field identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Amount,
    Term,
    Rate,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Amount => "amount",
            FormField::Term => "term",
            FormField::Rate => "rate",
        }
    }
}

/// loan parameters for a single calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInput {
    pub principal: f64,
    /// annual rate as a percentage, 5.25 means 5.25%
    pub annual_interest_rate_percent: f64,
    pub term_years: f64,
    pub repayment_type: RepaymentType,
}

impl LoanInput {
    pub fn new(
        principal: f64,
        annual_interest_rate_percent: f64,
        term_years: f64,
        repayment_type: RepaymentType,
    ) -> Self {
        Self {
            principal,
            annual_interest_rate_percent,
            term_years,
            repayment_type,
        }
    }
}

/// calculation output, unrounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub monthly_payment: f64,
    pub total_repayment: f64,
}

impl CalculationResult {
    /// interest paid over the term: everything repaid beyond the principal
    pub fn total_interest(&self, principal: f64) -> f64 {
        self.total_repayment - principal
    }

    /// true when both figures are finite numbers
    pub fn is_finite(&self) -> bool {
        self.monthly_payment.is_finite() && self.total_repayment.is_finite()
    }
}
