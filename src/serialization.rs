//! json surface for calculations and form snapshots
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Result;
use crate::form::{FormattedResult, MortgageForm};
use crate::payments::calculate;
use crate::state::FormStatus;
use crate::types::{CalculationResult, LoanInput, RepaymentType, SessionId};

/// calculation request, one per call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: f64,
    #[serde(default)]
    pub repayment_type: RepaymentType,
}

impl From<CalculationRequest> for LoanInput {
    fn from(request: CalculationRequest) -> Self {
        LoanInput::new(
            request.principal,
            request.annual_rate_percent,
            request.term_years,
            request.repayment_type,
        )
    }
}

/// calculation response; non-finite values serialize as null
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub monthly_payment: f64,
    pub total_repayment: f64,
}

impl From<CalculationResult> for CalculationResponse {
    fn from(result: CalculationResult) -> Self {
        Self {
            monthly_payment: result.monthly_payment,
            total_repayment: result.total_repayment,
        }
    }
}

impl CalculationRequest {
    pub fn respond(&self) -> CalculationResponse {
        calculate(
            self.principal,
            self.annual_rate_percent,
            self.term_years,
            self.repayment_type,
        )
        .into()
    }
}

/// answer a json calculation request with a json response
pub fn handle_json_request(body: &str) -> Result<String> {
    let request: CalculationRequest = serde_json::from_str(body)?;
    debug!(?request, "json calculation request");
    Ok(serde_json::to_string(&request.respond())?)
}

/// serializable view of a form session
#[derive(Debug, Serialize, Deserialize)]
pub struct FormView {
    pub id: SessionId,
    pub status: FormStatus,
    pub inputs: InputView,
    pub result: Option<ResultView>,
    pub calculation_count: u32,
    pub last_calculated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InputView {
    pub amount: String,
    pub term: String,
    pub rate: String,
    pub repayment_type: RepaymentType,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultView {
    pub monthly_payment: f64,
    pub total_repayment: f64,
    pub display: FormattedResult,
}

impl FormView {
    pub fn from_form(form: &MortgageForm) -> Self {
        let state = form.state();

        let result = state
            .result
            .zip(form.formatted_result())
            .map(|(result, display)| ResultView {
                monthly_payment: result.monthly_payment,
                total_repayment: result.total_repayment,
                display,
            });

        FormView {
            id: form.id,
            status: state.status,
            inputs: InputView {
                amount: state.amount.clone(),
                term: state.term.clone(),
                rate: state.rate.clone(),
                repayment_type: state.repayment_type,
            },
            result,
            calculation_count: state.calculation_count,
            last_calculated_at: state.last_calculated_at,
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalculatorError;
    use serde_json::Value;

    #[test]
    fn test_handle_json_request() {
        let body = r#"{"principal": 200000, "annualRatePercent": 5, "termYears": 25, "repaymentType": "interest-only"}"#;
        let response: Value = serde_json::from_str(&handle_json_request(body).unwrap()).unwrap();

        let monthly = response["monthlyPayment"].as_f64().unwrap();
        let total = response["totalRepayment"].as_f64().unwrap();
        assert!((monthly - 833.33).abs() < 0.005);
        assert!((total - 450_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_repayment_type_defaults() {
        let body = r#"{"principal": 200000, "annualRatePercent": 5, "termYears": 25}"#;
        let request: CalculationRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.repayment_type, RepaymentType::Repayment);
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let body = r#"{"principal": 200000, "annualRatePercent": 0, "termYears": 25, "repaymentType": "repayment"}"#;
        let response: Value = serde_json::from_str(&handle_json_request(body).unwrap()).unwrap();
        assert!(response["monthlyPayment"].is_null());
        assert!(response["totalRepayment"].is_null());
    }

    #[test]
    fn test_malformed_request() {
        let err = handle_json_request(r#"{"principal": "lots"}"#).unwrap_err();
        assert!(matches!(err, CalculatorError::Serialization(_)));
    }

    #[test]
    fn test_form_view() {
        let mut form = MortgageForm::builder()
            .amount("200000")
            .term("25")
            .rate("5")
            .build()
            .unwrap();

        let empty: Value = serde_json::from_str(&form.json()).unwrap();
        assert_eq!(empty["status"], "Empty");
        assert!(empty["result"].is_null());

        form.submit_now().unwrap();
        let populated: Value = serde_json::from_str(&form.json()).unwrap();
        assert_eq!(populated["status"], "Populated");
        assert_eq!(populated["inputs"]["amount"], "200000");
        assert_eq!(populated["result"]["display"]["monthly_payment"], "£1169.18");
        assert_eq!(populated["calculation_count"], 1);
    }
}
