use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::CalculatorConfig;
use crate::decimal::format_amount;
use crate::errors::Result;
use crate::events::{Event, EventStore};
use crate::parse::parse_field;
use crate::payments::AmortizationCalculator;
use crate::serialization::FormView;
use crate::state::{FormState, FormStatus};
use crate::types::{CalculationResult, FormField, LoanInput, RepaymentType, SessionId};

/// result amounts ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedResult {
    pub monthly_payment: String,
    pub total_repayment: String,
}

/// mortgage calculator form session
///
/// Holds the raw field text as typed, the last computed result, and the
/// events produced along the way. Editing a field leaves the previous
/// result in place until the next submit or clear.
#[derive(Debug)]
pub struct MortgageForm {
    pub id: SessionId,
    pub config: CalculatorConfig,
    pub state: FormState,
    pub events: EventStore,
}

impl MortgageForm {
    /// create a new empty form
    pub fn new(config: CalculatorConfig) -> Result<Self> {
        config.validate()?;
        let state = FormState::new(config.default_repayment_type);

        Ok(Self {
            id: Uuid::new_v4(),
            config,
            state,
            events: EventStore::new(),
        })
    }

    /// builder for creating forms
    pub fn builder() -> MortgageFormBuilder {
        MortgageFormBuilder::new()
    }

    pub fn set_amount(&mut self, text: impl Into<String>) {
        self.state.amount = text.into();
    }

    pub fn set_term(&mut self, text: impl Into<String>) {
        self.state.term = text.into();
    }

    pub fn set_rate(&mut self, text: impl Into<String>) {
        self.state.rate = text.into();
    }

    pub fn set_repayment_type(&mut self, repayment_type: RepaymentType) {
        self.state.repayment_type = repayment_type;
    }

    /// parse the raw fields into a loan input
    pub fn parse_input(&self) -> Result<LoanInput> {
        let mode = self.config.parse_mode;

        Ok(LoanInput {
            principal: parse_field(&self.state.amount, FormField::Amount, mode)?,
            annual_interest_rate_percent: parse_field(&self.state.rate, FormField::Rate, mode)?,
            term_years: parse_field(&self.state.term, FormField::Term, mode)?,
            repayment_type: self.state.repayment_type,
        })
    }

    /// submit with system time
    pub fn submit_now(&mut self) -> Result<CalculationResult> {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.submit(&time)
    }

    /// parse, calculate and store the result
    ///
    /// In strict mode a rejected field leaves the previous result untouched.
    pub fn submit(&mut self, time_provider: &SafeTimeProvider) -> Result<CalculationResult> {
        let now = time_provider.now();

        let input = match self.parse_input() {
            Ok(input) => input,
            Err(err) => {
                warn!(session_id = %self.id, error = %err, "calculation rejected");
                self.events.emit(Event::CalculationRejected {
                    session_id: self.id,
                    reason: err.to_string(),
                    timestamp: now,
                });
                return Err(err);
            }
        };

        let result = AmortizationCalculator::calculate_input(&input);
        if !result.is_finite() {
            debug!(session_id = %self.id, ?input, "calculation produced a non-finite result");
        }

        self.state.record_result(result, now);
        self.events.emit(Event::CalculationPerformed {
            session_id: self.id,
            input,
            result,
            timestamp: now,
        });

        info!(
            session_id = %self.id,
            repayment_type = %input.repayment_type,
            monthly_payment = result.monthly_payment,
            total_repayment = result.total_repayment,
            "mortgage calculated"
        );

        Ok(result)
    }

    /// clear with system time
    pub fn clear_now(&mut self) {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.clear(&time);
    }

    /// remove the result and restore every input to its empty value
    pub fn clear(&mut self, time_provider: &SafeTimeProvider) {
        let now = time_provider.now();
        let had_result = self.state.result.is_some();

        self.state.reset(self.config.default_repayment_type, now);
        self.events.emit(Event::FormCleared {
            session_id: self.id,
            had_result,
            timestamp: now,
        });

        debug!(session_id = %self.id, had_result, "form cleared");
    }

    pub fn result(&self) -> Option<&CalculationResult> {
        self.state.result.as_ref()
    }

    pub fn status(&self) -> FormStatus {
        self.state.status
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.events.take_events()
    }

    /// last result formatted with the configured currency and precision
    pub fn formatted_result(&self) -> Option<FormattedResult> {
        let symbol = &self.config.currency_symbol;
        let dp = self.config.display_decimal_places;

        self.state.result.map(|result| FormattedResult {
            monthly_payment: format_amount(result.monthly_payment, symbol, dp),
            total_repayment: format_amount(result.total_repayment, symbol, dp),
        })
    }

    /// pretty json snapshot of the form
    pub fn json(&self) -> String {
        FormView::from_form(self)
            .to_json_pretty()
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}

/// builder for mortgage forms
#[derive(Debug, Default)]
pub struct MortgageFormBuilder {
    config: Option<CalculatorConfig>,
    amount: Option<String>,
    term: Option<String>,
    rate: Option<String>,
    repayment_type: Option<RepaymentType>,
}

impl MortgageFormBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: CalculatorConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn amount(mut self, text: impl Into<String>) -> Self {
        self.amount = Some(text.into());
        self
    }

    pub fn term(mut self, text: impl Into<String>) -> Self {
        self.term = Some(text.into());
        self
    }

    pub fn rate(mut self, text: impl Into<String>) -> Self {
        self.rate = Some(text.into());
        self
    }

    pub fn repayment_type(mut self, repayment_type: RepaymentType) -> Self {
        self.repayment_type = Some(repayment_type);
        self
    }

    pub fn build(self) -> Result<MortgageForm> {
        let mut form = MortgageForm::new(self.config.unwrap_or_default())?;

        if let Some(amount) = self.amount {
            form.set_amount(amount);
        }
        if let Some(term) = self.term {
            form.set_term(term);
        }
        if let Some(rate) = self.rate {
            form.set_rate(rate);
        }
        if let Some(repayment_type) = self.repayment_type {
            form.set_repayment_type(repayment_type);
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalculatorError;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;

    fn test_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        ))
    }

    #[test]
    fn test_submit_repayment() {
        let time = test_time();
        let mut form = MortgageForm::builder()
            .amount("200000")
            .term("25")
            .rate("5")
            .build()
            .unwrap();

        assert_eq!(form.status(), FormStatus::Empty);
        let result = form.submit(&time).unwrap();

        assert!((result.monthly_payment - 1169.18).abs() < 0.005);
        assert_eq!(form.status(), FormStatus::Populated);
        assert_eq!(form.result(), Some(&result));
        assert_eq!(form.state().last_calculated_at, Some(time.now()));

        let formatted = form.formatted_result().unwrap();
        assert_eq!(formatted.monthly_payment, "£1169.18");
        assert_eq!(formatted.total_repayment, "£350754.02");
    }

    #[test]
    fn test_submit_interest_only() {
        let time = test_time();
        let mut form = MortgageForm::builder()
            .amount("200000")
            .term("25")
            .rate("5")
            .repayment_type(RepaymentType::InterestOnly)
            .build()
            .unwrap();

        form.submit(&time).unwrap();

        let formatted = form.formatted_result().unwrap();
        assert_eq!(formatted.monthly_payment, "£833.33");
        assert_eq!(formatted.total_repayment, "£450000.00");
    }

    #[test]
    fn test_empty_fields_give_nan() {
        let time = test_time();
        let mut form = MortgageForm::new(CalculatorConfig::default()).unwrap();

        let result = form.submit(&time).unwrap();
        assert!(result.monthly_payment.is_nan());
        assert!(result.total_repayment.is_nan());
        assert_eq!(form.status(), FormStatus::Populated);
        assert_eq!(form.formatted_result().unwrap().monthly_payment, "£NaN");
    }

    #[test]
    fn test_strict_mode_rejects_and_keeps_result() {
        let time = test_time();
        let mut form = MortgageForm::builder()
            .config(CalculatorConfig::strict())
            .amount("200000")
            .term("25")
            .rate("5")
            .build()
            .unwrap();

        let first = form.submit(&time).unwrap();

        form.set_rate("five");
        let err = form.submit(&time).unwrap_err();
        assert!(matches!(err, CalculatorError::InvalidInput { ref field, .. } if field == "rate"));

        assert_eq!(form.result(), Some(&first));
        assert_eq!(form.state().calculation_count, 1);
        assert!(matches!(form.events().last(), Some(Event::CalculationRejected { .. })));
    }

    #[test]
    fn test_editing_keeps_previous_result() {
        let time = test_time();
        let mut form = MortgageForm::builder()
            .amount("100000")
            .term("10")
            .rate("4")
            .build()
            .unwrap();

        let result = form.submit(&time).unwrap();
        form.set_amount("999999");
        form.set_repayment_type(RepaymentType::InterestOnly);

        assert_eq!(form.result(), Some(&result));
    }

    #[test]
    fn test_clear_resets_everything() {
        let time = test_time();
        let mut form = MortgageForm::builder()
            .amount("200000")
            .term("25")
            .rate("5")
            .repayment_type(RepaymentType::InterestOnly)
            .build()
            .unwrap();

        form.submit(&time).unwrap();
        form.clear(&time);

        assert!(form.result().is_none());
        assert!(form.formatted_result().is_none());
        assert_eq!(form.status(), FormStatus::Empty);
        assert_eq!(form.state().amount, "");
        assert_eq!(form.state().term, "");
        assert_eq!(form.state().rate, "");
        assert_eq!(form.state().repayment_type, RepaymentType::Repayment);

        let events = form.take_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::CalculationPerformed { .. }));
        assert!(matches!(events[1], Event::FormCleared { had_result: true, .. }));
        assert!(form.events().is_empty());
    }

    #[test]
    fn test_clear_uses_configured_default_type() {
        let time = test_time();
        let config = CalculatorConfig {
            default_repayment_type: RepaymentType::InterestOnly,
            ..CalculatorConfig::default()
        };
        let mut form = MortgageForm::new(config).unwrap();
        assert_eq!(form.state().repayment_type, RepaymentType::InterestOnly);

        form.set_repayment_type(RepaymentType::Repayment);
        form.clear(&time);
        assert_eq!(form.state().repayment_type, RepaymentType::InterestOnly);
    }

    #[test]
    fn test_negative_infinite_payment_displayed() {
        let time = test_time();
        let mut form = MortgageForm::builder()
            .amount("-1000")
            .term("0")
            .rate("5")
            .build()
            .unwrap();

        form.submit(&time).unwrap();

        let formatted = form.formatted_result().unwrap();
        assert_eq!(formatted.monthly_payment, "£-Infinity");
        assert_eq!(formatted.total_repayment, "£NaN");
    }

    #[test]
    fn test_system_time_wrappers() {
        let mut form = MortgageForm::builder()
            .amount("200000")
            .term("25")
            .rate("5")
            .build()
            .unwrap();

        let result = form.submit_now().unwrap();
        assert_eq!(form.result(), Some(&result));
        assert!(form.state().last_calculated_at.is_some());

        form.clear_now();
        assert!(form.result().is_none());
        assert!(form.state().last_cleared_at.is_some());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CalculatorConfig {
            display_decimal_places: 30,
            ..CalculatorConfig::default()
        };
        assert!(MortgageForm::new(config).is_err());
    }
}
