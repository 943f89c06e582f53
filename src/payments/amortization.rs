use tracing::trace;

use crate::types::{CalculationResult, LoanInput, RepaymentType};

/// months per year, used for both rate and term conversion
const MONTHS_PER_YEAR: f64 = 12.0;

/// amortization calculator
///
/// Closed-form monthly payment and total repayment for a fixed-rate
/// mortgage. No validation is done here; non-numeric input arrives as NaN
/// and leaves as NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmortizationCalculator {
    method: RepaymentType,
}

impl AmortizationCalculator {
    pub fn new(method: RepaymentType) -> Self {
        Self { method }
    }

    /// calculate monthly payment and total repayment
    pub fn calculate(
        &self,
        principal: f64,
        annual_rate_percent: f64,
        term_years: f64,
    ) -> CalculationResult {
        let rate = monthly_rate(annual_rate_percent);
        let payments = number_of_payments(term_years);

        let result = match self.method {
            RepaymentType::Repayment => Self::calculate_repayment(principal, rate, payments),
            RepaymentType::InterestOnly => Self::calculate_interest_only(principal, rate, payments),
        };

        trace!(
            method = %self.method,
            principal,
            monthly_rate = rate,
            payments,
            monthly_payment = result.monthly_payment,
            "amortization calculated"
        );

        result
    }

    /// calculate from a prepared loan input
    pub fn calculate_input(input: &LoanInput) -> CalculationResult {
        Self::new(input.repayment_type).calculate(
            input.principal,
            input.annual_interest_rate_percent,
            input.term_years,
        )
    }

    /// equal monthly installments
    ///
    /// A zero rate or zero term degenerates (0/0 or x/0) and is returned as is.
    fn calculate_repayment(principal: f64, rate: f64, payments: f64) -> CalculationResult {
        // P * r * (1 + r)^n / ((1 + r)^n - 1)
        let compound = (1.0 + rate).powf(payments);
        let monthly_payment = principal * rate * compound / (compound - 1.0);

        CalculationResult {
            monthly_payment,
            total_repayment: monthly_payment * payments,
        }
    }

    /// interest each month, principal returned at term end
    fn calculate_interest_only(principal: f64, rate: f64, payments: f64) -> CalculationResult {
        let monthly_payment = principal * rate;

        CalculationResult {
            monthly_payment,
            total_repayment: monthly_payment * payments + principal,
        }
    }
}

/// calculate a mortgage repayment
pub fn calculate(
    principal: f64,
    annual_rate_percent: f64,
    term_years: f64,
    repayment_type: RepaymentType,
) -> CalculationResult {
    AmortizationCalculator::new(repayment_type).calculate(principal, annual_rate_percent, term_years)
}

/// monthly decimal rate from an annual percentage
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / MONTHS_PER_YEAR
}

/// number of monthly payments over the term, fractional terms allowed
pub fn number_of_payments(term_years: f64) -> f64 {
    term_years * MONTHS_PER_YEAR
}
