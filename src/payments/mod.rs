pub mod amortization;

pub use amortization::{calculate, monthly_rate, number_of_payments, AmortizationCalculator};
