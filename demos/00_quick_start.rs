/// quick start - one calculation for each repayment type
use mortgage_calculator_rs::{calculate, format_amount, RepaymentType};

fn main() {
    for repayment_type in [RepaymentType::Repayment, RepaymentType::InterestOnly] {
        let result = calculate(200_000.0, 5.0, 25.0, repayment_type);

        println!("{repayment_type}:");
        println!("  monthly: {}", format_amount(result.monthly_payment, "£", 2));
        println!("  total:   {}", format_amount(result.total_repayment, "£", 2));
    }
}
