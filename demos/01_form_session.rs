/// form session - submit, edit, resubmit and clear with test time
use chrono::{Duration, TimeZone, Utc};
use mortgage_calculator_rs::{MortgageForm, RepaymentType, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let mut form = MortgageForm::builder()
        .amount("250000")
        .term("30")
        .rate("4.5")
        .build()?;

    form.submit(&time)?;
    println!("stage 1: repayment");
    println!("{}\n", form.json());

    controller.advance(Duration::minutes(2));
    form.set_repayment_type(RepaymentType::InterestOnly);
    form.submit(&time)?;
    println!("stage 2: interest only");
    println!("{}\n", form.json());

    controller.advance(Duration::minutes(1));
    form.clear(&time);
    println!("stage 3: cleared");
    println!("{}\n", form.json());

    for event in form.take_events() {
        println!("{event:?}");
    }

    Ok(())
}
