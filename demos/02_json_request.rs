/// json request - the request/response pair a web front end would send
use mortgage_calculator_rs::handle_json_request;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let requests = [
        r#"{"principal": 200000, "annualRatePercent": 5, "termYears": 25, "repaymentType": "repayment"}"#,
        r#"{"principal": 200000, "annualRatePercent": 5, "termYears": 25, "repaymentType": "interest-only"}"#,
        r#"{"principal": 200000, "annualRatePercent": 0, "termYears": 25, "repaymentType": "repayment"}"#,
    ];

    for request in requests {
        println!("request:  {request}");
        println!("response: {}\n", handle_json_request(request)?);
    }

    Ok(())
}
