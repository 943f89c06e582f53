use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use mortgage_calculator_rs::{
    handle_json_request, telemetry, CalculatorConfig, MortgageForm, ParseMode, RepaymentType,
    Result,
};

#[derive(Parser, Debug)]
#[command(
    name = "mortgage-calc",
    about = "Calculate monthly mortgage repayments and the total repaid over the term",
    version
)]
struct Cli {
    /// Log level or filter, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// JSON calculator configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate from form-style field values
    Calculate(CalculateArgs),
    /// Answer a JSON calculation request read from a file or stdin
    Request(RequestArgs),
}

#[derive(Args, Debug)]
struct CalculateArgs {
    /// Mortgage amount
    #[arg(long, default_value = "")]
    amount: String,
    /// Mortgage term in years
    #[arg(long, default_value = "")]
    term: String,
    /// Annual interest rate in percent
    #[arg(long, default_value = "")]
    rate: String,
    /// repayment or interest-only
    #[arg(long = "type")]
    repayment_type: Option<RepaymentType>,
    /// Reject non-numeric input instead of calculating NaN
    #[arg(long)]
    strict: bool,
    /// Print the form snapshot as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct RequestArgs {
    /// Request file, stdin when omitted
    file: Option<PathBuf>,
}

fn main() {
    if let Err(err) = try_run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level)?;

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Command::Calculate(args) => run_calculate(args, config),
        Command::Request(args) => run_request(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<CalculatorConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            CalculatorConfig::from_json_str(&text)
        }
        None => Ok(CalculatorConfig::default()),
    }
}

fn run_calculate(args: CalculateArgs, mut config: CalculatorConfig) -> Result<()> {
    if args.strict {
        config.parse_mode = ParseMode::Strict;
    }

    let mut builder = MortgageForm::builder()
        .config(config)
        .amount(args.amount)
        .term(args.term)
        .rate(args.rate);
    if let Some(repayment_type) = args.repayment_type {
        builder = builder.repayment_type(repayment_type);
    }

    let mut form = builder.build()?;
    form.submit_now()?;

    if args.json {
        println!("{}", form.json());
        return Ok(());
    }

    if let Some(formatted) = form.formatted_result() {
        println!("Your monthly repayments: {}", formatted.monthly_payment);
        println!("Total you'll repay over the term: {}", formatted.total_repayment);
    }
    Ok(())
}

fn run_request(args: RequestArgs) -> Result<()> {
    let body = match args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            body
        }
    };

    println!("{}", handle_json_request(&body)?);
    Ok(())
}
