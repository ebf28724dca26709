use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::amortization;
use mortgage_core::LoanParameters;

use crate::input;

/// Loan parameters shared by every calculation command
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount (default 300000)
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent, e.g. 4.5 (default 4.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years (default 30)
    #[arg(long)]
    pub term: Option<u32>,
}

impl LoanArgs {
    /// Input file first, then piped JSON, then flags over the calculator defaults.
    pub fn resolve(&self) -> Result<LoanParameters, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::file::read_input(path);
        }
        if let Some(data) = input::stdin::read_stdin()? {
            return Ok(serde_json::from_value(data)?);
        }

        let defaults = LoanParameters::default();
        Ok(LoanParameters {
            principal: self.principal.unwrap_or(defaults.principal),
            annual_rate_percent: self.rate.unwrap_or(defaults.annual_rate_percent),
            term_years: self.term.unwrap_or(defaults.term_years),
        })
    }
}

pub fn run_payment(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.resolve()?;
    let output = amortization::calculate_mortgage(&params)?;

    // Same envelope as `schedule`, without the yearly rows
    let mut value = serde_json::to_value(&output)?;
    if let Some(result) = value.get_mut("result") {
        *result = serde_json::to_value(&output.result.summary)?;
    }
    Ok(value)
}

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.resolve()?;
    let output = amortization::calculate_mortgage(&params)?;
    Ok(serde_json::to_value(output)?)
}
