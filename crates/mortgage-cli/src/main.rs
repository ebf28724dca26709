mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::LoanArgs;
use commands::table::TableArgs;

/// Fixed-rate mortgage payments and amortization tables
#[derive(Parser)]
#[command(
    name = "mortcalc",
    version,
    about = "Fixed-rate mortgage payments and amortization tables",
    long_about = "Computes the level monthly payment, loan totals and yearly \
                  amortization schedule for a fixed-rate mortgage with decimal \
                  precision, and pages through the schedule with search and sort."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment, total payment and total interest
    Payment(LoanArgs),
    /// Full calculation including the yearly amortization schedule
    Schedule(LoanArgs),
    /// One page of the schedule table, with search, sort and paging
    Table(TableArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Payment(args) => commands::loan::run_payment(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Table(args) => commands::table::run_table(args),
        Commands::Version => {
            println!("mortcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
