use clap::Args;
use serde_json::Value;

use mortgage_core::amortization;
use mortgage_core::table::{QueryCommand, QueryState, SortKey};

use crate::commands::loan::LoanArgs;
use crate::input;

/// Arguments for one page of the schedule table
#[derive(Args)]
pub struct TableArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Show only rows whose year, principal or interest text contains this
    #[arg(long)]
    pub search: Option<String>,

    /// Column to sort by: year, principal, interest, balance, cumulative.
    /// Repeat the same column to flip to descending.
    #[arg(long)]
    pub sort: Vec<String>,

    /// Rows per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Page to show (clamped to the available pages)
    #[arg(long)]
    pub page: Option<usize>,

    /// JSON or YAML list of table commands applied after the flags
    #[arg(long)]
    pub script: Option<String>,
}

impl TableArgs {
    /// Translate flags into the same commands a UI would send.
    fn commands(&self) -> Vec<QueryCommand> {
        let mut commands = Vec::new();
        if let Some(size) = self.page_size {
            commands.push(QueryCommand::SetPageSize(size));
        }
        if let Some(ref term) = self.search {
            commands.push(QueryCommand::SetSearchTerm(term.clone()));
        }
        for name in &self.sort {
            let key = name.parse::<SortKey>().unwrap_or_else(|e| {
                log::warn!("{e}; sorting by year");
                SortKey::Year
            });
            commands.push(QueryCommand::SetSort(key));
        }
        if let Some(page) = self.page {
            commands.push(QueryCommand::GoToPage(page));
        }
        commands
    }
}

pub fn run_table(args: TableArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.loan.resolve()?;
    let output = amortization::calculate_mortgage(&params)?;

    let mut commands = args.commands();
    if let Some(ref path) = args.script {
        let script: Vec<QueryCommand> = input::file::read_input(path)?;
        commands.extend(script);
    }

    let mut state = QueryState::from_schedule(output.result.schedule);
    let mut page = state.visible_page();
    for command in commands {
        log::debug!("table command: {command:?}");
        page = state.apply(command);
    }

    Ok(serde_json::to_value(page)?)
}
