use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use engine::{Currency, Filter, Money, TransactionKind};

#[derive(Debug, Parser)]
#[command(name = "tally")]
#[command(about = "Record income and expenses and keep an eye on the balance")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override the directory holding the stored transactions.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
    /// Override the display currency (USD or EUR).
    #[arg(long, global = true)]
    pub currency: Option<Currency>,
    /// Override the log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new transaction.
    Add(AddArgs),
    /// Change an existing transaction; omitted fields keep their value.
    Edit(EditArgs),
    /// Delete a transaction after confirmation.
    Delete(DeleteArgs),
    /// Show transactions and totals.
    List(ListArgs),
    /// Show only the totals.
    Totals,
    /// Write transactions as CSV.
    Export(ExportArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub description: String,
    #[arg(allow_hyphen_values = true)]
    pub amount: Money,
    #[arg(long, short, default_value = "income")]
    pub kind: TransactionKind,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub id: i64,
    #[arg(long, short)]
    pub description: Option<String>,
    #[arg(long, short, allow_hyphen_values = true)]
    pub amount: Option<Money>,
    #[arg(long, short)]
    pub kind: Option<TransactionKind>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub id: i64,
    /// Skip the confirmation prompt.
    #[arg(long, short)]
    pub yes: bool,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long, short, default_value = "all")]
    pub filter: Filter,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Destination file; stdout when omitted.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    #[arg(long, short, default_value = "all")]
    pub filter: Filter,
}
