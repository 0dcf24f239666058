//! Replays a CSV of account operations for one customer and prints the
//! resulting accounts (and optionally their statements) as CSV.
//!
//! ```bash
//! ledger operations.csv --name "Ana Souza" --national-id 529.982.247-25 --born 1995-10-05
//! ```

use std::{fs::File, io, path::PathBuf};

use chrono::NaiveDate;
use clap::Parser;
use ledger::{
    batch,
    domain::{account::Account, bank::Bank, customer::Customer},
    error::Result,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ledger", author, version, about, long_about = None)]
struct Cli {
    /// CSV file with `type,account,amount` rows
    operations: PathBuf,

    /// Customer display name
    #[arg(long)]
    name: String,

    /// Customer national id, formatted or bare digits
    #[arg(long)]
    national_id: String,

    /// Customer date of birth (YYYY-MM-DD)
    #[arg(long)]
    born: NaiveDate,

    /// Also print every account statement
    #[arg(long)]
    statement: bool,

    /// Abort on the first rejected operation
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    // stdout carries the CSV output, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut bank = Bank::new();
    let customer = bank.add_customer(Customer::create(&cli.name, &cli.national_id, cli.born)?);

    let operations = ledger::csv::read(File::open(&cli.operations)?)?;
    let report = batch::apply(&mut bank, customer, operations, cli.strict)?;
    tracing::info!(
        applied = report.applied,
        rejected = report.rejected.len(),
        "replayed {}",
        cli.operations.display()
    );

    let accounts = bank.accounts_of(customer)?;
    let owner = |account: &Account| {
        account
            .owner()
            .and_then(|id| bank.customer(id))
            .map_or("", |owner| owner.national_id().as_str())
    };

    ledger::csv::write(accounts.iter().copied(), owner, io::stdout())?;

    if cli.statement {
        ledger::csv::write_statements(accounts.iter().copied(), io::stdout())?;
    }

    Ok(())
}
