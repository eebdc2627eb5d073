//! Banking Console CLI - customer lookups and reports from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List customers sorted by income, highest first
//! bc-cli customers list --sort-by income --order desc
//!
//! # Show one customer
//! bc-cli customers show 42
//!
//! # Deactivate a customer (no-op if already inactive)
//! bc-cli customers deactivate 42
//!
//! # Dashboard counts and table
//! bc-cli report dashboard
//!
//! # High-income report with totals
//! bc-cli report high-income
//! ```
//!
//! # Environment Variables
//!
//! Uses the console's configuration (`BANKING_API_BASE_URL`,
//! `BANKING_DEACTIVATE_METHOD`), including `.env` files.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use banking_console_core::{CustomerId, SortField, SortOrder};

mod commands;

#[derive(Parser)]
#[command(name = "bc-cli")]
#[command(author, version, about = "Banking Console CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up and manage customers
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
    /// Print aggregated reports
    Report {
        #[command(subcommand)]
        kind: ReportKind,
    },
}

#[derive(Subcommand)]
enum CustomerAction {
    /// List customers, sorted by the customer service
    List {
        /// Sort field (`name`, `income`, `id`, `email`)
        #[arg(long, default_value = "name")]
        sort_by: SortField,

        /// Sort order (`asc`, `desc`)
        #[arg(long, default_value = "asc")]
        order: SortOrder,
    },
    /// Show one customer
    Show {
        /// Customer ID
        id: CustomerId,
    },
    /// Deactivate a customer
    Deactivate {
        /// Customer ID
        id: CustomerId,
    },
}

#[derive(Subcommand)]
enum ReportKind {
    /// Segment counts and the sorted customer table
    Dashboard {
        /// Sort field (`name`, `income`, `id`, `email`)
        #[arg(long, default_value = "name")]
        sort_by: SortField,

        /// Sort order (`asc`, `desc`)
        #[arg(long, default_value = "asc")]
        order: SortOrder,
    },
    /// High-income customers with count, total, and average income
    HighIncome,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let client = commands::client()?;

    match cli.command {
        Commands::Customers { action } => match action {
            CustomerAction::List { sort_by, order } => {
                commands::customers::list(&client, sort_by, order).await?;
            }
            CustomerAction::Show { id } => commands::customers::show(&client, id).await?,
            CustomerAction::Deactivate { id } => {
                commands::customers::deactivate(&client, id).await?;
            }
        },
        Commands::Report { kind } => match kind {
            ReportKind::Dashboard { sort_by, order } => {
                commands::report::dashboard(&client, sort_by, order).await?;
            }
            ReportKind::HighIncome => commands::report::high_income(&client).await?,
        },
    }
    Ok(())
}
