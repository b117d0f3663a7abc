//! Command line definition for the jobs binary.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use kasboek_shared::types::{CompanyId, UserId};

/// Kasboek scheduled jobs
#[derive(Parser, Debug)]
#[command(name = "jobs", version, about = "Scheduled bookkeeping jobs for Kasboek", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// A job to run.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Materialize due recurring bookings, for one company or all of them
    Recurring {
        /// Only process this company
        #[arg(long)]
        company: Option<CompanyId>,

        /// Run as of this date (YYYY-MM-DD) instead of today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Book the company's unbooked mileage entries
    Mileage {
        #[arg(long)]
        company: CompanyId,

        /// User the bookings are created by
        #[arg(long)]
        actor: UserId,
    },

    /// Print the financial reports and tax advice for a period
    Report {
        #[arg(long)]
        company: CompanyId,

        /// First day of the period (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,

        /// Last day of the period (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
    },

    /// Create the standard chart of accounts for a company
    SetupChart {
        #[arg(long)]
        company: CompanyId,
    },
}
