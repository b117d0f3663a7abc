//! Report error types.

use chrono::NaiveDate;
use kasboek_shared::types::LedgerAccountId;
use thiserror::Error;

use crate::ledger::LedgerError;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A booking references an account outside the company's chart.
    #[error("Account not found: {0}")]
    AccountNotFound(LedgerAccountId),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Loading accounts or bookings failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
