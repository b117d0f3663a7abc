//! Error type shared by the repositories.

use kasboek_core::ledger::LedgerError;
use sea_orm::DbErr;

/// Error types for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A stored column holds a value the domain cannot represent.
    #[error("Invalid {column} in {table}: {value}")]
    InvalidColumn {
        /// Table name.
        table: &'static str,
        /// Column name.
        column: &'static str,
        /// Offending value.
        value: String,
    },

    /// A domain rule rejected the write (already booked, not found, ...).
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Ledger(inner) => inner,
            StoreError::Database(db) => Self::Database(db.to_string()),
            invalid @ StoreError::InvalidColumn { .. } => Self::Database(invalid.to_string()),
        }
    }
}
