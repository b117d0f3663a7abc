//! Ledger error types.
//!
//! Covers booking validation, chart-of-accounts configuration problems,
//! source-entity state errors raised by the processors, and store failures.

use kasboek_shared::types::{LedgerAccountId, MileageEntryId, RecurringBookingId, UserId};
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::AccountSide;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Referenced account does not exist or belongs to another company.
    #[error("{side} account not found: {account_id}")]
    AccountNotFound {
        /// Which side of the booking failed to resolve.
        side: AccountSide,
        /// The account that was requested.
        account_id: LedgerAccountId,
    },

    /// Booking amount must be strictly positive.
    #[error("Booking amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Input failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========== Configuration Errors ==========
    /// A required well-known account is missing from the chart of accounts.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The acting user has no active subscription.
    #[error("No active subscription for user {0}")]
    SubscriptionInactive(UserId),

    // ========== Source Entity Errors ==========
    /// Mileage entry not found.
    #[error("Mileage entry not found: {0}")]
    MileageEntryNotFound(MileageEntryId),

    /// Mileage entry has already been booked.
    #[error("Mileage entry {0} is already booked")]
    AlreadyBooked(MileageEntryId),

    /// Recurring booking not found.
    #[error("Recurring booking not found: {0}")]
    RecurringBookingNotFound(RecurringBookingId),

    /// Recurring booking already materialized for this period.
    #[error("Recurring booking {recurring_id} already processed for {period}")]
    AlreadyProcessed {
        /// The schedule.
        recurring_id: RecurringBookingId,
        /// Calendar month key (YYYY-MM).
        period: String,
    },

    // ========== Database Errors ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Returns the error code for callers that surface errors to users.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound { .. } => "ACCOUNT_NOT_FOUND",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::SubscriptionInactive(_) => "SUBSCRIPTION_INACTIVE",
            Self::MileageEntryNotFound(_) => "MILEAGE_ENTRY_NOT_FOUND",
            Self::AlreadyBooked(_) => "ALREADY_BOOKED",
            Self::RecurringBookingNotFound(_) => "RECURRING_BOOKING_NOT_FOUND",
            Self::AlreadyProcessed { .. } => "ALREADY_PROCESSED",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns true for "entity does not exist" errors.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::AccountNotFound { .. }
                | Self::MileageEntryNotFound(_)
                | Self::RecurringBookingNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_account_not_found_names_the_side() {
        let id = LedgerAccountId::from_uuid(Uuid::nil());
        let debit = LedgerError::AccountNotFound {
            side: AccountSide::Debit,
            account_id: id,
        };
        let credit = LedgerError::AccountNotFound {
            side: AccountSide::Credit,
            account_id: id,
        };
        assert_eq!(
            debit.to_string(),
            "Debit account not found: 00000000-0000-0000-0000-000000000000"
        );
        assert!(credit.to_string().starts_with("Credit account not found"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::Configuration("no bank or cash account".into()).error_code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(
            LedgerError::NonPositiveAmount(Decimal::ZERO).error_code(),
            "NON_POSITIVE_AMOUNT"
        );
        assert_eq!(
            LedgerError::Database("down".into()).error_code(),
            "DATABASE_ERROR"
        );
    }

    #[test]
    fn test_not_found_classification() {
        assert!(LedgerError::MileageEntryNotFound(MileageEntryId::new()).is_not_found());
        assert!(!LedgerError::Configuration(String::new()).is_not_found());
    }

    #[test]
    fn test_configuration_display() {
        assert_eq!(
            LedgerError::Configuration("no bank or cash account".into()).to_string(),
            "Configuration error: no bank or cash account"
        );
    }
}
