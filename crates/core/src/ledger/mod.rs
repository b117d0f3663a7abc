//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Ledger account and booking types
//! - The chart of accounts directory with well-known codes
//! - The booking engine that validates postings against company ownership
//! - The store trait implemented by the persistence layer
//! - Error types for ledger operations

pub mod directory;
pub mod error;
pub mod service;
pub mod store;
pub mod types;

pub use directory::{
    AccountDirectory, BANK_ACCOUNT_CODE, CASH_ACCOUNT_CODE, STANDARD_CHART,
    TRAVEL_EXPENSE_ACCOUNT_CODE, TRAVEL_EXPENSE_ACCOUNT_NAME,
};
pub use error::LedgerError;
pub use service::BookingService;
pub use store::LedgerStore;
pub use types::{
    AccountSide, AccountType, Booking, BookingWithAccounts, CreateBookingInput, DateRange,
    LedgerAccount, NewBooking, NewLedgerAccount, ValidatedBooking,
};
