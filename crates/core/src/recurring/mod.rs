//! Recurring bookings: schedules that materialize into ledger postings.

pub mod schedule;
pub mod service;
pub mod store;
pub mod types;

pub use schedule::period_key;
pub use service::RecurringService;
pub use store::RecurringStore;
pub use types::{
    CreateRecurringBookingInput, Frequency, ProcessedRecurring, RecurringBooking,
    RecurringBookingWithAccounts, RecurringItemError, RecurringRunReport,
};
