//! Persistence seam for recurring schedules.

use std::future::Future;

use chrono::NaiveDate;
use kasboek_shared::types::{CompanyId, RecurringBookingId};

use super::types::{CreateRecurringBookingInput, RecurringBooking};
use crate::ledger::{Booking, LedgerError, LedgerStore, NewBooking};

/// Repository trait for recurring bookings.
pub trait RecurringStore: LedgerStore {
    /// Schedules that are active and inside their start/end window on `today`.
    fn active_recurring_bookings(
        &self,
        company_id: CompanyId,
        today: NaiveDate,
    ) -> impl Future<Output = Result<Vec<RecurringBooking>, LedgerError>> + Send;

    /// All schedules of the company, newest first.
    fn recurring_bookings(
        &self,
        company_id: CompanyId,
    ) -> impl Future<Output = Result<Vec<RecurringBooking>, LedgerError>> + Send;

    /// Stores a new, active schedule.
    fn insert_recurring_booking(
        &self,
        input: CreateRecurringBookingInput,
    ) -> impl Future<Output = Result<RecurringBooking, LedgerError>> + Send;

    /// Activates or deactivates a schedule.
    ///
    /// Fails with `LedgerError::RecurringBookingNotFound` when the schedule
    /// does not exist for the company.
    fn set_recurring_active(
        &self,
        company_id: CompanyId,
        id: RecurringBookingId,
        is_active: bool,
    ) -> impl Future<Output = Result<RecurringBooking, LedgerError>> + Send;

    /// Deletes a schedule. Bookings it produced are kept.
    fn delete_recurring_booking(
        &self,
        company_id: CompanyId,
        id: RecurringBookingId,
    ) -> impl Future<Output = Result<(), LedgerError>> + Send;

    /// Inserts the booking, sets `last_processed = today` and claims the
    /// schedule's month in one unit of work.
    ///
    /// Fails with `LedgerError::AlreadyProcessed` when the month was already
    /// claimed by another run; nothing is written in that case.
    fn record_recurring_booking(
        &self,
        company_id: CompanyId,
        id: RecurringBookingId,
        today: NaiveDate,
        booking: &NewBooking,
    ) -> impl Future<Output = Result<Booking, LedgerError>> + Send;
}
