//! Persistence seam for the mileage log.

use std::future::Future;

use kasboek_shared::types::{CompanyId, MileageEntryId};

use super::types::{MileageEntry, NewMileageEntry};
use crate::ledger::{Booking, LedgerError, LedgerStore, NewBooking};

/// Repository trait for mileage entries.
pub trait MileageStore: LedgerStore {
    /// Unbooked entries of the company, oldest trip first.
    fn unbooked_mileage_entries(
        &self,
        company_id: CompanyId,
    ) -> impl Future<Output = Result<Vec<MileageEntry>, LedgerError>> + Send;

    /// All entries of the company, newest trip first.
    fn mileage_entries(
        &self,
        company_id: CompanyId,
    ) -> impl Future<Output = Result<Vec<MileageEntry>, LedgerError>> + Send;

    /// Stores a new, unbooked entry.
    fn insert_mileage_entry(
        &self,
        entry: NewMileageEntry,
    ) -> impl Future<Output = Result<MileageEntry, LedgerError>> + Send;

    /// Inserts the booking and marks the entry as booked in one unit of work.
    ///
    /// Fails with `LedgerError::AlreadyBooked` when another run booked the
    /// entry first; nothing is written in that case.
    fn book_mileage_entry(
        &self,
        company_id: CompanyId,
        entry_id: MileageEntryId,
        booking: &NewBooking,
    ) -> impl Future<Output = Result<Booking, LedgerError>> + Send;
}
