//! Persistence seam for the ledger.
//!
//! The db crate implements this trait against PostgreSQL; the core only sees
//! plain domain types.

use std::future::Future;

use kasboek_shared::types::{CompanyId, LedgerAccountId};

use super::error::LedgerError;
use super::types::{Booking, DateRange, LedgerAccount, NewBooking, NewLedgerAccount};

/// Repository trait for accounts and bookings.
pub trait LedgerStore: Send + Sync {
    /// Finds an account by ID, scoped to the company.
    ///
    /// Returns `None` when the account does not exist or belongs to another company.
    fn find_account(
        &self,
        company_id: CompanyId,
        account_id: LedgerAccountId,
    ) -> impl Future<Output = Result<Option<LedgerAccount>, LedgerError>> + Send;

    /// Finds an account by its code within the company.
    fn find_account_by_code(
        &self,
        company_id: CompanyId,
        code: &str,
    ) -> impl Future<Output = Result<Option<LedgerAccount>, LedgerError>> + Send;

    /// Lists the company's chart of accounts ordered by code.
    fn list_accounts(
        &self,
        company_id: CompanyId,
    ) -> impl Future<Output = Result<Vec<LedgerAccount>, LedgerError>> + Send;

    /// Creates an account.
    ///
    /// When an account with the same `(company_id, code)` already exists the
    /// existing record is returned instead.
    fn create_account(
        &self,
        account: NewLedgerAccount,
    ) -> impl Future<Output = Result<LedgerAccount, LedgerError>> + Send;

    /// Persists a validated booking.
    fn insert_booking(
        &self,
        booking: &NewBooking,
    ) -> impl Future<Output = Result<Booking, LedgerError>> + Send;

    /// Lists bookings within the window ordered by date, then creation time.
    fn list_bookings(
        &self,
        company_id: CompanyId,
        range: DateRange,
    ) -> impl Future<Output = Result<Vec<Booking>, LedgerError>> + Send;
}
