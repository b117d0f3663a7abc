//! In-memory store used by the core's unit tests.

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use kasboek_shared::types::{
    BookingId, CompanyId, LedgerAccountId, MileageEntryId, RecurringBookingId,
};

use crate::ledger::{
    Booking, DateRange, LedgerAccount, LedgerError, LedgerStore, NewBooking, NewLedgerAccount,
};
use crate::mileage::{MileageEntry, MileageStore, NewMileageEntry};
use crate::recurring::{
    period_key, CreateRecurringBookingInput, RecurringBooking, RecurringStore,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[derive(Default)]
struct State {
    accounts: Vec<LedgerAccount>,
    bookings: Vec<Booking>,
    mileage: Vec<MileageEntry>,
    recurring: Vec<RecurringBooking>,
    runs: HashSet<(RecurringBookingId, String)>,
    failing_mileage: HashSet<MileageEntryId>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn booking_count(&self) -> usize {
        self.state.lock().unwrap().bookings.len()
    }

    /// Makes booking this mileage entry fail with a database error.
    pub fn fail_mileage_booking(&self, entry_id: MileageEntryId) {
        self.state.lock().unwrap().failing_mileage.insert(entry_id);
    }

    /// Claims a schedule's month without booking, as a concurrent run would.
    pub fn claim_recurring_period(&self, id: RecurringBookingId, today: NaiveDate) {
        self.state
            .lock()
            .unwrap()
            .runs
            .insert((id, period_key(today)));
    }
}

fn to_booking(booking: &NewBooking) -> Booking {
    Booking {
        id: BookingId::new(),
        company_id: booking.company_id,
        date: booking.date,
        description: booking.description.clone(),
        debit_account_id: booking.debit_account_id,
        credit_account_id: booking.credit_account_id,
        amount: booking.amount,
        vat_code: booking.vat_code.clone(),
        created_by: booking.created_by,
        created_at: Utc::now(),
    }
}

impl LedgerStore for MemoryStore {
    async fn find_account(
        &self,
        company_id: CompanyId,
        account_id: LedgerAccountId,
    ) -> Result<Option<LedgerAccount>, LedgerError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .accounts
            .iter()
            .find(|a| a.id == account_id && a.company_id == company_id)
            .cloned())
    }

    async fn find_account_by_code(
        &self,
        company_id: CompanyId,
        code: &str,
    ) -> Result<Option<LedgerAccount>, LedgerError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .accounts
            .iter()
            .find(|a| a.code == code && a.company_id == company_id)
            .cloned())
    }

    async fn list_accounts(&self, company_id: CompanyId) -> Result<Vec<LedgerAccount>, LedgerError> {
        let mut accounts: Vec<_> = self
            .state
            .lock()
            .unwrap()
            .accounts
            .iter()
            .filter(|a| a.company_id == company_id)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(accounts)
    }

    async fn create_account(&self, account: NewLedgerAccount) -> Result<LedgerAccount, LedgerError> {
        let mut state = self.state.lock().unwrap();
        if let Some(existing) = state
            .accounts
            .iter()
            .find(|a| a.code == account.code && a.company_id == account.company_id)
        {
            return Ok(existing.clone());
        }
        let created = LedgerAccount {
            id: LedgerAccountId::new(),
            company_id: account.company_id,
            code: account.code,
            name: account.name,
            account_type: account.account_type,
        };
        state.accounts.push(created.clone());
        Ok(created)
    }

    async fn insert_booking(&self, booking: &NewBooking) -> Result<Booking, LedgerError> {
        let stored = to_booking(booking);
        self.state.lock().unwrap().bookings.push(stored.clone());
        Ok(stored)
    }

    async fn list_bookings(
        &self,
        company_id: CompanyId,
        range: DateRange,
    ) -> Result<Vec<Booking>, LedgerError> {
        let mut bookings: Vec<_> = self
            .state
            .lock()
            .unwrap()
            .bookings
            .iter()
            .filter(|b| b.company_id == company_id && range.contains(b.date))
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.date);
        Ok(bookings)
    }
}

impl MileageStore for MemoryStore {
    async fn unbooked_mileage_entries(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<MileageEntry>, LedgerError> {
        let mut entries: Vec<_> = self
            .state
            .lock()
            .unwrap()
            .mileage
            .iter()
            .filter(|e| e.company_id == company_id && !e.is_booked)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }

    async fn mileage_entries(&self, company_id: CompanyId) -> Result<Vec<MileageEntry>, LedgerError> {
        let mut entries: Vec<_> = self
            .state
            .lock()
            .unwrap()
            .mileage
            .iter()
            .rev()
            .filter(|e| e.company_id == company_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }

    async fn insert_mileage_entry(&self, entry: NewMileageEntry) -> Result<MileageEntry, LedgerError> {
        let stored = MileageEntry {
            id: MileageEntryId::new(),
            company_id: entry.company_id,
            date: entry.date,
            kilometers: entry.kilometers,
            from_location: entry.from_location,
            to_location: entry.to_location,
            purpose: entry.purpose,
            rate_per_km: entry.rate_per_km,
            total_amount: entry.total_amount,
            is_booked: false,
            booking_id: None,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().mileage.push(stored.clone());
        Ok(stored)
    }

    async fn book_mileage_entry(
        &self,
        company_id: CompanyId,
        entry_id: MileageEntryId,
        booking: &NewBooking,
    ) -> Result<Booking, LedgerError> {
        let mut state = self.state.lock().unwrap();
        if state.failing_mileage.contains(&entry_id) {
            return Err(LedgerError::Database("connection reset".to_string()));
        }
        let stored = to_booking(booking);
        let entry = state
            .mileage
            .iter_mut()
            .find(|e| e.id == entry_id && e.company_id == company_id)
            .ok_or(LedgerError::MileageEntryNotFound(entry_id))?;
        if entry.is_booked {
            return Err(LedgerError::AlreadyBooked(entry_id));
        }
        entry.is_booked = true;
        entry.booking_id = Some(stored.id);
        state.bookings.push(stored.clone());
        Ok(stored)
    }
}

impl RecurringStore for MemoryStore {
    async fn active_recurring_bookings(
        &self,
        company_id: CompanyId,
        today: NaiveDate,
    ) -> Result<Vec<RecurringBooking>, LedgerError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .recurring
            .iter()
            .filter(|r| r.company_id == company_id && r.is_active_on(today))
            .cloned()
            .collect())
    }

    async fn recurring_bookings(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<RecurringBooking>, LedgerError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .recurring
            .iter()
            .rev()
            .filter(|r| r.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn insert_recurring_booking(
        &self,
        input: CreateRecurringBookingInput,
    ) -> Result<RecurringBooking, LedgerError> {
        let stored = RecurringBooking {
            id: RecurringBookingId::new(),
            company_id: input.company_id,
            description: input.description,
            debit_account_id: input.debit_account_id,
            credit_account_id: input.credit_account_id,
            amount: input.amount,
            frequency: input.frequency,
            day_of_month: input.day_of_month,
            start_date: input.start_date,
            end_date: input.end_date,
            vat_code: input.vat_code,
            created_by: input.created_by,
            is_active: true,
            last_processed: None,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().recurring.push(stored.clone());
        Ok(stored)
    }

    async fn set_recurring_active(
        &self,
        company_id: CompanyId,
        id: RecurringBookingId,
        is_active: bool,
    ) -> Result<RecurringBooking, LedgerError> {
        let mut state = self.state.lock().unwrap();
        let recurring = state
            .recurring
            .iter_mut()
            .find(|r| r.id == id && r.company_id == company_id)
            .ok_or(LedgerError::RecurringBookingNotFound(id))?;
        recurring.is_active = is_active;
        Ok(recurring.clone())
    }

    async fn delete_recurring_booking(
        &self,
        company_id: CompanyId,
        id: RecurringBookingId,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.lock().unwrap();
        let before = state.recurring.len();
        state
            .recurring
            .retain(|r| !(r.id == id && r.company_id == company_id));
        if state.recurring.len() == before {
            return Err(LedgerError::RecurringBookingNotFound(id));
        }
        Ok(())
    }

    async fn record_recurring_booking(
        &self,
        company_id: CompanyId,
        id: RecurringBookingId,
        today: NaiveDate,
        booking: &NewBooking,
    ) -> Result<Booking, LedgerError> {
        let mut state = self.state.lock().unwrap();
        let period = period_key(today);
        if state.runs.contains(&(id, period.clone())) {
            return Err(LedgerError::AlreadyProcessed {
                recurring_id: id,
                period,
            });
        }
        let recurring = state
            .recurring
            .iter_mut()
            .find(|r| r.id == id && r.company_id == company_id)
            .ok_or(LedgerError::RecurringBookingNotFound(id))?;
        recurring.last_processed = Some(today);
        let stored = to_booking(booking);
        state.runs.insert((id, period));
        state.bookings.push(stored.clone());
        Ok(stored)
    }
}
