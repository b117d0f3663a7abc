//! PostgreSQL implementation of the core store traits.
//!
//! `PgStore` bundles the repositories and converts their rows into the
//! domain types the services work with.

use chrono::{NaiveDate, Utc};
use kasboek_core::ledger::{
    Booking, DateRange, LedgerAccount, LedgerError, LedgerStore, NewBooking, NewLedgerAccount,
};
use kasboek_core::mileage::{MileageEntry, MileageStore, NewMileageEntry};
use kasboek_core::recurring::{CreateRecurringBookingInput, RecurringBooking, RecurringStore};
use kasboek_shared::types::{
    BookingId, CompanyId, LedgerAccountId, MileageEntryId, RecurringBookingId, UserId,
};
use sea_orm::DatabaseConnection;

use super::account::AccountRepository;
use super::booking::BookingRepository;
use super::error::StoreError;
use super::mileage::MileageRepository;
use super::recurring::RecurringRepository;
use crate::entities::{bookings, ledger_accounts, mileage_entries, recurring_bookings};

/// Store backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgStore {
    accounts: AccountRepository,
    bookings: BookingRepository,
    mileage: MileageRepository,
    recurring: RecurringRepository,
}

impl PgStore {
    /// Creates a store on the given connection pool.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            accounts: AccountRepository::new(db.clone()),
            bookings: BookingRepository::new(db.clone()),
            mileage: MileageRepository::new(db.clone()),
            recurring: RecurringRepository::new(db),
        }
    }
}

impl From<ledger_accounts::Model> for LedgerAccount {
    fn from(model: ledger_accounts::Model) -> Self {
        Self {
            id: LedgerAccountId::from_uuid(model.id),
            company_id: CompanyId::from_uuid(model.company_id),
            code: model.code,
            name: model.name,
            account_type: model.account_type.into(),
        }
    }
}

impl From<bookings::Model> for Booking {
    fn from(model: bookings::Model) -> Self {
        Self {
            id: BookingId::from_uuid(model.id),
            company_id: CompanyId::from_uuid(model.company_id),
            date: model.date,
            description: model.description,
            debit_account_id: LedgerAccountId::from_uuid(model.debit_account_id),
            credit_account_id: LedgerAccountId::from_uuid(model.credit_account_id),
            amount: model.amount,
            vat_code: model.vat_code,
            created_by: UserId::from_uuid(model.created_by),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<mileage_entries::Model> for MileageEntry {
    fn from(model: mileage_entries::Model) -> Self {
        Self {
            id: MileageEntryId::from_uuid(model.id),
            company_id: CompanyId::from_uuid(model.company_id),
            date: model.date,
            kilometers: model.kilometers,
            from_location: model.from_location,
            to_location: model.to_location,
            purpose: model.purpose,
            rate_per_km: model.rate_per_km,
            total_amount: model.total_amount,
            is_booked: model.is_booked,
            booking_id: model.booking_id.map(BookingId::from_uuid),
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl TryFrom<recurring_bookings::Model> for RecurringBooking {
    type Error = StoreError;

    fn try_from(model: recurring_bookings::Model) -> Result<Self, Self::Error> {
        let day_of_month =
            u32::try_from(model.day_of_month).map_err(|_| StoreError::InvalidColumn {
                table: "recurring_bookings",
                column: "day_of_month",
                value: model.day_of_month.to_string(),
            })?;

        Ok(Self {
            id: RecurringBookingId::from_uuid(model.id),
            company_id: CompanyId::from_uuid(model.company_id),
            description: model.description,
            debit_account_id: LedgerAccountId::from_uuid(model.debit_account_id),
            credit_account_id: LedgerAccountId::from_uuid(model.credit_account_id),
            amount: model.amount,
            frequency: model.frequency.into(),
            day_of_month,
            start_date: model.start_date,
            end_date: model.end_date,
            vat_code: model.vat_code,
            created_by: UserId::from_uuid(model.created_by),
            is_active: model.is_active,
            last_processed: model.last_processed,
            created_at: model.created_at.with_timezone(&Utc),
        })
    }
}

fn into_schedules(
    models: Vec<recurring_bookings::Model>,
) -> Result<Vec<RecurringBooking>, StoreError> {
    models.into_iter().map(RecurringBooking::try_from).collect()
}

impl LedgerStore for PgStore {
    async fn find_account(
        &self,
        company_id: CompanyId,
        account_id: LedgerAccountId,
    ) -> Result<Option<LedgerAccount>, LedgerError> {
        let account = self
            .accounts
            .find(company_id.into_inner(), account_id.into_inner())
            .await?;
        Ok(account.map(LedgerAccount::from))
    }

    async fn find_account_by_code(
        &self,
        company_id: CompanyId,
        code: &str,
    ) -> Result<Option<LedgerAccount>, LedgerError> {
        let account = self
            .accounts
            .find_by_code(company_id.into_inner(), code)
            .await?;
        Ok(account.map(LedgerAccount::from))
    }

    async fn list_accounts(&self, company_id: CompanyId) -> Result<Vec<LedgerAccount>, LedgerError> {
        let accounts = self.accounts.list(company_id.into_inner()).await?;
        Ok(accounts.into_iter().map(LedgerAccount::from).collect())
    }

    async fn create_account(&self, account: NewLedgerAccount) -> Result<LedgerAccount, LedgerError> {
        let stored = self
            .accounts
            .create(
                account.company_id.into_inner(),
                &account.code,
                &account.name,
                account.account_type.into(),
            )
            .await?;
        Ok(stored.into())
    }

    async fn insert_booking(&self, booking: &NewBooking) -> Result<Booking, LedgerError> {
        Ok(self.bookings.insert(booking).await?.into())
    }

    async fn list_bookings(
        &self,
        company_id: CompanyId,
        range: DateRange,
    ) -> Result<Vec<Booking>, LedgerError> {
        let bookings = self.bookings.list(company_id.into_inner(), range).await?;
        Ok(bookings.into_iter().map(Booking::from).collect())
    }
}

impl MileageStore for PgStore {
    async fn unbooked_mileage_entries(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<MileageEntry>, LedgerError> {
        let entries = self.mileage.unbooked(company_id.into_inner()).await?;
        Ok(entries.into_iter().map(MileageEntry::from).collect())
    }

    async fn mileage_entries(&self, company_id: CompanyId) -> Result<Vec<MileageEntry>, LedgerError> {
        let entries = self.mileage.list(company_id.into_inner()).await?;
        Ok(entries.into_iter().map(MileageEntry::from).collect())
    }

    async fn insert_mileage_entry(
        &self,
        entry: NewMileageEntry,
    ) -> Result<MileageEntry, LedgerError> {
        Ok(self.mileage.insert(&entry).await?.into())
    }

    async fn book_mileage_entry(
        &self,
        company_id: CompanyId,
        entry_id: MileageEntryId,
        booking: &NewBooking,
    ) -> Result<Booking, LedgerError> {
        let stored = self
            .mileage
            .book(company_id.into_inner(), entry_id.into_inner(), booking)
            .await?;
        Ok(stored.into())
    }
}

impl RecurringStore for PgStore {
    async fn active_recurring_bookings(
        &self,
        company_id: CompanyId,
        today: NaiveDate,
    ) -> Result<Vec<RecurringBooking>, LedgerError> {
        let models = self.recurring.active(company_id.into_inner(), today).await?;
        Ok(into_schedules(models)?)
    }

    async fn recurring_bookings(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<RecurringBooking>, LedgerError> {
        let models = self.recurring.list(company_id.into_inner()).await?;
        Ok(into_schedules(models)?)
    }

    async fn insert_recurring_booking(
        &self,
        input: CreateRecurringBookingInput,
    ) -> Result<RecurringBooking, LedgerError> {
        let model = self.recurring.insert(&input).await?;
        Ok(RecurringBooking::try_from(model)?)
    }

    async fn set_recurring_active(
        &self,
        company_id: CompanyId,
        id: RecurringBookingId,
        is_active: bool,
    ) -> Result<RecurringBooking, LedgerError> {
        let model = self
            .recurring
            .set_active(company_id.into_inner(), id.into_inner(), is_active)
            .await?;
        Ok(RecurringBooking::try_from(model)?)
    }

    async fn delete_recurring_booking(
        &self,
        company_id: CompanyId,
        id: RecurringBookingId,
    ) -> Result<(), LedgerError> {
        Ok(self
            .recurring
            .delete(company_id.into_inner(), id.into_inner())
            .await?)
    }

    async fn record_recurring_booking(
        &self,
        company_id: CompanyId,
        id: RecurringBookingId,
        today: NaiveDate,
        booking: &NewBooking,
    ) -> Result<Booking, LedgerError> {
        let stored = self
            .recurring
            .record_run(company_id.into_inner(), id.into_inner(), today, booking)
            .await?;
        Ok(stored.into())
    }
}
