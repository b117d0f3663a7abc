//! Mileage booking processor.

use std::sync::Arc;

use kasboek_shared::types::{CompanyId, LedgerAccountId, UserId};
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::store::MileageStore;
use super::types::{
    mileage_total, BookedMileage, MileageBookingReport, MileageEntry, MileageItemError,
    NewMileageEntry, RecordMileageInput,
};
use crate::batch::{process_sequentially, ItemOutcome};
use crate::ledger::{AccountDirectory, BookingService, CreateBookingInput, LedgerError};
use crate::policy::SubscriptionPolicy;

/// Turns logged trips into travel expense bookings.
pub struct MileageService<S: MileageStore> {
    store: Arc<S>,
    bookings: BookingService<S>,
    accounts: AccountDirectory<S>,
    policy: Arc<dyn SubscriptionPolicy>,
    default_rate: Decimal,
}

impl<S: MileageStore> MileageService<S> {
    /// Creates a new mileage service with the statutory default rate of 0.21/km.
    #[must_use]
    pub fn new(store: Arc<S>, policy: Arc<dyn SubscriptionPolicy>) -> Self {
        Self {
            bookings: BookingService::new(Arc::clone(&store)),
            accounts: AccountDirectory::new(Arc::clone(&store)),
            store,
            policy,
            default_rate: Decimal::new(21, 2),
        }
    }

    /// Overrides the rate used for trips recorded without one.
    #[must_use]
    pub fn with_default_rate(mut self, rate: Decimal) -> Self {
        self.default_rate = rate;
        self
    }

    /// Books every unbooked trip of the company, oldest first.
    ///
    /// Each trip is booked debit 4600 Reiskosten, credit bank (1000) or cash
    /// (1010). A failing trip is reported in `errors` and stays unbooked;
    /// the remaining trips are still processed.
    ///
    /// # Errors
    ///
    /// Fails the whole run with `LedgerError::SubscriptionInactive` when the
    /// actor has no subscription, `LedgerError::Configuration` when the
    /// company has neither a bank nor a cash account, or a store error while
    /// loading entries or accounts.
    pub async fn book_mileage_entries(
        &self,
        company_id: CompanyId,
        actor: UserId,
    ) -> Result<MileageBookingReport, LedgerError> {
        if !self.policy.is_active(actor) {
            return Err(LedgerError::SubscriptionInactive(actor));
        }

        let entries = self.store.unbooked_mileage_entries(company_id).await?;
        if entries.is_empty() {
            return Ok(MileageBookingReport::default());
        }

        let travel = self.accounts.travel_expense_account(company_id).await?;
        let bank = self.accounts.resolve_bank_account(company_id).await?;

        let outcome = process_sequentially(entries, |entry| {
            self.book_entry(company_id, actor, travel.id, bank.id, entry)
        })
        .await;

        info!(
            %company_id,
            booked = outcome.successes.len(),
            failed = outcome.failures.len(),
            "Mileage entries booked"
        );

        Ok(MileageBookingReport {
            count: outcome.successes.len(),
            booked: outcome.successes,
            errors: outcome.failures,
        })
    }

    async fn book_entry(
        &self,
        company_id: CompanyId,
        actor: UserId,
        travel_account_id: LedgerAccountId,
        bank_account_id: LedgerAccountId,
        entry: MileageEntry,
    ) -> ItemOutcome<BookedMileage, MileageItemError> {
        let entry_id = entry.id;
        self.try_book_entry(company_id, actor, travel_account_id, bank_account_id, entry)
            .await
            .map_err(|error| {
                warn!(%company_id, %entry_id, %error, "Mileage entry not booked");
                MileageItemError {
                    entry_id,
                    error: error.to_string(),
                }
            })
            .into()
    }

    async fn try_book_entry(
        &self,
        company_id: CompanyId,
        actor: UserId,
        travel_account_id: LedgerAccountId,
        bank_account_id: LedgerAccountId,
        entry: MileageEntry,
    ) -> Result<BookedMileage, LedgerError> {
        if entry.total_amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(entry.total_amount));
        }

        let description = entry.booking_description();
        let validated = self
            .bookings
            .prepare(CreateBookingInput {
                company_id,
                date: entry.date,
                description: description.clone(),
                debit_account_id: travel_account_id,
                credit_account_id: bank_account_id,
                amount: entry.total_amount,
                vat_code: None,
                created_by: actor,
            })
            .await?;

        let booking = self
            .store
            .book_mileage_entry(company_id, entry.id, validated.booking())
            .await?;

        Ok(BookedMileage {
            entry_id: entry.id,
            booking_id: booking.id,
            description,
            amount: booking.amount,
        })
    }

    /// Lists the company's trips, newest first.
    pub async fn mileage_entries(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<MileageEntry>, LedgerError> {
        self.store.mileage_entries(company_id).await
    }

    /// Records a trip and computes its reimbursable total.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidInput` for negative kilometers or a
    /// negative rate.
    pub async fn record_mileage_entry(
        &self,
        input: RecordMileageInput,
    ) -> Result<MileageEntry, LedgerError> {
        if input.kilometers < Decimal::ZERO {
            return Err(LedgerError::InvalidInput(format!(
                "kilometers must not be negative, got {}",
                input.kilometers
            )));
        }
        let rate_per_km = input.rate_per_km.unwrap_or(self.default_rate);
        if rate_per_km < Decimal::ZERO {
            return Err(LedgerError::InvalidInput(format!(
                "rate per km must not be negative, got {rate_per_km}"
            )));
        }

        self.store
            .insert_mileage_entry(NewMileageEntry {
                company_id: input.company_id,
                date: input.date,
                total_amount: mileage_total(input.kilometers, rate_per_km),
                kilometers: input.kilometers,
                from_location: input.from_location,
                to_location: input.to_location,
                purpose: input.purpose,
                rate_per_km,
            })
            .await
    }
}
