//! Recurring booking processor.
//!
//! Meant to be invoked once a day per company by an external scheduler.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use kasboek_shared::types::{CompanyId, LedgerAccountId, RecurringBookingId};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::store::RecurringStore;
use super::types::{
    CreateRecurringBookingInput, ProcessedRecurring, RecurringBooking,
    RecurringBookingWithAccounts, RecurringItemError, RecurringRunReport,
};
use crate::batch::{process_sequentially, ItemOutcome};
use crate::ledger::{AccountSide, BookingService, CreateBookingInput, LedgerAccount, LedgerError};

/// Materializes due recurring bookings and manages schedules.
pub struct RecurringService<S: RecurringStore> {
    store: Arc<S>,
    bookings: BookingService<S>,
    timezone: Tz,
}

impl<S: RecurringStore> RecurringService<S> {
    /// Creates a new recurring service; `timezone` decides what "today" is.
    #[must_use]
    pub fn new(store: Arc<S>, timezone: Tz) -> Self {
        Self {
            bookings: BookingService::new(Arc::clone(&store)),
            store,
            timezone,
        }
    }

    /// Today's date in the configured timezone.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    /// Processes the company's schedules for today.
    ///
    /// # Errors
    ///
    /// Only a failure to load the schedules fails the run; per-schedule
    /// failures are reported in `errors`.
    pub async fn process_recurring_bookings(
        &self,
        company_id: CompanyId,
    ) -> Result<RecurringRunReport, LedgerError> {
        self.process_recurring_bookings_on(company_id, self.today())
            .await
    }

    /// Processes the company's schedules as if it were `today`.
    ///
    /// # Errors
    ///
    /// See [`Self::process_recurring_bookings`].
    pub async fn process_recurring_bookings_on(
        &self,
        company_id: CompanyId,
        today: NaiveDate,
    ) -> Result<RecurringRunReport, LedgerError> {
        let schedules = self
            .store
            .active_recurring_bookings(company_id, today)
            .await?;

        let outcome = process_sequentially(schedules, |schedule| {
            self.process_schedule(company_id, today, schedule)
        })
        .await;

        info!(
            %company_id,
            %today,
            processed = outcome.successes.len(),
            failed = outcome.failures.len(),
            skipped = outcome.skipped,
            "Recurring bookings processed"
        );

        Ok(RecurringRunReport {
            count: outcome.successes.len(),
            processed: outcome.successes,
            errors: outcome.failures,
        })
    }

    async fn process_schedule(
        &self,
        company_id: CompanyId,
        today: NaiveDate,
        schedule: RecurringBooking,
    ) -> ItemOutcome<ProcessedRecurring, RecurringItemError> {
        if schedule.processed_in_month_of(today) || !schedule.is_due_on(today) {
            return ItemOutcome::Skipped;
        }

        let recurring_id = schedule.id;
        let description = schedule.description.clone();
        match self.materialize(company_id, today, schedule).await {
            Ok(processed) => ItemOutcome::Done(processed),
            Err(LedgerError::AlreadyProcessed { period, .. }) => {
                debug!(%recurring_id, %period, "Recurring booking claimed by another run");
                ItemOutcome::Skipped
            }
            Err(error) => {
                warn!(%company_id, %recurring_id, %error, "Recurring booking failed");
                ItemOutcome::Failed(RecurringItemError {
                    recurring_id,
                    description,
                    error: error.to_string(),
                })
            }
        }
    }

    async fn materialize(
        &self,
        company_id: CompanyId,
        today: NaiveDate,
        schedule: RecurringBooking,
    ) -> Result<ProcessedRecurring, LedgerError> {
        let validated = self
            .bookings
            .prepare(CreateBookingInput {
                company_id,
                date: today,
                description: schedule.description.clone(),
                debit_account_id: schedule.debit_account_id,
                credit_account_id: schedule.credit_account_id,
                amount: schedule.amount,
                vat_code: schedule.vat_code.clone(),
                created_by: schedule.created_by,
            })
            .await?;

        let booking = self
            .store
            .record_recurring_booking(company_id, schedule.id, today, validated.booking())
            .await?;

        Ok(ProcessedRecurring {
            recurring_id: schedule.id,
            booking_id: booking.id,
            description: schedule.description,
        })
    }

    /// Lists the company's schedules, newest first, with their accounts.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountNotFound` if a schedule references an
    /// account missing from the chart, or a store error.
    pub async fn recurring_bookings(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<RecurringBookingWithAccounts>, LedgerError> {
        let accounts: HashMap<LedgerAccountId, LedgerAccount> = self
            .store
            .list_accounts(company_id)
            .await?
            .into_iter()
            .map(|account| (account.id, account))
            .collect();

        let lookup = |account_id: LedgerAccountId, side: AccountSide| {
            accounts
                .get(&account_id)
                .cloned()
                .ok_or(LedgerError::AccountNotFound { side, account_id })
        };

        self.store
            .recurring_bookings(company_id)
            .await?
            .into_iter()
            .map(|recurring| -> Result<_, LedgerError> {
                Ok(RecurringBookingWithAccounts {
                    debit_account: lookup(recurring.debit_account_id, AccountSide::Debit)?,
                    credit_account: lookup(recurring.credit_account_id, AccountSide::Credit)?,
                    recurring,
                })
            })
            .collect()
    }

    /// Creates a schedule after checking its accounts and values.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AccountNotFound` for accounts outside the
    /// company, `LedgerError::NonPositiveAmount`, or
    /// `LedgerError::InvalidInput` for a bad day or date window.
    pub async fn create_recurring_booking(
        &self,
        input: CreateRecurringBookingInput,
    ) -> Result<RecurringBookingWithAccounts, LedgerError> {
        let (debit_account, credit_account) = self
            .bookings
            .resolve_accounts(
                input.company_id,
                input.debit_account_id,
                input.credit_account_id,
            )
            .await?;

        if input.amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(input.amount));
        }
        if !(1..=31).contains(&input.day_of_month) {
            return Err(LedgerError::InvalidInput(format!(
                "day of month must be between 1 and 31, got {}",
                input.day_of_month
            )));
        }
        if input.end_date.is_some_and(|end| end < input.start_date) {
            return Err(LedgerError::InvalidInput(
                "end date must not be before start date".to_string(),
            ));
        }
        if input.description.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "description must not be empty".to_string(),
            ));
        }

        let recurring = self.store.insert_recurring_booking(input).await?;
        info!(
            recurring_id = %recurring.id,
            company_id = %recurring.company_id,
            frequency = %recurring.frequency,
            "Recurring booking created"
        );

        Ok(RecurringBookingWithAccounts {
            recurring,
            debit_account,
            credit_account,
        })
    }

    /// Activates or deactivates a schedule.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::RecurringBookingNotFound` or a store error.
    pub async fn set_recurring_active(
        &self,
        company_id: CompanyId,
        id: RecurringBookingId,
        is_active: bool,
    ) -> Result<RecurringBooking, LedgerError> {
        self.store
            .set_recurring_active(company_id, id, is_active)
            .await
    }

    /// Deletes a schedule.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::RecurringBookingNotFound` or a store error.
    pub async fn delete_recurring_booking(
        &self,
        company_id: CompanyId,
        id: RecurringBookingId,
    ) -> Result<(), LedgerError> {
        self.store.delete_recurring_booking(company_id, id).await?;
        info!(recurring_id = %id, %company_id, "Recurring booking deleted");
        Ok(())
    }
}
