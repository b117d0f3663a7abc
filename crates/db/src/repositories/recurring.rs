//! Recurring booking repository.

use chrono::NaiveDate;
use kasboek_core::ledger::{LedgerError, NewBooking};
use kasboek_core::recurring::{period_key, CreateRecurringBookingInput};
use kasboek_shared::types::RecurringBookingId;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::booking::BookingRepository;
use super::error::StoreError;
use crate::entities::{bookings, recurring_booking_runs, recurring_bookings};

/// Repository for recurring booking operations.
#[derive(Debug, Clone)]
pub struct RecurringRepository {
    db: DatabaseConnection,
}

impl RecurringRepository {
    /// Creates a new recurring booking repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Active schedules whose start/end window contains `today`.
    pub async fn active(
        &self,
        company_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<recurring_bookings::Model>, StoreError> {
        Ok(recurring_bookings::Entity::find()
            .filter(recurring_bookings::Column::CompanyId.eq(company_id))
            .filter(recurring_bookings::Column::IsActive.eq(true))
            .filter(recurring_bookings::Column::StartDate.lte(today))
            .filter(
                Condition::any()
                    .add(recurring_bookings::Column::EndDate.is_null())
                    .add(recurring_bookings::Column::EndDate.gte(today)),
            )
            .order_by_asc(recurring_bookings::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// All schedules, newest first.
    pub async fn list(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<recurring_bookings::Model>, StoreError> {
        Ok(recurring_bookings::Entity::find()
            .filter(recurring_bookings::Column::CompanyId.eq(company_id))
            .order_by_desc(recurring_bookings::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Stores a new, active schedule.
    pub async fn insert(
        &self,
        input: &CreateRecurringBookingInput,
    ) -> Result<recurring_bookings::Model, StoreError> {
        let day_of_month =
            i16::try_from(input.day_of_month).map_err(|_| StoreError::InvalidColumn {
                table: "recurring_bookings",
                column: "day_of_month",
                value: input.day_of_month.to_string(),
            })?;

        let model = recurring_bookings::ActiveModel {
            id: Set(Uuid::now_v7()),
            company_id: Set(input.company_id.into_inner()),
            description: Set(input.description.clone()),
            debit_account_id: Set(input.debit_account_id.into_inner()),
            credit_account_id: Set(input.credit_account_id.into_inner()),
            amount: Set(input.amount),
            frequency: Set(input.frequency.into()),
            day_of_month: Set(day_of_month),
            start_date: Set(input.start_date),
            end_date: Set(input.end_date),
            vat_code: Set(input.vat_code.clone()),
            created_by: Set(input.created_by.into_inner()),
            is_active: Set(true),
            last_processed: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        };
        Ok(model.insert(&self.db).await?)
    }

    /// Activates or deactivates a schedule.
    pub async fn set_active(
        &self,
        company_id: Uuid,
        id: Uuid,
        is_active: bool,
    ) -> Result<recurring_bookings::Model, StoreError> {
        let existing = recurring_bookings::Entity::find_by_id(id)
            .filter(recurring_bookings::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await?
            .ok_or(LedgerError::RecurringBookingNotFound(
                RecurringBookingId::from_uuid(id),
            ))?;

        let mut active = existing.into_active_model();
        active.is_active = Set(is_active);
        Ok(active.update(&self.db).await?)
    }

    /// Deletes a schedule; its bookings stay in the ledger.
    pub async fn delete(&self, company_id: Uuid, id: Uuid) -> Result<(), StoreError> {
        let result = recurring_bookings::Entity::delete_many()
            .filter(recurring_bookings::Column::Id.eq(id))
            .filter(recurring_bookings::Column::CompanyId.eq(company_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(
                LedgerError::RecurringBookingNotFound(RecurringBookingId::from_uuid(id)).into(),
            );
        }
        Ok(())
    }

    /// Materializes one booking for the schedule in one transaction.
    ///
    /// Inserts the booking, moves `last_processed` to `today` and claims the
    /// `(company, schedule, YYYY-MM)` run key. A concurrent run that claimed
    /// the month first makes the insert a no-op, and the whole transaction
    /// is rolled back.
    pub async fn record_run(
        &self,
        company_id: Uuid,
        id: Uuid,
        today: NaiveDate,
        booking: &NewBooking,
    ) -> Result<bookings::Model, StoreError> {
        let recurring_id = RecurringBookingId::from_uuid(id);
        let period = period_key(today);
        let txn = self.db.begin().await?;

        let stored = BookingRepository::insert_with(&txn, booking).await?;

        let updated = recurring_bookings::Entity::update_many()
            .col_expr(recurring_bookings::Column::LastProcessed, Expr::value(today))
            .filter(recurring_bookings::Column::Id.eq(id))
            .filter(recurring_bookings::Column::CompanyId.eq(company_id))
            .exec(&txn)
            .await?;
        if updated.rows_affected == 0 {
            txn.rollback().await?;
            return Err(LedgerError::RecurringBookingNotFound(recurring_id).into());
        }

        let run = recurring_booking_runs::ActiveModel {
            id: Set(Uuid::now_v7()),
            company_id: Set(company_id),
            recurring_booking_id: Set(id),
            period: Set(period.clone()),
            booking_id: Set(stored.id),
            created_at: Set(chrono::Utc::now().into()),
        };
        let claimed = recurring_booking_runs::Entity::insert(run)
            .on_conflict(
                OnConflict::columns([
                    recurring_booking_runs::Column::CompanyId,
                    recurring_booking_runs::Column::RecurringBookingId,
                    recurring_booking_runs::Column::Period,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;
        if claimed == 0 {
            txn.rollback().await?;
            return Err(LedgerError::AlreadyProcessed {
                recurring_id,
                period,
            }
            .into());
        }

        txn.commit().await?;
        Ok(stored)
    }
}
