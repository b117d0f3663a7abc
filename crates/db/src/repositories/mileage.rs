//! Mileage repository.

use kasboek_core::ledger::{LedgerError, NewBooking};
use kasboek_core::mileage::NewMileageEntry;
use kasboek_shared::types::MileageEntryId;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use super::booking::BookingRepository;
use super::error::StoreError;
use crate::entities::{bookings, mileage_entries};

/// Repository for mileage log operations.
#[derive(Debug, Clone)]
pub struct MileageRepository {
    db: DatabaseConnection,
}

impl MileageRepository {
    /// Creates a new mileage repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Unbooked entries, oldest trip first.
    pub async fn unbooked(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<mileage_entries::Model>, StoreError> {
        Ok(mileage_entries::Entity::find()
            .filter(mileage_entries::Column::CompanyId.eq(company_id))
            .filter(mileage_entries::Column::IsBooked.eq(false))
            .order_by_asc(mileage_entries::Column::Date)
            .order_by_asc(mileage_entries::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// All entries, newest trip first.
    pub async fn list(&self, company_id: Uuid) -> Result<Vec<mileage_entries::Model>, StoreError> {
        Ok(mileage_entries::Entity::find()
            .filter(mileage_entries::Column::CompanyId.eq(company_id))
            .order_by_desc(mileage_entries::Column::Date)
            .order_by_desc(mileage_entries::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }

    /// Stores a new, unbooked entry.
    pub async fn insert(
        &self,
        entry: &NewMileageEntry,
    ) -> Result<mileage_entries::Model, StoreError> {
        let model = mileage_entries::ActiveModel {
            id: Set(Uuid::now_v7()),
            company_id: Set(entry.company_id.into_inner()),
            date: Set(entry.date),
            kilometers: Set(entry.kilometers),
            from_location: Set(entry.from_location.clone()),
            to_location: Set(entry.to_location.clone()),
            purpose: Set(entry.purpose.clone()),
            rate_per_km: Set(entry.rate_per_km),
            total_amount: Set(entry.total_amount),
            is_booked: Set(false),
            booking_id: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        };
        Ok(model.insert(&self.db).await?)
    }

    /// Inserts the booking and flips the entry to booked in one transaction.
    ///
    /// The flip is a conditional `UPDATE ... WHERE is_booked = false`; when
    /// it matches no row the transaction is rolled back and the booking
    /// never becomes visible.
    pub async fn book(
        &self,
        company_id: Uuid,
        entry_id: Uuid,
        booking: &NewBooking,
    ) -> Result<bookings::Model, StoreError> {
        let txn = self.db.begin().await?;

        let stored = BookingRepository::insert_with(&txn, booking).await?;

        let claimed = mileage_entries::Entity::update_many()
            .col_expr(mileage_entries::Column::IsBooked, Expr::value(true))
            .col_expr(mileage_entries::Column::BookingId, Expr::value(stored.id))
            .filter(mileage_entries::Column::Id.eq(entry_id))
            .filter(mileage_entries::Column::CompanyId.eq(company_id))
            .filter(mileage_entries::Column::IsBooked.eq(false))
            .exec(&txn)
            .await?;

        if claimed.rows_affected == 0 {
            let existing = mileage_entries::Entity::find_by_id(entry_id)
                .filter(mileage_entries::Column::CompanyId.eq(company_id))
                .one(&txn)
                .await?;
            txn.rollback().await?;

            let entry_id = MileageEntryId::from_uuid(entry_id);
            return Err(match existing {
                Some(_) => LedgerError::AlreadyBooked(entry_id),
                None => LedgerError::MileageEntryNotFound(entry_id),
            }
            .into());
        }

        txn.commit().await?;
        Ok(stored)
    }
}
