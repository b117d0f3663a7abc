//! Booking repository.

use kasboek_core::ledger::{DateRange, NewBooking};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::error::StoreError;
use crate::entities::bookings;

/// Repository for booking operations.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    db: DatabaseConnection,
}

impl BookingRepository {
    /// Creates a new booking repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a booking.
    pub async fn insert(&self, booking: &NewBooking) -> Result<bookings::Model, StoreError> {
        Ok(Self::insert_with(&self.db, booking).await?)
    }

    /// Inserts a booking on the given connection or transaction.
    pub(crate) async fn insert_with<C: ConnectionTrait>(
        conn: &C,
        booking: &NewBooking,
    ) -> Result<bookings::Model, DbErr> {
        let model = bookings::ActiveModel {
            id: Set(Uuid::now_v7()),
            company_id: Set(booking.company_id.into_inner()),
            date: Set(booking.date),
            description: Set(booking.description.clone()),
            debit_account_id: Set(booking.debit_account_id.into_inner()),
            credit_account_id: Set(booking.credit_account_id.into_inner()),
            amount: Set(booking.amount),
            vat_code: Set(booking.vat_code.clone()),
            created_by: Set(booking.created_by.into_inner()),
            created_at: Set(chrono::Utc::now().into()),
        };
        model.insert(conn).await
    }

    /// Lists bookings in the window ordered by date, then creation time.
    pub async fn list(
        &self,
        company_id: Uuid,
        range: DateRange,
    ) -> Result<Vec<bookings::Model>, StoreError> {
        let mut query = bookings::Entity::find()
            .filter(bookings::Column::CompanyId.eq(company_id))
            .filter(bookings::Column::Date.lte(range.to));
        if let Some(from) = range.from {
            query = query.filter(bookings::Column::Date.gte(from));
        }

        Ok(query
            .order_by_asc(bookings::Column::Date)
            .order_by_asc(bookings::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}
