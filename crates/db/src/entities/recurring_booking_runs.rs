//! `SeaORM` Entity for recurring_booking_runs table.
//!
//! One row per schedule per month it fired; the unique
//! `(company_id, recurring_booking_id, period)` key keeps runs idempotent.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "recurring_booking_runs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub recurring_booking_id: Uuid,
    pub period: String,
    pub booking_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::recurring_bookings::Entity",
        from = "Column::RecurringBookingId",
        to = "super::recurring_bookings::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    RecurringBookings,
    #[sea_orm(
        belongs_to = "super::bookings::Entity",
        from = "Column::BookingId",
        to = "super::bookings::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Bookings,
}

impl Related<super::recurring_bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecurringBookings.def()
    }
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
