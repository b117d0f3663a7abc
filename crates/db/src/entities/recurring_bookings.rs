//! `SeaORM` Entity for recurring_bookings table.

use super::sea_orm_active_enums::RecurringFrequency;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "recurring_bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub debit_account_id: Uuid,
    pub credit_account_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount: Decimal,
    pub frequency: RecurringFrequency,
    pub day_of_month: i16,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub vat_code: Option<String>,
    pub created_by: Uuid,
    pub is_active: bool,
    pub last_processed: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Companies,
    #[sea_orm(has_many = "super::recurring_booking_runs::Entity")]
    RecurringBookingRuns,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl Related<super::recurring_booking_runs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecurringBookingRuns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
