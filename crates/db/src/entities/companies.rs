//! `SeaORM` Entity for companies table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ledger_accounts::Entity")]
    LedgerAccounts,
    #[sea_orm(has_many = "super::bookings::Entity")]
    Bookings,
    #[sea_orm(has_many = "super::mileage_entries::Entity")]
    MileageEntries,
    #[sea_orm(has_many = "super::recurring_bookings::Entity")]
    RecurringBookings,
}

impl Related<super::ledger_accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LedgerAccounts.def()
    }
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::mileage_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MileageEntries.def()
    }
}

impl Related<super::recurring_bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecurringBookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
