//! `SeaORM` Entity for bookings table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub date: Date,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub debit_account_id: Uuid,
    pub credit_account_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub amount: Decimal,
    pub vat_code: Option<String>,
    pub created_by: Uuid,
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
    #[sea_orm(
        belongs_to = "super::ledger_accounts::Entity",
        from = "Column::DebitAccountId",
        to = "super::ledger_accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    DebitAccount,
    #[sea_orm(
        belongs_to = "super::ledger_accounts::Entity",
        from = "Column::CreditAccountId",
        to = "super::ledger_accounts::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    CreditAccount,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
