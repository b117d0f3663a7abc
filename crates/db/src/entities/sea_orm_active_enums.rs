//! `SeaORM` active enums backed by PostgreSQL enum types.

use kasboek_core::ledger::AccountType;
use kasboek_core::recurring::Frequency;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "ledger_account_type")]
pub enum LedgerAccountType {
    #[sea_orm(string_value = "balance")]
    BalanceSheet,
    #[sea_orm(string_value = "result")]
    IncomeStatement,
}

impl From<AccountType> for LedgerAccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Balance => Self::BalanceSheet,
            AccountType::Result => Self::IncomeStatement,
        }
    }
}

impl From<LedgerAccountType> for AccountType {
    fn from(value: LedgerAccountType) -> Self {
        match value {
            LedgerAccountType::BalanceSheet => Self::Balance,
            LedgerAccountType::IncomeStatement => Self::Result,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "recurring_frequency")]
pub enum RecurringFrequency {
    #[sea_orm(string_value = "monthly")]
    Monthly,
    #[sea_orm(string_value = "quarterly")]
    Quarterly,
    #[sea_orm(string_value = "yearly")]
    Yearly,
}

impl From<Frequency> for RecurringFrequency {
    fn from(value: Frequency) -> Self {
        match value {
            Frequency::Monthly => Self::Monthly,
            Frequency::Quarterly => Self::Quarterly,
            Frequency::Yearly => Self::Yearly,
        }
    }
}

impl From<RecurringFrequency> for Frequency {
    fn from(value: RecurringFrequency) -> Self {
        match value {
            RecurringFrequency::Monthly => Self::Monthly,
            RecurringFrequency::Quarterly => Self::Quarterly,
            RecurringFrequency::Yearly => Self::Yearly,
        }
    }
}
