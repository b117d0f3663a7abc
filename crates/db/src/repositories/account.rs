//! Account repository for chart of accounts database operations.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;
use uuid::Uuid;

use super::error::StoreError;
use crate::entities::{ledger_accounts, sea_orm_active_enums::LedgerAccountType};

/// Repository for ledger account operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an account by ID within the company.
    pub async fn find(
        &self,
        company_id: Uuid,
        account_id: Uuid,
    ) -> Result<Option<ledger_accounts::Model>, StoreError> {
        Ok(ledger_accounts::Entity::find_by_id(account_id)
            .filter(ledger_accounts::Column::CompanyId.eq(company_id))
            .one(&self.db)
            .await?)
    }

    /// Finds an account by code within the company.
    pub async fn find_by_code(
        &self,
        company_id: Uuid,
        code: &str,
    ) -> Result<Option<ledger_accounts::Model>, StoreError> {
        Ok(ledger_accounts::Entity::find()
            .filter(ledger_accounts::Column::CompanyId.eq(company_id))
            .filter(ledger_accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?)
    }

    /// Lists the company's accounts ordered by code.
    pub async fn list(&self, company_id: Uuid) -> Result<Vec<ledger_accounts::Model>, StoreError> {
        Ok(ledger_accounts::Entity::find()
            .filter(ledger_accounts::Column::CompanyId.eq(company_id))
            .order_by_asc(ledger_accounts::Column::Code)
            .all(&self.db)
            .await?)
    }

    /// Creates an account, or returns the existing one with the same code.
    ///
    /// The insert is `ON CONFLICT DO NOTHING` against the `(company_id, code)`
    /// constraint, so two processes creating the same account both end up
    /// with the single stored row.
    pub async fn create(
        &self,
        company_id: Uuid,
        code: &str,
        name: &str,
        account_type: LedgerAccountType,
    ) -> Result<ledger_accounts::Model, StoreError> {
        let account = ledger_accounts::ActiveModel {
            id: Set(Uuid::now_v7()),
            company_id: Set(company_id),
            code: Set(code.to_string()),
            name: Set(name.to_string()),
            account_type: Set(account_type),
            created_at: Set(chrono::Utc::now().into()),
        };

        let inserted = ledger_accounts::Entity::insert(account)
            .on_conflict(
                OnConflict::columns([
                    ledger_accounts::Column::CompanyId,
                    ledger_accounts::Column::Code,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        if inserted == 0 {
            debug!(%company_id, code, "Account already existed");
        }

        self.find_by_code(company_id, code).await?.ok_or_else(|| {
            StoreError::Database(DbErr::RecordNotFound(format!(
                "ledger account {code} for company {company_id}"
            )))
        })
    }
}
