//! Company repository.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::error::StoreError;
use crate::entities::companies;

/// Repository for company operations.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    db: DatabaseConnection,
}

impl CompanyRepository {
    /// Creates a new company repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a company owned by the given user.
    pub async fn create(&self, name: &str, owner_id: Uuid) -> Result<companies::Model, StoreError> {
        let company = companies::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name.to_string()),
            owner_id: Set(owner_id),
            created_at: Set(chrono::Utc::now().into()),
        };
        Ok(company.insert(&self.db).await?)
    }

    /// Finds a company by ID.
    pub async fn find(&self, company_id: Uuid) -> Result<Option<companies::Model>, StoreError> {
        Ok(companies::Entity::find_by_id(company_id).one(&self.db).await?)
    }

    /// Lists all companies, oldest first.
    pub async fn list(&self) -> Result<Vec<companies::Model>, StoreError> {
        Ok(companies::Entity::find()
            .order_by_asc(companies::Column::CreatedAt)
            .all(&self.db)
            .await?)
    }
}
