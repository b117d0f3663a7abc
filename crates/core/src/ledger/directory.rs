//! Chart of accounts per company.
//!
//! Well-known accounts are created lazily by the processors. Concurrent
//! first-time creation is settled by the `(company_id, code)` uniqueness
//! constraint in the store, which hands back the existing row.

use std::sync::Arc;

use kasboek_shared::types::CompanyId;
use tracing::info;

use super::error::LedgerError;
use super::store::LedgerStore;
use super::types::{AccountType, LedgerAccount, NewLedgerAccount};

/// Primary bank account code.
pub const BANK_ACCOUNT_CODE: &str = "1000";
/// Fallback cash account code.
pub const CASH_ACCOUNT_CODE: &str = "1010";
/// Travel expense account code.
pub const TRAVEL_EXPENSE_ACCOUNT_CODE: &str = "4600";
/// Travel expense account name.
pub const TRAVEL_EXPENSE_ACCOUNT_NAME: &str = "Reiskosten";

/// Minimal Dutch chart of accounts for a new company.
pub const STANDARD_CHART: &[(&str, &str, AccountType)] = &[
    ("0500", "Eigen vermogen", AccountType::Balance),
    (BANK_ACCOUNT_CODE, "Bank", AccountType::Balance),
    (CASH_ACCOUNT_CODE, "Kas", AccountType::Balance),
    ("1300", "Debiteuren", AccountType::Balance),
    ("1500", "Af te dragen BTW", AccountType::Balance),
    ("1510", "Te vorderen BTW", AccountType::Balance),
    ("1600", "Crediteuren", AccountType::Balance),
    ("4000", "Algemene kosten", AccountType::Result),
    (
        TRAVEL_EXPENSE_ACCOUNT_CODE,
        TRAVEL_EXPENSE_ACCOUNT_NAME,
        AccountType::Result,
    ),
    ("8000", "Omzet", AccountType::Result),
];

/// Ledger account directory.
pub struct AccountDirectory<S: LedgerStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> Clone for AccountDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LedgerStore> AccountDirectory<S> {
    /// Creates a new account directory.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Lists the company's accounts ordered by code.
    pub async fn list(&self, company_id: CompanyId) -> Result<Vec<LedgerAccount>, LedgerError> {
        self.store.list_accounts(company_id).await
    }

    /// Finds an account by code.
    pub async fn find_by_code(
        &self,
        company_id: CompanyId,
        code: &str,
    ) -> Result<Option<LedgerAccount>, LedgerError> {
        self.store.find_account_by_code(company_id, code).await
    }

    /// Returns the account with this code, creating it when missing.
    ///
    /// An existing account is returned unchanged even if its name or type
    /// differ from the requested ones.
    pub async fn ensure_account(
        &self,
        company_id: CompanyId,
        code: &str,
        name: &str,
        account_type: AccountType,
    ) -> Result<LedgerAccount, LedgerError> {
        if let Some(existing) = self.find_by_code(company_id, code).await? {
            return Ok(existing);
        }

        let account = self
            .store
            .create_account(NewLedgerAccount {
                company_id,
                code: code.to_string(),
                name: name.to_string(),
                account_type,
            })
            .await?;
        info!(%company_id, code, name, "Ledger account created");
        Ok(account)
    }

    /// Resolves the account mileage and other payments are credited to.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Configuration` if neither the bank (1000) nor
    /// the cash (1010) account exists. Nothing is created here.
    pub async fn resolve_bank_account(
        &self,
        company_id: CompanyId,
    ) -> Result<LedgerAccount, LedgerError> {
        if let Some(bank) = self.find_by_code(company_id, BANK_ACCOUNT_CODE).await? {
            return Ok(bank);
        }
        self.find_by_code(company_id, CASH_ACCOUNT_CODE)
            .await?
            .ok_or_else(|| LedgerError::Configuration("no bank or cash account".to_string()))
    }

    /// Resolves or creates the 4600 travel expense account.
    pub async fn travel_expense_account(
        &self,
        company_id: CompanyId,
    ) -> Result<LedgerAccount, LedgerError> {
        self.ensure_account(
            company_id,
            TRAVEL_EXPENSE_ACCOUNT_CODE,
            TRAVEL_EXPENSE_ACCOUNT_NAME,
            AccountType::Result,
        )
        .await
    }

    /// Ensures every account of [`STANDARD_CHART`] exists for the company.
    ///
    /// Existing accounts are left untouched; safe to run repeatedly.
    pub async fn setup_standard_chart(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<LedgerAccount>, LedgerError> {
        let mut accounts = Vec::with_capacity(STANDARD_CHART.len());
        for (code, name, account_type) in STANDARD_CHART {
            accounts.push(
                self.ensure_account(company_id, code, name, *account_type)
                    .await?,
            );
        }
        Ok(accounts)
    }
}
