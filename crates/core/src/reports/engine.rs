//! Store-backed reporting facade.

use std::sync::Arc;

use chrono::NaiveDate;
use kasboek_shared::types::CompanyId;

use super::error::ReportError;
use super::service::ReportService;
use super::types::{BalanceSheetReport, CashFlowReport, ProfitAndLossReport, TrendReport};
use crate::ledger::{DateRange, LedgerStore};
use crate::tax::{TaxAdvice, TaxAdvisor, TaxRules};

/// Loads a company's ledger and runs the report generators over it.
pub struct ReportingEngine<S: LedgerStore> {
    store: Arc<S>,
    rules: TaxRules,
}

impl<S: LedgerStore> ReportingEngine<S> {
    /// Creates a new reporting engine.
    #[must_use]
    pub fn new(store: Arc<S>, rules: TaxRules) -> Self {
        Self { store, rules }
    }

    /// Profit and loss over `[from, to]`.
    pub async fn profit_and_loss(
        &self,
        company_id: CompanyId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<ProfitAndLossReport, ReportError> {
        let accounts = self.store.list_accounts(company_id).await?;
        let bookings = self
            .store
            .list_bookings(company_id, DateRange::between(from, to))
            .await?;
        ReportService::profit_and_loss(&accounts, &bookings, from, to)
    }

    /// Balance sheet as of the end of `as_of`.
    pub async fn balance_sheet(
        &self,
        company_id: CompanyId,
        as_of: NaiveDate,
    ) -> Result<BalanceSheetReport, ReportError> {
        let accounts = self.store.list_accounts(company_id).await?;
        let bookings = self
            .store
            .list_bookings(company_id, DateRange::until(as_of))
            .await?;
        ReportService::balance_sheet(&accounts, &bookings, as_of)
    }

    /// Cash flow over `[from, to]`, with opening and closing liquid balance.
    pub async fn cash_flow(
        &self,
        company_id: CompanyId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<CashFlowReport, ReportError> {
        let accounts = self.store.list_accounts(company_id).await?;
        let bookings = self
            .store
            .list_bookings(company_id, DateRange::until(to))
            .await?;
        ReportService::cash_flow(&accounts, &bookings, from, to)
    }

    /// Month-by-month results over `[from, to]`.
    pub async fn trends(
        &self,
        company_id: CompanyId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<TrendReport, ReportError> {
        let accounts = self.store.list_accounts(company_id).await?;
        let bookings = self
            .store
            .list_bookings(company_id, DateRange::between(from, to))
            .await?;
        ReportService::trends(&accounts, &bookings, from, to)
    }

    /// VAT and income tax reservation advice over `[from, to]`.
    pub async fn tax_advice(
        &self,
        company_id: CompanyId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<TaxAdvice, ReportError> {
        let accounts = self.store.list_accounts(company_id).await?;
        let bookings = self
            .store
            .list_bookings(company_id, DateRange::between(from, to))
            .await?;
        let pnl = ReportService::profit_and_loss(&accounts, &bookings, from, to)?;
        Ok(TaxAdvisor::advise(&pnl, &accounts, &bookings, &self.rules))
    }
}
