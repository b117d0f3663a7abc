//! Report data types.

use chrono::NaiveDate;
use kasboek_shared::types::LedgerAccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{AccountType, LedgerAccount};

/// Revenue accounts are result accounts in the 8xxx range.
pub const REVENUE_CODE_PREFIX: &str = "8";
/// Liquid accounts (bank, cash) are balance accounts in the 10xx range.
pub const LIQUID_CODE_PREFIX: &str = "10";

/// Reporting role of a ledger account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountClass {
    /// Result account in the revenue range.
    Revenue,
    /// Any other result account.
    Cost,
    /// Bank or cash.
    Liquid,
    /// Any other balance account.
    Balance,
}

impl AccountClass {
    /// Classifies an account by type and code.
    #[must_use]
    pub fn of(account: &LedgerAccount) -> Self {
        match account.account_type {
            AccountType::Result if account.code.starts_with(REVENUE_CODE_PREFIX) => Self::Revenue,
            AccountType::Result => Self::Cost,
            AccountType::Balance if account.code.starts_with(LIQUID_CODE_PREFIX) => Self::Liquid,
            AccountType::Balance => Self::Balance,
        }
    }

    /// Profit and loss account.
    #[must_use]
    pub const fn is_result(self) -> bool {
        matches!(self, Self::Revenue | Self::Cost)
    }
}

/// Account balance for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountBalance {
    /// Account ID.
    pub account_id: LedgerAccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Reporting class.
    pub class: AccountClass,
    /// Total debited.
    pub total_debit: Decimal,
    /// Total credited.
    pub total_credit: Decimal,
    /// Amount shown in the report section, positive in the section's natural direction.
    pub balance: Decimal,
}

impl AccountBalance {
    /// Debit minus credit.
    #[must_use]
    pub fn net_debit(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}

/// A group of account lines with their total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    /// Section total.
    pub total: Decimal,
    /// Accounts in this section.
    pub accounts: Vec<AccountBalance>,
}

impl ReportSection {
    pub(crate) fn push(&mut self, account: AccountBalance) {
        self.total += account.balance;
        self.accounts.push(account);
    }
}

/// A single derived figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotal {
    /// The amount.
    pub total: Decimal,
}

/// Profit and loss (winst- en verliesrekening) over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitAndLossReport {
    /// First day.
    pub from: NaiveDate,
    /// Last day.
    pub to: NaiveDate,
    /// Revenue accounts, credit minus debit.
    pub revenue: ReportSection,
    /// Cost accounts, debit minus credit.
    pub costs: ReportSection,
    /// Revenue minus costs.
    pub profit: ReportTotal,
}

/// Balance sheet (balans) as of a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetReport {
    /// Snapshot date, inclusive.
    pub as_of: NaiveDate,
    /// Balance accounts with a debit balance.
    pub assets: ReportSection,
    /// Balance accounts with a credit balance.
    pub liabilities: ReportSection,
    /// Cumulative result ("Resultaat") not yet closed to equity.
    pub result: Decimal,
    /// Total assets.
    pub total_assets: Decimal,
    /// Liabilities plus result.
    pub total_liabilities_and_equity: Decimal,
    /// Whether both sides match.
    pub is_balanced: bool,
}

/// Money moving through one counter-account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowLine {
    /// Counter-account ID.
    pub account_id: LedgerAccountId,
    /// Counter-account code.
    pub code: String,
    /// Counter-account name.
    pub name: String,
    /// Received from this account.
    pub inflow: Decimal,
    /// Paid to this account.
    pub outflow: Decimal,
}

/// Cash flow over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowReport {
    /// First day.
    pub from: NaiveDate,
    /// Last day.
    pub to: NaiveDate,
    /// Liquid balance before `from`.
    pub opening_balance: Decimal,
    /// Total received.
    pub inflow: Decimal,
    /// Total paid.
    pub outflow: Decimal,
    /// Inflow minus outflow.
    pub net_change: Decimal,
    /// Liquid balance at the end of `to`.
    pub closing_balance: Decimal,
    /// Movements per counter-account, ordered by code.
    pub lines: Vec<CashFlowLine>,
}

/// Result figures for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Month key, e.g. `2024-03`.
    pub month: String,
    /// Revenue.
    pub revenue: Decimal,
    /// Costs.
    pub costs: Decimal,
    /// Profit.
    pub profit: Decimal,
}

/// Month-by-month result figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    /// First day.
    pub from: NaiveDate,
    /// Last day.
    pub to: NaiveDate,
    /// One point per calendar month, oldest first.
    pub points: Vec<TrendPoint>,
}
