//! Report generation service.
//!
//! Pure functions over a company's chart of accounts and its bookings. Every
//! booking must reference accounts from the given chart.

use std::collections::HashMap;

use chrono::NaiveDate;
use kasboek_shared::types::LedgerAccountId;
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{
    AccountBalance, AccountClass, BalanceSheetReport, CashFlowLine, CashFlowReport,
    ProfitAndLossReport, ReportSection, ReportTotal, TrendPoint, TrendReport,
};
use crate::calendar::{last_of_month, month_starts};
use crate::ledger::{Booking, DateRange, LedgerAccount};
use crate::recurring::period_key;

/// Service for generating financial reports.
pub struct ReportService;

impl ReportService {
    /// Generates a profit and loss report over `[from, to]`.
    ///
    /// Bookings outside the window are ignored.
    pub fn profit_and_loss(
        accounts: &[LedgerAccount],
        bookings: &[Booking],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<ProfitAndLossReport, ReportError> {
        validate_range(from, to)?;
        let window = DateRange::between(from, to);
        let balances = account_balances(
            accounts,
            bookings.iter().filter(|b| window.contains(b.date)),
        )?;

        let mut revenue = ReportSection::default();
        let mut costs = ReportSection::default();
        for mut account in balances {
            match account.class {
                AccountClass::Revenue => {
                    account.balance = -account.net_debit();
                    revenue.push(account);
                }
                AccountClass::Cost => {
                    account.balance = account.net_debit();
                    costs.push(account);
                }
                AccountClass::Liquid | AccountClass::Balance => {}
            }
        }

        let profit = ReportTotal {
            total: revenue.total - costs.total,
        };
        Ok(ProfitAndLossReport {
            from,
            to,
            revenue,
            costs,
            profit,
        })
    }

    /// Generates a balance sheet from all bookings up to and including `as_of`.
    ///
    /// The cumulative result of all result accounts is shown on the equity
    /// side, so the sheet balances for any set of bookings.
    pub fn balance_sheet(
        accounts: &[LedgerAccount],
        bookings: &[Booking],
        as_of: NaiveDate,
    ) -> Result<BalanceSheetReport, ReportError> {
        let balances = account_balances(accounts, bookings.iter().filter(|b| b.date <= as_of))?;

        let mut assets = ReportSection::default();
        let mut liabilities = ReportSection::default();
        let mut result = Decimal::ZERO;
        for mut account in balances {
            let net = account.net_debit();
            if account.class.is_result() {
                result -= net;
            } else if net > Decimal::ZERO {
                account.balance = net;
                assets.push(account);
            } else if net < Decimal::ZERO {
                account.balance = -net;
                liabilities.push(account);
            }
        }

        let total_assets = assets.total;
        let total_liabilities_and_equity = liabilities.total + result;
        Ok(BalanceSheetReport {
            as_of,
            assets,
            liabilities,
            result,
            total_assets,
            total_liabilities_and_equity,
            is_balanced: total_assets == total_liabilities_and_equity,
        })
    }

    /// Generates a cash flow report over `[from, to]`.
    ///
    /// `bookings` must include everything before `from` for the opening
    /// balance. Transfers between two liquid accounts are not cash flow and
    /// are left out.
    pub fn cash_flow(
        accounts: &[LedgerAccount],
        bookings: &[Booking],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<CashFlowReport, ReportError> {
        validate_range(from, to)?;
        let chart = index(accounts);

        let mut opening_balance = Decimal::ZERO;
        let mut inflow = Decimal::ZERO;
        let mut outflow = Decimal::ZERO;
        let mut lines: HashMap<LedgerAccountId, CashFlowLine> = HashMap::new();

        for booking in bookings.iter().filter(|b| b.date <= to) {
            let debit = lookup(&chart, booking.debit_account_id)?;
            let credit = lookup(&chart, booking.credit_account_id)?;
            let debit_liquid = AccountClass::of(debit) == AccountClass::Liquid;
            let credit_liquid = AccountClass::of(credit) == AccountClass::Liquid;

            if booking.date < from {
                if debit_liquid {
                    opening_balance += booking.amount;
                }
                if credit_liquid {
                    opening_balance -= booking.amount;
                }
                continue;
            }

            match (debit_liquid, credit_liquid) {
                (true, false) => {
                    inflow += booking.amount;
                    line(&mut lines, credit).inflow += booking.amount;
                }
                (false, true) => {
                    outflow += booking.amount;
                    line(&mut lines, debit).outflow += booking.amount;
                }
                _ => {}
            }
        }

        let mut lines: Vec<_> = lines.into_values().collect();
        lines.sort_by(|a, b| a.code.cmp(&b.code));
        let net_change = inflow - outflow;
        Ok(CashFlowReport {
            from,
            to,
            opening_balance,
            inflow,
            outflow,
            net_change,
            closing_balance: opening_balance + net_change,
            lines,
        })
    }

    /// Generates revenue, costs and profit per calendar month in `[from, to]`.
    ///
    /// The first and last month are clipped to the window.
    pub fn trends(
        accounts: &[LedgerAccount],
        bookings: &[Booking],
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<TrendReport, ReportError> {
        validate_range(from, to)?;

        let points = month_starts(from, to)
            .map(|month| -> Result<TrendPoint, ReportError> {
                let pnl = Self::profit_and_loss(
                    accounts,
                    bookings,
                    month.max(from),
                    last_of_month(month).min(to),
                )?;
                Ok(TrendPoint {
                    month: period_key(month),
                    revenue: pnl.revenue.total,
                    costs: pnl.costs.total,
                    profit: pnl.profit.total,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TrendReport { from, to, points })
    }
}

fn validate_range(from: NaiveDate, to: NaiveDate) -> Result<(), ReportError> {
    if from > to {
        return Err(ReportError::InvalidDateRange {
            start: from,
            end: to,
        });
    }
    Ok(())
}

fn index(accounts: &[LedgerAccount]) -> HashMap<LedgerAccountId, &LedgerAccount> {
    accounts.iter().map(|a| (a.id, a)).collect()
}

fn lookup<'a>(
    chart: &HashMap<LedgerAccountId, &'a LedgerAccount>,
    id: LedgerAccountId,
) -> Result<&'a LedgerAccount, ReportError> {
    chart
        .get(&id)
        .copied()
        .ok_or(ReportError::AccountNotFound(id))
}

fn line<'a>(
    lines: &'a mut HashMap<LedgerAccountId, CashFlowLine>,
    account: &LedgerAccount,
) -> &'a mut CashFlowLine {
    lines.entry(account.id).or_insert_with(|| CashFlowLine {
        account_id: account.id,
        code: account.code.clone(),
        name: account.name.clone(),
        inflow: Decimal::ZERO,
        outflow: Decimal::ZERO,
    })
}

/// Debit and credit totals per account, ordered by code.
///
/// Accounts without movements are left out. `balance` starts out as the net
/// debit; callers flip it for their section.
fn account_balances<'b>(
    accounts: &[LedgerAccount],
    bookings: impl IntoIterator<Item = &'b Booking>,
) -> Result<Vec<AccountBalance>, ReportError> {
    let chart = index(accounts);
    let mut totals: HashMap<LedgerAccountId, (Decimal, Decimal)> = HashMap::new();

    for booking in bookings {
        lookup(&chart, booking.debit_account_id)?;
        lookup(&chart, booking.credit_account_id)?;
        totals.entry(booking.debit_account_id).or_default().0 += booking.amount;
        totals.entry(booking.credit_account_id).or_default().1 += booking.amount;
    }

    let mut balances: Vec<_> = totals
        .into_iter()
        .map(|(id, (total_debit, total_credit))| {
            let account = chart[&id];
            AccountBalance {
                account_id: id,
                code: account.code.clone(),
                name: account.name.clone(),
                class: AccountClass::of(account),
                total_debit,
                total_credit,
                balance: total_debit - total_credit,
            }
        })
        .collect();
    balances.sort_by(|a, b| a.code.cmp(&b.code));
    Ok(balances)
}
