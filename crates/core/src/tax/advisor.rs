//! Tax reservation advice.
//!
//! Suggests how much of the period's money to set aside for the VAT return
//! and for income tax. Figures are estimates for budgeting, not a filing.

use std::collections::HashMap;

use chrono::NaiveDate;
use kasboek_shared::types::{round_currency, LedgerAccountId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::rules::TaxRules;
use crate::calendar::months_spanned;
use crate::ledger::{Booking, DateRange, LedgerAccount};
use crate::reports::{AccountClass, ProfitAndLossReport};

/// Recommended reservations for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxAdvice {
    /// First day.
    pub from: NaiveDate,
    /// Last day.
    pub to: NaiveDate,
    /// VAT charged on revenue.
    pub output_vat: Decimal,
    /// VAT paid on costs.
    pub input_vat: Decimal,
    /// VAT to set aside, never negative.
    pub vat_reservation: Decimal,
    /// Profit after the prorated deduction and the SME exemption.
    pub taxable_profit: Decimal,
    /// Income tax to set aside.
    pub income_tax_reservation: Decimal,
    /// VAT plus income tax.
    pub total_reservation: Decimal,
    /// Calendar months in the period.
    pub months: u32,
    /// Total spread evenly over the months.
    pub monthly_reservation: Decimal,
}

/// Derives reservation advice from a profit and loss report.
pub struct TaxAdvisor;

impl TaxAdvisor {
    /// Computes the advice for the report's period.
    ///
    /// VAT is taken from the bookings' VAT codes: revenue credits add output
    /// VAT, cost debits add input VAT, and reversals subtract. The
    /// self-employed deduction is prorated over the months in the period.
    #[must_use]
    pub fn advise(
        pnl: &ProfitAndLossReport,
        accounts: &[LedgerAccount],
        bookings: &[Booking],
        rules: &TaxRules,
    ) -> TaxAdvice {
        let chart: HashMap<LedgerAccountId, AccountClass> = accounts
            .iter()
            .map(|a| (a.id, AccountClass::of(a)))
            .collect();
        let class = |id: LedgerAccountId| chart.get(&id).copied();
        let window = DateRange::between(pnl.from, pnl.to);

        let mut output_vat = Decimal::ZERO;
        let mut input_vat = Decimal::ZERO;
        for booking in bookings.iter().filter(|b| window.contains(b.date)) {
            let rate = rules.vat_rate(booking.vat_code.as_deref());
            if rate.is_zero() {
                continue;
            }
            let vat = booking.amount * rate;
            match class(booking.credit_account_id) {
                Some(AccountClass::Revenue) => output_vat += vat,
                Some(AccountClass::Cost) => input_vat -= vat,
                _ => {}
            }
            match class(booking.debit_account_id) {
                Some(AccountClass::Revenue) => output_vat -= vat,
                Some(AccountClass::Cost) => input_vat += vat,
                _ => {}
            }
        }
        let output_vat = round_currency(output_vat);
        let input_vat = round_currency(input_vat);
        let vat_reservation = (output_vat - input_vat).max(Decimal::ZERO);

        let months = months_spanned(pnl.from, pnl.to);
        let deduction =
            rules.self_employed_deduction * Decimal::from(months) / Decimal::from(12u32);
        let taxable_profit = round_currency(
            (pnl.profit.total - deduction).max(Decimal::ZERO)
                * (Decimal::ONE - rules.sme_profit_exemption),
        );
        let income_tax_reservation = round_currency(taxable_profit * rules.income_tax_rate);

        let total_reservation = vat_reservation + income_tax_reservation;
        TaxAdvice {
            from: pnl.from,
            to: pnl.to,
            output_vat,
            input_vat,
            vat_reservation,
            taxable_profit,
            income_tax_reservation,
            total_reservation,
            months,
            monthly_reservation: round_currency(total_reservation / Decimal::from(months)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::AccountType;
    use crate::reports::ReportService;
    use chrono::Utc;
    use kasboek_shared::types::{BookingId, CompanyId, UserId};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Chart {
        company: CompanyId,
        bank: LedgerAccount,
        costs: LedgerAccount,
        revenue: LedgerAccount,
    }

    fn account(company: CompanyId, code: &str, account_type: AccountType) -> LedgerAccount {
        LedgerAccount {
            id: LedgerAccountId::new(),
            company_id: company,
            code: code.to_string(),
            name: format!("Account {code}"),
            account_type,
        }
    }

    fn chart() -> Chart {
        let company = CompanyId::new();
        Chart {
            bank: account(company, "1000", AccountType::Balance),
            costs: account(company, "4000", AccountType::Result),
            revenue: account(company, "8000", AccountType::Result),
            company,
        }
    }

    impl Chart {
        fn accounts(&self) -> Vec<LedgerAccount> {
            vec![self.bank.clone(), self.costs.clone(), self.revenue.clone()]
        }

        fn booking(
            &self,
            on: NaiveDate,
            debit: &LedgerAccount,
            credit: &LedgerAccount,
            amount: Decimal,
            vat_code: Option<&str>,
        ) -> Booking {
            Booking {
                id: BookingId::new(),
                company_id: self.company,
                date: on,
                description: "test".to_string(),
                debit_account_id: debit.id,
                credit_account_id: credit.id,
                amount,
                vat_code: vat_code.map(str::to_string),
                created_by: UserId::new(),
                created_at: Utc::now(),
            }
        }
    }

    fn advise(chart: &Chart, bookings: &[Booking], from: NaiveDate, to: NaiveDate) -> TaxAdvice {
        let accounts = chart.accounts();
        let pnl = ReportService::profit_and_loss(&accounts, bookings, from, to).unwrap();
        TaxAdvisor::advise(&pnl, &accounts, bookings, &TaxRules::default())
    }

    #[test]
    fn test_full_year_advice() {
        let c = chart();
        let bookings = vec![
            c.booking(date(2024, 3, 1), &c.bank, &c.revenue, dec!(10000), Some("21")),
            c.booking(date(2024, 4, 1), &c.costs, &c.bank, dec!(1000), Some("21")),
        ];

        let advice = advise(&c, &bookings, date(2024, 1, 1), date(2024, 12, 31));

        assert_eq!(advice.output_vat, dec!(2100));
        assert_eq!(advice.input_vat, dec!(210));
        assert_eq!(advice.vat_reservation, dec!(1890));
        // (9000 - 3750) * (1 - 0.1331) = 4551.225
        assert_eq!(advice.taxable_profit, dec!(4551.22));
        assert_eq!(advice.income_tax_reservation, dec!(1682.59));
        assert_eq!(advice.total_reservation, dec!(3572.59));
        assert_eq!(advice.months, 12);
        assert_eq!(advice.monthly_reservation, dec!(297.72));
    }

    #[test]
    fn test_deduction_is_prorated() {
        let c = chart();
        let bookings = vec![c.booking(
            date(2024, 1, 15),
            &c.bank,
            &c.revenue,
            dec!(1000),
            None,
        )];

        let advice = advise(&c, &bookings, date(2024, 1, 1), date(2024, 3, 31));

        // 1000 - 3750 * 3 / 12 = 62.50, then 86.69% of it.
        assert_eq!(advice.months, 3);
        assert_eq!(advice.vat_reservation, Decimal::ZERO);
        assert_eq!(advice.taxable_profit, dec!(54.18));
        assert_eq!(advice.income_tax_reservation, dec!(20.03));
    }

    #[test]
    fn test_loss_and_vat_refund_floor_at_zero() {
        let c = chart();
        let bookings = vec![
            c.booking(date(2024, 2, 1), &c.bank, &c.revenue, dec!(100), Some("21")),
            c.booking(date(2024, 2, 2), &c.costs, &c.bank, dec!(5000), Some("21")),
        ];

        let advice = advise(&c, &bookings, date(2024, 1, 1), date(2024, 3, 31));

        assert_eq!(advice.output_vat, dec!(21));
        assert_eq!(advice.input_vat, dec!(1050));
        assert_eq!(advice.vat_reservation, Decimal::ZERO);
        assert_eq!(advice.taxable_profit, Decimal::ZERO);
        assert_eq!(advice.total_reservation, Decimal::ZERO);
        assert_eq!(advice.monthly_reservation, Decimal::ZERO);
    }

    #[test]
    fn test_credit_note_reduces_output_vat() {
        let c = chart();
        let bookings = vec![
            c.booking(date(2024, 2, 1), &c.bank, &c.revenue, dec!(1000), Some("9")),
            c.booking(date(2024, 2, 5), &c.revenue, &c.bank, dec!(200), Some("9")),
            c.booking(date(2025, 1, 1), &c.bank, &c.revenue, dec!(999), Some("21")),
        ];

        let advice = advise(&c, &bookings, date(2024, 1, 1), date(2024, 3, 31));

        assert_eq!(advice.output_vat, dec!(72));
        assert_eq!(advice.vat_reservation, dec!(72));
    }
}
