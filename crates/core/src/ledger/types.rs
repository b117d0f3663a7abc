//! Ledger domain types for accounts and bookings.
//!
//! A booking is a single double-entry posting: one debit account, one credit
//! account and one positive amount. Bookings are immutable once stored.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use kasboek_shared::types::{BookingId, CompanyId, LedgerAccountId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ledger account type.
///
/// Balance accounts end up on the balance sheet, result accounts on the
/// profit and loss statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Balance sheet account (bank, receivables, VAT, equity).
    Balance,
    /// Profit and loss account (revenue, costs).
    Result,
}

impl AccountType {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Balance => "balance",
            Self::Result => "result",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "balance" => Ok(Self::Balance),
            "result" => Ok(Self::Result),
            _ => Err(format!("Unknown account type: {s}")),
        }
    }
}

/// A chart of accounts entry owned by one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerAccount {
    /// Unique identifier.
    pub id: LedgerAccountId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Account code, unique within the company (e.g. "1000", "4600").
    pub code: String,
    /// Display name.
    pub name: String,
    /// Balance or result account.
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

/// Input for creating a ledger account.
#[derive(Debug, Clone)]
pub struct NewLedgerAccount {
    /// Owning company.
    pub company_id: CompanyId,
    /// Account code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Balance or result account.
    pub account_type: AccountType,
}

/// Which side of a booking an account sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountSide {
    /// Debit side.
    Debit,
    /// Credit side.
    Credit,
}

impl fmt::Display for AccountSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => f.write_str("Debit"),
            Self::Credit => f.write_str("Credit"),
        }
    }
}

/// A stored double-entry posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique identifier.
    pub id: BookingId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Booking date.
    pub date: NaiveDate,
    /// Human-readable description.
    pub description: String,
    /// Account debited.
    pub debit_account_id: LedgerAccountId,
    /// Account credited.
    pub credit_account_id: LedgerAccountId,
    /// Positive amount in euros.
    pub amount: Decimal,
    /// Optional VAT code (e.g. "21", "9", "verlegd").
    pub vat_code: Option<String>,
    /// Actor who created the booking.
    pub created_by: UserId,
    /// When the booking was stored.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a booking.
#[derive(Debug, Clone)]
pub struct CreateBookingInput {
    /// The company this booking belongs to.
    pub company_id: CompanyId,
    /// Booking date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Account to debit (must belong to the company).
    pub debit_account_id: LedgerAccountId,
    /// Account to credit (must belong to the company).
    pub credit_account_id: LedgerAccountId,
    /// Amount (must be positive).
    pub amount: Decimal,
    /// Optional VAT code.
    pub vat_code: Option<String>,
    /// The actor creating the booking.
    pub created_by: UserId,
}

/// A booking that passed validation and is ready to be persisted.
///
/// Only the booking engine produces these; store implementations receive
/// them by reference.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// The company this booking belongs to.
    pub company_id: CompanyId,
    /// Booking date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Account to debit.
    pub debit_account_id: LedgerAccountId,
    /// Account to credit.
    pub credit_account_id: LedgerAccountId,
    /// Positive amount.
    pub amount: Decimal,
    /// Optional VAT code.
    pub vat_code: Option<String>,
    /// The actor creating the booking.
    pub created_by: UserId,
}

/// A validated booking together with the accounts it resolved.
#[derive(Debug, Clone)]
pub struct ValidatedBooking {
    pub(crate) booking: NewBooking,
    pub(crate) debit_account: LedgerAccount,
    pub(crate) credit_account: LedgerAccount,
}

impl ValidatedBooking {
    /// The booking to persist.
    #[must_use]
    pub fn booking(&self) -> &NewBooking {
        &self.booking
    }

    /// Combines the stored booking with the resolved accounts.
    #[must_use]
    pub fn into_result(self, booking: Booking) -> BookingWithAccounts {
        BookingWithAccounts {
            booking,
            debit_account: self.debit_account,
            credit_account: self.credit_account,
        }
    }
}

/// A stored booking with its debit and credit accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithAccounts {
    /// The stored booking.
    #[serde(flatten)]
    pub booking: Booking,
    /// The debit account as looked up during validation.
    pub debit_account: LedgerAccount,
    /// The credit account as looked up during validation.
    pub credit_account: LedgerAccount,
}

/// Inclusive date window used when reading bookings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First day (inclusive), or open-ended.
    pub from: Option<NaiveDate>,
    /// Last day (inclusive).
    pub to: NaiveDate,
}

impl DateRange {
    /// A closed window `[from, to]`.
    #[must_use]
    pub const fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to,
        }
    }

    /// Everything up to and including `to`.
    #[must_use]
    pub const fn until(to: NaiveDate) -> Self {
        Self { from: None, to }
    }

    /// Returns true if the date falls within the window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && date <= self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_account_type_round_trip_str() {
        assert_eq!("balance".parse::<AccountType>().unwrap(), AccountType::Balance);
        assert_eq!("result".parse::<AccountType>().unwrap(), AccountType::Result);
        assert!("asset".parse::<AccountType>().is_err());
        assert_eq!(AccountType::Result.to_string(), "result");
    }

    #[test]
    fn test_account_side_display() {
        assert_eq!(AccountSide::Debit.to_string(), "Debit");
        assert_eq!(AccountSide::Credit.to_string(), "Credit");
    }

    #[test]
    fn test_date_range_contains() {
        let range = DateRange::between(date(2024, 1, 1), date(2024, 3, 31));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 3, 31)));
        assert!(!range.contains(date(2023, 12, 31)));
        assert!(!range.contains(date(2024, 4, 1)));
    }

    #[test]
    fn test_open_ended_range() {
        let range = DateRange::until(date(2024, 6, 30));
        assert!(range.contains(date(1999, 1, 1)));
        assert!(!range.contains(date(2024, 7, 1)));
    }

    #[test]
    fn test_ledger_account_serializes_type_field() {
        let account = LedgerAccount {
            id: LedgerAccountId::new(),
            company_id: CompanyId::new(),
            code: "4600".to_string(),
            name: "Reiskosten".to_string(),
            account_type: AccountType::Result,
        };
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["type"], "result");
        assert_eq!(json["code"], "4600");
        assert!(json.get("companyId").is_some());
    }
}
