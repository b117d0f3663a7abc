//! Recurring booking types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use kasboek_shared::types::{BookingId, CompanyId, LedgerAccountId, RecurringBookingId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerAccount;

/// How often a recurring booking fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every month on the configured day.
    Monthly,
    /// On the configured day of January, April, July and October.
    Quarterly,
    /// Once a year, in the month the schedule started.
    Yearly,
}

impl Frequency {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            other => Err(format!("unknown frequency: {other}")),
        }
    }
}

/// A booking template that materializes on a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBooking {
    /// Unique identifier.
    pub id: RecurringBookingId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Description copied onto each booking.
    pub description: String,
    /// Account debited.
    pub debit_account_id: LedgerAccountId,
    /// Account credited.
    pub credit_account_id: LedgerAccountId,
    /// Amount per booking.
    pub amount: Decimal,
    /// How often the schedule fires.
    pub frequency: Frequency,
    /// Calendar day the schedule fires on (1-31).
    pub day_of_month: u32,
    /// First day the schedule may fire.
    pub start_date: NaiveDate,
    /// Last day the schedule may fire.
    pub end_date: Option<NaiveDate>,
    /// VAT code copied onto each booking.
    pub vat_code: Option<String>,
    /// Author of the schedule, recorded on each booking.
    pub created_by: UserId,
    /// Inactive schedules never fire.
    pub is_active: bool,
    /// Date of the most recent materialized booking.
    pub last_processed: Option<NaiveDate>,
    /// When the schedule was created.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a recurring booking.
#[derive(Debug, Clone)]
pub struct CreateRecurringBookingInput {
    /// Owning company.
    pub company_id: CompanyId,
    /// Description copied onto each booking.
    pub description: String,
    /// Account debited.
    pub debit_account_id: LedgerAccountId,
    /// Account credited.
    pub credit_account_id: LedgerAccountId,
    /// Amount per booking.
    pub amount: Decimal,
    /// How often the schedule fires.
    pub frequency: Frequency,
    /// Calendar day the schedule fires on.
    pub day_of_month: u32,
    /// First day the schedule may fire.
    pub start_date: NaiveDate,
    /// Optional last day.
    pub end_date: Option<NaiveDate>,
    /// Optional VAT code.
    pub vat_code: Option<String>,
    /// Author.
    pub created_by: UserId,
}

/// A schedule with its debit and credit accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBookingWithAccounts {
    /// The schedule.
    #[serde(flatten)]
    pub recurring: RecurringBooking,
    /// Debit account.
    pub debit_account: LedgerAccount,
    /// Credit account.
    pub credit_account: LedgerAccount,
}

/// A schedule that produced a booking in this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedRecurring {
    /// The schedule.
    pub recurring_id: RecurringBookingId,
    /// The booking it produced.
    pub booking_id: BookingId,
    /// Booking description.
    pub description: String,
}

/// A due schedule whose booking failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringItemError {
    /// The schedule.
    pub recurring_id: RecurringBookingId,
    /// Its description.
    pub description: String,
    /// Why it failed.
    pub error: String,
}

/// Result of a recurring booking run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringRunReport {
    /// Schedules that produced a booking.
    pub processed: Vec<ProcessedRecurring>,
    /// Due schedules that failed.
    pub errors: Vec<RecurringItemError>,
    /// Number of bookings created.
    pub count: usize,
}
