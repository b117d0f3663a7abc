//! Recurrence rules.
//!
//! A schedule fires at most once per calendar month. Days 29-31 are matched
//! literally, so a schedule on the 31st does not fire in months without one.

use chrono::{Datelike, NaiveDate};

use super::types::{Frequency, RecurringBooking};

/// Months a quarterly schedule fires in.
const QUARTER_START_MONTHS: [u32; 4] = [1, 4, 7, 10];

/// Calendar month key used for run idempotency, e.g. `2024-03`.
#[must_use]
pub fn period_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

impl Frequency {
    /// Whether the frequency allows firing in `month` (1-12).
    #[must_use]
    pub fn fires_in_month(self, month: u32, start_month: u32) -> bool {
        match self {
            Self::Monthly => true,
            Self::Quarterly => QUARTER_START_MONTHS.contains(&month),
            Self::Yearly => month == start_month,
        }
    }
}

impl RecurringBooking {
    /// Active and within its start/end window on `today`.
    #[must_use]
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.is_active
            && self.start_date <= today
            && self.end_date.is_none_or(|end| end >= today)
    }

    /// A booking was already materialized in the month of `today`.
    #[must_use]
    pub fn processed_in_month_of(&self, today: NaiveDate) -> bool {
        self.last_processed
            .is_some_and(|last| same_month(last, today))
    }

    /// The schedule's day and frequency match `today`.
    #[must_use]
    pub fn is_due_on(&self, today: NaiveDate) -> bool {
        today.day() == self.day_of_month
            && self
                .frequency
                .fires_in_month(today.month(), self.start_date.month())
    }
}
