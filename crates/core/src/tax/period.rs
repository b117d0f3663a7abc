//! BTW (VAT) return periods.
//!
//! Returns are filed per calendar quarter and are due on the last day of the
//! month following the quarter.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Serialize, Serializer};

use crate::calendar::first_of_month;
use crate::ledger::DateRange;

/// A calendar quarter for VAT filing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VatPeriod {
    start: NaiveDate,
}

impl VatPeriod {
    /// The quarter containing `date`.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            start: first_of_month(date) - Months::new(date.month0() % 3),
        }
    }

    /// Quarter `quarter` (1-4) of `year`.
    #[must_use]
    pub fn new(year: i32, quarter: u32) -> Option<Self> {
        if !(1..=4).contains(&quarter) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, (quarter - 1) * 3 + 1, 1).map(|start| Self { start })
    }

    /// Year of the quarter.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// Quarter number, 1-4.
    #[must_use]
    pub fn quarter(&self) -> u32 {
        self.start.month0() / 3 + 1
    }

    /// First day of the quarter.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the quarter.
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.start + Months::new(3) - Days::new(1)
    }

    /// Last day to file and pay the return.
    #[must_use]
    pub fn filing_deadline(&self) -> NaiveDate {
        self.start + Months::new(4) - Days::new(1)
    }

    /// The quarter as a booking window.
    #[must_use]
    pub fn range(&self) -> DateRange {
        DateRange::between(self.start, self.end())
    }

    /// The following quarter.
    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            start: self.start + Months::new(3),
        }
    }

    /// The preceding quarter.
    #[must_use]
    pub fn previous(&self) -> Self {
        Self {
            start: self.start - Months::new(3),
        }
    }

    /// Whether the deadline has passed on `today`.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        today > self.filing_deadline()
    }
}

impl fmt::Display for VatPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-Q{}", self.year(), self.quarter())
    }
}

impl Serialize for VatPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
