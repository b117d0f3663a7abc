//! Calendar month arithmetic shared by reports and tax periods.

use chrono::{Datelike, Days, Months, NaiveDate};

/// First day of the month containing `date`.
#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Last day of the month containing `date`.
#[must_use]
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date) + Months::new(1) - Days::new(1)
}

/// Number of calendar months touched by `[from, to]`, at least one.
#[must_use]
pub fn months_spanned(from: NaiveDate, to: NaiveDate) -> u32 {
    let span = month_index(to) - month_index(from) + 1;
    u32::try_from(span).unwrap_or(0).max(1)
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

/// Month starts from the month of `from` through the month of `to`.
pub fn month_starts(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let last = first_of_month(to);
    std::iter::successors(Some(first_of_month(from)), |month| {
        Some(*month + Months::new(1))
    })
    .take_while(move |month| *month <= last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2024, 2, 14), date(2024, 2, 1), date(2024, 2, 29))]
    #[case(date(2023, 2, 1), date(2023, 2, 1), date(2023, 2, 28))]
    #[case(date(2024, 12, 31), date(2024, 12, 1), date(2024, 12, 31))]
    fn test_month_bounds(
        #[case] day: NaiveDate,
        #[case] first: NaiveDate,
        #[case] last: NaiveDate,
    ) {
        assert_eq!(first_of_month(day), first);
        assert_eq!(last_of_month(day), last);
    }

    #[rstest]
    #[case(date(2024, 1, 1), date(2024, 12, 31), 12)]
    #[case(date(2024, 3, 15), date(2024, 3, 20), 1)]
    #[case(date(2023, 11, 1), date(2024, 2, 1), 4)]
    #[case(date(2024, 5, 1), date(2024, 4, 1), 1)]
    fn test_months_spanned(#[case] from: NaiveDate, #[case] to: NaiveDate, #[case] months: u32) {
        assert_eq!(months_spanned(from, to), months);
    }

    #[test]
    fn test_month_starts() {
        let months: Vec<_> = month_starts(date(2023, 11, 20), date(2024, 1, 5)).collect();
        assert_eq!(
            months,
            vec![date(2023, 11, 1), date(2023, 12, 1), date(2024, 1, 1)]
        );
    }
}
