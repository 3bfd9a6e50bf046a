//! Month arithmetic for membership terms.
//!
//! Adding months keeps the day of month unless the target month is too
//! short, in which case the day is clamped to that month's last day
//! (Jan 31 + 1 month = Feb 28, or Feb 29 in a leap year).

use chrono::{Datelike, NaiveDate};

/// Whether `year` is a Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// The date `months` calendar months after `date`, clamping the day to the
/// end of a shorter target month.
///
/// Saturates at [`NaiveDate::MAX`] if the result would fall outside the
/// range chrono can represent.
pub fn advance(date: NaiveDate, months: u32) -> NaiveDate {
    let month_index = i64::from(date.month0()) + i64::from(months);
    let year = i64::from(date.year()) + month_index / 12;
    let Ok(year) = i32::try_from(year) else {
        return NaiveDate::MAX;
    };
    // Always 1..=12.
    let month = (month_index % 12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Months;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2025));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn end_of_january_clamps_to_february() {
        assert_eq!(advance(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(advance(date(2025, 1, 31), 1), date(2025, 2, 28));
    }

    #[test]
    fn twelve_months_is_same_day_next_year() {
        assert_eq!(advance(date(2023, 2, 28), 12), date(2024, 2, 28));
        assert_eq!(advance(date(2025, 7, 15), 12), date(2026, 7, 15));
        assert_eq!(advance(date(2024, 2, 29), 12), date(2025, 2, 28));
        assert_eq!(advance(date(2024, 2, 29), 48), date(2028, 2, 29));
    }

    #[test]
    fn quarter_carries_into_next_year() {
        assert_eq!(advance(date(2025, 11, 30), 3), date(2026, 2, 28));
        assert_eq!(advance(date(2025, 12, 31), 3), date(2026, 3, 31));
        assert_eq!(advance(date(2025, 5, 31), 1), date(2025, 6, 30));
    }

    #[test]
    fn zero_months_is_identity() {
        assert_eq!(advance(date(2025, 3, 31), 0), date(2025, 3, 31));
    }

    #[test]
    fn saturates_past_chrono_range() {
        assert_eq!(advance(NaiveDate::MAX, 12), NaiveDate::MAX);
    }

    #[test]
    fn agrees_with_chrono_for_plan_lengths() {
        // Every day from 2023 through 2028 (covers two leap years and a
        // century-free span) for each plan length.
        let mut d = date(2023, 1, 1);
        let end = date(2029, 1, 1);
        while d < end {
            for months in [1, 3, 12] {
                let got = advance(d, months);
                let want = d.checked_add_months(Months::new(months)).unwrap();
                assert_eq!(got, want, "advance({d}, {months})");
                assert!(got.day() <= days_in_month(got.year(), got.month()));
                if d.day() <= days_in_month(got.year(), got.month()) {
                    assert_eq!(got.day(), d.day());
                }
            }
            d = d.succ_opt().unwrap();
        }
    }
}
