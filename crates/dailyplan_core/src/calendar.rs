//! Business-day calendar helpers.
//!
//! # Responsibility
//! - Classify calendar dates as weekdays or weekends.
//! - Count business days between two dates for allocation windows.
//!
//! # Invariants
//! - All functions are pure and operate on `NaiveDate`, so time-of-day can
//!   never perturb date arithmetic.
//! - Saturday and Sunday are the only non-business days.

use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

/// Returns whether `date` falls on a Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Signed count of weekdays from `from` up to, but not including, `to`.
///
/// Returns a negative count when `to` is before `from` and zero when both
/// dates are equal. `business_days_between(today, due) + 1` is the inclusive
/// remaining-workday count for a weekday due date.
pub fn business_days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let calendar_days = to.signed_duration_since(from).num_days();
    let sign = if calendar_days < 0 { -1 } else { 1 };

    // Whole weeks contribute five business days each, whatever the start day.
    let weeks = calendar_days / 7;
    let mut count = weeks * 5;
    let mut cursor = shift_days(from, weeks * 7);

    // At most six leftover days to walk.
    while cursor != to {
        if !is_weekend(cursor) {
            count += sign;
        }
        cursor = shift_days(cursor, sign);
    }

    count
}

/// Inclusive count of business days in `[today, due]`.
///
/// Zero or negative means no workday is left to schedule on. A weekend due
/// date is not counted as a workday.
pub fn business_days_left(today: NaiveDate, due: NaiveDate) -> i64 {
    let between = business_days_between(today, due);
    if is_weekend(due) {
        between
    } else {
        between + 1
    }
}

/// Returns whether `a` is strictly earlier than `b`.
pub fn is_before(a: NaiveDate, b: NaiveDate) -> bool {
    a < b
}

/// Returns whether `date` is the same calendar day as `today`.
pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

/// Current calendar date in the local time zone.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Returns `date` when it is a weekday, otherwise the following Monday.
pub fn next_weekday(date: NaiveDate) -> NaiveDate {
    let mut cursor = date;
    while is_weekend(cursor) {
        cursor = add_days(cursor, 1);
    }
    cursor
}

/// Adds `days` calendar days, saturating at the maximum representable date.
pub fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    shifted.unwrap_or(if days >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

#[cfg(test)]
mod tests {
    use super::{
        add_days, business_days_between, business_days_left, is_before, is_today, is_weekend,
        next_weekday,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2024-06-03 is a Monday.
    fn monday() -> NaiveDate {
        date(2024, 6, 3)
    }

    #[test]
    fn weekend_detection_covers_the_whole_week() {
        let flags: Vec<bool> = (0..7)
            .map(|offset| is_weekend(add_days(monday(), offset)))
            .collect();
        assert_eq!(flags, vec![false, false, false, false, false, true, true]);
    }

    #[test]
    fn business_days_between_counts_start_but_not_end() {
        assert_eq!(business_days_between(monday(), monday()), 0);
        assert_eq!(business_days_between(monday(), add_days(monday(), 2)), 2);
        // Monday -> next Monday spans one full week.
        assert_eq!(business_days_between(monday(), add_days(monday(), 7)), 5);
        // Monday -> Saturday counts Monday through Friday.
        assert_eq!(business_days_between(monday(), add_days(monday(), 5)), 5);
        // Saturday -> Monday has no business day in between.
        assert_eq!(
            business_days_between(add_days(monday(), 5), add_days(monday(), 7)),
            0
        );
        assert_eq!(business_days_between(monday(), add_days(monday(), 17)), 13);
    }

    #[test]
    fn business_days_between_is_negative_for_past_dates() {
        let previous_friday = date(2024, 5, 31);
        assert_eq!(business_days_between(monday(), previous_friday), -1);
        let two_weeks_back = date(2024, 5, 20);
        assert_eq!(business_days_between(monday(), two_weeks_back), -10);
    }

    #[test]
    fn business_days_left_is_inclusive() {
        let wednesday = add_days(monday(), 2);
        assert_eq!(business_days_left(monday(), wednesday), 3);
        assert_eq!(business_days_left(monday(), monday()), 1);

        let saturday = add_days(monday(), 5);
        assert_eq!(business_days_left(monday(), saturday), 5);
        assert_eq!(business_days_left(saturday, add_days(monday(), 7)), 1);
        assert_eq!(business_days_left(saturday, saturday), 0);
    }

    #[test]
    fn business_days_left_is_not_positive_when_overdue() {
        let previous_friday = date(2024, 5, 31);
        let previous_sunday = date(2024, 6, 2);
        assert!(business_days_left(monday(), previous_friday) <= 0);
        assert!(business_days_left(monday(), previous_sunday) <= 0);
        assert!(business_days_left(previous_sunday, date(2024, 6, 1)) <= 0);
    }

    #[test]
    fn comparisons_use_calendar_days() {
        assert!(is_before(date(2024, 6, 2), monday()));
        assert!(!is_before(monday(), monday()));
        assert!(is_today(monday(), monday()));
        assert!(!is_today(add_days(monday(), 1), monday()));
    }

    #[test]
    fn next_weekday_rolls_weekends_forward() {
        assert_eq!(next_weekday(monday()), monday());
        assert_eq!(next_weekday(date(2024, 6, 1)), monday());
        assert_eq!(next_weekday(date(2024, 6, 2)), monday());
    }

    #[test]
    fn add_days_saturates() {
        assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
    }
}
