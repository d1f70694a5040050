use chrono::NaiveDate;

#[inline]
pub const fn is_leap (year: i32) -> bool {
    ((year % 4 == 0) && (year % 100!= 0)) || (year % 400 == 0)
}


pub const fn days_of_month (year: i32, month: u32) -> u32 {
    const NO_LEAP_EOM: [u32; 13] = [
        0, 31, 28, 31, 30,
        31, 30, 31, 31, 30,
        31, 30, 31
    ];

    const LEAP_EOM: [u32; 13] = [
        0, 31, 29, 31, 30,
        31, 30, 31, 31, 30,
        31, 30, 31
    ];

    if is_leap(year) {
        LEAP_EOM[month as usize]
    } else {
        NO_LEAP_EOM[month as usize]
    }
}

/// Date with `day` clamped to the end of the month, e.g. Feb 29 in a
/// non-leap year becomes Feb 28. `None` only for an invalid month or year.
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day.min(days_of_month(year, month)))
}

/// Shifts a (year, month) pair by `n` months, rolling over year boundaries.
#[inline]
pub fn shift_month(year: i32, month: u32, n: i32) -> (i32, u32) {
    let total = (month as i32 - 1) + n;
    (year + total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap(2024));
        assert!(!is_leap(2025));
        assert!(!is_leap(1900));
        assert!(is_leap(2000));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_of_month(2024, 2), 29);
        assert_eq!(days_of_month(2025, 2), 28);
        assert_eq!(days_of_month(2025, 10), 31);
    }

    #[test]
    fn clamping() {
        assert_eq!(clamped_date(2025, 2, 29), NaiveDate::from_ymd_opt(2025, 2, 28));
        assert_eq!(clamped_date(2024, 2, 29), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(clamped_date(2025, 13, 1), None);
    }

    #[test]
    fn month_shifting_rolls_years() {
        assert_eq!(shift_month(2025, 1, -1), (2024, 12));
        assert_eq!(shift_month(2025, 12, 1), (2026, 1));
        assert_eq!(shift_month(2025, 6, 0), (2025, 6));
        assert_eq!(shift_month(2025, 3, -15), (2023, 12));
    }
}
