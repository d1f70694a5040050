use chrono::{
    Datelike,
    NaiveDate
};

use crate::time::utility::clamped_date;
use super::localization::Language;

/// 距離假期的天數，供列表與卡片顯示。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DaysUntil {
    Today,
    Tomorrow,
    Upcoming(i64),
    Passed(i64)
}

impl DaysUntil {
    pub fn between(holiday_date: NaiveDate, today: NaiveDate) -> DaysUntil {
        let days = (holiday_date - today).num_days();
        match days {
            0 => DaysUntil::Today,
            1 => DaysUntil::Tomorrow,
            d if d > 1 => DaysUntil::Upcoming(d),
            d => DaysUntil::Passed(-d)
        }
    }

    pub fn is_past(&self) -> bool {
        matches!(self, DaysUntil::Passed(_))
    }

    pub fn text(&self, language: Language) -> String {
        match (self, language) {
            (DaysUntil::Today, Language::English) => "Today".to_owned(),
            (DaysUntil::Tomorrow, Language::English) => "Tomorrow".to_owned(),
            (DaysUntil::Upcoming(d), Language::English) => format!("In {} days", d),
            (DaysUntil::Passed(d), Language::English) => format!("{} days ago", d),
            (DaysUntil::Today, _) => "今天".to_owned(),
            (DaysUntil::Tomorrow, _) => "明天".to_owned(),
            (DaysUntil::Upcoming(d), Language::TraditionalChinese) => format!("還有 {} 天", d),
            (DaysUntil::Upcoming(d), _) => format!("还有 {} 天", d),
            (DaysUntil::Passed(d), Language::TraditionalChinese) => format!("已過去 {} 天", d),
            (DaysUntil::Passed(d), _) => format!("已过去 {} 天", d)
        }
    }
}

/// Days until the next occurrence of the holiday's month and day.
///
/// A holiday already passed this year counts towards the same month and day
/// of the following year; Feb 29 falls back to Feb 28 in non-leap years.
pub fn days_until_next_occurrence(holiday_date: NaiveDate, today: NaiveDate) -> i64 {
    if holiday_date >= today {
        return (holiday_date - today).num_days();
    }
    clamped_date(today.year() + 1, holiday_date.month(), holiday_date.day())
        .map_or(0, |next| (next - today).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn classification() {
        let today = ymd(2025, 9, 30);
        assert_eq!(DaysUntil::between(ymd(2025, 9, 30), today), DaysUntil::Today);
        assert_eq!(DaysUntil::between(ymd(2025, 10, 1), today), DaysUntil::Tomorrow);
        assert_eq!(DaysUntil::between(ymd(2025, 10, 7), today), DaysUntil::Upcoming(7));
        assert_eq!(DaysUntil::between(ymd(2025, 9, 20), today), DaysUntil::Passed(10));
        assert!(DaysUntil::Passed(1).is_past());
    }

    #[test]
    fn localized_text() {
        assert_eq!(DaysUntil::Upcoming(5).text(Language::SimplifiedChinese), "还有 5 天");
        assert_eq!(DaysUntil::Passed(3).text(Language::SimplifiedChinese), "已过去 3 天");
        assert_eq!(DaysUntil::Today.text(Language::TraditionalChinese), "今天");
        assert_eq!(DaysUntil::Tomorrow.text(Language::English), "Tomorrow");
    }

    #[test]
    fn next_occurrence_rolls_to_next_year() {
        let today = ymd(2025, 10, 17);
        assert_eq!(days_until_next_occurrence(ymd(2025, 12, 25), today), 69);
        assert_eq!(days_until_next_occurrence(ymd(2025, 10, 1), today), 349);
        assert_eq!(days_until_next_occurrence(ymd(2025, 10, 17), today), 0);
    }

    #[test]
    fn leap_day_clamps() {
        let today = ymd(2024, 3, 1);
        assert_eq!(days_until_next_occurrence(ymd(2024, 2, 29), today), 364);
    }
}
