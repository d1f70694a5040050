use chrono::{
    Datelike,
    Days,
    NaiveDate
};
use serde::Serialize;

use crate::holiday::region::Region;

const ONE_DAY: Days = Days::new(1);

/// 單一地區的一筆假日紀錄。
///
/// - `id` 由來源資料決定（香港取 `uid`，內地取「地區 + 日期 + 索引」組合），
///   同一份資料重複載入會得到相同的 `id`。`id` 僅在同一地區內唯一，
///   跨地區合併時以 `(region, id)` 區分。
/// - `end_date` 採「不含」慣例：單日假期的 `end_date == start_date + 1`。
/// - 建立後不可變，只提供 getter。
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct HolidayRecord {
    id: String,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    region: Region
}

impl HolidayRecord {
    /// `end_date` values not after `start_date` are normalized to a one-day span.
    pub fn new(
        id: String,
        name: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        region: Region
    ) -> HolidayRecord {
        let end_date = if end_date > start_date {
            end_date
        } else {
            start_date + ONE_DAY
        };
        HolidayRecord { id, name, start_date, end_date, region }
    }

    pub fn single_day(id: String, name: String, date: NaiveDate, region: Region) -> HolidayRecord {
        HolidayRecord::new(id, name, date, date + ONE_DAY, region)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Identity that stays unique when records of several regions are merged.
    pub fn key(&self) -> (Region, &str) {
        (self.region, self.id.as_str())
    }

    pub fn year(&self) -> i32 {
        self.start_date.year()
    }

    pub fn month(&self) -> u32 {
        self.start_date.month()
    }

    /// Number of calendar days covered, at least 1.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Inclusive last day of the holiday.
    pub fn last_day(&self) -> NaiveDate {
        self.end_date - ONE_DAY
    }

    #[inline]
    pub fn starts_on(&self, d: NaiveDate) -> bool {
        self.start_date == d
    }

    #[inline]
    pub fn covers(&self, d: NaiveDate) -> bool {
        self.start_date <= d && d < self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn single_day_ends_next_day() {
        let record = HolidayRecord::single_day(
            "mainland-20250101-0".to_owned(),
            "元旦".to_owned(),
            ymd(2025, 1, 1),
            Region::Mainland
        );
        assert_eq!(record.end_date(), ymd(2025, 1, 2));
        assert_eq!(record.duration_days(), 1);
        assert_eq!(record.last_day(), ymd(2025, 1, 1));
        assert!(record.starts_on(ymd(2025, 1, 1)));
        assert!(record.covers(ymd(2025, 1, 1)));
        assert!(!record.covers(ymd(2025, 1, 2)));
    }

    #[test]
    fn non_increasing_end_is_normalized() {
        let record = HolidayRecord::new(
            "x".to_owned(),
            "x".to_owned(),
            ymd(2025, 5, 1),
            ymd(2025, 5, 1),
            Region::HongKong
        );
        assert_eq!(record.end_date(), ymd(2025, 5, 2));
    }

    #[test]
    fn multi_day_span() {
        let record = HolidayRecord::new(
            "x".to_owned(),
            "春节".to_owned(),
            ymd(2025, 1, 28),
            ymd(2025, 2, 5),
            Region::Mainland
        );
        assert_eq!(record.duration_days(), 8);
        assert!(record.covers(ymd(2025, 2, 4)));
        assert_eq!(record.year(), 2025);
        assert_eq!(record.month(), 1);
    }

    #[test]
    fn key_pairs_region_with_id() {
        let hk = HolidayRecord::single_day("20250101".to_owned(), "一月一日".to_owned(), ymd(2025, 1, 1), Region::HongKong);
        let ml = HolidayRecord::single_day("20250101".to_owned(), "元旦".to_owned(), ymd(2025, 1, 1), Region::Mainland);
        assert_ne!(hk.key(), ml.key());
    }
}
