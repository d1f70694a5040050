use std::fmt;

use chrono::{
    DateTime,
    FixedOffset,
    NaiveDate,
    Utc
};
use serde::{
    Deserialize,
    Serialize
};

/// 假日所屬地區。
///
/// 兩地同日放假時不使用 `Both` 之類的第三種狀態，而是各自保留一筆紀錄，
/// 由查詢端透過 `HolidayService::holidays_for_date` 的結果判斷是否為多地區假日。
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    HongKong,
    Mainland
}

/// Order in which regions are concatenated for region-less queries.
///
/// When a single slot has to show one record for a day observed by several
/// regions, the first region in this list wins. Hong Kong first is a fixed
/// display rule, not something derived from the data.
pub const REGION_PRIORITY: [Region; 2] = [Region::HongKong, Region::Mainland];

const UTC_PLUS_EIGHT_SECONDS: i32 = 8 * 3600;

impl Region {
    pub fn all() -> &'static [Region] {
        &REGION_PRIORITY
    }

    pub fn code(&self) -> &'static str {
        match self {
            Region::HongKong => "hk",
            Region::Mainland => "mainland"
        }
    }

    /// 來源資料所採用的固定時區偏移，兩地皆為 UTC+8。
    pub fn utc_offset(&self) -> FixedOffset {
        match self {
            Region::HongKong | Region::Mainland => FixedOffset::east_opt(UTC_PLUS_EIGHT_SECONDS).unwrap()
        }
    }

    /// Calendar day of `instant` in this region's local time.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.utc_offset()).date_naive()
    }

    /// Position of this region in [`REGION_PRIORITY`]; lower wins ties.
    pub fn priority(&self) -> usize {
        REGION_PRIORITY
            .iter()
            .position(|r| r == self)
            .unwrap_or(REGION_PRIORITY.len())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::HongKong => write!(f, "Hong Kong"),
            Region::Mainland => write!(f, "Mainland")
        }
    }
}

/// Shared region-filter predicate: `None` accepts every region.
#[inline]
pub fn matches_region(filter: Option<Region>, region: Region) -> bool {
    filter.map_or(true, |r| r == region)
}
