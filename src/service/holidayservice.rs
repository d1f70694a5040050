use std::collections::{
    BTreeMap,
    HashMap
};
use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::{
    DateTime,
    Datelike,
    NaiveDate,
    TimeZone
};
use tracing::{
    debug,
    info
};

use crate::holiday::holidayrecord::HolidayRecord;
use crate::holiday::region::{
    REGION_PRIORITY,
    Region,
    matches_region
};
use crate::loader::artifactsource::{
    ArtifactSource,
    BundledSource
};
use crate::loader::holidayloader::HolidayLoader;
use crate::loader::hongkongloader::HongKongLoader;
use crate::loader::mainlandloader::MainlandLoader;
use super::cachebackend::{
    CacheBackend,
    MutexBackend,
    RefCellBackend
};

pub const DEFAULT_SUPPORTED_YEARS: RangeInclusive<i32> = 2023..=2025;

/// 同一天各地區的第一筆紀錄。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultiRegionHolidays {
    pub hong_kong: Option<HolidayRecord>,
    pub mainland: Option<HolidayRecord>
}

impl MultiRegionHolidays {
    pub fn get(&self, region: Region) -> Option<&HolidayRecord> {
        match region {
            Region::HongKong => self.hong_kong.as_ref(),
            Region::Mainland => self.mainland.as_ref()
        }
    }

    pub fn is_multi_region(&self) -> bool {
        self.hong_kong.is_some() && self.mainland.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.hong_kong.is_none() && self.mainland.is_none()
    }

    /// Record shown when only one slot is available, following [`REGION_PRIORITY`].
    pub fn preferred(&self) -> Option<&HolidayRecord> {
        REGION_PRIORITY.iter().find_map(|&region| self.get(region))
    }
}

/// 假日資料的唯一存取入口：負責快取、支援年份政策與所有衍生查詢。
///
/// # 快取
/// 以 `(region, year)` 為 key，第一次查詢時呼叫對應的 `HolidayLoader`，
/// 結果過濾成 `start_date.year() == year` 後存入 backend。之後的查詢直接回傳快取，
/// 直到 `clear_cache` / `clear_region_cache`。
///
/// # 失敗語意
/// 所有查詢都是 total 的：不支援的年份、缺檔、格式錯誤、查無資料，
/// 一律得到空清單或 `None`。不支援的年份不會觸發任何 loader 呼叫。
///
/// # 執行緒
/// `C` 決定執行緒安全性：`RefCellBackend` 供單執行緒使用，
/// `MutexBackend` 可在執行緒間共享。
pub struct HolidayService<C: CacheBackend> {
    loaders: HashMap<Region, Arc<dyn HolidayLoader>>,
    backend: C,
    supported_years: RangeInclusive<i32>
}

impl<C: CacheBackend> HolidayService<C> {
    fn new_with_backend(
        loaders: Vec<Arc<dyn HolidayLoader>>,
        supported_years: RangeInclusive<i32>,
        backend: C
    ) -> Self {
        let loaders = loaders
            .into_iter()
            .map(|loader| (loader.region(), loader))
            .collect();
        Self { loaders, backend, supported_years }
    }

    // ── 政策 ─────────────────────────────────────────────────────────────────

    pub fn supported_years(&self) -> RangeInclusive<i32> {
        self.supported_years.clone()
    }

    pub fn is_year_supported(&self, year: i32) -> bool {
        self.supported_years.contains(&year)
    }

    pub fn is_cached(&self, region: Region, year: i32) -> bool {
        self.backend.is_cached(region, year)
    }

    // ── 快取 ─────────────────────────────────────────────────────────────────

    fn region_holidays(&self, region: Region, year: i32) -> Arc<[HolidayRecord]> {
        self.backend.get_or_load(region, year, || {
            let Some(loader) = self.loaders.get(&region) else {
                debug!(%region, year, "no loader registered");
                return Vec::new();
            };
            let records: Vec<HolidayRecord> = loader
                .load(year)
                .into_iter()
                .filter(|record| record.year() == year)
                .collect();
            debug!(%region, year, count = records.len(), "cached holiday records");
            records
        })
    }

    /// Cached lists for every region accepted by `region`, in priority order.
    /// Empty for unsupported years, without touching any loader.
    fn scoped(&self, year: i32, region: Option<Region>) -> Vec<Arc<[HolidayRecord]>> {
        if !self.is_year_supported(year) {
            debug!(year, supported = ?self.supported_years, "year not supported");
            return Vec::new();
        }
        REGION_PRIORITY
            .iter()
            .filter(|&&r| matches_region(region, r))
            .map(|&r| self.region_holidays(r, year))
            .collect()
    }

    pub fn clear_cache(&self) {
        self.backend.clear();
        info!("holiday cache cleared");
    }

    pub fn clear_region_cache(&self, region: Region) {
        self.backend.clear_region(region);
        info!(%region, "holiday cache cleared for region");
    }

    // ── 查詢 ─────────────────────────────────────────────────────────────────

    /// All holidays of `year`; with `region == None` the regions are
    /// concatenated in [`REGION_PRIORITY`] order.
    pub fn holidays(&self, year: i32, region: Option<Region>) -> Vec<HolidayRecord> {
        self.scoped(year, region)
            .iter()
            .flat_map(|records| records.iter().cloned())
            .collect()
    }

    /// First record starting on `d`. Without a region filter Hong Kong wins.
    pub fn holiday(&self, d: NaiveDate, region: Option<Region>) -> Option<HolidayRecord> {
        self.scoped(d.year(), region)
            .iter()
            .flat_map(|records| records.iter())
            .find(|record| record.starts_on(d))
            .cloned()
    }

    pub fn holidays_in_month(&self, month: u32, year: i32, region: Option<Region>) -> Vec<HolidayRecord> {
        if !(1..=12).contains(&month) {
            return Vec::new();
        }
        self.scoped(year, region)
            .iter()
            .flat_map(|records| records.iter())
            .filter(|record| record.month() == month)
            .cloned()
            .collect()
    }

    /// Every record of every region starting on `d`.
    pub fn holidays_for_date(&self, d: NaiveDate) -> Vec<HolidayRecord> {
        self.scoped(d.year(), None)
            .iter()
            .flat_map(|records| records.iter())
            .filter(|record| record.starts_on(d))
            .cloned()
            .collect()
    }

    pub fn has_multi_region_holidays(&self, d: NaiveDate) -> bool {
        let holidays = self.holidays_for_date(d);
        match holidays.first() {
            Some(first) => holidays.iter().any(|record| record.region() != first.region()),
            None => false
        }
    }

    pub fn multi_region_holidays(&self, d: NaiveDate) -> MultiRegionHolidays {
        let holidays = self.holidays_for_date(d);
        let first_of = |region: Region| holidays.iter().find(|record| record.region() == region).cloned();
        MultiRegionHolidays {
            hong_kong: first_of(Region::HongKong),
            mainland: first_of(Region::Mainland)
        }
    }

    /// The single record to show for `d` when several regions observe it.
    pub fn preferred_holiday(&self, d: NaiveDate) -> Option<HolidayRecord> {
        self.holidays_for_date(d)
            .into_iter()
            .min_by_key(|record| record.region().priority())
    }

    pub fn region_counts(&self, year: i32) -> BTreeMap<Region, usize> {
        let mut counts = BTreeMap::new();
        if !self.is_year_supported(year) {
            return counts;
        }
        for &region in REGION_PRIORITY.iter() {
            counts.insert(region, self.region_holidays(region, year).len());
        }
        counts
    }

    // ── 帶時區的查詢：以 datetime 自身時區的日曆日為準，不轉成 UTC ───────────

    pub fn holiday_at<Tz: TimeZone>(&self, at: &DateTime<Tz>, region: Option<Region>) -> Option<HolidayRecord> {
        self.holiday(at.date_naive(), region)
    }

    pub fn holidays_at<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> Vec<HolidayRecord> {
        self.holidays_for_date(at.date_naive())
    }
}

/// The two standard loaders reading from one artifact source.
pub fn standard_loaders(
    source: Arc<dyn ArtifactSource>,
    hong_kong_file_template: &str,
    mainland_file_template: &str
) -> Vec<Arc<dyn HolidayLoader>> {
    vec![
        Arc::new(HongKongLoader::with_template(Arc::clone(&source), hong_kong_file_template)),
        Arc::new(MainlandLoader::with_template(source, mainland_file_template)),
    ]
}

impl HolidayService<RefCellBackend> {
    pub fn new(loaders: Vec<Arc<dyn HolidayLoader>>, supported_years: RangeInclusive<i32>) -> Self {
        Self::new_with_backend(loaders, supported_years, RefCellBackend::new())
    }

    /// Service over the artifacts compiled into the crate.
    pub fn bundled() -> Self {
        let source: Arc<dyn ArtifactSource> = Arc::new(BundledSource::new());
        Self::new(
            vec![
                Arc::new(HongKongLoader::new(Arc::clone(&source))),
                Arc::new(MainlandLoader::new(source)),
            ],
            DEFAULT_SUPPORTED_YEARS
        )
    }
}

impl HolidayService<MutexBackend> {
    pub fn new_threadsafe(loaders: Vec<Arc<dyn HolidayLoader>>, supported_years: RangeInclusive<i32>) -> Self {
        Self::new_with_backend(loaders, supported_years, MutexBackend::new())
    }
}

pub type SingleThreadedHolidayService = HolidayService<RefCellBackend>;
pub type MultiThreadedHolidayService = HolidayService<MutexBackend>;
