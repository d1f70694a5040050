// ── cache_backend.rs ────────────────────────────────────────────────────────

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{
    Arc,
    Mutex,
    MutexGuard,
    PoisonError
};

use crate::holiday::holidayrecord::HolidayRecord;
use crate::holiday::region::Region;

/// 兩層快取：地區 → 年份 → 假日清單。
///
/// 清單以 `Arc<[HolidayRecord]>` 保存，查詢端拿到的是共享的唯讀 slice，
/// 無法回寫進快取。沒有 TTL，只能透過 `clear` / `clear_region` 失效。
pub type RegionYearCache = HashMap<Region, HashMap<i32, Arc<[HolidayRecord]>>>;

/// 抽象快取行為：查詢，缺少時呼叫 `load` 計算並存入。
pub trait CacheBackend {
    fn get_or_load(
        &self,
        region: Region,
        year: i32,
        load: impl FnOnce() -> Vec<HolidayRecord>,
    ) -> Arc<[HolidayRecord]>;

    fn clear(&self);

    fn clear_region(&self, region: Region);

    fn is_cached(&self, region: Region, year: i32) -> bool;
}

fn lookup_or_insert(
    cache: &mut RegionYearCache,
    region: Region,
    year: i32,
    load: impl FnOnce() -> Vec<HolidayRecord>,
) -> Arc<[HolidayRecord]> {
    cache
        .entry(region)
        .or_default()
        .entry(year)
        .or_insert_with(|| Arc::from(load()))
        .clone()
}

fn contains(cache: &RegionYearCache, region: Region, year: i32) -> bool {
    cache.get(&region).is_some_and(|years| years.contains_key(&year))
}

// ── 單執行緒版：RefCell ──────────────────────────────────────────────────────

#[derive(Default)]
pub struct RefCellBackend {
    inner: RefCell<RegionYearCache>,
}

impl RefCellBackend {
    pub fn new() -> Self {
        Self { inner: RefCell::new(HashMap::new()) }
    }
}

impl CacheBackend for RefCellBackend {
    fn get_or_load(
        &self,
        region: Region,
        year: i32,
        load: impl FnOnce() -> Vec<HolidayRecord>,
    ) -> Arc<[HolidayRecord]> {
        let mut inner = self.inner.borrow_mut();
        lookup_or_insert(&mut inner, region, year, load)
    }

    fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    fn clear_region(&self, region: Region) {
        self.inner.borrow_mut().remove(&region);
    }

    fn is_cached(&self, region: Region, year: i32) -> bool {
        contains(&self.inner.borrow(), region, year)
    }
}

// ── 多執行緒版：Mutex ────────────────────────────────────────────────────────
//
// check → load → store 整段持有同一把鎖，同一 (region, year) 同時 miss 時
// 只有第一條執行緒會呼叫 loader，其餘等待後直接讀取快取。
// 載入只讀本機檔案，持鎖時間很短。

#[derive(Default)]
pub struct MutexBackend {
    inner: Mutex<RegionYearCache>,
}

impl MutexBackend {
    pub fn new() -> Self {
        Self { inner: Mutex::new(HashMap::new()) }
    }

    // 快取內容在任何時間點都是完整的，panic 後的資料仍可安全使用。
    fn lock(&self) -> MutexGuard<'_, RegionYearCache> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CacheBackend for MutexBackend {
    fn get_or_load(
        &self,
        region: Region,
        year: i32,
        load: impl FnOnce() -> Vec<HolidayRecord>,
    ) -> Arc<[HolidayRecord]> {
        let mut inner = self.lock();
        lookup_or_insert(&mut inner, region, year, load)
    }

    fn clear(&self) {
        self.lock().clear();
    }

    fn clear_region(&self, region: Region) {
        self.lock().remove(&region);
    }

    fn is_cached(&self, region: Region, year: i32) -> bool {
        contains(&self.lock(), region, year)
    }
}
