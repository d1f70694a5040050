use std::cell::RefCell;

use chrono::{
    Datelike,
    NaiveDate
};

use crate::holiday::holidayrecord::HolidayRecord;
use crate::holiday::region::Region;
use crate::service::cachebackend::CacheBackend;
use crate::service::holidayservice::HolidayService;
use crate::time::utility::{
    days_of_month,
    shift_month
};

const DAYS_PER_WEEK: usize = 7;

struct GridCache {
    year: i32,
    month: u32,
    cells: Vec<Option<NaiveDate>>
}

/// 月曆格狀檢視的 view-model（週日為每週第一天）。
pub struct MonthGridModel<'a, C: CacheBackend> {
    service: &'a HolidayService<C>,
    year: i32,
    month: u32,
    selected_date: NaiveDate,
    selected_region: Option<Region>,
    grid_cache: RefCell<Option<GridCache>>
}

impl<'a, C: CacheBackend> MonthGridModel<'a, C> {
    /// Opens on the month containing `today`, with `today` selected.
    pub fn new(service: &'a HolidayService<C>, today: NaiveDate) -> Self {
        Self {
            service,
            year: today.year(),
            month: today.month(),
            selected_date: today,
            selected_region: None,
            grid_cache: RefCell::new(None)
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn select_date(&mut self, d: NaiveDate) {
        self.selected_date = d;
    }

    pub fn selected_region(&self) -> Option<Region> {
        self.selected_region
    }

    pub fn set_selected_region(&mut self, region: Option<Region>) {
        self.selected_region = region;
    }

    pub fn previous_month(&mut self) {
        (self.year, self.month) = shift_month(self.year, self.month, -1);
    }

    pub fn next_month(&mut self) {
        (self.year, self.month) = shift_month(self.year, self.month, 1);
    }

    /// Whether `delta` months away is still inside the supported year range.
    pub fn can_shift_month(&self, delta: i32) -> bool {
        let (year, _) = shift_month(self.year, self.month, delta);
        self.service.is_year_supported(year)
    }

    /// Cells of the month grid: leading `None`s up to the first day's weekday,
    /// then every day, then trailing `None`s to complete the last week.
    pub fn days_in_month(&self) -> Vec<Option<NaiveDate>> {
        if let Some(cache) = self.grid_cache.borrow().as_ref() {
            if cache.year == self.year && cache.month == self.month {
                return cache.cells.clone();
            }
        }

        let cells = build_grid(self.year, self.month);
        *self.grid_cache.borrow_mut() = Some(GridCache {
            year: self.year,
            month: self.month,
            cells: cells.clone()
        });
        cells
    }

    pub fn weeks(&self) -> Vec<Vec<Option<NaiveDate>>> {
        self.days_in_month()
            .chunks(DAYS_PER_WEEK)
            .map(|week| week.to_vec())
            .collect()
    }

    /// Holiday to mark on a day cell, scoped to the selected region.
    /// Without a region Hong Kong wins on shared days.
    pub fn filtered_holiday(&self, d: NaiveDate) -> Option<HolidayRecord> {
        self.service.holiday(d, self.selected_region)
    }

    pub fn is_multi_region_day(&self, d: NaiveDate) -> bool {
        self.selected_region.is_none() && self.service.has_multi_region_holidays(d)
    }

    pub fn current_month_holidays(&self) -> Vec<HolidayRecord> {
        let mut holidays = self.service.holidays_in_month(self.month, self.year, self.selected_region);
        holidays.sort_by_key(|h| h.start_date());
        holidays
    }
}

fn build_grid(year: i32, month: u32) -> Vec<Option<NaiveDate>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let leading = first.weekday().num_days_from_sunday() as usize;
    let mut cells: Vec<Option<NaiveDate>> = vec![None; leading];
    cells.extend((1..=days_of_month(year, month)).map(|day| NaiveDate::from_ymd_opt(year, month, day)));

    let remainder = cells.len() % DAYS_PER_WEEK;
    if remainder != 0 {
        cells.resize(cells.len() + DAYS_PER_WEEK - remainder, None);
    }
    cells
}
