use chrono::NaiveDate;

use crate::holiday::holidayrecord::HolidayRecord;
use crate::holiday::region::{
    Region,
    matches_region
};
use crate::service::cachebackend::CacheBackend;
use crate::service::holidayservice::{
    HolidayService,
    MultiRegionHolidays
};
use super::daysuntil::DaysUntil;
use super::localization::Language;

/// 列表中的一列。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HolidayRow {
    Single(HolidayRecord),
    /// Combined card for a day observed by both regions.
    MultiRegion {
        hong_kong: HolidayRecord,
        mainland: HolidayRecord
    }
}

impl HolidayRow {
    pub fn start_date(&self) -> NaiveDate {
        match self {
            HolidayRow::Single(record) => record.start_date(),
            HolidayRow::MultiRegion { hong_kong, .. } => hong_kong.start_date()
        }
    }

    pub fn title(&self, language: Language) -> String {
        match self {
            HolidayRow::Single(record) => record.name().to_owned(),
            HolidayRow::MultiRegion { hong_kong, mainland } => format!(
                "{}：{} / {}：{}",
                language.region_name(Region::HongKong),
                hong_kong.name(),
                language.region_name(Region::Mainland),
                mainland.name()
            )
        }
    }
}

pub struct MonthSection {
    pub month: u32,
    pub label: String,
    pub rows: Vec<HolidayRow>
}

/// 全年假期列表的 view-model。
///
/// 只透過 `HolidayService` 取資料，自己保存一份當年度（所有地區）的副本，
/// 地區篩選在本地進行，切換篩選不會重新載入。
pub struct HolidayListModel<'a, C: CacheBackend> {
    service: &'a HolidayService<C>,
    language: Language,
    year: i32,
    selected_region: Option<Region>,
    holidays: Vec<HolidayRecord>
}

impl<'a, C: CacheBackend> HolidayListModel<'a, C> {
    pub fn new(service: &'a HolidayService<C>, year: i32, language: Language) -> Self {
        let mut model = Self {
            service,
            language,
            year,
            selected_region: None,
            holidays: Vec::new()
        };
        model.load(year);
        model
    }

    pub fn load(&mut self, year: i32) {
        self.year = year;
        self.holidays = self.service.holidays(year, None);
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn holidays(&self) -> &[HolidayRecord] {
        &self.holidays
    }

    pub fn supported_years(&self) -> Vec<i32> {
        self.service.supported_years().collect()
    }

    // ── 地區篩選 ─────────────────────────────────────────────────────────────

    pub fn selected_region(&self) -> Option<Region> {
        self.selected_region
    }

    /// Selecting the active region again clears the filter.
    pub fn toggle_region(&mut self, region: Option<Region>) {
        self.selected_region = if self.selected_region == region { None } else { region };
    }

    pub fn is_region_selected(&self, region: Region) -> bool {
        self.selected_region == Some(region)
    }

    // ── 年份切換 ─────────────────────────────────────────────────────────────

    pub fn can_go_to_previous_year(&self) -> bool {
        self.service.is_year_supported(self.year - 1)
    }

    pub fn can_go_to_next_year(&self) -> bool {
        self.service.is_year_supported(self.year + 1)
    }

    pub fn previous_year(&mut self) -> bool {
        if !self.can_go_to_previous_year() {
            return false;
        }
        self.load(self.year - 1);
        true
    }

    pub fn next_year(&mut self) -> bool {
        if !self.can_go_to_next_year() {
            return false;
        }
        self.load(self.year + 1);
        true
    }

    // ── 月份分組 ─────────────────────────────────────────────────────────────

    /// Holidays starting in `month`, filtered by the selected region and
    /// sorted by start date (source order within a day).
    pub fn holidays_for_month(&self, month: u32) -> Vec<HolidayRecord> {
        let mut result: Vec<HolidayRecord> = self
            .holidays
            .iter()
            .filter(|h| h.month() == month && matches_region(self.selected_region, h.region()))
            .cloned()
            .collect();
        result.sort_by_key(|h| h.start_date());
        result
    }

    fn on_date(&self, d: NaiveDate) -> impl Iterator<Item = &HolidayRecord> {
        self.holidays.iter().filter(move |h| h.starts_on(d))
    }

    pub fn has_multi_region_holiday(&self, d: NaiveDate) -> bool {
        let mut regions = self.on_date(d).map(|h| h.region());
        match regions.next() {
            Some(first) => regions.any(|r| r != first),
            None => false
        }
    }

    pub fn multi_region_holidays(&self, d: NaiveDate) -> MultiRegionHolidays {
        let first_of = |region: Region| self.on_date(d).find(|h| h.region() == region).cloned();
        MultiRegionHolidays {
            hong_kong: first_of(Region::HongKong),
            mainland: first_of(Region::Mainland)
        }
    }

    /// Rows to display for `month`.
    ///
    /// Without a region filter a day observed by both regions becomes one
    /// `MultiRegion` row, emitted at the Hong Kong record; the Mainland record
    /// of that day is skipped. With a filter every record is its own row.
    pub fn rows_for_month(&self, month: u32) -> Vec<HolidayRow> {
        let mut rows = Vec::new();
        for holiday in self.holidays_for_month(month) {
            if self.selected_region.is_none() && self.has_multi_region_holiday(holiday.start_date()) {
                let pair = self.multi_region_holidays(holiday.start_date());
                if let (Some(hong_kong), Some(mainland)) = (pair.hong_kong, pair.mainland) {
                    if holiday == hong_kong {
                        rows.push(HolidayRow::MultiRegion { hong_kong, mainland });
                    }
                    continue;
                }
            }
            rows.push(HolidayRow::Single(holiday));
        }
        rows
    }

    pub fn sections(&self) -> Vec<MonthSection> {
        (1..=12)
            .map(|month| MonthSection {
                month,
                label: self.language.month_label(month),
                rows: self.rows_for_month(month)
            })
            .collect()
    }

    pub fn days_until(&self, row: &HolidayRow, today: NaiveDate) -> DaysUntil {
        DaysUntil::between(row.start_date(), today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::holidayservice::SingleThreadedHolidayService;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn toggling_the_same_region_clears_filter() {
        let service = SingleThreadedHolidayService::bundled();
        let mut model = HolidayListModel::new(&service, 2025, Language::default());
        model.toggle_region(Some(Region::Mainland));
        assert!(model.is_region_selected(Region::Mainland));
        model.toggle_region(Some(Region::Mainland));
        assert_eq!(model.selected_region(), None);
    }

    #[test]
    fn shared_day_collapses_into_one_row() {
        let service = SingleThreadedHolidayService::bundled();
        let model = HolidayListModel::new(&service, 2025, Language::default());

        let january = model.rows_for_month(1);
        let new_year: Vec<&HolidayRow> = january.iter().filter(|r| r.start_date() == ymd(2025, 1, 1)).collect();
        assert_eq!(new_year.len(), 1);
        assert!(matches!(new_year[0], HolidayRow::MultiRegion { .. }));
        assert_eq!(new_year[0].title(Language::SimplifiedChinese), "香港：一月一日 / 内地：元旦");

        // 1/28 is Mainland only.
        assert!(january.iter().any(|r| matches!(r, HolidayRow::Single(h) if h.start_date() == ymd(2025, 1, 28))));
    }

    #[test]
    fn filtered_list_shows_single_rows() {
        let service = SingleThreadedHolidayService::bundled();
        let mut model = HolidayListModel::new(&service, 2025, Language::default());
        model.toggle_region(Some(Region::HongKong));
        let january = model.rows_for_month(1);
        assert_eq!(january.len(), 4);
        assert!(january.iter().all(|r| matches!(r, HolidayRow::Single(h) if h.region() == Region::HongKong)));
    }

    #[test]
    fn month_holidays_are_sorted() {
        let service = SingleThreadedHolidayService::bundled();
        let model = HolidayListModel::new(&service, 2025, Language::default());
        let october = model.holidays_for_month(10);
        assert!(october.windows(2).all(|w| w[0].start_date() <= w[1].start_date()));
        assert_eq!(october.first().map(|h| h.region()), Some(Region::HongKong));
    }

    #[test]
    fn year_navigation_stops_at_supported_range() {
        let service = SingleThreadedHolidayService::bundled();
        let mut model = HolidayListModel::new(&service, 2025, Language::default());
        assert!(!model.can_go_to_next_year());
        assert!(!model.next_year());
        assert!(model.previous_year());
        assert_eq!(model.year(), 2024);
        assert!(model.holidays().is_empty());
        assert_eq!(model.supported_years(), vec![2023, 2024, 2025]);
    }

    #[test]
    fn days_until_counts_from_row_start() {
        let service = SingleThreadedHolidayService::bundled();
        let model = HolidayListModel::new(&service, 2025, Language::English);
        let october = model.rows_for_month(10);
        let national_day = october.iter().find(|r| r.start_date() == ymd(2025, 10, 1)).unwrap();

        assert_eq!(model.days_until(national_day, ymd(2025, 9, 29)), DaysUntil::Upcoming(2));
        assert_eq!(model.days_until(national_day, ymd(2025, 9, 30)), DaysUntil::Tomorrow);
        assert_eq!(model.days_until(national_day, ymd(2025, 10, 1)), DaysUntil::Today);
        assert!(model.days_until(national_day, ymd(2025, 10, 5)).is_past());
    }

    #[test]
    fn sections_cover_all_months() {
        let service = SingleThreadedHolidayService::bundled();
        let model = HolidayListModel::new(&service, 2025, Language::English);
        let sections = model.sections();
        assert_eq!(sections.len(), 12);
        assert_eq!(sections[6].label, "July");
        assert_eq!(sections[6].rows.len(), 1);
    }
}
