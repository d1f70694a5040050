use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::holiday::holidayrecord::HolidayRecord;
use crate::holiday::region::Region;
use super::artifactsource::{
    ArtifactSource,
    artifact_name
};
use super::holidayloader::HolidayLoader;
use super::loadererror::LoaderError;

pub const DEFAULT_MAINLAND_FILE_TEMPLATE: &str = "mainland_holidays_{year}";

// {"year": 2025, "days": [{"name": "元旦", "date": "2025-01-01", "isOffDay": true}, ...]}
// 調休上班日（isOffDay = false）同樣列在 days 中，載入時濾掉。

#[derive(Deserialize)]
struct MainlandDocumentJsonProp {
    year: i32,
    days: Vec<MainlandDayJsonProp>
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MainlandDayJsonProp {
    name: String,
    date: NaiveDate,
    is_off_day: bool
}

/// Parses a Mainland day-off list into one single-day record per day off.
///
/// The id combines region, date and the entry's index in `days`, so it is
/// stable for a given artifact.
pub fn parse_mainland_calendar(name: &str, content: &str) -> Result<Vec<HolidayRecord>, LoaderError> {
    read_document(name, content, None).map(mainland_records)
}

/// 解析文件；指定 `expected_year` 時，宣告年份不符只記錄警告。
fn read_document(
    name: &str,
    content: &str,
    expected_year: Option<i32>
) -> Result<MainlandDocumentJsonProp, LoaderError> {
    let document: MainlandDocumentJsonProp =
        serde_json::from_str(content).map_err(|error| LoaderError::json(name, error))?;
    if let Some(year) = expected_year.filter(|&year| year != document.year) {
        warn!(artifact = %name, declared = document.year, requested = year, "mainland artifact declares a different year");
    }
    Ok(document)
}

fn mainland_records(document: MainlandDocumentJsonProp) -> Vec<HolidayRecord> {
    document
        .days
        .into_iter()
        .enumerate()
        .filter(|(_, day)| day.is_off_day)
        .map(|(index, day)| {
            let id = format!("{}-{}-{}", Region::Mainland.code(), day.date.format("%Y%m%d"), index);
            HolidayRecord::single_day(id, day.name, day.date, Region::Mainland)
        })
        .collect()
}

pub struct MainlandLoader {
    source: Arc<dyn ArtifactSource>,
    file_template: String
}

impl MainlandLoader {
    pub fn new(source: Arc<dyn ArtifactSource>) -> MainlandLoader {
        MainlandLoader::with_template(source, DEFAULT_MAINLAND_FILE_TEMPLATE)
    }

    pub fn with_template(source: Arc<dyn ArtifactSource>, file_template: &str) -> MainlandLoader {
        MainlandLoader { source, file_template: file_template.to_owned() }
    }

    pub fn file_template(&self) -> &str {
        &self.file_template
    }
}

impl HolidayLoader for MainlandLoader {
    fn region(&self) -> Region {
        Region::Mainland
    }

    fn try_load(&self, year: i32) -> Result<Vec<HolidayRecord>, LoaderError> {
        let name = artifact_name(&self.file_template, year);
        let content = self.source.read(&name)?;
        read_document(&name, &content, Some(year)).map(mainland_records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::artifactsource::MemorySource;

    const SAMPLE: &str = r#"{
        "year": 2025,
        "papers": ["https://www.gov.cn/zhengce/content/202411/content_6986382.htm"],
        "days": [
            {"name": "元旦", "date": "2025-01-01", "isOffDay": true},
            {"name": "春节", "date": "2025-01-26", "isOffDay": false},
            {"name": "春节", "date": "2025-01-28", "isOffDay": true},
            {"name": "国庆节、中秋节", "date": "2025-10-01", "isOffDay": true}
        ]
    }"#;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn new_year_becomes_one_day_record() {
        let records = parse_mainland_calendar("sample", SAMPLE).unwrap();
        let new_year = &records[0];
        assert_eq!(new_year.name(), "元旦");
        assert_eq!(new_year.start_date(), ymd(2025, 1, 1));
        assert_eq!(new_year.end_date(), ymd(2025, 1, 2));
        assert_eq!(new_year.region(), Region::Mainland);
    }

    #[test]
    fn working_days_are_dropped() {
        let records = parse_mainland_calendar("sample", SAMPLE).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.start_date() != ymd(2025, 1, 26)));
    }

    #[test]
    fn ids_use_source_index() {
        let records = parse_mainland_calendar("sample", SAMPLE).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["mainland-20250101-0", "mainland-20250128-2", "mainland-20251001-3"]);
    }

    #[test]
    fn malformed_artifact_fails_soft() {
        let source = Arc::new(
            MemorySource::new()
                .with("mainland_holidays_2025", SAMPLE)
                .with("mainland_holidays_2024", r#"{"year": 2024, "days": [{"name": "元旦"}]}"#)
        );
        let loader = MainlandLoader::new(source);
        assert_eq!(loader.load(2025).len(), 3);
        assert!(loader.try_load(2024).is_err());
        assert!(loader.load(2024).is_empty());
        assert!(loader.load(2030).is_empty());
    }

    #[test]
    fn declared_year_mismatch_still_loads() {
        let source = Arc::new(MemorySource::new().with("mainland_holidays_2026", SAMPLE));
        let loader = MainlandLoader::new(source);
        let records = loader.try_load(2026).unwrap();
        assert_eq!(records, parse_mainland_calendar("mainland_holidays_2026", SAMPLE).unwrap());
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn custom_template() {
        let source = Arc::new(MemorySource::new().with("cn-2025", SAMPLE));
        let loader = MainlandLoader::with_template(source, "cn-{year}");
        assert_eq!(loader.file_template(), "cn-{year}");
        assert_eq!(loader.load(2025).len(), 3);
    }
}
