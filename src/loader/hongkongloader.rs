use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::holiday::holidayrecord::HolidayRecord;
use crate::holiday::region::Region;
use super::artifactsource::{
    ArtifactSource,
    artifact_name
};
use super::holidayloader::HolidayLoader;
use super::loadererror::LoaderError;

pub const DEFAULT_HONG_KONG_FILE_TEMPLATE: &str = "hk_holidays_sc_{year}";

const HONG_KONG_DATE_FORMAT: &str = "%Y%m%d";

// ─────────────────────────────────────────────────────────────────────────────
// 香港假期資料格式（iCalendar 的 JSON 版本）
//
// {"vcalendar": [{"prodid": ..., "vevent": [
//     {"dtstart": ["20250101", {"value": "DATE"}],
//      "dtend":   ["20250102", {"value": "DATE"}],
//      "transp": "TRANSPARENT", "uid": "...", "summary": "一月一日"}
// ]}]}
//
// `transp`、`prodid` 等欄位不需要，交由 serde 忽略。
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CalendarDocumentJsonProp {
    vcalendar: Vec<VCalendarJsonProp>
}

#[derive(Deserialize)]
struct VCalendarJsonProp {
    #[serde(default)]
    vevent: Vec<VEventJsonProp>
}

#[derive(Deserialize)]
struct VEventJsonProp {
    dtstart: DatePropertyJsonProp,
    dtend: DatePropertyJsonProp,
    #[serde(default)]
    uid: Option<String>,
    summary: String
}

/// `dtstart`/`dtend` are `["YYYYMMDD", {params}]` in published files,
/// a bare `"YYYYMMDD"` string is accepted as well.
#[derive(Deserialize)]
#[serde(untagged)]
enum DatePropertyJsonProp {
    Plain(String),
    Tagged(Vec<serde_json::Value>)
}

impl DatePropertyJsonProp {
    fn to_date(&self) -> Result<NaiveDate, LoaderError> {
        let raw = match self {
            DatePropertyJsonProp::Plain(value) => Some(value.as_str()),
            DatePropertyJsonProp::Tagged(values) => values.first().and_then(|v| v.as_str())
        };
        let raw = raw.ok_or_else(|| LoaderError::InvalidDate { value: self.describe() })?;
        parse_hong_kong_date(raw)
    }

    fn describe(&self) -> String {
        match self {
            DatePropertyJsonProp::Plain(value) => value.clone(),
            DatePropertyJsonProp::Tagged(values) => serde_json::Value::Array(values.clone()).to_string()
        }
    }
}

fn parse_hong_kong_date(raw: &str) -> Result<NaiveDate, LoaderError> {
    NaiveDate::parse_from_str(raw.trim(), HONG_KONG_DATE_FORMAT)
        .map_err(|_| LoaderError::InvalidDate { value: raw.to_owned() })
}

/// Parses a Hong Kong calendar document. Only the first calendar in the
/// document is read; events keep source order.
pub fn parse_hong_kong_calendar(name: &str, content: &str) -> Result<Vec<HolidayRecord>, LoaderError> {
    let document: CalendarDocumentJsonProp =
        serde_json::from_str(content).map_err(|error| LoaderError::json(name, error))?;
    let calendar = document
        .vcalendar
        .into_iter()
        .next()
        .ok_or_else(|| LoaderError::MissingCalendar { name: name.to_owned() })?;

    let mut records = Vec::with_capacity(calendar.vevent.len());
    for (index, event) in calendar.vevent.into_iter().enumerate() {
        let start_date = event.dtstart.to_date()?;
        let end_date = event.dtend.to_date()?;
        let id = match event.uid {
            Some(uid) if !uid.trim().is_empty() => uid,
            _ => format!("{}-{}-{}", Region::HongKong.code(), start_date.format(HONG_KONG_DATE_FORMAT), index)
        };
        records.push(HolidayRecord::new(id, event.summary, start_date, end_date, Region::HongKong));
    }
    Ok(records)
}

// ─────────────────────────────────────────────────────────────────────────────
// HongKongLoader
// ─────────────────────────────────────────────────────────────────────────────

/// 香港假期載入器。
///
/// 官方檔案通常涵蓋跨年份的多個假期，本載入器原樣回傳，
/// 由 `HolidayService` 過濾出查詢年份的紀錄。
pub struct HongKongLoader {
    source: Arc<dyn ArtifactSource>,
    file_template: String
}

impl HongKongLoader {
    pub fn new(source: Arc<dyn ArtifactSource>) -> HongKongLoader {
        HongKongLoader::with_template(source, DEFAULT_HONG_KONG_FILE_TEMPLATE)
    }

    pub fn with_template(source: Arc<dyn ArtifactSource>, file_template: &str) -> HongKongLoader {
        HongKongLoader { source, file_template: file_template.to_owned() }
    }

    pub fn file_template(&self) -> &str {
        &self.file_template
    }
}

impl HolidayLoader for HongKongLoader {
    fn region(&self) -> Region {
        Region::HongKong
    }

    fn try_load(&self, year: i32) -> Result<Vec<HolidayRecord>, LoaderError> {
        let name = artifact_name(&self.file_template, year);
        let content = self.source.read(&name)?;
        parse_hong_kong_calendar(&name, &content)
    }
}
