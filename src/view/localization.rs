use chrono::Weekday;
use serde::{
    Deserialize,
    Serialize
};

use crate::holiday::region::Region;

/// 介面語言。預設為簡體中文，與假期資料檔（`hk_holidays_sc_*`）一致。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    #[default]
    SimplifiedChinese,
    TraditionalChinese,
    English
}

const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat
];

impl Language {
    pub fn region_name(&self, region: Region) -> &'static str {
        match (self, region) {
            (Language::SimplifiedChinese, Region::HongKong) => "香港",
            (Language::SimplifiedChinese, Region::Mainland) => "内地",
            (Language::TraditionalChinese, Region::HongKong) => "香港",
            (Language::TraditionalChinese, Region::Mainland) => "內地",
            (Language::English, Region::HongKong) => "Hong Kong",
            (Language::English, Region::Mainland) => "Mainland"
        }
    }

    pub fn all_regions_label(&self) -> &'static str {
        match self {
            Language::SimplifiedChinese => "全部",
            Language::TraditionalChinese => "全部",
            Language::English => "All"
        }
    }

    pub fn weekday_short(&self, weekday: Weekday) -> &'static str {
        let chinese = ["一", "二", "三", "四", "五", "六", "日"];
        let english = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
        let index = weekday.num_days_from_monday() as usize;
        match self {
            Language::SimplifiedChinese | Language::TraditionalChinese => chinese[index],
            Language::English => english[index]
        }
    }

    /// Column headers of a Sunday-first month grid.
    pub fn weekday_headers(&self) -> [&'static str; 7] {
        SUNDAY_FIRST.map(|weekday| self.weekday_short(weekday))
    }

    pub fn month_label(&self, month: u32) -> String {
        match self {
            Language::SimplifiedChinese | Language::TraditionalChinese => format!("{} 月", month),
            Language::English => {
                const NAMES: [&str; 12] = [
                    "January", "February", "March", "April", "May", "June",
                    "July", "August", "September", "October", "November", "December"
                ];
                NAMES
                    .get(month.wrapping_sub(1) as usize)
                    .map_or_else(|| month.to_string(), |name| (*name).to_owned())
            }
        }
    }

    pub fn duration_text(&self, days: i64) -> String {
        match self {
            Language::SimplifiedChinese => format!("{}天假期", days),
            Language::TraditionalChinese => format!("{}天假期", days),
            Language::English if days == 1 => "1-day holiday".to_owned(),
            Language::English => format!("{}-day holiday", days)
        }
    }
}
