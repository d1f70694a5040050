use tracing::{
    debug,
    warn
};

use crate::holiday::holidayrecord::HolidayRecord;
use crate::holiday::region::Region;
use super::loadererror::LoaderError;

/// 將單一地區、單一年份的原始資料轉成假日紀錄。
///
/// - `try_load` 回傳完整的錯誤資訊，供測試與診斷使用。
/// - `load` 是對外的邊界：找不到檔案或格式錯誤都退化成空清單，
///   前者記為 `debug`（預期中的「無資料」），後者記為 `warn`。
/// - 載入器本身不做快取，也不檢查年份是否在支援範圍內，這些是 `HolidayService` 的工作。
pub trait HolidayLoader: Send + Sync {
    fn region(&self) -> Region;

    fn try_load(&self, year: i32) -> Result<Vec<HolidayRecord>, LoaderError>;

    fn load(&self, year: i32) -> Vec<HolidayRecord> {
        match self.try_load(year) {
            Ok(records) => {
                debug!(region = %self.region(), year, count = records.len(), "loaded holiday records");
                records
            },
            Err(error) if error.is_not_found() => {
                debug!(region = %self.region(), year, "{}", error);
                Vec::new()
            },
            Err(error) => {
                warn!(region = %self.region(), year, "{}", error);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingLoader {
        not_found: bool
    }

    impl HolidayLoader for FailingLoader {
        fn region(&self) -> Region {
            Region::Mainland
        }

        fn try_load(&self, year: i32) -> Result<Vec<HolidayRecord>, LoaderError> {
            if self.not_found {
                Err(LoaderError::ArtifactNotFound(format!("mainland_holidays_{}", year)))
            } else {
                Err(LoaderError::InvalidDate { value: "2025-13-01".to_owned() })
            }
        }
    }

    #[test]
    fn load_degrades_every_failure_to_empty() {
        assert!(FailingLoader { not_found: true }.load(2025).is_empty());
        assert!(FailingLoader { not_found: false }.load(2025).is_empty());
    }
}
