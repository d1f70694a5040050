use thiserror::Error;

/// 載入器內部的失敗分類。
///
/// 這些錯誤不會越過 `HolidayLoader::load` 的邊界：
/// 呼叫端一律只會拿到（可能為空的）假日清單，錯誤僅寫入 log。
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("holiday artifact '{0}' not found")]
    ArtifactNotFound(String),

    #[error("failed to read holiday artifact '{name}'")]
    Io {
        name: String,
        #[source]
        source: std::io::Error
    },

    #[error("failed to parse holiday artifact '{name}': {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error
    },

    #[error("invalid date '{value}'")]
    InvalidDate { value: String },

    #[error("holiday artifact '{name}' contains no calendar")]
    MissingCalendar { name: String }
}

impl LoaderError {
    /// Missing data is an expected outcome, everything else is a defect in the artifact.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoaderError::ArtifactNotFound(_))
    }

    pub fn json(name: &str, source: serde_json::Error) -> LoaderError {
        LoaderError::Json { name: name.to_owned(), source }
    }
}
