use std::fs::File;
use std::io::BufReader;
use std::ops::RangeInclusive;
use std::path::{
    Path,
    PathBuf
};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::loader::artifactsource::{
    ArtifactSource,
    BundledSource,
    DirectorySource
};
use crate::loader::holidayloader::HolidayLoader;
use crate::loader::hongkongloader::DEFAULT_HONG_KONG_FILE_TEMPLATE;
use crate::loader::mainlandloader::DEFAULT_MAINLAND_FILE_TEMPLATE;
use crate::service::holidayservice::{
    DEFAULT_SUPPORTED_YEARS,
    HolidayService,
    MultiThreadedHolidayService,
    SingleThreadedHolidayService,
    standard_loaders
};

const YEAR_PLACEHOLDER: &str = "{year}";

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("failed to open configuration file '{path}'")]
    IOError {
        path: PathBuf,
        #[source]
        source: std::io::Error
    },

    #[error("failed to parse configuration: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("invalid supported year range {start}..={end}")]
    InvalidYearRange { start: i32, end: i32 },

    #[error("file template '{0}' has no {{year}} placeholder")]
    InvalidTemplate(String)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct SupportedYears {
    pub start: i32,
    pub end: i32
}

impl Default for SupportedYears {
    fn default() -> Self {
        SupportedYears {
            start: *DEFAULT_SUPPORTED_YEARS.start(),
            end: *DEFAULT_SUPPORTED_YEARS.end()
        }
    }
}

fn default_hong_kong_file_template() -> String {
    DEFAULT_HONG_KONG_FILE_TEMPLATE.to_owned()
}

fn default_mainland_file_template() -> String {
    DEFAULT_MAINLAND_FILE_TEMPLATE.to_owned()
}

/// 服務設定，所有欄位皆可省略。
///
/// ```json
/// {
///     "data_folder": "data",
///     "supported_years": {"start": 2023, "end": 2025},
///     "hong_kong_file_template": "hk_holidays_sc_{year}",
///     "mainland_file_template": "mainland_holidays_{year}"
/// }
/// ```
///
/// 未指定 `data_folder` 時使用編譯時內嵌的資料。
/// 相對路徑的 `data_folder` 以設定檔所在目錄為基準。
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    data_folder: Option<PathBuf>,
    #[serde(default)]
    supported_years: SupportedYears,
    #[serde(default = "default_hong_kong_file_template")]
    hong_kong_file_template: String,
    #[serde(default = "default_mainland_file_template")]
    mainland_file_template: String
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            data_folder: None,
            supported_years: SupportedYears::default(),
            hong_kong_file_template: default_hong_kong_file_template(),
            mainland_file_template: default_mainland_file_template()
        }
    }
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration::default()
    }

    pub fn with_data_folder(mut self, folder: impl Into<PathBuf>) -> Configuration {
        self.data_folder = Some(folder.into());
        self
    }

    pub fn with_supported_years(mut self, start: i32, end: i32) -> Configuration {
        self.supported_years = SupportedYears { start, end };
        self
    }

    pub fn parse(content: &str) -> Result<Configuration, ConfigurationError> {
        let configuration: Configuration = serde_json::from_str(content)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn from_reader(file_path: impl AsRef<Path>) -> Result<Configuration, ConfigurationError> {
        let file_path = file_path.as_ref();
        let file = File::open(file_path).map_err(|source| ConfigurationError::IOError {
            path: file_path.to_owned(),
            source
        })?;
        let reader = BufReader::new(file);
        let mut configuration: Configuration = serde_json::from_reader(reader)?;
        configuration.validate()?;

        if let (Some(folder), Some(parent)) = (&configuration.data_folder, file_path.parent()) {
            if folder.is_relative() {
                configuration.data_folder = Some(parent.join(folder));
            }
        }
        Ok(configuration)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let SupportedYears { start, end } = self.supported_years;
        if start > end || start <= 0 {
            return Err(ConfigurationError::InvalidYearRange { start, end });
        }
        for template in [&self.hong_kong_file_template, &self.mainland_file_template] {
            if !template.contains(YEAR_PLACEHOLDER) {
                return Err(ConfigurationError::InvalidTemplate(template.clone()));
            }
        }
        Ok(())
    }

    pub fn data_folder(&self) -> Option<&Path> {
        self.data_folder.as_deref()
    }

    pub fn supported_years(&self) -> RangeInclusive<i32> {
        self.supported_years.start..=self.supported_years.end
    }

    pub fn hong_kong_file_template(&self) -> &str {
        &self.hong_kong_file_template
    }

    pub fn mainland_file_template(&self) -> &str {
        &self.mainland_file_template
    }

    pub fn artifact_source(&self) -> Arc<dyn ArtifactSource> {
        match &self.data_folder {
            Some(folder) => Arc::new(DirectorySource::new(folder.clone())),
            None => Arc::new(BundledSource::new())
        }
    }

    pub fn loaders(&self) -> Vec<Arc<dyn HolidayLoader>> {
        standard_loaders(
            self.artifact_source(),
            &self.hong_kong_file_template,
            &self.mainland_file_template
        )
    }

    pub fn build_service(&self) -> SingleThreadedHolidayService {
        SingleThreadedHolidayService::new(self.loaders(), self.supported_years())
    }

    pub fn build_threadsafe_service(&self) -> MultiThreadedHolidayService {
        MultiThreadedHolidayService::new_threadsafe(self.loaders(), self.supported_years())
    }
}
