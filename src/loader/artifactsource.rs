use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf
};

use super::loadererror::LoaderError;

const JSON_EXTENSION: &str = "json";

/// Where raw holiday artifacts come from. `name` is the extension-less
/// artifact name produced by a loader's file template.
pub trait ArtifactSource: Send + Sync {
    fn read(&self, name: &str) -> Result<String, LoaderError>;

    fn contains(&self, name: &str) -> bool {
        self.read(name).is_ok()
    }
}

/// Substitutes `{year}` in a file template, e.g. `hk_holidays_sc_{year}`.
pub fn artifact_name(template: &str, year: i32) -> String {
    template.replace("{year}", &year.to_string())
}

// ── 目錄來源：<folder>/<name>.json ───────────────────────────────────────────

pub struct DirectorySource {
    folder: PathBuf
}

impl DirectorySource {
    pub fn new(folder: impl Into<PathBuf>) -> DirectorySource {
        DirectorySource { folder: folder.into() }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.folder.join(format!("{}.{}", name, JSON_EXTENSION))
    }
}

impl ArtifactSource for DirectorySource {
    fn read(&self, name: &str) -> Result<String, LoaderError> {
        let path = self.path_of(name);
        fs::read_to_string(&path).map_err(|error| {
            if error.kind() == ErrorKind::NotFound {
                LoaderError::ArtifactNotFound(name.to_owned())
            } else {
                LoaderError::Io { name: name.to_owned(), source: error }
            }
        })
    }

    fn contains(&self, name: &str) -> bool {
        self.path_of(name).is_file()
    }
}

// ── 內嵌來源：編譯時打包進二進位檔的資料 ─────────────────────────────────────

const BUNDLED_ARTIFACTS: [(&str, &str); 2] = [
    ("hk_holidays_sc_2025", include_str!("../../data/hk_holidays_sc_2025.json")),
    ("mainland_holidays_2025", include_str!("../../data/mainland_holidays_2025.json")),
];

/// Artifacts shipped inside the crate.
#[derive(Default)]
pub struct BundledSource;

impl BundledSource {
    pub fn new() -> BundledSource {
        BundledSource
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        BUNDLED_ARTIFACTS.iter().map(|(name, _)| *name)
    }
}

impl ArtifactSource for BundledSource {
    fn read(&self, name: &str) -> Result<String, LoaderError> {
        BUNDLED_ARTIFACTS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, content)| (*content).to_owned())
            .ok_or_else(|| LoaderError::ArtifactNotFound(name.to_owned()))
    }
}

// ── 記憶體來源：由呼叫端注入內容 ─────────────────────────────────────────────

#[derive(Default)]
pub struct MemorySource {
    artifacts: HashMap<String, String>
}

impl MemorySource {
    pub fn new() -> MemorySource {
        MemorySource { artifacts: HashMap::new() }
    }

    pub fn with(mut self, name: &str, content: &str) -> MemorySource {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: &str, content: &str) {
        self.artifacts.insert(name.to_owned(), content.to_owned());
    }
}

impl ArtifactSource for MemorySource {
    fn read(&self, name: &str) -> Result<String, LoaderError> {
        self.artifacts
            .get(name)
            .cloned()
            .ok_or_else(|| LoaderError::ArtifactNotFound(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_substitutes_year() {
        assert_eq!(artifact_name("hk_holidays_sc_{year}", 2024), "hk_holidays_sc_2024");
        assert_eq!(artifact_name("mainland_holidays_{year}", 2025), "mainland_holidays_2025");
    }

    #[test]
    fn directory_source_reads_json_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mainland_holidays_2025.json"), "{\"year\":2025,\"days\":[]}").unwrap();
        let source = DirectorySource::new(dir.path());

        assert!(source.contains("mainland_holidays_2025"));
        assert_eq!(source.read("mainland_holidays_2025").unwrap(), "{\"year\":2025,\"days\":[]}");
        assert!(!source.contains("mainland_holidays_2024"));
        assert!(source.read("mainland_holidays_2024").unwrap_err().is_not_found());
    }

    #[test]
    fn dotted_names_keep_every_segment() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cn.v2_2024.json"), "2024").unwrap();
        fs::write(dir.path().join("cn.v2_2025.json"), "2025").unwrap();
        let source = DirectorySource::new(dir.path());

        assert_eq!(source.path_of("cn.v2_2024"), dir.path().join("cn.v2_2024.json"));
        assert_eq!(source.read("cn.v2_2024").unwrap(), "2024");
        assert_eq!(source.read("cn.v2_2025").unwrap(), "2025");
        assert!(!source.contains("cn"));
    }

    #[test]
    fn bundled_source_ships_2025_only() {
        let source = BundledSource::new();
        assert!(source.contains("hk_holidays_sc_2025"));
        assert!(source.contains("mainland_holidays_2025"));
        assert!(source.read("hk_holidays_sc_2023").unwrap_err().is_not_found());
        assert_eq!(source.names().count(), 2);
    }

    #[test]
    fn memory_source_returns_inserted_content() {
        let source = MemorySource::new().with("a", "1");
        assert_eq!(source.read("a").unwrap(), "1");
        assert!(source.read("b").unwrap_err().is_not_found());
    }
}
