use std::path::PathBuf;

/// Location of the student collection on disk.
///
/// The binary always uses [`StoreConfig::default`]; other roots exist for tests.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub root: PathBuf,
    pub database: String,
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            database: "student_management_system".to_string(),
            collection: "students".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// `<root>/<database>/<collection>.json`
    pub fn collection_path(&self) -> PathBuf {
        self.root
            .join(&self.database)
            .join(format!("{}.json", self.collection))
    }
}
