use super::config::StoreConfig;
use super::memory::MemoryStore;
use super::store::{FieldUpdate, Filter, RecordStore, StoreError, StoreResult};
use crate::domain::StudentRecord;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// A record collection kept in a JSON file.
///
/// The whole collection is loaded on open and rewritten after every
/// mutation that changed something.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Opens the collection named by `config`, creating its directory when
    /// the collection does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] when the file exists but cannot be
    /// read or does not hold a JSON array of student records.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        Self::open_path(config.collection_path())
    }

    pub fn open_path(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let records = if path.exists() {
            Self::load(&path)?
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Connection(format!("{}: {}", parent.display(), e))
                })?;
            }
            Vec::new()
        };
        info!("opened {} with {} records", path.display(), records.len());
        Ok(Self {
            path,
            inner: MemoryStore::from_records(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> StoreResult<Vec<StudentRecord>> {
        match fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => match serde_json::from_str::<Vec<StudentRecord>>(&content) {
                Ok(records) => Ok(records),
                Err(e) => Err(StoreError::Connection(format!(
                    "{}: invalid collection format - {}",
                    path.display(),
                    e
                ))),
            },
            Err(e) => Err(StoreError::Connection(format!("{}: {}", path.display(), e))),
        }
    }

    /// Applies `change` in memory and writes the collection when `changed`
    /// says so. A failed write puts the collection back as it was.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut MemoryStore) -> StoreResult<T>,
        changed: impl FnOnce(&T) -> bool,
    ) -> StoreResult<T> {
        let snapshot = self.inner.clone();
        let outcome = change(&mut self.inner)?;
        if changed(&outcome) {
            if let Err(err) = self.save() {
                warn!("write to {} failed, change discarded: {err}", self.path.display());
                self.inner = snapshot;
                return Err(err);
            }
        }
        Ok(outcome)
    }

    fn save(&self) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(self.inner.records())?;
        fs::write(&self.path, json)?;
        debug!("wrote {} records to {}", self.inner.len(), self.path.display());
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn insert_one(&mut self, record: StudentRecord) -> StoreResult<()> {
        self.commit(|inner| inner.insert_one(record), |_| true)
    }

    fn find_one(&self, filter: &Filter) -> StoreResult<Option<StudentRecord>> {
        self.inner.find_one(filter)
    }

    fn find(&self, filter: &Filter) -> StoreResult<Vec<StudentRecord>> {
        self.inner.find(filter)
    }

    fn delete_one(&mut self, filter: &Filter) -> StoreResult<bool> {
        self.commit(|inner| inner.delete_one(filter), |deleted| *deleted)
    }

    fn update_one(&mut self, filter: &Filter, update: &FieldUpdate) -> StoreResult<bool> {
        self.commit(|inner| inner.update_one(filter, update), |updated| *updated)
    }
}
