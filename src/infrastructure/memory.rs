use super::store::{FieldUpdate, Filter, RecordStore, StoreError, StoreResult};
use crate::domain::StudentRecord;
use log::{debug, info};

/// Insertion-ordered in-memory collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<StudentRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopts an existing collection as-is, duplicates included.
    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, filter: &Filter) -> Option<usize> {
        self.records.iter().position(|record| filter.matches(record))
    }
}

impl RecordStore for MemoryStore {
    fn insert_one(&mut self, record: StudentRecord) -> StoreResult<()> {
        if self.records.iter().any(|existing| existing.id == record.id) {
            return Err(StoreError::DuplicateKey(record.id));
        }
        info!("insert _id {}", record.id);
        self.records.push(record);
        Ok(())
    }

    fn find_one(&self, filter: &Filter) -> StoreResult<Option<StudentRecord>> {
        debug!("find_one {filter}");
        Ok(self.position(filter).map(|index| self.records[index].clone()))
    }

    fn find(&self, filter: &Filter) -> StoreResult<Vec<StudentRecord>> {
        debug!("find {filter}");
        Ok(self
            .records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    fn delete_one(&mut self, filter: &Filter) -> StoreResult<bool> {
        match self.position(filter) {
            Some(index) => {
                let removed = self.records.remove(index);
                info!("deleted _id {} matching {filter}", removed.id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn update_one(&mut self, filter: &Filter, update: &FieldUpdate) -> StoreResult<bool> {
        match self.position(filter) {
            Some(index) => {
                update.apply(&mut self.records[index]);
                info!("updated record matching {filter} with {update:?}");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
