//! The record store capability consumed by the registry.
//!
//! Stores hold [`StudentRecord`] documents and select them with
//! single-field equality filters. Single-record operations act on the
//! first match in insertion order.

use crate::domain::StudentRecord;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// A JSON object as returned by projected lookups.
pub type Document = Map<String, Value>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("duplicate key: a record with _id {0} already exists")]
    DuplicateKey(i64),
    #[error("cannot open record store: {0}")]
    Connection(String),
    #[error("record store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("record store data is malformed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Field-equality predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    Id(i64),
    Name(String),
    Department(String),
    Course(String),
}

impl Filter {
    pub fn matches(&self, record: &StudentRecord) -> bool {
        match self {
            Filter::All => true,
            Filter::Id(id) => record.id == *id,
            Filter::Name(name) => record.name == *name,
            Filter::Department(department) => record.department == *department,
            Filter::Course(course) => record.course == *course,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => write!(f, "{{}}"),
            Filter::Id(id) => write!(f, "{{_id: {id}}}"),
            Filter::Name(name) => write!(f, "{{name: {name:?}}}"),
            Filter::Department(department) => write!(f, "{{department: {department:?}}}"),
            Filter::Course(course) => write!(f, "{{course: {course:?}}}"),
        }
    }
}

/// Which keys a projected lookup returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Full,
    /// Every key except `_id`.
    ExcludeId,
    /// `_id` and `course` only.
    Course,
}

impl Projection {
    pub fn apply(&self, record: &StudentRecord) -> StoreResult<Document> {
        let mut document: Document = serde_json::from_value(serde_json::to_value(record)?)?;
        match self {
            Projection::Full => {}
            Projection::ExcludeId => {
                document.retain(|key, _| key != "_id");
            }
            Projection::Course => {
                document.retain(|key, _| key == "_id" || key == "course");
            }
        }
        Ok(document)
    }
}

/// A single-field `$set`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Id(i64),
    Name(String),
    Course(String),
    Department(String),
}

impl FieldUpdate {
    pub fn apply(&self, record: &mut StudentRecord) {
        match self {
            FieldUpdate::Id(id) => record.id = *id,
            FieldUpdate::Name(name) => record.name = name.clone(),
            FieldUpdate::Course(course) => record.course = course.clone(),
            FieldUpdate::Department(department) => record.department = department.clone(),
        }
    }
}

pub trait RecordStore {
    /// Fails with [`StoreError::DuplicateKey`] when the id is taken.
    fn insert_one(&mut self, record: StudentRecord) -> StoreResult<()>;

    fn find_one(&self, filter: &Filter) -> StoreResult<Option<StudentRecord>>;

    /// Runs a fresh query and returns every match in insertion order.
    fn find(&self, filter: &Filter) -> StoreResult<Vec<StudentRecord>>;

    /// Returns whether a record was deleted.
    fn delete_one(&mut self, filter: &Filter) -> StoreResult<bool>;

    /// Returns whether a record was updated.
    fn update_one(&mut self, filter: &Filter, update: &FieldUpdate) -> StoreResult<bool>;

    fn find_one_projected(
        &self,
        filter: &Filter,
        projection: Projection,
    ) -> StoreResult<Option<Document>> {
        self.find_one(filter)?
            .map(|record| projection.apply(&record))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;

    fn sample() -> StudentRecord {
        StudentRecord::new(4, "Zara Ali", 18, Gender::Female, "AR", "Architecture")
    }

    #[test]
    fn test_filter_matching() {
        let record = sample();
        assert!(Filter::All.matches(&record));
        assert!(Filter::Id(4).matches(&record));
        assert!(!Filter::Id(5).matches(&record));
        assert!(Filter::Name("Zara Ali".to_string()).matches(&record));
        assert!(!Filter::Name("zara ali".to_string()).matches(&record));
        assert!(Filter::Department("AR".to_string()).matches(&record));
        assert!(Filter::Course("Architecture".to_string()).matches(&record));
    }

    #[test]
    fn test_projection_exclude_id() {
        let document = Projection::ExcludeId.apply(&sample()).unwrap();
        assert!(!document.contains_key("_id"));
        assert_eq!(document["name"], "Zara Ali");
        assert_eq!(document.len(), 6);
    }

    #[test]
    fn test_projection_keeps_document_key_order() {
        let document = Projection::ExcludeId.apply(&sample()).unwrap();
        let keys: Vec<&str> = document.keys().map(String::as_str).collect();
        assert_eq!(keys, ["college_name", "name", "age", "gender", "department", "course"]);

        let full = Projection::Full.apply(&sample()).unwrap();
        assert_eq!(
            serde_json::Value::Object(full).to_string(),
            serde_json::to_string(&sample()).unwrap()
        );
    }

    #[test]
    fn test_projection_course_only() {
        let document = Projection::Course.apply(&sample()).unwrap();
        assert_eq!(document.len(), 2);
        assert_eq!(document["_id"], 4);
        assert_eq!(document["course"], "Architecture");
    }

    #[test]
    fn test_field_update_apply() {
        let mut record = sample();
        FieldUpdate::Id(9).apply(&mut record);
        FieldUpdate::Department("XX".to_string()).apply(&mut record);
        assert_eq!(record.id, 9);
        assert_eq!(record.department, "XX");
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(Filter::Id(3).to_string(), "{_id: 3}");
        assert_eq!(Filter::Name("Ann".to_string()).to_string(), "{name: \"Ann\"}");
    }
}
