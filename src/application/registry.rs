//! The student registry facade.
//!
//! Translates menu selections and raw field text into record store calls.
//! Write paths validate names, ages and genders; lookups accept any text
//! after normalising its case.

use super::enrollment::{Enrollment, EnrollmentNotice};
use crate::domain::{InputError, StudentRecord, ValidationError, title_case, to_upper, validate_name};
use crate::infrastructure::{FieldUpdate, Filter, Projection, RecordStore, StoreError};
use log::{debug, warn};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type AppResult<T> = Result<T, AppError>;

/// Top-level menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Exit,
    Add,
    Delete,
    Find,
    Update,
    ListAll,
}

impl TryFrom<i64> for MainChoice {
    type Error = InputError;

    fn try_from(choice: i64) -> Result<Self, Self::Error> {
        match choice {
            0 => Ok(MainChoice::Exit),
            1 => Ok(MainChoice::Add),
            2 => Ok(MainChoice::Delete),
            3 => Ok(MainChoice::Find),
            4 => Ok(MainChoice::Update),
            5 => Ok(MainChoice::ListAll),
            _ => Err(InputError::InvalidChoice {
                choice,
                hint: "Please choose a valid option.",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    ById,
    ByName,
}

impl TryFrom<i64> for DeleteMode {
    type Error = InputError;

    fn try_from(choice: i64) -> Result<Self, Self::Error> {
        match choice {
            1 => Ok(DeleteMode::ById),
            2 => Ok(DeleteMode::ByName),
            _ => Err(InputError::InvalidChoice {
                choice,
                hint: "Please choose 1 or 2.",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindMode {
    StudentById,
    StudentByName,
    DepartmentAvailability,
    CourseAvailability,
    CourseById,
    CourseByName,
}

impl TryFrom<i64> for FindMode {
    type Error = InputError;

    fn try_from(choice: i64) -> Result<Self, Self::Error> {
        match choice {
            1 => Ok(FindMode::StudentById),
            2 => Ok(FindMode::StudentByName),
            3 => Ok(FindMode::DepartmentAvailability),
            4 => Ok(FindMode::CourseAvailability),
            5 => Ok(FindMode::CourseById),
            6 => Ok(FindMode::CourseByName),
            _ => Err(InputError::InvalidChoice {
                choice,
                hint: "Please choose a valid option.",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Id,
    Name,
    Course,
    Department,
}

impl TryFrom<i64> for UpdateMode {
    type Error = InputError;

    fn try_from(choice: i64) -> Result<Self, Self::Error> {
        match choice {
            1 => Ok(UpdateMode::Id),
            2 => Ok(UpdateMode::Name),
            3 => Ok(UpdateMode::Course),
            4 => Ok(UpdateMode::Department),
            _ => Err(InputError::InvalidChoice {
                choice,
                hint: "Please choose a valid option.",
            }),
        }
    }
}

/// Raw text for every field of a new student, as typed.
#[derive(Debug, Clone, Default)]
pub struct StudentForm {
    pub id: String,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub department: String,
    pub course: String,
}

impl StudentForm {
    fn values(&self) -> [&str; 6] {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.age.as_str(),
            self.gender.as_str(),
            self.department.as_str(),
            self.course.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    Enrolled(StudentRecord),
    /// Nothing was inserted; the caller should collect the fields again.
    DepartmentUnavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    DeletedId(i64),
    MissingId(i64),
    DeletedName(String),
    MissingName(String),
}

impl fmt::Display for DeleteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteOutcome::DeletedId(id) => {
                write!(f, "Student with ID {id} was deleted successfully.")
            }
            DeleteOutcome::MissingId(id) => write!(f, "The ID {id} is not in the database."),
            DeleteOutcome::DeletedName(name) => {
                write!(f, "Student named '{name}' was deleted successfully.")
            }
            DeleteOutcome::MissingName(name) => {
                write!(f, "The name '{name}' is not in the database.")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FindQuery {
    StudentById(i64),
    StudentByName(String),
    Department(String),
    Course(String),
    CourseById(i64),
    CourseByName(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FindOutcome {
    Student(Value),
    MissingId(i64),
    MissingName(String),
    Department { department: String, available: bool },
    Course { course: String, available: bool },
    StudentCourse(String),
}

impl fmt::Display for FindOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindOutcome::Student(document) => write!(f, "Student found: {document}"),
            FindOutcome::MissingId(id) => {
                write!(f, "Student with ID {id} is not in the database.")
            }
            FindOutcome::MissingName(name) => {
                write!(f, "Student named {name} is not in the database.")
            }
            FindOutcome::Department { department, available: true } => {
                write!(f, "Department {department} is available in the college.")
            }
            FindOutcome::Department { department, available: false } => {
                write!(f, "Department {department} is not available in the college.")
            }
            FindOutcome::Course { course, available: true } => {
                write!(f, "Course {course} is available in the college.")
            }
            FindOutcome::Course { course, available: false } => {
                write!(f, "Course {course} is not available in the college.")
            }
            FindOutcome::StudentCourse(course) => write!(f, "Student's course: {course}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    IdChanged { old: i64, new: i64 },
    NameChanged(String),
    CourseChanged(String),
    DepartmentChanged(String),
    Missing(i64),
}

impl fmt::Display for UpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateOutcome::IdChanged { old, new } => write!(f, "ID updated from {old} to {new}."),
            UpdateOutcome::NameChanged(name) => write!(f, "Student name updated to {name}."),
            UpdateOutcome::CourseChanged(course) => write!(f, "Course updated to {course}."),
            UpdateOutcome::DepartmentChanged(department) => {
                write!(f, "Department updated to {department}.")
            }
            UpdateOutcome::Missing(id) => {
                write!(f, "Student with ID {id} is not in the database.")
            }
        }
    }
}

/// Validation and CRUD over an injected record store.
pub struct StudentRegistry<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> StudentRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Feeds one line of input to an add session.
    pub fn submit_enrollment(
        &mut self,
        enrollment: &mut Enrollment,
        input: &str,
    ) -> Option<EnrollmentNotice> {
        enrollment.submit(&mut self.store, input)
    }

    /// Runs one pass of the add sequence over pre-collected field text.
    ///
    /// # Errors
    ///
    /// The first invalid field aborts the add and nothing is inserted.
    pub fn add(&mut self, form: &StudentForm) -> AppResult<AddOutcome> {
        let mut enrollment = Enrollment::new();
        for value in form.values() {
            match self.submit_enrollment(&mut enrollment, value) {
                None => {}
                Some(EnrollmentNotice::Enrolled(record)) => {
                    return Ok(AddOutcome::Enrolled(record));
                }
                Some(EnrollmentNotice::DepartmentUnavailable(department)) => {
                    return Ok(AddOutcome::DepartmentUnavailable(department));
                }
                Some(EnrollmentNotice::Aborted(err)) => return Err(err),
            }
        }
        Err(InputError::Closed.into())
    }

    pub fn delete_by_id(&mut self, id: i64) -> AppResult<DeleteOutcome> {
        let filter = Filter::Id(id);
        if self.store.find_one(&filter)?.is_some() {
            self.store.delete_one(&filter)?;
            Ok(DeleteOutcome::DeletedId(id))
        } else {
            Ok(DeleteOutcome::MissingId(id))
        }
    }

    /// Title-cases and validates `name`, then deletes the first record
    /// carrying it.
    pub fn delete_by_name(&mut self, name: &str) -> AppResult<DeleteOutcome> {
        let name = title_case(name);
        if let Err(err) = validate_name(&name) {
            warn!("rejected delete by name: {err}");
            return Err(err.into());
        }
        let filter = Filter::Name(name.clone());
        if self.store.find_one(&filter)?.is_some() {
            self.store.delete_one(&filter)?;
            Ok(DeleteOutcome::DeletedName(name))
        } else {
            Ok(DeleteOutcome::MissingName(name))
        }
    }

    pub fn find(&self, query: FindQuery) -> AppResult<FindOutcome> {
        debug!("find {query:?}");
        let outcome = match query {
            FindQuery::StudentById(id) => {
                match self.store.find_one_projected(&Filter::Id(id), Projection::ExcludeId)? {
                    Some(document) => FindOutcome::Student(Value::Object(document)),
                    None => FindOutcome::MissingId(id),
                }
            }
            FindQuery::StudentByName(name) => {
                let name = title_case(&name);
                let filter = Filter::Name(name.clone());
                match self.store.find_one_projected(&filter, Projection::Full)? {
                    Some(document) => FindOutcome::Student(Value::Object(document)),
                    None => FindOutcome::MissingName(name),
                }
            }
            FindQuery::Department(department) => {
                let available = self.department_available(&department)?;
                FindOutcome::Department {
                    department: to_upper(&department),
                    available,
                }
            }
            FindQuery::Course(course) => {
                let available = self.course_available(&course)?;
                FindOutcome::Course {
                    course: title_case(&course),
                    available,
                }
            }
            FindQuery::CourseById(id) => match self.course_of(&Filter::Id(id))? {
                Some(course) => FindOutcome::StudentCourse(course),
                None => FindOutcome::MissingId(id),
            },
            FindQuery::CourseByName(name) => {
                let name = title_case(&name);
                match self.course_of(&Filter::Name(name.clone()))? {
                    Some(course) => FindOutcome::StudentCourse(course),
                    None => FindOutcome::MissingName(name),
                }
            }
        };
        Ok(outcome)
    }

    /// True iff some record holds the upper-cased department exactly.
    pub fn department_available(&self, department: &str) -> AppResult<bool> {
        let filter = Filter::Department(to_upper(department));
        Ok(self.store.find_one(&filter)?.is_some())
    }

    /// True iff some record holds the title-cased course exactly.
    pub fn course_available(&self, course: &str) -> AppResult<bool> {
        let filter = Filter::Course(title_case(course));
        Ok(self.store.find_one(&filter)?.is_some())
    }

    fn course_of(&self, filter: &Filter) -> AppResult<Option<String>> {
        let document = self.store.find_one_projected(filter, Projection::Course)?;
        Ok(document.map(|document| {
            document
                .get("course")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        }))
    }

    /// Re-keys a record. The new id is not checked against existing records.
    pub fn update_id(&mut self, old_id: i64, new_id: i64) -> AppResult<UpdateOutcome> {
        Ok(if self.apply_update(old_id, FieldUpdate::Id(new_id))? {
            UpdateOutcome::IdChanged {
                old: old_id,
                new: new_id,
            }
        } else {
            UpdateOutcome::Missing(old_id)
        })
    }

    /// Title-cases the name; its format is not validated.
    pub fn update_name(&mut self, id: i64, name: &str) -> AppResult<UpdateOutcome> {
        let name = title_case(name);
        Ok(if self.apply_update(id, FieldUpdate::Name(name.clone()))? {
            UpdateOutcome::NameChanged(name)
        } else {
            UpdateOutcome::Missing(id)
        })
    }

    pub fn update_course(&mut self, id: i64, course: &str) -> AppResult<UpdateOutcome> {
        let course = title_case(course);
        Ok(if self.apply_update(id, FieldUpdate::Course(course.clone()))? {
            UpdateOutcome::CourseChanged(course)
        } else {
            UpdateOutcome::Missing(id)
        })
    }

    /// Upper-cases the department; unknown codes are stored as given.
    pub fn update_department(&mut self, id: i64, department: &str) -> AppResult<UpdateOutcome> {
        let department = to_upper(department);
        Ok(
            if self.apply_update(id, FieldUpdate::Department(department.clone()))? {
                UpdateOutcome::DepartmentChanged(department)
            } else {
                UpdateOutcome::Missing(id)
            },
        )
    }

    fn apply_update(&mut self, id: i64, update: FieldUpdate) -> AppResult<bool> {
        let filter = Filter::Id(id);
        if self.store.find_one(&filter)?.is_none() {
            return Ok(false);
        }
        Ok(self.store.update_one(&filter, &update)?)
    }

    pub fn list_all(&self) -> AppResult<Vec<StudentRecord>> {
        Ok(self.store.find(&Filter::All)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;
    use crate::infrastructure::MemoryStore;

    fn form(id: &str, name: &str, age: &str, gender: &str, department: &str, course: &str) -> StudentForm {
        StudentForm {
            id: id.to_string(),
            name: name.to_string(),
            age: age.to_string(),
            gender: gender.to_string(),
            department: department.to_string(),
            course: course.to_string(),
        }
    }

    fn seeded() -> StudentRegistry<MemoryStore> {
        let mut registry = StudentRegistry::new(MemoryStore::new());
        registry
            .add(&form("1", "john", "20", "male", "co", "computer engineering"))
            .unwrap();
        registry
            .add(&form("2", "asha khan", "19", "female", "aiml", "aiml"))
            .unwrap();
        registry
    }

    #[test]
    fn test_add_then_find_normalises_fields() {
        let registry = seeded();
        let record = registry.store().find_one(&Filter::Id(1)).unwrap().unwrap();

        assert_eq!(record.name, "John");
        assert_eq!(record.gender, Gender::Male);
        assert_eq!(record.department, "CO");
        assert_eq!(record.course, "Computer Engineering");
        assert_eq!(record.age, 20);

        match registry.find(FindQuery::StudentById(1)).unwrap() {
            FindOutcome::Student(document) => {
                assert!(document.get("_id").is_none());
                assert_eq!(document["name"], "John");
                assert_eq!(document["gender"], "Male");
                assert_eq!(document["department"], "CO");
                assert_eq!(document["course"], "Computer Engineering");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_add_rejects_invalid_fields_without_insert() {
        let mut registry = StudentRegistry::new(MemoryStore::new());

        let err = registry
            .add(&form("1", "j0hn", "20", "male", "co", "x"))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::InvalidFormat(_))));

        let err = registry
            .add(&form("1", "john", "100", "male", "co", "x"))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::OutOfRange(100))));

        let err = registry
            .add(&form("1", "john", "20", "robot", "co", "x"))
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::InvalidEnum(_))));

        let err = registry
            .add(&form("one", "john", "20", "male", "co", "x"))
            .unwrap_err();
        assert!(matches!(err, AppError::Input(InputError::NotAnInteger(_))));

        assert!(registry.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_add_unknown_department_inserts_nothing() {
        let mut registry = StudentRegistry::new(MemoryStore::new());
        let outcome = registry
            .add(&form("1", "john", "20", "male", "me", "mechanical"))
            .unwrap();

        assert_eq!(outcome, AddOutcome::DepartmentUnavailable("ME".to_string()));
        assert!(registry.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_add_duplicate_id_is_reported() {
        let mut registry = seeded();
        let err = registry
            .add(&form("1", "other", "30", "other", "ai", "ai"))
            .unwrap_err();

        assert!(matches!(err, AppError::Store(StoreError::DuplicateKey(1))));
        assert_eq!(registry.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_delete_missing_id_leaves_collection_unchanged() {
        let mut registry = seeded();
        let before = registry.list_all().unwrap();

        let outcome = registry.delete_by_id(42).unwrap();
        assert_eq!(outcome, DeleteOutcome::MissingId(42));
        assert_eq!(outcome.to_string(), "The ID 42 is not in the database.");
        assert_eq!(registry.list_all().unwrap(), before);
    }

    #[test]
    fn test_delete_by_id() {
        let mut registry = seeded();
        let outcome = registry.delete_by_id(1).unwrap();

        assert_eq!(outcome.to_string(), "Student with ID 1 was deleted successfully.");
        assert_eq!(registry.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_by_name_validates_and_title_cases() {
        let mut registry = seeded();

        let err = registry.delete_by_name("john!").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let outcome = registry.delete_by_name("ASHA KHAN").unwrap();
        assert_eq!(outcome, DeleteOutcome::DeletedName("Asha Khan".to_string()));
        assert_eq!(
            registry.delete_by_name("asha khan").unwrap().to_string(),
            "The name 'Asha Khan' is not in the database."
        );
    }

    #[test]
    fn test_delete_by_name_removes_one_of_many() {
        let mut registry = seeded();
        registry
            .add(&form("3", "john", "40", "male", "ci", "civil engineering"))
            .unwrap();

        registry.delete_by_name("john").unwrap();
        let remaining: Vec<i64> = registry.list_all().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(remaining, vec![2, 3]);
    }

    #[test]
    fn test_find_modes() {
        let registry = seeded();

        let by_name = registry.find(FindQuery::StudentByName("john".to_string())).unwrap();
        assert!(by_name.to_string().starts_with("Student found: {"));
        assert!(by_name.to_string().contains("\"_id\":1"));

        assert_eq!(
            registry.find(FindQuery::StudentByName("nobody".to_string())).unwrap().to_string(),
            "Student named Nobody is not in the database."
        );
        assert_eq!(
            registry.find(FindQuery::StudentById(9)).unwrap(),
            FindOutcome::MissingId(9)
        );
        assert_eq!(
            registry.find(FindQuery::CourseById(2)).unwrap().to_string(),
            "Student's course: Aiml"
        );
        assert_eq!(
            registry.find(FindQuery::CourseByName("john".to_string())).unwrap(),
            FindOutcome::StudentCourse("Computer Engineering".to_string())
        );
        assert_eq!(
            registry.find(FindQuery::Course("computer engineering".to_string())).unwrap().to_string(),
            "Course Computer Engineering is available in the college."
        );
        assert_eq!(
            registry.find(FindQuery::Department("ar".to_string())).unwrap().to_string(),
            "Department AR is not available in the college."
        );
    }

    #[test]
    fn test_department_available_iff_some_record_has_it() {
        let mut registry = seeded();
        assert!(registry.department_available("CO").unwrap());
        assert!(registry.department_available("aiml").unwrap());
        assert!(!registry.department_available("CI").unwrap());

        registry.delete_by_id(1).unwrap();
        assert!(!registry.department_available("CO").unwrap());
    }

    #[test]
    fn test_update_id_collision_is_not_detected() {
        let mut registry = seeded();
        let outcome = registry.update_id(1, 2).unwrap();

        assert_eq!(outcome, UpdateOutcome::IdChanged { old: 1, new: 2 });
        assert_eq!(outcome.to_string(), "ID updated from 1 to 2.");
        assert_eq!(registry.store().find(&Filter::Id(2)).unwrap().len(), 2);
        assert!(registry.store().find_one(&Filter::Id(1)).unwrap().is_none());
    }

    #[test]
    fn test_update_fields_skip_validation() {
        let mut registry = seeded();

        assert_eq!(
            registry.update_name(1, "j0hn smith").unwrap(),
            UpdateOutcome::NameChanged("J0Hn Smith".to_string())
        );
        assert_eq!(
            registry.update_department(1, "mech").unwrap().to_string(),
            "Department updated to MECH."
        );
        assert_eq!(
            registry.update_course(1, "robotics").unwrap().to_string(),
            "Course updated to Robotics."
        );

        let record = registry.store().find_one(&Filter::Id(1)).unwrap().unwrap();
        assert_eq!(record.name, "J0Hn Smith");
        assert_eq!(record.department, "MECH");
        assert_eq!(record.course, "Robotics");
    }

    #[test]
    fn test_update_missing_id() {
        let mut registry = seeded();
        assert_eq!(registry.update_course(7, "x").unwrap(), UpdateOutcome::Missing(7));
        assert_eq!(
            registry.update_id(7, 8).unwrap().to_string(),
            "Student with ID 7 is not in the database."
        );
    }

    #[test]
    fn test_menu_choice_ranges() {
        assert_eq!(MainChoice::try_from(0).unwrap(), MainChoice::Exit);
        assert_eq!(MainChoice::try_from(5).unwrap(), MainChoice::ListAll);
        assert!(MainChoice::try_from(6).is_err());
        assert_eq!(DeleteMode::try_from(2).unwrap(), DeleteMode::ByName);
        assert!(DeleteMode::try_from(3).is_err());
        assert_eq!(FindMode::try_from(6).unwrap(), FindMode::CourseByName);
        assert!(FindMode::try_from(0).is_err());
        assert_eq!(UpdateMode::try_from(4).unwrap(), UpdateMode::Department);

        let err = DeleteMode::try_from(9).unwrap_err();
        assert_eq!(err.to_string(), "Invalid choice. Please choose 1 or 2.");
    }
}
