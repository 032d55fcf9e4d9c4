//! The add-student session as an explicit state machine.
//!
//! A session collects the fields of one student line by line, inserts the
//! record, then asks whether to enroll another. An unknown department
//! restarts the field sequence; any other bad field aborts the session.

use super::registry::AppError;
use crate::domain::{
    COLLEGE_NAME, Gender, InputError, StudentRecord, ValidationError, is_known_department,
    parse_age, parse_gender, parse_integer, title_case, to_upper, validate_name,
};
use crate::infrastructure::RecordStore;
use log::{info, warn};
use std::fmt;

/// Fields in the order they are asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentField {
    Id,
    Name,
    Age,
    Gender,
    Department,
    Course,
}

impl EnrollmentField {
    pub fn prompt(&self) -> &'static str {
        match self {
            EnrollmentField::Id => "Enter your ID: ",
            EnrollmentField::Name => "Enter the student's name: ",
            EnrollmentField::Age => "Enter the student's age: ",
            EnrollmentField::Gender => "Enter the student's gender: ",
            EnrollmentField::Department => "Enter the student's department: ",
            EnrollmentField::Course => "Enter the student's course: ",
        }
    }
}

pub const CONTINUE_PROMPT: &str = "Do you want to add another student? (yes/no): ";

#[derive(Debug, Clone, Default, PartialEq)]
struct Draft {
    id: Option<i64>,
    name: Option<String>,
    age: Option<i64>,
    gender: Option<Gender>,
    department: Option<String>,
}

#[derive(Debug)]
pub enum EnrollmentState {
    CollectingFields(EnrollmentField),
    /// The record went in; waiting for the add-another answer.
    Inserted,
    Aborted,
    Finished,
}

/// Something the session wants shown to the user.
#[derive(Debug)]
pub enum EnrollmentNotice {
    DepartmentUnavailable(String),
    Enrolled(StudentRecord),
    Aborted(AppError),
}

impl fmt::Display for EnrollmentNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrollmentNotice::DepartmentUnavailable(department) => {
                write!(f, "{department} is not available in {COLLEGE_NAME}")
            }
            EnrollmentNotice::Enrolled(record) => {
                write!(f, "Student {} enrolled in {}.", record.name, record.course)
            }
            EnrollmentNotice::Aborted(
                AppError::Input(InputError::NotAnInteger(_))
                | AppError::Validation(
                    ValidationError::OutOfRange(_) | ValidationError::InvalidType(_),
                ),
            ) => {
                write!(f, "Invalid input. Please check your entries.")
            }
            EnrollmentNotice::Aborted(err) => write!(f, "{err}"),
        }
    }
}

#[derive(Debug)]
pub struct Enrollment {
    state: EnrollmentState,
    draft: Draft,
    enrolled: usize,
}

impl Default for Enrollment {
    fn default() -> Self {
        Self {
            state: EnrollmentState::CollectingFields(EnrollmentField::Id),
            draft: Draft::default(),
            enrolled: 0,
        }
    }
}

impl Enrollment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EnrollmentState {
        &self.state
    }

    /// Number of records inserted by this session.
    pub fn enrolled(&self) -> usize {
        self.enrolled
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            EnrollmentState::CollectingFields(_) | EnrollmentState::Inserted
        )
    }

    /// The prompt for the next line, or `None` once the session is over.
    pub fn prompt(&self) -> Option<&'static str> {
        match &self.state {
            EnrollmentState::CollectingFields(field) => Some(field.prompt()),
            EnrollmentState::Inserted => Some(CONTINUE_PROMPT),
            EnrollmentState::Aborted | EnrollmentState::Finished => None,
        }
    }

    /// Moves the session on by one line of input.
    pub fn submit<S: RecordStore>(&mut self, store: &mut S, input: &str) -> Option<EnrollmentNotice> {
        let field = match &self.state {
            EnrollmentState::CollectingFields(field) => *field,
            EnrollmentState::Inserted => {
                self.answer_continue(input);
                return None;
            }
            EnrollmentState::Aborted | EnrollmentState::Finished => return None,
        };

        match self.accept(store, field, input) {
            Ok(notice) => notice,
            Err(err) => {
                warn!("add aborted at {field:?}: {err}");
                self.state = EnrollmentState::Aborted;
                Some(EnrollmentNotice::Aborted(err))
            }
        }
    }

    fn accept<S: RecordStore>(
        &mut self,
        store: &mut S,
        field: EnrollmentField,
        input: &str,
    ) -> Result<Option<EnrollmentNotice>, AppError> {
        let next = match field {
            EnrollmentField::Id => {
                self.draft.id = Some(parse_integer(input)?);
                EnrollmentField::Name
            }
            EnrollmentField::Name => {
                let name = title_case(input);
                validate_name(&name)?;
                self.draft.name = Some(name);
                EnrollmentField::Age
            }
            EnrollmentField::Age => {
                self.draft.age = Some(parse_age(input)?);
                EnrollmentField::Gender
            }
            EnrollmentField::Gender => {
                self.draft.gender = Some(parse_gender(input)?);
                EnrollmentField::Department
            }
            EnrollmentField::Department => {
                let department = to_upper(input);
                if !is_known_department(&department) {
                    self.restart();
                    return Ok(Some(EnrollmentNotice::DepartmentUnavailable(department)));
                }
                self.draft.department = Some(department);
                EnrollmentField::Course
            }
            EnrollmentField::Course => {
                let record = self.finish_draft(title_case(input))?;
                store.insert_one(record.clone())?;
                info!("enrolled {} with _id {}", record.name, record.id);
                self.enrolled += 1;
                self.state = EnrollmentState::Inserted;
                return Ok(Some(EnrollmentNotice::Enrolled(record)));
            }
        };
        self.state = EnrollmentState::CollectingFields(next);
        Ok(None)
    }

    fn finish_draft(&mut self, course: String) -> Result<StudentRecord, AppError> {
        let draft = std::mem::take(&mut self.draft);
        match (draft.id, draft.name, draft.age, draft.gender, draft.department) {
            (Some(id), Some(name), Some(age), Some(gender), Some(department)) => {
                Ok(StudentRecord::new(id, name, age, gender, department, course))
            }
            _ => Err(InputError::Closed.into()),
        }
    }

    fn answer_continue(&mut self, input: &str) {
        if input.eq_ignore_ascii_case("yes") {
            self.restart();
        } else {
            self.state = EnrollmentState::Finished;
        }
    }

    fn restart(&mut self) {
        self.draft = Draft::default();
        self.state = EnrollmentState::CollectingFields(EnrollmentField::Id);
    }
}
