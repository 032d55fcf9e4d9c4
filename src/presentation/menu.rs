//! The numbered menu loop.
//!
//! Every selection runs one registry operation to completion. Failures are
//! reported and the top-level menu comes back; only a closed input stream
//! or a broken console ends the loop.

use super::console::{Console, Tone};
use crate::application::{
    AppError, AppResult, DeleteMode, DeleteOutcome, Enrollment, EnrollmentNotice, FindMode,
    FindOutcome, FindQuery, MainChoice, StudentRegistry, UpdateMode, UpdateOutcome,
};
use crate::domain::InputError;
use crate::infrastructure::{RecordStore, StoreError};
use log::{debug, warn};
use std::io::{BufRead, Write};

pub const MAIN_MENU: &str = "1. Add student\n2. Delete student\n3. Find student\n4. Update student\n5. Print all student details\n0. Exit";

const DELETE_MENU: &str = "
1. Delete student by ID
2. Delete student by name
";

const FIND_MENU: &str = "
1. Find student by ID
2. Find student by name
3. Find department availability
4. Find course availability
5. Find course by ID
6. Find course by name
";

const UPDATE_MENU: &str = "
1. Update student ID
2. Update student name
3. Update student course
4. Update student department
";

pub struct Menu<S: RecordStore, R: BufRead, W: Write> {
    registry: StudentRegistry<S>,
    console: Console<R, W>,
}

impl<S: RecordStore, R: BufRead, W: Write> Menu<S, R, W> {
    pub fn new(registry: StudentRegistry<S>, console: Console<R, W>) -> Self {
        Self { registry, console }
    }

    pub fn into_parts(self) -> (StudentRegistry<S>, Console<R, W>) {
        (self.registry, self.console)
    }

    /// Runs until the user picks exit or input runs out.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Io`] when the console itself fails.
    pub fn run(&mut self) -> Result<(), InputError> {
        loop {
            self.console.say(MAIN_MENU)?;
            let choice = match self.console.read_integer("Enter your choice: ") {
                Ok(number) => MainChoice::try_from(number),
                Err(InputError::NotAnInteger(text)) => {
                    warn!("non-numeric menu choice {text:?}");
                    Err(InputError::InvalidChoice {
                        choice: -1,
                        hint: "Please choose a valid option.",
                    })
                }
                Err(InputError::Closed) => Ok(MainChoice::Exit),
                Err(err) => return Err(err),
            };

            let choice = match choice {
                Ok(choice) => choice,
                Err(err) => {
                    self.console.report(Tone::Error, err)?;
                    continue;
                }
            };
            debug!("main menu: {choice:?}");

            let result = match choice {
                MainChoice::Exit => {
                    self.console.say("Exiting the program.")?;
                    return Ok(());
                }
                MainChoice::Add => self.add_students(),
                MainChoice::Delete => self.delete_student(),
                MainChoice::Find => self.find_student(),
                MainChoice::Update => self.update_student(),
                MainChoice::ListAll => self.print_all_students(),
            };

            match result {
                Ok(()) => {}
                Err(AppError::Input(InputError::Closed)) => {
                    self.console.say("Exiting the program.")?;
                    return Ok(());
                }
                Err(AppError::Input(InputError::Io(err))) => return Err(InputError::Io(err)),
                Err(err) => self.report_failure(err)?,
            }
        }
    }

    fn report_failure(&mut self, err: AppError) -> Result<(), InputError> {
        warn!("operation failed: {err}");
        let message = match &err {
            AppError::Input(input) => format!("Invalid input: {input}"),
            AppError::Validation(_) | AppError::Store(_) => format!("An error occurred: {err}"),
        };
        self.console.report(Tone::Error, message)
    }

    fn add_students(&mut self) -> AppResult<()> {
        let mut enrollment = Enrollment::new();
        while let Some(prompt) = enrollment.prompt() {
            let line = self.console.read_line(prompt)?;
            if let Some(notice) = self.registry.submit_enrollment(&mut enrollment, &line) {
                let tone = match notice {
                    EnrollmentNotice::Enrolled(_) => Tone::Success,
                    EnrollmentNotice::DepartmentUnavailable(_) => Tone::Warning,
                    EnrollmentNotice::Aborted(_) => Tone::Error,
                };
                self.console.report(tone, notice)?;
            }
        }
        Ok(())
    }

    fn delete_student(&mut self) -> AppResult<()> {
        let mode = DeleteMode::try_from(self.console.read_integer(DELETE_MENU)?)?;
        let outcome = match mode {
            DeleteMode::ById => {
                let id = self.console.read_integer("Enter the student ID: ")?;
                self.registry.delete_by_id(id)?
            }
            DeleteMode::ByName => {
                let name = self.console.read_line("Enter the student's name: ")?;
                self.registry.delete_by_name(&name)?
            }
        };
        let tone = match outcome {
            DeleteOutcome::DeletedId(_) | DeleteOutcome::DeletedName(_) => Tone::Success,
            DeleteOutcome::MissingId(_) | DeleteOutcome::MissingName(_) => Tone::Warning,
        };
        self.console.report(tone, outcome)?;
        Ok(())
    }

    fn find_student(&mut self) -> AppResult<()> {
        let mode = FindMode::try_from(self.console.read_integer(FIND_MENU)?)?;
        let query = match mode {
            FindMode::StudentById => {
                FindQuery::StudentById(self.console.read_integer("Enter student ID: ")?)
            }
            FindMode::StudentByName => {
                FindQuery::StudentByName(self.console.read_line("Enter the student's name: ")?)
            }
            FindMode::DepartmentAvailability => {
                FindQuery::Department(self.console.read_line("Enter department name: ")?)
            }
            FindMode::CourseAvailability => {
                FindQuery::Course(self.console.read_line("Enter course name: ")?)
            }
            FindMode::CourseById => {
                FindQuery::CourseById(self.console.read_integer("Enter student ID: ")?)
            }
            FindMode::CourseByName => {
                FindQuery::CourseByName(self.console.read_line("Enter the student's name: ")?)
            }
        };
        let outcome = self.registry.find(query)?;
        let tone = match outcome {
            FindOutcome::MissingId(_)
            | FindOutcome::MissingName(_)
            | FindOutcome::Department { available: false, .. }
            | FindOutcome::Course { available: false, .. } => Tone::Warning,
            _ => Tone::Success,
        };
        self.console.report(tone, outcome)?;
        Ok(())
    }

    fn update_student(&mut self) -> AppResult<()> {
        let mode = UpdateMode::try_from(self.console.read_integer(UPDATE_MENU)?)?;
        let outcome = match mode {
            UpdateMode::Id => {
                let old_id = self.console.read_integer("Enter the old ID: ")?;
                let new_id = self.console.read_integer("Enter the new ID: ")?;
                self.registry.update_id(old_id, new_id)?
            }
            UpdateMode::Name => {
                let id = self.console.read_integer("Enter student ID: ")?;
                let name = self.console.read_line("Enter the new name: ")?;
                self.registry.update_name(id, &name)?
            }
            UpdateMode::Course => {
                let id = self.console.read_integer("Enter student ID: ")?;
                let course = self.console.read_line("Enter the new course: ")?;
                self.registry.update_course(id, &course)?
            }
            UpdateMode::Department => {
                let id = self.console.read_integer("Enter student ID: ")?;
                let department = self.console.read_line("Enter the new department: ")?;
                self.registry.update_department(id, &department)?
            }
        };
        let tone = match outcome {
            UpdateOutcome::Missing(_) => Tone::Warning,
            _ => Tone::Success,
        };
        self.console.report(tone, outcome)?;
        Ok(())
    }

    fn print_all_students(&mut self) -> AppResult<()> {
        for record in self.registry.list_all()? {
            let document = serde_json::to_string(&record).map_err(StoreError::from)?;
            self.console.say(document)?;
        }
        Ok(())
    }
}
