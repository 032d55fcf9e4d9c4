use serde::{Deserialize, Serialize};
use std::fmt;

/// The college every record is enrolled in.
pub const COLLEGE_NAME: &str = "Anjuman-I-Islam's A. R. Kalsekar Polytechnic";

/// Department codes accepted when a student is added.
pub const DEPARTMENTS: [&str; 5] = ["CO", "AI", "CI", "AR", "AIML"];

/// Courses offered by the college.
///
/// Reference data only: course input is never checked against this list.
pub const COURSES: [&str; 5] = [
    "Computer Engineering",
    "AI",
    "Civil Engineering",
    "Architecture",
    "AIML",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn from_label(label: &str) -> Option<Gender> {
        Self::ALL.into_iter().find(|g| g.as_str() == label)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single student document as held by the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "_id")]
    pub id: i64,
    pub college_name: String,
    pub name: String,
    pub age: i64,
    pub gender: Gender,
    pub department: String,
    pub course: String,
}

impl StudentRecord {
    /// Builds a record for the fixed college. Fields are taken as given.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        age: i64,
        gender: Gender,
        department: impl Into<String>,
        course: impl Into<String>,
    ) -> Self {
        Self {
            id,
            college_name: COLLEGE_NAME.to_string(),
            name: name.into(),
            age,
            gender,
            department: department.into(),
            course: course.into(),
        }
    }
}

pub fn is_known_department(department: &str) -> bool {
    DEPARTMENTS.contains(&department)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_with_document_keys() {
        let record = StudentRecord::new(7, "Asha Khan", 19, Gender::Female, "AI", "Aiml");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["_id"], 7);
        assert_eq!(value["college_name"], COLLEGE_NAME);
        assert_eq!(value["gender"], "Female");
        assert_eq!(value["department"], "AI");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_record_deserializes_from_document() {
        let json = r#"{"_id":3,"college_name":"X","name":"Ravi","age":21,
            "gender":"Other","department":"CO","course":"Computer Engineering"}"#;
        let record: StudentRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, 3);
        assert_eq!(record.gender, Gender::Other);
        assert_eq!(record.college_name, "X");
    }

    #[test]
    fn test_gender_lookup_is_case_sensitive() {
        assert_eq!(Gender::from_label("Male"), Some(Gender::Male));
        assert_eq!(Gender::from_label("male"), None);
        assert_eq!(Gender::from_label("MALE"), None);
        assert_eq!(Gender::Other.to_string(), "Other");
    }

    #[test]
    fn test_known_departments() {
        for code in DEPARTMENTS {
            assert!(is_known_department(code));
        }
        assert!(!is_known_department("co"));
        assert!(!is_known_department("ME"));
        assert!(!is_known_department(""));
    }

    #[test]
    fn test_course_list_is_reference_data() {
        assert_eq!(COURSES.len(), DEPARTMENTS.len());
        assert!(COURSES.contains(&"Civil Engineering"));
    }
}
