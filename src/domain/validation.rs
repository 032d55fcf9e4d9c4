//! Field validation and text normalisation for student input.
//!
//! Normalisation (title case, capitalisation, upper case) always happens
//! before validation, so validators see the stored form of a value.

use super::errors::{DomainResult, InputError, ValidationError};
use super::models::Gender;
use regex::Regex;
use std::sync::LazyLock;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("name pattern compiles"));

pub const MIN_AGE: i64 = 0;
pub const MAX_AGE: i64 = 99;

/// Checks that a name holds only ASCII letters and whitespace.
///
/// # Examples
///
/// ```
/// use studentdb::domain::validate_name;
///
/// assert!(validate_name("Mary Jane").is_ok());
/// assert!(validate_name("R2D2").is_err());
/// assert!(validate_name("").is_err());
/// ```
pub fn validate_name(name: &str) -> DomainResult<()> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat(name.to_string()))
    }
}

/// Checks that an age lies in `0..=99`.
pub fn validate_age(age: i64) -> DomainResult<()> {
    if (MIN_AGE..=MAX_AGE).contains(&age) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange(age))
    }
}

/// Parses age text and validates the result.
pub fn parse_age(text: &str) -> DomainResult<i64> {
    let age = text
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidType(text.trim().to_string()))?;
    validate_age(age)?;
    Ok(age)
}

/// Checks that a gender is exactly one of `Male`, `Female` or `Other`.
///
/// # Examples
///
/// ```
/// use studentdb::domain::validate_gender;
///
/// assert!(validate_gender("Female").is_ok());
/// assert!(validate_gender("female").is_err());
/// ```
pub fn validate_gender(gender: &str) -> DomainResult<()> {
    match Gender::from_label(gender) {
        Some(_) => Ok(()),
        None => Err(ValidationError::InvalidEnum(gender.to_string())),
    }
}

/// Capitalises raw gender input and validates it.
pub fn parse_gender(text: &str) -> DomainResult<Gender> {
    let gender = capitalize(text);
    Gender::from_label(&gender).ok_or(ValidationError::InvalidEnum(gender))
}

/// Upper-cases the first letter of every alphabetic run and lower-cases
/// the rest: `"o'neil mc2kay"` becomes `"O'Neil Mc2Kay"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Upper-cases the first character and lower-cases everything after it.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

pub fn to_upper(text: &str) -> String {
    text.to_uppercase()
}

/// Parses an integer typed at a prompt, ignoring surrounding whitespace.
pub fn parse_integer(text: &str) -> Result<i64, InputError> {
    let trimmed = text.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| InputError::NotAnInteger(trimmed.to_string()))
}
