use thiserror::Error;

/// Rejection of a malformed field value before it reaches the store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0} should not contain special characters or numbers.")]
    InvalidFormat(String),
    #[error("Age is invalid. Please enter a valid age between 0 and 99.")]
    OutOfRange(i64),
    #[error("Age is invalid. '{0}' is not a whole number.")]
    InvalidType(String),
    #[error("Invalid gender. Please choose from Male, Female, or Other.")]
    InvalidEnum(String),
}

/// Problems with the raw text typed at a prompt.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("invalid literal for an integer: '{0}'")]
    NotAnInteger(String),
    #[error("Invalid choice. {hint}")]
    InvalidChoice { choice: i64, hint: &'static str },
    #[error("input stream closed")]
    Closed,
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type DomainResult<T> = Result<T, ValidationError>;
