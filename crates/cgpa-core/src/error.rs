//! Error types for grade lookup, input validation, persistence, and sessions.
//!
//! Every failure in this crate is returned as one of these typed errors;
//! none of them is fatal. Validation errors leave the session state untouched
//! and persistence errors are reported without rolling back memory.

use std::fmt;

use thiserror::Error;

use crate::session::Phase;

/// A grade could not be resolved through the grading catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No grading system was chosen.
    #[error("no grading system selected")]
    NoSystem,

    /// The grading-system identifier is not registered.
    #[error("unknown grading system: {0}")]
    UnknownSystem(String),

    /// The grade label is not defined by the grading system.
    #[error("grade '{label}' is not defined for {system}")]
    UnknownGrade { label: String, system: String },
}

/// The user-facing input field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    Course,
    Grade,
    Credit,
    Semester,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputField::Course => write!(f, "course"),
            InputField::Grade => write!(f, "grade"),
            InputField::Credit => write!(f, "credit"),
            InputField::Semester => write!(f, "semester"),
        }
    }
}

/// Bad or missing user input. Recoverable; the state is left unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The course name was empty or blank.
    #[error("course name must not be empty")]
    EmptyCourseName,

    /// The grade or grading system could not be resolved.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Credit hours were not a positive number within `MAX_CREDIT_HOURS`.
    #[error("credit must be a positive number no greater than 100, got '{0}'")]
    InvalidCredit(String),

    /// The previous-semester GPA was not a finite non-negative number.
    #[error("previous GPA must be a non-negative number, got '{0}'")]
    InvalidPriorGpa(String),

    /// A semester was filed before any course produced a GPA.
    #[error("add at least one course before filing a semester")]
    MissingCurrentGpa,
}

impl ValidationError {
    /// The input field that failed validation.
    pub fn field(&self) -> InputField {
        match self {
            ValidationError::EmptyCourseName => InputField::Course,
            ValidationError::Lookup(_) => InputField::Grade,
            ValidationError::InvalidCredit(_) => InputField::Credit,
            ValidationError::InvalidPriorGpa(_) | ValidationError::MissingCurrentGpa => {
                InputField::Semester
            }
        }
    }
}

/// Errors raised by a `KeyValueStore` backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing medium failed while reading or writing a key.
    #[error("I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be represented by this backend.
    #[error("invalid key: '{0}'")]
    InvalidKey(String),

    /// The backend refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Some keys of a multi-key removal failed; the others were removed.
    #[error("failed to remove keys: {failed:?}")]
    PartialRemoval { failed: Vec<String> },
}

impl StoreError {
    /// Build an I/O error for `key`.
    pub fn io(key: &str, source: std::io::Error) -> Self {
        StoreError::Io {
            key: key.to_string(),
            source,
        }
    }
}

/// Errors returned by `Session` mutations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session has not finished loading.
    #[error("session is not ready (currently {0})")]
    NotReady(Phase),

    /// The user input was rejected.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl SessionError {
    /// Returns the validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            SessionError::Invalid(e) => Some(e),
            SessionError::NotReady(_) => None,
        }
    }
}
