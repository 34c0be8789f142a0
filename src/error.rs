// File: ./src/error.rs
//! Validation failures raised while reading or reconciling a calendar.
//!
//! Every variant is fatal for the run: the pipeline never writes partial output.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FuseError {
    #[error("Invalid event title '{title}': expected 3 fields, found {tokens}")]
    MalformedTitle { title: String, tokens: usize },

    #[error("Can't be in 2 courses {first} and {second} simultaneously")]
    CourseMismatch { first: String, second: String },

    #[error("Unknown event location handling.\n  first: {first}\n  second: {second}")]
    UnsupportedLocationShape { first: String, second: String },

    #[error("Event '{title}' ends ({end}) before it begins ({begin})")]
    InvalidInterval {
        title: String,
        begin: String,
        end: String,
    },

    #[error("Event '{summary}' has no {property}")]
    MissingProperty {
        property: &'static str,
        summary: String,
    },

    #[error("Invalid {property} value '{value}'")]
    InvalidTimestamp { property: &'static str, value: String },

    #[error("Failed to parse calendar: {0}")]
    Parse(String),
}

pub type Result<T, E = FuseError> = std::result::Result<T, E>;
