//! Errors raised while encoding, decoding, or advancing occurrences.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OccurrenceError {
    #[error("Malformed occurrence id '{id}': '{suffix}' is not a timestamp")]
    MalformedOccurrenceId { id: String, suffix: String },

    #[error("Invalid base id '{0}': expected a hyphenated UUID")]
    InvalidBaseId(String),

    #[error("Unknown recurrence rule '{0}'")]
    UnknownRecurrenceRule(String),

    #[error("Occurrence falls outside the supported date range")]
    OccurrenceOutOfRange,
}

pub type OccurrenceResult<T> = Result<T, OccurrenceError>;
