//! Error types for record validation
//!
//! Empty collections are not errors: every aggregate has a well-defined
//! zero value. The only failures the core reports are records that cannot be
//! normalized and collections that are absent altogether.

use serde::Serialize;
use std::fmt;

/// Which upstream collection a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Core,
    Landpad,
    Launch,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Core => write!(f, "core"),
            RecordKind::Landpad => write!(f, "landpad"),
            RecordKind::Launch => write!(f, "launch"),
        }
    }
}

/// Why a single record could not be normalized
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MalformedReason {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid `{field}`: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    #[error("{landings} landings recorded against only {attempts} attempts")]
    LandingsExceedAttempts { landings: u32, attempts: u32 },

    #[error("could not decode record: {0}")]
    Decode(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RecoveryError {
    /// A record inside a collection is structurally unusable
    #[error("malformed {kind} record at index {index}: {reason}")]
    MalformedRecord {
        kind: RecordKind,
        index: usize,
        reason: MalformedReason,
    },

    /// The collection itself is absent or is not a list
    #[error("{0} collection is missing or is not a list")]
    MissingCollection(RecordKind),
}

pub type Result<T> = std::result::Result<T, RecoveryError>;
