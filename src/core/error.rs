//! Error types.
//!
//! `DataError` covers malformed static content and is fatal at load time.
//! `GameError` covers invariant violations at runtime; these are programming
//! errors and are reported immediately rather than clamped. Player death is
//! not an error, see [`crate::core::session::SessionEnd`].

use thiserror::Error;

/// Invariant violations raised while the game is running.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("tried to remove {requested}x {item} but only {held} held")]
    InsufficientItems {
        item: String,
        requested: u32,
        held: u32,
    },

    #[error("cannot pick from an empty weighted list")]
    EmptyWeightedList,

    #[error("unknown mob type {0:?}")]
    UnknownMob(String),

    #[error("unknown recipe {0:?}")]
    UnknownRecipe(String),

    #[error("{0:?} is not a food")]
    NotAFood(String),

    #[error("no tool at slot {0}")]
    NoSuchTool(usize),

    #[error("menu choice {index} out of range for {options} options")]
    InvalidChoice { index: usize, options: usize },
}

/// Configuration errors raised while loading static content.
///
/// `record` names the offending entry (its `name` when it has one, otherwise
/// its position) and `field` is a path inside that entry such as
/// `death_drops[1].chance`.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("{file}: could not read: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: not valid JSON: {source}")]
    Json {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{file}: record {record}: missing required field {field:?}")]
    MissingField {
        file: String,
        record: String,
        field: String,
    },

    #[error("{file}: record {record}: field {field:?} {reason}")]
    InvalidField {
        file: String,
        record: String,
        field: String,
        reason: String,
    },

    #[error("{file}: expected {expected} at top level")]
    Shape { file: String, expected: &'static str },
}

impl DataError {
    /// Path of the offending field, when the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            DataError::MissingField { field, .. } | DataError::InvalidField { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }

    /// Name or index of the offending record, when the error concerns one.
    pub fn record(&self) -> Option<&str> {
        match self {
            DataError::MissingField { record, .. } | DataError::InvalidField { record, .. } => {
                Some(record)
            }
            _ => None,
        }
    }
}
