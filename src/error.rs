// src/error.rs

use thiserror::Error;

/// Failure to build a control unit.
///
/// Processing itself has no error path; every input is treated as a
/// real number and passed through.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UnitError {
    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(f64),

    #[error("null pointer passed for {0}")]
    NullPointer(&'static str),
}

pub type Result<T> = std::result::Result<T, UnitError>;
