use std::io;

use intake_domain::{DomainError, FormId};
use thiserror::Error;

use crate::validation::ValidationFailure;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Form not found: {0}")]
    FormNotFound(FormId),
    #[error("A save is in progress; wait for it to finish")]
    SaveInFlight,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Reasons a save request did not reach a stored record.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("A save is already in progress")]
    InFlight,
    #[error("{0}")]
    Invalid(ValidationFailure),
    #[error("{0}")]
    Gateway(CoreError),
    #[error("Form changed before the save finished; record {0} was not attached")]
    Superseded(FormId),
}
