//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`UnknownIdentity`] thrown when an identity has no ledger entry. This
//!   means accounts and ledger are out of sync and is never caused by user
//!   input.
//! - [`AuthFailure`] thrown when a username/password pair does not match.
//! - [`InvalidAmount`] and [`InvalidDate`] thrown while parsing input at the
//!   boundary.
//!
//!  [`UnknownIdentity`]: EngineError::UnknownIdentity
//!  [`AuthFailure`]: EngineError::AuthFailure
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidDate`]: EngineError::InvalidDate
use thiserror::Error;

/// Message shown to the user when login fails.
pub const AUTH_FAILURE_MESSAGE: &str = "Invalid username or password.";

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("\"{0}\" has no ledger")]
    UnknownIdentity(String),
    #[error("{}", AUTH_FAILURE_MESSAGE)]
    AuthFailure,
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Password hashing failed: {0}")]
    Password(String),
    #[error("Export failed: {0}")]
    Export(String),
}

impl From<csv::Error> for EngineError {
    fn from(value: csv::Error) -> Self {
        Self::Export(value.to_string())
    }
}

impl From<argon2::password_hash::Error> for EngineError {
    fn from(value: argon2::password_hash::Error) -> Self {
        Self::Password(value.to_string())
    }
}
