//! Authentication errors.

use crate::error::TapeError;
use thiserror::Error;

/// Recoverable authentication failures, shown to the user as notices.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("An account with email {0} already exists")]
    DuplicateAccount(String),

    #[error("No account found for {0}")]
    NoSuchAccount(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(transparent)]
    Storage(#[from] TapeError),
}
