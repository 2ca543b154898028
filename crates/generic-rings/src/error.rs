//! Error type for callers that prefer `Result` over raw [`Status`] values.
//!
//! The library itself reports through [`Status`]; [`Status::check`] maps a
//! non-success status onto [`GrError`] so application code can use `?`.

use thiserror::Error;

use crate::status::Status;

/// A non-success operation outcome.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrError {
    /// The operation is mathematically undefined for its inputs.
    #[error("operation is undefined for the given inputs (domain failure)")]
    Domain,

    /// The ring could not decide a predicate the operation needed.
    #[error("the ring cannot decide a required predicate (unable)")]
    Unable,
}

/// Result alias used by the `Result`-style helpers.
pub type GrResult<T> = Result<T, GrError>;

impl From<GrError> for Status {
    fn from(err: GrError) -> Self {
        match err {
            GrError::Domain => Status::DOMAIN,
            GrError::Unable => Status::UNABLE,
        }
    }
}
