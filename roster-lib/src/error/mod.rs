//! Error types

mod api;
mod auth;

pub use api::*;
pub use auth::*;

/// Top-level error for all client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No usable token could be obtained.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The request was rejected before being sent.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Returns the human-readable message supplied by the server, if any.
    ///
    /// Network failures, timeouts and local errors never carry one.
    pub fn remote_message(&self) -> Option<String> {
        match self {
            Error::Api(api) => api.remote_message(),
            _ => None,
        }
    }
}
