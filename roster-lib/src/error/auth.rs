//! Authentication error types

/// Errors that can occur while obtaining a token.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No token has been configured.
    #[error("No access token configured")]
    MissingToken,

    /// The token provider failed.
    #[error("Token provider failed: {0}")]
    Provider(String),
}
