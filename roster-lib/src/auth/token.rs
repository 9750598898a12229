//! TokenProvider trait and AccessToken

use async_trait::async_trait;

use crate::error::AuthError;

/// A session token sent verbatim in the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// The raw token value.
    pub access_token: String,
}

impl AccessToken {
    /// Creates a new access token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// Returns the value for the `Authorization` header.
    ///
    /// The school API expects the bare session token, without a scheme.
    pub fn header_value(&self) -> &str {
        &self.access_token
    }
}

/// Trait for providing access tokens to the roster client.
///
/// The client calls `get_token` before each API request. Implementations
/// own caching and renewal of the session token (the sign-in flow itself
/// lives outside this crate).
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Gets an access token for the API at `base_url`.
    async fn get_token(&self, base_url: &str) -> Result<AccessToken, AuthError>;
}

/// A simple token provider that always returns the same static token.
///
/// # Example
///
/// ```
/// use roster_lib::auth::StaticTokenProvider;
///
/// let provider = StaticTokenProvider::new("session-token");
/// ```
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    /// Creates a new static token provider with the given token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(access_token),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self, _base_url: &str) -> Result<AccessToken, AuthError> {
        if self.token.access_token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        Ok(self.token.clone())
    }
}
