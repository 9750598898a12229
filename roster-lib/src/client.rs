//! Main RosterClient

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::DirectoryApi;
use crate::api::MembershipApi;
use crate::api::MembershipChange;
use crate::auth::TokenProvider;
use crate::error::ApiError;
use crate::error::Error;
use crate::model::Group;
use crate::model::Member;

/// The client for the school administration API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across tasks.
///
/// # Example
///
/// ```ignore
/// use roster_lib::{RosterClient, auth::StaticTokenProvider};
///
/// let client = RosterClient::builder()
///     .url("https://api.school.example")
///     .token_provider(StaticTokenProvider::new("session-token"))
///     .build()?;
///
/// let members = client.list_members("42").await?;
/// ```
#[derive(Clone)]
pub struct RosterClient {
    inner: Arc<RosterClientInner>,
}

struct RosterClientInner {
    base_url: String,
    token_provider: Arc<dyn TokenProvider>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl RosterClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> RosterClientBuilder<Missing, Missing> {
        RosterClientBuilder::new()
    }

    /// Returns the base URL of the API.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Lists every member of a school, with their group memberships.
    pub async fn list_members(&self, school_id: &str) -> Result<Vec<Member>, Error> {
        let url = self.endpoint(&["school", school_id, "member"]);
        let response = self.request(Method::GET, &url, None).await?;
        read_json(response).await
    }

    /// Lists the groups of a school.
    pub async fn list_groups(&self, school_id: &str) -> Result<Vec<Group>, Error> {
        let url = self.endpoint(&["school", school_id, "group"]);
        let response = self.request(Method::GET, &url, None).await?;
        read_json(response).await
    }

    /// Adds members to a group.
    pub async fn assign_members(
        &self,
        school_id: &str,
        group_id: i64,
        member_ids: &[i64],
    ) -> Result<(), Error> {
        self.change_membership(Method::POST, school_id, group_id, member_ids)
            .await
    }

    /// Removes members from a group.
    pub async fn unassign_members(
        &self,
        school_id: &str,
        group_id: i64,
        member_ids: &[i64],
    ) -> Result<(), Error> {
        self.change_membership(Method::DELETE, school_id, group_id, member_ids)
            .await
    }

    async fn change_membership(
        &self,
        method: Method,
        school_id: &str,
        group_id: i64,
        member_ids: &[i64],
    ) -> Result<(), Error> {
        if member_ids.is_empty() {
            return Err(Error::Validation("no members given".to_string()));
        }
        let group = group_id.to_string();
        let url = self.endpoint(&["school", school_id, "group", &group, "member"]);
        let change = MembershipChange {
            user_ids: member_ids,
        };
        self.request(method, &url, Some(&change)).await?;
        Ok(())
    }

    /// Builds an endpoint URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.inner.base_url.trim_end_matches('/').to_string();
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
        url
    }

    /// Sends an authorized request and turns non-success statuses into errors.
    async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&MembershipChange<'_>>,
    ) -> Result<reqwest::Response, Error> {
        let token = self
            .inner
            .token_provider
            .get_token(&self.inner.base_url)
            .await?;

        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .header(AUTHORIZATION, token.header_value());

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| self.network_error(e))?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Error::Api(ApiError::http(status.as_u16(), body)))
        }
    }

    fn network_error(&self, error: reqwest::Error) -> Error {
        match self.inner.timeout {
            Some(timeout) if error.is_timeout() => Error::Api(ApiError::Timeout(timeout)),
            _ => Error::Api(ApiError::Network(error)),
        }
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, Error> {
    let body = response.text().await.map_err(ApiError::from)?;
    serde_json::from_str(&body)
        .map_err(|e| Error::Api(ApiError::parse_with_body(e.to_string(), body)))
}

#[async_trait]
impl DirectoryApi for RosterClient {
    async fn members(&self, school_id: &str) -> Result<Vec<Member>, Error> {
        self.list_members(school_id).await
    }

    async fn groups(&self, school_id: &str) -> Result<Vec<Group>, Error> {
        self.list_groups(school_id).await
    }
}

#[async_trait]
impl MembershipApi for RosterClient {
    async fn add_members(
        &self,
        school_id: &str,
        group_id: i64,
        member_ids: &[i64],
    ) -> Result<(), Error> {
        self.assign_members(school_id, group_id, member_ids).await
    }

    async fn remove_members(
        &self,
        school_id: &str,
        group_id: i64,
        member_ids: &[i64],
    ) -> Result<(), Error> {
        self.unassign_members(school_id, group_id, member_ids).await
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`RosterClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The API base URL
/// - `token_provider` - A [`TokenProvider`] implementation
pub struct RosterClientBuilder<U, P> {
    url: U,
    token_provider: P,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl RosterClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }
}

impl Default for RosterClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> RosterClientBuilder<Missing, P> {
    /// Sets the API base URL.
    pub fn url(self, url: impl Into<String>) -> RosterClientBuilder<Set<String>, P> {
        RosterClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U> RosterClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> RosterClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        RosterClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl<U, P> RosterClientBuilder<U, P> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl RosterClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`RosterClient`].
    ///
    /// Fails if the URL is not an absolute http(s) URL or the HTTP client
    /// cannot be created.
    pub fn build(self) -> Result<RosterClient, Error> {
        let base_url = self.url.0;
        let parsed =
            Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(base_url).into());
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(RosterClient {
            inner: Arc::new(RosterClientInner {
                base_url,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
