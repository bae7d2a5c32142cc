//! HTTP username lookup client
//!
//! Queries a user directory endpoint of the form
//! `GET {base_url}/users?username={name}` which answers with a JSON array
//! of matching accounts (`[]` when the name is free).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::ExistingAccount;
use crate::ports::UsernameLookup;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Username lookup backed by an HTTP user directory
#[derive(Debug, Clone)]
pub struct HttpUsernameLookup {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl HttpUsernameLookup {
    /// Create a client for the directory rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let endpoint = users_endpoint(base_url)?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    /// Full `/users` endpoint this client queries
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::lookup(format!(
                "Username lookup timed out after {} ms",
                self.timeout.as_millis()
            ))
        } else if error.is_connect() {
            Error::lookup(format!("Unable to connect to {}", self.endpoint))
        } else {
            Error::lookup(format!("Username lookup request failed: {}", error))
        }
    }

    fn check_response_status(&self, status: StatusCode) -> Result<()> {
        match status.as_u16() {
            200 => Ok(()),
            401 | 403 => Err(Error::lookup("User directory rejected the request")),
            404 => Err(Error::lookup(format!("User directory not found at {}", self.endpoint))),
            429 => Err(Error::lookup("User directory rate limit exceeded")),
            code => Err(Error::lookup(format!("User directory error: HTTP {}", code))),
        }
    }
}

#[async_trait]
impl UsernameLookup for HttpUsernameLookup {
    fn name(&self) -> &str {
        "http"
    }

    async fn lookup_username(&self, username: &str) -> Result<Vec<ExistingAccount>> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("username", username);

        debug!(endpoint = %self.endpoint, "querying user directory");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        self.check_response_status(response.status())?;

        response
            .json::<Vec<ExistingAccount>>()
            .await
            .map_err(|e| Error::lookup(format!("Failed to parse user directory response: {}", e)))
    }
}

/// Build `{base_url}/users`, rejecting anything that is not plain HTTP(S)
fn users_endpoint(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::config("User directory URL cannot be empty"));
    }

    let parsed = Url::parse(&format!("{}/users", trimmed))
        .map_err(|e| Error::config(format!("Invalid user directory URL: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(Error::config(format!(
            "User directory URL must use http or https, got {}",
            other
        ))),
    }
}
