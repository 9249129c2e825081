use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::{Error, Result};

/// Common HTTP settings shared by providers
pub struct BaseProviderBuilder {
    /// Builder preloaded with the shared defaults
    pub client_builder: ClientBuilder,
    /// Provider identity
    pub info: ProviderInfo,
}

/// Ready-to-use HTTP client and provider identity
pub struct BaseProvider {
    /// Shared HTTP client
    pub client: Client,
    /// Provider identity
    pub info: ProviderInfo,
}

/// Provider name and description
pub struct ProviderInfo {
    /// Short name used in logs and errors
    pub name: String,
    /// One-line description
    pub description: String,
}

impl BaseProviderBuilder {
    /// Builder with JSON accept headers and a 30s timeout
    pub fn new(info: ProviderInfo) -> Self {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            reqwest::header::ACCEPT_ENCODING,
            reqwest::header::HeaderValue::from_static("br;q=1.0, gzip;q=0.9, deflate;q=0.8"),
        );

        let client_builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("calcon/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);

        Self {
            client_builder,
            info,
        }
    }

    /// Like [`new`](Self::new) with another timeout
    pub fn new_with_timeout(info: ProviderInfo, timeout: Duration) -> Self {
        let mut s = Self::new(info);
        s.client_builder = s.client_builder.timeout(timeout);
        s
    }

    /// Builds the HTTP client
    pub fn build(self) -> Result<BaseProvider> {
        let client = self
            .client_builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(BaseProvider {
            client,
            info: self.info,
        })
    }
}

impl BaseProvider {
    /// Maps a transport failure onto a retrieval error
    pub fn handle_error_req(&self, calendar_id: &str, error: &reqwest::Error) -> Error {
        let message = if error.is_timeout() {
            format!("{}: request timed out", self.info.name)
        } else if error.is_connect() {
            format!("{}: connection failed: {}", self.info.name, error)
        } else if error.is_decode() {
            format!("{}: failed to parse response: {}", self.info.name, error)
        } else {
            format!("{}: request failed: {}", self.info.name, error)
        };
        Error::Retrieval {
            calendar_id: calendar_id.to_string(),
            message,
        }
    }

    /// Retrieval error carrying a provider message
    pub fn custom_error(&self, calendar_id: &str, message: impl Into<String>) -> Error {
        Error::Retrieval {
            calendar_id: calendar_id.to_string(),
            message: format!("{}: {}", self.info.name, message.into()),
        }
    }
}
