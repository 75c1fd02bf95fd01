// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP protocol implementation for Alpha2 base stations.

use std::time::Duration;

use reqwest::Client;

use crate::error::ProtocolError;
use crate::protocol::{CHANGES_PATH, Protocol, STATUS_PATH};

// ============================================================================
// HttpConfig - Connection parameters
// ============================================================================

/// Configuration for an HTTP connection to a base station.
///
/// The base station only speaks plain HTTP. A scheme given as part of the
/// host is stripped, as is a trailing slash, so `"https://alpha2.lan/"` and
/// `"alpha2.lan"` address the same device.
///
/// # Examples
///
/// ```
/// use alpha2_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.11");
/// assert_eq!(config.base_url(), "http://192.168.1.11");
///
/// let config = HttpConfig::new("https://alpha2.lan/")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(config.base_url(), "http://alpha2.lan:8080");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new HTTP configuration for the specified host.
    ///
    /// # Arguments
    ///
    /// * `host` - Hostname, IP address or URL of the base station
    #[must_use]
    pub fn new(host: impl AsRef<str>) -> Self {
        Self {
            host: normalize_host(host.as_ref()),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.port == Self::DEFAULT_PORT {
            format!("http://{}", self.host)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient {
            base_url: self.base_url(),
            client,
            timeout: self.timeout,
        })
    }
}

/// Strips scheme and trailing slashes from a host string.
fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = host
        .strip_prefix("http://")
        .or_else(|| host.strip_prefix("https://"))
        .unwrap_or(host);
    host.trim_end_matches('/').to_string()
}

// ============================================================================
// HttpClient
// ============================================================================

/// HTTP client for communicating with a base station.
///
/// Reads the status document from `/data/static.xml` and posts change
/// documents to `/data/changes.xml`.
///
/// # Examples
///
/// ```no_run
/// use alpha2_lib::protocol::{HttpClient, Protocol};
///
/// # async fn example() -> alpha2_lib::Result<()> {
/// let client = HttpClient::new("192.168.1.11")?;
/// let xml = client.fetch_status().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a new HTTP client for the specified host with default settings.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn new(host: impl AsRef<str>) -> Result<Self, ProtocolError> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the base URL of the base station.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn map_error(&self, error: reqwest::Error) -> ProtocolError {
        if error.is_timeout() {
            ProtocolError::Timeout(u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX))
        } else if error.is_connect() {
            ProtocolError::ConnectionFailed(error.to_string())
        } else {
            ProtocolError::Http(error)
        }
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<String, ProtocolError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        response.text().await.map_err(|e| self.map_error(e))
    }
}

impl Protocol for HttpClient {
    async fn fetch_status(&self) -> Result<String, ProtocolError> {
        let url = self.url(STATUS_PATH);

        tracing::debug!(url = %url, "Fetching base station status");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;
        let body = self.read_body(response).await?;

        tracing::trace!(body = %body, "Received status document");

        Ok(body)
    }

    async fn send_changes(&self, body: String) -> Result<String, ProtocolError> {
        let url = self.url(CHANGES_PATH);

        tracing::debug!(url = %url, body = %body, "Sending changes");

        let response = self
            .client
            .post(&url)
            .body(body)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;
        let reply = self.read_body(response).await?;

        tracing::debug!(reply = %reply, "Received changes reply");

        Ok(reply)
    }
}
