//! Where terse bucket configurations come from

use std::time::Duration;

use async_trait::async_trait;
use doctor_topology::{BucketTopology, Endpoint};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::FetchError;

/// Default timeout for a single topology fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(2000);

const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?');

/// Abstract interface for fetching the terse bucket configuration served by
/// one endpoint.
#[async_trait]
pub trait ConfigSource
where
    Self: Send + Sync + 'static,
{
    /// Fetch the terse configuration of `bucket` from `endpoint`.
    ///
    /// The returned topology has `source_host` set to `endpoint.host`.
    async fn fetch_terse_config(
        &self,
        endpoint: &Endpoint,
        bucket: &str,
        password: &str,
    ) -> Result<BucketTopology, FetchError>;
}

/// Options for [`HttpConfigSource`].
#[derive(Clone, Debug)]
pub struct HttpConfigSourceOptions {
    /// Timeout for each fetch
    pub timeout: Duration,
}

impl Default for HttpConfigSourceOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Fetches terse configurations over the HTTP management API.
#[derive(Clone, Debug)]
pub struct HttpConfigSource {
    client: Client,
    timeout: Duration,
}

impl HttpConfigSource {
    /// Create a new HTTP config source
    #[must_use]
    pub fn new(options: HttpConfigSourceOptions) -> Self {
        Self {
            client: Client::new(),
            timeout: options.timeout,
        }
    }
}

impl Default for HttpConfigSource {
    fn default() -> Self {
        Self::new(HttpConfigSourceOptions::default())
    }
}

/// Path of the terse configuration of `bucket`.
#[must_use]
pub fn terse_config_path(bucket: &str) -> String {
    format!("/pools/default/b/{}", utf8_percent_encode(bucket, PATH_SEGMENT))
}

#[async_trait]
impl ConfigSource for HttpConfigSource {
    async fn fetch_terse_config(
        &self,
        endpoint: &Endpoint,
        bucket: &str,
        password: &str,
    ) -> Result<BucketTopology, FetchError> {
        let url = endpoint.http_url(&terse_config_path(bucket));
        debug!("fetching terse config from {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(bucket, Some(password))
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(FetchError::Unauthorized);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;

        Ok(BucketTopology::from_terse_json(&body, &endpoint.host)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terse_config_path() {
        assert_eq!(terse_config_path("default"), "/pools/default/b/default");
        assert_eq!(
            terse_config_path("travel-sample"),
            "/pools/default/b/travel-sample"
        );
        assert_eq!(terse_config_path("a b/c"), "/pools/default/b/a%20b%2Fc");
    }
}
