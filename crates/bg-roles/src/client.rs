//! Single-shot HTTP client for the roles endpoint.

use bg_core::RolesConfig;
use url::Url;

use crate::error::{RolesError, RolesResult};

/// Header carrying the roles service credential.
pub const API_KEY_HEADER: &str = "X-APIKEY";

/// Client for the external roles service.
///
/// Holds only shared read-only state; one instance serves any number of
/// concurrent enrichments without coordination.
#[derive(Debug, Clone)]
pub struct RolesClient {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl RolesClient {
    /// Creates a client from the startup configuration.
    ///
    /// # Errors
    ///
    /// Returns a fetch error if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &RolesConfig) -> RolesResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Endpoint this client fetches from.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Issues one GET to the roles endpoint and returns the raw body.
    ///
    /// Exactly one request per call: no retries, no caching. The subject
    /// is not part of the request; any scoping comes from the endpoint
    /// and key. A non-success status is reported as [`RolesError::Status`]
    /// with the body preserved for diagnostics.
    pub async fn fetch(&self) -> RolesResult<String> {
        tracing::debug!(endpoint = %self.endpoint, "Requesting roles");

        let response = self
            .client
            .get(self.endpoint.clone())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(%status, body_len = body.len(), "Roles response received");

        if !status.is_success() {
            return Err(RolesError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
