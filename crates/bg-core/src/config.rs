//! Roles-service configuration.
//!
//! The endpoint and API key are read once from the process environment at
//! startup into an explicit [`RolesConfig`], which is then passed by
//! reference to the components that need it. Configuration is not
//! reloadable at runtime.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Environment variable naming the roles endpoint.
pub const ENDPOINT_VAR: &str = "APIGEE_ROLES_ENDPOINT";

/// Environment variable carrying the roles API key.
pub const API_KEY_VAR: &str = "APIGEE_API_KEY";

/// Default per-request timeout for the roles service.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only configuration for the roles service.
#[derive(Debug, Clone)]
pub struct RolesConfig {
    /// Endpoint the roles request is sent to. Any subject scoping is
    /// expected to be carried by the endpoint and key themselves; the
    /// request is not parameterized per caller.
    pub endpoint: Url,

    /// Opaque credential sent in the `X-APIKEY` header. May be empty.
    pub api_key: String,

    /// Upper bound on one outbound request.
    pub timeout: Duration,
}

impl RolesConfig {
    /// Builds a configuration from an endpoint string and API key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the endpoint is not a valid URL.
    pub fn new(endpoint: &str, api_key: impl Into<String>) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::Config(format!("invalid roles endpoint `{endpoint}`: {e}")))?;

        Ok(Self {
            endpoint,
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Loads the configuration from the process environment.
    ///
    /// [`ENDPOINT_VAR`] is required; [`API_KEY_VAR`] defaults to empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the endpoint variable is missing or
    /// does not parse as a URL.
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var(ENDPOINT_VAR)
            .map_err(|_| Error::Config(format!("{ENDPOINT_VAR} is not set")))?;
        let api_key = std::env::var(API_KEY_VAR).unwrap_or_default();

        let config = Self::new(&endpoint, api_key)?;

        tracing::info!(
            endpoint = %config.endpoint,
            api_key_present = !config.api_key.is_empty(),
            "Loaded roles service configuration"
        );

        Ok(config)
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
