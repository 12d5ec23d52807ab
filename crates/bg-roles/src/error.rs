//! Error taxonomy for the roles service.
//!
//! Two kinds of failure exist on the enrichment path: the roles endpoint
//! could not be reached (fetch), or it answered with something that is not
//! a roles document (parse). Callers treat both as "no entitlement data";
//! neither may fail token issuance.

use thiserror::Error;

/// Result type alias for roles-service operations.
pub type RolesResult<T> = std::result::Result<T, RolesError>;

/// Failures while fetching or decoding role grants.
#[derive(Debug, Error)]
pub enum RolesError {
    /// Transport-level failure: DNS, connection, TLS, or timeout.
    #[error("roles request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The roles service answered with a non-success status. Counted as a
    /// fetch failure; the body is kept for logging and never parsed.
    #[error("roles service returned HTTP {status}")]
    Status {
        /// HTTP status code of the response.
        status: u16,
        /// Raw response body, for diagnostics.
        body: String,
    },

    /// The response body is not a structurally valid roles document.
    #[error("invalid roles response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RolesError {
    /// Whether the failure happened before a body could be decoded.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Status { .. })
    }

    /// Raw response body carried by the failure, when one was received.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body),
            Self::Fetch(_) | Self::Parse(_) => None,
        }
    }
}
