//! Enrichment pipeline orchestration.
//!
//! One enrichment runs the stages `Idle → Fetching → Parsing →
//! Transforming → Attaching → Done`, with `Failed` absorbing any fault in
//! `Fetching` or `Parsing`. Transforming is a pure function and cannot
//! fail; Attaching merges the claim exactly once.
//!
//! The pipeline fails open: entering `Failed` abandons the enrichment, the
//! fault is logged with full context, no claim is attached, and control
//! returns to the Token Issuer as if enrichment completed with no
//! entitlement data. An entitlement-service outage must never turn into an
//! authentication failure.

use bg_roles::client::RolesClient;
use bg_roles::error::RolesError;
use bg_roles::grants::{billing_grants, claim_value};
use bg_roles::records::parse_roles;

use crate::claims::ClaimSet;

/// Stages of one enrichment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentStage {
    /// Not started.
    Idle,
    /// Outbound roles request in flight.
    Fetching,
    /// Decoding the response body.
    Parsing,
    /// Filtering and reshaping records.
    Transforming,
    /// Merging the claim array into the token.
    Attaching,
    /// Claim attached.
    Done,
    /// Abandoned; the token is issued without the claim.
    Failed,
}

/// Result of one enrichment run.
///
/// Failures are carried here instead of propagated: the caller issues the
/// token either way.
#[derive(Debug)]
pub enum EnrichmentOutcome {
    /// The claim array was attached.
    Done {
        /// Number of grants in the attached array, possibly zero.
        grants: usize,
    },
    /// The run was abandoned and no claim was attached.
    Failed {
        /// Stage the fault occurred in: fetching or parsing.
        stage: EnrichmentStage,
        /// The absorbed failure.
        error: RolesError,
    },
}

impl EnrichmentOutcome {
    /// Whether a claim was attached to the token.
    #[must_use]
    pub const fn attached(&self) -> bool {
        matches!(self, Self::Done { .. })
    }

    /// Number of grants attached; zero when nothing was attached.
    #[must_use]
    pub const fn grant_count(&self) -> usize {
        match self {
            Self::Done { grants } => *grants,
            Self::Failed { .. } => 0,
        }
    }
}

/// Orchestrates fetch, parse, transform, and attach for one token.
///
/// Holds no per-call state; one enricher serves any number of concurrent
/// token issuances.
#[derive(Debug, Clone)]
pub struct ClaimEnricher {
    client: RolesClient,
}

impl ClaimEnricher {
    /// Creates an enricher around a roles client.
    #[must_use]
    pub const fn new(client: RolesClient) -> Self {
        Self { client }
    }

    /// Runs the pipeline and merges the grant array under `claim_name`.
    ///
    /// Fetch and parse faults abandon the run: they are logged with the
    /// endpoint and any received body, no claim is attached, and the
    /// outcome reports the failure without propagating it.
    pub async fn enrich(&self, claim_name: &str, claims: &mut ClaimSet) -> EnrichmentOutcome {
        let body = match self.client.fetch().await {
            Ok(body) => body,
            Err(error) => {
                tracing::error!(
                    endpoint = %self.client.endpoint(),
                    %error,
                    body = error.body(),
                    "Roles fetch failed; issuing token without billing grants"
                );
                return EnrichmentOutcome::Failed {
                    stage: EnrichmentStage::Fetching,
                    error,
                };
            }
        };

        let records = match parse_roles(&body) {
            Ok(records) => records,
            Err(error) => {
                tracing::error!(
                    endpoint = %self.client.endpoint(),
                    %error,
                    body = %body,
                    "Roles response rejected; issuing token without billing grants"
                );
                return EnrichmentOutcome::Failed {
                    stage: EnrichmentStage::Parsing,
                    error,
                };
            }
        };

        let grants = billing_grants(&records);
        tracing::debug!(
            records = records.len(),
            grants = grants.len(),
            "Selected billing grants from role records"
        );

        claims.set_nested(claim_name, claim_value(&grants));
        tracing::info!(
            claim = claim_name,
            grants = grants.len(),
            "Attached billing grants claim"
        );

        EnrichmentOutcome::Done {
            grants: grants.len(),
        }
    }
}
