//! # bg-mapper
//!
//! Protocol mapper that enriches issued tokens with billing-account role
//! grants fetched from the roles service.
//!
//! The mapper system follows the token-mapper SPI pattern:
//! - [`ProtocolMapper`] describes a mapper to the host that registers it
//! - [`MapperConfig`] carries the per-instance configuration (claim name,
//!   include-in-token toggles)
//! - Per-token-type traits ([`AccessTokenMapper`], [`IdTokenMapper`],
//!   [`UserInfoMapper`]) apply a mapper to one outgoing token's [`ClaimSet`]
//! - [`ClaimEnricher`] runs the fetch → parse → transform → attach pipeline
//!
//! Enrichment fails open: a roles-service outage or a malformed response is
//! logged and the token is issued without the claim. Nothing on this path
//! may fail token issuance.
//!
//! ## Modules
//!
//! - [`billing`] - The billing-account grants mapper provider
//! - [`claims`] - Claim set of an outgoing token, with nested-path merge
//! - [`enricher`] - Pipeline orchestration and fail-open policy
//! - [`mapper`] - Mapper SPI traits and configuration types

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod billing;
pub mod claims;
pub mod enricher;
pub mod mapper;

pub use billing::BillingGrantsMapper;
pub use claims::ClaimSet;
pub use enricher::{ClaimEnricher, EnrichmentOutcome, EnrichmentStage};
pub use mapper::{
    AccessTokenMapper, CLAIM_NAME_KEY, ConfigProperty, ConfigPropertyType, IdTokenMapper,
    MapperConfig, MapperContext, ProtocolMapper, UserInfoMapper, add_claim_name_property,
    add_include_in_tokens_properties,
};
