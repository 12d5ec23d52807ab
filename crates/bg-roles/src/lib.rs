//! # bg-roles
//!
//! Client for the external roles service and the transform that turns its
//! role records into billing-account grant claims.
//!
//! ## Modules
//!
//! - [`client`] - Single-shot HTTP client for the roles endpoint
//! - [`records`] - Permissive decoding of the roles response body
//! - [`grants`] - Filter and reshape records into claim entries
//! - [`error`] - Fetch/parse error taxonomy

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod client;
pub mod error;
pub mod grants;
pub mod records;

pub use client::{API_KEY_HEADER, RolesClient};
pub use error::{RolesError, RolesResult};
pub use grants::{AssignedGrant, BILLING_ID_KEY, BillingGrantClaim, billing_grants, claim_value};
pub use records::{RoleRecord, parse_roles};
