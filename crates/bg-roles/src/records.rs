//! Roles response decoding.
//!
//! The roles service answers with a JSON object carrying a `roles` array.
//! Decoding is permissive: unknown fields are ignored, missing string
//! fields default to empty, and an absent `roles` key is an empty set.
//! Only structural faults are errors.

use serde::Deserialize;

use crate::error::RolesResult;

/// One entitlement returned by the roles service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    /// Kind of asset the entitlement applies to.
    #[serde(default)]
    pub data_asset_key: String,

    /// Identifier of the asset; a billing account id for billing grants.
    #[serde(default)]
    pub data_asset_value: String,

    /// Role the subject holds over the asset.
    #[serde(default)]
    pub role: String,

    /// Expiry of the entitlement. Returned by the service but not
    /// evaluated anywhere in the pipeline.
    #[serde(default)]
    pub expiration_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RolesDocument {
    #[serde(default)]
    roles: Vec<RoleRecord>,
}

/// Decodes a roles response body into records, in response order.
///
/// # Errors
///
/// Returns a parse error when the body is structurally unsound: the top
/// level is not an object, `roles` is not an array, or an element of
/// `roles` is not an object.
pub fn parse_roles(body: &str) -> RolesResult<Vec<RoleRecord>> {
    let document: RolesDocument = serde_json::from_str(body)?;
    Ok(document.roles)
}
