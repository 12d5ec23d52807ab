//! Billing grant selection and reshaping.
//!
//! Of everything the roles service returns, only records whose asset key
//! is [`BILLING_ID_KEY`] become claim entries. The transform is a total,
//! pure function: any record set in, a claim array out, no failure mode.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::records::RoleRecord;

/// Asset key marking a record as a billing-account grant.
pub const BILLING_ID_KEY: &str = "BILLING_ID";

/// One billing-account grant as written into the token claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingGrantClaim {
    /// Billing account the grant applies to.
    pub billing_id: String,

    /// Role assigned over the billing account.
    pub assigned_grants: AssignedGrant,
}

/// Wrapper object carrying the granted role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignedGrant {
    /// Name of the granted role.
    pub grant: String,
}

impl BillingGrantClaim {
    /// Renders this grant exactly as it appears in the claim array.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut assigned = Map::new();
        assigned.insert("grant".to_string(), Value::String(self.assigned_grants.grant.clone()));

        let mut entry = Map::new();
        entry.insert("billingId".to_string(), Value::String(self.billing_id.clone()));
        entry.insert("assignedGrants".to_string(), Value::Object(assigned));

        Value::Object(entry)
    }
}

/// Selects billing-account grants from a record set and reshapes them for
/// the token claim.
///
/// Exact, case-sensitive match on the asset key; records with any other
/// key produce no entry. Relative order of matching records is preserved
/// and duplicate billing ids stay distinct entries.
#[must_use]
pub fn billing_grants(records: &[RoleRecord]) -> Vec<BillingGrantClaim> {
    records
        .iter()
        .filter(|record| record.data_asset_key == BILLING_ID_KEY)
        .map(|record| BillingGrantClaim {
            billing_id: record.data_asset_value.clone(),
            assigned_grants: AssignedGrant {
                grant: record.role.clone(),
            },
        })
        .collect()
}

/// Renders a grant list as the JSON array merged into the token.
#[must_use]
pub fn claim_value(grants: &[BillingGrantClaim]) -> Value {
    Value::Array(grants.iter().map(BillingGrantClaim::to_value).collect())
}
