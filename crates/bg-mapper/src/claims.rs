//! Claim set of an outgoing token.

use serde_json::{Map, Value};

/// Named claims of the token being issued.
///
/// The Token Issuer owns the token itself; mappers see only this claim map
/// and merge values into it. Nothing else about the token is visible here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimSet {
    claims: Map<String, Value>,
}

impl ClaimSet {
    /// Creates an empty claim set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a claim value, supporting nested paths: `"address.country"`
    /// creates a `country` claim inside an `address` object, building
    /// intermediate objects as needed. An intermediate that already exists
    /// with a non-object value is left untouched and the write is dropped.
    pub fn set_nested(&mut self, path: &str, value: Value) {
        set_nested(&mut self.claims, path, value);
    }

    /// Looks up a top-level claim.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// Number of top-level claims.
    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether the set holds no claims.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Consumes the set into its underlying JSON map.
    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.claims
    }
}

fn set_nested(claims: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            claims.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = claims
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));

            if let Value::Object(object) = entry {
                set_nested(object, rest, value);
            }
        }
    }
}
