//! Mapper SPI traits and configuration types.
//!
//! A protocol mapper customizes the claims of outgoing tokens. The host
//! that issues tokens registers mappers by id, shows their declared
//! configuration properties to administrators, and invokes the
//! per-token-type transform for every token it issues. Which token types a
//! mapper supports is expressed by which of the transform traits it
//! implements.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::claims::ClaimSet;

/// Configuration key naming the target claim.
pub const CLAIM_NAME_KEY: &str = "claim.name";

/// Configuration for one protocol mapper instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Unique identifier for this mapper instance.
    pub id: Uuid,

    /// Mapper name chosen by whoever configured it.
    pub name: String,

    /// Protocol mapper type id (e.g. `"oidc-billing-grants-mapper"`).
    pub mapper_type: String,

    /// Configuration key-value pairs.
    #[serde(default)]
    pub config: HashMap<String, String>,
}

impl MapperConfig {
    /// Creates a new mapper configuration.
    #[must_use]
    pub fn new(name: impl Into<String>, mapper_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            mapper_type: mapper_type.into(),
            config: HashMap::new(),
        }
    }

    /// Sets a configuration value.
    #[must_use]
    pub fn with_config(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// Gets a configuration value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.config.get(key).map(String::as_str)
    }

    /// Gets a configuration value as a boolean.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.config.get(key).and_then(|v| v.parse().ok())
    }

    /// Gets the claim name to write under.
    #[must_use]
    pub fn claim_name(&self) -> Option<&str> {
        self.get(CLAIM_NAME_KEY)
    }

    /// Whether the claim goes into access tokens.
    #[must_use]
    pub fn include_in_access_token(&self) -> bool {
        self.get_bool("access.token.claim").unwrap_or(true)
    }

    /// Whether the claim goes into ID tokens.
    #[must_use]
    pub fn include_in_id_token(&self) -> bool {
        self.get_bool("id.token.claim").unwrap_or(true)
    }

    /// Whether the claim goes into userinfo responses.
    #[must_use]
    pub fn include_in_userinfo(&self) -> bool {
        self.get_bool("userinfo.token.claim").unwrap_or(true)
    }
}

/// Configuration property declaration for mapper hosts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigProperty {
    /// Property name (config key).
    pub name: String,

    /// Display label.
    pub label: String,

    /// Help text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    /// Property type.
    pub property_type: ConfigPropertyType,

    /// Default value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    /// Whether the property is required.
    #[serde(default)]
    pub required: bool,
}

/// Configuration property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigPropertyType {
    /// Text input.
    String,
    /// Boolean toggle.
    Boolean,
}

impl ConfigProperty {
    /// Creates a new string property.
    #[must_use]
    pub fn string(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            help_text: None,
            property_type: ConfigPropertyType::String,
            default_value: None,
            required: false,
        }
    }

    /// Creates a new boolean property.
    #[must_use]
    pub fn boolean(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            help_text: None,
            property_type: ConfigPropertyType::Boolean,
            default_value: Some("false".to_string()),
            required: false,
        }
    }

    /// Sets the help text.
    #[must_use]
    pub fn with_help(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default_value = Some(default.into());
        self
    }

    /// Marks the property as required.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Appends the configurable-claim-name property a token mapper exposes.
pub fn add_claim_name_property(properties: &mut Vec<ConfigProperty>) {
    properties.push(
        ConfigProperty::string(CLAIM_NAME_KEY, "Token Claim Name")
            .with_help("Name of the claim to insert into the token")
            .required(),
    );
}

/// Appends the include-in-token toggles for the token types this mapper
/// system supports: access token, ID token, and userinfo.
pub fn add_include_in_tokens_properties(properties: &mut Vec<ConfigProperty>) {
    properties.push(
        ConfigProperty::boolean("access.token.claim", "Add to access token").with_default("true"),
    );
    properties.push(ConfigProperty::boolean("id.token.claim", "Add to ID token").with_default("true"));
    properties.push(
        ConfigProperty::boolean("userinfo.token.claim", "Add to userinfo").with_default("true"),
    );
}

/// Context the Token Issuer provides for one token issuance.
///
/// Carries the subject and session handles. The roles request itself is
/// not parameterized by the subject; scoping is expected from the
/// configured endpoint and key.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapperContext<'a> {
    /// Subject the token is being issued for.
    pub subject: Option<&'a str>,

    /// Session the issuance belongs to.
    pub session_id: Option<&'a str>,
}

impl<'a> MapperContext<'a> {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            subject: None,
            session_id: None,
        }
    }

    /// Sets the subject.
    #[must_use]
    pub const fn with_subject(mut self, subject: &'a str) -> Self {
        self.subject = Some(subject);
        self
    }

    /// Sets the session id.
    #[must_use]
    pub const fn with_session(mut self, session_id: &'a str) -> Self {
        self.session_id = Some(session_id);
        self
    }
}

/// Self-description contract for protocol mappers.
///
/// The host uses this to register the mapper and to render its
/// configuration options.
pub trait ProtocolMapper: Send + Sync {
    /// Unique identifier for this mapper type.
    fn id(&self) -> &'static str;

    /// Display name shown by the host.
    fn display_name(&self) -> &'static str;

    /// Category used for grouping, e.g. `"Token mapper"`.
    fn category(&self) -> &'static str;

    /// Help text describing what the mapper adds.
    fn help_text(&self) -> &'static str;

    /// Configuration properties this mapper understands.
    fn config_properties(&self) -> Vec<ConfigProperty>;
}

/// Mapper applied to access tokens.
#[async_trait]
pub trait AccessTokenMapper: ProtocolMapper {
    /// Merges this mapper's claims into an access token's claim set.
    ///
    /// Must not fail token issuance: failures are absorbed and logged,
    /// and the claim set is simply left without the mapper's claim.
    async fn transform_access_token(
        &self,
        claims: &mut ClaimSet,
        config: &MapperConfig,
        context: &MapperContext<'_>,
    );
}

/// Mapper applied to ID tokens.
#[async_trait]
pub trait IdTokenMapper: ProtocolMapper {
    /// Merges this mapper's claims into an ID token's claim set.
    ///
    /// Same fail-open contract as [`AccessTokenMapper`].
    async fn transform_id_token(
        &self,
        claims: &mut ClaimSet,
        config: &MapperConfig,
        context: &MapperContext<'_>,
    );
}

/// Mapper applied to userinfo responses.
#[async_trait]
pub trait UserInfoMapper: ProtocolMapper {
    /// Merges this mapper's claims into a userinfo claim set.
    ///
    /// Same fail-open contract as [`AccessTokenMapper`].
    async fn transform_userinfo(
        &self,
        claims: &mut ClaimSet,
        config: &MapperConfig,
        context: &MapperContext<'_>,
    );
}
