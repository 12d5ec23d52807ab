//! The billing-account grants mapper provider.

use async_trait::async_trait;

use crate::claims::ClaimSet;
use crate::enricher::ClaimEnricher;
use crate::mapper::{
    AccessTokenMapper, ConfigProperty, IdTokenMapper, MapperConfig, MapperContext, ProtocolMapper,
    UserInfoMapper, add_claim_name_property, add_include_in_tokens_properties,
};

/// Protocol mapper adding billing-account role grants to issued tokens.
///
/// For every token issuance the mapper fetches the subject's role grants
/// from the roles service, keeps the billing-account ones, and merges them
/// as a JSON array under the configured claim name. Targets access tokens,
/// ID tokens, and userinfo responses.
#[derive(Debug, Clone)]
pub struct BillingGrantsMapper {
    enricher: ClaimEnricher,
}

impl BillingGrantsMapper {
    /// Id under which the host registers this mapper.
    pub const PROVIDER_ID: &'static str = "oidc-billing-grants-mapper";

    /// Creates the mapper around an enricher.
    #[must_use]
    pub const fn new(enricher: ClaimEnricher) -> Self {
        Self { enricher }
    }

    async fn apply(&self, claims: &mut ClaimSet, config: &MapperConfig, context: &MapperContext<'_>) {
        let Some(claim_name) = config.claim_name() else {
            tracing::warn!(
                mapper = Self::PROVIDER_ID,
                "No claim name configured; skipping enrichment"
            );
            return;
        };

        tracing::debug!(
            mapper = Self::PROVIDER_ID,
            subject = context.subject,
            session = context.session_id,
            claim = claim_name,
            "Enriching token with billing grants"
        );

        self.enricher.enrich(claim_name, claims).await;
    }
}

impl ProtocolMapper for BillingGrantsMapper {
    fn id(&self) -> &'static str {
        Self::PROVIDER_ID
    }

    fn display_name(&self) -> &'static str {
        "Billing Account Grants"
    }

    fn category(&self) -> &'static str {
        "Token mapper"
    }

    fn help_text(&self) -> &'static str {
        "Adds billing account role grants from the roles service to the claim"
    }

    fn config_properties(&self) -> Vec<ConfigProperty> {
        let mut properties = Vec::new();
        add_claim_name_property(&mut properties);
        add_include_in_tokens_properties(&mut properties);
        properties
    }
}

#[async_trait]
impl AccessTokenMapper for BillingGrantsMapper {
    async fn transform_access_token(
        &self,
        claims: &mut ClaimSet,
        config: &MapperConfig,
        context: &MapperContext<'_>,
    ) {
        self.apply(claims, config, context).await;
    }
}

#[async_trait]
impl IdTokenMapper for BillingGrantsMapper {
    async fn transform_id_token(
        &self,
        claims: &mut ClaimSet,
        config: &MapperConfig,
        context: &MapperContext<'_>,
    ) {
        self.apply(claims, config, context).await;
    }
}

#[async_trait]
impl UserInfoMapper for BillingGrantsMapper {
    async fn transform_userinfo(
        &self,
        claims: &mut ClaimSet,
        config: &MapperConfig,
        context: &MapperContext<'_>,
    ) {
        self.apply(claims, config, context).await;
    }
}
