//! End-to-end enrichment tests against a mock roles endpoint.

use bg_core::RolesConfig;
use bg_mapper::{
    AccessTokenMapper, BillingGrantsMapper, CLAIM_NAME_KEY, ClaimEnricher, ClaimSet,
    EnrichmentOutcome, EnrichmentStage, IdTokenMapper, MapperConfig, MapperContext, UserInfoMapper,
};
use bg_roles::{API_KEY_HEADER, RolesClient};
use httpmock::prelude::*;
use serde_json::json;

const CLAIM: &str = "billing_grants";
const API_KEY: &str = "test-key";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("bg_core=debug,bg_roles=debug,bg_mapper=debug")
        .try_init();
}

fn enricher_for(endpoint: &str) -> anyhow::Result<ClaimEnricher> {
    let config = RolesConfig::new(endpoint, API_KEY)?;
    let client = RolesClient::new(&config)?;
    Ok(ClaimEnricher::new(client))
}

fn mapper_for(endpoint: &str) -> anyhow::Result<BillingGrantsMapper> {
    Ok(BillingGrantsMapper::new(enricher_for(endpoint)?))
}

fn mapper_config() -> MapperConfig {
    MapperConfig::new("billing-grants", BillingGrantsMapper::PROVIDER_ID)
        .with_config(CLAIM_NAME_KEY, CLAIM)
}

#[tokio::test]
async fn attaches_billing_grants_to_an_access_token() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start_async().await;
    let roles = server
        .mock_async(|when, then| {
            when.method(GET).path("/roles").header(API_KEY_HEADER, API_KEY);
            then.status(200).body(
                r#"{"roles":[
                    {"dataAssetKey":"BILLING_ID","dataAssetValue":"ACCT-1","role":"VIEW"},
                    {"dataAssetKey":"OTHER","dataAssetValue":"x","role":"y"}
                ]}"#,
            );
        })
        .await;

    let mapper = mapper_for(&server.url("/roles"))?;
    let mut claims = ClaimSet::new();
    let context = MapperContext::new().with_subject("user-1");

    mapper
        .transform_access_token(&mut claims, &mapper_config(), &context)
        .await;

    roles.assert_async().await;
    assert_eq!(
        claims.get(CLAIM),
        Some(&json!([
            {"billingId": "ACCT-1", "assignedGrants": {"grant": "VIEW"}}
        ]))
    );
    Ok(())
}

#[tokio::test]
async fn id_token_and_userinfo_get_the_same_claim() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/roles");
            then.status(200)
                .body(r#"{"roles":[{"dataAssetKey":"BILLING_ID","dataAssetValue":"ACCT-7","role":"PAY"}]}"#);
        })
        .await;

    let mapper = mapper_for(&server.url("/roles"))?;
    let config = mapper_config();
    let context = MapperContext::new();
    let expected = json!([{"billingId": "ACCT-7", "assignedGrants": {"grant": "PAY"}}]);

    let mut id_claims = ClaimSet::new();
    mapper.transform_id_token(&mut id_claims, &config, &context).await;
    assert_eq!(id_claims.get(CLAIM), Some(&expected));

    let mut userinfo_claims = ClaimSet::new();
    mapper
        .transform_userinfo(&mut userinfo_claims, &config, &context)
        .await;
    assert_eq!(userinfo_claims.get(CLAIM), Some(&expected));
    Ok(())
}

#[tokio::test]
async fn duplicate_billing_ids_stay_distinct_entries() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/roles");
            then.status(200).body(
                r#"{"roles":[
                    {"dataAssetKey":"BILLING_ID","dataAssetValue":"ACCT-1","role":"VIEW"},
                    {"dataAssetKey":"BILLING_ID","dataAssetValue":"ACCT-1","role":"PAY"}
                ]}"#,
            );
        })
        .await;

    let enricher = enricher_for(&server.url("/roles"))?;
    let mut claims = ClaimSet::new();
    let outcome = enricher.enrich(CLAIM, &mut claims).await;

    assert!(outcome.attached());
    assert_eq!(outcome.grant_count(), 2);
    assert_eq!(
        claims.get(CLAIM),
        Some(&json!([
            {"billingId": "ACCT-1", "assignedGrants": {"grant": "VIEW"}},
            {"billingId": "ACCT-1", "assignedGrants": {"grant": "PAY"}}
        ]))
    );
    Ok(())
}

#[tokio::test]
async fn subject_without_billing_grants_gets_an_empty_array() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/roles");
            then.status(200)
                .body(r#"{"roles":[{"dataAssetKey":"OTHER","dataAssetValue":"x","role":"y"}]}"#);
        })
        .await;

    let enricher = enricher_for(&server.url("/roles"))?;
    let mut claims = ClaimSet::new();
    let outcome = enricher.enrich(CLAIM, &mut claims).await;

    assert!(outcome.attached());
    assert_eq!(outcome.grant_count(), 0);
    assert_eq!(claims.get(CLAIM), Some(&json!([])));
    Ok(())
}

#[tokio::test]
async fn missing_roles_key_attaches_an_empty_array() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/roles");
            then.status(200).body("{}");
        })
        .await;

    let enricher = enricher_for(&server.url("/roles"))?;
    let mut claims = ClaimSet::new();
    let outcome = enricher.enrich(CLAIM, &mut claims).await;

    assert!(outcome.attached());
    assert_eq!(claims.get(CLAIM), Some(&json!([])));
    Ok(())
}

#[tokio::test]
async fn server_error_fails_open_without_a_claim() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/roles");
            then.status(500).body("upstream exploded");
        })
        .await;

    let enricher = enricher_for(&server.url("/roles"))?;
    let mut claims = ClaimSet::new();
    let outcome = enricher.enrich(CLAIM, &mut claims).await;

    match outcome {
        EnrichmentOutcome::Failed { stage, error } => {
            assert_eq!(stage, EnrichmentStage::Fetching);
            assert!(error.is_transport());
            assert_eq!(error.body(), Some("upstream exploded"));
        }
        EnrichmentOutcome::Done { .. } => panic!("expected a failed outcome"),
    }
    assert!(claims.is_empty());
    Ok(())
}

#[tokio::test]
async fn valid_body_under_an_error_status_is_still_a_failure() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/roles");
            then.status(503)
                .body(r#"{"roles":[{"dataAssetKey":"BILLING_ID","dataAssetValue":"ACCT-1","role":"VIEW"}]}"#);
        })
        .await;

    let enricher = enricher_for(&server.url("/roles"))?;
    let mut claims = ClaimSet::new();
    let outcome = enricher.enrich(CLAIM, &mut claims).await;

    assert!(!outcome.attached());
    assert!(claims.is_empty());
    Ok(())
}

#[tokio::test]
async fn unreachable_endpoint_fails_open() -> anyhow::Result<()> {
    init_tracing();
    // Nothing listens on port 1.
    let enricher = enricher_for("http://127.0.0.1:1/roles")?;
    let mut claims = ClaimSet::new();
    let outcome = enricher.enrich(CLAIM, &mut claims).await;

    match outcome {
        EnrichmentOutcome::Failed { stage, error } => {
            assert_eq!(stage, EnrichmentStage::Fetching);
            assert!(error.is_transport());
            assert_eq!(error.body(), None);
        }
        EnrichmentOutcome::Done { .. } => panic!("expected a failed outcome"),
    }
    assert!(claims.is_empty());
    Ok(())
}

#[tokio::test]
async fn malformed_body_fails_open() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/roles");
            then.status(200).body("<html>definitely not json</html>");
        })
        .await;

    let enricher = enricher_for(&server.url("/roles"))?;
    let mut claims = ClaimSet::new();
    let outcome = enricher.enrich(CLAIM, &mut claims).await;

    match outcome {
        EnrichmentOutcome::Failed { stage, error } => {
            assert_eq!(stage, EnrichmentStage::Parsing);
            assert!(!error.is_transport());
        }
        EnrichmentOutcome::Done { .. } => panic!("expected a failed outcome"),
    }
    assert!(claims.is_empty());
    Ok(())
}

#[tokio::test]
async fn missing_claim_name_skips_the_roles_call() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start_async().await;
    let roles = server
        .mock_async(|when, then| {
            when.method(GET).path("/roles");
            then.status(200).body("{}");
        })
        .await;

    let mapper = mapper_for(&server.url("/roles"))?;
    let config = MapperConfig::new("billing-grants", BillingGrantsMapper::PROVIDER_ID);
    let mut claims = ClaimSet::new();

    mapper
        .transform_access_token(&mut claims, &config, &MapperContext::new())
        .await;

    assert_eq!(roles.hits_async().await, 0);
    assert!(claims.is_empty());
    Ok(())
}

#[tokio::test]
async fn nested_claim_names_create_intermediate_objects() -> anyhow::Result<()> {
    init_tracing();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/roles");
            then.status(200)
                .body(r#"{"roles":[{"dataAssetKey":"BILLING_ID","dataAssetValue":"ACCT-1","role":"VIEW"}]}"#);
        })
        .await;

    let enricher = enricher_for(&server.url("/roles"))?;
    let mut claims = ClaimSet::new();
    enricher.enrich("entitlements.billing", &mut claims).await;

    assert_eq!(
        claims.get("entitlements"),
        Some(&json!({
            "billing": [{"billingId": "ACCT-1", "assignedGrants": {"grant": "VIEW"}}]
        }))
    );
    Ok(())
}
