//! Pact contract tests for the Confluent Cloud environments API
//!
//! These tests define the contract between this client and the `/org/v2/environments`
//! collection. Requests are issued through the real transport and resource client.

mod common;

use common::{test_config, transport, BASIC_AUTH_HEADER};
use confluent_cloud::client::ResourceClient;
use confluent_cloud::types::Resource;
use pact_consumer::prelude::*;
use serde_json::{json, Map, Value};

const CONSUMER: &str = "Confluent-Cloud-Client";
const PROVIDER: &str = "Confluent-Cloud-Org-API";

/// Mock server base URL without the trailing slash
fn base_url(url: &impl std::fmt::Display) -> String {
    url.to_string().trim_end_matches('/').to_string()
}

fn attributes(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

#[tokio::test]
async fn test_list_environments_contract() {
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("list environments", "", |mut i| {
        i.given("two environments exist");
        i.request
            .method("GET")
            .path("/org/v2/environments".to_string())
            .header("authorization", BASIC_AUTH_HEADER);
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "api_version": "org/v2",
                "kind": "EnvironmentList",
                "metadata": {"first": "", "next": ""},
                "data": [
                    {"id": "env-a1", "display_name": "prod"},
                    {"id": "env-b2", "display_name": "staging"}
                ]
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let transport = transport(test_config(&base_url(&mock_server.url()), 0));

    let envelope = ResourceClient::new(&transport, "/org/v2/environments")
        .list()
        .await
        .expect("Failed to list environments");

    assert_eq!(envelope.kind.as_deref(), Some("EnvironmentList"));
    assert_eq!(
        envelope.data.iter().map(Resource::id).collect::<Vec<_>>(),
        vec!["env-a1", "env-b2"]
    );
}

#[tokio::test]
async fn test_create_environment_contract() {
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("create an environment", "", |mut i| {
        i.given("no environment named test_env exists");
        i.request
            .method("POST")
            .path("/org/v2/environments".to_string())
            .header("authorization", BASIC_AUTH_HEADER)
            .header("content-type", "application/json")
            .json_body(json!({"display_name": "test_env"}));
        i.response
            .status(201)
            .header("content-type", "application/json")
            .json_body(json!({
                "api_version": "org/v2",
                "kind": "Environment",
                "id": "env-xxx",
                "display_name": "test_env"
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let transport = transport(test_config(&base_url(&mock_server.url()), 0));

    let result = ResourceClient::new(&transport, "/org/v2/environments")
        .create(&attributes(json!({"display_name": "test_env"})))
        .await
        .expect("Failed to create environment");

    assert!(result.changed);
    assert_eq!(result.resource.expect("created resource").id(), "env-xxx");
}

#[tokio::test]
async fn test_rename_environment_contract() {
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("rename an environment", "", |mut i| {
        i.given("environment env-dsh38dja exists with display_name test_env_old");
        i.request
            .method("PATCH")
            .path("/org/v2/environments/env-dsh38dja".to_string())
            .header("authorization", BASIC_AUTH_HEADER)
            .header("content-type", "application/json")
            .json_body(json!({"display_name": "test_env_new"}));
        i.response
            .status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "api_version": "org/v2",
                "kind": "Environment",
                "id": "env-dsh38dja",
                "display_name": "test_env_new"
            }));
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let transport = transport(test_config(&base_url(&mock_server.url()), 0));

    let existing = Resource::try_from(json!({"id": "env-dsh38dja", "display_name": "test_env_old"}))
        .expect("valid resource");
    let result = ResourceClient::new(&transport, "/org/v2/environments")
        .with_key_id("env-dsh38dja")
        .update(&existing, &attributes(json!({"display_name": "test_env_new"})))
        .await
        .expect("Failed to rename environment");

    assert!(result.changed);
    assert_eq!(
        result
            .resource
            .expect("updated resource")
            .str_field("display_name"),
        Some("test_env_new")
    );
}

#[tokio::test]
async fn test_delete_environment_contract() {
    let mut pact_builder = PactBuilder::new(CONSUMER, PROVIDER);

    pact_builder.interaction("delete an environment", "", |mut i| {
        i.given("environment env-a1 exists");
        i.request
            .method("DELETE")
            .path("/org/v2/environments/env-a1".to_string())
            .header("authorization", BASIC_AUTH_HEADER);
        i.response.status(204);
        i
    });

    let mock_server = pact_builder.start_mock_server(None, None);
    let transport = transport(test_config(&base_url(&mock_server.url()), 0));

    let result = ResourceClient::new(&transport, "/org/v2/environments")
        .with_key_id("env-a1")
        .absent()
        .await
        .expect("Failed to delete environment");

    assert!(result.changed);
    assert!(result.resource.is_none());
}
