// Integration tests for the full request flow
// These tests drive events through the Lambda entry point in both response styles
#![allow(clippy::unwrap_used)]

use apig_lambda_handler::config::{Config, DEFAULT_REDIRECT_URL};
use apig_lambda_handler::encoder::ResponseStyle;
use apig_lambda_handler::handler::{Handler, function_handler};
use apig_lambda_handler::models::{ErrorKind, OutboundResponse};
use apig_lambda_handler::resources::TINY_PNG;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use lambda_runtime::{Context, Diagnostic, LambdaEvent};
use serde_json::{Value, json};

const REDIRECT_URL: &str =
    "https://my-bucket.s3.ap-southeast-2.amazonaws.com/tiny.png?X-Amz-Signature=abc";

fn structured_handler() -> Handler {
    Handler::from_config(&Config {
        redirect_url: REDIRECT_URL.to_string(),
        ..Config::default()
    })
}

fn prefix_handler() -> Handler {
    Handler::from_config(&Config {
        style: ResponseStyle::MessagePrefix,
        redirect_url: REDIRECT_URL.to_string(),
        ..Config::default()
    })
}

async fn invoke(handler: &Handler, payload: Value) -> Result<Value, Diagnostic> {
    function_handler(handler, create_test_lambda_event(payload)).await
}

async fn invoke_structured(payload: Value) -> OutboundResponse {
    let value = invoke(&structured_handler(), payload).await.unwrap();
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn test_structured_binary_resource() {
    let response = invoke_structured(json!({"path": "/wms"})).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.header("Content-Type"), Some("image/png"));
    assert!(response.is_base64_encoded);
    assert_eq!(STANDARD.decode(&response.body).unwrap(), TINY_PNG);
}

#[tokio::test]
async fn test_request_path_is_read_from_event() {
    let response = invoke_structured(json!({
        "path": "/hello",
        "queryStringParameters": {"name": "World"}
    }))
    .await;
    assert_eq!(response.status_code, 200);

    let response = invoke_structured(json!({"path": "/wms"})).await;
    assert!(response.is_base64_encoded);
}

#[tokio::test]
async fn test_structured_greeting() {
    let response = invoke_structured(json!({"queryStringParameters": {"name": "World"}})).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.header("Content-Type"), Some("application/json"));
    assert!(!response.is_base64_encoded);
    assert_eq!(response.body, r#"{"response":"Hello World"}"#);
}

#[tokio::test]
async fn test_structured_missing_name() {
    let response = invoke_structured(json!({"queryStringParameters": {}})).await;

    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("parameter 'name' not found"));
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["errorType"], "BadRequest");
    assert_eq!(body["errorMessage"], "BadRequest: parameter 'name' not found");
}

#[tokio::test]
async fn test_structured_redirect() {
    let response = invoke_structured(json!({"queryStringParameters": {"name": "redirect"}})).await;

    assert_eq!(response.status_code, 302);
    assert_eq!(response.header("Location"), Some(REDIRECT_URL));
}

#[tokio::test]
async fn test_structured_errors_never_fail_the_invocation() {
    for payload in [json!(null), json!([]), json!("text"), json!({"path": 7})] {
        let result = invoke(&structured_handler(), payload.clone()).await;
        assert!(result.is_ok(), "payload {payload} should produce a response");
    }
}

#[tokio::test]
async fn test_full_api_gateway_proxy_event() {
    let event = json!({
        "resource": "/hello",
        "path": "/hello",
        "httpMethod": "GET",
        "headers": {"Host": "abc.execute-api.ap-southeast-2.amazonaws.com"},
        "multiValueHeaders": {"Host": ["abc.execute-api.ap-southeast-2.amazonaws.com"]},
        "queryStringParameters": {"name": "Dave"},
        "multiValueQueryStringParameters": {"name": ["Dave"]},
        "pathParameters": null,
        "stageVariables": null,
        "requestContext": {"stage": "prod", "requestId": "c6af9ac6-7b61-11e6-9a41-93e8deadbeef"},
        "body": null,
        "isBase64Encoded": false
    });

    let response = invoke_structured(event).await;
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, r#"{"response":"Hello Dave"}"#);
}

#[tokio::test]
async fn test_prefix_greeting_is_plain_text() {
    let value = invoke(&prefix_handler(), json!({"queryStringParameters": {"name": "World"}}))
        .await
        .unwrap();
    assert_eq!(value, Value::String(r#"{"response":"Hello World"}"#.to_string()));
}

#[tokio::test]
async fn test_prefix_missing_name() {
    let err = invoke(&prefix_handler(), json!({})).await.unwrap_err();

    assert_eq!(err.error_type, "BadRequest");
    assert_eq!(err.error_message, "BadRequest: parameter 'name' not found");
    assert_eq!(
        ErrorKind::from_wire_message(&err.error_message),
        Some(ErrorKind::BadRequest)
    );
}

#[tokio::test]
async fn test_prefix_redirect_is_bare_url() {
    let err = invoke(&prefix_handler(), json!({"queryStringParameters": {"name": "redirect"}}))
        .await
        .unwrap_err();

    assert_eq!(err.error_type, "Redirect");
    assert_eq!(err.error_message, REDIRECT_URL);
    assert_eq!(
        ErrorKind::from_wire_message(&err.error_message),
        Some(ErrorKind::Redirect)
    );
}

#[tokio::test]
async fn test_prefix_binary_is_base64_text() {
    let value = invoke(&prefix_handler(), json!({"path": "/wms"})).await.unwrap();
    let decoded = STANDARD.decode(value.as_str().unwrap()).unwrap();
    assert_eq!(decoded, TINY_PNG);
}

#[tokio::test]
async fn test_prefix_missing_asset_is_server_exception() {
    let handler = Handler::from_config(&Config {
        style: ResponseStyle::MessagePrefix,
        asset_file: Some("/nonexistent/tiny.png".into()),
        ..Config::default()
    });

    let err = invoke(&handler, json!({"path": "/wms"})).await.unwrap_err();
    assert_eq!(err.error_type, "ServerError");
    assert_eq!(err.error_message, "ServerException: Failed to load binary resource");
    assert!(!err.error_message.contains("/nonexistent"));
    assert_eq!(
        ErrorKind::from_wire_message(&err.error_message),
        Some(ErrorKind::ServerError)
    );
}

#[tokio::test]
async fn test_structured_missing_asset_is_500() {
    let handler = Handler::from_config(&Config {
        asset_file: Some("/nonexistent/tiny.png".into()),
        ..Config::default()
    });

    let value = invoke(&handler, json!({"path": "/wms"})).await.unwrap();
    assert_eq!(value["statusCode"], 500);
}

#[tokio::test]
async fn test_default_redirect_url() {
    let handler = Handler::from_config(&Config::default());
    let value = invoke(&handler, json!({"queryStringParameters": {"name": "redirect"}}))
        .await
        .unwrap();
    assert_eq!(value["headers"]["Location"], DEFAULT_REDIRECT_URL);
}

#[tokio::test]
async fn test_repeated_invocations_are_identical() {
    let handler = structured_handler();
    for payload in [
        json!({"path": "/wms"}),
        json!({"queryStringParameters": {"name": "World"}}),
        json!({"queryStringParameters": {"name": "redirect"}}),
        json!({}),
    ] {
        let first = invoke(&handler, payload.clone()).await.unwrap();
        let second = invoke(&handler, payload).await.unwrap();
        assert_eq!(first.to_string(), second.to_string());
    }
}

#[tokio::test]
async fn test_concurrent_invocations() {
    let handler = structured_handler();
    let handler = &handler;

    let requests = (0..10).map(|i| async move {
        let name = format!("User{i}");
        let value = invoke(handler, json!({"queryStringParameters": {"name": name}}))
            .await
            .unwrap();
        (name, value)
    });

    let results = futures::future::join_all(requests).await;
    for (name, value) in results {
        assert_eq!(value["statusCode"], 200);
        let body: Value = serde_json::from_str(value["body"].as_str().unwrap()).unwrap();
        assert_eq!(body["response"], format!("Hello {name}"));
    }
}

/// Helper function to create a test Lambda event
fn create_test_lambda_event(payload: Value) -> LambdaEvent<Value> {
    LambdaEvent {
        payload,
        context: Context::default(),
    }
}
