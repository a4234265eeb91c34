//! Shared fixtures for the integration tests.

#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use line_forwarding::{
	audit::{AuditSink, MemoryAuditLog},
	client::ApiClient,
	config::{ApiEndpoint, ClientConfig},
	http::ReqwestHttpClient,
	reqwest::Client as ReqwestClient,
	sync::ForwardingSynchronizer,
	telephony::UserId,
};

pub const APP_KEY: &str = "app-key";
pub const CONSUMER_KEY: &str = "consumer-key";
pub const ACCOUNT: &str = "ba-1";
pub const LINE: &str = "0033123456789";
pub const OPTIONS_PATH: &str = "/1.0/telephony/ba-1/line/0033123456789/options";

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock`.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = ReqwestClient::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

pub fn config_for(base: &str) -> ClientConfig {
	ClientConfig::builder()
		.application_key(APP_KEY)
		.application_secret("app-secret")
		.consumer_key(CONSUMER_KEY)
		.endpoint(ApiEndpoint::parse(base).expect("Mock endpoint should parse."))
		.build()
		.expect("Test config should build.")
}

pub fn client_at(base: &str) -> ApiClient<ReqwestHttpClient> {
	ApiClient::with_http_client(config_for(base), test_reqwest_http_client())
}

pub fn client(server: &MockServer) -> ApiClient<ReqwestHttpClient> {
	client_at(&server.url("/1.0"))
}

pub fn synchronizer(
	server: &MockServer,
) -> (ForwardingSynchronizer<ReqwestHttpClient>, Arc<MemoryAuditLog>) {
	let log = Arc::new(MemoryAuditLog::default());
	let sink: Arc<dyn AuditSink> = log.clone();
	let actor = UserId::new("agent-7").expect("Actor fixture should be valid.");

	(ForwardingSynchronizer::new(client(server), sink, actor), log)
}

/// Options payload with every slot off and the default delay omitted.
pub fn inactive_options() -> Value {
	json!({
		"forwardUnconditional": false,
		"forwardUnconditionalNumber": "",
		"forwardBusy": false,
		"forwardBusyNumber": "",
		"forwardNoReply": false,
		"forwardNoReplyNumber": "",
		"displayNumber": LINE
	})
}

/// Mocks discovery of a single account holding a single line.
pub async fn mock_single_line(server: &MockServer) {
	server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/telephony");
			then.status(200).json_body(json!([ACCOUNT]));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/telephony/ba-1/line");
			then.status(200).json_body(json!([LINE]));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/telephony/ba-1/line/0033123456789");
			then.status(200).json_body(json!({ "serviceName": LINE, "description": "Front desk" }));
		})
		.await;
}

/// Expected `PUT` body for a forwarding write on `field` (e.g. `forwardBusy`).
pub fn forwarding_body(field: &str, destination: Option<&str>) -> Value {
	let mut body = serde_json::Map::new();

	body.insert(field.to_owned(), Value::Bool(destination.is_some()));
	body.insert(format!("{field}Number"), Value::String(destination.unwrap_or_default().to_owned()));

	Value::Object(body)
}
