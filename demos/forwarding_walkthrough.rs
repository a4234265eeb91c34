//! Walks through discovering a line, forwarding it, undoing the change, and resetting every slot
//! against a mocked provider, then prints the resulting audit trail.

// std
use std::{collections::HashMap, sync::Arc};
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use line_forwarding::{
	audit::{AuditSink, MemoryAuditLog},
	client::ApiClient,
	config::ClientConfig,
	http::ReqwestHttpClient,
	reqwest::Client,
	sync::ForwardingSynchronizer,
	telephony::{ForwardingKind, UserId},
};

const OPTIONS_PATH: &str = "/1.0/telephony/ba-demo/line/0033972103630/options";

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/telephony");
			then.status(200).json_body(json!(["ba-demo"]));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/telephony/ba-demo/line");
			then.status(200).json_body(json!(["0033972103630"]));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/telephony/ba-demo/line/0033972103630");
			then.status(200).json_body(json!({ "serviceName": "0033972103630" }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path(OPTIONS_PATH);
			then.status(200).json_body(json!({
				"forwardUnconditional": false,
				"forwardBusy": true,
				"forwardBusyNumber": "voicemail",
				"forwardNoReplyDelay": 25
			}));
		})
		.await;

	let writes = server
		.mock_async(|when, then| {
			when.method(PUT).path(OPTIONS_PATH).header_exists("X-Ovh-Signature");
			then.status(200).body("null");
		})
		.await;
	let env = HashMap::from([
		("OVH_APP_KEY", "demo-app-key".to_owned()),
		("OVH_APP_SECRET", "demo-app-secret".to_owned()),
		("OVH_CONSUMER_KEY", "demo-consumer-key".to_owned()),
		("OVH_ENDPOINT", server.url("/1.0")),
	]);
	let config = ClientConfig::from_lookup(|name| env.get(name).cloned())?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client = <ApiClient<ReqwestHttpClient>>::with_http_client(config, http_client);
	let log = Arc::new(MemoryAuditLog::default());
	let sink: Arc<dyn AuditSink> = log.clone();
	let sync = ForwardingSynchronizer::new(client, sink, UserId::new("demo-operator")?);

	println!("Discover lines: {:?}.", sync.list_lines().await);

	for line in sync.lines() {
		println!("  {} / {}: {}.", line.service_name, line.line_number, line.description);
	}

	println!("Select line: {:?}.", sync.select_line("0033972103630").await);
	println!(
		"Forward everything: {:?}.",
		sync.update_forwarding(ForwardingKind::Unconditional, Some("+33 6 11 22 33 44")).await
	);
	println!("Pending undo: {:?}.", sync.undo_snapshot());
	println!("Undo: {:?}.", sync.undo_unconditional().await);
	println!("Timer to 90 seconds: {:?}.", sync.update_no_reply_timer(90).await);

	if let Some(error) = sync.last_error() {
		println!("  rejected: {error}");
	}

	println!("Reset all: {:?}.", sync.reset_all_forwarding().await);
	println!("Options now: {:?}.", sync.options());

	for record in log.records() {
		println!(
			"{} {} {:?} {:?} -> {:?}.",
			record.recorded_at, record.actor, record.kind, record.action, record.destination
		);
	}

	writes.assert_calls_async(5).await;

	Ok(())
}
