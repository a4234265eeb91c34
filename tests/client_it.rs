mod common;

// crates.io
use httpmock::prelude::*;
use serde_json::json;
// self
use common::*;
use line_forwarding::{
	error::{Error, ProtocolError, TransportError},
	telephony::{BillingAccount, ForwardingKind, ForwardingSlot, LineNumber},
};

fn ids() -> (BillingAccount, LineNumber) {
	(
		BillingAccount::new(ACCOUNT).expect("Account fixture should be valid."),
		LineNumber::new(LINE).expect("Line fixture should be valid."),
	)
}

#[tokio::test]
async fn requests_carry_signed_headers() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/1.0/telephony")
				.header("X-Ovh-Application", APP_KEY)
				.header("X-Ovh-Consumer", CONSUMER_KEY)
				.header_exists("X-Ovh-Timestamp")
				.header_exists("X-Ovh-Signature");
			then.status(200).json_body(json!([]));
		})
		.await;
	let lines = client(&server).list_lines().await.expect("Empty discovery should succeed.");

	assert!(lines.is_empty());

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn list_lines_skips_accounts_and_lines_that_fail() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/telephony");
			then.status(200).json_body(json!(["ba-1", "ba-2"]));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/telephony/ba-1/line");
			then.status(200).json_body(json!(["0033100000001", "0033100000002", "0033100000003"]));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/telephony/ba-1/line/0033100000001");
			then.status(200)
				.json_body(json!({ "serviceName": "0033100000001", "description": "Reception" }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/telephony/ba-1/line/0033100000002");
			then.status(404).json_body(json!({ "message": "The requested object does not exist" }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/telephony/ba-1/line/0033100000003");
			then.status(200).json_body(json!({ "description": null }));
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/telephony/ba-2/line");
			then.status(500).body("upstream unavailable");
		})
		.await;

	let lines = client(&server).list_lines().await.expect("Partial discovery should succeed.");
	let described: Vec<(&str, &str, &str)> = lines
		.iter()
		.map(|line| (&*line.service_name, &*line.line_number, line.description.as_str()))
		.collect();

	assert_eq!(described, vec![
		("ba-1", "0033100000001", "Reception"),
		("ba-1", "0033100000003", "Line 0033100000003"),
	]);
}

#[tokio::test]
async fn line_detail_with_both_number_keys_is_listed() {
	let server = MockServer::start_async().await;

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
			then.status(200).json_body(json!({
				"serviceName": LINE,
				"lineNumber": LINE,
				"description": "Desk"
			}));
		})
		.await;

	let lines = client(&server).list_lines().await.expect("Discovery should succeed.");

	assert_eq!(lines.len(), 1);
	assert_eq!(&*lines[0].line_number, LINE);
	assert_eq!(lines[0].description, "Desk");
}

#[tokio::test]
async fn account_enumeration_failure_propagates_provider_message() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/1.0/telephony");
			then.status(403).json_body(json!({
				"message": "This call has not been granted",
				"errorCode": "NOT_GRANTED_CALL",
				"httpCode": "403 Forbidden"
			}));
		})
		.await;

	let err = client(&server).list_lines().await.expect_err("Denied discovery should fail.");

	match err {
		Error::Protocol(ProtocolError::Provider { status, message, error_code }) => {
			assert_eq!(status, 403);
			assert_eq!(message, "This call has not been granted");
			assert_eq!(error_code.as_deref(), Some("NOT_GRANTED_CALL"));
		},
		other => panic!("Unexpected error: {other:?}."),
	}
}

#[tokio::test]
async fn line_options_map_provider_fields() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path(OPTIONS_PATH);
			then.status(200).json_body(json!({
				"forwardUnconditional": true,
				"forwardUnconditionalNumber": "0611223344",
				"forwardBusy": true,
				"forwardBusyNumber": "voicemail",
				"forwardNoReply": false,
				"forwardNoReplyNumber": "",
				"forwardNoReplyDelay": 35,
				"lockOutCall": false
			}));
		})
		.await;

	let (account, line) = ids();
	let options = client(&server)
		.line_options(&account, &line)
		.await
		.expect("Options read should succeed.");

	assert_eq!(options.unconditional, ForwardingSlot::from_write(Some("0611223344".into())));
	assert!(options.busy.is_voicemail());
	assert_eq!(options.no_reply, ForwardingSlot::inactive());
	assert_eq!(options.no_reply_timer, 35);
	assert_eq!(&*options.line_number, LINE);
}

#[tokio::test]
async fn malformed_options_surface_decode_errors() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path(OPTIONS_PATH);
			then.status(200).json_body(json!({ "forwardNoReplyDelay": "soon" }));
		})
		.await;

	let (account, line) = ids();
	let err = client(&server)
		.line_options(&account, &line)
		.await
		.expect_err("Malformed options should fail.");

	match err {
		Error::Protocol(ProtocolError::Decode { status, source }) => {
			assert_eq!(status, 200);
			assert_eq!(source.path().to_string(), "forwardNoReplyDelay");
		},
		other => panic!("Unexpected error: {other:?}."),
	}
}

#[tokio::test]
async fn writes_send_kind_specific_json_bodies() {
	let server = MockServer::start_async().await;
	let activate = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path(OPTIONS_PATH)
				.header("Content-Type", "application/json")
				.header_exists("X-Ovh-Signature")
				.json_body(forwarding_body("forwardNoReply", Some("voicemail")));
			then.status(200).body("null");
		})
		.await;
	let timer = server
		.mock_async(|when, then| {
			when.method(PUT).path(OPTIONS_PATH).json_body(json!({ "forwardNoReplyDelay": 45 }));
			then.status(200).body("null");
		})
		.await;
	let (account, line) = ids();
	let client = client(&server);

	client
		.set_forwarding(&account, &line, ForwardingKind::NoReply, Some("voicemail"))
		.await
		.expect("Forwarding write should succeed.");
	client.set_no_reply_timer(&account, &line, 45).await.expect("Timer write should succeed.");

	activate.assert_calls_async(1).await;
	timer.assert_calls_async(1).await;
}

#[tokio::test]
async fn reset_stops_at_first_failing_slot() {
	let server = MockServer::start_async().await;
	let unconditional = server
		.mock_async(|when, then| {
			when.method(PUT)
				.path(OPTIONS_PATH)
				.json_body(forwarding_body("forwardUnconditional", None));
			then.status(200).body("null");
		})
		.await;
	let busy = server
		.mock_async(|when, then| {
			when.method(PUT).path(OPTIONS_PATH).json_body(forwarding_body("forwardBusy", None));
			then.status(502).body("<html>Bad gateway</html>");
		})
		.await;
	let no_reply = server
		.mock_async(|when, then| {
			when.method(PUT).path(OPTIONS_PATH).json_body(forwarding_body("forwardNoReply", None));
			then.status(200).body("null");
		})
		.await;
	let (account, line) = ids();
	let err = client(&server)
		.reset_all_forwarding(&account, &line)
		.await
		.expect_err("Reset should fail on the busy slot.");

	assert!(matches!(err, Error::Protocol(ProtocolError::Http { status: 502 })));

	unconditional.assert_calls_async(1).await;
	busy.assert_calls_async(1).await;
	no_reply.assert_calls_async(0).await;
}

#[tokio::test]
async fn unreachable_provider_maps_to_transport_error() {
	let err = client_at("http://127.0.0.1:9/1.0")
		.list_lines()
		.await
		.expect_err("Closed port should fail.");

	assert!(matches!(err, Error::Transport(TransportError::Network { .. })));
	assert!(err.is_retryable());
	assert_eq!(err.http_status(), None);
}
