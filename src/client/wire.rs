//! Provider wire shapes and the field mapping onto the telephony model.
//!
//! Provider field names appear in this file only; drift in the provider's payloads is absorbed
//! here and never leaks into [`LineOptions`] or [`ForwardingSlot`].

// crates.io
use serde_json::{Map, Value};
// self
use crate::{
	_prelude::*,
	telephony::{
		BillingAccount, DEFAULT_NO_REPLY_TIMER, ForwardingKind, ForwardingSlot, LineNumber,
		LineOptions,
	},
};

/// Failure payload returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProviderErrorBody {
	pub(crate) message: Option<String>,
	pub(crate) error_code: Option<String>,
}

/// `GET /telephony/{account}/line/{line}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LineDetail {
	#[serde(default)]
	line_number: Option<String>,
	#[serde(default)]
	service_name: Option<String>,
	#[serde(default)]
	pub(crate) description: Option<String>,
}
impl LineDetail {
	/// Line number reported by the provider: `lineNumber`, then `serviceName`, then `fallback`.
	pub(crate) fn line_number<'a>(&'a self, fallback: &'a str) -> &'a str {
		[&self.line_number, &self.service_name]
			.into_iter()
			.flatten()
			.map(String::as_str)
			.find(|value| !value.trim().is_empty())
			.unwrap_or(fallback)
	}
}

/// `GET /telephony/{account}/line/{line}/options`; only the forwarding fields are kept.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LineOptionsPayload {
	#[serde(default)]
	forward_unconditional: Option<bool>,
	#[serde(default)]
	forward_unconditional_number: Option<String>,
	#[serde(default)]
	forward_busy: Option<bool>,
	#[serde(default)]
	forward_busy_number: Option<String>,
	#[serde(default)]
	forward_no_reply: Option<bool>,
	#[serde(default)]
	forward_no_reply_number: Option<String>,
	#[serde(default)]
	forward_no_reply_delay: Option<u32>,
}
impl LineOptionsPayload {
	pub(crate) fn into_line_options(
		self,
		service_name: BillingAccount,
		line_number: LineNumber,
	) -> LineOptions {
		LineOptions {
			service_name,
			line_number,
			unconditional: slot(self.forward_unconditional, self.forward_unconditional_number),
			busy: slot(self.forward_busy, self.forward_busy_number),
			no_reply: slot(self.forward_no_reply, self.forward_no_reply_number),
			no_reply_timer: self.forward_no_reply_delay.unwrap_or(DEFAULT_NO_REPLY_TIMER),
		}
	}
}

fn slot(active: Option<bool>, number: Option<String>) -> ForwardingSlot {
	ForwardingSlot {
		active: active.unwrap_or(false),
		destination: number.filter(|value| !value.trim().is_empty()),
	}
}

const fn flag_field(kind: ForwardingKind) -> &'static str {
	match kind {
		ForwardingKind::Unconditional => "forwardUnconditional",
		ForwardingKind::Busy => "forwardBusy",
		ForwardingKind::NoReply => "forwardNoReply",
	}
}

const fn number_field(kind: ForwardingKind) -> &'static str {
	match kind {
		ForwardingKind::Unconditional => "forwardUnconditionalNumber",
		ForwardingKind::Busy => "forwardBusyNumber",
		ForwardingKind::NoReply => "forwardNoReplyNumber",
	}
}

/// Body activating (`Some`) or deactivating (`None`) one slot.
pub(crate) fn forwarding_update(kind: ForwardingKind, destination: Option<&str>) -> Value {
	let mut body = Map::new();

	body.insert(flag_field(kind).into(), Value::Bool(destination.is_some()));
	body.insert(number_field(kind).into(), Value::String(destination.unwrap_or_default().into()));

	Value::Object(body)
}

/// Body changing the no-reply delay.
pub(crate) fn no_reply_timer_update(seconds: u32) -> Value {
	let mut body = Map::new();

	body.insert("forwardNoReplyDelay".into(), Value::from(seconds));

	Value::Object(body)
}
