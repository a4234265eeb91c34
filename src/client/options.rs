//! Forwarding options: read, per-slot writes, the no-reply delay, and reset.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, wire},
	http::ApiHttpClient,
	obs::{self, OpKind},
	telephony::{BillingAccount, ForwardingKind, LineNumber, LineOptions},
};

impl<C> ApiClient<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Reads the consolidated options resource of one line.
	pub async fn line_options(
		&self,
		service_name: &BillingAccount,
		line_number: &LineNumber,
	) -> Result<LineOptions> {
		obs::observe(OpKind::LineOptions, Some(line_number), async move {
			let payload: wire::LineOptionsPayload =
				self.get_json(&options_path(service_name, line_number)).await?;

			Ok(payload.into_line_options(service_name.clone(), line_number.clone()))
		})
		.await
	}

	/// Activates (`Some`) or deactivates (`None`) one forwarding slot.
	///
	/// The write is always issued, even when the slot already holds the requested state.
	pub async fn set_forwarding(
		&self,
		service_name: &BillingAccount,
		line_number: &LineNumber,
		kind: ForwardingKind,
		destination: Option<&str>,
	) -> Result<()> {
		obs::observe(OpKind::SetForwarding, Some(line_number), async move {
			self.put_json(
				&options_path(service_name, line_number),
				wire::forwarding_update(kind, destination),
			)
			.await
		})
		.await
	}

	/// Sets the no-reply delay. `seconds` is forwarded as is; range checks belong to the caller.
	pub async fn set_no_reply_timer(
		&self,
		service_name: &BillingAccount,
		line_number: &LineNumber,
		seconds: u32,
	) -> Result<()> {
		obs::observe(OpKind::SetNoReplyTimer, Some(line_number), async move {
			self.put_json(
				&options_path(service_name, line_number),
				wire::no_reply_timer_update(seconds),
			)
			.await
		})
		.await
	}

	/// Deactivates unconditional, busy, then no-reply forwarding, one write at a time.
	///
	/// The first failure stops the sequence and is returned; slots written before it stay
	/// deactivated on the provider side.
	pub async fn reset_all_forwarding(
		&self,
		service_name: &BillingAccount,
		line_number: &LineNumber,
	) -> Result<()> {
		obs::observe(OpKind::ResetAllForwarding, Some(line_number), async move {
			let path = options_path(service_name, line_number);

			for kind in ForwardingKind::ALL {
				self.put_json(&path, wire::forwarding_update(kind, None)).await?;
			}

			Ok(())
		})
		.await
	}
}

fn options_path<'a>(service_name: &'a BillingAccount, line_number: &'a LineNumber) -> [&'a str; 5] {
	["telephony", service_name.as_ref(), "line", line_number.as_ref(), "options"]
}
