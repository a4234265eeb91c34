//! Forwarding slots and the per-line options snapshot.

// self
use crate::{
	_prelude::*,
	telephony::{BillingAccount, LineNumber},
};

/// Destination sentinel meaning "the line's own voicemail" for busy/no-reply forwarding.
pub const VOICEMAIL: &str = "voicemail";
/// No-reply delay applied when the provider omits one.
pub const DEFAULT_NO_REPLY_TIMER: u32 = 20;
/// Largest accepted no-reply delay, in seconds.
pub const MAX_NO_REPLY_TIMER: u32 = 60;

/// The three forwarding conditions a line supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForwardingKind {
	/// Every call is forwarded.
	Unconditional,
	/// Calls are forwarded while the line is busy.
	Busy,
	/// Calls are forwarded after the no-reply delay.
	NoReply,
}
impl ForwardingKind {
	/// All kinds, in the order a reset deactivates them.
	pub const ALL: [ForwardingKind; 3] =
		[ForwardingKind::Unconditional, ForwardingKind::Busy, ForwardingKind::NoReply];

	/// Returns a stable label suitable for logs and audit rows.
	pub const fn as_str(self) -> &'static str {
		match self {
			ForwardingKind::Unconditional => "unconditional",
			ForwardingKind::Busy => "busy",
			ForwardingKind::NoReply => "noReply",
		}
	}

	/// Whether the kind accepts the [`VOICEMAIL`] sentinel as a destination.
	pub const fn accepts_voicemail(self) -> bool {
		matches!(self, ForwardingKind::Busy | ForwardingKind::NoReply)
	}
}
impl Display for ForwardingKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// State of one forwarding condition.
///
/// `destination` is only meaningful while `active` is `true`; use
/// [`ForwardingSlot::effective_destination`] when rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardingSlot {
	/// Whether calls are currently forwarded for this condition.
	pub active: bool,
	/// Target number or [`VOICEMAIL`].
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub destination: Option<String>,
}
impl ForwardingSlot {
	/// Inactive slot without destination.
	pub fn inactive() -> Self {
		Self::default()
	}

	/// Slot state after a successful write of `destination` (`None` deactivates).
	pub fn from_write(destination: Option<String>) -> Self {
		Self { active: destination.is_some(), destination }
	}

	/// Destination to display, hidden while the slot is inactive.
	pub fn effective_destination(&self) -> Option<&str> {
		if self.active { self.destination.as_deref() } else { None }
	}

	/// Returns `true` when the slot forwards to voicemail.
	pub fn is_voicemail(&self) -> bool {
		self.effective_destination() == Some(VOICEMAIL)
	}
}

/// Full forwarding configuration snapshot of one line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineOptions {
	/// Billing account owning the line.
	pub service_name: BillingAccount,
	/// Line identifier.
	pub line_number: LineNumber,
	/// Unconditional forwarding.
	pub unconditional: ForwardingSlot,
	/// Forwarding while busy.
	pub busy: ForwardingSlot,
	/// Forwarding after the no-reply delay.
	pub no_reply: ForwardingSlot,
	/// No-reply delay in seconds (0-60).
	pub no_reply_timer: u32,
}
impl LineOptions {
	/// Options for a line with nothing forwarded and the default delay.
	pub fn inactive(service_name: BillingAccount, line_number: LineNumber) -> Self {
		Self {
			service_name,
			line_number,
			unconditional: ForwardingSlot::inactive(),
			busy: ForwardingSlot::inactive(),
			no_reply: ForwardingSlot::inactive(),
			no_reply_timer: DEFAULT_NO_REPLY_TIMER,
		}
	}

	/// Borrows the slot of `kind`.
	pub fn slot(&self, kind: ForwardingKind) -> &ForwardingSlot {
		match kind {
			ForwardingKind::Unconditional => &self.unconditional,
			ForwardingKind::Busy => &self.busy,
			ForwardingKind::NoReply => &self.no_reply,
		}
	}

	/// Mutably borrows the slot of `kind`.
	pub fn slot_mut(&mut self, kind: ForwardingKind) -> &mut ForwardingSlot {
		match kind {
			ForwardingKind::Unconditional => &mut self.unconditional,
			ForwardingKind::Busy => &mut self.busy,
			ForwardingKind::NoReply => &mut self.no_reply,
		}
	}

	/// Returns `true` when any slot is forwarding.
	pub fn any_active(&self) -> bool {
		ForwardingKind::ALL.into_iter().any(|kind| self.slot(kind).active)
	}
}
