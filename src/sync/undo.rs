//! Single-slot undo for unconditional forwarding.

// self
use crate::{_prelude::*, telephony::ForwardingSlot};

/// Unconditional forwarding as it was before the last confirmed change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoSnapshot {
	/// Whether forwarding was on.
	pub active: bool,
	/// Destination held by the slot at capture time.
	pub destination: Option<String>,
}
impl UndoSnapshot {
	/// Captures `slot` as it currently stands.
	pub fn capture(slot: &ForwardingSlot) -> Self {
		Self { active: slot.active, destination: slot.destination.clone() }
	}

	/// Destination to write back: `None` when forwarding was off.
	pub fn restore_target(&self) -> Option<&str> {
		if self.active { self.destination.as_deref() } else { None }
	}
}
