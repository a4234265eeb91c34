//! Audit trail contracts and the built-in in-memory sink.
//!
//! Every forwarding change accepted by the provider produces one [`AuditRecord`]. The sink is an
//! external collaborator (typically an append-only relational table keyed by actor and line);
//! the crate only defines the contract and a process-local implementation.

pub mod memory;

pub use memory::MemoryAuditLog;

// self
use crate::{
	_prelude::*,
	telephony::{ForwardingKind, LineNumber, UserId},
};

/// Boxed future returned by [`AuditSink`] methods.
pub type AuditFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, AuditError>> + 'a + Send>>;

/// Append-only destination for audit records.
pub trait AuditSink
where
	Self: Send + Sync,
{
	/// Appends one record.
	fn append(&self, record: AuditRecord) -> AuditFuture<'_, ()>;
}

/// Direction of a forwarding change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
	/// Forwarding was switched on (or re-pointed).
	Activation,
	/// Forwarding was switched off.
	Deactivation,
}
impl AuditAction {
	/// Action implied by writing `destination` (`None` deactivates).
	pub fn for_destination(destination: Option<&str>) -> Self {
		if destination.is_some() { Self::Activation } else { Self::Deactivation }
	}
}

/// One row of the forwarding history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
	/// When the change was confirmed by the provider.
	#[serde(with = "time::serde::rfc3339")]
	pub recorded_at: OffsetDateTime,
	/// User who issued the change.
	pub actor: UserId,
	/// Line the change applies to.
	pub line_number: LineNumber,
	/// Slot that changed.
	pub kind: ForwardingKind,
	/// New destination, `None` for deactivations.
	pub destination: Option<String>,
	/// Activation or deactivation.
	pub action: AuditAction,
}
impl AuditRecord {
	/// Builds a record stamped with the current UTC instant.
	pub fn now(
		actor: UserId,
		line_number: LineNumber,
		kind: ForwardingKind,
		destination: Option<String>,
	) -> Self {
		let action = AuditAction::for_destination(destination.as_deref());

		Self {
			recorded_at: OffsetDateTime::now_utc(),
			actor,
			line_number,
			kind,
			destination,
			action,
		}
	}
}

/// Error type produced by [`AuditSink`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum AuditError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn record(destination: Option<&str>) -> AuditRecord {
		AuditRecord::now(
			UserId::new("user-1").expect("User fixture should be valid."),
			LineNumber::new("0033123456789").expect("Line fixture should be valid."),
			ForwardingKind::Unconditional,
			destination.map(str::to_owned),
		)
	}

	#[test]
	fn action_follows_destination() {
		assert_eq!(record(Some("0611223344")).action, AuditAction::Activation);
		assert_eq!(record(None).action, AuditAction::Deactivation);
	}

	#[test]
	fn records_serialize_with_camel_case_fields() {
		let value = serde_json::to_value(record(None)).expect("Record should serialize to JSON.");

		assert_eq!(value["lineNumber"], "0033123456789");
		assert_eq!(value["kind"], "unconditional");
		assert_eq!(value["action"], "deactivation");
		assert!(value["destination"].is_null());
		assert!(value["recordedAt"].is_string());
	}
}
