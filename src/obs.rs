//! Spans, warnings and counters around provider calls and synchronizer side effects.
//!
//! # Feature Flags
//!
//! - `tracing`: every provider operation runs inside a `line_forwarding.op` span with an `op`
//!   field and, for per-line calls, a `line` field. Skipped discovery entries, refused audit rows
//!   and failed re-reads become warnings.
//! - `metrics`: `line_forwarding_op_total{op, outcome}` counts attempts and their results, and
//!   `line_forwarding_audit_failures_total{slot}` counts changes the audit sink refused.

mod metrics;
mod tracing;

pub(crate) use self::{metrics::*, tracing::*};

// self
use crate::{
	_prelude::*,
	audit::AuditError,
	telephony::{ForwardingKind, LineNumber},
};

/// Provider operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
	/// Line discovery.
	ListLines,
	/// Options read for one line.
	LineOptions,
	/// Forwarding write for one slot.
	SetForwarding,
	/// No-reply delay write.
	SetNoReplyTimer,
	/// Sequential deactivation of every slot.
	ResetAllForwarding,
}
impl OpKind {
	/// Label used for the `op` span field and metric label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::ListLines => "list_lines",
			Self::LineOptions => "line_options",
			Self::SetForwarding => "set_forwarding",
			Self::SetNoReplyTimer => "set_no_reply_timer",
			Self::ResetAllForwarding => "reset_all_forwarding",
		}
	}
}
impl Display for OpKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Value of the `outcome` metric label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpOutcome {
	/// The call was issued.
	Attempt,
	/// The provider accepted it.
	Success,
	/// It failed and the error reached the caller.
	Failure,
}
impl OpOutcome {
	/// Label used for the `outcome` metric label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Attempt => "attempt",
			Self::Success => "success",
			Self::Failure => "failure",
		}
	}

	fn of<T>(result: &Result<T>) -> Self {
		if result.is_ok() { Self::Success } else { Self::Failure }
	}
}

/// Runs one provider operation inside its span and counts the attempt and its result.
pub(crate) async fn observe<T, F>(op: OpKind, line: Option<&LineNumber>, fut: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	count_op(op, OpOutcome::Attempt);

	let result = in_op_span(op, line, fut).await;

	count_op(op, OpOutcome::of(&result));

	result
}

/// Reports a forwarding change the provider accepted but the audit sink refused.
pub(crate) fn audit_not_stored(line: &LineNumber, slot: ForwardingKind, error: &AuditError) {
	warn_audit_not_stored(line, slot, error);
	count_audit_failure(slot);
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::ProtocolError;

	#[tokio::test]
	async fn observe_returns_the_operation_result() {
		let line = LineNumber::new("0033972103630").expect("Line fixture should be valid.");
		let read = observe(OpKind::LineOptions, Some(&line), async { Ok(20_u32) }).await;
		let failed: Result<()> = observe(OpKind::ListLines, None, async {
			Err(ProtocolError::Http { status: 503 }.into())
		})
		.await;

		assert_eq!(read.expect("Successful read should pass through."), 20);
		assert!(matches!(failed, Err(Error::Protocol(ProtocolError::Http { status: 503 }))));
	}

	#[test]
	fn outcome_follows_the_result() {
		let failed: Result<()> = Err(ProtocolError::Http { status: 500 }.into());

		assert_eq!(OpOutcome::of(&Ok(())), OpOutcome::Success);
		assert_eq!(OpOutcome::of(&failed), OpOutcome::Failure);
		assert_eq!(OpKind::ResetAllForwarding.to_string(), "reset_all_forwarding");
	}
}
