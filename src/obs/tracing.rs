//! Spans and warning events. Without the `tracing` feature every helper is a no-op.

// self
use crate::{
	_prelude::*,
	audit::AuditError,
	obs::OpKind,
	telephony::{ForwardingKind, LineNumber},
};

#[cfg(feature = "tracing")]
pub(crate) type InstrumentedOp<F> = tracing::instrument::Instrumented<F>;
#[cfg(not(feature = "tracing"))]
pub(crate) type InstrumentedOp<F> = F;

/// Attaches the `line_forwarding.op` span to `fut` without holding a guard across awaits.
pub(crate) fn in_op_span<F>(op: OpKind, line: Option<&LineNumber>, fut: F) -> InstrumentedOp<F>
where
	F: Future,
{
	#[cfg(feature = "tracing")]
	{
		use tracing::Instrument;

		let span =
			tracing::info_span!("line_forwarding.op", op = op.as_str(), line = line.map(|l| l.as_str()));

		fut.instrument(span)
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (op, line);

		fut
	}
}

/// A billing account or line left out of discovery.
pub(crate) fn warn_skipped_entry(entry: &str, error: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(entry, error = %error, "line discovery skipped an entry");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (entry, error);
	}
}

pub(crate) fn warn_audit_not_stored(line: &LineNumber, slot: ForwardingKind, error: &AuditError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			line = line.as_str(),
			slot = slot.as_str(),
			error = %error,
			"forwarding change applied but not audited"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (line, slot, error);
	}
}

/// The post-write re-read failed; the optimistic options stay in place.
pub(crate) fn warn_refetch_failed(line: &LineNumber, error: &Error) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(line = line.as_str(), error = %error, "kept optimistic options after failed re-read");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (line, error);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::ProtocolError;

	fn line() -> LineNumber {
		LineNumber::new("0033972103630").expect("Line fixture should be valid.")
	}

	#[tokio::test]
	async fn per_line_span_keeps_the_future_output() {
		let line = line();
		let delay = in_op_span(OpKind::SetNoReplyTimer, Some(&line), async { 45 }).await;

		assert_eq!(delay, 45);
	}

	#[test]
	fn warnings_accept_provider_and_audit_errors() {
		let error: Error = ProtocolError::Http { status: 500 }.into();

		warn_skipped_entry("ba-1/0033972103630", &error);
		warn_refetch_failed(&line(), &error);
		warn_audit_not_stored(
			&line(),
			ForwardingKind::Busy,
			&AuditError::Backend { message: "database unreachable".into() },
		);
	}
}
