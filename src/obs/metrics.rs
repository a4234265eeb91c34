//! Counters fed to the global `metrics` recorder, when the feature is on.

// self
use crate::{
	obs::{OpKind, OpOutcome},
	telephony::ForwardingKind,
};

pub(crate) fn count_op(op: OpKind, outcome: OpOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"line_forwarding_op_total",
			"op" => op.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (op, outcome);
	}
}

/// One change the provider accepted but the audit sink refused.
pub(crate) fn count_audit_failure(slot: ForwardingKind) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("line_forwarding_audit_failures_total", "slot" => slot.as_str()).increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = slot;
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn counting_without_a_recorder_is_silent() {
		count_op(OpKind::SetForwarding, OpOutcome::Failure);
		count_audit_failure(ForwardingKind::NoReply);
	}
}
