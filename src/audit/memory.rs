//! Thread-safe in-memory [`AuditSink`] for local development and tests.

// self
use crate::{
	_prelude::*,
	audit::{AuditError, AuditFuture, AuditRecord, AuditSink},
	telephony::LineNumber,
};

type RecordLog = Arc<RwLock<Vec<AuditRecord>>>;

/// Audit sink that keeps records in-process, in append order.
#[derive(Clone, Debug, Default)]
pub struct MemoryAuditLog(RecordLog);
impl MemoryAuditLog {
	/// Snapshot of every record appended so far.
	pub fn records(&self) -> Vec<AuditRecord> {
		self.0.read().clone()
	}

	/// Records for one line, oldest first.
	pub fn for_line(&self, line_number: &LineNumber) -> Vec<AuditRecord> {
		self.0.read().iter().filter(|record| &record.line_number == line_number).cloned().collect()
	}

	/// Number of stored records.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` when nothing has been recorded.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	fn append_now(log: RecordLog, record: AuditRecord) -> Result<(), AuditError> {
		log.write().push(record);

		Ok(())
	}
}
impl AuditSink for MemoryAuditLog {
	fn append(&self, record: AuditRecord) -> AuditFuture<'_, ()> {
		let log = self.0.clone();

		Box::pin(async move { Self::append_now(log, record) })
	}
}
