//! Observable synchronizer state: phases, operation outcomes, and write consistency.

// self
use crate::{
	_prelude::*,
	sync::UndoSnapshot,
	telephony::{Line, LineOptions},
};

/// Lifecycle of the selected line's forwarding view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SyncPhase {
	/// No line is selected.
	#[default]
	Unselected,
	/// Options of the selected line are being fetched.
	Loading,
	/// Options are displayed and up to date with the last confirmed write.
	Ready,
	/// A write is in flight; the displayed options are the pre-write values.
	Mutating,
	/// The last fetch or write failed; see [`ForwardingSynchronizer::last_error`](crate::sync::ForwardingSynchronizer::last_error).
	Error,
}

/// Result of a synchronizer operation.
///
/// Failures never escape as `Err`: they are stored in the synchronizer's last error and reported
/// here as [`Outcome::Failed`] or [`Outcome::Rejected`].
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// The provider accepted the call and local state reflects it.
	Applied,
	/// Nothing to do: no line selected, no options loaded, or no undo snapshot.
	Skipped,
	/// Input failed local validation; nothing was sent.
	Rejected,
	/// The provider or the transport reported a failure.
	Failed,
	/// Another line was selected while the call was in flight; its result was not applied.
	Stale,
}

/// How local options are updated after a confirmed write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WriteConsistency {
	/// Apply the written values locally without re-reading.
	#[default]
	Optimistic,
	/// Re-read the options after each write; keep the optimistic values if the re-read fails.
	RefetchAfterWrite,
}

#[derive(Debug, Default)]
pub(crate) struct SyncState {
	pub(crate) lines: Vec<Line>,
	pub(crate) selected: Option<Line>,
	pub(crate) phase: SyncPhase,
	pub(crate) options: Option<LineOptions>,
	pub(crate) undo: Option<UndoSnapshot>,
	pub(crate) last_error: Option<Arc<Error>>,
	pub(crate) generation: u64,
}
impl SyncState {
	/// Line and generation a mutation should target, if options are loaded.
	pub(crate) fn target(&self) -> Option<Target> {
		self.options.as_ref()?;

		self.selected_target()
	}

	/// Selected line and generation, whether or not its options are loaded.
	pub(crate) fn selected_target(&self) -> Option<Target> {
		self.selected.clone().map(|line| Target { line, generation: self.generation })
	}

	pub(crate) fn is_current(&self, target: &Target) -> bool {
		self.generation == target.generation
	}

	pub(crate) fn fail(&mut self, error: Error) {
		self.phase = SyncPhase::Error;
		self.last_error = Some(Arc::new(error));
	}

	pub(crate) fn settle(&mut self) {
		self.phase = SyncPhase::Ready;
		self.last_error = None;
	}
}

/// Line a call was issued for, tagged with the selection generation at issue time.
#[derive(Clone, Debug)]
pub(crate) struct Target {
	pub(crate) line: Line,
	pub(crate) generation: u64,
}
