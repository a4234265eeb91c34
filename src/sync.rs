//! Forwarding state synchronizer.
//!
//! [`ForwardingSynchronizer`] owns the options of the selected line and drives every change
//! through the [`ApiClient`]: it validates input before any request, keeps a single undo snapshot
//! for unconditional forwarding, appends an [`AuditRecord`] for each confirmed slot change, and
//! turns failures into observable state instead of returning them.
//!
//! Mutations and refreshes run one at a time behind an async guard. Each call binds to the line
//! selected when it is issued, before queueing on that guard. Selecting another line does not wait
//! for the guard; it bumps a generation counter so any call queued or in flight for the previous
//! line completes as [`Outcome::Stale`] without touching the new line's state.

pub mod state;
pub mod undo;

pub use state::{Outcome, SyncPhase, WriteConsistency};
pub use undo::UndoSnapshot;

// self
use crate::{
	_prelude::*,
	audit::{AuditRecord, AuditSink},
	client::ApiClient,
	http::ApiHttpClient,
	obs,
	sync::state::{SyncState, Target},
	telephony::{self, ForwardingKind, ForwardingSlot, Line, LineOptions, UserId},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

type MutationGuard<'a> = async_lock::MutexGuard<'a, ()>;

#[cfg(feature = "reqwest")]
/// Synchronizer specialized for the crate's default reqwest transport.
pub type ReqwestSynchronizer = ForwardingSynchronizer<ReqwestHttpClient>;

/// Keeps one line's forwarding view in step with the provider.
pub struct ForwardingSynchronizer<C>
where
	C: ?Sized + ApiHttpClient,
{
	client: ApiClient<C>,
	audit: Arc<dyn AuditSink>,
	actor: UserId,
	consistency: WriteConsistency,
	state: RwLock<SyncState>,
	mutation: AsyncMutex<()>,
}
impl<C> ForwardingSynchronizer<C>
where
	C: ?Sized + ApiHttpClient,
{
	/// Creates a synchronizer acting as `actor`, with nothing selected.
	pub fn new(client: ApiClient<C>, audit: Arc<dyn AuditSink>, actor: UserId) -> Self {
		Self {
			client,
			audit,
			actor,
			consistency: WriteConsistency::default(),
			state: Default::default(),
			mutation: AsyncMutex::new(()),
		}
	}

	/// Overrides how local options follow confirmed writes.
	pub fn with_write_consistency(mut self, consistency: WriteConsistency) -> Self {
		self.consistency = consistency;

		self
	}

	/// API client used for every provider call.
	pub fn client(&self) -> &ApiClient<C> {
		&self.client
	}

	/// Current phase.
	pub fn phase(&self) -> SyncPhase {
		self.state.read().phase
	}

	/// Returns `true` while a fetch or a write is in flight.
	pub fn is_loading(&self) -> bool {
		matches!(self.phase(), SyncPhase::Loading | SyncPhase::Mutating)
	}

	/// Lines found by the last successful [`list_lines`](Self::list_lines).
	pub fn lines(&self) -> Vec<Line> {
		self.state.read().lines.clone()
	}

	/// Currently selected line.
	pub fn selected_line(&self) -> Option<Line> {
		self.state.read().selected.clone()
	}

	/// Options of the selected line; `None` before the first successful fetch or after a failed
	/// one.
	pub fn options(&self) -> Option<LineOptions> {
		self.state.read().options.clone()
	}

	/// Failure recorded by the last operation that did not succeed.
	pub fn last_error(&self) -> Option<Arc<Error>> {
		self.state.read().last_error.clone()
	}

	/// Pending undo snapshot for unconditional forwarding.
	pub fn undo_snapshot(&self) -> Option<UndoSnapshot> {
		self.state.read().undo.clone()
	}

	/// Discovers the user's lines and replaces the known list.
	pub async fn list_lines(&self) -> Outcome {
		match self.client.list_lines().await {
			Ok(lines) => {
				self.state.write().lines = lines;

				Outcome::Applied
			},
			Err(e) => {
				self.state.write().last_error = Some(Arc::new(e));

				Outcome::Failed
			},
		}
	}

	/// Selects the discovered line numbered `line_number` and fetches its options.
	///
	/// The undo snapshot and the previous options are dropped first. An unknown number leaves the
	/// synchronizer unselected and returns [`Outcome::Skipped`].
	pub async fn select_line(&self, line_number: &str) -> Outcome {
		let target = {
			let mut state = self.state.write();

			state.generation += 1;
			state.undo = None;
			state.options = None;
			state.last_error = None;

			let found = state.lines.iter().find(|line| line.line_number == line_number).cloned();

			match found {
				Some(line) => {
					state.selected = Some(line.clone());
					state.phase = SyncPhase::Loading;

					Target { line, generation: state.generation }
				},
				None => {
					state.selected = None;
					state.phase = SyncPhase::Unselected;

					return Outcome::Skipped;
				},
			}
		};

		self.load(target).await
	}

	/// Re-reads the selected line's options. The undo snapshot is kept.
	pub async fn refresh_current_line(&self) -> Outcome {
		let Some(target) = self.state.read().selected_target() else {
			return Outcome::Skipped;
		};
		let Some(_guard) = self.lock_for(&target).await else {
			return Outcome::Stale;
		};

		self.state.write().phase = SyncPhase::Loading;

		self.load(target).await
	}

	/// Activates (`Some`) or deactivates (`None`) forwarding of `kind`.
	///
	/// Changes to unconditional forwarding capture an undo snapshot first; the snapshot only
	/// survives if the provider accepts the write.
	pub async fn update_forwarding(&self, kind: ForwardingKind, destination: Option<&str>) -> Outcome {
		let Some(target) = self.state.read().target() else {
			return Outcome::Skipped;
		};
		let Some(_guard) = self.lock_for(&target).await else {
			return Outcome::Stale;
		};

		self.write_forwarding(target, kind, destination, true).await
	}

	/// Changes the no-reply delay after checking it lies within `0..=60` seconds.
	pub async fn update_no_reply_timer(&self, seconds: i64) -> Outcome {
		let Some(target) = self.state.read().target() else {
			return Outcome::Skipped;
		};
		let Some(_guard) = self.lock_for(&target).await else {
			return Outcome::Stale;
		};
		let seconds = match telephony::validate_no_reply_timer(seconds) {
			Ok(seconds) => seconds,
			Err(e) => return self.reject(e.into()),
		};

		if !self.begin(&target, None) {
			return Outcome::Stale;
		}

		let result = self
			.client
			.set_no_reply_timer(&target.line.service_name, &target.line.line_number, seconds)
			.await;

		match result {
			Ok(()) => {
				if !self.settle(&target, |options| options.no_reply_timer = seconds) {
					return Outcome::Stale;
				}

				self.refetch_after_write(&target).await;

				Outcome::Applied
			},
			Err(e) => self.fail(&target, e, None),
		}
	}

	/// Deactivates every slot, one write at a time.
	///
	/// On success all slots are off locally, three deactivation records are appended, and the undo
	/// snapshot is cleared. A failure part-way leaves the earlier slots off on the provider side
	/// while the local options keep their pre-reset values.
	pub async fn reset_all_forwarding(&self) -> Outcome {
		let Some(target) = self.state.read().target() else {
			return Outcome::Skipped;
		};
		let Some(_guard) = self.lock_for(&target).await else {
			return Outcome::Stale;
		};

		if !self.begin(&target, None) {
			return Outcome::Stale;
		}

		let result = self
			.client
			.reset_all_forwarding(&target.line.service_name, &target.line.line_number)
			.await;

		match result {
			Ok(()) => {
				let current = self.settle(&target, |options| {
					for kind in ForwardingKind::ALL {
						*options.slot_mut(kind) = ForwardingSlot::inactive();
					}
				});

				if current {
					self.state.write().undo = None;
				}
				for kind in ForwardingKind::ALL {
					self.record(&target, kind, None).await;
				}
				if !current {
					return Outcome::Stale;
				}

				self.refetch_after_write(&target).await;

				Outcome::Applied
			},
			Err(e) => self.fail(&target, e, None),
		}
	}

	/// Writes the pending undo snapshot back to unconditional forwarding.
	///
	/// The snapshot is consumed whatever the outcome, so a second call returns
	/// [`Outcome::Skipped`].
	pub async fn undo_unconditional(&self) -> Outcome {
		let Some(target) = self.state.read().target() else {
			return Outcome::Skipped;
		};
		let Some(_guard) = self.lock_for(&target).await else {
			return Outcome::Stale;
		};
		let Some(snapshot) = self.state.write().undo.take() else {
			return Outcome::Skipped;
		};

		self.write_forwarding(
			target,
			ForwardingKind::Unconditional,
			snapshot.restore_target(),
			false,
		)
		.await
	}

	/// Waits for the mutation guard, giving up if `target` was deselected meanwhile.
	async fn lock_for(&self, target: &Target) -> Option<MutationGuard<'_>> {
		let guard = self.mutation.lock().await;

		self.state.read().is_current(target).then_some(guard)
	}

	async fn load(&self, target: Target) -> Outcome {
		let result =
			self.client.line_options(&target.line.service_name, &target.line.line_number).await;
		let mut state = self.state.write();

		if !state.is_current(&target) {
			return Outcome::Stale;
		}

		match result {
			Ok(options) => {
				state.options = Some(options);
				state.settle();

				Outcome::Applied
			},
			Err(e) => {
				state.options = None;
				state.fail(e);

				Outcome::Failed
			},
		}
	}

	async fn write_forwarding(
		&self,
		target: Target,
		kind: ForwardingKind,
		destination: Option<&str>,
		capture_undo: bool,
	) -> Outcome {
		let destination = match destination.map(|raw| telephony::validate_destination(kind, raw)) {
			None => None,
			Some(Ok(destination)) => Some(destination),
			Some(Err(e)) => return self.reject(e.into()),
		};
		let capture = capture_undo && kind == ForwardingKind::Unconditional;
		let mut previous_undo = None;

		if !self.begin(&target, capture.then_some(&mut previous_undo)) {
			return Outcome::Stale;
		}

		let result = self
			.client
			.set_forwarding(
				&target.line.service_name,
				&target.line.line_number,
				kind,
				destination.as_deref(),
			)
			.await;

		match result {
			Ok(()) => {
				let slot = ForwardingSlot::from_write(destination.clone());
				let current = self.settle(&target, |options| *options.slot_mut(kind) = slot);

				self.record(&target, kind, destination).await;

				if !current {
					return Outcome::Stale;
				}

				self.refetch_after_write(&target).await;

				Outcome::Applied
			},
			Err(e) => self.fail(&target, e, capture.then_some(previous_undo)),
		}
	}

	/// Enters [`SyncPhase::Mutating`] for `target`.
	///
	/// With `capture` set, the unconditional slot replaces the undo snapshot and the replaced one
	/// is handed back through it. Returns `false` when `target` is no longer current.
	fn begin(&self, target: &Target, capture: Option<&mut Option<UndoSnapshot>>) -> bool {
		let mut state = self.state.write();

		if !state.is_current(target) {
			return false;
		}
		if let Some(previous) = capture {
			let snapshot =
				state.options.as_ref().map(|options| UndoSnapshot::capture(&options.unconditional));

			*previous = std::mem::replace(&mut state.undo, snapshot);
		}

		state.phase = SyncPhase::Mutating;

		true
	}

	/// Applies `update` to the options of `target` and returns to [`SyncPhase::Ready`].
	///
	/// Returns `false`, leaving state untouched, when `target` is no longer current.
	fn settle(&self, target: &Target, update: impl FnOnce(&mut LineOptions)) -> bool {
		let mut state = self.state.write();

		if !state.is_current(target) {
			return false;
		}
		if let Some(options) = state.options.as_mut() {
			update(options);
		}

		state.settle();

		true
	}

	fn fail(
		&self,
		target: &Target,
		error: Error,
		restore_undo: Option<Option<UndoSnapshot>>,
	) -> Outcome {
		let mut state = self.state.write();

		if !state.is_current(target) {
			return Outcome::Stale;
		}
		if let Some(previous) = restore_undo {
			state.undo = previous;
		}

		state.fail(error);

		Outcome::Failed
	}

	fn reject(&self, error: Error) -> Outcome {
		self.state.write().last_error = Some(Arc::new(error));

		Outcome::Rejected
	}

	async fn record(&self, target: &Target, kind: ForwardingKind, destination: Option<String>) {
		let record =
			AuditRecord::now(self.actor.clone(), target.line.line_number.clone(), kind, destination);

		if let Err(e) = self.audit.append(record).await {
			obs::audit_not_stored(&target.line.line_number, kind, &e);
		}
	}

	async fn refetch_after_write(&self, target: &Target) {
		if self.consistency != WriteConsistency::RefetchAfterWrite {
			return;
		}

		match self.client.line_options(&target.line.service_name, &target.line.line_number).await {
			Ok(options) => {
				let mut state = self.state.write();

				if state.is_current(target) {
					state.options = Some(options);
				}
			},
			Err(e) => obs::warn_refetch_failed(&target.line.line_number, &e),
		}
	}
}
impl<C> Debug for ForwardingSynchronizer<C>
where
	C: ?Sized + ApiHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		let state = self.state.read();

		f.debug_struct("ForwardingSynchronizer")
			.field("actor", &self.actor)
			.field("consistency", &self.consistency)
			.field("phase", &state.phase)
			.field("selected", &state.selected.as_ref().map(|line| &line.line_number))
			.finish()
	}
}
