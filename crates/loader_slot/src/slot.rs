//! Atomically swappable optional loader slot.
//!
//! # Mental model
//!
//! * The slot holds `Option<Arc<L>>` inside an [`ArcSwapOption`].
//! * Readers load the current pointer without locking.
//! * Writers either store unconditionally or publish with CAS against an expected handle.
//! * A failed CAS means another writer won first; nothing is retried implicitly except in
//!   [`LoaderSlot::fetch_update`].
//!
//! # Invariants
//!
//! * Every operation is linearizable on the single cell (see `invariants::test_no_lost_updates`).
//! * CAS compares by pointer identity, never by value.
//! * Replacing the occupant never drops a referent still held by a reader.
//!
//! # Concurrency & ordering
//!
//! * Reads and writes are lock-free; no operation blocks or yields.
//! * Ordering is only guaranteed for the slot's own value, not for unrelated memory.

use std::fmt;
use std::ptr;
use std::sync::Arc;

use arc_swap::{ArcSwapOption, Guard};

use crate::error::InstallError;
use crate::handle::LoaderRef;


/// A single atomically accessed slot holding an optional loader handle.
pub struct LoaderSlot<L> {
	label: &'static str,
	cell: ArcSwapOption<L>,
}

#[inline]
fn raw<L>(value: &Option<Arc<L>>) -> *const L {
	value.as_ref().map_or(ptr::null(), Arc::as_ptr)
}

#[inline]
fn raw_ref<L>(value: Option<&LoaderRef<L>>) -> *const L {
	value.map_or(ptr::null(), LoaderRef::as_ptr)
}

impl<L> LoaderSlot<L> {
	/// Creates an empty slot; usable in `static` initializers.
	pub const fn new(label: &'static str) -> Self {
		Self {
			label,
			cell: ArcSwapOption::const_empty(),
		}
	}

	/// Creates a slot already holding `loader`.
	pub fn with_loader(label: &'static str, loader: LoaderRef<L>) -> Self {
		Self {
			label,
			cell: ArcSwapOption::new(Some(loader.into_arc())),
		}
	}

	/// Label reported in log events.
	pub fn label(&self) -> &'static str {
		self.label
	}

	/// Returns the current loader, if any.
	///
	/// The result may already be stale when the call returns.
	#[inline]
	pub fn get(&self) -> Option<LoaderRef<L>> {
		self.cell.load_full().map(LoaderRef::from)
	}

	/// Returns true if a loader is currently installed.
	#[inline]
	pub fn is_installed(&self) -> bool {
		self.cell.load().is_some()
	}

	/// Runs `f` against the current loader without cloning the handle.
	///
	/// The referent stays alive for the duration of `f` even if a writer replaces it.
	pub fn with_current<R>(&self, f: impl FnOnce(Option<&L>) -> R) -> R {
		let guard = self.cell.load();
		f(guard.as_deref())
	}

	/// Unconditionally replaces the current loader. `None` clears the slot.
	pub fn set(&self, new: Option<LoaderRef<L>>) {
		tracing::debug!(slot = self.label, loader = ?raw_ref(new.as_ref()), "loader slot set");
		self.cell.store(new.map(LoaderRef::into_arc));
	}

	/// Replaces the current loader, returning the previous one.
	pub fn swap(&self, new: Option<LoaderRef<L>>) -> Option<LoaderRef<L>> {
		let new_ptr = raw_ref(new.as_ref());
		let prev = self.cell.swap(new.map(LoaderRef::into_arc));
		tracing::debug!(slot = self.label, previous = ?raw(&prev), loader = ?new_ptr, "loader slot swapped");
		prev.map(LoaderRef::from)
	}

	/// Clears the slot, returning whatever was installed.
	pub fn take(&self) -> Option<LoaderRef<L>> {
		self.swap(None)
	}

	/// Replaces the current loader with `new` only if it is `expected`.
	///
	/// Returns whether the replacement happened.
	pub fn compare_and_set(&self, expected: Option<&LoaderRef<L>>, new: Option<LoaderRef<L>>) -> bool {
		self.compare_exchange(expected, new).is_ok()
	}

	/// Replaces the current loader with `new` only if it is `expected`.
	///
	/// Returns `Ok(previous)` on success, or `Err(actual)` with the occupant that
	/// caused the mismatch. The slot is unchanged on `Err`.
	pub fn compare_exchange(
		&self,
		expected: Option<&LoaderRef<L>>,
		new: Option<LoaderRef<L>>,
	) -> Result<Option<LoaderRef<L>>, Option<LoaderRef<L>>> {
		let expected_ptr = raw_ref(expected);
		let expected_arc = expected.map(|handle| Arc::clone(handle.as_arc()));
		let new_ptr = raw_ref(new.as_ref());

		let prev = Guard::into_inner(self.cell.compare_and_swap(&expected_arc, new.map(LoaderRef::into_arc)));

		if raw(&prev) == expected_ptr {
			tracing::debug!(slot = self.label, previous = ?expected_ptr, loader = ?new_ptr, "loader slot exchanged");
			Ok(prev.map(LoaderRef::from))
		} else {
			tracing::trace!(slot = self.label, expected = ?expected_ptr, actual = ?raw(&prev), "loader slot exchange lost");
			Err(prev.map(LoaderRef::from))
		}
	}

	/// Applies `f` to the current loader and publishes its result with CAS,
	/// retrying from the latest value whenever another writer wins.
	///
	/// `f` returns `Some(new)` to publish or `None` to leave the slot alone, and
	/// may run more than once. Returns `Ok(previous)` once published, or
	/// `Err(current)` if `f` declined.
	pub fn fetch_update<F>(&self, mut f: F) -> Result<Option<LoaderRef<L>>, Option<LoaderRef<L>>>
	where
		F: FnMut(Option<&LoaderRef<L>>) -> Option<Option<LoaderRef<L>>>,
	{
		let mut current = self.get();
		loop {
			let Some(new) = f(current.as_ref()) else {
				return Err(current);
			};
			match self.compare_exchange(current.as_ref(), new) {
				Ok(previous) => return Ok(previous),
				// CAS failed, retry against the value that beat us
				Err(actual) => current = actual,
			}
		}
	}

	/// Installs `loader` only if the slot is empty.
	pub fn install(&self, loader: LoaderRef<L>) -> Result<(), InstallError<L>> {
		match self.compare_exchange(None, Some(loader)) {
			// An exchange against `None` can only lose to an occupant.
			Err(Some(current)) => Err(InstallError::AlreadyInstalled {
				slot: self.label,
				current,
			}),
			_ => Ok(()),
		}
	}

	/// Clears the slot only if `own` is still the installed loader.
	pub fn uninstall(&self, own: &LoaderRef<L>) -> bool {
		self.compare_and_set(Some(own), None)
	}
}

impl<L> Default for LoaderSlot<L> {
	fn default() -> Self {
		Self::new("loader")
	}
}

impl<L> fmt::Debug for LoaderSlot<L> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LoaderSlot")
			.field("label", &self.label)
			.field("current", &self.cell.load().as_ref().map(Arc::as_ptr))
			.finish()
	}
}
