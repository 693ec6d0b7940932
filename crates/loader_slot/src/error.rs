use std::fmt;

use thiserror::Error;

use crate::handle::LoaderRef;

/// Rejection from [`crate::LoaderSlot::install`].
#[derive(Error)]
pub enum InstallError<L> {
	/// The slot already held a loader when the install was attempted.
	#[error("loader slot `{slot}` already holds a loader")]
	AlreadyInstalled {
		/// Label of the slot that rejected the install.
		slot: &'static str,
		/// The loader that occupied the slot at the attempt instant.
		current: LoaderRef<L>,
	},
}

impl<L> InstallError<L> {
	/// The occupant observed when the install lost.
	pub fn current(&self) -> &LoaderRef<L> {
		match self {
			InstallError::AlreadyInstalled { current, .. } => current,
		}
	}

	pub fn into_current(self) -> LoaderRef<L> {
		match self {
			InstallError::AlreadyInstalled { current, .. } => current,
		}
	}
}

impl<L> fmt::Debug for InstallError<L> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			InstallError::AlreadyInstalled { slot, current } => f
				.debug_struct("AlreadyInstalled")
				.field("slot", slot)
				.field("current", current)
				.finish(),
		}
	}
}
