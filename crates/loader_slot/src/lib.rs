//! Process-wide slot holding the active dynamic code loader.
//!
//! # Purpose
//!
//! Let a host runtime install or hot-swap its loader from any thread without
//! threading a loader argument through every call path that may load code.
//!
//! # Key types
//!
//! | Type | Meaning | Constraints |
//! |---|---|---|
//! | [`LoaderSlot`] | Atomic optional cell | Never locks; all operations are total |
//! | [`LoaderRef`] | Shared loader handle | Compared by identity only |
//! | [`CodeLoader`] | Opaque loader capability | Never invoked by the slot |
//! | [`InstallError`] | Install-once rejection | Carries the occupant that won |
//!
//! # Lifecycle
//!
//! 1. Startup: the process slot is empty.
//! 2. Bootstrap: the runtime calls [`set`] or [`install`].
//! 3. Steady state: any thread calls [`get`] before loading code. Changes are not pushed;
//!    readers poll.
//! 4. Hot-swap: [`compare_and_set`] or [`swap`] replace the loader. The previous loader lives
//!    on until its last handle drops; the slot performs no teardown.
//!
//! # Recipes
//!
//! ## Install exactly once
//!
//! ```
//! use dynload_loader_slot::{CodeLoader, LoaderRef};
//!
//! struct Plugins;
//! impl CodeLoader for Plugins {}
//!
//! let mine = LoaderRef::from_loader(Plugins);
//! match dynload_loader_slot::install(mine.clone()) {
//! 	Ok(()) => assert_eq!(dynload_loader_slot::get(), Some(mine)),
//! 	Err(e) => assert_ne!(e.current(), &mine),
//! }
//! ```
//!
//! ## Replace only the loader you installed
//!
//! Call [`compare_and_set`] with your own handle as `expected`; `false` means someone else
//! replaced it first.

mod error;
mod handle;
mod loader;
mod slot;

pub use error::InstallError;
pub use handle::LoaderRef;
pub use loader::{CodeLoader, DynLoader};
pub use slot::LoaderSlot;

static PROCESS_LOADER: LoaderSlot<DynLoader> = LoaderSlot::new("process");

/// The process-wide loader slot.
pub fn process_slot() -> &'static LoaderSlot<DynLoader> {
	&PROCESS_LOADER
}

/// Returns the process-wide loader, if one is installed.
#[inline]
pub fn get() -> Option<LoaderRef<DynLoader>> {
	PROCESS_LOADER.get()
}

/// Replaces the process-wide loader. `None` clears it.
pub fn set(new: Option<LoaderRef<DynLoader>>) {
	PROCESS_LOADER.set(new)
}

/// Replaces the process-wide loader only if it is currently `expected`.
pub fn compare_and_set(expected: Option<&LoaderRef<DynLoader>>, new: Option<LoaderRef<DynLoader>>) -> bool {
	PROCESS_LOADER.compare_and_set(expected, new)
}

/// Replaces the process-wide loader, returning the previous one.
pub fn swap(new: Option<LoaderRef<DynLoader>>) -> Option<LoaderRef<DynLoader>> {
	PROCESS_LOADER.swap(new)
}

/// Installs the process-wide loader if none is present.
pub fn install(loader: LoaderRef<DynLoader>) -> Result<(), InstallError<DynLoader>> {
	PROCESS_LOADER.install(loader)
}
