//! The opaque loader capability held by the process-wide slot.

use std::any::Any;

use crate::handle::LoaderRef;

/// A dynamic code loader supplied by the host runtime.
///
/// The slot never invokes a loader; it only hands references between
/// threads. Implementations own their thread-safety.
pub trait CodeLoader: Any + Send + Sync {
	/// Diagnostic name, used in log events only.
	fn name(&self) -> &str {
		std::any::type_name::<Self>()
	}
}

/// Type-erased loader as stored in the process-wide slot.
pub type DynLoader = Box<dyn CodeLoader>;

impl LoaderRef<DynLoader> {
	/// Erases `loader` into a fresh shared handle.
	pub fn from_loader<C: CodeLoader>(loader: C) -> Self {
		Self::new(Box::new(loader))
	}

	pub fn name(&self) -> &str {
		self.loader().name()
	}

	/// Borrows the erased loader.
	pub fn loader(&self) -> &dyn CodeLoader {
		&***self
	}

	/// Recovers the concrete loader type installed by the host.
	pub fn downcast_ref<C: CodeLoader>(&self) -> Option<&C> {
		let any: &dyn Any = self.loader();
		any.downcast_ref::<C>()
	}
}
