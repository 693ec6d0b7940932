//! Identity-compared loader handles.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

/// Shared handle to a loader capability.
///
/// Equality and hashing use the address of the shared allocation, never the
/// loader's value: two handles are equal only if they point at the same
/// loader. A live handle pins its allocation, so comparing against a held
/// handle cannot be fooled by address reuse.
pub struct LoaderRef<L>(Arc<L>);

impl<L> LoaderRef<L> {
	/// Wraps `loader` in a fresh shared allocation.
	pub fn new(loader: L) -> Self {
		Self(Arc::new(loader))
	}

	/// Returns the underlying shared pointer.
	#[inline]
	pub fn as_arc(&self) -> &Arc<L> {
		&self.0
	}

	/// Consumes the handle, returning the underlying shared pointer.
	#[inline]
	pub fn into_arc(self) -> Arc<L> {
		self.0
	}

	/// Address of the referent, the identity used for comparisons.
	#[inline]
	pub fn as_ptr(&self) -> *const L {
		Arc::as_ptr(&self.0)
	}

	/// Returns true if both handles point at the same loader.
	#[inline]
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl<L> Clone for LoaderRef<L> {
	fn clone(&self) -> Self {
		Self(Arc::clone(&self.0))
	}
}

impl<L> PartialEq for LoaderRef<L> {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl<L> Eq for LoaderRef<L> {}

impl<L> Hash for LoaderRef<L> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.as_ptr().hash(state);
	}
}

impl<L> Deref for LoaderRef<L> {
	type Target = L;

	fn deref(&self) -> &L {
		&self.0
	}
}

impl<L> From<Arc<L>> for LoaderRef<L> {
	fn from(arc: Arc<L>) -> Self {
		Self(arc)
	}
}

impl<L> From<LoaderRef<L>> for Arc<L> {
	fn from(handle: LoaderRef<L>) -> Self {
		handle.0
	}
}

impl<L> fmt::Debug for LoaderRef<L> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("LoaderRef").field(&self.as_ptr()).finish()
	}
}
