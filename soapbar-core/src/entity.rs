//! # Entities
//!
//! The [`Bean`] trait ties a plain Rust struct to its [`TypeDescriptor`] and
//! exposes its fields as type-erased [`FieldSlot`]s in descriptor order.
//! Nested beans are held through [`EntityRef`], a shared handle that lets
//! decoded `multiRef` values alias each other (and loop back).

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::descriptor::TypeDescriptor;
use crate::semantics::{self, HASH_DEPTH, VisitGuard};
use crate::value::FieldSlot;

/// A marshallable value object.
///
/// Usually implemented through [`crate::bean!`]. `slots` and `slots_mut`
/// must yield one slot per descriptor field, inherited fields first.
pub trait Bean: Clone + Default + fmt::Debug + Send + Sync + 'static {
  /// The descriptor shared by every instance of this type
  fn describe() -> &'static TypeDescriptor;

  fn slots(&self) -> Vec<&dyn FieldSlot>;

  fn slots_mut(&mut self) -> Vec<&mut dyn FieldSlot>;
}

/// Shared, mutable handle to a nested bean.
///
/// Equality and hashing are structural (see [`crate::semantics`]); use
/// [`EntityRef::ptr_eq`] for identity.
pub struct EntityRef<T>(Arc<RwLock<T>>);

impl<T> EntityRef<T> {
  pub fn new(value: T) -> Self {
    Self(Arc::new(RwLock::new(value)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read().unwrap_or_else(PoisonError::into_inner)
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write().unwrap_or_else(PoisonError::into_inner)
  }

  /// Clone the current value, releasing the lock before returning.
  pub fn snapshot(&self) -> T
  where
    T: Clone,
  {
    self.read().clone()
  }

  /// Swap in a new value, returning the old one. Other handles observe the
  /// change.
  pub fn replace(&self, value: T) -> T {
    std::mem::replace(&mut *self.write(), value)
  }

  /// Whether both handles point at the same allocation
  pub fn ptr_eq(&self, other: &Self) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }

  /// Allocation address, used as identity by the cycle guards
  pub fn address(&self) -> usize {
    Arc::as_ptr(&self.0) as *const () as usize
  }
}

impl<T> Clone for EntityRef<T> {
  fn clone(&self) -> Self {
    Self(Arc::clone(&self.0))
  }
}

impl<T: Default> Default for EntityRef<T> {
  fn default() -> Self {
    Self::new(T::default())
  }
}

impl<T> From<T> for EntityRef<T> {
  fn from(value: T) -> Self {
    Self::new(value)
  }
}

impl<T: Bean> PartialEq for EntityRef<T> {
  fn eq(&self, other: &Self) -> bool {
    semantics::entity_eq(self, other, &mut VisitGuard::default())
  }
}

impl<T: Bean> Eq for EntityRef<T> {}

impl<T: Bean> Hash for EntityRef<T> {
  fn hash<H: Hasher>(&self, state: &mut H) {
    state.write_u64(semantics::entity_hash(self, HASH_DEPTH));
  }
}

thread_local! {
  static FORMATTING: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

/// Prints the referenced value; a handle already being printed further up
/// the stack prints as `<cycle>`.
impl<T: fmt::Debug + Clone> fmt::Debug for EntityRef<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let address = self.address();
    let entered = FORMATTING.with(|formatting| formatting.borrow_mut().insert(address));
    if !entered {
      return f.write_str("<cycle>");
    }

    let value = self.snapshot();
    let result = value.fmt(f);
    FORMATTING.with(|formatting| formatting.borrow_mut().remove(&address));
    result
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_clones_share_the_allocation() {
    let first = EntityRef::new(String::from("a"));
    let second = first.clone();
    assert!(first.ptr_eq(&second));
    assert_eq!(first.address(), second.address());

    second.replace(String::from("b"));
    assert_eq!(first.snapshot(), "b");
  }

  #[test]
  fn test_distinct_handles_have_distinct_identity() {
    let first = EntityRef::new(1_i64);
    let second = EntityRef::new(1_i64);
    assert!(!first.ptr_eq(&second));
    assert_ne!(first.address(), second.address());
  }

  #[test]
  fn test_write_guard_mutates_in_place() {
    let handle = EntityRef::new(vec![1, 2]);
    handle.write().push(3);
    assert_eq!(*handle.read(), vec![1, 2, 3]);
  }

  #[test]
  fn test_debug_prints_the_value() {
    let handle = EntityRef::new(String::from("fred"));
    assert_eq!(format!("{handle:?}"), "\"fred\"");
  }
}
