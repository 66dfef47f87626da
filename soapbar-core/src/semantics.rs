//! # Value Semantics
//!
//! Structural equality and hashing over the declared fields of a bean.
//!
//! Equality is coinductive: comparing two graphs that loop back on
//! themselves terminates because every `(lhs, rhs)` pair of shared handles
//! under comparison is recorded in a [`VisitGuard`], and meeting the same
//! pair again counts as equal. The guard lives on the stack of one top-level
//! comparison, so concurrent comparisons of the same values never interfere.
//!
//! Hashing folds field hashes in declaration order and only looks
//! [`HASH_DEPTH`] handles deep, so it terminates on cycles. Equal values have
//! equal hashes because the cut-off depends on the position in the graph,
//! never on identity.

use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::entity::{Bean, EntityRef};

/// How many nested handles a hash looks through.
pub const HASH_DEPTH: usize = 3;

/// Pairs of handle addresses currently being compared
#[derive(Debug, Default)]
pub struct VisitGuard {
  in_flight: HashSet<(usize, usize)>,
}

impl VisitGuard {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record a pair; `false` when it is already being compared.
  pub fn enter(&mut self, lhs: usize, rhs: usize) -> bool {
    self.in_flight.insert((lhs, rhs))
  }

  pub fn leave(&mut self, lhs: usize, rhs: usize) {
    self.in_flight.remove(&(lhs, rhs));
  }

  pub fn is_empty(&self) -> bool {
    self.in_flight.is_empty()
  }
}

/// Compare two beans field by field
pub fn bean_eq<T: Bean>(lhs: &T, rhs: &T, guard: &mut VisitGuard) -> bool {
  let left = lhs.slots();
  let right = rhs.slots();
  left.len() == right.len() && left.iter().zip(&right).all(|(l, r)| l.slot_eq(*r, guard))
}

/// Compare the values behind two handles.
///
/// Neither lock is held while nested fields are compared.
pub fn entity_eq<T: Bean>(lhs: &EntityRef<T>, rhs: &EntityRef<T>, guard: &mut VisitGuard) -> bool {
  if lhs.ptr_eq(rhs) {
    return true;
  }

  let (left_address, right_address) = (lhs.address(), rhs.address());
  if !guard.enter(left_address, right_address) {
    return true;
  }

  let left = lhs.snapshot();
  let right = rhs.snapshot();
  let equal = bean_eq(&left, &right, guard);

  guard.leave(left_address, right_address);
  equal
}

/// Order-sensitive hash of the declared fields: `acc = acc * 31 + h`, starting
/// at 1, skipping `None`.
pub fn bean_hash<T: Bean>(bean: &T, depth: usize) -> u64 {
  bean
    .slots()
    .iter()
    .filter_map(|slot| slot.slot_hash(depth))
    .fold(1_u64, combine)
}

/// Hash of the value behind a handle. Zero once the depth is spent.
pub fn entity_hash<T: Bean>(handle: &EntityRef<T>, depth: usize) -> u64 {
  if depth == 0 {
    return 0;
  }
  bean_hash(&handle.snapshot(), depth - 1)
}

/// Fold one element hash into an accumulator
pub fn combine(acc: u64, hash: u64) -> u64 {
  acc.wrapping_mul(31).wrapping_add(hash)
}

/// Hash a scalar with the standard hasher
pub fn scalar_hash<V: Hash + ?Sized>(value: &V) -> u64 {
  let mut hasher = DefaultHasher::new();
  value.hash(&mut hasher);
  hasher.finish()
}
