//! # Entity Codec
//!
//! Table driven marshalling between beans and [`WireElement`]s. The codec
//! walks a [`TypeDescriptor`] and the bean's [`FieldSlot`]s side by side, so
//! inherited fields (which come first in the descriptor) are always handled
//! before the subclass's own fields.

use std::any::Any;
use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::descriptor::TypeDescriptor;
use crate::entity::{Bean, EntityRef};
use crate::error::CodecError;
use crate::qname::QName;
use crate::value::FieldSlot;
use crate::wire::WireElement;

/// Handles currently being written, used to reject cyclic graphs
#[derive(Debug, Default)]
pub struct EncodeContext {
  in_progress: HashSet<usize>,
}

impl EncodeContext {
  pub fn new() -> Self {
    Self::default()
  }

  /// Mark a handle as being written.
  pub fn enter(&mut self, address: usize, type_name: &'static str) -> Result<(), CodecError> {
    if self.in_progress.insert(address) {
      Ok(())
    } else {
      Err(CodecError::CyclicGraph { type_name })
    }
  }

  pub fn leave(&mut self, address: usize) {
    self.in_progress.remove(&address);
  }
}

/// Decoding state for one message: the `id` index used to resolve `href`
/// references and the handles already decoded for each id.
pub struct DecodeContext<'a> {
  refs: HashMap<&'a str, &'a WireElement>,
  shared: HashMap<String, Box<dyn Any>>,
}

impl<'a> DecodeContext<'a> {
  /// A context without any referenceable elements
  pub fn new() -> Self {
    Self {
      refs: HashMap::new(),
      shared: HashMap::new(),
    }
  }

  /// Index every element carrying an `id` under the given roots.
  pub fn with_refs(roots: impl IntoIterator<Item = &'a WireElement>) -> Self {
    let mut ctx = Self::new();
    for root in roots {
      ctx.index(root);
    }
    ctx
  }

  /// Add `element` and its descendants to the `id` index.
  pub fn index(&mut self, element: &'a WireElement) {
    if let Some(id) = element.id() {
      self.refs.insert(id, element);
    }
    for child in element.element_children() {
      self.index(child);
    }
  }

  /// Look up a referenced element by id
  pub fn lookup(&self, id: &str) -> Result<&'a WireElement, CodecError> {
    self
      .refs
      .get(id)
      .copied()
      .ok_or_else(|| CodecError::UnresolvedReference(id.to_string()))
  }

  /// The element an `href` points at, or the element itself.
  pub fn follow(&self, element: &'a WireElement) -> Result<&'a WireElement, CodecError> {
    match element.href_id() {
      Some(id) => self.lookup(id),
      None => Ok(element),
    }
  }

  /// Decode the element with the given id once and hand out clones of the
  /// same handle afterwards.
  ///
  /// The handle is cached before its contents are decoded, so references
  /// that lead back to it (directly or through other ids) pick up the same
  /// allocation and the decoded graph keeps its cycles.
  pub fn resolve<T: Bean>(&mut self, id: &str) -> Result<EntityRef<T>, CodecError> {
    if let Some(existing) = self.shared.get(id) {
      return existing
        .downcast_ref::<EntityRef<T>>()
        .cloned()
        .ok_or_else(|| CodecError::ReferenceType {
          id: id.to_string(),
          expected: T::describe().name(),
        });
    }

    let target = self.lookup(id)?;
    let handle = EntityRef::new(T::default());
    self.shared.insert(id.to_string(), Box::new(handle.clone()));

    let value = EntityCodec::decode_with::<T>(target, T::describe(), self)?;
    handle.replace(value);
    Ok(handle)
  }
}

impl Default for DecodeContext<'_> {
  fn default() -> Self {
    Self::new()
  }
}

/// Encodes and decodes beans using their descriptors
pub struct EntityCodec;

impl EntityCodec {
  /// Encode a bean as an unqualified element called `element_name`.
  pub fn encode<T: Bean>(entity: &T, element_name: &str) -> Result<WireElement, CodecError> {
    Self::encode_with(
      entity,
      T::describe(),
      QName::unqualified(element_name.to_string()),
      &mut EncodeContext::new(),
    )
  }

  /// Encode a bean with an explicit descriptor and context.
  ///
  /// Empty fields are written as `xsi:nil`, left out when the field allows
  /// zero occurrences, or rejected when the field is not nillable.
  pub fn encode_with<T: Bean>(
    entity: &T,
    descriptor: &TypeDescriptor,
    element_name: QName,
    ctx: &mut EncodeContext,
  ) -> Result<WireElement, CodecError> {
    let slots = entity.slots();
    check_slots(descriptor, slots.len())?;

    let mut element = WireElement::new(element_name).with_type(descriptor.wire_type().clone());
    for (field, slot) in descriptor.fields().iter().zip(slots) {
      match slot.encode_slot(field, ctx)? {
        Some(child) => element.children.push(child),
        None if !field.is_nillable() => {
          return Err(CodecError::Validation {
            type_name: descriptor.name(),
            field: field.field_name(),
          });
        }
        None if field.min_occurs() == 0 => {}
        None => element.children.push(WireElement::nil(field.wire_name())),
      }
    }

    Ok(element)
  }

  /// Decode a standalone element. `href`s may point anywhere inside it.
  pub fn decode<T: Bean>(element: &WireElement) -> Result<T, CodecError> {
    let mut ctx = DecodeContext::with_refs([element]);
    Self::decode_with(element, T::describe(), &mut ctx)
  }

  /// Decode with an explicit descriptor and context.
  ///
  /// Absent and nil children leave the field `None`. Children the
  /// descriptor does not know are skipped.
  pub fn decode_with<'a, T: Bean>(
    element: &'a WireElement,
    descriptor: &TypeDescriptor,
    ctx: &mut DecodeContext<'a>,
  ) -> Result<T, CodecError> {
    let element = ctx.follow(element)?;
    let mut entity = T::default();

    let slots = entity.slots_mut();
    check_slots(descriptor, slots.len())?;
    for (field, slot) in descriptor.fields().iter().zip(slots) {
      let matching: Vec<&'a WireElement> = element.children_named(field.wire_name()).collect();
      slot.decode_slot(field, &matching, ctx)?;
    }

    for child in element.element_children() {
      if descriptor.field(child.name.local()).is_none() {
        trace!("Ignoring unknown element {} in {}", child.name, descriptor.name());
      }
    }

    Ok(entity)
  }
}

fn check_slots(descriptor: &TypeDescriptor, slots: usize) -> Result<(), CodecError> {
  if slots == descriptor.len() {
    Ok(())
  } else {
    Err(CodecError::SlotMismatch {
      type_name: descriptor.name(),
      slots,
      fields: descriptor.len(),
    })
  }
}
