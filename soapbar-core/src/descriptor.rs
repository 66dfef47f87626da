//! # Type Descriptors
//!
//! Field tables describing how a bean maps onto its wire element. A
//! [`TypeDescriptor`] is built once per bean type (see [`crate::bean!`]) and
//! read concurrently afterwards; field order is wire order.

use crate::qname::QName;

/// Wire mapping of a single bean field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
  field_name: &'static str,
  wire_name: &'static str,
  wire_type: QName,
  nillable: bool,
  min_occurs: u32,
}

impl FieldDescriptor {
  /// Create a nillable field that must appear once on the wire (as
  /// `xsi:nil` when empty).
  pub fn new(field_name: &'static str, wire_name: &'static str, wire_type: QName) -> Self {
    Self {
      field_name,
      wire_name,
      wire_type,
      nillable: true,
      min_occurs: 1,
    }
  }

  /// Mark the field as not nillable; encoding `None` becomes a validation
  /// error.
  pub fn required(mut self) -> Self {
    self.nillable = false;
    self
  }

  /// Allow the element to be left out entirely when the value is `None`.
  pub fn optional(mut self) -> Self {
    self.min_occurs = 0;
    self
  }

  pub const fn field_name(&self) -> &'static str {
    self.field_name
  }

  pub const fn wire_name(&self) -> &'static str {
    self.wire_name
  }

  pub const fn wire_type(&self) -> &QName {
    &self.wire_type
  }

  pub const fn is_nillable(&self) -> bool {
    self.nillable
  }

  pub const fn min_occurs(&self) -> u32 {
    self.min_occurs
  }
}

/// Ordered field table for one bean type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
  name: &'static str,
  wire_type: QName,
  fields: Vec<FieldDescriptor>,
}

impl TypeDescriptor {
  /// Start describing a bean type
  pub fn register(name: &'static str, wire_type: QName) -> TypeDescriptorBuilder {
    TypeDescriptorBuilder {
      descriptor: Self {
        name,
        wire_type,
        fields: Vec::new(),
      },
    }
  }

  /// Rust-side type name, used in error messages
  pub const fn name(&self) -> &'static str {
    self.name
  }

  /// Namespace-qualified schema type (`xsi:type` on the wire)
  pub const fn wire_type(&self) -> &QName {
    &self.wire_type
  }

  /// All fields, inherited ones first
  pub fn fields(&self) -> &[FieldDescriptor] {
    &self.fields
  }

  /// Look up a field by its wire name
  pub fn field(&self, wire_name: &str) -> Option<&FieldDescriptor> {
    self.fields.iter().find(|field| field.wire_name == wire_name)
  }

  pub fn len(&self) -> usize {
    self.fields.len()
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }
}

/// Builder returned by [`TypeDescriptor::register`]
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
  descriptor: TypeDescriptor,
}

impl TypeDescriptorBuilder {
  /// Copy the fields of a base type; they precede the fields added next.
  pub fn extend(mut self, base: &TypeDescriptor) -> Self {
    self.descriptor.fields.extend(base.fields.iter().cloned());
    self
  }

  /// Append a field. Declaration order is wire order.
  pub fn add_field(mut self, field: FieldDescriptor) -> Self {
    debug_assert!(
      self.descriptor.field(field.wire_name).is_none(),
      "duplicate wire name `{}` in {}",
      field.wire_name,
      self.descriptor.name
    );
    self.descriptor.fields.push(field);
    self
  }

  /// Freeze the descriptor
  pub fn build(self) -> TypeDescriptor {
    self.descriptor
  }
}
