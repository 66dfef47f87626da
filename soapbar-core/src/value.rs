//! # Wire Values
//!
//! [`WireValue`] is implemented by everything that can sit in a bean field:
//! XSD scalars, nested beans behind [`EntityRef`], and `Vec`s of either
//! (encoded as `soapenc:Array`). [`FieldSlot`] is its object safe face, which
//! lets the codec and the value semantics walk a bean's fields without knowing
//! their types.

use std::any::Any;

use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat};
use tracing::trace;

use crate::codec::{DecodeContext, EncodeContext, EntityCodec};
use crate::descriptor::FieldDescriptor;
use crate::entity::{Bean, EntityRef};
use crate::error::CodecError;
use crate::qname::{QName, SOAP_ARRAY, ns, xsd};
use crate::semantics::{self, VisitGuard};
use crate::wire::{ArrayType, WireElement, is_xml_char};

/// A value with a wire representation.
pub trait WireValue: Clone + Sized + 'static {
  /// Schema type of this value when it appears as an array item
  fn item_type() -> QName;

  /// Write the value as an element called `name`.
  fn encode_value(&self, name: QName, wire_type: &QName, ctx: &mut EncodeContext) -> Result<WireElement, CodecError>;

  /// Read the value from one non-nil element.
  fn decode_value<'a>(
    element: &'a WireElement,
    field: &FieldDescriptor,
    ctx: &mut DecodeContext<'a>,
  ) -> Result<Self, CodecError>;

  /// Read the value from every element carrying the field's wire name.
  ///
  /// Scalars and beans use the first element; `Vec` overrides this to accept
  /// both an array wrapper and repeated elements.
  fn decode_elements<'a>(
    elements: &[&'a WireElement],
    field: &FieldDescriptor,
    ctx: &mut DecodeContext<'a>,
  ) -> Result<Option<Self>, CodecError> {
    match elements.first() {
      Some(&element) if !element.nil => Self::decode_value(element, field, ctx).map(Some),
      _ => Ok(None),
    }
  }

  fn value_eq(&self, other: &Self, guard: &mut VisitGuard) -> bool;

  fn value_hash(&self, depth: usize) -> u64;
}

/// Type-erased access to one `Option<V>` bean field
pub trait FieldSlot: Any {
  fn is_null(&self) -> bool;

  /// Encode the value, or `None` when the field is empty. The codec decides
  /// between omission, `xsi:nil` and a validation error.
  fn encode_slot(&self, field: &FieldDescriptor, ctx: &mut EncodeContext) -> Result<Option<WireElement>, CodecError>;

  /// Replace the field with the value decoded from `elements`.
  fn decode_slot<'a>(
    &mut self,
    field: &FieldDescriptor,
    elements: &[&'a WireElement],
    ctx: &mut DecodeContext<'a>,
  ) -> Result<(), CodecError>;

  /// Compare with the same slot of another instance
  fn slot_eq(&self, other: &dyn FieldSlot, guard: &mut VisitGuard) -> bool;

  /// Hash of the value, `None` when empty
  fn slot_hash(&self, depth: usize) -> Option<u64>;

  fn as_any(&self) -> &dyn Any;
}

impl<V: WireValue> FieldSlot for Option<V> {
  fn is_null(&self) -> bool {
    self.is_none()
  }

  fn encode_slot(&self, field: &FieldDescriptor, ctx: &mut EncodeContext) -> Result<Option<WireElement>, CodecError> {
    self
      .as_ref()
      .map(|value| value.encode_value(QName::unqualified(field.wire_name()), field.wire_type(), ctx))
      .transpose()
  }

  fn decode_slot<'a>(
    &mut self,
    field: &FieldDescriptor,
    elements: &[&'a WireElement],
    ctx: &mut DecodeContext<'a>,
  ) -> Result<(), CodecError> {
    *self = V::decode_elements(elements, field, ctx)?;
    Ok(())
  }

  fn slot_eq(&self, other: &dyn FieldSlot, guard: &mut VisitGuard) -> bool {
    match other.as_any().downcast_ref::<Option<V>>() {
      Some(other) => match (self, other) {
        (None, None) => true,
        (Some(lhs), Some(rhs)) => lhs.value_eq(rhs, guard),
        _ => false,
      },
      None => false,
    }
  }

  fn slot_hash(&self, depth: usize) -> Option<u64> {
    self.as_ref().map(|value| value.value_hash(depth))
  }

  fn as_any(&self) -> &dyn Any {
    self
  }
}

/// `xsd:long` for XSD types, Clark notation for everything else.
fn type_label(wire_type: &QName) -> String {
  if wire_type.namespace() == ns::XSD {
    format!("xsd:{}", wire_type.local())
  } else {
    wire_type.to_string()
  }
}

fn decode_error(field: &FieldDescriptor, expected: &QName, value: &str) -> CodecError {
  CodecError::Decode {
    field: field.wire_name().to_string(),
    expected: type_label(expected),
    value: value.to_string(),
  }
}

/// Character content of a (possibly referenced) scalar element
fn scalar_text<'a>(element: &'a WireElement, ctx: &DecodeContext<'a>) -> Result<&'a str, CodecError> {
  let target = ctx.follow(element)?;
  Ok(target.text.as_deref().unwrap_or_default())
}

fn scalar_element(name: QName, wire_type: &QName, text: String) -> WireElement {
  WireElement::new(name).with_type(wire_type.clone()).with_text(text)
}

impl WireValue for String {
  fn item_type() -> QName {
    xsd::STRING
  }

  fn encode_value(&self, name: QName, wire_type: &QName, _ctx: &mut EncodeContext) -> Result<WireElement, CodecError> {
    if let Some(character) = self.chars().find(|&ch| !is_xml_char(ch)) {
      return Err(CodecError::InvalidCharacter {
        field: name.local().to_string(),
        character,
      });
    }
    Ok(scalar_element(name, wire_type, self.clone()))
  }

  fn decode_value<'a>(
    element: &'a WireElement,
    _field: &FieldDescriptor,
    ctx: &mut DecodeContext<'a>,
  ) -> Result<Self, CodecError> {
    scalar_text(element, ctx).map(str::to_string)
  }

  fn value_eq(&self, other: &Self, _guard: &mut VisitGuard) -> bool {
    self == other
  }

  fn value_hash(&self, _depth: usize) -> u64 {
    semantics::scalar_hash(self)
  }
}

macro_rules! integer_value {
  ($ty:ty, $wire_type:expr) => {
    impl WireValue for $ty {
      fn item_type() -> QName {
        $wire_type
      }

      fn encode_value(&self, name: QName, wire_type: &QName, _ctx: &mut EncodeContext) -> Result<WireElement, CodecError> {
        Ok(scalar_element(name, wire_type, self.to_string()))
      }

      fn decode_value<'a>(
        element: &'a WireElement,
        field: &FieldDescriptor,
        ctx: &mut DecodeContext<'a>,
      ) -> Result<Self, CodecError> {
        let text = scalar_text(element, ctx)?;
        text
          .trim()
          .parse::<$ty>()
          .map_err(|_| decode_error(field, &Self::item_type(), text))
      }

      fn value_eq(&self, other: &Self, _guard: &mut VisitGuard) -> bool {
        self == other
      }

      fn value_hash(&self, _depth: usize) -> u64 {
        semantics::scalar_hash(self)
      }
    }
  };
}

integer_value!(i64, xsd::LONG);
integer_value!(i32, xsd::INT);

impl WireValue for bool {
  fn item_type() -> QName {
    xsd::BOOLEAN
  }

  fn encode_value(&self, name: QName, wire_type: &QName, _ctx: &mut EncodeContext) -> Result<WireElement, CodecError> {
    Ok(scalar_element(name, wire_type, self.to_string()))
  }

  fn decode_value<'a>(
    element: &'a WireElement,
    field: &FieldDescriptor,
    ctx: &mut DecodeContext<'a>,
  ) -> Result<Self, CodecError> {
    let text = scalar_text(element, ctx)?;
    match text.trim() {
      "true" | "1" => Ok(true),
      "false" | "0" => Ok(false),
      _ => Err(decode_error(field, &Self::item_type(), text)),
    }
  }

  fn value_eq(&self, other: &Self, _guard: &mut VisitGuard) -> bool {
    self == other
  }

  fn value_hash(&self, _depth: usize) -> u64 {
    semantics::scalar_hash(self)
  }
}

impl WireValue for DateTime<FixedOffset> {
  fn item_type() -> QName {
    xsd::DATE_TIME
  }

  fn encode_value(&self, name: QName, wire_type: &QName, _ctx: &mut EncodeContext) -> Result<WireElement, CodecError> {
    Ok(scalar_element(
      name,
      wire_type,
      self.to_rfc3339_opts(SecondsFormat::AutoSi, true),
    ))
  }

  /// Accepts RFC 3339 and, as some servers omit the zone, a bare local
  /// timestamp read as UTC.
  fn decode_value<'a>(
    element: &'a WireElement,
    field: &FieldDescriptor,
    ctx: &mut DecodeContext<'a>,
  ) -> Result<Self, CodecError> {
    let text = scalar_text(element, ctx)?;
    let trimmed = text.trim();
    DateTime::parse_from_rfc3339(trimmed)
      .or_else(|_| {
        NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc().fixed_offset())
      })
      .map_err(|_| decode_error(field, &Self::item_type(), text))
  }

  fn value_eq(&self, other: &Self, _guard: &mut VisitGuard) -> bool {
    self == other
  }

  fn value_hash(&self, _depth: usize) -> u64 {
    semantics::scalar_hash(&(self.timestamp(), self.timestamp_subsec_nanos()))
  }
}

impl<T: Bean> WireValue for EntityRef<T> {
  fn item_type() -> QName {
    T::describe().wire_type().clone()
  }

  /// Writes a deep copy. Fails when the handle is already being written
  /// further up, which means the graph has a cycle.
  fn encode_value(&self, name: QName, _wire_type: &QName, ctx: &mut EncodeContext) -> Result<WireElement, CodecError> {
    let descriptor = T::describe();
    let address = self.address();
    ctx.enter(address, descriptor.name())?;

    let value = self.snapshot();
    let element = EntityCodec::encode_with(&value, descriptor, name, ctx);

    ctx.leave(address);
    element
  }

  /// Elements that are referenced by id decode to one shared handle.
  fn decode_value<'a>(
    element: &'a WireElement,
    _field: &FieldDescriptor,
    ctx: &mut DecodeContext<'a>,
  ) -> Result<Self, CodecError> {
    match element.href_id().or_else(|| element.id()) {
      Some(id) => ctx.resolve::<T>(id),
      None => EntityCodec::decode_with::<T>(element, T::describe(), ctx).map(EntityRef::new),
    }
  }

  fn value_eq(&self, other: &Self, guard: &mut VisitGuard) -> bool {
    semantics::entity_eq(self, other, guard)
  }

  fn value_hash(&self, depth: usize) -> u64 {
    semantics::entity_hash(self, depth)
  }
}

impl<V: WireValue> WireValue for Vec<V> {
  fn item_type() -> QName {
    SOAP_ARRAY
  }

  fn encode_value(&self, name: QName, _wire_type: &QName, ctx: &mut EncodeContext) -> Result<WireElement, CodecError> {
    let item_type = V::item_type();
    let mut element = WireElement::new(name).with_type(SOAP_ARRAY);
    element.array_type = Some(ArrayType {
      item_type: item_type.clone(),
      len: self.len(),
    });
    for item in self {
      element
        .children
        .push(item.encode_value(QName::unqualified("item"), &item_type, ctx)?);
    }
    Ok(element)
  }

  fn decode_value<'a>(
    element: &'a WireElement,
    field: &FieldDescriptor,
    ctx: &mut DecodeContext<'a>,
  ) -> Result<Self, CodecError> {
    Ok(Self::decode_elements(&[element], field, ctx)?.unwrap_or_default())
  }

  /// A single array wrapper yields its children in order; anything else is
  /// read as one item per repeated element. Nil items are skipped.
  fn decode_elements<'a>(
    elements: &[&'a WireElement],
    field: &FieldDescriptor,
    ctx: &mut DecodeContext<'a>,
  ) -> Result<Option<Self>, CodecError> {
    let items: Vec<&'a WireElement> = match elements {
      [] => return Ok(None),
      [single] if single.nil => return Ok(None),
      &[single] => {
        let target = ctx.follow(single)?;
        if target.is_array() || is_untyped_wrapper(target) {
          target.element_children().collect()
        } else {
          vec![single]
        }
      }
      repeated => repeated.to_vec(),
    };

    let mut values = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
      if ctx.follow(item)?.nil {
        trace!("Skipping nil item {} of {}", index, field.wire_name());
        continue;
      }
      values.push(V::decode_value(item, field, ctx)?);
    }
    Ok(Some(values))
  }

  fn value_eq(&self, other: &Self, guard: &mut VisitGuard) -> bool {
    self.len() == other.len() && self.iter().zip(other).all(|(lhs, rhs)| lhs.value_eq(rhs, guard))
  }

  fn value_hash(&self, depth: usize) -> u64 {
    self
      .iter()
      .map(|item| item.value_hash(depth))
      .fold(1, semantics::combine)
  }
}

/// A wrapper without array typing whose children are all `item`s
fn is_untyped_wrapper(element: &WireElement) -> bool {
  element.xsi_type.is_none()
    && element.text.as_deref().is_none_or(|text| text.trim().is_empty())
    && element.element_children().next().is_some()
    && element.element_children().all(|child| child.name.local() == "item")
}
