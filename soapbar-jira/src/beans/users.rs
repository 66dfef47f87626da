use soapbar_core::codec::{DecodeContext, EncodeContext};
use soapbar_core::qname::xsd;
use soapbar_core::semantics::{self, VisitGuard};
use soapbar_core::{Bean, CodecError, EntityRef, FieldDescriptor, QName, WireElement, WireValue, bean};

use super::array_type;
use super::base::RemoteEntity;
use crate::consts::BEANS_NS;

bean! {
  pub struct User in BEANS_NS => "RemoteUser" extends entity: RemoteEntity {
    pub email: Option<String> => "email" as xsd::STRING;
    pub fullname: Option<String> => "fullname" as xsd::STRING;
    pub name: Option<String> => "name" as xsd::STRING;
  }
}

bean! {
  pub struct Group in BEANS_NS => "RemoteGroup" extends entity: RemoteEntity {
    pub name: Option<String> => "name" as xsd::STRING;
    /// Members in server order
    pub users: Option<Vec<EntityRef<User>>> => "users" as array_type("ArrayOf_tns1_RemoteUser");
  }
}

impl User {
  pub fn new(name: &str, fullname: &str, email: &str) -> Self {
    Self {
      entity: RemoteEntity::default(),
      email: Some(email.to_string()),
      fullname: Some(fullname.to_string()),
      name: Some(name.to_string()),
    }
  }
}

impl Group {
  pub fn new(name: &str, users: Vec<User>) -> Self {
    Self {
      entity: RemoteEntity::default(),
      name: Some(name.to_string()),
      users: Some(users.into_iter().map(EntityRef::new).collect()),
    }
  }

  /// Member user names, skipping members without one
  pub fn member_names(&self) -> Vec<String> {
    self
      .users
      .iter()
      .flatten()
      .filter_map(|user| user.read().name.clone())
      .collect()
  }
}

/// A user or a group, as found in permission mappings. The variant follows
/// the `xsi:type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Principal {
  User(EntityRef<User>),
  Group(EntityRef<Group>),
}

impl Principal {
  pub fn name(&self) -> Option<String> {
    match self {
      Principal::User(user) => user.read().name.clone(),
      Principal::Group(group) => group.read().name.clone(),
    }
  }
}

impl WireValue for Principal {
  fn item_type() -> QName {
    RemoteEntity::describe().wire_type().clone()
  }

  fn encode_value(&self, name: QName, wire_type: &QName, ctx: &mut EncodeContext) -> Result<WireElement, CodecError> {
    match self {
      Principal::User(user) => user.encode_value(name, wire_type, ctx),
      Principal::Group(group) => group.encode_value(name, wire_type, ctx),
    }
  }

  fn decode_value<'a>(
    element: &'a WireElement,
    field: &FieldDescriptor,
    ctx: &mut DecodeContext<'a>,
  ) -> Result<Self, CodecError> {
    let target = ctx.follow(element)?;
    match target.xsi_type.as_ref().map(QName::local) {
      Some("RemoteUser") => EntityRef::<User>::decode_value(element, field, ctx).map(Principal::User),
      Some("RemoteGroup") => EntityRef::<Group>::decode_value(element, field, ctx).map(Principal::Group),
      other => Err(CodecError::Decode {
        field: field.wire_name().to_string(),
        expected: "RemoteUser or RemoteGroup".to_string(),
        value: other.unwrap_or("no xsi:type").to_string(),
      }),
    }
  }

  fn value_eq(&self, other: &Self, guard: &mut VisitGuard) -> bool {
    match (self, other) {
      (Principal::User(lhs), Principal::User(rhs)) => lhs.value_eq(rhs, guard),
      (Principal::Group(lhs), Principal::Group(rhs)) => lhs.value_eq(rhs, guard),
      _ => false,
    }
  }

  fn value_hash(&self, depth: usize) -> u64 {
    match self {
      Principal::User(user) => semantics::combine(1, user.value_hash(depth)),
      Principal::Group(group) => semantics::combine(2, group.value_hash(depth)),
    }
  }
}
