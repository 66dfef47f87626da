use soapbar_core::bean;
use soapbar_core::qname::xsd;

use crate::consts::BEANS_NS;

bean! {
  /// Root of the bean hierarchy: anything with a server side id
  pub struct RemoteEntity in BEANS_NS => "AbstractRemoteEntity" {
    pub id: Option<String> => "id" as xsd::STRING;
  }
}

bean! {
  pub struct NamedRemoteEntity in BEANS_NS => "AbstractNamedRemoteEntity" extends entity: RemoteEntity {
    pub name: Option<String> => "name" as xsd::STRING;
  }
}

bean! {
  /// Server side constants such as issue types and priorities
  pub struct ConstantEntity in BEANS_NS => "AbstractRemoteConstant" extends named: NamedRemoteEntity {
    pub description: Option<String> => "description" as xsd::STRING;
    pub icon: Option<String> => "icon" as xsd::STRING;
  }
}

impl RemoteEntity {
  pub fn with_id(id: &str) -> Self {
    Self { id: Some(id.to_string()) }
  }

  pub fn id(&self) -> Option<&str> {
    self.id.as_deref()
  }
}

impl NamedRemoteEntity {
  pub fn new(id: &str, name: &str) -> Self {
    Self {
      entity: RemoteEntity::with_id(id),
      name: Some(name.to_string()),
    }
  }

  pub fn id(&self) -> Option<&str> {
    self.entity.id()
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
}

impl ConstantEntity {
  pub fn new(id: &str, name: &str) -> Self {
    Self {
      named: NamedRemoteEntity::new(id, name),
      ..Self::default()
    }
  }

  pub fn id(&self) -> Option<&str> {
    self.named.id()
  }

  pub fn name(&self) -> Option<&str> {
    self.named.name()
  }

  pub fn description(&self) -> Option<&str> {
    self.description.as_deref()
  }
}
