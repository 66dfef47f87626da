use soapbar_core::qname::xsd;
use soapbar_core::{EntityRef, bean};

use super::users::Principal;
use super::{array_type, bean_type};
use crate::consts::BEANS_NS;

bean! {
  pub struct Permission in BEANS_NS => "RemotePermission" {
    pub name: Option<String> => "name" as xsd::STRING;
    /// Numeric permission code, e.g. 10 for "Browse Projects"
    pub permission: Option<i64> => "permission" as xsd::LONG, required;
  }
}

bean! {
  /// A permission granted to users and groups
  pub struct PermissionMapping in BEANS_NS => "RemotePermissionMapping" {
    pub permission: Option<EntityRef<Permission>> => "permission" as bean_type("RemotePermission");
    pub remote_entities: Option<Vec<Principal>> => "remoteEntities" as array_type("ArrayOf_tns1_RemoteEntity");
  }
}

bean! {
  pub struct Scheme in BEANS_NS => "RemoteScheme" {
    pub description: Option<String> => "description" as xsd::STRING;
    pub id: Option<i64> => "id" as xsd::LONG;
    pub name: Option<String> => "name" as xsd::STRING;
    pub scheme_type: Option<String> => "type" as xsd::STRING;
  }
}

bean! {
  pub struct PermissionScheme in BEANS_NS => "RemotePermissionScheme" extends scheme: Scheme {
    pub permission_mappings: Option<Vec<EntityRef<PermissionMapping>>> =>
      "permissionMappings" as array_type("ArrayOf_tns1_RemotePermissionMapping");
  }
}

impl Permission {
  pub fn new(name: &str, permission: i64) -> Self {
    Self {
      name: Some(name.to_string()),
      permission: Some(permission),
    }
  }
}

impl Scheme {
  pub fn new(id: i64, name: &str, scheme_type: &str) -> Self {
    Self {
      description: None,
      id: Some(id),
      name: Some(name.to_string()),
      scheme_type: Some(scheme_type.to_string()),
    }
  }
}

impl PermissionScheme {
  /// Names of the principals holding `permission` in this scheme
  pub fn holders_of(&self, permission: i64) -> Vec<String> {
    self
      .permission_mappings
      .iter()
      .flatten()
      .map(EntityRef::snapshot)
      .filter(|mapping| {
        mapping
          .permission
          .as_ref()
          .is_some_and(|granted| granted.read().permission == Some(permission))
      })
      .flat_map(|mapping| mapping.remote_entities.unwrap_or_default())
      .filter_map(|principal| principal.name())
      .collect()
  }
}
