use soapbar_core::bean;
use soapbar_core::qname::xsd;

use super::base::{ConstantEntity, NamedRemoteEntity};
use crate::consts::BEANS_NS;

bean! {
  pub struct IssueType in BEANS_NS => "RemoteIssueType" extends constant: ConstantEntity {
    /// Whether issues of this type are sub-tasks. Always present on the wire.
    pub sub_task: Option<bool> => "subTask" as xsd::BOOLEAN, required;
  }
}

bean! {
  pub struct Priority in BEANS_NS => "RemotePriority" extends constant: ConstantEntity {
    /// Display colour, e.g. `#cc0000`
    pub color: Option<String> => "color" as xsd::STRING;
  }
}

bean! {
  /// Issue security level
  pub struct SecurityLevel in BEANS_NS => "RemoteSecurityLevel" extends named: NamedRemoteEntity {
    pub description: Option<String> => "description" as xsd::STRING;
  }
}

impl IssueType {
  pub fn new(id: &str, name: &str, sub_task: bool) -> Self {
    Self {
      constant: ConstantEntity::new(id, name),
      sub_task: Some(sub_task),
    }
  }

  pub fn is_sub_task(&self) -> bool {
    self.sub_task.unwrap_or(false)
  }
}

impl Priority {
  pub fn new(id: &str, name: &str, color: &str) -> Self {
    Self {
      constant: ConstantEntity::new(id, name),
      color: Some(color.to_string()),
    }
  }
}

impl SecurityLevel {
  pub fn new(id: &str, name: &str) -> Self {
    Self {
      named: NamedRemoteEntity::new(id, name),
      description: None,
    }
  }
}
