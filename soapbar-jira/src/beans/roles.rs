use soapbar_core::qname::xsd;
use soapbar_core::{EntityRef, bean};

use super::base::NamedRemoteEntity;
use super::permissions::{PermissionScheme, Scheme};
use super::users::User;
use super::{array_type, bean_type};
use crate::consts::BEANS_NS;

bean! {
  pub struct ProjectRole in BEANS_NS => "RemoteProjectRole" {
    pub description: Option<String> => "description" as xsd::STRING;
    pub id: Option<i64> => "id" as xsd::LONG;
    pub name: Option<String> => "name" as xsd::STRING;
  }
}

bean! {
  /// One actor (a user or a group, by descriptor) holding a project role
  pub struct RoleActor in BEANS_NS => "RemoteRoleActor" {
    pub descriptor: Option<String> => "descriptor" as xsd::STRING;
    pub parameter: Option<String> => "parameter" as xsd::STRING;
    pub project_role: Option<EntityRef<ProjectRole>> => "projectRole" as bean_type("RemoteProjectRole");
    pub actor_type: Option<String> => "type" as xsd::STRING;
    pub users: Option<Vec<EntityRef<User>>> => "users" as array_type("ArrayOf_tns1_RemoteUser");
  }
}

bean! {
  pub struct RoleActors in BEANS_NS => "RemoteRoleActors" {
    pub project_role: Option<EntityRef<ProjectRole>> => "projectRole" as bean_type("RemoteProjectRole");
    pub role_actors: Option<Vec<EntityRef<RoleActor>>> => "roleActors" as array_type("ArrayOf_tns1_RemoteRoleActor");
    /// Every user reached through the actors, flattened by the server
    pub users: Option<Vec<EntityRef<User>>> => "users" as array_type("ArrayOf_tns1_RemoteUser");
  }
}

bean! {
  /// Role actors of one role within one project
  pub struct ProjectRoleActors in BEANS_NS => "RemoteProjectRoleActors" extends role_actors: RoleActors {
    pub project: Option<EntityRef<Project>> => "project" as bean_type("RemoteProject");
  }
}

bean! {
  pub struct Project in BEANS_NS => "RemoteProject" extends named: NamedRemoteEntity {
    pub description: Option<String> => "description" as xsd::STRING;
    pub issue_security_scheme: Option<EntityRef<Scheme>> => "issueSecurityScheme" as bean_type("RemoteScheme");
    pub key: Option<String> => "key" as xsd::STRING;
    pub lead: Option<String> => "lead" as xsd::STRING;
    pub notification_scheme: Option<EntityRef<Scheme>> => "notificationScheme" as bean_type("RemoteScheme");
    pub permission_scheme: Option<EntityRef<PermissionScheme>> =>
      "permissionScheme" as bean_type("RemotePermissionScheme");
    pub project_url: Option<String> => "projectUrl" as xsd::STRING;
    pub url: Option<String> => "url" as xsd::STRING;
  }
}

impl ProjectRole {
  pub fn new(id: i64, name: &str, description: &str) -> Self {
    Self {
      description: Some(description.to_string()),
      id: Some(id),
      name: Some(name.to_string()),
    }
  }
}

impl Project {
  pub fn new(id: &str, key: &str, name: &str) -> Self {
    Self {
      named: NamedRemoteEntity::new(id, name),
      key: Some(key.to_string()),
      ..Self::default()
    }
  }
}

impl RoleActors {
  /// Names of the users holding the role
  pub fn user_names(&self) -> Vec<String> {
    self
      .users
      .iter()
      .flatten()
      .filter_map(|user| user.read().name.clone())
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use soapbar_core::{Bean, DecodeContext, EntityCodec, FieldDescriptor, WireElement};

  use super::*;

  #[test]
  fn test_project_role_actors_field_order() {
    let names: Vec<_> = ProjectRoleActors::describe()
      .fields()
      .iter()
      .map(FieldDescriptor::wire_name)
      .collect();
    assert_eq!(names, vec!["projectRole", "roleActors", "users", "project"]);
  }

  #[test]
  fn test_shared_user_decodes_to_one_handle() {
    let xml = r##"<body xmlns:ns2="http://beans.soap.rpc.jira.atlassian.com"
                       xmlns:soapenc="http://schemas.xmlsoap.org/soap/encoding/"
                       xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
        <actors xsi:type="ns2:RemoteProjectRoleActors">
          <projectRole href="#id1"/>
          <roleActors soapenc:arrayType="ns2:RemoteRoleActor[1]" xsi:type="soapenc:Array">
            <item href="#id2"/>
          </roleActors>
          <users soapenc:arrayType="ns2:RemoteUser[1]" xsi:type="soapenc:Array">
            <item href="#id3"/>
          </users>
          <project xsi:nil="true"/>
        </actors>
        <multiRef id="id1" xsi:type="ns2:RemoteProjectRole"><id>10002</id><name>Administrators</name></multiRef>
        <multiRef id="id2" xsi:type="ns2:RemoteRoleActor">
          <descriptor>Fred</descriptor>
          <parameter>fred</parameter>
          <projectRole href="#id1"/>
          <type>atlassian-user-role-actor</type>
          <users soapenc:arrayType="ns2:RemoteUser[1]" xsi:type="soapenc:Array"><item href="#id3"/></users>
        </multiRef>
        <multiRef id="id3" xsi:type="ns2:RemoteUser"><name>fred</name></multiRef>
      </body>"##;

    let body = WireElement::parse(xml).unwrap();
    let mut ctx = DecodeContext::with_refs([&body]);
    let decoded: ProjectRoleActors =
      EntityCodec::decode_with(body.child("actors").unwrap(), ProjectRoleActors::describe(), &mut ctx).unwrap();

    let actors = &decoded.role_actors;
    let actor = actors.role_actors.as_ref().unwrap()[0].snapshot();
    let direct = &actors.users.as_ref().unwrap()[0];
    let through_actor = &actor.users.as_ref().unwrap()[0];

    assert!(direct.ptr_eq(through_actor));
    assert!(actor.project_role.as_ref().unwrap().ptr_eq(actors.project_role.as_ref().unwrap()));
    assert_eq!(actors.user_names(), vec!["fred"]);
    assert_eq!(decoded.project, None);
  }

  #[test]
  fn test_project_round_trip_with_nested_schemes() {
    let mut project = Project::new("10000", "MKY", "Monkey");
    project.lead = Some("fred".to_string());
    project.issue_security_scheme = Some(EntityRef::new(Scheme::new(10, "Secure", "security")));
    project.permission_scheme = Some(EntityRef::new(PermissionScheme {
      scheme: Scheme::new(0, "Default", "permission"),
      permission_mappings: Some(vec![]),
    }));

    let decoded: Project = EntityCodec::decode(&EntityCodec::encode(&project, "project").unwrap()).unwrap();
    assert_eq!(decoded, project);
    assert_eq!(decoded.notification_scheme, None);
  }
}
