//! Wire round trips and value semantics for every JIRA bean.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use chrono::DateTime;
use soapbar_core::{Bean, CodecError, DecodeContext, EntityCodec, EntityRef, WireElement};
use soapbar_jira::*;

fn round_trip<T: Bean + PartialEq>(bean: &T) -> T {
  let xml = EntityCodec::encode(bean, "bean").unwrap().to_xml();
  let decoded: T = EntityCodec::decode(&WireElement::parse(&xml).unwrap()).unwrap();
  assert_eq!(&decoded, bean, "{} did not survive the wire:\n{}", T::describe().name(), xml);
  decoded
}

fn hash_of<T: Hash>(value: &T) -> u64 {
  let mut hasher = DefaultHasher::new();
  value.hash(&mut hasher);
  hasher.finish()
}

fn fred() -> User {
  User::new("fred", "Fred Flintstone", "fred@example.com")
}

fn developers() -> ProjectRole {
  ProjectRole::new(10001, "Developers", "Developers of the project")
}

fn role_actors() -> RoleActors {
  let user = EntityRef::new(fred());
  let role = EntityRef::new(developers());
  RoleActors {
    project_role: Some(role.clone()),
    role_actors: Some(vec![EntityRef::new(RoleActor {
      descriptor: Some("Fred Flintstone".to_string()),
      parameter: Some("fred".to_string()),
      project_role: Some(role),
      actor_type: Some("atlassian-user-role-actor".to_string()),
      users: Some(vec![user.clone()]),
    })]),
    users: Some(vec![user]),
  }
}

#[test]
fn test_base_entities_round_trip() {
  round_trip(&RemoteEntity::with_id("10000"));
  round_trip(&NamedRemoteEntity::new("10000", "Monkey"));
  round_trip(&ConstantEntity::new("1", "Blocker"));
}

#[test]
fn test_constants_round_trip() {
  round_trip(&IssueType::new("1", "Bug", false));
  round_trip(&IssueType::new("5", "Sub-task", true));
  round_trip(&Priority::new("1", "Blocker", "#cc0000"));
  round_trip(&SecurityLevel::new("10000", "Staff"));
}

#[test]
fn test_users_and_groups_round_trip() {
  round_trip(&fred());
  round_trip(&Group::new(
    "jira-developers",
    vec![fred(), User::new("barney", "Barney Rubble", "barney@example.com")],
  ));
  round_trip(&Group::new("empty", vec![]));
}

#[test]
fn test_permissions_round_trip() {
  let browse = Permission::new("Browse Projects", 10);
  round_trip(&browse);

  let mapping = PermissionMapping {
    permission: Some(EntityRef::new(browse)),
    remote_entities: Some(vec![
      Principal::Group(EntityRef::new(Group::new("jira-users", vec![]))),
      Principal::User(EntityRef::new(fred())),
    ]),
  };
  round_trip(&mapping);

  let scheme = Scheme::new(0, "Default Permission Scheme", "permission");
  round_trip(&scheme);
  round_trip(&PermissionScheme {
    scheme,
    permission_mappings: Some(vec![EntityRef::new(mapping)]),
  });
}

#[test]
fn test_roles_and_projects_round_trip() {
  round_trip(&developers());
  round_trip(&role_actors());

  let mut project = Project::new("10000", "MKY", "Monkey");
  project.lead = Some("fred".to_string());
  project.url = Some("https://jira.example.com/browse/MKY".to_string());
  project.notification_scheme = Some(EntityRef::new(Scheme::new(10000, "Default Notification Scheme", "notification")));
  round_trip(&project);

  let actors = ProjectRoleActors {
    role_actors: role_actors(),
    project: Some(EntityRef::new(project)),
  };
  round_trip(&actors);
  round_trip(&actors.role_actors.role_actors.as_ref().unwrap()[0].snapshot());
}

#[test]
fn test_issue_beans_round_trip() {
  round_trip(&Filter {
    named: NamedRemoteEntity::new("10010", "My open issues"),
    author: Some("fred".to_string()),
    description: Some(String::new()),
    project: None,
    xml: Some("<searchrequest name=\"My open issues\"/>".to_string()),
  });
  round_trip(&FieldValue::new("labels", &["alpha", "beta & gamma"]));

  let start = DateTime::parse_from_rfc3339("2011-03-14T08:00:00+10:00").unwrap();
  let mut worklog = Worklog::new(start, "1h 30m", 5400, Some("Fixed <the> build"));
  worklog.created = Some(DateTime::parse_from_rfc3339("2011-03-14T09:30:00.250Z").unwrap());
  round_trip(&worklog);
}

#[test]
fn test_line_breaks_survive_the_wire() {
  round_trip(&Filter {
    named: NamedRemoteEntity::new("10011", "Windows notes"),
    description: Some("line1\r\nline2\rline3\n\tindented".to_string()),
    ..Filter::default()
  });

  let start = DateTime::parse_from_rfc3339("2011-03-14T08:00:00+10:00").unwrap();
  round_trip(&Worklog::new(start, "1h", 3600, Some("first\r\nsecond")));
}

#[test]
fn test_non_xml_characters_fail_at_encode() {
  let filter = Filter {
    description: Some("bell\u{7}".to_string()),
    ..Filter::default()
  };

  let error = EntityCodec::encode(&filter, "filter").unwrap_err();
  assert!(matches!(
    error,
    CodecError::InvalidCharacter { ref field, character: '\u{7}' } if field == "description"
  ));
}

#[test]
fn test_nil_members_are_skipped() {
  let xml = r##"<body xmlns:ns2="http://beans.soap.rpc.jira.atlassian.com"
                     xmlns:soapenc="http://schemas.xmlsoap.org/soap/encoding/"
                     xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
      <group xsi:type="ns2:RemoteGroup">
        <name>jira-users</name>
        <users soapenc:arrayType="ns2:RemoteUser[2]" xsi:type="soapenc:Array">
          <users href="#id0"/>
          <users xsi:nil="true"/>
        </users>
      </group>
      <multiRef id="id0" xsi:type="ns2:RemoteUser">
        <email>fred@example.com</email><fullname>Fred Flintstone</fullname><name>fred</name>
      </multiRef>
    </body>"##;

  let body = WireElement::parse(xml).unwrap();
  let mut ctx = DecodeContext::with_refs([&body]);
  let group: Group = EntityCodec::decode_with(body.child("group").unwrap(), Group::describe(), &mut ctx).unwrap();
  assert_eq!(group.member_names(), vec!["fred".to_string()]);
  assert_eq!(group, Group::new("jira-users", vec![fred()]));
}

#[test]
fn test_server_beans_round_trip() {
  let time = TimeInfo {
    server_time: Some("2011-03-14T09:30:00.000+1000".to_string()),
    time_zone_id: Some("Australia/Sydney".to_string()),
  };
  round_trip(&time);
  round_trip(&ServerInfo {
    base_url: Some("https://jira.example.com".to_string()),
    build_date: Some(DateTime::parse_from_rfc3339("2010-11-10T00:00:00Z").unwrap()),
    build_number: Some("591".to_string()),
    edition: Some("Enterprise".to_string()),
    server_time: Some(EntityRef::new(time)),
    version: Some("4.2.1".to_string()),
  });
}

#[test]
fn test_null_optional_field_stays_none() {
  let user = User {
    email: None,
    ..fred()
  };
  let decoded = round_trip(&user);
  assert_eq!(decoded.email, None);
  assert_ne!(decoded, fred());
}

#[test]
fn test_array_order_is_significant() {
  let barney = User::new("barney", "Barney Rubble", "barney@example.com");
  let forward = Group::new("g", vec![fred(), barney.clone()]);
  let backward = Group::new("g", vec![barney, fred()]);
  assert_ne!(forward, backward);
}

#[test]
fn test_equal_beans_hash_equal() {
  let left = role_actors();
  let right = role_actors();
  assert_eq!(left, right);
  assert_eq!(hash_of(&left), hash_of(&right));

  let set: HashSet<Priority> = [
    Priority::new("1", "Blocker", "#cc0000"),
    Priority::new("1", "Blocker", "#cc0000"),
    Priority::new("2", "Critical", "#ff0000"),
  ]
  .into_iter()
  .collect();
  assert_eq!(set.len(), 2);
}

#[test]
fn test_unknown_elements_are_ignored() {
  let xml = r#"<user xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema">
      <avatarUrl xsi:type="xsd:string">https://jira.example.com/avatar.png</avatarUrl>
      <email>fred@example.com</email>
      <fullname>Fred Flintstone</fullname>
      <active>true</active>
      <name>fred</name>
    </user>"#;
  let user: User = EntityCodec::decode(&WireElement::parse(xml).unwrap()).unwrap();
  assert_eq!(user, fred());
}

#[test]
fn test_aliased_references_decode_to_one_allocation() {
  let xml = r##"<body xmlns:ns2="http://beans.soap.rpc.jira.atlassian.com"
                     xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
      <project xsi:type="ns2:RemoteProject">
        <id>10000</id>
        <name>Monkey</name>
        <issueSecurityScheme href="#id0"/>
        <key>MKY</key>
        <notificationScheme href="#id0"/>
      </project>
      <multiRef id="id0" xsi:type="ns2:RemoteScheme"><id>10000</id><name>Shared</name></multiRef>
    </body>"##;

  let body = WireElement::parse(xml).unwrap();
  let mut ctx = DecodeContext::with_refs([&body]);
  let project: Project = EntityCodec::decode_with(body.child("project").unwrap(), Project::describe(), &mut ctx).unwrap();

  let security = project.issue_security_scheme.as_ref().unwrap();
  let notification = project.notification_scheme.as_ref().unwrap();
  assert!(security.ptr_eq(notification));

  security.write().description = Some("edited".to_string());
  assert_eq!(notification.read().description.as_deref(), Some("edited"));
}
