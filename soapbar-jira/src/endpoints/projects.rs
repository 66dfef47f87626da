//! # Project Endpoints
//!
//! Project roles, their actors and permission schemes.

use soapbar_core::SoapError;
use tracing::instrument;

use crate::beans::{Permission, PermissionScheme, Project, ProjectRole, ProjectRoleActors};
use crate::client::JiraSoapStub;
use crate::operations::{GET_ALL_PERMISSIONS, GET_PERMISSION_SCHEMES, GET_PROJECT_ROLE_ACTORS, GET_PROJECT_ROLES};

impl JiraSoapStub {
  #[instrument(skip_all)]
  pub async fn get_project_roles(&self, token: &str) -> Result<Vec<ProjectRole>, SoapError> {
    self
      .call_beans(&GET_PROJECT_ROLES, vec![GET_PROJECT_ROLES.arg(0, &token.to_string())?])
      .await
  }

  /// Actors holding `role` in `project`
  #[instrument(skip(self, token), fields(role = ?role.name, project = ?project.key))]
  pub async fn get_project_role_actors(
    &self,
    token: &str,
    role: &ProjectRole,
    project: &Project,
  ) -> Result<ProjectRoleActors, SoapError> {
    let args = vec![
      GET_PROJECT_ROLE_ACTORS.arg(0, &token.to_string())?,
      GET_PROJECT_ROLE_ACTORS.bean_arg(1, role)?,
      GET_PROJECT_ROLE_ACTORS.bean_arg(2, project)?,
    ];
    self.call_bean(&GET_PROJECT_ROLE_ACTORS, args).await
  }

  #[instrument(skip_all)]
  pub async fn get_permission_schemes(&self, token: &str) -> Result<Vec<PermissionScheme>, SoapError> {
    self
      .call_beans(
        &GET_PERMISSION_SCHEMES,
        vec![GET_PERMISSION_SCHEMES.arg(0, &token.to_string())?],
      )
      .await
  }

  #[instrument(skip_all)]
  pub async fn get_all_permissions(&self, token: &str) -> Result<Vec<Permission>, SoapError> {
    self
      .call_beans(&GET_ALL_PERMISSIONS, vec![GET_ALL_PERMISSIONS.arg(0, &token.to_string())?])
      .await
  }
}

#[cfg(test)]
mod tests {
  use soapbar_test_utils::soap::{self, JIRA_SOAP_PATH};
  use wiremock::matchers::{body_string_contains, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::beans::{Principal, Project, ProjectRole};
  use crate::client::JiraSoapStub;

  fn stub(server: &MockServer) -> JiraSoapStub {
    JiraSoapStub::new(&format!("{}{}", server.uri(), JIRA_SOAP_PATH))
  }

  #[tokio::test]
  async fn test_get_project_role_actors_encodes_bean_arguments() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
      .and(path(JIRA_SOAP_PATH))
      .and(body_string_contains(":getProjectRoleActors "))
      .and(body_string_contains("<key xsi:type=\"xsd:string\">MKY</key>"))
      .and(body_string_contains("<name xsi:type=\"xsd:string\">Developers</name>"))
      .respond_with(ResponseTemplate::new(200).set_body_string(soap::response(
        "getProjectRoleActors",
        r##"<getProjectRoleActorsReturn href="#id0"/>"##,
        r##"<multiRef id="id0" soapenc:root="0" xsi:type="ns2:RemoteProjectRoleActors">
              <projectRole href="#id1"/>
              <roleActors soapenc:arrayType="ns2:RemoteRoleActor[1]" xsi:type="soapenc:Array">
                <roleActors href="#id2"/>
              </roleActors>
              <users soapenc:arrayType="ns2:RemoteUser[1]" xsi:type="soapenc:Array">
                <users href="#id3"/>
              </users>
              <project href="#id4"/>
            </multiRef>
            <multiRef id="id1" soapenc:root="0" xsi:type="ns2:RemoteProjectRole">
              <description xsi:type="xsd:string">Developers of the project</description>
              <id xsi:type="xsd:long">10001</id>
              <name xsi:type="xsd:string">Developers</name>
            </multiRef>
            <multiRef id="id2" soapenc:root="0" xsi:type="ns2:RemoteRoleActor">
              <descriptor xsi:type="xsd:string">Fred Flintstone</descriptor>
              <parameter xsi:type="xsd:string">fred</parameter>
              <projectRole href="#id1"/>
              <type xsi:type="xsd:string">atlassian-user-role-actor</type>
              <users soapenc:arrayType="ns2:RemoteUser[1]" xsi:type="soapenc:Array">
                <users href="#id3"/>
              </users>
            </multiRef>
            <multiRef id="id3" soapenc:root="0" xsi:type="ns2:RemoteUser">
              <name xsi:type="xsd:string">fred</name>
            </multiRef>
            <multiRef id="id4" soapenc:root="0" xsi:type="ns2:RemoteProject">
              <id xsi:type="xsd:string">10000</id>
              <key xsi:type="xsd:string">MKY</key>
            </multiRef>"##,
      )))
      .expect(1)
      .mount(&mock_server)
      .await;

    let role = ProjectRole::new(10001, "Developers", "Developers of the project");
    let project = Project::new("10000", "MKY", "Monkey");
    let actors = stub(&mock_server)
      .get_project_role_actors("token", &role, &project)
      .await?;

    assert_eq!(actors.role_actors.user_names(), vec!["fred"]);
    assert_eq!(actors.role_actors.project_role.as_ref().unwrap().snapshot(), role);
    assert_eq!(actors.project.as_ref().unwrap().read().key.as_deref(), Some("MKY"));
    Ok(())
  }

  #[tokio::test]
  async fn test_get_permission_schemes_decodes_principals() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    soap::mount_soap(
      &mock_server,
      "getPermissionSchemes",
      soap::response(
        "getPermissionSchemes",
        r##"<getPermissionSchemesReturn soapenc:arrayType="ns2:RemotePermissionScheme[1]" xsi:type="soapenc:Array">
              <getPermissionSchemesReturn href="#id0"/>
            </getPermissionSchemesReturn>"##,
        r##"<multiRef id="id0" soapenc:root="0" xsi:type="ns2:RemotePermissionScheme">
              <description xsi:type="xsd:string" xsi:nil="true"/>
              <id xsi:type="xsd:long">0</id>
              <name xsi:type="xsd:string">Default Permission Scheme</name>
              <type xsi:type="xsd:string">permission</type>
              <permissionMappings soapenc:arrayType="ns2:RemotePermissionMapping[1]" xsi:type="soapenc:Array">
                <permissionMappings href="#id1"/>
              </permissionMappings>
            </multiRef>
            <multiRef id="id1" soapenc:root="0" xsi:type="ns2:RemotePermissionMapping">
              <permission href="#id2"/>
              <remoteEntities soapenc:arrayType="ns2:RemoteEntity[2]" xsi:type="soapenc:Array">
                <remoteEntities href="#id3"/>
                <remoteEntities href="#id4"/>
              </remoteEntities>
            </multiRef>
            <multiRef id="id2" soapenc:root="0" xsi:type="ns2:RemotePermission">
              <name xsi:type="xsd:string">Browse Projects</name>
              <permission xsi:type="xsd:long">10</permission>
            </multiRef>
            <multiRef id="id3" soapenc:root="0" xsi:type="ns2:RemoteGroup">
              <name xsi:type="xsd:string">jira-users</name>
              <users soapenc:arrayType="ns2:RemoteUser[0]" xsi:type="soapenc:Array"/>
            </multiRef>
            <multiRef id="id4" soapenc:root="0" xsi:type="ns2:RemoteUser">
              <name xsi:type="xsd:string">fred</name>
            </multiRef>"##,
      ),
    )
    .await;

    let schemes = stub(&mock_server).get_permission_schemes("token").await?;
    assert_eq!(schemes.len(), 1);
    assert_eq!(schemes[0].scheme.scheme_type.as_deref(), Some("permission"));
    assert_eq!(schemes[0].holders_of(10), vec!["jira-users", "fred"]);

    let mapping = schemes[0].permission_mappings.as_ref().unwrap()[0].snapshot();
    let principals = mapping.remote_entities.unwrap();
    assert!(matches!(principals[0], Principal::Group(_)));
    assert!(matches!(principals[1], Principal::User(_)));
    Ok(())
  }

  #[tokio::test]
  async fn test_get_all_permissions() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    soap::mount_soap(
      &mock_server,
      "getAllPermissions",
      soap::response(
        "getAllPermissions",
        r##"<getAllPermissionsReturn soapenc:arrayType="ns2:RemotePermission[2]" xsi:type="soapenc:Array">
              <getAllPermissionsReturn href="#id0"/>
              <getAllPermissionsReturn href="#id1"/>
            </getAllPermissionsReturn>"##,
        r##"<multiRef id="id0" soapenc:root="0" xsi:type="ns2:RemotePermission">
              <name xsi:type="xsd:string">Administer Projects</name>
              <permission xsi:type="xsd:long">23</permission>
            </multiRef>
            <multiRef id="id1" soapenc:root="0" xsi:type="ns2:RemotePermission">
              <name xsi:type="xsd:string">Browse Projects</name>
              <permission xsi:type="xsd:long">10</permission>
            </multiRef>"##,
      ),
    )
    .await;

    let permissions = stub(&mock_server).get_all_permissions("token").await?;
    let codes: Vec<_> = permissions.iter().filter_map(|permission| permission.permission).collect();
    assert_eq!(codes, vec![23, 10]);
    Ok(())
  }
}
