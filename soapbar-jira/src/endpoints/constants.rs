//! # Constant Endpoints
//!
//! Priorities, issue types and security levels.

use soapbar_core::SoapError;
use tracing::instrument;

use crate::beans::{IssueType, Priority, SecurityLevel};
use crate::client::JiraSoapStub;
use crate::operations::{GET_ISSUE_TYPES, GET_PRIORITIES, GET_SECURITY_LEVELS, GET_SUB_TASK_ISSUE_TYPES};

impl JiraSoapStub {
  #[instrument(skip_all)]
  pub async fn get_priorities(&self, token: &str) -> Result<Vec<Priority>, SoapError> {
    self
      .call_beans(&GET_PRIORITIES, vec![GET_PRIORITIES.arg(0, &token.to_string())?])
      .await
  }

  /// Standard (non sub-task) issue types
  #[instrument(skip_all)]
  pub async fn get_issue_types(&self, token: &str) -> Result<Vec<IssueType>, SoapError> {
    self
      .call_beans(&GET_ISSUE_TYPES, vec![GET_ISSUE_TYPES.arg(0, &token.to_string())?])
      .await
  }

  #[instrument(skip_all)]
  pub async fn get_sub_task_issue_types(&self, token: &str) -> Result<Vec<IssueType>, SoapError> {
    self
      .call_beans(
        &GET_SUB_TASK_ISSUE_TYPES,
        vec![GET_SUB_TASK_ISSUE_TYPES.arg(0, &token.to_string())?],
      )
      .await
  }

  /// Security levels the caller may set on issues of a project
  #[instrument(skip(self, token))]
  pub async fn get_security_levels(&self, token: &str, project_key: &str) -> Result<Vec<SecurityLevel>, SoapError> {
    let args = vec![
      GET_SECURITY_LEVELS.arg(0, &token.to_string())?,
      GET_SECURITY_LEVELS.arg(1, &project_key.to_string())?,
    ];
    self.call_beans(&GET_SECURITY_LEVELS, args).await
  }
}

#[cfg(test)]
mod tests {
  use soapbar_test_utils::soap::{self, JIRA_SOAP_PATH};
  use wiremock::MockServer;

  use crate::client::JiraSoapStub;

  const ISSUE_TYPES: &str = r##"<multiRef id="id0" soapenc:root="0" xsi:type="ns2:RemoteIssueType">
      <id xsi:type="xsd:string">1</id>
      <name xsi:type="xsd:string">Bug</name>
      <description xsi:type="xsd:string">A problem which impairs or prevents the functions of the product.</description>
      <icon xsi:type="xsd:string">https://jira.example.com/images/icons/bug.gif</icon>
      <subTask xsi:type="xsd:boolean">false</subTask>
    </multiRef>
    <multiRef id="id1" soapenc:root="0" xsi:type="ns2:RemoteIssueType">
      <id xsi:type="xsd:string">5</id>
      <name xsi:type="xsd:string">Sub-task</name>
      <description xsi:type="xsd:string" xsi:nil="true"/>
      <icon xsi:type="xsd:string">https://jira.example.com/images/icons/issue_subtask.gif</icon>
      <subTask xsi:type="xsd:boolean">true</subTask>
    </multiRef>"##;

  fn stub(server: &MockServer) -> JiraSoapStub {
    JiraSoapStub::new(&format!("{}{}", server.uri(), JIRA_SOAP_PATH))
  }

  #[tokio::test]
  async fn test_get_issue_types_preserves_server_order() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    soap::mount_soap(
      &mock_server,
      "getIssueTypes",
      soap::response(
        "getIssueTypes",
        r##"<getIssueTypesReturn soapenc:arrayType="ns2:RemoteIssueType[2]" xsi:type="soapenc:Array">
              <getIssueTypesReturn href="#id0"/>
              <getIssueTypesReturn href="#id1"/>
            </getIssueTypesReturn>"##,
        ISSUE_TYPES,
      ),
    )
    .await;

    let types = stub(&mock_server).get_issue_types("token").await?;
    let names: Vec<_> = types.iter().map(|issue_type| issue_type.constant.name().unwrap_or_default()).collect();
    assert_eq!(names, vec!["Bug", "Sub-task"]);
    assert!(types[1].is_sub_task());
    assert_eq!(types[1].constant.description(), None);
    Ok(())
  }

  #[tokio::test]
  async fn test_get_priorities_empty_array() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    soap::mount_soap(
      &mock_server,
      "getPriorities",
      soap::response(
        "getPriorities",
        r#"<getPrioritiesReturn soapenc:arrayType="ns2:RemotePriority[0]" xsi:type="soapenc:Array"/>"#,
        "",
      ),
    )
    .await;

    assert!(stub(&mock_server).get_priorities("token").await?.is_empty());
    Ok(())
  }

  #[tokio::test]
  async fn test_get_security_levels_sends_project_key() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    soap::mount_soap(
      &mock_server,
      "getSecurityLevels",
      soap::response(
        "getSecurityLevels",
        r##"<getSecurityLevelsReturn soapenc:arrayType="ns2:RemoteSecurityLevel[1]" xsi:type="soapenc:Array">
              <getSecurityLevelsReturn href="#id0"/>
            </getSecurityLevelsReturn>"##,
        r##"<multiRef id="id0" soapenc:root="0" xsi:type="ns2:RemoteSecurityLevel">
              <id xsi:type="xsd:string">10000</id>
              <name xsi:type="xsd:string">Staff</name>
              <description xsi:type="xsd:string">Staff only</description>
            </multiRef>"##,
      ),
    )
    .await;

    let levels = stub(&mock_server).get_security_levels("token", "MKY").await?;
    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].description.as_deref(), Some("Staff only"));
    Ok(())
  }
}
