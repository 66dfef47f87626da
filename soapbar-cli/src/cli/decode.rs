//! # Decode Command
//!
//! Decode a saved bean without contacting the server, e.g. to inspect a
//! captured response.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Args, ValueEnum};
use soapbar_core::envelope::parse_response;
use soapbar_core::{Bean, DecodeContext, EntityCodec, WireElement};
use soapbar_jira::*;

/// Arguments for the decode command
#[derive(Args)]
pub struct DecodeArgs {
  /// Bean type to decode as
  #[arg(index = 1, value_enum)]
  pub bean: BeanKind,

  /// XML file holding the bean or a response envelope
  #[arg(index = 2)]
  pub file: PathBuf,
}

/// The beans `decode` understands
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeanKind {
  FieldValue,
  Filter,
  Group,
  IssueType,
  Permission,
  PermissionMapping,
  PermissionScheme,
  Priority,
  Project,
  ProjectRole,
  ProjectRoleActors,
  RoleActor,
  RoleActors,
  Scheme,
  SecurityLevel,
  ServerInfo,
  TimeInfo,
  User,
  Worklog,
}

pub fn handle_decode_command(args: DecodeArgs) -> Result<()> {
  let xml =
    fs::read_to_string(&args.file).with_context(|| format!("Failed to read {}", args.file.display()))?;

  let rendered = match args.bean {
    BeanKind::FieldValue => render::<FieldValue>(&xml),
    BeanKind::Filter => render::<Filter>(&xml),
    BeanKind::Group => render::<Group>(&xml),
    BeanKind::IssueType => render::<IssueType>(&xml),
    BeanKind::Permission => render::<Permission>(&xml),
    BeanKind::PermissionMapping => render::<PermissionMapping>(&xml),
    BeanKind::PermissionScheme => render::<PermissionScheme>(&xml),
    BeanKind::Priority => render::<Priority>(&xml),
    BeanKind::Project => render::<Project>(&xml),
    BeanKind::ProjectRole => render::<ProjectRole>(&xml),
    BeanKind::ProjectRoleActors => render::<ProjectRoleActors>(&xml),
    BeanKind::RoleActor => render::<RoleActor>(&xml),
    BeanKind::RoleActors => render::<RoleActors>(&xml),
    BeanKind::Scheme => render::<Scheme>(&xml),
    BeanKind::SecurityLevel => render::<SecurityLevel>(&xml),
    BeanKind::ServerInfo => render::<ServerInfo>(&xml),
    BeanKind::TimeInfo => render::<TimeInfo>(&xml),
    BeanKind::User => render::<User>(&xml),
    BeanKind::Worklog => render::<Worklog>(&xml),
  }
  .with_context(|| format!("Failed to decode {} as {:?}", args.file.display(), args.bean))?;

  println!("{rendered}");
  Ok(())
}

fn render<T: Bean>(xml: &str) -> Result<String> {
  let bean: T = decode(xml)?;
  Ok(format!("{bean:#?}"))
}

/// Decode the return value of a response envelope, or a bare element.
/// Under a root holding `multiRef` siblings, the first child without an
/// `id` is the bean.
fn decode<T: Bean>(xml: &str) -> Result<T> {
  let root = WireElement::parse(xml)?;

  if root.name.local() == "Envelope" {
    let response = parse_response(xml)?;
    let element = response
      .response_element()
      .and_then(|wrapper| wrapper.element_children().next())
      .ok_or_else(|| anyhow!("The envelope holds no return value"))?;
    let mut ctx = DecodeContext::with_refs([response.body()]);
    return Ok(EntityCodec::decode_with(element, T::describe(), &mut ctx)?);
  }

  let has_multi_refs = root.element_children().any(|child| child.id().is_some());
  let element = if has_multi_refs {
    root
      .element_children()
      .find(|child| child.id().is_none())
      .ok_or_else(|| anyhow!("Only multiRef elements found"))?
  } else {
    &root
  };

  let mut ctx = DecodeContext::with_refs([&root]);
  Ok(EntityCodec::decode_with(element, T::describe(), &mut ctx)?)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_decodes_bare_element() {
    let user: User = decode("<user><name>fred</name><email>fred@example.com</email></user>").unwrap();
    assert_eq!(user.name.as_deref(), Some("fred"));
  }

  #[test]
  fn test_decodes_element_with_multi_refs() {
    let xml = r##"<saved xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
        <info><version>4.2.1</version><serverTime href="#id0"/></info>
        <multiRef id="id0"><timeZoneId>UTC</timeZoneId></multiRef>
      </saved>"##;
    let info: ServerInfo = decode(xml).unwrap();
    assert_eq!(info.version.as_deref(), Some("4.2.1"));
    assert_eq!(info.server_time.unwrap().read().time_zone_id.as_deref(), Some("UTC"));
  }

  #[test]
  fn test_decodes_return_value_of_envelope() {
    let xml = r##"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/">
        <soapenv:Body>
          <ns1:getUserResponse xmlns:ns1="http://soap.rpc.jira.atlassian.com">
            <getUserReturn href="#id0"/>
          </ns1:getUserResponse>
          <multiRef id="id0"><name>barney</name></multiRef>
        </soapenv:Body>
      </soapenv:Envelope>"##;
    let user: User = decode(xml).unwrap();
    assert_eq!(user.name.as_deref(), Some("barney"));
  }

  #[test]
  fn test_malformed_xml_is_an_error() {
    assert!(decode::<User>("<user><name>fred</user>").is_err());
  }
}
