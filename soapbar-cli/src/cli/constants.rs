//! # Constant Commands
//!
//! Priorities, issue types and security levels.

use anyhow::Result;
use soapbar_jira::{IssueType, Priority, SecurityLevel};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::Connection;
use super::session::with_session;
use crate::output::{cell, print_warning};

#[derive(Tabled)]
struct ConstantRow {
  #[tabled(rename = "ID")]
  id: String,
  #[tabled(rename = "Name")]
  name: String,
  #[tabled(rename = "Description")]
  description: String,
}

impl From<&Priority> for ConstantRow {
  fn from(priority: &Priority) -> Self {
    Self {
      id: cell(priority.constant.id()),
      name: cell(priority.constant.name()),
      description: cell(priority.constant.description()),
    }
  }
}

impl From<&IssueType> for ConstantRow {
  fn from(issue_type: &IssueType) -> Self {
    Self {
      id: cell(issue_type.constant.id()),
      name: cell(issue_type.constant.name()),
      description: cell(issue_type.constant.description()),
    }
  }
}

impl From<&SecurityLevel> for ConstantRow {
  fn from(level: &SecurityLevel) -> Self {
    Self {
      id: cell(level.named.id()),
      name: cell(level.named.name()),
      description: cell(level.description.as_deref()),
    }
  }
}

fn print_rows(rows: Vec<ConstantRow>, empty: &str) {
  if rows.is_empty() {
    print_warning(empty);
  } else {
    println!("{}", Table::new(rows).with(Style::sharp()));
  }
}

pub fn handle_priorities_command(connection: &Connection) -> Result<()> {
  let priorities = with_session(connection, |stub, token| async move { stub.get_priorities(&token).await })?;
  print_rows(priorities.iter().map(ConstantRow::from).collect(), "No priorities found.");
  Ok(())
}

pub fn handle_issue_types_command(connection: &Connection, sub_tasks: bool) -> Result<()> {
  let issue_types = with_session(connection, |stub, token| async move {
    if sub_tasks {
      stub.get_sub_task_issue_types(&token).await
    } else {
      stub.get_issue_types(&token).await
    }
  })?;
  print_rows(issue_types.iter().map(ConstantRow::from).collect(), "No issue types found.");
  Ok(())
}

pub fn handle_security_levels_command(connection: &Connection, project_key: &str) -> Result<()> {
  let levels = with_session(connection, |stub, token| async move {
    stub.get_security_levels(&token, project_key).await
  })?;
  print_rows(
    levels.iter().map(ConstantRow::from).collect(),
    &format!("No security levels in {project_key}."),
  );
  Ok(())
}
