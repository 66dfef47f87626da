//! # Roles Command
//!
//! Project roles, and who holds one in a given project.

use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use soapbar_core::SoapError;
use soapbar_jira::{Project, ProjectRoleActors};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::Connection;
use super::session::with_session;
use crate::output::{cell, print_header, print_warning};

/// Arguments for the roles command
#[derive(Args)]
pub struct RolesArgs {
  /// Show the actors holding this role (requires --project-id)
  #[arg(long, requires = "project_id")]
  pub role: Option<String>,

  /// Numeric id of the project to look the role up in
  #[arg(long)]
  pub project_id: Option<String>,

  /// Key of the project, sent alongside its id
  #[arg(long)]
  pub project_key: Option<String>,
}

#[derive(Tabled)]
struct RoleRow {
  #[tabled(rename = "ID")]
  id: String,
  #[tabled(rename = "Name")]
  name: String,
  #[tabled(rename = "Description")]
  description: String,
}

#[derive(Tabled)]
struct ActorRow {
  #[tabled(rename = "Type")]
  actor_type: String,
  #[tabled(rename = "Actor")]
  descriptor: String,
  #[tabled(rename = "Users")]
  users: String,
}

pub fn handle_roles_command(connection: &Connection, args: RolesArgs) -> Result<()> {
  match (&args.role, &args.project_id) {
    (Some(role), Some(project_id)) => show_role_actors(connection, role, project_id, args.project_key.as_deref()),
    _ => list_roles(connection),
  }
}

fn list_roles(connection: &Connection) -> Result<()> {
  let roles = with_session(connection, |stub, token| async move { stub.get_project_roles(&token).await })?;

  if roles.is_empty() {
    print_warning("No project roles found.");
    return Ok(());
  }

  let rows: Vec<RoleRow> = roles
    .iter()
    .map(|role| RoleRow {
      id: cell(role.id),
      name: cell(role.name.as_deref()),
      description: cell(role.description.as_deref()),
    })
    .collect();
  println!("{}", Table::new(rows).with(Style::sharp()));
  Ok(())
}

fn show_role_actors(connection: &Connection, role_name: &str, project_id: &str, project_key: Option<&str>) -> Result<()> {
  let mut project = Project::default();
  project.named.entity.id = Some(project_id.to_string());
  project.key = project_key.map(str::to_string);

  let found = with_session(connection, |stub, token| async move {
    let roles = stub.get_project_roles(&token).await?;
    match roles.into_iter().find(|role| role.name.as_deref() == Some(role_name)) {
      Some(role) => Ok::<_, SoapError>(Some(stub.get_project_role_actors(&token, &role, &project).await?)),
      None => Ok(None),
    }
  })?;

  match found {
    Some(actors) => print_role_actors(role_name, &actors),
    None => print_warning(&format!("No project role named {role_name}.")),
  }
  Ok(())
}

fn print_role_actors(role_name: &str, actors: &ProjectRoleActors) {
  print_header(&format!("{} actors", role_name.bold()));

  let rows: Vec<ActorRow> = actors
    .role_actors
    .role_actors
    .iter()
    .flatten()
    .map(|actor| {
      let actor = actor.snapshot();
      let users: Vec<String> = actor
        .users
        .iter()
        .flatten()
        .filter_map(|user| user.read().name.clone())
        .collect();
      ActorRow {
        actor_type: cell(actor.actor_type.as_deref()),
        descriptor: cell(actor.descriptor.as_deref().or(actor.parameter.as_deref())),
        users: users.join(", "),
      }
    })
    .collect();

  if rows.is_empty() {
    print_warning("Nobody holds this role.");
  } else {
    println!("{}", Table::new(rows).with(Style::sharp()));
  }
}
