//! # User and Group Commands

use anyhow::Result;
use owo_colors::OwoColorize;
use soapbar_jira::User;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::Connection;
use super::session::with_session;
use crate::output::{cell, print_header, print_warning};

#[derive(Tabled)]
struct UserRow {
  #[tabled(rename = "Name")]
  name: String,
  #[tabled(rename = "Full name")]
  fullname: String,
  #[tabled(rename = "Email")]
  email: String,
}

impl From<&User> for UserRow {
  fn from(user: &User) -> Self {
    Self {
      name: cell(user.name.as_deref()),
      fullname: cell(user.fullname.as_deref()),
      email: cell(user.email.as_deref()),
    }
  }
}

pub fn handle_user_command(connection: &Connection, name: &str) -> Result<()> {
  let user = with_session(connection, |stub, token| async move { stub.get_user(&token, name).await })?;
  println!("{}", Table::new([UserRow::from(&user)]).with(Style::sharp()));
  Ok(())
}

pub fn handle_group_command(connection: &Connection, name: &str) -> Result<()> {
  let group = with_session(connection, |stub, token| async move { stub.get_group(&token, name).await })?;

  print_header(&format!("Group {}", group.name.as_deref().unwrap_or(name).bold()));
  let members: Vec<UserRow> = group
    .users
    .iter()
    .flatten()
    .map(|user| UserRow::from(&user.snapshot()))
    .collect();

  if members.is_empty() {
    print_warning("The group has no members.");
  } else {
    println!("{}", Table::new(members).with(Style::sharp()));
  }
  Ok(())
}
