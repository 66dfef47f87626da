//! # Issue Commands
//!
//! Favourite filters and work logs.

use anyhow::Result;
use soapbar_jira::{Filter, Worklog};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::Connection;
use super::session::with_session;
use crate::output::{cell, print_info, print_warning};

#[derive(Tabled)]
struct FilterRow {
  #[tabled(rename = "ID")]
  id: String,
  #[tabled(rename = "Name")]
  name: String,
  #[tabled(rename = "Author")]
  author: String,
  #[tabled(rename = "Description")]
  description: String,
}

impl From<&Filter> for FilterRow {
  fn from(filter: &Filter) -> Self {
    Self {
      id: cell(filter.named.id()),
      name: cell(filter.named.name()),
      author: cell(filter.author.as_deref()),
      description: cell(filter.description.as_deref()),
    }
  }
}

#[derive(Tabled)]
struct WorklogRow {
  #[tabled(rename = "Started")]
  started: String,
  #[tabled(rename = "Author")]
  author: String,
  #[tabled(rename = "Time spent")]
  time_spent: String,
  #[tabled(rename = "Comment")]
  comment: String,
}

impl From<&Worklog> for WorklogRow {
  fn from(worklog: &Worklog) -> Self {
    Self {
      started: cell(worklog.start_date.map(|date| date.format("%Y-%m-%d %H:%M"))),
      author: cell(worklog.author.as_deref()),
      time_spent: cell(worklog.time_spent.as_deref()),
      comment: cell(worklog.comment.as_deref()),
    }
  }
}

pub fn handle_filters_command(connection: &Connection) -> Result<()> {
  let filters = with_session(connection, |stub, token| async move { stub.get_favourite_filters(&token).await })?;

  if filters.is_empty() {
    print_warning("No favourite filters.");
  } else {
    let rows: Vec<FilterRow> = filters.iter().map(FilterRow::from).collect();
    println!("{}", Table::new(rows).with(Style::sharp()));
  }
  Ok(())
}

pub fn handle_worklogs_command(connection: &Connection, issue_key: &str) -> Result<()> {
  let worklogs = with_session(connection, |stub, token| async move {
    stub.get_worklogs(&token, issue_key).await
  })?;

  if worklogs.is_empty() {
    print_warning(&format!("No work logged on {issue_key}."));
    return Ok(());
  }

  let total: i64 = worklogs.iter().filter_map(|worklog| worklog.time_spent_in_seconds).sum();
  let rows: Vec<WorklogRow> = worklogs.iter().map(WorklogRow::from).collect();
  println!("{}", Table::new(rows).with(Style::sharp()));
  print_info(&format!("{} in total", format_duration(total)));
  Ok(())
}

/// Seconds as `1h 30m` style text
fn format_duration(seconds: i64) -> String {
  let hours = seconds / 3600;
  let minutes = (seconds % 3600) / 60;
  match (hours, minutes) {
    (0, minutes) => format!("{minutes}m"),
    (hours, 0) => format!("{hours}h"),
    (hours, minutes) => format!("{hours}h {minutes}m"),
  }
}
