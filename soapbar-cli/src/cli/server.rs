//! # Server Info Command

use anyhow::Result;
use owo_colors::OwoColorize;

use super::Connection;
use super::session::with_session;
use crate::output::{cell, format_url, print_header};

pub fn handle_server_info_command(connection: &Connection) -> Result<()> {
  let info = with_session(connection, |stub, token| async move { stub.get_server_info(&token).await })?;

  print_header("Server");
  println!("  {:<12} {}", "Base URL".bold(), format_url(info.base_url.as_deref().unwrap_or("-")));
  println!("  {:<12} {}", "Version".bold(), cell(info.version.as_deref()));
  println!("  {:<12} {}", "Build".bold(), cell(info.build_number.as_deref()));
  println!(
    "  {:<12} {}",
    "Built".bold(),
    cell(info.build_date.map(|date| date.format("%Y-%m-%d")))
  );
  println!("  {:<12} {}", "Edition".bold(), cell(info.edition.as_deref()));

  if let Some(time) = info.server_time.map(|time| time.snapshot()) {
    println!(
      "  {:<12} {} ({})",
      "Server time".bold(),
      cell(time.server_time.as_deref()),
      cell(time.time_zone_id.as_deref())
    );
  }
  Ok(())
}
