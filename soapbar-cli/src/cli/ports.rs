//! # Ports Command

use anyhow::Result;
use soapbar_core::get_config_dirs;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::Connection;
use super::session::locate;
use crate::output::print_info;

#[derive(Tabled)]
struct PortRow {
  #[tabled(rename = "Port")]
  port: String,
  #[tabled(rename = "Address")]
  address: String,
}

pub fn handle_ports_command(connection: &Connection) -> Result<()> {
  let config = get_config_dirs()?.load_endpoint_config()?;
  let locator = locate(connection, &config)?;

  print_info(&format!("Service {}", locator.service_name()));
  let rows = locator
    .port_names()
    .iter()
    .map(|port| -> Result<PortRow> {
      Ok(PortRow {
        port: port.to_string(),
        address: locator.endpoint_address(port)?,
      })
    })
    .collect::<Result<Vec<_>>>()?;

  println!("{}", Table::new(rows).with(Style::sharp()));
  Ok(())
}
