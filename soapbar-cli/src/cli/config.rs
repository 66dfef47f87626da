//! # Config Command
//!
//! Show and edit the endpoint configuration file.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use owo_colors::OwoColorize;
use soapbar_core::get_config_dirs;
use soapbar_jira::consts::PORT_NAME;

use crate::output::{format_command, format_url, print_header, print_info, print_success, print_warning};

/// Command for endpoint configuration
#[derive(Args)]
pub struct ConfigArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: ConfigSubcommands,
}

/// Subcommands for the config command
#[derive(Subcommand)]
pub enum ConfigSubcommands {
  /// Show the configuration file and the effective endpoint
  Show,

  /// Set the server base URL
  #[command(long_about = "Set the server base URL, e.g. https://jira.example.com.\n\n\
                         A missing scheme defaults to https. The SOAP port lives under\n\
                         /rpc/soap/jirasoapservice-v2 unless overridden with set-port.")]
  SetEndpoint {
    /// Base URL of the server
    #[arg(index = 1)]
    url: String,
  },

  /// Point one port at a full address
  SetPort {
    /// Port name, e.g. JirasoapserviceV2
    #[arg(index = 1)]
    port: String,

    /// Full address of the port
    #[arg(index = 2)]
    url: String,
  },

  /// Set the default username
  SetUsername {
    #[arg(index = 1)]
    username: String,
  },
}

pub fn handle_config_command(config: ConfigArgs) -> Result<()> {
  match config.subcommand {
    ConfigSubcommands::Show => show(),
    ConfigSubcommands::SetEndpoint { url } => set_endpoint(&url),
    ConfigSubcommands::SetPort { port, url } => set_port(&port, &url),
    ConfigSubcommands::SetUsername { username } => set_username(&username),
  }
}

fn show() -> Result<()> {
  let config_dirs = get_config_dirs()?;
  let config = config_dirs.load_endpoint_config()?;

  print_info(&format!(
    "Configuration file: {}",
    config_dirs.endpoint_config_path().display()
  ));

  print_header("Endpoint");
  match config.resolve_endpoint()? {
    Some(endpoint) => println!("  {}", format_url(&endpoint)),
    None => print_warning(&format!(
      "No endpoint configured. Set one with {}",
      format_command("soapbar config set-endpoint <url>")
    )),
  }

  print_header("Username");
  println!("  {}", config.resolve_username().as_deref().unwrap_or("-"));

  if !config.ports.is_empty() {
    print_header("Port overrides");
    for (port, address) in &config.ports {
      println!("  {} {}", port.bold(), format_url(address));
    }
  }
  Ok(())
}

fn set_endpoint(url: &str) -> Result<()> {
  let config_dirs = get_config_dirs()?;
  let mut config = config_dirs.load_endpoint_config()?;
  config.set_endpoint(url)?;
  config_dirs.save_endpoint_config(&config)?;

  print_success(&format!(
    "Endpoint set to {}",
    format_url(config.endpoint.as_deref().unwrap_or(url))
  ));
  Ok(())
}

fn set_port(port: &str, url: &str) -> Result<()> {
  if port != PORT_NAME {
    bail!("Unknown port: {port} (the service has one port, {PORT_NAME})");
  }

  let config_dirs = get_config_dirs()?;
  let mut config = config_dirs.load_endpoint_config()?;
  config.set_port(port, url)?;
  config_dirs.save_endpoint_config(&config)?;

  let address = config.ports.get(port).map(String::as_str).unwrap_or(url);
  print_success(&format!("Port {} now points at {}", port, format_url(address)));
  Ok(())
}

fn set_username(username: &str) -> Result<()> {
  let config_dirs = get_config_dirs()?;
  let mut config = config_dirs.load_endpoint_config()?;
  config.username = Some(username.to_string());
  config_dirs.save_endpoint_config(&config)?;

  print_success(&format!("Username set to {username}"));
  Ok(())
}
