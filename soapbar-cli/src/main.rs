//! # Soapbar CLI Entry Point
//!
//! The `soapbar` binary: endpoint configuration, a handful of read-only
//! calls against JIRA's SOAP service and an offline bean decoder.

use std::env;

use anyhow::Result;
use clap::Parser;
use tracing::{Level, debug};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;
mod consts;
mod output;
mod prompts;

fn init_tracing(verbose: u8) {
  let verbosity = env::var(consts::ENV_VERBOSITY)
    .ok()
    .and_then(|value| value.parse::<u8>().ok())
    .filter(|level| *level <= 3)
    .unwrap_or(verbose);

  let level = match verbosity {
    0 => Level::WARN,  // Default: warnings and errors
    1 => Level::INFO,  // -v: info, warnings, and errors
    2 => Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => Level::TRACE, // -vvv or more: envelopes too
  };

  let fmt_layer = fmt::layer()
    .with_target(false)
    .with_level(true)
    .with_writer(std::io::stderr);
  let filter = EnvFilter::from_default_env().add_directive(level.into());

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt_layer)
    .try_init()
    .ok();

  debug!("Tracing initialized with level: {}", level);
}

fn main() -> Result<()> {
  let cmd = cli::Cli::parse();
  init_tracing(cmd.verbose);
  cli::handle_cli(cmd)
}
