//! # Command Line Interface
//!
//! The CLI structure and command dispatch for `soapbar`.

mod config;
mod constants;
mod decode;
mod issues;
mod ports;
mod roles;
mod server;
mod session;
mod users;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::output::ColorMode;

/// Top-level CLI command for soapbar
#[derive(Parser)]
#[command(name = "soapbar")]
#[command(about = "Talk to JIRA's SOAP service from the command line")]
#[command(
  long_about = "Soapbar calls JIRA's jirasoapservice-v2 SOAP service and prints what it returns.\n\n\
        Configure the server once with `soapbar config set-endpoint`, then run any of the\n\
        read-only commands. Each one logs in, makes its call and logs out again."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages, including SOAP envelopes"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(long, value_enum, ignore_case = true, global = true, default_value_t = ColorMode::Auto)]
  pub colors: ColorMode,

  #[command(flatten)]
  pub connection: Connection,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Where to connect and as whom; both fall back to the configuration
#[derive(Args, Debug, Clone, Default)]
pub struct Connection {
  /// Server base URL, overriding the configured endpoint
  #[arg(long, global = true, value_name = "URL")]
  pub endpoint: Option<String>,

  /// User to log in as, overriding the configured username
  #[arg(long, short = 'u', global = true)]
  pub username: Option<String>,
}

/// Subcommands for soapbar
#[derive(Subcommand)]
pub enum Commands {
  /// Endpoint configuration
  #[command(arg_required_else_help = true)]
  Config(config::ConfigArgs),

  /// Decode a saved bean element or response envelope offline
  #[command(long_about = "Decode a bean from an XML file without contacting the server.\n\n\
            The file may hold a bare bean element (with its multiRef siblings under one\n\
            root) or a complete SOAP response envelope, in which case the return value is\n\
            decoded.")]
  Decode(decode::DecodeArgs),

  /// Show the details of a group and its members
  Group {
    /// Group name
    #[arg(index = 1)]
    name: String,
  },

  /// List issue types
  IssueTypes {
    /// List sub-task issue types instead
    #[arg(long)]
    sub_tasks: bool,
  },

  /// List favourite filters
  Filters,

  /// List the service's ports and their addresses
  Ports,

  /// List issue priorities
  Priorities,

  /// List project roles, or the actors of one role in one project
  Roles(roles::RolesArgs),

  /// List the security levels of a project
  SecurityLevels {
    /// Project key, e.g. MKY
    #[arg(index = 1)]
    project_key: String,
  },

  /// Show server version and time
  ServerInfo,

  /// Show the details of a user
  User {
    /// User name
    #[arg(index = 1)]
    name: String,
  },

  /// List the work logged on an issue
  Worklogs {
    /// Issue key, e.g. MKY-1
    #[arg(index = 1)]
    issue_key: String,
  },
}

/// Handle the parsed command line
pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();
  let connection = &cli.connection;

  match cli.command {
    Commands::Config(config) => config::handle_config_command(config),
    Commands::Decode(decode) => decode::handle_decode_command(decode),
    Commands::Filters => issues::handle_filters_command(connection),
    Commands::Group { name } => users::handle_group_command(connection, &name),
    Commands::IssueTypes { sub_tasks } => constants::handle_issue_types_command(connection, sub_tasks),
    Commands::Ports => ports::handle_ports_command(connection),
    Commands::Priorities => constants::handle_priorities_command(connection),
    Commands::Roles(roles) => roles::handle_roles_command(connection, roles),
    Commands::SecurityLevels { project_key } => constants::handle_security_levels_command(connection, &project_key),
    Commands::ServerInfo => server::handle_server_info_command(connection),
    Commands::User { name } => users::handle_user_command(connection, &name),
    Commands::Worklogs { issue_key } => issues::handle_worklogs_command(connection, &issue_key),
  }
}
