//! # Remote Sessions
//!
//! Locating the service from configuration and flags, and running one call
//! inside a login/logout pair.

use std::env;
use std::future::Future;

use anyhow::{Context, Result};
use soapbar_core::{EndpointConfig, SoapError, get_config_dirs};
use soapbar_jira::{JiraSoapStub, ServiceLocator};
use tokio::runtime::Runtime;
use tracing::{debug, warn};

use super::Connection;
use crate::consts::ENV_PASSWORD;
use crate::output::format_command;
use crate::prompts::{prompt_password, prompt_username};

/// Build a locator: `--endpoint` wins over the configuration, and port
/// overrides only apply to the configured endpoint.
pub fn locate(connection: &Connection, config: &EndpointConfig) -> Result<ServiceLocator> {
  match &connection.endpoint {
    Some(endpoint) => ServiceLocator::new(endpoint).context("Invalid --endpoint"),
    None => ServiceLocator::from_config(config).with_context(|| {
      format!(
        "No usable endpoint. Configure one with {}",
        format_command("soapbar config set-endpoint <url>")
      )
    }),
  }
}

/// Log in, run `call` with the stub and session token, then log out. A
/// failed logout is logged, not returned.
pub fn with_session<T, F, Fut>(connection: &Connection, call: F) -> Result<T>
where
  F: FnOnce(JiraSoapStub, String) -> Fut,
  Fut: Future<Output = Result<T, SoapError>>,
{
  let config = get_config_dirs()?.load_endpoint_config()?;
  let locator = locate(connection, &config)?;

  let username = match connection.username.clone().or_else(|| config.resolve_username()) {
    Some(username) => username,
    None => prompt_username()?,
  };
  let password = match env::var(ENV_PASSWORD) {
    Ok(password) => password,
    Err(_) => prompt_password(&username)?,
  };

  let stub = locator.default_stub();
  debug!("Using {}", stub.endpoint());

  let rt = Runtime::new().context("Failed to create tokio runtime")?;
  rt.block_on(async {
    let token = stub
      .login(&username, &password)
      .await
      .with_context(|| format!("Failed to log in as {username}"))?;

    let result = call(stub.clone(), token.clone()).await;

    if let Err(error) = stub.logout(&token).await {
      warn!("Failed to log out: {}", error);
    }
    Ok::<T, anyhow::Error>(result?)
  })
}
