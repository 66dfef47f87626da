//! # Service Locator
//!
//! Resolves the service's port names to addresses and hands out stubs
//! bound to them.

use std::collections::BTreeMap;

use reqwest::Client;
use soapbar_core::url::{ensure_url_scheme, join_path};
use soapbar_core::{EndpointConfig, SoapClient, SoapError};
use tracing::debug;

use crate::client::JiraSoapStub;
use crate::consts::{PORT_NAME, SERVICE_NAME, SERVICE_NS, SOAP_PATH};

const PORTS: [&str; 1] = [PORT_NAME];

/// Locator for `JiraSoapServiceService`
#[derive(Debug, Clone)]
pub struct ServiceLocator {
  base_url: String,
  addresses: BTreeMap<String, String>,
  client: Client,
}

impl ServiceLocator {
  /// Create a locator for a server base URL, e.g.
  /// `https://jira.example.com`
  pub fn new(base_url: &str) -> Result<Self, SoapError> {
    Ok(Self {
      base_url: ensure_url_scheme(base_url)?,
      addresses: BTreeMap::new(),
      client: Client::new(),
    })
  }

  /// Create a locator from the endpoint configuration, applying its port
  /// overrides.
  pub fn from_config(config: &EndpointConfig) -> Result<Self, SoapError> {
    let base_url = config.resolve_endpoint()?.ok_or_else(|| SoapError::InvalidEndpoint {
      endpoint: String::new(),
      reason: "no endpoint configured".to_string(),
    })?;

    let mut locator = Self::new(&base_url)?;
    for (port, address) in &config.ports {
      locator.set_endpoint_address(port, address)?;
    }
    Ok(locator)
  }

  /// Qualified service name in Clark notation
  pub fn service_name(&self) -> String {
    format!("{{{SERVICE_NS}}}{SERVICE_NAME}")
  }

  pub fn port_names(&self) -> &'static [&'static str] {
    &PORTS
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Address of a port: its override if one was set, else the default path
  /// under the base URL.
  pub fn endpoint_address(&self, port: &str) -> Result<String, SoapError> {
    Ok(self.address_of(known_port(port)?))
  }

  /// Redirect a port to another address
  pub fn set_endpoint_address(&mut self, port: &str, address: &str) -> Result<(), SoapError> {
    let port = known_port(port)?;
    let address = ensure_url_scheme(address)?;
    debug!("Port {} now at {}", port, address);
    self.addresses.insert(port.to_string(), address);
    Ok(())
  }

  /// A stub bound to the current address of `port`
  pub fn stub(&self, port: &str) -> Result<JiraSoapStub, SoapError> {
    Ok(self.stub_at(&self.endpoint_address(port)?))
  }

  /// A stub for the service's only port
  pub fn default_stub(&self) -> JiraSoapStub {
    self.stub_at(&self.address_of(PORT_NAME))
  }

  fn address_of(&self, port: &str) -> String {
    self
      .addresses
      .get(port)
      .cloned()
      .unwrap_or_else(|| join_path(&self.base_url, SOAP_PATH))
  }

  fn stub_at(&self, address: &str) -> JiraSoapStub {
    JiraSoapStub::from_client(SoapClient::with_client(self.client.clone(), address))
  }
}

fn known_port(port: &str) -> Result<&'static str, SoapError> {
  PORTS
    .iter()
    .find(|known| **known == port)
    .copied()
    .ok_or_else(|| SoapError::UnknownPort(port.to_string()))
}
