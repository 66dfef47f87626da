//! # Configuration Management
//!
//! Endpoint configuration and XDG directory handling. The endpoint file is a
//! small TOML document:
//!
//! ```toml
//! endpoint = "https://jira.example.com"
//! username = "fred"
//!
//! [ports]
//! JirasoapserviceV2 = "https://soap.example.com/rpc/soap/jirasoapservice-v2"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::consts::{ENDPOINT_CONFIG_FILE, ENV_USERNAME};
use crate::error::SoapError;
use crate::url::{endpoint_from_env, ensure_url_scheme};

/// Represents the configuration directories for soapbar
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
  pub cache_dir: Option<PathBuf>,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "soapbar").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
      data_dir: proj_dirs.data_dir().to_path_buf(),
      cache_dir: Some(proj_dirs.cache_dir().to_path_buf()),
    })
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &PathBuf {
    &self.config_dir
  }

  /// Get the data directory
  pub fn data_dir(&self) -> &PathBuf {
    &self.data_dir
  }

  /// Get the cache directory
  pub fn cache_dir(&self) -> Option<&PathBuf> {
    self.cache_dir.as_ref()
  }

  /// Initialize the configuration directories
  pub fn init(&self) -> Result<()> {
    fs::create_dir_all(&self.config_dir).context("Failed to create config directory")?;
    fs::create_dir_all(&self.data_dir).context("Failed to create data directory")?;
    if let Some(cache_dir) = &self.cache_dir {
      fs::create_dir_all(cache_dir).context("Failed to create cache directory")?;
    }
    Ok(())
  }

  /// Get the path to the endpoint configuration file
  pub fn endpoint_config_path(&self) -> PathBuf {
    self.config_dir.join(ENDPOINT_CONFIG_FILE)
  }

  /// Load the endpoint configuration from file or return default
  pub fn load_endpoint_config(&self) -> Result<EndpointConfig> {
    let config_path = self.endpoint_config_path();

    if config_path.exists() {
      let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read endpoint config from {}", config_path.display()))?;

      toml::from_str(&content)
        .with_context(|| format!("Failed to parse endpoint config from {}", config_path.display()))
    } else {
      Ok(EndpointConfig::default())
    }
  }

  /// Save the endpoint configuration to file
  pub fn save_endpoint_config(&self, config: &EndpointConfig) -> Result<()> {
    let config_path = self.endpoint_config_path();

    if let Some(parent) = config_path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(config).context("Failed to serialize endpoint config to TOML")?;

    fs::write(&config_path, content)
      .with_context(|| format!("Failed to write endpoint config to {}", config_path.display()))?;

    Ok(())
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// Where to reach the service and as whom
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
  /// Base URL of the server, e.g. `https://jira.example.com`
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub endpoint: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub username: Option<String>,

  /// Port name to full address overrides
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub ports: BTreeMap<String, String>,
}

impl EndpointConfig {
  /// The base URL to use: `SOAPBAR_ENDPOINT` if set, else the configured
  /// one.
  pub fn resolve_endpoint(&self) -> Result<Option<String>, SoapError> {
    if let Some(endpoint) = endpoint_from_env()? {
      return Ok(Some(endpoint));
    }
    self.endpoint.as_deref().map(ensure_url_scheme).transpose()
  }

  /// The user name to log in with: `SOAPBAR_USERNAME` if set, else the
  /// configured one.
  pub fn resolve_username(&self) -> Option<String> {
    std::env::var(ENV_USERNAME)
      .ok()
      .filter(|name| !name.trim().is_empty())
      .or_else(|| self.username.clone())
  }

  /// Store a normalised base URL
  pub fn set_endpoint(&mut self, endpoint: &str) -> Result<()> {
    self.endpoint = Some(ensure_url_scheme(endpoint)?);
    Ok(())
  }

  /// Store a normalised address override for one port
  pub fn set_port(&mut self, port: &str, address: &str) -> Result<()> {
    self.ports.insert(port.to_string(), ensure_url_scheme(address)?);
    Ok(())
  }
}
