//! Configuration directory management for testing

use std::path::PathBuf;
use std::{env, fs};

use crate::env::EnvTestGuard;

/// The directories the application resolves under an overridden XDG
/// environment
pub struct ConfigDirsTestGuard {
  /// The configuration directory
  pub config_dir: PathBuf,
  /// The data directory
  pub data_dir: PathBuf,
  /// The cache directory (optional)
  pub cache_dir: Option<PathBuf>,
  /// The application name used for paths
  pub application: String,
}

impl ConfigDirsTestGuard {
  /// Resolve the directories for the `soapbar` application
  pub fn new() -> anyhow::Result<Self> {
    Self::with_name("soapbar")
  }

  /// Resolve the directories for a custom application name
  pub fn with_name(application: &str) -> anyhow::Result<Self> {
    let config_home =
      env::var(EnvTestGuard::XDG_CONFIG_HOME).map_err(|_| anyhow::anyhow!("XDG_CONFIG_HOME not set"))?;
    let data_home = env::var(EnvTestGuard::XDG_DATA_HOME).map_err(|_| anyhow::anyhow!("XDG_DATA_HOME not set"))?;
    let cache_home = env::var(EnvTestGuard::XDG_CACHE_HOME).ok();

    Ok(Self {
      config_dir: PathBuf::from(config_home).join(application),
      data_dir: PathBuf::from(data_home).join(application),
      cache_dir: cache_home.map(|dir| PathBuf::from(dir).join(application)),
      application: application.to_string(),
    })
  }

  /// Create the directories
  pub fn init(&self) -> anyhow::Result<()> {
    fs::create_dir_all(&self.config_dir).map_err(|e| anyhow::anyhow!("Failed to create config directory: {e}"))?;
    fs::create_dir_all(&self.data_dir).map_err(|e| anyhow::anyhow!("Failed to create data directory: {e}"))?;
    if let Some(cache_dir) = &self.cache_dir {
      fs::create_dir_all(cache_dir).map_err(|e| anyhow::anyhow!("Failed to create cache directory: {e}"))?;
    }
    Ok(())
  }

  /// Path of the endpoint configuration file
  pub fn endpoint_config_path(&self) -> PathBuf {
    self.config_dir.join("endpoint.toml")
  }

  /// Write a raw endpoint configuration file
  pub fn write_endpoint_config(&self, content: &str) -> anyhow::Result<()> {
    self.init()?;
    fs::write(self.endpoint_config_path(), content)
      .map_err(|e| anyhow::anyhow!("Failed to write endpoint config: {e}"))
  }
}

/// Set up an XDG test environment and the directories resolved inside it
pub fn setup_test_env() -> anyhow::Result<(EnvTestGuard, ConfigDirsTestGuard)> {
  let test_env = EnvTestGuard::new();
  let config_dirs = ConfigDirsTestGuard::new()?;
  Ok((test_env, config_dirs))
}

/// Like [`setup_test_env`], with the directories created
pub fn setup_test_env_with_init() -> anyhow::Result<(EnvTestGuard, ConfigDirsTestGuard)> {
  let (test_env, config_dirs) = setup_test_env()?;
  config_dirs.init()?;
  Ok((test_env, config_dirs))
}
