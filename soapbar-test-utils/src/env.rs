//! Environment variable management for testing
//!
//! This module provides utilities for managing XDG and other environment
//! variables during testing. Tests that touch the environment should also be
//! marked `#[serial]`, since the process environment is shared.

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

/// A test environment that overrides XDG directories to use a per-test
/// temporary directory
pub struct EnvTestGuard {
  /// The temporary directory that will be used for XDG directories
  pub temp_dir: TempDir,
  original_config_home: Option<String>,
  original_data_home: Option<String>,
  original_cache_home: Option<String>,
}

impl Default for EnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl EnvTestGuard {
  /// XDG environment variable names
  pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";
  pub const XDG_DATA_HOME: &'static str = "XDG_DATA_HOME";
  pub const XDG_CACHE_HOME: &'static str = "XDG_CACHE_HOME";

  /// Create a new test environment with overridden XDG directories
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    let original_config_home = env::var(Self::XDG_CONFIG_HOME).ok();
    let original_data_home = env::var(Self::XDG_DATA_HOME).ok();
    let original_cache_home = env::var(Self::XDG_CACHE_HOME).ok();

    let temp_path = temp_dir.path().to_path_buf();
    unsafe {
      env::set_var(Self::XDG_CONFIG_HOME, temp_path.join("config"));
      env::set_var(Self::XDG_DATA_HOME, temp_path.join("data"));
      env::set_var(Self::XDG_CACHE_HOME, temp_path.join("cache"));
    }

    for dir in ["config", "data", "cache"] {
      std::fs::create_dir_all(temp_path.join(dir)).expect("Failed to create XDG directory");
    }

    Self {
      temp_dir,
      original_config_home,
      original_data_home,
      original_cache_home,
    }
  }

  /// Get the path to the XDG config directory
  pub fn config_dir(&self) -> PathBuf {
    self.temp_dir.path().join("config")
  }

  /// Get the path to the XDG data directory
  pub fn data_dir(&self) -> PathBuf {
    self.temp_dir.path().join("data")
  }

  /// Get the path to the XDG cache directory
  pub fn cache_dir(&self) -> PathBuf {
    self.temp_dir.path().join("cache")
  }
}

impl Drop for EnvTestGuard {
  fn drop(&mut self) {
    restore(Self::XDG_CONFIG_HOME, self.original_config_home.as_deref());
    restore(Self::XDG_DATA_HOME, self.original_data_home.as_deref());
    restore(Self::XDG_CACHE_HOME, self.original_cache_home.as_deref());
  }
}

/// Sets or removes one environment variable and puts the original value back
/// on drop
pub struct EnvVarGuard {
  name: String,
  original: Option<String>,
}

impl EnvVarGuard {
  /// Remember the current value of `name`
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      original: env::var(name).ok(),
    }
  }

  pub fn set(&self, value: &str) {
    unsafe {
      env::set_var(&self.name, value);
    }
  }

  pub fn remove(&self) {
    unsafe {
      env::remove_var(&self.name);
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    restore(&self.name, self.original.as_deref());
  }
}

fn restore(name: &str, original: Option<&str>) {
  match original {
    Some(value) => unsafe {
      env::set_var(name, value);
    },
    None => unsafe {
      env::remove_var(name);
    },
  }
}
