//! Test utilities shared across the soapbar workspace
//!
//! This crate provides common testing infrastructure including:
//! - XDG directory mocking ([`EnvTestGuard`])
//! - Configuration directory testing ([`ConfigDirsTestGuard`])
//! - Scoped environment variables ([`EnvVarGuard`])
//! - SOAP response builders and wiremock helpers ([`soap`])
//!
//! This crate deliberately does not depend on `soapbar-core`, so the core
//! crate can use it as a dev-dependency. Responses are built as plain text.

#![allow(dead_code)]

pub mod config;
pub mod env;
pub mod soap;

// Re-export commonly used items
pub use config::{ConfigDirsTestGuard, setup_test_env, setup_test_env_with_init};
pub use env::{EnvTestGuard, EnvVarGuard};
