//! Constants for the soapbar binary.

/// Overrides the `-v` count (0 to 3)
pub const ENV_VERBOSITY: &str = "SOAPBAR_VERBOSITY";

/// Password to log in with, skipping the prompt
pub const ENV_PASSWORD: &str = "SOAPBAR_PASSWORD";
