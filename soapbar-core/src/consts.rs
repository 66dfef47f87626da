//! Constants shared across soapbar components.

/// User-Agent header value sent with every SOAP call
pub const USER_AGENT: &str = concat!("soapbar/", env!("CARGO_PKG_VERSION"));

/// Environment variable overriding the configured endpoint base URL.
pub const ENV_ENDPOINT: &str = "SOAPBAR_ENDPOINT";

/// Environment variable supplying the login user name.
pub const ENV_USERNAME: &str = "SOAPBAR_USERNAME";

/// File name of the endpoint configuration inside the config directory.
pub const ENDPOINT_CONFIG_FILE: &str = "endpoint.toml";
