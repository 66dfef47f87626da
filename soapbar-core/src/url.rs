//! URL helpers for endpoint addresses.
//!
//! Endpoints are typed by hand into config files and flags, so they are
//! normalised before use: a missing scheme means `https://`, a mangled one
//! (`http:/host`) is repaired and a lone trailing `/` is dropped.

use url::{Position, Url};

use crate::consts::ENV_ENDPOINT;
use crate::error::SoapError;

/// Read the `SOAPBAR_ENDPOINT` override, normalised. `None` when unset or
/// blank.
pub fn endpoint_from_env() -> Result<Option<String>, SoapError> {
  match std::env::var(ENV_ENDPOINT) {
    Ok(value) if !value.trim().is_empty() => ensure_url_scheme(&value).map(Some),
    _ => Ok(None),
  }
}

/// Append a path to a base URL, joining with exactly one `/`.
pub fn join_path(base: &str, path: &str) -> String {
  format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Normalize a URL by removing trailing slashes from the path when it's just
/// "/".
fn normalize_url(url: &Url) -> String {
  let mut result = String::new();
  result.push_str(&url[..Position::BeforePath]);

  let path = url.path();
  if path != "/" {
    result.push_str(path);
  }

  if let Some(query) = url.query() {
    result.push('?');
    result.push_str(query);
  }

  if let Some(fragment) = url.fragment() {
    result.push('#');
    result.push_str(fragment);
  }

  result
}

fn invalid(input: &str, reason: &str) -> SoapError {
  SoapError::InvalidEndpoint {
    endpoint: input.to_string(),
    reason: reason.to_string(),
  }
}

/// Parse a URL by prefixing it with https:// scheme.
fn parse_with_https_prefix(input: &str) -> Result<Url, SoapError> {
  let mut candidate = input;

  if let Some(colon_index) = input.find(':') {
    let potential_scheme = &input[..colon_index];
    if ["http", "https"]
      .iter()
      .any(|scheme| potential_scheme.eq_ignore_ascii_case(scheme))
    {
      let remainder = input[colon_index + 1..].trim_start_matches('/');
      if !remainder.is_empty() {
        candidate = remainder;
      }
    }
  }

  Url::parse(&format!("https://{candidate}")).map_err(|error| invalid(input, &error.to_string()))
}

/// Ensure an endpoint has a proper scheme (http:// or https://).
///
/// If the input doesn't include a scheme, assumes https://. Also handles
/// malformed schemes like "http:/example.com" (missing slash).
pub fn ensure_url_scheme(input: &str) -> Result<String, SoapError> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(invalid(input, "endpoint cannot be empty"));
  }

  let lowered = trimmed.to_ascii_lowercase();
  let mangled = (lowered.starts_with("http:") && !lowered.starts_with("http://"))
    || (lowered.starts_with("https:") && !lowered.starts_with("https://"));
  if mangled {
    let remainder = trimmed.split_once(':').map(|(_, rest)| rest).unwrap_or("");
    return parse_with_https_prefix(remainder.trim_start_matches('/')).map(|url| normalize_url(&url));
  }

  let url = match Url::parse(trimmed) {
    Ok(url) if url.scheme().len() > 1 && url.host().is_some() => url,
    _ => parse_with_https_prefix(trimmed)?,
  };

  Ok(normalize_url(&url))
}
