//! Namespace-qualified names and the well known SOAP/XSD namespaces.

use std::borrow::Cow;
use std::fmt;

/// Well known namespace URIs.
pub mod ns {
  /// SOAP 1.1 envelope namespace
  pub const SOAP_ENV: &str = "http://schemas.xmlsoap.org/soap/envelope/";
  /// SOAP 1.1 encoding namespace
  pub const SOAP_ENC: &str = "http://schemas.xmlsoap.org/soap/encoding/";
  /// XML Schema instance namespace (`xsi:type`, `xsi:nil`)
  pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
  /// XML Schema namespace (built-in simple types)
  pub const XSD: &str = "http://www.w3.org/2001/XMLSchema";
}

/// Built-in XML Schema types understood by the codec.
pub mod xsd {
  use super::{QName, ns};

  pub const STRING: QName = QName::from_static(ns::XSD, "string");
  pub const LONG: QName = QName::from_static(ns::XSD, "long");
  pub const INT: QName = QName::from_static(ns::XSD, "int");
  pub const BOOLEAN: QName = QName::from_static(ns::XSD, "boolean");
  pub const DATE_TIME: QName = QName::from_static(ns::XSD, "dateTime");
}

/// `soapenc:Array`, the `xsi:type` of every encoded array.
pub const SOAP_ARRAY: QName = QName::from_static(ns::SOAP_ENC, "Array");

/// A namespace-qualified XML name. An empty namespace means unqualified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QName {
  namespace: Cow<'static, str>,
  local: Cow<'static, str>,
}

impl QName {
  /// Create a name from static strings, usable in `const` items
  pub const fn from_static(namespace: &'static str, local: &'static str) -> Self {
    Self {
      namespace: Cow::Borrowed(namespace),
      local: Cow::Borrowed(local),
    }
  }

  /// Create a name from owned or borrowed parts
  pub fn new(namespace: impl Into<Cow<'static, str>>, local: impl Into<Cow<'static, str>>) -> Self {
    Self {
      namespace: namespace.into(),
      local: local.into(),
    }
  }

  /// Create a name without a namespace
  pub fn unqualified(local: impl Into<Cow<'static, str>>) -> Self {
    Self::new("", local)
  }

  pub fn namespace(&self) -> &str {
    &self.namespace
  }

  pub fn local(&self) -> &str {
    &self.local
  }

  pub fn is_qualified(&self) -> bool {
    !self.namespace.is_empty()
  }

  /// Check namespace and local part at once
  pub fn matches(&self, namespace: &str, local: &str) -> bool {
    self.namespace == namespace && self.local == local
  }
}

/// Clark notation: `{namespace}local`, or just `local` when unqualified.
impl fmt::Display for QName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_qualified() {
      write!(f, "{{{}}}{}", self.namespace, self.local)
    } else {
      f.write_str(&self.local)
    }
  }
}
