//! Error types for marshalling and remote calls.

use thiserror::Error;

use crate::envelope::SoapFault;

/// Errors raised while mapping beans to and from wire elements
#[derive(Debug, Error)]
pub enum CodecError {
  /// A field that is not nillable was `None` at encode time.
  #[error("{type_name}.{field} is required but was not set")]
  Validation { type_name: &'static str, field: &'static str },

  /// A wire value could not be parsed as the declared type.
  #[error("cannot decode field `{field}`: expected {expected}, found {value:?}")]
  Decode {
    field: String,
    expected: String,
    value: String,
  },

  /// A string holds a character that XML 1.0 cannot carry.
  #[error("cannot encode field `{field}`: character {character:?} is not allowed in XML")]
  InvalidCharacter { field: String, character: char },

  /// The value graph loops back on itself and cannot be written as a tree.
  #[error("cannot encode {type_name}: the entity graph contains a cycle")]
  CyclicGraph { type_name: &'static str },

  /// An `href` pointed at an id that does not exist in the message.
  #[error("unresolved multiRef reference `#{0}`")]
  UnresolvedReference(String),

  /// An `href` id was already decoded as a different bean type.
  #[error("multiRef `#{id}` was already decoded as another type, expected {expected}")]
  ReferenceType { id: String, expected: &'static str },

  /// A prefixed value (`xsi:type`, `soapenc:arrayType`) used an undeclared
  /// prefix.
  #[error("undeclared namespace prefix `{0}`")]
  UnknownPrefix(String),

  /// A bean exposes a different number of slots than its descriptor has
  /// fields.
  #[error("{type_name} exposes {slots} field slots but its descriptor declares {fields}")]
  SlotMismatch {
    type_name: &'static str,
    slots: usize,
    fields: usize,
  },

  /// An operation argument index that the operation does not declare.
  #[error("operation `{operation}` has no parameter at position {index}")]
  UnknownParameter { operation: &'static str, index: usize },

  /// The document is not well-formed XML.
  #[error(transparent)]
  Xml(#[from] roxmltree::Error),
}

/// Errors raised by remote calls and the service locator
#[derive(Debug, Error)]
pub enum SoapError {
  /// Marshalling failed on either side of the exchange.
  #[error(transparent)]
  Codec(#[from] CodecError),

  /// The HTTP transport failed; propagated unchanged.
  #[error("transport error: {0}")]
  Transport(#[from] reqwest::Error),

  /// The server answered with a SOAP fault.
  #[error("SOAP fault: {0}")]
  Fault(SoapFault),

  /// The server answered with a non-success status and no parsable fault.
  #[error("unexpected HTTP {status}: {body}")]
  Http { status: u16, body: String },

  /// The response body did not contain the expected structure.
  #[error("malformed SOAP response: {0}")]
  MalformedResponse(String),

  /// The response carried no return value for an operation that has one.
  #[error("operation `{0}` returned no value")]
  MissingReturn(&'static str),

  /// The service locator does not know the requested port.
  #[error("unknown port `{0}`")]
  UnknownPort(String),

  /// The endpoint address could not be used.
  #[error("invalid endpoint `{endpoint}`: {reason}")]
  InvalidEndpoint { endpoint: String, reason: String },
}
