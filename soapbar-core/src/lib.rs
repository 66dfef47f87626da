//! # Soapbar Core
//!
//! Generic, schema independent building blocks for talking to SOAP 1.1
//! RPC/encoded services with strongly typed Rust values:
//!
//! - [`descriptor`]: per-type field tables ([`TypeDescriptor`],
//!   [`FieldDescriptor`]) that drive marshalling.
//! - [`wire`]: an owned XML element tree ([`WireElement`]) with parsing and
//!   serialisation.
//! - [`codec`]: the table-driven [`EntityCodec`] that maps beans to wire
//!   elements and back, including `href`/`multiRef` resolution.
//! - [`semantics`]: cycle safe structural equality and hashing.
//! - [`envelope`], [`operation`] and [`client`]: request envelopes, response
//!   parsing, SOAP faults and the HTTP caller.
//! - [`config`] and [`url`]: endpoint configuration shared by clients and the
//!   CLI.

pub mod client;
pub mod codec;
pub mod config;
pub mod consts;
pub mod descriptor;
pub mod entity;
pub mod envelope;
pub mod error;
mod macros;
pub mod operation;
pub mod qname;
pub mod semantics;
pub mod url;
pub mod value;
pub mod wire;

pub use client::SoapClient;
pub use codec::{DecodeContext, EncodeContext, EntityCodec};
pub use config::{ConfigDirs, EndpointConfig, get_config_dirs};
pub use descriptor::{FieldDescriptor, TypeDescriptor, TypeDescriptorBuilder};
pub use entity::{Bean, EntityRef};
pub use envelope::{SoapFault, SoapResponse};
pub use error::{CodecError, SoapError};
pub use operation::{OperationDescriptor, ParameterDescriptor};
pub use qname::QName;
pub use semantics::VisitGuard;
pub use value::{FieldSlot, WireValue};
pub use wire::{ArrayType, WireElement};

#[doc(hidden)]
pub mod __private {
  pub use std::sync::LazyLock;
}
