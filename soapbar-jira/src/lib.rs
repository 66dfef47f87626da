//! # JIRA SOAP Client
//!
//! The `jirasoapservice-v2` bean schema, its operations and a typed stub,
//! built on the table driven marshalling in `soapbar-core`. A
//! [`ServiceLocator`] hands out [`JiraSoapStub`]s bound to the configured
//! endpoint.

pub mod beans;
mod client;
pub mod consts;
mod endpoints;
mod locator;
pub mod operations;

pub use beans::*;
pub use client::JiraSoapStub;
pub use locator::ServiceLocator;
