//! # JIRA SOAP Endpoints
//!
//! Typed operations on [`JiraSoapStub`](crate::JiraSoapStub), grouped by
//! area. Every operation except `login` takes the session token first.

mod constants;
mod issues;
mod projects;
mod session;
mod users;
