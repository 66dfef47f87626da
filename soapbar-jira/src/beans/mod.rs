//! # JIRA Beans
//!
//! The value objects exchanged with `jirasoapservice-v2`. Each bean embeds
//! its base bean by value (`RemoteEntity` → `NamedRemoteEntity` →
//! `ConstantEntity` → concrete type) and its descriptor lists the inherited
//! fields first, which is the order the server writes them in.

use soapbar_core::QName;

use crate::consts::{BEANS_NS, OPERATIONS_NS};

mod base;
mod constants;
mod issues;
mod permissions;
mod roles;
mod server;
mod users;

pub use base::{ConstantEntity, NamedRemoteEntity, RemoteEntity};
pub use constants::{IssueType, Priority, SecurityLevel};
pub use issues::{FieldValue, Filter, Worklog};
pub use permissions::{Permission, PermissionMapping, PermissionScheme, Scheme};
pub use roles::{Project, ProjectRole, ProjectRoleActors, RoleActor, RoleActors};
pub use server::{ServerInfo, TimeInfo};
pub use users::{Group, Principal, User};

/// A bean type in the JIRA bean namespace
pub(crate) const fn bean_type(local: &'static str) -> QName {
  QName::from_static(BEANS_NS, local)
}

/// One of the service's `ArrayOf_*` array types
pub(crate) const fn array_type(local: &'static str) -> QName {
  QName::from_static(OPERATIONS_NS, local)
}
