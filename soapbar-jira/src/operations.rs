//! # Operation Table
//!
//! Wire descriptions of the `jirasoapservice-v2` operations the stub calls.
//! Parameters are positional (`in0`, `in1`, ...) and `in0` is always the
//! session token, except for `login`.

use std::sync::LazyLock;

use soapbar_core::qname::xsd;
use soapbar_core::{OperationDescriptor, QName};

use crate::beans::{array_type, bean_type};
use crate::consts::OPERATIONS_NS;

fn operation(name: &'static str) -> OperationDescriptor {
  OperationDescriptor::new(OPERATIONS_NS, name)
}

/// An operation taking the session token and nothing else
fn token_operation(name: &'static str, return_name: &'static str, return_type: QName) -> OperationDescriptor {
  operation(name).param("in0", xsd::STRING).returns(return_name, return_type)
}

pub static LOGIN: LazyLock<OperationDescriptor> = LazyLock::new(|| {
  operation("login")
    .param("in0", xsd::STRING)
    .param("in1", xsd::STRING)
    .returns("loginReturn", xsd::STRING)
});

pub static LOGOUT: LazyLock<OperationDescriptor> =
  LazyLock::new(|| token_operation("logout", "logoutReturn", xsd::BOOLEAN));

pub static GET_SERVER_INFO: LazyLock<OperationDescriptor> =
  LazyLock::new(|| token_operation("getServerInfo", "getServerInfoReturn", bean_type("RemoteServerInfo")));

pub static GET_USER: LazyLock<OperationDescriptor> = LazyLock::new(|| {
  operation("getUser")
    .param("in0", xsd::STRING)
    .param("in1", xsd::STRING)
    .returns("getUserReturn", bean_type("RemoteUser"))
});

pub static GET_GROUP: LazyLock<OperationDescriptor> = LazyLock::new(|| {
  operation("getGroup")
    .param("in0", xsd::STRING)
    .param("in1", xsd::STRING)
    .returns("getGroupReturn", bean_type("RemoteGroup"))
});

pub static GET_PRIORITIES: LazyLock<OperationDescriptor> = LazyLock::new(|| {
  token_operation(
    "getPriorities",
    "getPrioritiesReturn",
    array_type("ArrayOf_tns1_RemotePriority"),
  )
});

pub static GET_ISSUE_TYPES: LazyLock<OperationDescriptor> = LazyLock::new(|| {
  token_operation(
    "getIssueTypes",
    "getIssueTypesReturn",
    array_type("ArrayOf_tns1_RemoteIssueType"),
  )
});

pub static GET_SUB_TASK_ISSUE_TYPES: LazyLock<OperationDescriptor> = LazyLock::new(|| {
  token_operation(
    "getSubTaskIssueTypes",
    "getSubTaskIssueTypesReturn",
    array_type("ArrayOf_tns1_RemoteIssueType"),
  )
});

/// `in1` is the project key
pub static GET_SECURITY_LEVELS: LazyLock<OperationDescriptor> = LazyLock::new(|| {
  operation("getSecurityLevels")
    .param("in0", xsd::STRING)
    .param("in1", xsd::STRING)
    .returns(
      "getSecurityLevelsReturn",
      array_type("ArrayOf_tns1_RemoteSecurityLevel"),
    )
});

pub static GET_FAVOURITE_FILTERS: LazyLock<OperationDescriptor> = LazyLock::new(|| {
  token_operation(
    "getFavouriteFilters",
    "getFavouriteFiltersReturn",
    array_type("ArrayOf_tns1_RemoteFilter"),
  )
});

pub static GET_PROJECT_ROLES: LazyLock<OperationDescriptor> = LazyLock::new(|| {
  token_operation(
    "getProjectRoles",
    "getProjectRolesReturn",
    array_type("ArrayOf_tns1_RemoteProjectRole"),
  )
});

pub static GET_PROJECT_ROLE_ACTORS: LazyLock<OperationDescriptor> = LazyLock::new(|| {
  operation("getProjectRoleActors")
    .param("in0", xsd::STRING)
    .param("in1", bean_type("RemoteProjectRole"))
    .param("in2", bean_type("RemoteProject"))
    .returns("getProjectRoleActorsReturn", bean_type("RemoteProjectRoleActors"))
});

pub static GET_PERMISSION_SCHEMES: LazyLock<OperationDescriptor> = LazyLock::new(|| {
  token_operation(
    "getPermissionSchemes",
    "getPermissionSchemesReturn",
    array_type("ArrayOf_tns1_RemotePermissionScheme"),
  )
});

/// `in1` is the issue key
pub static GET_WORKLOGS: LazyLock<OperationDescriptor> = LazyLock::new(|| {
  operation("getWorklogs")
    .param("in0", xsd::STRING)
    .param("in1", xsd::STRING)
    .returns("getWorklogsReturn", array_type("ArrayOf_tns1_RemoteWorklog"))
});

pub static ADD_WORKLOG_AND_AUTO_ADJUST_REMAINING_ESTIMATE: LazyLock<OperationDescriptor> = LazyLock::new(|| {
  operation("addWorklogAndAutoAdjustRemainingEstimate")
    .param("in0", xsd::STRING)
    .param("in1", xsd::STRING)
    .param("in2", bean_type("RemoteWorklog"))
    .returns(
      "addWorklogAndAutoAdjustRemainingEstimateReturn",
      bean_type("RemoteWorklog"),
    )
});

pub static GET_ALL_PERMISSIONS: LazyLock<OperationDescriptor> = LazyLock::new(|| {
  token_operation(
    "getAllPermissions",
    "getAllPermissionsReturn",
    array_type("ArrayOf_tns1_RemotePermission"),
  )
});
