//! Constants for the JIRA SOAP service.

/// Namespace of the JIRA bean types
pub const BEANS_NS: &str = "http://beans.soap.rpc.jira.atlassian.com";

/// Namespace of the service definition
pub const SERVICE_NS: &str = "http://service.soap.rpc.jira.atlassian.com";

/// Namespace of the operation elements and the `ArrayOf_*` types
pub const OPERATIONS_NS: &str = "http://soap.rpc.jira.atlassian.com";

/// Local name of the service in [`SERVICE_NS`]
pub const SERVICE_NAME: &str = "JiraSoapServiceService";

/// The single port the service exposes
pub const PORT_NAME: &str = "JirasoapserviceV2";

/// Path of the port relative to the server base URL
pub const SOAP_PATH: &str = "/rpc/soap/jirasoapservice-v2";
