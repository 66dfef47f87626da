//! SOAP response builders and wiremock helpers
//!
//! Responses are assembled as text so tests can feed the client exactly what
//! an Axis server would send, including `multiRef` siblings and faults.

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path of the JIRA SOAP endpoint relative to the server root
pub const JIRA_SOAP_PATH: &str = "/rpc/soap/jirasoapservice-v2";

/// Namespace of JIRA's operation elements
pub const JIRA_OPERATIONS_NS: &str = "http://soap.rpc.jira.atlassian.com";

/// Namespace of JIRA's beans
pub const JIRA_BEANS_NS: &str = "http://beans.soap.rpc.jira.atlassian.com";

/// Wrap body content in a SOAP 1.1 envelope declaring the usual prefixes
/// (`soapenv`, `soapenc`, `xsd`, `xsi`).
pub fn envelope(body: &str) -> String {
  format!(
    r#"<?xml version="1.0" encoding="utf-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns:soapenc="http://schemas.xmlsoap.org/soap/encoding/" xmlns:xsd="http://www.w3.org/2001/XMLSchema" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><soapenv:Body>{body}</soapenv:Body></soapenv:Envelope>"#
  )
}

/// An RPC response: `<ns1:{operation}Response>` holding `return_part`,
/// followed by any `multi_refs`. `ns2` is bound to the JIRA bean namespace.
pub fn response(operation: &str, return_part: &str, multi_refs: &str) -> String {
  envelope(&format!(
    r#"<ns1:{operation}Response soapenv:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/" xmlns:ns1="{JIRA_OPERATIONS_NS}" xmlns:ns2="{JIRA_BEANS_NS}">{return_part}</ns1:{operation}Response>{}"#,
    with_bean_namespace(multi_refs)
  ))
}

/// A `soapenv:Fault` envelope
pub fn fault(code: &str, message: &str) -> String {
  envelope(&format!(
    "<soapenv:Fault><faultcode>{code}</faultcode><faultstring>{message}</faultstring><detail/></soapenv:Fault>"
  ))
}

/// `multiRef` siblings need their own `ns2` declaration.
fn with_bean_namespace(multi_refs: &str) -> String {
  multi_refs.replace("<multiRef ", &format!("<multiRef xmlns:ns2=\"{JIRA_BEANS_NS}\" "))
}

/// Answer calls of `operation` on the JIRA endpoint with `body`.
pub async fn mount_soap(server: &MockServer, operation: &str, body: String) {
  Mock::given(method("POST"))
    .and(path(JIRA_SOAP_PATH))
    .and(body_string_contains(format!(":{operation} ")))
    .respond_with(ResponseTemplate::new(200).set_body_string(body))
    .mount(server)
    .await;
}

/// Answer calls of `operation` with an HTTP 500 fault.
pub async fn mount_soap_fault(server: &MockServer, operation: &str, code: &str, message: &str) {
  Mock::given(method("POST"))
    .and(path(JIRA_SOAP_PATH))
    .and(body_string_contains(format!(":{operation} ")))
    .respond_with(ResponseTemplate::new(500).set_body_string(fault(code, message)))
    .mount(server)
    .await;
}
