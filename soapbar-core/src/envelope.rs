//! # SOAP Envelopes
//!
//! Building RPC/encoded request envelopes and taking responses apart:
//! locating the return part, resolving `multiRef` siblings and turning
//! `soapenv:Fault` bodies into [`SoapFault`]s.

use std::fmt;

use crate::codec::{DecodeContext, EntityCodec};
use crate::descriptor::FieldDescriptor;
use crate::entity::Bean;
use crate::error::SoapError;
use crate::operation::OperationDescriptor;
use crate::qname::{QName, SOAP_ARRAY, ns};
use crate::value::WireValue;
use crate::wire::WireElement;

const ENVELOPE: QName = QName::from_static(ns::SOAP_ENV, "Envelope");
const BODY: QName = QName::from_static(ns::SOAP_ENV, "Body");
const ENCODING_STYLE: QName = QName::from_static(ns::SOAP_ENV, "encodingStyle");

/// Wrap encoded arguments in `soapenv:Envelope/soapenv:Body/ns:operation`.
pub fn request(operation: &OperationDescriptor, args: Vec<WireElement>) -> WireElement {
  let mut call = WireElement::new(operation.qname()).with_attribute(ENCODING_STYLE, ns::SOAP_ENC);
  call.children = args;

  WireElement::new(ENVELOPE).with_child(WireElement::new(BODY).with_child(call))
}

/// Serialise an envelope with an XML declaration
pub fn to_document(envelope: &WireElement) -> String {
  format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", envelope.to_xml())
}

/// Parse a response document. A body holding a `Fault` becomes
/// [`SoapError::Fault`].
pub fn parse_response(xml: &str) -> Result<SoapResponse, SoapError> {
  let mut envelope = WireElement::parse(xml)?;
  if envelope.name != ENVELOPE {
    return Err(SoapError::MalformedResponse(format!(
      "expected soapenv:Envelope, found {}",
      envelope.name
    )));
  }

  let position = envelope
    .children
    .iter()
    .position(|child| child.name == BODY)
    .ok_or_else(|| SoapError::MalformedResponse("envelope has no soapenv:Body".to_string()))?;
  let body = envelope.children.swap_remove(position);

  if let Some(fault) = body.child("Fault") {
    return Err(SoapError::Fault(SoapFault::from_element(fault)));
  }

  Ok(SoapResponse { body })
}

/// A SOAP fault returned by the server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoapFault {
  pub code: String,
  pub string: String,
  pub actor: Option<String>,
  /// Text content of the `detail` element
  pub detail: Option<String>,
}

impl SoapFault {
  pub fn from_element(fault: &WireElement) -> Self {
    let text = |local: &str| fault.child(local).map(text_content).filter(|text| !text.is_empty());
    Self {
      code: text("faultcode").unwrap_or_default(),
      string: text("faultstring").unwrap_or_default(),
      actor: text("faultactor"),
      detail: text("detail"),
    }
  }
}

impl fmt::Display for SoapFault {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.string)
  }
}

/// Concatenated, trimmed text of an element and its descendants
fn text_content(element: &WireElement) -> String {
  fn collect(element: &WireElement, out: &mut Vec<String>) {
    if let Some(text) = element.text.as_deref().map(str::trim).filter(|text| !text.is_empty()) {
      out.push(text.to_string());
    }
    for child in &element.children {
      collect(child, out);
    }
  }

  let mut parts = Vec::new();
  collect(element, &mut parts);
  parts.join("\n")
}

/// The body of a successful response
#[derive(Debug, Clone, PartialEq)]
pub struct SoapResponse {
  body: WireElement,
}

impl SoapResponse {
  pub fn body(&self) -> &WireElement {
    &self.body
  }

  /// Body children carrying an `id`, i.e. the `multiRef` values
  pub fn multi_refs(&self) -> impl Iterator<Item = &WireElement> {
    self.body.element_children().filter(|child| child.id().is_some())
  }

  /// The operation's response wrapper: the first body child that is not a
  /// `multiRef`.
  pub fn response_element(&self) -> Option<&WireElement> {
    self.body.element_children().find(|child| child.id().is_none())
  }

  /// The return part of `operation`, falling back to the first child of the
  /// response wrapper when it is named differently.
  pub fn return_value(&self, operation: &OperationDescriptor) -> Option<&WireElement> {
    let response = self.response_element()?;
    operation
      .return_name()
      .and_then(|name| response.child(name))
      .or_else(|| response.element_children().next())
  }

  /// Decode the return part as a scalar, array or bean handle.
  pub fn decode_value<V: WireValue>(&self, operation: &OperationDescriptor) -> Result<Option<V>, SoapError> {
    let Some(element) = self.return_value(operation) else {
      return Ok(None);
    };
    let field = FieldDescriptor::new(
      operation.name(),
      operation.return_name().unwrap_or(operation.name()),
      operation.return_type().cloned().unwrap_or(SOAP_ARRAY),
    );
    let mut ctx = DecodeContext::with_refs([&self.body]);
    Ok(V::decode_elements(&[element], &field, &mut ctx)?)
  }

  /// Decode the return part as a bean.
  pub fn decode<T: Bean>(&self, operation: &OperationDescriptor) -> Result<Option<T>, SoapError> {
    match self.return_value(operation) {
      Some(element) if !element.nil => {
        let mut ctx = DecodeContext::with_refs([&self.body]);
        Ok(Some(EntityCodec::decode_with(element, T::describe(), &mut ctx)?))
      }
      _ => Ok(None),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::qname::xsd;

  fn operation() -> OperationDescriptor {
    OperationDescriptor::new("urn:ops", "getNames")
      .param("in0", xsd::STRING)
      .returns("getNamesReturn", SOAP_ARRAY)
  }

  fn response(body: &str) -> String {
    format!(
      r#"<?xml version="1.0" encoding="utf-8"?>
      <soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"
                        xmlns:soapenc="http://schemas.xmlsoap.org/soap/encoding/"
                        xmlns:xsd="http://www.w3.org/2001/XMLSchema"
                        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
        <soapenv:Body>{body}</soapenv:Body>
      </soapenv:Envelope>"#
    )
  }

  #[test]
  fn test_request_wraps_arguments_in_operation_element() {
    let operation = operation();
    let argument = operation.arg(0, &"token".to_string()).unwrap();
    let document = to_document(&request(&operation, vec![argument]));

    assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(document.contains("<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\""));
    assert!(document.contains("<ns1:getNames soapenv:encodingStyle=\"http://schemas.xmlsoap.org/soap/encoding/\">"));
    assert!(document.contains("<in0 xsi:type=\"xsd:string\">token</in0>"));

    let parsed = WireElement::parse(&document).unwrap();
    let call = parsed.child("Body").and_then(|body| body.child("getNames")).unwrap();
    assert_eq!(call.name, QName::from_static("urn:ops", "getNames"));
  }

  #[test]
  fn test_return_value_decodes_with_multi_refs() {
    let xml = response(
      r##"<ns1:getNamesResponse xmlns:ns1="urn:ops">
            <getNamesReturn soapenc:arrayType="xsd:string[2]" xsi:type="soapenc:Array">
              <item href="#id0"/>
              <item>second</item>
            </getNamesReturn>
          </ns1:getNamesResponse>
          <multiRef id="id0" xsi:type="xsd:string">first</multiRef>"##,
    );

    let response = parse_response(&xml).unwrap();
    assert_eq!(response.multi_refs().count(), 1);
    let names: Option<Vec<String>> = response.decode_value(&operation()).unwrap();
    assert_eq!(names, Some(vec!["first".to_string(), "second".to_string()]));
  }

  #[test]
  fn test_missing_return_decodes_to_none() {
    let xml = response(r#"<ns1:getNamesResponse xmlns:ns1="urn:ops"/>"#);
    let names: Option<Vec<String>> = parse_response(&xml).unwrap().decode_value(&operation()).unwrap();
    assert_eq!(names, None);
  }

  #[test]
  fn test_fault_body_becomes_error() {
    let xml = response(
      r#"<soapenv:Fault>
            <faultcode>soapenv:Server.userException</faultcode>
            <faultstring>com.atlassian.jira.rpc.exception.RemoteAuthenticationException: Invalid username or password.</faultstring>
            <detail><ns1:hostname xmlns:ns1="http://xml.apache.org/axis/">jira01</ns1:hostname></detail>
          </soapenv:Fault>"#,
    );

    match parse_response(&xml) {
      Err(SoapError::Fault(fault)) => {
        assert_eq!(fault.code, "soapenv:Server.userException");
        assert!(fault.string.contains("Invalid username or password"));
        assert_eq!(fault.actor, None);
        assert_eq!(fault.detail.as_deref(), Some("jira01"));
      }
      other => panic!("expected fault, got {other:?}"),
    }
  }

  #[test]
  fn test_non_envelope_documents_are_rejected() {
    let error = parse_response("<html><body>502 Bad Gateway</body></html>").unwrap_err();
    assert!(matches!(error, SoapError::MalformedResponse(_)));
  }
}
