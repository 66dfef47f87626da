//! # Operations
//!
//! Static descriptions of RPC operations: the operation element, its ordered
//! parameters, the return part and the `SOAPAction` header.

use crate::codec::{EncodeContext, EntityCodec};
use crate::entity::Bean;
use crate::error::CodecError;
use crate::qname::QName;
use crate::value::WireValue;
use crate::wire::WireElement;

/// One positional parameter of an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
  name: &'static str,
  wire_type: QName,
}

impl ParameterDescriptor {
  pub const fn name(&self) -> &'static str {
    self.name
  }

  pub const fn wire_type(&self) -> &QName {
    &self.wire_type
  }
}

/// Wire shape of one RPC operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
  name: &'static str,
  namespace: &'static str,
  parameters: Vec<ParameterDescriptor>,
  return_name: Option<&'static str>,
  return_type: Option<QName>,
  soap_action: &'static str,
}

impl OperationDescriptor {
  /// Describe an operation without parameters, return value or action
  pub fn new(namespace: &'static str, name: &'static str) -> Self {
    Self {
      name,
      namespace,
      parameters: Vec::new(),
      return_name: None,
      return_type: None,
      soap_action: "",
    }
  }

  /// Append a positional parameter
  pub fn param(mut self, name: &'static str, wire_type: QName) -> Self {
    self.parameters.push(ParameterDescriptor { name, wire_type });
    self
  }

  /// Declare the return part
  pub fn returns(mut self, name: &'static str, wire_type: QName) -> Self {
    self.return_name = Some(name);
    self.return_type = Some(wire_type);
    self
  }

  pub fn with_soap_action(mut self, soap_action: &'static str) -> Self {
    self.soap_action = soap_action;
    self
  }

  pub const fn name(&self) -> &'static str {
    self.name
  }

  pub const fn namespace(&self) -> &'static str {
    self.namespace
  }

  /// Qualified name of the operation element in the request body
  pub fn qname(&self) -> QName {
    QName::from_static(self.namespace, self.name)
  }

  pub fn parameters(&self) -> &[ParameterDescriptor] {
    &self.parameters
  }

  pub const fn return_name(&self) -> Option<&'static str> {
    self.return_name
  }

  pub fn return_type(&self) -> Option<&QName> {
    self.return_type.as_ref()
  }

  pub const fn soap_action(&self) -> &'static str {
    self.soap_action
  }

  fn parameter(&self, index: usize) -> Result<&ParameterDescriptor, CodecError> {
    self.parameters.get(index).ok_or(CodecError::UnknownParameter {
      operation: self.name,
      index,
    })
  }

  /// Encode a scalar or array argument for the parameter at `index`.
  pub fn arg<V: WireValue>(&self, index: usize, value: &V) -> Result<WireElement, CodecError> {
    let parameter = self.parameter(index)?;
    value.encode_value(
      QName::unqualified(parameter.name),
      &parameter.wire_type,
      &mut EncodeContext::new(),
    )
  }

  /// Encode a bean argument for the parameter at `index`.
  pub fn bean_arg<T: Bean>(&self, index: usize, bean: &T) -> Result<WireElement, CodecError> {
    let parameter = self.parameter(index)?;
    EntityCodec::encode_with(
      bean,
      T::describe(),
      QName::unqualified(parameter.name),
      &mut EncodeContext::new(),
    )
  }

  /// An `xsi:nil` argument for the parameter at `index`
  pub fn nil_arg(&self, index: usize) -> Result<WireElement, CodecError> {
    let parameter = self.parameter(index)?;
    Ok(WireElement::nil(parameter.name))
  }
}
