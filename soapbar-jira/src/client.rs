use soapbar_core::{Bean, EntityRef, OperationDescriptor, SoapClient, SoapError, WireElement, WireValue};
use tracing::debug;

/// Typed stub for the `JirasoapserviceV2` port. Operations live in
/// `endpoints`, grouped by area.
#[derive(Debug, Clone)]
pub struct JiraSoapStub {
  pub(crate) soap: SoapClient,
}

impl JiraSoapStub {
  /// Create a stub for a full port address
  pub fn new(address: &str) -> Self {
    Self::from_client(SoapClient::new(address))
  }

  pub fn from_client(soap: SoapClient) -> Self {
    Self { soap }
  }

  pub fn endpoint(&self) -> &str {
    self.soap.endpoint()
  }

  /// Redirect this stub to another address
  pub fn set_endpoint(&mut self, address: &str) {
    self.soap.set_endpoint(address);
  }

  /// Call an operation returning a scalar or an array
  pub(crate) async fn call<V: WireValue>(
    &self,
    operation: &OperationDescriptor,
    args: Vec<WireElement>,
  ) -> Result<Option<V>, SoapError> {
    self.soap.invoke(operation, args).await?.decode_value(operation)
  }

  /// Call an operation returning a single bean; a nil or absent return is
  /// an error.
  pub(crate) async fn call_bean<T: Bean>(
    &self,
    operation: &OperationDescriptor,
    args: Vec<WireElement>,
  ) -> Result<T, SoapError> {
    self
      .soap
      .invoke(operation, args)
      .await?
      .decode(operation)?
      .ok_or(SoapError::MissingReturn(operation.name()))
  }

  /// Call an operation returning an array of beans. A nil array reads as
  /// empty.
  pub(crate) async fn call_beans<T: Bean>(
    &self,
    operation: &OperationDescriptor,
    args: Vec<WireElement>,
  ) -> Result<Vec<T>, SoapError> {
    let handles: Option<Vec<EntityRef<T>>> = self.call(operation, args).await?;
    let beans: Vec<T> = handles.iter().flatten().map(EntityRef::snapshot).collect();
    debug!("{} returned {} item(s)", operation.name(), beans.len());
    Ok(beans)
  }
}
