//! # SOAP Client
//!
//! HTTP transport for RPC/encoded calls: one POST per operation, with the
//! response body turned into a [`SoapResponse`] or an error.

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::{debug, instrument, trace, warn};

use crate::consts;
use crate::envelope::{self, SoapResponse};
use crate::error::SoapError;
use crate::operation::OperationDescriptor;
use crate::wire::WireElement;

/// Posts RPC/encoded envelopes to one endpoint
#[derive(Debug, Clone)]
pub struct SoapClient {
  pub(crate) client: Client,
  pub(crate) endpoint: String,
}

impl SoapClient {
  /// Create a client for an endpoint address
  pub fn new(endpoint: &str) -> Self {
    Self::with_client(Client::new(), endpoint)
  }

  /// Create a client reusing an existing HTTP client
  pub fn with_client(client: Client, endpoint: &str) -> Self {
    Self {
      client,
      endpoint: endpoint.to_string(),
    }
  }

  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }

  /// Point subsequent calls at another address
  pub fn set_endpoint(&mut self, endpoint: &str) {
    self.endpoint = endpoint.to_string();
  }

  /// Call an operation with already encoded arguments.
  ///
  /// Non-success responses carrying a SOAP fault surface as
  /// [`SoapError::Fault`]; anything else as [`SoapError::Http`].
  #[instrument(skip_all, fields(operation = operation.name(), endpoint = %self.endpoint))]
  pub async fn invoke(
    &self,
    operation: &OperationDescriptor,
    args: Vec<WireElement>,
  ) -> Result<SoapResponse, SoapError> {
    let document = envelope::to_document(&envelope::request(operation, args));
    debug!("Calling {}", operation.name());
    trace!("Request envelope: {}", document);

    let response = self
      .client
      .post(&self.endpoint)
      .header(CONTENT_TYPE, "text/xml; charset=utf-8")
      .header(USER_AGENT, consts::USER_AGENT)
      .header("SOAPAction", format!("\"{}\"", operation.soap_action()))
      .body(document)
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;
    trace!("Response envelope ({}): {}", status, body);

    let parsed = envelope::parse_response(&body);
    match parsed {
      Err(SoapError::Fault(fault)) => {
        warn!("{} failed with SOAP fault: {}", operation.name(), fault);
        Err(SoapError::Fault(fault))
      }
      _ if !status.is_success() => {
        warn!("{} failed with HTTP {}", operation.name(), status);
        Err(SoapError::Http {
          status: status.as_u16(),
          body,
        })
      }
      parsed => parsed,
    }
  }
}
