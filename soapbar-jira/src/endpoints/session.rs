//! # Session Endpoints
//!
//! Logging in and out, and the server description.

use soapbar_core::SoapError;
use tracing::{info, instrument};

use crate::beans::ServerInfo;
use crate::client::JiraSoapStub;
use crate::operations::{GET_SERVER_INFO, LOGIN, LOGOUT};

impl JiraSoapStub {
  /// Log in and return the session token
  #[instrument(skip(self, password))]
  pub async fn login(&self, username: &str, password: &str) -> Result<String, SoapError> {
    let args = vec![
      LOGIN.arg(0, &username.to_string())?,
      LOGIN.arg(1, &password.to_string())?,
    ];
    let token = self.call::<String>(&LOGIN, args).await?;
    let token = token.ok_or(SoapError::MissingReturn(LOGIN.name()))?;
    info!("Logged in as {}", username);
    Ok(token)
  }

  /// End the session. Returns whether the server knew the token.
  #[instrument(skip_all)]
  pub async fn logout(&self, token: &str) -> Result<bool, SoapError> {
    let logged_out = self.call::<bool>(&LOGOUT, vec![LOGOUT.arg(0, &token.to_string())?]).await?;
    Ok(logged_out.unwrap_or(false))
  }

  #[instrument(skip_all)]
  pub async fn get_server_info(&self, token: &str) -> Result<ServerInfo, SoapError> {
    self
      .call_bean(&GET_SERVER_INFO, vec![GET_SERVER_INFO.arg(0, &token.to_string())?])
      .await
  }
}
