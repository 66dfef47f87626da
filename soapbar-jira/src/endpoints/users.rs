//! # User and Group Endpoints

use soapbar_core::SoapError;
use tracing::instrument;

use crate::beans::{Group, User};
use crate::client::JiraSoapStub;
use crate::operations::{GET_GROUP, GET_USER};

impl JiraSoapStub {
  #[instrument(skip(self, token))]
  pub async fn get_user(&self, token: &str, username: &str) -> Result<User, SoapError> {
    let args = vec![
      GET_USER.arg(0, &token.to_string())?,
      GET_USER.arg(1, &username.to_string())?,
    ];
    self.call_bean(&GET_USER, args).await
  }

  /// Fetch a group with its members
  #[instrument(skip(self, token))]
  pub async fn get_group(&self, token: &str, group_name: &str) -> Result<Group, SoapError> {
    let args = vec![
      GET_GROUP.arg(0, &token.to_string())?,
      GET_GROUP.arg(1, &group_name.to_string())?,
    ];
    self.call_bean(&GET_GROUP, args).await
  }
}
