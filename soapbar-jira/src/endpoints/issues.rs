//! # Issue Endpoints
//!
//! Saved filters and work logs.

use soapbar_core::SoapError;
use tracing::{info, instrument};

use crate::beans::{Filter, Worklog};
use crate::client::JiraSoapStub;
use crate::operations::{ADD_WORKLOG_AND_AUTO_ADJUST_REMAINING_ESTIMATE, GET_FAVOURITE_FILTERS, GET_WORKLOGS};

impl JiraSoapStub {
  #[instrument(skip_all)]
  pub async fn get_favourite_filters(&self, token: &str) -> Result<Vec<Filter>, SoapError> {
    self
      .call_beans(&GET_FAVOURITE_FILTERS, vec![GET_FAVOURITE_FILTERS.arg(0, &token.to_string())?])
      .await
  }

  #[instrument(skip(self, token))]
  pub async fn get_worklogs(&self, token: &str, issue_key: &str) -> Result<Vec<Worklog>, SoapError> {
    let args = vec![
      GET_WORKLOGS.arg(0, &token.to_string())?,
      GET_WORKLOGS.arg(1, &issue_key.to_string())?,
    ];
    self.call_beans(&GET_WORKLOGS, args).await
  }

  /// Log work on an issue, reducing its remaining estimate by the time
  /// spent. Returns the entry as stored by the server.
  #[instrument(skip(self, token, worklog))]
  pub async fn add_worklog_and_auto_adjust_remaining_estimate(
    &self,
    token: &str,
    issue_key: &str,
    worklog: &Worklog,
  ) -> Result<Worklog, SoapError> {
    let operation = &*ADD_WORKLOG_AND_AUTO_ADJUST_REMAINING_ESTIMATE;
    let args = vec![
      operation.arg(0, &token.to_string())?,
      operation.arg(1, &issue_key.to_string())?,
      operation.bean_arg(2, worklog)?,
    ];
    let stored: Worklog = self.call_bean(operation, args).await?;
    info!(
      "Logged {} on {}",
      stored.time_spent.as_deref().unwrap_or("work"),
      issue_key
    );
    Ok(stored)
  }
}
