// src/source/aws.rs

//! Step Functions backend built on `aws-sdk-sfn`.

use std::future::Future;
use std::pin::Pin;

use aws_config::BehaviorVersion;
use aws_sdk_sfn::Client;
use aws_sdk_sfn::config::Region;
use aws_sdk_sfn::error::DisplayErrorContext;
use aws_sdk_sfn::primitives::DateTime as SmithyDateTime;
use aws_sdk_sfn::types::ExecutionListItem;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::errors::{Result, SfnviewError};
use crate::types::ExecutionStatus;

use super::backend::ExecutionBackend;
use super::{ExecutionDetail, ExecutionPage, ExecutionSummary, PageRequest};

/// Production backend talking to the Step Functions API.
#[derive(Debug, Clone)]
pub struct SfnBackend {
    client: Client,
}

impl SfnBackend {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the shared AWS configuration (`~/.aws/config`,
    /// environment, instance metadata), optionally overriding region and
    /// profile.
    ///
    /// Resolution problems are only warned about: the client is still
    /// constructed and the first remote call reports the real failure.
    pub async fn from_shared_config(region: Option<String>, profile: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }

        let sdk_config = loader.load().await;
        if sdk_config.region().is_none() {
            warn!(
                "{}",
                SfnviewError::ConfigError(
                    "no AWS region resolved; set --region, AWS_REGION or a profile region"
                        .to_string()
                )
            );
        }

        Self::new(Client::new(&sdk_config))
    }
}

impl ExecutionBackend for SfnBackend {
    fn list_executions(
        &mut self,
        request: PageRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionPage>> + Send + '_>> {
        let client = self.client.clone();

        Box::pin(async move {
            debug!(
                state_machine = %request.state_machine_arn,
                page_size = request.page_size,
                has_token = request.next_token.is_some(),
                "ListExecutions"
            );

            let max_results = i32::try_from(request.page_size).map_err(|_| {
                SfnviewError::ConfigError(format!(
                    "page size {} does not fit the listing API",
                    request.page_size
                ))
            })?;

            let output = client
                .list_executions()
                .state_machine_arn(request.state_machine_arn)
                .max_results(max_results)
                .set_next_token(request.next_token)
                .send()
                .await
                .map_err(|e| {
                    SfnviewError::RemoteError(format!(
                        "ListExecutions failed: {}",
                        DisplayErrorContext(&e)
                    ))
                })?;

            let executions = output
                .executions()
                .iter()
                .map(summary_from_item)
                .collect::<Result<Vec<_>>>()?;

            Ok(ExecutionPage {
                executions,
                next_token: output.next_token().map(str::to_string),
            })
        })
    }

    fn describe_execution(
        &mut self,
        execution_arn: String,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionDetail>> + Send + '_>> {
        let client = self.client.clone();

        Box::pin(async move {
            debug!(execution = %execution_arn, "DescribeExecution");

            let output = client
                .describe_execution()
                .execution_arn(execution_arn.as_str())
                .send()
                .await
                .map_err(|e| {
                    SfnviewError::RemoteError(format!(
                        "DescribeExecution {execution_arn} failed: {}",
                        DisplayErrorContext(&e)
                    ))
                })?;

            Ok(ExecutionDetail {
                input: output.input().map(str::to_string),
                execution_arn,
            })
        })
    }
}

/// Map one `ListExecutions` entry. Statuses newer than this build are kept
/// verbatim.
pub fn summary_from_item(item: &ExecutionListItem) -> Result<ExecutionSummary> {
    let start_date = to_chrono(item.start_date())?;
    let stop_date = item.stop_date().map(to_chrono).transpose()?;
    let status = ExecutionStatus::from(item.status().as_str());

    Ok(ExecutionSummary {
        execution_arn: item.execution_arn().to_string(),
        name: item.name().to_string(),
        start_date,
        stop_date,
        status,
    })
}

fn to_chrono(ts: &SmithyDateTime) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(ts.secs(), ts.subsec_nanos()).ok_or_else(|| {
        SfnviewError::RemoteError(format!("timestamp out of range: {} seconds", ts.secs()))
    })
}
