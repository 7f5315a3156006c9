use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

/// Lifecycle status of a state machine execution.
///
/// Statuses the listing API reports that we don't know about are kept
/// verbatim in `Unknown` rather than failing the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionStatus {
    Running,
    Succeeded,
    Failed,
    TimedOut,
    Aborted,
    PendingRedrive,
    Unknown(String),
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ExecutionStatus::Running => "RUNNING",
            ExecutionStatus::Succeeded => "SUCCEEDED",
            ExecutionStatus::Failed => "FAILED",
            ExecutionStatus::TimedOut => "TIMED_OUT",
            ExecutionStatus::Aborted => "ABORTED",
            ExecutionStatus::PendingRedrive => "PENDING_REDRIVE",
            ExecutionStatus::Unknown(s) => s.as_str(),
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ExecutionStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "RUNNING" => ExecutionStatus::Running,
            "SUCCEEDED" => ExecutionStatus::Succeeded,
            "FAILED" => ExecutionStatus::Failed,
            "TIMED_OUT" => ExecutionStatus::TimedOut,
            "ABORTED" => ExecutionStatus::Aborted,
            "PENDING_REDRIVE" => ExecutionStatus::PendingRedrive,
            _ => ExecutionStatus::Unknown(s.to_string()),
        }
    }
}

/// What to do with an execution whose input payload is not valid JSON.
///
/// - `Empty`: warn and carry on with a `null` document, so the row is
///   emitted with empty extracted cells (default).
/// - `Skip`: warn and emit nothing for that execution.
/// - `Abort`: fail the run with [`crate::errors::SfnviewError::MalformedInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MalformedInputPolicy {
    Empty,
    Skip,
    Abort,
}

impl Default for MalformedInputPolicy {
    fn default() -> Self {
        MalformedInputPolicy::Empty
    }
}
