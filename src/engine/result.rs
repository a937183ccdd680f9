//! Execution result types

use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// How one step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Passed,
    Failed,
    Skipped,
}

/// Why a step did not pass.
///
/// Every variant is handled locally and converted into a [`StepResult`];
/// nothing here propagates as an unhandled failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StepError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("missing dependency: {0}")]
    MissingDependency(String),
}

/// Result of one step execution, immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub step: String,
    pub status: StepStatus,
    pub http_status: Option<u16>,
    pub outputs: HashMap<String, String>,
    pub error: Option<StepError>,
}

impl StepResult {
    pub fn passed(step: &str, http_status: u16, outputs: HashMap<String, String>) -> Self {
        Self {
            step: step.to_string(),
            status: StepStatus::Passed,
            http_status: Some(http_status),
            outputs,
            error: None,
        }
    }

    pub fn failed(step: &str, http_status: Option<u16>, error: StepError) -> Self {
        Self {
            step: step.to_string(),
            status: StepStatus::Failed,
            http_status,
            outputs: HashMap::new(),
            error: Some(error),
        }
    }

    pub fn skipped(step: &str, error: StepError) -> Self {
        Self {
            step: step.to_string(),
            status: StepStatus::Skipped,
            http_status: None,
            outputs: HashMap::new(),
            error: Some(error),
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == StepStatus::Passed
    }

    pub fn is_skipped(&self) -> bool {
        self.status == StepStatus::Skipped
    }
}

/// Result of a whole scenario run.
#[derive(Debug, Clone)]
pub struct Summary {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub results: Vec<StepResult>,
    /// Every non-skipped step passed.
    pub success: bool,
    /// A fatal step failed and the run stopped early.
    pub aborted: bool,
}

impl Summary {
    pub fn result(&self, step: &str) -> Option<&StepResult> {
        self.results.iter().find(|r| r.step == step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_constructors() {
        let passed = StepResult::passed("authenticate-admin", 200, HashMap::new());
        assert!(passed.is_passed());
        assert_eq!(passed.http_status, Some(200));

        let failed = StepResult::failed(
            "create-company-direct",
            Some(500),
            StepError::UnexpectedStatus {
                status: 500,
                body: "oops".to_string(),
            },
        );
        assert!(!failed.is_passed());
        assert!(!failed.is_skipped());
        assert!(failed.outputs.is_empty());

        let skipped = StepResult::skipped(
            "issue-api-key",
            StepError::MissingDependency("companyId".to_string()),
        );
        assert!(skipped.is_skipped());
        assert_eq!(skipped.http_status, None);
    }

    #[test]
    fn test_step_error_display() {
        let err = StepError::UnexpectedStatus {
            status: 401,
            body: r#"{"error":"invalid credentials"}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"unexpected status 401: {"error":"invalid credentials"}"#
        );

        let err = StepError::MissingDependency("publicKey".to_string());
        assert_eq!(err.to_string(), "missing dependency: publicKey");
    }

    #[test]
    fn test_summary_lookup_by_step() {
        let summary = Summary {
            run_id: "run-1".to_string(),
            started_at: Utc::now(),
            results: vec![StepResult::passed("authenticate-admin", 200, HashMap::new())],
            success: true,
            aborted: false,
        };

        assert!(summary.result("authenticate-admin").is_some());
        assert!(summary.result("issue-api-key").is_none());
    }
}
