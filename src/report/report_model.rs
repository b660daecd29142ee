use serde::{Deserialize, Serialize};

use crate::error::FailureKind;

/// Outcome of applying one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Applied,
    NotFound,
    ApplyError,
}

/// Per-field application record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOutcome {
    pub field: String,
    pub status: FieldStatus,
    /// Failure detail, for the two non-applied statuses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl FieldOutcome {
    pub fn applied(field: &str) -> Self {
        FieldOutcome {
            field: field.to_string(),
            status: FieldStatus::Applied,
            detail: None,
        }
    }

    pub fn not_found(field: &str) -> Self {
        FieldOutcome {
            field: field.to_string(),
            status: FieldStatus::NotFound,
            detail: Some("no matching control on the configuration page".to_string()),
        }
    }

    pub fn apply_error(field: &str, detail: impl ToString) -> Self {
        FieldOutcome {
            field: field.to_string(),
            status: FieldStatus::ApplyError,
            detail: Some(detail.to_string()),
        }
    }

    pub fn is_applied(&self) -> bool {
        self.status == FieldStatus::Applied
    }
}

/// Per-run aggregation of field outcomes.
///
/// A run with some `not_found` fields is still a successful run if
/// navigation and save completed; partial configuration is visible here,
/// not in the run's success flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub applied: usize,
    pub failed: usize,
    pub failed_fields: Vec<String>,
    pub outcomes: Vec<FieldOutcome>,
    /// SHA-1 of the flattened settings this report was produced from.
    pub config_fingerprint: String,
}

impl Report {
    /// Aggregate per-field outcomes, computing counts.
    pub fn from_outcomes(config_fingerprint: &str, outcomes: Vec<FieldOutcome>) -> Self {
        let applied = outcomes.iter().filter(|o| o.is_applied()).count();
        let failed = outcomes.len() - applied;
        let failed_fields = outcomes
            .iter()
            .filter(|o| !o.is_applied())
            .map(|o| o.field.clone())
            .collect();
        Report {
            applied,
            failed,
            failed_fields,
            outcomes,
            config_fingerprint: config_fingerprint.to_string(),
        }
    }

    /// Report for a run that never reached field application.
    pub fn empty(config_fingerprint: &str) -> Self {
        Report::from_outcomes(config_fingerprint, Vec::new())
    }

    pub fn all_applied(&self) -> bool {
        self.failed == 0
    }
}

/// The shareable result of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Shareable estimate URL.
    pub url: String,
    pub config_name: String,
    pub config_description: String,
}

/// Terminal success of the navigation state machine.
#[derive(Debug, Clone)]
pub struct RunSuccess {
    pub artifact: Artifact,
    pub report: Report,
}

/// Terminal failure: which stage gave up, plus whatever field outcomes had
/// been accumulated by then.
#[derive(Debug)]
pub struct RunFailure {
    pub kind: FailureKind,
    pub partial_report: Report,
}

pub type RunResult = Result<RunSuccess, RunFailure>;

/// Flat, serializable view of a run for JSON output and run-all
/// aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub preset: String,
    pub service: String,
    pub succeeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact: Option<Artifact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_code: Option<String>,
    pub report: Report,
}

impl RunSummary {
    pub fn from_result(preset: &str, service: &str, result: &RunResult) -> Self {
        match result {
            Ok(success) => RunSummary {
                preset: preset.to_string(),
                service: service.to_string(),
                succeeded: true,
                artifact: Some(success.artifact.clone()),
                failure: None,
                failure_code: None,
                report: success.report.clone(),
            },
            Err(failure) => RunSummary {
                preset: preset.to_string(),
                service: service.to_string(),
                succeeded: false,
                artifact: None,
                failure: Some(failure.kind.to_string()),
                failure_code: Some(failure.kind.code().to_string()),
                report: failure.partial_report.clone(),
            },
        }
    }
}
