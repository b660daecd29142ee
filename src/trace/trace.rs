use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::report::report_model::{FieldOutcome, FieldStatus};

/// One line of the run trace. Written as JSONL so a failed run against the
/// live calculator can be replayed stage by stage afterwards.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,

    /// Preset name the run was started with.
    pub run: String,

    /// Navigator stage this event belongs to.
    pub stage: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl TraceEvent {
    pub fn stage(run: &str, stage: impl ToString) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            run: run.to_string(),
            stage: stage.to_string(),
            field: None,
            status: None,
            detail: None,
        }
    }

    pub fn with_outcome(mut self, outcome: &FieldOutcome) -> Self {
        self.field = Some(outcome.field.clone());
        self.status = Some(
            match outcome.status {
                FieldStatus::Applied => "applied",
                FieldStatus::NotFound => "not_found",
                FieldStatus::ApplyError => "apply_error",
            }
            .to_string(),
        );
        self.detail = outcome.detail.clone();
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }
}
