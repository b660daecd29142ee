use crate::report::report_model::{FieldStatus, RunSummary};

// ============================================================================
// Console reporter — formatted terminal output
// ============================================================================

/// Format one run summary for terminal output.
///
/// Produces output like:
/// ```text
/// ✓ OK    basic — Amazon Example Service (2 applied, 0 failed)
///     https://calculator.example.com/estimate?id=abc123
/// ✗ FAIL  heavy — Amazon Example Service (3 applied, 1 failed)
///     [not_found] provisioned_concurrency — no matching control on the configuration page
///     Service 'Amazon Example Service' not found under any candidate name
/// ```
pub fn format_run_summary(summary: &RunSummary) -> String {
    let mut out = String::new();

    let marker = if summary.succeeded {
        "\u{2713} OK  "
    } else {
        "\u{2717} FAIL"
    };

    out.push_str(&format!(
        "{}  {} — {} ({} applied, {} failed)\n",
        marker, summary.preset, summary.service, summary.report.applied, summary.report.failed
    ));

    if let Some(ref artifact) = summary.artifact {
        out.push_str(&format!("    {}\n", artifact.url));
    }

    for outcome in &summary.report.outcomes {
        let status = match outcome.status {
            FieldStatus::Applied => continue,
            FieldStatus::NotFound => "not_found",
            FieldStatus::ApplyError => "apply_error",
        };
        let detail = outcome.detail.as_deref().unwrap_or("no detail");
        out.push_str(&format!("    [{}] {} — {}\n", status, outcome.field, detail));
    }

    if let Some(ref failure) = summary.failure {
        out.push_str(&format!("    {}\n", failure));
    }

    out
}

/// Format a batch of run summaries with a closing tally.
pub fn format_batch(summaries: &[RunSummary]) -> String {
    let mut out = String::new();

    for summary in summaries {
        out.push_str(&format_run_summary(summary));
    }

    let succeeded = summaries.iter().filter(|s| s.succeeded).count();
    let failed = summaries.len() - succeeded;
    out.push_str(&format!(
        "\n=== Results: {} succeeded, {} failed ({} total) ===\n",
        succeeded,
        failed,
        summaries.len()
    ));

    out
}
