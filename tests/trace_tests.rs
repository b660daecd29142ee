use std::fs;
use std::path::PathBuf;

use calc_autofill::navigator::stage::Stage;
use calc_autofill::report::report_model::FieldOutcome;
use calc_autofill::trace::logger::TraceLogger;
use calc_autofill::trace::trace::TraceEvent;

fn scratch_path(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "calc-autofill-trace-{}-{}.jsonl",
        std::process::id(),
        tag
    ))
}

#[test]
fn events_append_as_one_json_object_per_line() {
    let path = scratch_path("append");
    let _ = fs::remove_file(&path);

    let logger = TraceLogger::new(path.to_str().expect("utf8 path"));
    logger.log(&TraceEvent::stage("baseline", Stage::Init));
    logger.log(
        &TraceEvent::stage("baseline", Stage::FieldsApplied)
            .with_outcome(&FieldOutcome::not_found("provisioned_concurrency")),
    );
    drop(logger);

    let content = fs::read_to_string(&path).expect("trace file");
    let _ = fs::remove_file(&path);

    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(lines[0]).expect("line 0 is JSON");
    assert_eq!(first["run"], "baseline");
    assert_eq!(first["stage"], "init");
    assert!(first.get("field").is_none());

    let second: serde_json::Value = serde_json::from_str(lines[1]).expect("line 1 is JSON");
    assert_eq!(second["stage"], "fields_applied");
    assert_eq!(second["field"], "provisioned_concurrency");
    assert_eq!(second["status"], "not_found");
}

#[test]
fn reopening_the_sink_appends_instead_of_truncating() {
    let path = scratch_path("reopen");
    let _ = fs::remove_file(&path);

    {
        let logger = TraceLogger::new(path.to_str().expect("utf8 path"));
        logger.log(&TraceEvent::stage("first", Stage::Init));
    }
    {
        let logger = TraceLogger::new(path.to_str().expect("utf8 path"));
        logger.log(&TraceEvent::stage("second", Stage::Init));
    }

    let content = fs::read_to_string(&path).expect("trace file");
    let _ = fs::remove_file(&path);
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn disabled_logger_drops_everything() {
    let logger = TraceLogger::disabled();
    // Must be a no-op, not a panic or a stray file
    logger.log(&TraceEvent::stage("ghost", Stage::Exported).with_detail("nothing"));
}
