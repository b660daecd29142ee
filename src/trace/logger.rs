use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

use crate::trace::trace::TraceEvent;

/// Appends trace events to a JSONL file, one event per line.
///
/// Tracing is best-effort: a sink that cannot be opened or written must
/// never fail a run against the live calculator. Problems are reported on
/// stderr and the event is dropped.
pub struct TraceLogger {
    sink: Option<Mutex<File>>,
}

impl TraceLogger {
    pub fn new(path: &str) -> Self {
        let sink = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .inspect_err(|e| eprintln!("trace disabled: cannot open '{}': {}", path, e))
            .ok()
            .map(Mutex::new);
        Self { sink }
    }

    /// A logger that drops everything. Used when tracing is disabled.
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn log(&self, event: &TraceEvent) {
        let Some(sink) = &self.sink else { return };

        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                eprintln!("trace event dropped: {}", e);
                return;
            }
        };

        match sink.lock() {
            Ok(mut file) => {
                if let Err(e) = writeln!(file, "{}", line) {
                    eprintln!("trace write failed: {}", e);
                }
            }
            Err(e) => eprintln!("trace lock poisoned: {}", e),
        }
    }
}
