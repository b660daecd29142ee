use std::fmt;

/// Session/bridge-level errors. Any of these means the browser side of a
/// run is unusable; they are never raised for a single missing field.
#[derive(Debug)]
pub enum EngineError {
    /// Node.js bridge subprocess failed to spawn
    SubprocessSpawn { script: String, source: std::io::Error },

    /// Reading from or writing to the bridge subprocess failed
    SessionIo(String),

    /// JSON parsing failed (bridge output or serde)
    JsonParse { context: String, source: serde_json::Error },

    /// JSON serialization failed (request to the bridge)
    JsonSerialize { context: String, source: serde_json::Error },

    /// The bridge answered a command with ok=false
    Protocol { command: String, error: String },

    /// DOM extraction returned an unexpected structure
    DomStructure(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::SubprocessSpawn { script, source } => {
                write!(f, "Failed to spawn {} (is Node.js installed?): {}", script, source)
            }
            EngineError::SessionIo(msg) => {
                write!(f, "Bridge I/O error: {}", msg)
            }
            EngineError::JsonParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            EngineError::JsonSerialize { context, source } => {
                write!(f, "JSON serialize error ({}): {}", context, source)
            }
            EngineError::Protocol { command, error } => {
                write!(f, "Bridge command '{}' failed: {}", command, error)
            }
            EngineError::DomStructure(msg) => {
                write!(f, "Unexpected DOM structure: {}", msg)
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::SubprocessSpawn { source, .. } => Some(source),
            EngineError::JsonParse { source, .. } => Some(source),
            EngineError::JsonSerialize { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Run-level failure kinds. Each aborts the remaining stages of the
/// navigation state machine and is returned with the partial report
/// accumulated so far.
#[derive(Debug)]
pub enum FailureKind {
    /// The browser session itself died or misbehaved
    Session(EngineError),

    /// No service candidate name matched anything on the catalog surface
    ServiceNotFound { service: String },

    /// The configuration form never appeared within its deadline
    NavigationTimeout { waited_ms: u64 },

    /// The save action ran but no confirmation appeared within its deadline
    SaveNotConfirmed { waited_ms: u64 },

    /// Save confirmed but no shareable URL could be read back
    NoArtifact,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Session(e) => write!(f, "Session error: {}", e),
            FailureKind::ServiceNotFound { service } => {
                write!(f, "Service '{}' not found under any candidate name", service)
            }
            FailureKind::NavigationTimeout { waited_ms } => {
                write!(f, "Configuration page did not appear within {}ms", waited_ms)
            }
            FailureKind::SaveNotConfirmed { waited_ms } => {
                write!(f, "Save was not confirmed within {}ms", waited_ms)
            }
            FailureKind::NoArtifact => {
                write!(f, "Save confirmed but no estimate URL was produced")
            }
        }
    }
}

impl std::error::Error for FailureKind {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FailureKind::Session(e) => Some(e),
            _ => None,
        }
    }
}

impl FailureKind {
    /// Short machine-readable name used in traces and JSON summaries.
    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::Session(_) => "session_error",
            FailureKind::ServiceNotFound { .. } => "service_not_found",
            FailureKind::NavigationTimeout { .. } => "navigation_timeout",
            FailureKind::SaveNotConfirmed { .. } => "save_not_confirmed",
            FailureKind::NoArtifact => "no_artifact",
        }
    }
}
