use std::fmt;

/// Stages of one configuration run, in forward order. `Failed` is terminal
/// and reachable from every other stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    ServiceSearch,
    ServiceSelected,
    ConfigPageReady,
    FieldsApplied,
    Saved,
    Exported,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::ServiceSearch => "service_search",
            Stage::ServiceSelected => "service_selected",
            Stage::ConfigPageReady => "config_page_ready",
            Stage::FieldsApplied => "fields_applied",
            Stage::Saved => "saved",
            Stage::Exported => "exported",
            Stage::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}
