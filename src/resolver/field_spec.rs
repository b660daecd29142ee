use serde::{Deserialize, Serialize};

use crate::catalog::catalog_model::ControlKind;

/// How one logical setting maps onto the calculator's UI.
///
/// Profiles ship these per service; settings without an entry get a derived
/// spec (label from the humanized field name, kind from the value type).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Logical field name, stable across UI wording changes.
    pub field: String,

    pub kind: ControlKind,

    /// Primary label as the calculator currently words it.
    pub label: String,

    /// Position among controls sharing the primary label, when the page
    /// repeats it (e.g. one "Average requests per minute" per model tier).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<usize>,

    /// Known renames/synonyms, tried in order ("Key Management" vs "KMS").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl FieldSpec {
    pub fn new(field: &str, kind: ControlKind, label: &str) -> Self {
        FieldSpec {
            field: field.to_string(),
            kind,
            label: label.to_string(),
            ordinal: None,
            aliases: Vec::new(),
        }
    }

    pub fn with_ordinal(mut self, ordinal: usize) -> Self {
        self.ordinal = Some(ordinal);
        self
    }

    pub fn with_aliases(mut self, aliases: &[&str]) -> Self {
        self.aliases = aliases.iter().map(|s| s.to_string()).collect();
        self
    }
}
