use serde::{Deserialize, Serialize};

use crate::catalog::catalog_model::ControlKind;
use crate::preset::preset_model::SettingValue;
use crate::resolver::field_spec::FieldSpec;

/// Per-service table that parameterizes the generic navigator: how to find
/// the service on the catalog surface, how to recognize its configuration
/// form, and how logical field names map onto the calculator's controls.
///
/// One YAML file per service replaces one hand-written configurator per
/// service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceProfile {
    /// Display name, used in output and traces.
    pub service: String,

    /// Candidate names tried in order against the service search: exact
    /// product name first, then shortened aliases.
    pub search_candidates: Vec<String>,

    /// Label of the catalog's service search box.
    #[serde(default = "default_search_box_label")]
    pub search_box_label: String,

    #[serde(default)]
    pub search_box_aliases: Vec<String>,

    /// Label of the save/commit button on the configuration page.
    #[serde(default = "default_save_label")]
    pub save_label: String,

    #[serde(default = "default_save_aliases")]
    pub save_aliases: Vec<String>,

    /// CSS selector whose visibility marks the configuration form as ready.
    #[serde(default = "default_config_ready_selector")]
    pub config_ready_selector: String,

    /// CSS selector whose visibility confirms the save went through.
    #[serde(default = "default_confirmation_selector")]
    pub confirmation_selector: String,

    /// Optional CSS selector of the element carrying the shareable URL.
    /// When absent the post-save page URL is the artifact.
    #[serde(default)]
    pub result_link_selector: Option<String>,

    /// Field table. Settings without an entry get a derived spec.
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

fn default_search_box_label() -> String {
    "Search for a service".to_string()
}

fn default_save_label() -> String {
    "Save and add service".to_string()
}

fn default_save_aliases() -> Vec<String> {
    vec!["Add to my estimate".to_string(), "Save".to_string()]
}

fn default_config_ready_selector() -> String {
    "form".to_string()
}

fn default_confirmation_selector() -> String {
    "[role=dialog]".to_string()
}

impl ServiceProfile {
    /// A profile with no field table: every setting falls back to a derived
    /// spec. Good enough for services whose labels match their field names.
    pub fn generic(service: &str) -> Self {
        ServiceProfile {
            service: service.to_string(),
            search_candidates: vec![service.to_string()],
            search_box_label: default_search_box_label(),
            search_box_aliases: Vec::new(),
            save_label: default_save_label(),
            save_aliases: default_save_aliases(),
            config_ready_selector: default_config_ready_selector(),
            confirmation_selector: default_confirmation_selector(),
            result_link_selector: None,
            fields: Vec::new(),
        }
    }

    /// Table entry for a logical field name, if the profile has one.
    pub fn field_spec(&self, field: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.field == field)
    }

    /// Table entry or derived fallback for a setting.
    pub fn spec_for(&self, field: &str, value: &SettingValue) -> FieldSpec {
        if let Some(spec) = self.field_spec(field) {
            return spec.clone();
        }
        derived_spec(field, value)
    }

    /// Spec for the service search box.
    pub fn search_box_spec(&self) -> FieldSpec {
        let mut spec = FieldSpec::new("service_search", ControlKind::TextInput, &self.search_box_label);
        spec.aliases = self.search_box_aliases.clone();
        spec
    }

    /// Spec for the save button.
    pub fn save_button_spec(&self) -> FieldSpec {
        let mut spec = FieldSpec::new("save", ControlKind::Button, &self.save_label);
        spec.aliases = self.save_aliases.clone();
        spec
    }
}

/// Fallback mapping for settings the profile does not list: label from the
/// humanized last path segment, kind from the value type.
pub fn derived_spec(field: &str, value: &SettingValue) -> FieldSpec {
    let leaf = field.rsplit('.').next().unwrap_or(field);
    let label = humanize(leaf);
    let kind = match value {
        SettingValue::Flag(_) => ControlKind::Checkbox,
        SettingValue::Number(_) | SettingValue::Text(_) => ControlKind::TextInput,
    };
    FieldSpec::new(field, kind, &label)
}

/// "requests_per_month" -> "Requests per month".
pub fn humanize(field: &str) -> String {
    let mut words: Vec<String> = field
        .split(['_', '-'])
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect();

    if let Some(first) = words.first_mut() {
        let mut chars = first.chars();
        if let Some(c) = chars.next() {
            *first = c.to_uppercase().collect::<String>() + chars.as_str();
        }
    }

    words.join(" ")
}
