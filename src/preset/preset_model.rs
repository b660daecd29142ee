use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar setting value. Presets never carry anything richer; structure
/// comes from nesting groups, not from compound values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl SettingValue {
    /// Render the value the way it should be typed into a text input.
    /// Whole numbers lose the trailing ".0" (the calculator rejects "3.0"
    /// in integer-only fields).
    pub fn as_field_text(&self) -> String {
        match self {
            SettingValue::Flag(b) => b.to_string(),
            SettingValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 9e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            SettingValue::Text(s) => s.clone(),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_field_text())
    }
}

/// One leaf setting: stable logical field name plus its scalar value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub field: String,
    pub value: SettingValue,
}

/// A complete configuration for one run, flattened from a preset file.
///
/// Nested groups in the preset become dotted field names
/// (`"lambda.requests_per_month"`), preserving the author's ordering. Field
/// names are unique within a configuration; the loader rejects duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub name: String,
    pub description: String,
    /// Display-only expected cost from the preset; never applied to the UI.
    pub estimated_cost: Option<String>,
    pub settings: Vec<Setting>,
}

impl Configuration {
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.settings.iter().map(|s| s.field.as_str())
    }
}
