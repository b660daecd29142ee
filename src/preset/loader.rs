use std::collections::HashSet;
use std::error::Error;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::preset::preset_model::{Configuration, Setting, SettingValue};

/// On-disk preset shape. `settings` keeps the author's key order
/// (serde_json's preserve_order feature), which matters under aliasing:
/// two fields mapping to the same control apply in this order.
#[derive(Debug, Deserialize)]
struct PresetFile {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    estimated_cost: Option<String>,
    #[serde(default)]
    settings: serde_json::Map<String, Value>,
}

/// Load a single preset JSON file.
pub fn load_preset(path: &Path) -> Result<Configuration, Box<dyn Error>> {
    let content = std::fs::read_to_string(path)?;
    let file: PresetFile = serde_json::from_str(&content)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    build_configuration(file).map_err(|e| format!("{}: {}", path.display(), e).into())
}

/// Load a preset file, or every `.json` preset in a directory, sorted by
/// name for deterministic order.
pub fn load_presets(path: &Path) -> Result<Vec<Configuration>, Box<dyn Error>> {
    let metadata = std::fs::metadata(path)?;
    if metadata.is_dir() {
        let mut presets = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let p = entry.path();
            if p.extension().map_or(false, |e| e == "json") {
                presets.push(load_preset(&p)?);
            }
        }
        presets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(presets)
    } else {
        Ok(vec![load_preset(path)?])
    }
}

/// Find one preset by name in a directory of presets.
pub fn find_preset(dir: &Path, name: &str) -> Result<Configuration, Box<dyn Error>> {
    let presets = load_presets(dir)?;
    presets
        .into_iter()
        .find(|p| p.name == name)
        .ok_or_else(|| format!("No preset named '{}' in {}", name, dir.display()).into())
}

fn build_configuration(file: PresetFile) -> Result<Configuration, String> {
    let mut settings = Vec::new();
    flatten_into("", &file.settings, &mut settings)?;

    let mut seen = HashSet::new();
    for s in &settings {
        if !seen.insert(s.field.clone()) {
            return Err(format!("duplicate field name '{}' in settings", s.field));
        }
    }

    Ok(Configuration {
        name: file.name,
        description: file.description,
        estimated_cost: file.estimated_cost,
        settings,
    })
}

/// Depth-first flatten of nested setting groups into dotted leaf names,
/// preserving document order.
fn flatten_into(
    prefix: &str,
    map: &serde_json::Map<String, Value>,
    out: &mut Vec<Setting>,
) -> Result<(), String> {
    for (key, value) in map {
        let field = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };

        match value {
            Value::Object(group) => flatten_into(&field, group, out)?,
            Value::Bool(b) => out.push(Setting {
                field,
                value: SettingValue::Flag(*b),
            }),
            Value::Number(n) => {
                let n = n
                    .as_f64()
                    .ok_or_else(|| format!("field '{}' is not a representable number", field))?;
                out.push(Setting {
                    field,
                    value: SettingValue::Number(n),
                });
            }
            Value::String(s) => out.push(Setting {
                field,
                value: SettingValue::Text(s.clone()),
            }),
            other => {
                return Err(format!(
                    "field '{}' must be a scalar or a group, got {}",
                    field,
                    type_name(other)
                ));
            }
        }
    }
    Ok(())
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
