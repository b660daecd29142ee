use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::browser::bridge::SelectorHint;
use crate::browser::driver::PageDriver;
use crate::catalog::dom::DomElement;
use crate::error::EngineError;

/// The four control kinds the engine knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    TextInput,
    Select,
    Checkbox,
    Button,
}

impl ControlKind {
    /// ARIA role the bridge uses to locate controls of this kind.
    pub fn role(&self) -> &'static str {
        match self {
            ControlKind::TextInput => "textbox",
            ControlKind::Select => "combobox",
            ControlKind::Checkbox => "checkbox",
            ControlKind::Button => "button",
        }
    }
}

/// A resolved reference to one interactive control in the current page
/// snapshot. Goes stale as soon as anything mutates the page; never hold one
/// across an action.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDescriptor {
    pub kind: ControlKind,
    /// Accessible label (may be empty for unlabeled controls).
    pub label: String,
    /// Position among controls sharing this kind and label, document order.
    pub ordinal: usize,
    /// Locator handle the bridge can act on.
    pub hint: SelectorHint,
    /// Option labels, for selects.
    pub options: Vec<String>,
}

/// Immutable inventory of the interactive controls on the current page.
///
/// The calculator repeats the same label for logically distinct fields
/// (e.g. three tiers each exposing "Average requests per minute"), so
/// controls sharing a kind and label carry ordinals 0, 1, 2, ... in observed
/// document order.
#[derive(Debug, Clone)]
pub struct Catalog {
    controls: Vec<ElementDescriptor>,
}

impl Catalog {
    /// Snapshot the current page through the driver and build the inventory.
    pub fn discover(driver: &mut dyn PageDriver) -> Result<Self, EngineError> {
        let snapshot = driver.extract()?;
        Self::from_snapshot(&snapshot)
    }

    /// Build the inventory from an already-extracted snapshot
    /// (`{url, title, dom: [..]}`).
    pub fn from_snapshot(snapshot: &Value) -> Result<Self, EngineError> {
        let dom = snapshot["dom"]
            .as_array()
            .ok_or_else(|| EngineError::DomStructure("extract payload has no 'dom' array".into()))?;

        let elements: Vec<DomElement> =
            serde_json::from_value(Value::Array(dom.clone())).map_err(|e| {
                EngineError::JsonParse {
                    context: "dom elements".into(),
                    source: e,
                }
            })?;

        Ok(Self::from_elements(&elements))
    }

    /// Classify raw elements into descriptors, assigning ordinals.
    pub fn from_elements(elements: &[DomElement]) -> Self {
        let mut controls = Vec::new();
        let mut seen: HashMap<(ControlKind, String), usize> = HashMap::new();

        for el in elements {
            let Some(kind) = classify(el) else { continue };

            let label = el.accessible_label();
            let key = (kind, label.to_lowercase());
            let ordinal = *seen
                .entry(key)
                .and_modify(|n| *n += 1)
                .or_insert(0usize);

            let hint = SelectorHint {
                role: Some(kind.role().to_string()),
                name: if label.is_empty() { None } else { Some(label.clone()) },
                tag: Some(el.tag.clone()),
                input_type: el.r#type.clone(),
                nth: Some(ordinal),
            };

            controls.push(ElementDescriptor {
                kind,
                label,
                ordinal,
                hint,
                options: el.options.clone().unwrap_or_default(),
            });
        }

        Catalog { controls }
    }

    pub fn controls(&self) -> &[ElementDescriptor] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// All controls of one kind, document order.
    pub fn of_kind(&self, kind: ControlKind) -> impl Iterator<Item = &ElementDescriptor> {
        self.controls.iter().filter(move |c| c.kind == kind)
    }
}

/// Map a raw element to one of the four control kinds, or None for
/// everything the engine does not drive (disabled controls, radio buttons,
/// hidden inputs, static content).
fn classify(el: &DomElement) -> Option<ControlKind> {
    if el.disabled {
        return None;
    }

    match el.tag.as_str() {
        "select" => Some(ControlKind::Select),
        "textarea" => Some(ControlKind::TextInput),
        "button" => Some(ControlKind::Button),
        "a" => Some(ControlKind::Button),
        "input" => match el.r#type.as_deref() {
            Some("checkbox") => Some(ControlKind::Checkbox),
            None
            | Some("text")
            | Some("email")
            | Some("password")
            | Some("search")
            | Some("number")
            | Some("tel")
            | Some("url")
            | Some("date")
            | Some("time")
            | Some("month")
            | Some("week") => Some(ControlKind::TextInput),
            Some("submit") | Some("button") | Some("image") => Some(ControlKind::Button),
            // radio, hidden, file, reset, range: not driven
            _ => None,
        },
        _ => {
            if el.role.as_deref() == Some("button") {
                Some(ControlKind::Button)
            } else {
                None
            }
        }
    }
}
