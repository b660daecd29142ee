use std::collections::{HashMap, HashSet};

use serde_json::{json, Value};

use calc_autofill::browser::bridge::SelectorHint;
use calc_autofill::browser::driver::PageDriver;
use calc_autofill::error::EngineError;

/// One scripted control on the fake page.
#[derive(Debug, Clone)]
pub struct FakeControl {
    pub kind: &'static str, // "text" | "checkbox" | "select" | "button"
    pub label: String,
    pub options: Vec<String>,
}

pub fn text(label: &str) -> FakeControl {
    FakeControl {
        kind: "text",
        label: label.to_string(),
        options: Vec::new(),
    }
}

pub fn checkbox(label: &str) -> FakeControl {
    FakeControl {
        kind: "checkbox",
        label: label.to_string(),
        options: Vec::new(),
    }
}

pub fn select(label: &str, options: &[&str]) -> FakeControl {
    FakeControl {
        kind: "select",
        label: label.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn button(label: &str) -> FakeControl {
    FakeControl {
        kind: "button",
        label: label.to_string(),
        options: Vec::new(),
    }
}

/// What clicking a given button does to the page.
#[derive(Debug, Clone, Default)]
pub struct PageChange {
    pub controls: Option<Vec<FakeControl>>,
    pub url: Option<String>,
    /// Selectors made visible immediately.
    pub reveal: Vec<String>,
    /// Selectors that become visible only after this much settling.
    pub reveal_after: Vec<(String, u64)>,
}

/// Scripted in-memory page implementing `PageDriver`.
///
/// Stands in for the Playwright bridge: controls are declared up front,
/// clicks trigger scripted page changes, and visibility can be delayed to
/// exercise the bounded waits.
pub struct FakePage {
    pub controls: Vec<FakeControl>,
    pub url: String,
    pub title: String,
    visible: HashSet<String>,
    reveal_after: HashMap<String, u64>,
    on_click: HashMap<String, PageChange>,
    /// Fill attempts on these labels error, simulating a broken control.
    pub fail_fill_labels: HashSet<String>,
    /// CSS selector -> text, for query_text.
    pub link_texts: HashMap<String, String>,

    // Observed effects
    pub values: HashMap<String, String>,
    pub checked: HashMap<String, bool>,
    pub clicks: Vec<String>,
    pub fills: Vec<(String, String)>,
    pub settled_ms: u64,
}

impl FakePage {
    pub fn new(controls: Vec<FakeControl>, url: &str) -> Self {
        FakePage {
            controls,
            url: url.to_string(),
            title: "Fake calculator".to_string(),
            visible: HashSet::new(),
            reveal_after: HashMap::new(),
            on_click: HashMap::new(),
            fail_fill_labels: HashSet::new(),
            link_texts: HashMap::new(),
            values: HashMap::new(),
            checked: HashMap::new(),
            clicks: Vec::new(),
            fills: Vec::new(),
            settled_ms: 0,
        }
    }

    pub fn on_click(&mut self, label: &str, change: PageChange) {
        self.on_click.insert(label.to_string(), change);
    }

    pub fn reveal(&mut self, selector: &str) {
        self.visible.insert(selector.to_string());
    }

    /// Stored value of a control, by kind/label/ordinal.
    pub fn value_of(&self, kind: &str, label: &str, nth: usize) -> Option<&str> {
        self.values.get(&key(kind, label, nth)).map(|s| s.as_str())
    }

    pub fn is_checked(&self, label: &str, nth: usize) -> bool {
        self.checked
            .get(&key("checkbox", label, nth))
            .copied()
            .unwrap_or(false)
    }

    fn dom_json(&self) -> Value {
        let elements: Vec<Value> = self
            .controls
            .iter()
            .map(|c| match c.kind {
                "text" => json!({
                    "tag": "input",
                    "type": "text",
                    "ariaLabel": c.label,
                }),
                "checkbox" => json!({
                    "tag": "input",
                    "type": "checkbox",
                    "ariaLabel": c.label,
                }),
                "select" => json!({
                    "tag": "select",
                    "ariaLabel": c.label,
                    "options": c.options,
                }),
                "button" => json!({
                    "tag": "button",
                    "role": "button",
                    "text": c.label,
                }),
                other => panic!("unknown fake control kind: {}", other),
            })
            .collect();
        Value::Array(elements)
    }

    /// Resolve a hint to a control index, mirroring how the bridge picks
    /// the nth control of a given role and accessible name.
    fn find(&self, hint: &SelectorHint) -> Result<usize, EngineError> {
        let kind = match hint.role.as_deref() {
            Some("textbox") => "text",
            Some("checkbox") => "checkbox",
            Some("combobox") => "select",
            Some("button") => "button",
            other => {
                return Err(EngineError::Protocol {
                    command: "locate".into(),
                    error: format!("unsupported role {:?}", other),
                });
            }
        };

        let nth = hint.nth.unwrap_or(0);
        let mut seen = 0usize;
        for (i, control) in self.controls.iter().enumerate() {
            if control.kind != kind {
                continue;
            }
            if let Some(name) = &hint.name {
                if &control.label != name {
                    continue;
                }
            }
            if seen == nth {
                return Ok(i);
            }
            seen += 1;
        }

        Err(EngineError::Protocol {
            command: "locate".into(),
            error: format!("no {} matching {:?} (nth {})", kind, hint.name, nth),
        })
    }

    fn apply_change(&mut self, change: PageChange) {
        if let Some(controls) = change.controls {
            self.controls = controls;
        }
        if let Some(url) = change.url {
            self.url = url;
        }
        for selector in change.reveal {
            self.visible.insert(selector);
        }
        for (selector, after_ms) in change.reveal_after {
            self.reveal_after.insert(selector, after_ms);
        }
    }
}

fn key(kind: &str, label: &str, nth: usize) -> String {
    format!("{}#{}#{}", kind, label.to_lowercase(), nth)
}

impl PageDriver for FakePage {
    fn navigate(&mut self, url: &str) -> Result<(), EngineError> {
        self.url = url.to_string();
        Ok(())
    }

    fn extract(&mut self) -> Result<Value, EngineError> {
        Ok(json!({
            "url": self.url,
            "title": self.title,
            "dom": self.dom_json(),
        }))
    }

    fn fill(&mut self, hint: &SelectorHint, value: &str) -> Result<(), EngineError> {
        if let Some(name) = &hint.name {
            if self.fail_fill_labels.contains(name) {
                return Err(EngineError::Protocol {
                    command: "fill".into(),
                    error: format!("element '{}' rejected input", name),
                });
            }
        }
        let index = self.find(hint)?;
        let control = &self.controls[index];
        let nth = hint.nth.unwrap_or(0);
        let k = key(control.kind, &control.label, nth);
        self.values.insert(k.clone(), value.to_string());
        self.fills.push((k, value.to_string()));
        Ok(())
    }

    fn click(&mut self, hint: &SelectorHint) -> Result<(), EngineError> {
        let index = self.find(hint)?;
        let label = self.controls[index].label.clone();
        self.clicks.push(label.clone());
        if let Some(change) = self.on_click.remove(&label) {
            self.apply_change(change);
        }
        Ok(())
    }

    fn set_checked(&mut self, hint: &SelectorHint, checked: bool) -> Result<(), EngineError> {
        let index = self.find(hint)?;
        let control = &self.controls[index];
        let k = key(control.kind, &control.label, hint.nth.unwrap_or(0));
        self.checked.insert(k, checked);
        Ok(())
    }

    fn select_option(
        &mut self,
        hint: &SelectorHint,
        option_label: &str,
    ) -> Result<(), EngineError> {
        let index = self.find(hint)?;
        let control = &self.controls[index];
        if !control.options.iter().any(|o| o == option_label) {
            return Err(EngineError::Protocol {
                command: "select_option".into(),
                error: format!("no option '{}' in '{}'", option_label, control.label),
            });
        }
        let k = key(control.kind, &control.label, hint.nth.unwrap_or(0));
        self.values.insert(k, option_label.to_string());
        Ok(())
    }

    fn query_text(&mut self, selector: &str) -> Result<Option<String>, EngineError> {
        Ok(self.link_texts.get(selector).cloned())
    }

    fn query_visible(&mut self, selector: &str) -> Result<bool, EngineError> {
        Ok(self.visible.contains(selector))
    }

    fn current_url(&mut self) -> Result<String, EngineError> {
        Ok(self.url.clone())
    }

    fn settle(&mut self, ms: u64) -> Result<(), EngineError> {
        self.settled_ms += ms;
        let mut now_visible = Vec::new();
        for (selector, remaining) in self.reveal_after.iter_mut() {
            if *remaining <= ms {
                now_visible.push(selector.clone());
            } else {
                *remaining -= ms;
            }
        }
        for selector in now_visible {
            self.reveal_after.remove(&selector);
            self.visible.insert(selector);
        }
        Ok(())
    }
}
