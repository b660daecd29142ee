use serde::Deserialize;

/// One raw element from the bridge's extract payload.
///
/// Mirrors what `calculator_server.js` emits per interactive element. Most
/// attributes are optional; the bridge simply omits what the DOM does not
/// carry.
#[derive(Debug, Clone, Deserialize)]
pub struct DomElement {
    pub tag: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub r#type: Option<String>,
    #[serde(default, rename = "ariaLabel")]
    pub aria_label: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Option labels, present for select elements only.
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

impl DomElement {
    /// Accessible label: aria-label, else visible text, else placeholder,
    /// else the name attribute. First non-empty wins.
    pub fn accessible_label(&self) -> String {
        [
            self.aria_label.as_deref(),
            self.text.as_deref(),
            self.placeholder.as_deref(),
            self.name.as_deref(),
        ]
        .iter()
        .flatten()
        .map(|s| s.trim())
        .find(|s| !s.is_empty())
        .unwrap_or("")
        .to_string()
    }
}
