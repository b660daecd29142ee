use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Locator hints sent to the bridge to address one control in the live page.
///
/// The bridge resolves hints with Playwright's accessible-role queries, so a
/// hint survives markup churn as long as role + accessible name stay stable.
/// `nth` picks among several controls sharing the same role and name, in
/// document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorHint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>, // ARIA role, e.g. "textbox", "button"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>, // accessible name (aria-label or visible text)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>, // HTML tag, e.g. "input", "select"
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>, // type attribute, e.g. "text", "checkbox"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nth: Option<usize>, // ordinal among same-role-same-name matches
}

/// Request sent to the calculator bridge over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BridgeRequest {
    Navigate {
        cmd: &'static str,
        url: String,
    },
    Extract {
        cmd: &'static str,
    },
    Action {
        cmd: &'static str,
        action: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        selector: Option<SelectorHint>,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        checked: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u64>,
    },
    CurrentUrl {
        cmd: &'static str,
    },
    QueryText {
        cmd: &'static str,
        selector: String,
    },
    QueryVisible {
        cmd: &'static str,
        selector: String,
    },
    Quit {
        cmd: &'static str,
    },
}

impl BridgeRequest {
    pub fn navigate(url: &str) -> Self {
        BridgeRequest::Navigate {
            cmd: "navigate",
            url: url.to_string(),
        }
    }

    pub fn extract() -> Self {
        BridgeRequest::Extract { cmd: "extract" }
    }

    pub fn fill(selector: &SelectorHint, value: &str) -> Self {
        BridgeRequest::Action {
            cmd: "action",
            action: "fill".into(),
            selector: Some(selector.clone()),
            value: Some(value.to_string()),
            checked: None,
            duration_ms: None,
        }
    }

    pub fn click(selector: &SelectorHint) -> Self {
        BridgeRequest::Action {
            cmd: "action",
            action: "click".into(),
            selector: Some(selector.clone()),
            value: None,
            checked: None,
            duration_ms: None,
        }
    }

    pub fn set_checked(selector: &SelectorHint, checked: bool) -> Self {
        BridgeRequest::Action {
            cmd: "action",
            action: "set_checked".into(),
            selector: Some(selector.clone()),
            value: None,
            checked: Some(checked),
            duration_ms: None,
        }
    }

    pub fn select_option(selector: &SelectorHint, option_label: &str) -> Self {
        BridgeRequest::Action {
            cmd: "action",
            action: "select_option".into(),
            selector: Some(selector.clone()),
            value: Some(option_label.to_string()),
            checked: None,
            duration_ms: None,
        }
    }

    pub fn wait(duration_ms: u64) -> Self {
        BridgeRequest::Action {
            cmd: "action",
            action: "wait".into(),
            selector: None,
            value: None,
            checked: None,
            duration_ms: Some(duration_ms),
        }
    }

    pub fn current_url() -> Self {
        BridgeRequest::CurrentUrl { cmd: "current_url" }
    }

    pub fn query_text(selector: &str) -> Self {
        BridgeRequest::QueryText {
            cmd: "query_text",
            selector: selector.to_string(),
        }
    }

    pub fn query_visible(selector: &str) -> Self {
        BridgeRequest::QueryVisible {
            cmd: "query_visible",
            selector: selector.to_string(),
        }
    }

    pub fn quit() -> Self {
        BridgeRequest::Quit { cmd: "quit" }
    }
}

/// Response received from the bridge over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct BridgeResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ready: Option<bool>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub visible: Option<bool>,
}
