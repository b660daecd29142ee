use serde_json::Value;

use crate::browser::bridge::SelectorHint;
use crate::error::EngineError;

/// The operations the engine needs from a live page.
///
/// `BrowserSession` implements this against the real Playwright bridge;
/// tests implement it with a scripted in-memory page. Every method that
/// mutates the page invalidates previously discovered catalogs.
pub trait PageDriver {
    fn navigate(&mut self, url: &str) -> Result<(), EngineError>;

    /// Snapshot the current DOM as the bridge's extract payload
    /// (`{url, title, dom: [..]}`).
    fn extract(&mut self) -> Result<Value, EngineError>;

    fn fill(&mut self, hint: &SelectorHint, value: &str) -> Result<(), EngineError>;

    fn click(&mut self, hint: &SelectorHint) -> Result<(), EngineError>;

    fn set_checked(&mut self, hint: &SelectorHint, checked: bool) -> Result<(), EngineError>;

    fn select_option(&mut self, hint: &SelectorHint, option_label: &str)
        -> Result<(), EngineError>;

    /// Text content of the first element matching a CSS selector, if any.
    fn query_text(&mut self, selector: &str) -> Result<Option<String>, EngineError>;

    fn query_visible(&mut self, selector: &str) -> Result<bool, EngineError>;

    fn current_url(&mut self) -> Result<String, EngineError>;

    /// Let the page settle for a fixed slice of time. This is the single
    /// suspension point all bounded waits are built from.
    fn settle(&mut self, ms: u64) -> Result<(), EngineError>;
}

/// Poll until a CSS selector becomes visible, or the deadline lapses.
///
/// Returns Ok(true) if the selector appeared, Ok(false) on timeout. Every
/// wait in the engine goes through here; there are no unbounded polls.
pub fn wait_until_visible(
    driver: &mut dyn PageDriver,
    selector: &str,
    timeout_ms: u64,
    interval_ms: u64,
) -> Result<bool, EngineError> {
    let interval = interval_ms.max(1);
    let mut elapsed = 0u64;
    loop {
        if driver.query_visible(selector)? {
            return Ok(true);
        }
        if elapsed >= timeout_ms {
            return Ok(false);
        }
        let slice = interval.min(timeout_ms - elapsed);
        driver.settle(slice)?;
        elapsed += slice;
    }
}
