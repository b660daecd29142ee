use std::io::{BufRead, BufReader, Write};
use std::process::{Child, Command, Stdio};

use serde_json::Value;

use crate::browser::bridge::{BridgeRequest, BridgeResponse, SelectorHint};
use crate::browser::driver::PageDriver;
use crate::error::EngineError;

/// Default bridge script, relative to the working directory. Overridable
/// with the CALC_BRIDGE env var for non-standard checkouts.
const BRIDGE_SCRIPT: &str = "bridge/calculator_server.js";

/// A persistent browser session backed by the Playwright bridge.
///
/// Launches a long-lived Node.js process that keeps a Chromium browser open
/// for the whole run. Commands are sent as NDJSON over stdin, responses read
/// from stdout, one line each way per command.
pub struct BrowserSession {
    child: Child,
    stdin: std::process::ChildStdin,
    reader: BufReader<std::process::ChildStdout>,
}

impl BrowserSession {
    /// Launch a new browser session. `headless = false` opens a visible
    /// browser window, useful when debugging a profile against the live
    /// calculator.
    pub fn launch(headless: bool) -> Result<Self, EngineError> {
        let script =
            std::env::var("CALC_BRIDGE").unwrap_or_else(|_| BRIDGE_SCRIPT.to_string());

        let mut command = Command::new("node");
        command.arg(&script);
        if !headless {
            command.arg("--headed");
        }

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| EngineError::SubprocessSpawn {
                script: script.clone(),
                source: e,
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            EngineError::SessionIo("Failed to capture stdin of bridge process".into())
        })?;

        let stdout = child.stdout.take().ok_or_else(|| {
            EngineError::SessionIo("Failed to capture stdout of bridge process".into())
        })?;

        let mut reader = BufReader::new(stdout);

        // Wait for the ready signal before accepting commands
        let mut line = String::new();
        reader
            .read_line(&mut line)
            .map_err(|e| EngineError::SessionIo(format!("Failed to read ready signal: {}", e)))?;

        let response: BridgeResponse =
            serde_json::from_str(line.trim()).map_err(|e| EngineError::JsonParse {
                context: "bridge ready signal".into(),
                source: e,
            })?;

        if !response.ok || response.ready != Some(true) {
            return Err(EngineError::Protocol {
                command: "launch".into(),
                error: "Did not receive ready signal from bridge".into(),
            });
        }

        Ok(BrowserSession {
            child,
            stdin,
            reader,
        })
    }

    /// Send a request and read the response.
    fn send(&mut self, request: &BridgeRequest) -> Result<BridgeResponse, EngineError> {
        let json = serde_json::to_string(request).map_err(|e| EngineError::JsonSerialize {
            context: "BridgeRequest".into(),
            source: e,
        })?;

        writeln!(self.stdin, "{}", json)
            .map_err(|e| EngineError::SessionIo(format!("Failed to write to bridge stdin: {}", e)))?;

        self.stdin
            .flush()
            .map_err(|e| EngineError::SessionIo(format!("Failed to flush bridge stdin: {}", e)))?;

        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .map_err(|e| EngineError::SessionIo(format!("Failed to read from bridge stdout: {}", e)))?;

        if line.trim().is_empty() {
            return Err(EngineError::SessionIo(
                "Empty response from bridge (process may have died)".into(),
            ));
        }

        let response: BridgeResponse =
            serde_json::from_str(line.trim()).map_err(|e| EngineError::JsonParse {
                context: "bridge response".into(),
                source: e,
            })?;

        Ok(response)
    }

    /// Send a request and verify it succeeded.
    fn send_ok(
        &mut self,
        request: &BridgeRequest,
        command_name: &str,
    ) -> Result<BridgeResponse, EngineError> {
        let response = self.send(request)?;
        if !response.ok {
            return Err(EngineError::Protocol {
                command: command_name.into(),
                error: response.error.unwrap_or_else(|| "Unknown error".into()),
            });
        }
        Ok(response)
    }

    /// Quit the browser session.
    pub fn quit(&mut self) -> Result<(), EngineError> {
        let request = BridgeRequest::quit();
        // Best-effort quit, the process may already be gone
        let _ = self.send(&request);
        let _ = self.child.wait();
        Ok(())
    }
}

impl PageDriver for BrowserSession {
    fn navigate(&mut self, url: &str) -> Result<(), EngineError> {
        let request = BridgeRequest::navigate(url);
        self.send_ok(&request, "navigate")?;
        Ok(())
    }

    fn extract(&mut self) -> Result<Value, EngineError> {
        let request = BridgeRequest::extract();
        let response = self.send_ok(&request, "extract")?;
        response.data.ok_or_else(|| EngineError::Protocol {
            command: "extract".into(),
            error: "No data in extract response".into(),
        })
    }

    fn fill(&mut self, hint: &SelectorHint, value: &str) -> Result<(), EngineError> {
        let request = BridgeRequest::fill(hint, value);
        self.send_ok(&request, "fill")?;
        Ok(())
    }

    fn click(&mut self, hint: &SelectorHint) -> Result<(), EngineError> {
        let request = BridgeRequest::click(hint);
        self.send_ok(&request, "click")?;
        Ok(())
    }

    fn set_checked(&mut self, hint: &SelectorHint, checked: bool) -> Result<(), EngineError> {
        let request = BridgeRequest::set_checked(hint, checked);
        self.send_ok(&request, "set_checked")?;
        Ok(())
    }

    fn select_option(
        &mut self,
        hint: &SelectorHint,
        option_label: &str,
    ) -> Result<(), EngineError> {
        let request = BridgeRequest::select_option(hint, option_label);
        self.send_ok(&request, "select_option")?;
        Ok(())
    }

    fn query_text(&mut self, selector: &str) -> Result<Option<String>, EngineError> {
        let request = BridgeRequest::query_text(selector);
        let response = self.send_ok(&request, "query_text")?;
        Ok(response.text)
    }

    fn query_visible(&mut self, selector: &str) -> Result<bool, EngineError> {
        let request = BridgeRequest::query_visible(selector);
        let response = self.send_ok(&request, "query_visible")?;
        Ok(response.visible.unwrap_or(false))
    }

    fn current_url(&mut self) -> Result<String, EngineError> {
        let request = BridgeRequest::current_url();
        let response = self.send_ok(&request, "current_url")?;
        response.url.ok_or_else(|| EngineError::Protocol {
            command: "current_url".into(),
            error: "No URL in current_url response".into(),
        })
    }

    fn settle(&mut self, ms: u64) -> Result<(), EngineError> {
        let request = BridgeRequest::wait(ms);
        self.send_ok(&request, "wait")?;
        Ok(())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // Best-effort cleanup so the Chromium process never outlives a run
        let _ = self.quit();
    }
}
