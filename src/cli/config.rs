use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::navigator::navigator::NavigatorConfig;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "calc-autofill",
    version,
    about = "Drives the cost calculator UI from declarative presets and exports the shareable estimate URL"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: calc-autofill.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one preset against the calculator
    Run {
        /// Preset name (looked up in the presets directory) or a path to a
        /// preset JSON file
        #[arg(long)]
        preset: String,

        /// Directory of preset JSON files
        #[arg(long)]
        presets_dir: Option<String>,

        /// Service profile YAML file
        #[arg(long)]
        profile: Option<String>,

        /// Run with a visible browser window
        #[arg(long, default_value_t = false)]
        headed: bool,

        /// Write the artifact URL to this file
        #[arg(short, long)]
        output: Option<String>,

        /// Output format: console, json
        #[arg(long, default_value = "console")]
        format: String,

        /// Confirm the artifact URL actually resolves before reporting
        /// success
        #[arg(long, default_value_t = false)]
        verify_url: bool,
    },

    /// List available presets
    List {
        /// Directory of preset JSON files
        #[arg(long)]
        presets_dir: Option<String>,
    },

    /// Run every preset in the presets directory
    RunAll {
        /// Directory of preset JSON files
        #[arg(long)]
        presets_dir: Option<String>,

        /// Service profile YAML file
        #[arg(long)]
        profile: Option<String>,

        /// Run with visible browser windows
        #[arg(long, default_value_t = false)]
        headed: bool,

        /// Run presets in parallel, one browser session each
        #[arg(long, default_value_t = false)]
        parallel: bool,

        /// Output format: console, json
        #[arg(long, default_value = "console")]
        format: String,

        /// Write the formatted results to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `calc-autofill.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_presets_dir")]
    pub presets_dir: String,

    /// Default service profile, when the CLI does not name one.
    pub profile: Option<String>,

    #[serde(default = "default_calculator_url")]
    pub calculator_url: String,

    #[serde(default = "default_trace_file")]
    pub trace_file: String,

    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            presets_dir: default_presets_dir(),
            profile: None,
            calculator_url: default_calculator_url(),
            trace_file: default_trace_file(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    #[serde(default = "default_config_page_ms")]
    pub config_page_ms: u64,

    #[serde(default = "default_save_ms")]
    pub save_ms: u64,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    #[serde(default = "default_result_settle_ms")]
    pub result_settle_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            config_page_ms: default_config_page_ms(),
            save_ms: default_save_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            settle_ms: default_settle_ms(),
            result_settle_ms: default_result_settle_ms(),
        }
    }
}

// Serde default helpers
fn default_presets_dir() -> String { "presets".to_string() }
fn default_calculator_url() -> String { "https://calculator.aws/#/addService".to_string() }
fn default_trace_file() -> String { "run_trace.jsonl".to_string() }
fn default_config_page_ms() -> u64 { 15_000 }
fn default_save_ms() -> u64 { 10_000 }
fn default_poll_interval_ms() -> u64 { 250 }
fn default_settle_ms() -> u64 { 300 }
fn default_result_settle_ms() -> u64 { 500 }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if the file is missing or
/// malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("calc-autofill.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Build a NavigatorConfig from the loaded app config.
pub fn build_navigator_config(config: &AppConfig) -> NavigatorConfig {
    NavigatorConfig {
        calculator_url: config.calculator_url.clone(),
        config_page_timeout_ms: config.timeouts.config_page_ms,
        save_timeout_ms: config.timeouts.save_ms,
        poll_interval_ms: config.timeouts.poll_interval_ms,
        settle_ms: config.timeouts.settle_ms,
        result_settle_ms: config.timeouts.result_settle_ms,
    }
}
