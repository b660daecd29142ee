//! Automates the cost calculator's UI: a declarative preset of settings is
//! turned into search/select/fill/check/save interactions against the live
//! page, producing a shareable estimate URL plus a per-field report.
//!
//! The engine is generic: one navigator parameterized by a service profile
//! (service name candidates + field table) replaces a hand-written
//! configurator per service. The page's DOM is treated as unknown and
//! mutable; controls are discovered fresh before every action and addressed
//! through fallback chains of label matches rather than fixed selectors.

pub mod applier;
pub mod browser;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod extractor;
pub mod navigator;
pub mod preset;
pub mod profile;
pub mod report;
pub mod resolver;
pub mod trace;
