pub mod fingerprint;
pub mod loader;
pub mod preset_model;
