pub mod loader;
pub mod profile_model;
