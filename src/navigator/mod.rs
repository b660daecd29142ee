pub mod navigator;
pub mod stage;
