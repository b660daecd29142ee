pub mod catalog_model;
pub mod dom;
