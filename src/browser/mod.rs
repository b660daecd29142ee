pub mod bridge;
pub mod driver;
pub mod session;
