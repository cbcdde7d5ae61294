mod config;
pub use config::*;
pub mod errors;
pub mod loader;
pub mod report;
