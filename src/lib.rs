//! ATS resume match analyzer library

pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod report;
pub mod scoring;
pub mod server;
pub mod store;

pub use config::Config;
pub use error::{AtsAnalyzerError, Result};
