//! # TUBS Common Library
//!
//! Shared code for the TUBS content tooling:
//! - Error types
//! - Generator configuration and TOML bootstrap loading
//! - Path and content ID normalization
//! - JSON artifact writing

pub mod artifact;
pub mod config;
pub mod error;
pub mod paths;

pub use config::GeneratorConfig;
pub use error::{Error, Result};
