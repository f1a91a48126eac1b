//! # dadabot-core
//!
//! Error types, configuration, and logging setup shared by the dadabot crates.

pub mod config;
pub mod error;
pub mod logging;
