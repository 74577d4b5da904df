//! Infrastructure - configuration and error types
//!
//! This module contains infrastructure concerns:
//! - `config` - Application configuration (TOML loading, defaults)
//! - `error` - Error enums for the zone, feed and report stages

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use error::{FeedError, ReportError, ZoneLoadError};
