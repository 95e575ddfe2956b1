//! Configuration module for spendlink
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence
//! - Server connection preferences

pub mod paths;
pub mod settings;

pub use paths::SpendlinkPaths;
pub use settings::{LogFormat, Settings};
