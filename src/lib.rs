//! spendlink - terminal client for a personal budgeting server
//!
//! This library provides the core functionality for the spendlink client:
//! logging in, linking a bank through the first-time setup wizard, creating
//! recurring expenses, and browsing what the server keeps for each bank
//! account.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Records exchanged with the server
//! - `api`: The backend seam and its HTTP implementation
//! - `auth`: Authentication state, its reducer, and diagnostics
//! - `store`: Single-writer state container driven by actions
//! - `services`: Business logic on top of the backend and the store
//! - `setup`: First-time bank link wizard
//! - `storage`: Persisted login session
//!
//! # Example
//!
//! ```rust,ignore
//! use spendlink::config::{SpendlinkPaths, Settings};
//!
//! let paths = SpendlinkPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod notification;
pub mod services;
pub mod setup;
pub mod storage;
pub mod store;

pub use error::{SpendlinkError, SpendlinkResult};
