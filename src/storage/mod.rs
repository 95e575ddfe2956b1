//! Local storage for spendlink
//!
//! JSON files with atomic writes. Only the login session lives here; all
//! budgeting data stays on the server.

pub mod file_io;
pub mod session;

pub use file_io::{read_json, write_json_atomic};
pub use session::Session;
