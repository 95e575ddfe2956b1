//! Service layer for spendlink
//!
//! Services sit between the CLI and the backend. They call the server,
//! then dispatch the results into the store.

pub mod auth;
pub mod collections;
pub mod expense;
pub mod spending;

pub use auth::AuthService;
pub use collections::CollectionsService;
pub use expense::{NewExpenseModal, NewExpenseValues};
pub use spending::SpendingService;
