//! Credit Application Backend Library
//!
//! Customer registration and credit (loan) requests over a MySQL store,
//! served through actix-web.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::credits;
pub use modules::customers;
