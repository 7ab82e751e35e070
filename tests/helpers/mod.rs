// Shared test infrastructure
//
// Included from each test target with
//   #[path = "../helpers/mod.rs"]
//   mod helpers;

#![allow(dead_code)]

pub mod test_database;

pub use memory_store::*;
pub use test_app::*;
pub use test_data::*;
pub use test_database::*;
