pub mod credit_controller;

pub use credit_controller::{configure, get_credit, list_credits, save_credit};
