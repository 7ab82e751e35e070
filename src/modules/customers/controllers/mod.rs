pub mod customer_controller;

pub use customer_controller::{
    configure, delete_customer, get_customer, save_customer, update_customer, CustomerIdQuery,
};
