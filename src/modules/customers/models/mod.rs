mod customer;

pub use customer::{
    Address, Customer, CustomerPatch, CustomerRequest, CustomerUpdateRequest, CustomerView,
    NewCustomer,
};
