//! checkout-types: domain model and service ports shared by the checkout crates.

pub mod domain;
pub mod ports;
