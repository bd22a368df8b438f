//! checkout-core: the checkout workflow controller and the UI state it drives.

pub mod config;
pub mod errors;
pub mod state;
pub mod view;

pub mod application;

pub use checkout_types::{domain, ports};
