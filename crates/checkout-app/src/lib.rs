//! checkout-app: terminal front end over the checkout controller.

pub mod backend;
pub mod shell;
