pub mod checkout;

pub use checkout::CheckoutController;
