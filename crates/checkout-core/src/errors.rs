use checkout_types::ports::GatewayError;
use thiserror::Error;

pub const MISSING_COUPON_INPUT: &str = "Please enter order amount and coupon code";
pub const INVALID_COUPON: &str = "Invalid coupon or coupon cannot be applied";
pub const CREATE_FAILED: &str = "Failed to create order";
pub const STATUS_UPDATE_FAILED: &str = "Failed to update order status";
pub const DELETE_FAILED: &str = "Failed to delete order";
pub const FETCH_FAILED: &str = "Failed to fetch data. Make sure the backend is running.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Missing or malformed input, caught before any remote call.
    #[error("{0}")]
    Validation(String),

    #[error("service error: {}", .0.as_deref().unwrap_or("no message"))]
    Service(Option<String>),

    #[error("network error: {0}")]
    Network(String),
}

impl From<GatewayError> for CheckoutError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Service { message, .. } => CheckoutError::Service(message),
            GatewayError::Network(m) => CheckoutError::Network(m),
        }
    }
}

impl CheckoutError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CheckoutError::Validation(msg.into())
    }

    /// Banner text for this error. Network failures read the same as a
    /// service failure without a message.
    pub fn banner(&self, fallback: &str) -> String {
        match self {
            CheckoutError::Validation(m) => m.clone(),
            CheckoutError::Service(Some(m)) => m.clone(),
            CheckoutError::Service(None) | CheckoutError::Network(_) => fallback.to_string(),
        }
    }

    /// Like [`banner`](Self::banner) but ignores the service's own message.
    pub fn generic_banner(&self, fallback: &str) -> String {
        match self {
            CheckoutError::Validation(m) => m.clone(),
            _ => fallback.to_string(),
        }
    }
}
