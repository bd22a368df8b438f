pub mod coupon_gateway;
pub mod order_gateway;

/// Failure of a call to one of the external services.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("service responded {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Service {
        status: u16,
        message: Option<String>,
    },

    #[error("network error: {0}")]
    Network(String),
}

impl GatewayError {
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        GatewayError::Service {
            status,
            message: Some(message.into()),
        }
    }

    /// Human-readable message supplied by the service, if it sent one.
    pub fn message(&self) -> Option<&str> {
        match self {
            GatewayError::Service { message, .. } => message.as_deref(),
            GatewayError::Network(_) => None,
        }
    }
}
