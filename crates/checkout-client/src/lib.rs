//! checkout-client: reqwest adapters for the external Order and Coupon services.

pub mod coupons;
pub mod orders;
pub mod transport;

pub use coupons::CouponsClient;
pub use orders::OrdersClient;
pub use transport::{Transport, TransportBuilder};

/// Both service clients over one shared transport.
pub fn connect(transport: &Transport) -> (OrdersClient, CouponsClient) {
    (
        OrdersClient::new(transport.clone()),
        CouponsClient::new(transport.clone()),
    )
}
