//! checkout-memory: in-process stand-ins for the Order and Coupon services.
//!
//! They follow the remote services' observable rules closely enough to drive
//! the checkout controller offline and in tests. Every call is counted and
//! any operation can be made to fail through [`CallLog`].

mod calls;
pub mod coupons;
pub mod orders;

pub use calls::CallLog;
pub use coupons::InMemoryCoupons;
pub use orders::InMemoryOrders;

pub(crate) fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}
