use async_trait::async_trait;
use rust_decimal::Decimal;

use super::GatewayError;
use crate::domain::coupon::{Coupon, CouponDraft, DiscountQuote};

/// The external Coupon Service. Discount rules live entirely behind it.
#[async_trait]
pub trait CouponGateway: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Coupon>, GatewayError>;
    async fn get(&self, id: i64) -> Result<Coupon, GatewayError>;
    async fn get_by_code(&self, code: &str) -> Result<Coupon, GatewayError>;
    async fn create(&self, coupon: CouponDraft) -> Result<Coupon, GatewayError>;
    async fn update(&self, id: i64, coupon: CouponDraft) -> Result<Coupon, GatewayError>;
    async fn delete(&self, id: i64) -> Result<(), GatewayError>;
    async fn deactivate(&self, id: i64) -> Result<Coupon, GatewayError>;
    async fn list_active(&self) -> Result<Vec<Coupon>, GatewayError>;
    async fn list_valid(&self) -> Result<Vec<Coupon>, GatewayError>;
    async fn calculate_discount(
        &self,
        code: &str,
        order_amount: Decimal,
    ) -> Result<DiscountQuote, GatewayError>;
    /// Increments the usage counter of `code`. Not idempotent.
    async fn use_code(&self, code: &str) -> Result<Coupon, GatewayError>;
}
