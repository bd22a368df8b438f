use async_trait::async_trait;

use super::GatewayError;
use crate::domain::order::{NewOrder, Order, OrderStatus};

/// The external Order Service.
#[async_trait]
pub trait OrderGateway: Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Order>, GatewayError>;
    async fn get(&self, id: i64) -> Result<Order, GatewayError>;
    async fn create(&self, order: NewOrder) -> Result<Order, GatewayError>;
    async fn update(&self, id: i64, order: NewOrder) -> Result<Order, GatewayError>;
    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Order, GatewayError>;
    async fn delete(&self, id: i64) -> Result<(), GatewayError>;
    async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<Order>, GatewayError>;
    async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, GatewayError>;
}
