use async_trait::async_trait;
use checkout_types::domain::order::{NewOrder, Order, OrderStatus};
use checkout_types::ports::order_gateway::OrderGateway;
use checkout_types::ports::GatewayError;
use reqwest::Method;

use crate::transport::Transport;

/// HTTP adapter for the Order Service (`/orders`).
#[derive(Clone, Debug)]
pub struct OrdersClient {
    transport: Transport,
}

impl OrdersClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl OrderGateway for OrdersClient {
    async fn list(&self) -> Result<Vec<Order>, GatewayError> {
        let req = self.transport.request(Method::GET, &["orders"])?;
        self.transport.fetch(req).await
    }

    async fn get(&self, id: i64) -> Result<Order, GatewayError> {
        let req = self
            .transport
            .request(Method::GET, &["orders", &id.to_string()])?;
        self.transport.fetch(req).await
    }

    async fn create(&self, order: NewOrder) -> Result<Order, GatewayError> {
        let req = self
            .transport
            .request(Method::POST, &["orders"])?
            .json(&order);
        self.transport.fetch(req).await
    }

    async fn update(&self, id: i64, order: NewOrder) -> Result<Order, GatewayError> {
        let req = self
            .transport
            .request(Method::PUT, &["orders", &id.to_string()])?
            .json(&order);
        self.transport.fetch(req).await
    }

    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Order, GatewayError> {
        let req = self
            .transport
            .request(Method::PATCH, &["orders", &id.to_string(), "status"])?
            .query(&[("status", status.as_str())]);
        self.transport.fetch(req).await
    }

    async fn delete(&self, id: i64) -> Result<(), GatewayError> {
        let req = self
            .transport
            .request(Method::DELETE, &["orders", &id.to_string()])?;
        self.transport.execute(req).await?;
        Ok(())
    }

    async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<Order>, GatewayError> {
        let req = self
            .transport
            .request(Method::GET, &["orders", "customer", &customer_id.to_string()])?;
        self.transport.fetch(req).await
    }

    async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, GatewayError> {
        let req = self
            .transport
            .request(Method::GET, &["orders", "status", status.as_str()])?;
        self.transport.fetch(req).await
    }
}
