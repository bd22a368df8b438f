use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use checkout_types::domain::order::{NewOrder, Order, OrderStatus};
use checkout_types::ports::order_gateway::OrderGateway;
use checkout_types::ports::GatewayError;
use dashmap::DashMap;
use rust_decimal::Decimal;

use crate::calls::CallLog;

#[derive(Clone, Default)]
pub struct InMemoryOrders {
    map: Arc<DashMap<i64, Order>>,
    next_id: Arc<AtomicI64>,
    calls: CallLog,
}

impl InMemoryOrders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &CallLog {
        &self.calls
    }

    /// Stores `order` under its own id, bypassing validation.
    pub fn insert(&self, order: Order) {
        self.next_id.fetch_max(order.id, Ordering::SeqCst);
        self.map.insert(order.id, order);
    }

    /// Current stored copy, without counting a call.
    pub fn peek(&self, id: i64) -> Option<Order> {
        self.map.get(&id).map(|r| r.clone())
    }

    fn sorted(&self, keep: impl Fn(&Order) -> bool) -> Vec<Order> {
        let mut list: Vec<Order> = self
            .map
            .iter()
            .map(|kv| kv.value().clone())
            .filter(|o| keep(o))
            .collect();
        list.sort_by_key(|o| o.id);
        list
    }
}

fn not_found(id: i64) -> GatewayError {
    GatewayError::service(404, format!("Order not found with id: {id}"))
}

fn validate(order: &NewOrder) -> Result<(), GatewayError> {
    if order.name.trim().is_empty() {
        return Err(GatewayError::service(400, "Order name is required"));
    }
    if order.original_amount <= Decimal::ZERO {
        return Err(GatewayError::service(400, "Original amount must be positive"));
    }
    if order.final_amount <= Decimal::ZERO {
        return Err(GatewayError::service(400, "Final amount must be positive"));
    }
    Ok(())
}

#[async_trait]
impl OrderGateway for InMemoryOrders {
    async fn list(&self) -> Result<Vec<Order>, GatewayError> {
        self.calls.record("list")?;
        Ok(self.sorted(|_| true))
    }

    async fn get(&self, id: i64) -> Result<Order, GatewayError> {
        self.calls.record("get")?;
        self.peek(id).ok_or_else(|| not_found(id))
    }

    async fn create(&self, order: NewOrder) -> Result<Order, GatewayError> {
        self.calls.record("create")?;
        validate(&order)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = crate::now();
        let created = Order {
            id,
            name: order.name,
            customer_id: order.customer_id,
            original_amount: order.original_amount,
            final_amount: order.final_amount,
            status: OrderStatus::Created,
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.map.insert(id, created.clone());
        tracing::debug!(id, "order created");
        Ok(created)
    }

    async fn update(&self, id: i64, order: NewOrder) -> Result<Order, GatewayError> {
        self.calls.record("update")?;
        validate(&order)?;
        let mut stored = self.map.get_mut(&id).ok_or_else(|| not_found(id))?;
        stored.name = order.name;
        stored.original_amount = order.original_amount;
        stored.final_amount = order.final_amount;
        stored.customer_id = order.customer_id;
        stored.updated_at = Some(crate::now());
        Ok(stored.clone())
    }

    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Order, GatewayError> {
        self.calls.record("update_status")?;
        let mut stored = self.map.get_mut(&id).ok_or_else(|| not_found(id))?;
        stored.status = status;
        stored.updated_at = Some(crate::now());
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), GatewayError> {
        self.calls.record("delete")?;
        self.map.remove(&id).map(|_| ()).ok_or_else(|| not_found(id))
    }

    async fn list_by_customer(&self, customer_id: i64) -> Result<Vec<Order>, GatewayError> {
        self.calls.record("list_by_customer")?;
        Ok(self.sorted(|o| o.customer_id == customer_id))
    }

    async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, GatewayError> {
        self.calls.record("list_by_status")?;
        Ok(self.sorted(|o| o.status == status))
    }
}
