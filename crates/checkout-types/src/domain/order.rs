use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Smallest amount an order may be placed for.
pub const MIN_ORDER_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Paid => "PAID",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Created)
    }

    /// Only a CREATED order moves, and only to PAID or CANCELLED.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Created, OrderStatus::Paid) | (OrderStatus::Created, OrderStatus::Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CREATED" => Ok(OrderStatus::Created),
            "PAID" => Ok(OrderStatus::Paid),
            "CANCELLED" => Ok(OrderStatus::Cancelled),
            other => anyhow::bail!("unknown order status: {other}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub name: String,
    pub customer_id: i64,
    pub original_amount: Decimal,
    pub final_amount: Decimal,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

impl Order {
    /// Amount knocked off by a coupon, if any.
    pub fn savings(&self) -> Option<Decimal> {
        if self.original_amount != self.final_amount {
            Some(self.original_amount - self.final_amount)
        } else {
            None
        }
    }
}

/// Body of an order create or update request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub name: String,
    pub original_amount: Decimal,
    pub final_amount: Decimal,
    pub customer_id: i64,
}

impl NewOrder {
    pub fn new(
        name: String,
        original_amount: Decimal,
        final_amount: Decimal,
        customer_id: i64,
    ) -> anyhow::Result<Self> {
        if name.trim().is_empty() {
            anyhow::bail!("Order name is required");
        }
        if original_amount < MIN_ORDER_AMOUNT {
            anyhow::bail!("Order amount must be at least {MIN_ORDER_AMOUNT}");
        }
        if final_amount.is_sign_negative() {
            anyhow::bail!("Final amount cannot be negative");
        }
        if final_amount > original_amount {
            anyhow::bail!("Final amount cannot exceed the original amount");
        }
        Ok(Self {
            name,
            original_amount,
            final_amount,
            customer_id,
        })
    }
}
