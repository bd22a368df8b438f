use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponType {
    Percentage,
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: i64,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: CouponType,
    pub value: Decimal,
    #[serde(default)]
    pub min_order_amount: Decimal,
    pub max_uses: i32,
    #[serde(default)]
    pub used_count: i32,
    pub valid_from: NaiveDateTime,
    pub valid_until: NaiveDateTime,
    pub active: bool,
}

impl Coupon {
    /// Active, inside its window and with uses left.
    pub fn is_valid_at(&self, now: NaiveDateTime) -> bool {
        self.active
            && self.used_count < self.max_uses
            && now > self.valid_from
            && now < self.valid_until
    }

    pub fn uses_remaining(&self) -> i32 {
        (self.max_uses - self.used_count).max(0)
    }

    /// Short label such as `20% OFF` or `$10 OFF`.
    pub fn headline(&self) -> String {
        match self.kind {
            CouponType::Percentage => format!("{}% OFF", self.value.normalize()),
            CouponType::Fixed => format!("${} OFF", self.value.normalize()),
        }
    }

    /// Minimum order amount worth showing; only FIXED coupons enforce one.
    pub fn displayed_minimum(&self) -> Option<Decimal> {
        match self.kind {
            CouponType::Fixed if self.min_order_amount > Decimal::ZERO => {
                Some(self.min_order_amount)
            }
            _ => None,
        }
    }
}

/// Normalizes user-typed coupon codes.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Body of a coupon create or update request. A missing code lets the
/// service generate one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CouponDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub kind: CouponType,
    pub value: Decimal,
    #[serde(default)]
    pub min_order_amount: Decimal,
    pub max_uses: i32,
    pub valid_from: NaiveDateTime,
    pub valid_until: NaiveDateTime,
    pub active: bool,
}

/// Result of a calculate-discount call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscountQuote {
    pub original_amount: Decimal,
    pub discount: Decimal,
    pub final_amount: Decimal,
}
