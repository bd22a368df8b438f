use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use checkout_types::domain::coupon::{normalize_code, Coupon, CouponDraft, CouponType, DiscountQuote};
use checkout_types::ports::coupon_gateway::CouponGateway;
use checkout_types::ports::GatewayError;
use chrono::Duration;
use dashmap::DashMap;
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::calls::CallLog;

const CODE_LENGTH: usize = 8;
const MAX_PERCENTAGE: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

#[derive(Clone, Default)]
pub struct InMemoryCoupons {
    map: Arc<DashMap<i64, Coupon>>,
    next_id: Arc<AtomicI64>,
    calls: CallLog,
}

impl InMemoryCoupons {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small catalogue for offline use: one live percentage coupon, one
    /// live fixed coupon with a minimum, one expired coupon.
    pub fn seeded() -> Self {
        let coupons = Self::new();
        let now = crate::now();
        let window = |from: i64, until: i64| (now + Duration::days(from), now + Duration::days(until));

        let (valid_from, valid_until) = window(-30, 90);
        coupons.insert(Coupon {
            id: 1,
            code: "SAVE20".into(),
            kind: CouponType::Percentage,
            value: Decimal::from(20),
            min_order_amount: Decimal::ZERO,
            max_uses: 100,
            used_count: 0,
            valid_from,
            valid_until,
            active: true,
        });
        coupons.insert(Coupon {
            id: 2,
            code: "FLAT10".into(),
            kind: CouponType::Fixed,
            value: Decimal::from(10),
            min_order_amount: Decimal::from(50),
            max_uses: 10,
            used_count: 0,
            valid_from,
            valid_until,
            active: true,
        });
        let (valid_from, valid_until) = window(-60, -1);
        coupons.insert(Coupon {
            id: 3,
            code: "EXPIRED".into(),
            kind: CouponType::Percentage,
            value: Decimal::from(10),
            min_order_amount: Decimal::ZERO,
            max_uses: 100,
            used_count: 0,
            valid_from,
            valid_until,
            active: true,
        });
        coupons
    }

    pub fn calls(&self) -> &CallLog {
        &self.calls
    }

    /// Stores `coupon` under its own id, bypassing validation.
    pub fn insert(&self, mut coupon: Coupon) {
        coupon.code = normalize_code(&coupon.code);
        self.next_id.fetch_max(coupon.id, Ordering::SeqCst);
        self.map.insert(coupon.id, coupon);
    }

    /// Current stored copy, without counting a call.
    pub fn peek_code(&self, code: &str) -> Option<Coupon> {
        let code = normalize_code(code);
        self.map
            .iter()
            .find(|kv| kv.value().code == code)
            .map(|kv| kv.value().clone())
    }

    fn id_of(&self, code: &str) -> Result<i64, GatewayError> {
        self.peek_code(code)
            .map(|c| c.id)
            .ok_or_else(|| GatewayError::service(404, format!("Coupon not found with code: {code}")))
    }

    fn sorted(&self, keep: impl Fn(&Coupon) -> bool) -> Vec<Coupon> {
        let mut list: Vec<Coupon> = self
            .map
            .iter()
            .map(|kv| kv.value().clone())
            .filter(|c| keep(c))
            .collect();
        list.sort_by_key(|c| c.id);
        list
    }
}

fn not_found(id: i64) -> GatewayError {
    GatewayError::service(404, format!("Coupon not found with id: {id}"))
}

fn validate(draft: &CouponDraft) -> Result<(), GatewayError> {
    if draft.value <= Decimal::ZERO {
        return Err(GatewayError::service(400, "Value must be positive"));
    }
    if draft.kind == CouponType::Percentage && draft.value > MAX_PERCENTAGE {
        return Err(GatewayError::service(400, "Percentage discount cannot exceed 50%"));
    }
    if draft.max_uses <= 0 {
        return Err(GatewayError::service(400, "Max uses must be positive"));
    }
    if draft.valid_until < draft.valid_from {
        return Err(GatewayError::service(
            400,
            "Valid until date must be after valid from date",
        ));
    }
    Ok(())
}

const CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Eight characters from A-Z0-9. The low 62 bits of a v4 uuid are random.
fn generate_code() -> String {
    let mut bits = Uuid::new_v4().as_u128() as u64 & ((1 << 62) - 1);
    (0..CODE_LENGTH)
        .map(|_| {
            let c = CODE_ALPHABET[(bits % 36) as usize];
            bits /= 36;
            c as char
        })
        .collect()
}

/// FIXED: the value capped at the amount, once the minimum is met.
/// PERCENTAGE: the share of the amount, half-up to cents.
fn discount_for(coupon: &Coupon, amount: Decimal) -> Result<Decimal, GatewayError> {
    match coupon.kind {
        CouponType::Fixed => {
            if amount < coupon.min_order_amount {
                return Err(GatewayError::service(
                    400,
                    "Order amount does not meet minimum requirement for this coupon",
                ));
            }
            Ok(coupon.value.min(amount))
        }
        CouponType::Percentage => {
            let share = amount
                .checked_mul(coupon.value)
                .ok_or_else(|| GatewayError::service(400, "Order amount is out of range"))?;
            Ok((share / Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        }
    }
}

#[async_trait]
impl CouponGateway for InMemoryCoupons {
    async fn list(&self) -> Result<Vec<Coupon>, GatewayError> {
        self.calls.record("list")?;
        Ok(self.sorted(|_| true))
    }

    async fn get(&self, id: i64) -> Result<Coupon, GatewayError> {
        self.calls.record("get")?;
        self.map.get(&id).map(|c| c.clone()).ok_or_else(|| not_found(id))
    }

    async fn get_by_code(&self, code: &str) -> Result<Coupon, GatewayError> {
        self.calls.record("get_by_code")?;
        let id = self.id_of(code)?;
        self.map.get(&id).map(|c| c.clone()).ok_or_else(|| not_found(id))
    }

    async fn create(&self, draft: CouponDraft) -> Result<Coupon, GatewayError> {
        self.calls.record("create")?;
        validate(&draft)?;
        let code = match draft.code.as_deref().map(normalize_code) {
            Some(code) if !code.is_empty() => code,
            _ => generate_code(),
        };
        if self.peek_code(&code).is_some() {
            return Err(GatewayError::service(409, format!("Coupon code already exists: {code}")));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let coupon = Coupon {
            id,
            code,
            kind: draft.kind,
            value: draft.value,
            min_order_amount: draft.min_order_amount,
            max_uses: draft.max_uses,
            used_count: 0,
            valid_from: draft.valid_from,
            valid_until: draft.valid_until,
            active: draft.active,
        };
        self.map.insert(id, coupon.clone());
        Ok(coupon)
    }

    async fn update(&self, id: i64, draft: CouponDraft) -> Result<Coupon, GatewayError> {
        self.calls.record("update")?;
        validate(&draft)?;
        let mut stored = self.map.get_mut(&id).ok_or_else(|| not_found(id))?;
        stored.kind = draft.kind;
        stored.value = draft.value;
        stored.min_order_amount = draft.min_order_amount;
        stored.max_uses = draft.max_uses;
        stored.valid_from = draft.valid_from;
        stored.valid_until = draft.valid_until;
        stored.active = draft.active;
        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), GatewayError> {
        self.calls.record("delete")?;
        self.map.remove(&id).map(|_| ()).ok_or_else(|| not_found(id))
    }

    async fn deactivate(&self, id: i64) -> Result<Coupon, GatewayError> {
        self.calls.record("deactivate")?;
        let mut stored = self.map.get_mut(&id).ok_or_else(|| not_found(id))?;
        stored.active = false;
        Ok(stored.clone())
    }

    async fn list_active(&self) -> Result<Vec<Coupon>, GatewayError> {
        self.calls.record("list_active")?;
        Ok(self.sorted(|c| c.active))
    }

    async fn list_valid(&self) -> Result<Vec<Coupon>, GatewayError> {
        self.calls.record("list_valid")?;
        let now = crate::now();
        Ok(self.sorted(|c| {
            c.active && c.uses_remaining() > 0 && c.valid_from <= now && c.valid_until >= now
        }))
    }

    async fn calculate_discount(
        &self,
        code: &str,
        order_amount: Decimal,
    ) -> Result<DiscountQuote, GatewayError> {
        self.calls.record("calculate_discount")?;
        let coupon = self
            .peek_code(code)
            .ok_or_else(|| GatewayError::service(404, format!("Coupon not found with code: {code}")))?;
        if !coupon.is_valid_at(crate::now()) {
            tracing::debug!(code = %coupon.code, "coupon not valid");
            return Err(GatewayError::service(400, "Coupon is not valid"));
        }
        let discount = discount_for(&coupon, order_amount)?;
        Ok(DiscountQuote {
            original_amount: order_amount,
            discount,
            final_amount: order_amount - discount,
        })
    }

    async fn use_code(&self, code: &str) -> Result<Coupon, GatewayError> {
        self.calls.record("use_code")?;
        let id = self.id_of(code)?;
        let mut stored = self.map.get_mut(&id).ok_or_else(|| not_found(id))?;
        if stored.uses_remaining() == 0 {
            return Err(GatewayError::service(400, "Coupon has reached maximum uses"));
        }
        stored.used_count += 1;
        Ok(stored.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn percentage_rounds_half_up_to_cents() {
        let coupons = InMemoryCoupons::seeded();
        let save20 = coupons.peek_code("save20").unwrap();
        assert_eq!(discount_for(&save20, d("199.99")).unwrap(), d("40.00"));
        assert_eq!(discount_for(&save20, d("0.125")).unwrap(), d("0.03"));
    }

    #[test]
    fn fixed_needs_minimum_and_is_capped() {
        let mut flat = InMemoryCoupons::seeded().peek_code("FLAT10").unwrap();
        assert!(discount_for(&flat, d("49.99")).is_err());
        assert_eq!(discount_for(&flat, d("50")).unwrap(), d("10"));
        flat.min_order_amount = Decimal::ZERO;
        assert_eq!(discount_for(&flat, d("4.50")).unwrap(), d("4.50"));
    }

    #[test]
    fn generated_codes_use_letters_and_digits() {
        for _ in 0..50 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        }
    }
}
