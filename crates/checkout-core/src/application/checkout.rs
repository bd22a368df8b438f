use checkout_types::domain::coupon::normalize_code;
use checkout_types::domain::order::{NewOrder, Order, OrderStatus};
use checkout_types::ports::coupon_gateway::CouponGateway;
use checkout_types::ports::order_gateway::OrderGateway;
use rust_decimal::Decimal;

use crate::errors::{
    CheckoutError, CREATE_FAILED, DELETE_FAILED, FETCH_FAILED, INVALID_COUPON,
    MISSING_COUPON_INPUT, STATUS_UPDATE_FAILED,
};
use crate::state::{AppState, AppliedDiscount, CheckoutDraft, Tab};

/// Drives the checkout form and the order/coupon listings against the two
/// external services.
///
/// Every action takes `&mut self`, so no two actions ever run against the
/// same draft. Each failure is turned into the banner message and also
/// returned to the caller.
pub struct CheckoutController<O: OrderGateway, C: CouponGateway> {
    orders: O,
    coupons: C,
    state: AppState,
}

impl<O: OrderGateway, C: CouponGateway> CheckoutController<O, C> {
    pub fn new(orders: O, coupons: C) -> Self {
        Self {
            orders,
            coupons,
            state: AppState::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn update(&mut self, f: impl FnOnce(AppState) -> AppState) {
        let state = std::mem::take(&mut self.state);
        self.state = f(state);
    }

    fn fail(&mut self, err: CheckoutError, banner: String) -> CheckoutError {
        self.update(|s| s.with_banner(banner));
        err
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.update(|s| s.with_tab(tab));
    }

    pub fn edit_name(&mut self, name: &str) {
        self.update(|s| s.map_draft(|d| d.with_name(name)));
    }

    /// Replaces the amount text; any applied discount is dropped with it.
    pub fn edit_amount(&mut self, amount: &str) {
        self.update(|s| s.map_draft(|d| d.with_original_amount(amount)));
    }

    pub fn edit_customer_id(&mut self, customer_id: &str) {
        self.update(|s| s.map_draft(|d| d.with_customer_id(customer_id)));
    }

    pub fn edit_coupon_code(&mut self, code: &str) {
        self.update(|s| s.map_draft(|d| d.with_coupon_code(code)));
    }

    /// Fetches orders and coupons together. Either failing fails both and
    /// leaves the previous snapshots in place.
    pub async fn refresh(&mut self) -> Result<(), CheckoutError> {
        self.update(AppState::loading);
        let fetched = tokio::try_join!(self.orders.list(), self.coupons.list());
        match fetched {
            Ok((orders, coupons)) => {
                tracing::debug!(orders = orders.len(), coupons = coupons.len(), "listing refreshed");
                self.update(|s| s.with_listing(orders, coupons));
                Ok(())
            }
            Err(e) => {
                let err = CheckoutError::from(e);
                tracing::warn!(error = %err, "listing refresh failed");
                self.update(|s| s.listing_failed(FETCH_FAILED));
                Err(err)
            }
        }
    }

    /// Asks the Coupon Service what the entered code takes off the entered
    /// amount.
    pub async fn apply_coupon(&mut self) -> Result<AppliedDiscount, CheckoutError> {
        let draft = self.state.draft();
        let code = normalize_code(draft.coupon_code());
        let amount_text = draft.original_amount().trim();
        if code.is_empty() || amount_text.is_empty() {
            let err = CheckoutError::validation(MISSING_COUPON_INPUT);
            return Err(self.fail(err, MISSING_COUPON_INPUT.to_string()));
        }
        let Some(amount) = draft.parsed_amount() else {
            let err = CheckoutError::validation("Order amount must be a number");
            let banner = err.to_string();
            return Err(self.fail(err, banner));
        };

        match self.coupons.calculate_discount(&code, amount).await {
            Ok(quote) => {
                tracing::info!(%code, %amount, discount = %quote.discount, "coupon applied");
                let applied = AppliedDiscount {
                    code,
                    amount,
                    discount: quote.discount,
                    final_amount: quote.final_amount,
                };
                let kept = applied.clone();
                self.update(|s| s.map_draft(|d| d.with_discount(kept)).without_banner());
                Ok(applied)
            }
            Err(e) => {
                let err = CheckoutError::from(e);
                tracing::info!(%code, %amount, error = %err, "coupon rejected");
                let banner = err.banner(INVALID_COUPON);
                self.update(|s| s.map_draft(CheckoutDraft::without_discount));
                Err(self.fail(err, banner))
            }
        }
    }

    fn build_order(draft: &CheckoutDraft) -> Result<NewOrder, CheckoutError> {
        if draft.name().trim().is_empty()
            || draft.original_amount().trim().is_empty()
            || draft.customer_id().trim().is_empty()
        {
            return Err(CheckoutError::validation(
                "Please fill in order name, amount and customer ID",
            ));
        }
        let original: Decimal = draft
            .parsed_amount()
            .ok_or_else(|| CheckoutError::validation("Order amount must be a number"))?;
        let customer_id: i64 = draft
            .customer_id()
            .trim()
            .parse()
            .map_err(|_| CheckoutError::validation("Customer ID must be a whole number"))?;
        // No applied coupon means full price.
        let final_amount = draft.final_amount().unwrap_or(original);
        NewOrder::new(draft.name().to_string(), original, final_amount, customer_id)
            .map_err(|e| CheckoutError::validation(e.to_string()))
    }

    /// Places the drafted order. Success resets the draft and refreshes the
    /// listing once; failure keeps the draft for another try.
    pub async fn submit_order(&mut self) -> Result<Order, CheckoutError> {
        let new_order = match Self::build_order(self.state.draft()) {
            Ok(o) => o,
            Err(err) => {
                let banner = err.banner(CREATE_FAILED);
                return Err(self.fail(err, banner));
            }
        };
        let to_record = self.state.draft().coupon_to_record().map(str::to_owned);

        let created = match self.orders.create(new_order).await {
            Ok(order) => order,
            Err(e) => {
                let err = CheckoutError::from(e);
                tracing::warn!(error = %err, "order creation failed");
                let banner = err.banner(CREATE_FAILED);
                return Err(self.fail(err, banner));
            }
        };
        tracing::info!(
            id = created.id,
            original = %created.original_amount,
            final_amount = %created.final_amount,
            "order created"
        );

        // Best effort: the order already exists, so a failed usage update
        // is only logged.
        if let Some(code) = to_record {
            if let Err(e) = self.coupons.use_code(&code).await {
                tracing::warn!(%code, error = %e, "failed to update coupon usage");
            }
        }

        self.update(|s| s.with_draft(CheckoutDraft::default()).without_banner());
        // A failed refresh reports itself through the banner.
        let _ = self.refresh().await;
        Ok(created)
    }

    /// Marks a CREATED order PAID or CANCELLED.
    pub async fn update_order_status(
        &mut self,
        id: i64,
        status: OrderStatus,
    ) -> Result<Order, CheckoutError> {
        // Orders missing from the snapshot are left for the service to judge.
        let from = self
            .state
            .order(id)
            .map(|o| o.status)
            .unwrap_or(OrderStatus::Created);
        if !from.can_transition_to(status) {
            let err = CheckoutError::validation(format!("Order #{id} cannot move from {from} to {status}"));
            let banner = err.to_string();
            return Err(self.fail(err, banner));
        }

        match self.orders.update_status(id, status).await {
            Ok(order) => {
                tracing::info!(id, %status, "order status updated");
                let _ = self.refresh().await;
                Ok(order)
            }
            Err(e) => {
                let err = CheckoutError::from(e);
                tracing::warn!(id, %status, error = %err, "order status update failed");
                let banner = err.generic_banner(STATUS_UPDATE_FAILED);
                Err(self.fail(err, banner))
            }
        }
    }

    pub async fn delete_order(&mut self, id: i64) -> Result<(), CheckoutError> {
        match self.orders.delete(id).await {
            Ok(()) => {
                tracing::info!(id, "order deleted");
                let _ = self.refresh().await;
                Ok(())
            }
            Err(e) => {
                let err = CheckoutError::from(e);
                tracing::warn!(id, error = %err, "order delete failed");
                let banner = err.generic_banner(DELETE_FAILED);
                Err(self.fail(err, banner))
            }
        }
    }
}
