//! UI state and its transitions.
//!
//! Every change goes through a consuming `with_*` function so each render
//! sees one consistent [`AppState`] value.

use std::str::FromStr;

use checkout_types::domain::coupon::Coupon;
use checkout_types::domain::order::Order;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Orders,
    Checkout,
    Coupons,
}

/// A discount the Coupon Service computed for one exact amount.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedDiscount {
    pub code: String,
    pub amount: Decimal,
    pub discount: Decimal,
    pub final_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub subtotal: Decimal,
    pub discount: Option<Decimal>,
    pub total: Decimal,
}

/// Form fields of the checkout tab, kept as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutDraft {
    name: String,
    original_amount: String,
    customer_id: String,
    coupon_code: String,
    applied: Option<AppliedDiscount>,
}

impl CheckoutDraft {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn original_amount(&self) -> &str {
        &self.original_amount
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn coupon_code(&self) -> &str {
        &self.coupon_code
    }

    pub fn applied(&self) -> Option<&AppliedDiscount> {
        self.applied.as_ref()
    }

    pub fn discount(&self) -> Option<Decimal> {
        self.applied.as_ref().map(|a| a.discount)
    }

    pub fn final_amount(&self) -> Option<Decimal> {
        self.applied.as_ref().map(|a| a.final_amount)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// The only way the amount changes. A discount belongs to the amount it
    /// was computed against, so it is dropped here.
    pub fn with_original_amount(self, amount: impl Into<String>) -> Self {
        Self {
            original_amount: amount.into(),
            applied: None,
            ..self
        }
    }

    pub fn with_customer_id(self, customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            ..self
        }
    }

    /// Retyping the code keeps an applied discount until it is reapplied.
    pub fn with_coupon_code(self, code: &str) -> Self {
        Self {
            coupon_code: code.to_uppercase(),
            ..self
        }
    }

    pub(crate) fn with_discount(self, applied: AppliedDiscount) -> Self {
        Self {
            applied: Some(applied),
            ..self
        }
    }

    pub fn without_discount(self) -> Self {
        Self {
            applied: None,
            ..self
        }
    }

    pub fn parsed_amount(&self) -> Option<Decimal> {
        Decimal::from_str(self.original_amount.trim()).ok()
    }

    /// Code whose usage should be recorded once the order exists: a code is
    /// still entered and a discount was actually computed.
    pub fn coupon_to_record(&self) -> Option<&str> {
        if self.coupon_code.trim().is_empty() {
            return None;
        }
        self.applied.as_ref().map(|a| a.code.as_str())
    }

    pub fn summary(&self) -> OrderSummary {
        let subtotal = self.parsed_amount().unwrap_or(Decimal::ZERO);
        OrderSummary {
            subtotal,
            discount: self.discount(),
            total: self.final_amount().unwrap_or(subtotal),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    tab: Tab,
    draft: CheckoutDraft,
    orders: Vec<Order>,
    coupons: Vec<Coupon>,
    banner: Option<String>,
    loading: bool,
}

impl AppState {
    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn draft(&self) -> &CheckoutDraft {
        &self.draft
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn order(&self, id: i64) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn with_tab(self, tab: Tab) -> Self {
        Self { tab, ..self }
    }

    pub fn with_draft(self, draft: CheckoutDraft) -> Self {
        Self { draft, ..self }
    }

    pub fn map_draft(mut self, f: impl FnOnce(CheckoutDraft) -> CheckoutDraft) -> Self {
        self.draft = f(std::mem::take(&mut self.draft));
        self
    }

    pub fn with_banner(self, banner: impl Into<String>) -> Self {
        Self {
            banner: Some(banner.into()),
            ..self
        }
    }

    pub fn without_banner(self) -> Self {
        Self {
            banner: None,
            ..self
        }
    }

    pub fn loading(self) -> Self {
        Self {
            loading: true,
            ..self
        }
    }

    /// Replaces both snapshots wholesale.
    pub fn with_listing(self, orders: Vec<Order>, coupons: Vec<Coupon>) -> Self {
        Self {
            orders,
            coupons,
            banner: None,
            loading: false,
            ..self
        }
    }

    /// Ends a failed fetch; the previous snapshots stay.
    pub fn listing_failed(self, banner: impl Into<String>) -> Self {
        Self {
            banner: Some(banner.into()),
            loading: false,
            ..self
        }
    }
}
