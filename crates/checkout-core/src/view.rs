//! Plain-text rendering of [`AppState`] for terminal front ends.

use checkout_types::domain::coupon::Coupon;
use checkout_types::domain::order::Order;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::state::{AppState, CheckoutDraft, Tab};

pub fn money(amount: Decimal) -> String {
    let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${cents:.2}")
}

/// Commands the shell accepts for `order`, in display order.
pub fn order_actions(order: &Order) -> Vec<String> {
    let mut actions = Vec::new();
    if !order.status.is_terminal() {
        actions.push(format!("pay {}", order.id));
        actions.push(format!("cancel {}", order.id));
    }
    actions.push(format!("delete {}", order.id));
    actions
}

pub fn render(state: &AppState) -> String {
    if state.is_loading() {
        return "Loading...\n".to_string();
    }

    let mut out = String::from("== Order Management System ==\n");
    if let Some(banner) = state.banner() {
        out.push_str(&format!("! {banner}\n"));
    }
    out.push_str(&tabs(state));
    out.push('\n');
    out.push_str(&match state.tab() {
        Tab::Orders => orders_tab(state.orders()),
        Tab::Checkout => checkout_tab(state.draft()),
        Tab::Coupons => coupons_tab(state.coupons()),
    });
    out
}

fn tabs(state: &AppState) -> String {
    let labels = [
        (Tab::Orders, format!("Orders ({})", state.orders().len())),
        (Tab::Checkout, "New Checkout".to_string()),
        (Tab::Coupons, format!("Coupons ({})", state.coupons().len())),
    ];
    let parts: Vec<String> = labels
        .into_iter()
        .map(|(tab, label)| {
            if tab == state.tab() {
                format!("[{label}]")
            } else {
                format!(" {label} ")
            }
        })
        .collect();
    format!("{}\n", parts.join(" "))
}

fn order_card(order: &Order) -> String {
    let mut card = format!(
        "#{} [{}] {}\n  Customer ID: {}\n  Original: {}\n  Final: {}\n",
        order.id,
        order.status,
        order.name,
        order.customer_id,
        money(order.original_amount),
        money(order.final_amount),
    );
    if let Some(saved) = order.savings() {
        card.push_str(&format!("  You saved: {}\n", money(saved)));
    }
    card.push_str(&format!("  Actions: {}\n", order_actions(order).join(" | ")));
    card
}

fn orders_tab(orders: &[Order]) -> String {
    if orders.is_empty() {
        return "All Orders\nNo orders yet. Create one from the Checkout tab.\n".to_string();
    }
    let cards: String = orders.iter().map(order_card).collect();
    format!("All Orders\n{cards}")
}

fn checkout_tab(draft: &CheckoutDraft) -> String {
    let mut out = format!(
        "Checkout\n  Order Name:  {}\n  Amount ($):  {}\n  Customer ID: {}\n  Coupon:      {}\n",
        draft.name(),
        draft.original_amount(),
        draft.customer_id(),
        draft.coupon_code(),
    );
    if let (Some(discount), Some(final_amount)) = (draft.discount(), draft.final_amount()) {
        out.push_str(&format!(
            "  Discount: -{}\n  Final Amount: {}\n",
            money(discount),
            money(final_amount)
        ));
    }

    let summary = draft.summary();
    out.push_str(&format!("Order Summary\n  Subtotal: {}\n", money(summary.subtotal)));
    if let Some(discount) = summary.discount {
        out.push_str(&format!("  Discount: -{}\n", money(discount)));
    }
    out.push_str(&format!("  Total: {}\n", money(summary.total)));
    out
}

fn coupon_card(coupon: &Coupon) -> String {
    let badge = if coupon.active { "Active" } else { "Inactive" };
    let mut card = format!(
        "{}  {}  [{}]\n  Type: {:?}\n",
        coupon.code,
        coupon.headline(),
        badge,
        coupon.kind
    );
    if let Some(min) = coupon.displayed_minimum() {
        card.push_str(&format!("  Min Order: {}\n", money(min)));
    }
    card.push_str(&format!(
        "  Uses: {}/{}\n  Valid Until: {}\n",
        coupon.used_count,
        coupon.max_uses,
        coupon.valid_until.format("%Y-%m-%d")
    ));
    card
}

fn coupons_tab(coupons: &[Coupon]) -> String {
    if coupons.is_empty() {
        return "Available Coupons\nNo coupons available.\n".to_string();
    }
    let cards: String = coupons.iter().map(coupon_card).collect();
    format!("Available Coupons\n{cards}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_types::domain::coupon::CouponType;
    use checkout_types::domain::order::OrderStatus;
    use chrono::NaiveDate;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn order(id: i64, status: OrderStatus, original: &str, final_amount: &str) -> Order {
        Order {
            id,
            name: "Premium Laptop".into(),
            customer_id: 1001,
            original_amount: d(original),
            final_amount: d(final_amount),
            status,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(money(d("159.99")), "$159.99");
        assert_eq!(money(d("40")), "$40.00");
        assert_eq!(money(d("39.998")), "$40.00");
        assert_eq!(money(d("0.125")), "$0.13");
    }

    #[test]
    fn actions_only_for_created_orders() {
        let created = order(7, OrderStatus::Created, "10", "10");
        assert_eq!(order_actions(&created), vec!["pay 7", "cancel 7", "delete 7"]);
        for status in [OrderStatus::Paid, OrderStatus::Cancelled] {
            assert_eq!(order_actions(&order(7, status, "10", "10")), vec!["delete 7"]);
        }
    }

    #[test]
    fn order_card_layout() {
        let paid = order(3, OrderStatus::Paid, "50", "40");
        assert_eq!(
            order_card(&paid),
            "#3 [PAID] Premium Laptop\n  Customer ID: 1001\n  Original: $50.00\n  Final: $40.00\n  You saved: $10.00\n  Actions: delete 3\n"
        );
    }

    #[test]
    fn empty_states() {
        let state = AppState::default();
        let text = render(&state);
        assert!(text.contains("[Orders (0)]"));
        assert!(text.contains("No orders yet. Create one from the Checkout tab."));

        let coupons = render(&AppState::default().with_tab(Tab::Coupons));
        assert!(coupons.contains("No coupons available."));
        assert!(render(&AppState::default().loading()).starts_with("Loading..."));
    }

    #[test]
    fn order_card_shows_savings_and_banner() {
        let state = AppState::default()
            .with_listing(vec![order(7, OrderStatus::Created, "199.99", "159.99")], Vec::new())
            .with_banner("Failed to delete order");
        let text = render(&state);
        assert!(text.contains("! Failed to delete order"));
        assert!(text.contains("#7 [CREATED] Premium Laptop"));
        assert!(text.contains("You saved: $40.00"));
        assert!(text.contains("Actions: pay 7 | cancel 7 | delete 7"));
    }

    #[test]
    fn checkout_summary_lines() {
        let draft = CheckoutDraft::default()
            .with_name("Desk")
            .with_original_amount("80")
            .with_coupon_code("flat10");
        let text = render(&AppState::default().with_tab(Tab::Checkout).with_draft(draft));
        assert!(text.contains("Coupon:      FLAT10"));
        assert!(text.contains("Subtotal: $80.00"));
        assert!(text.contains("Total: $80.00"));
        assert!(!text.contains("Discount"));
    }

    #[test]
    fn coupon_card_lines() {
        let day = NaiveDate::from_ymd_opt(2026, 12, 31)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        let coupon = Coupon {
            id: 2,
            code: "FLAT10".into(),
            kind: CouponType::Fixed,
            value: d("10"),
            min_order_amount: d("50"),
            max_uses: 10,
            used_count: 3,
            valid_from: day,
            valid_until: day,
            active: false,
        };
        let state = AppState::default()
            .with_listing(Vec::new(), vec![coupon])
            .with_tab(Tab::Coupons);
        let text = render(&state);
        assert!(text.contains("FLAT10  $10 OFF  [Inactive]"));
        assert!(text.contains("Type: Fixed"));
        assert!(text.contains("Min Order: $50.00"));
        assert!(text.contains("Uses: 3/10"));
        assert!(text.contains("Valid Until: 2026-12-31"));
    }
}
