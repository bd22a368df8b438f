use checkout_core::application::CheckoutController;
use checkout_core::domain::order::{Order, OrderStatus};
use checkout_core::state::Tab;
use checkout_core::view;
use checkout_memory::{InMemoryCoupons, InMemoryOrders};
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn offline() -> (
    CheckoutController<InMemoryOrders, InMemoryCoupons>,
    InMemoryOrders,
    InMemoryCoupons,
) {
    let orders = InMemoryOrders::new();
    let coupons = InMemoryCoupons::seeded();
    let ctl = CheckoutController::new(orders.clone(), coupons.clone());
    (ctl, orders, coupons)
}

#[tokio::test]
async fn save20_checkout_end_to_end() {
    let (mut ctl, orders, coupons) = offline();
    ctl.select_tab(Tab::Checkout);
    ctl.edit_name("Premium Laptop");
    ctl.edit_amount("199.99");
    ctl.edit_customer_id("1001");
    ctl.edit_coupon_code("save20");

    let applied = ctl.apply_coupon().await.unwrap();
    assert_eq!(applied.discount, d("40.00"));
    assert_eq!(applied.final_amount, d("159.99"));
    assert_eq!(ctl.state().draft().summary().total, d("159.99"));

    let created = ctl.submit_order().await.unwrap();
    assert_eq!(created.original_amount, d("199.99"));
    assert_eq!(created.final_amount, d("159.99"));
    assert_eq!(created.status, OrderStatus::Created);

    assert_eq!(coupons.peek_code("SAVE20").unwrap().used_count, 1);
    assert_eq!(orders.calls().count("list"), 1);
    assert!(ctl.state().draft().is_empty());
    assert_eq!(ctl.state().orders(), &[created][..]);

    ctl.select_tab(Tab::Orders);
    let text = view::render(ctl.state());
    assert!(text.contains("You saved: $40.00"));
    assert!(text.contains("Final: $159.99"));
}

#[tokio::test]
async fn expired_coupon_shows_service_message() {
    let (mut ctl, _, coupons) = offline();
    ctl.edit_amount("50.00");
    ctl.edit_coupon_code("EXPIRED");

    let err = ctl.apply_coupon().await.unwrap_err();
    assert_eq!(err.to_string(), "service error: Coupon is not valid");
    assert_eq!(ctl.state().draft().discount(), None);
    assert_eq!(ctl.state().banner(), Some("Coupon is not valid"));
    assert_eq!(coupons.calls().count("calculate_discount"), 1);
}

#[tokio::test]
async fn cancelled_order_loses_its_actions() {
    let (mut ctl, orders, _) = offline();
    orders.insert(Order {
        id: 7,
        name: "Standing Desk".into(),
        customer_id: 42,
        original_amount: d("300"),
        final_amount: d("300"),
        status: OrderStatus::Created,
        created_at: None,
        updated_at: None,
    });
    ctl.refresh().await.unwrap();
    assert!(view::render(ctl.state()).contains("Actions: pay 7 | cancel 7 | delete 7"));

    let cancelled = ctl
        .update_order_status(7, OrderStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(ctl.state().order(7).map(|o| o.status), Some(OrderStatus::Cancelled));

    let text = view::render(ctl.state());
    assert!(text.contains("#7 [CANCELLED] Standing Desk"));
    assert!(text.contains("Actions: delete 7"));
    assert!(!text.contains("pay 7"));

    assert!(ctl.update_order_status(7, OrderStatus::Paid).await.is_err());
    assert_eq!(orders.calls().count("update_status"), 1);
}

#[tokio::test]
async fn fixed_coupon_below_minimum_then_retry() {
    let (mut ctl, _, coupons) = offline();
    ctl.edit_name("Desk Lamp");
    ctl.edit_customer_id("9");
    ctl.edit_amount("30");
    ctl.edit_coupon_code("FLAT10");

    assert!(ctl.apply_coupon().await.is_err());
    assert_eq!(
        ctl.state().banner(),
        Some("Order amount does not meet minimum requirement for this coupon")
    );

    ctl.edit_amount("55");
    let applied = ctl.apply_coupon().await.unwrap();
    assert_eq!(applied.final_amount, d("45"));
    assert_eq!(ctl.state().banner(), None);

    let created = ctl.submit_order().await.unwrap();
    assert_eq!(created.final_amount, d("45"));
    assert_eq!(coupons.peek_code("FLAT10").unwrap().used_count, 1);
}
