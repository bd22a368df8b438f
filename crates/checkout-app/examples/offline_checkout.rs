///  To run :
///  cargo r --example offline_checkout
use checkout_app::backend::memory_services;
use checkout_core::application::CheckoutController;
use checkout_core::domain::order::OrderStatus;
use checkout_core::state::Tab;
use checkout_core::view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (orders, coupons) = memory_services();
    let mut ctl = CheckoutController::new(orders, coupons.clone());
    ctl.refresh().await?;

    ctl.select_tab(Tab::Checkout);
    ctl.edit_name("Premium Laptop");
    ctl.edit_amount("199.99");
    ctl.edit_customer_id("1001");
    ctl.edit_coupon_code("save20");
    let applied = ctl.apply_coupon().await?;
    println!(
        "Applied {} to {}: -{} => {}",
        applied.code, applied.amount, applied.discount, applied.final_amount
    );
    print!("{}", view::render(ctl.state()));

    let created = ctl.submit_order().await?;
    println!("Created order id={} final={}", created.id, created.final_amount);

    // An expired code is refused by the service, the banner says why.
    ctl.edit_amount("50.00");
    ctl.edit_coupon_code("EXPIRED");
    if let Err(err) = ctl.apply_coupon().await {
        println!("Rejected: {err}");
    }

    let paid = ctl.update_order_status(created.id, OrderStatus::Paid).await?;
    println!("Updated status={} for id {}", paid.status, paid.id);

    ctl.select_tab(Tab::Orders);
    print!("{}", view::render(ctl.state()));

    if let Some(save20) = coupons.peek_code("SAVE20") {
        println!("SAVE20 used {}/{}", save20.used_count, save20.max_uses);
    }
    Ok(())
}
