use anyhow::Context;
use checkout_client::{connect, CouponsClient, OrdersClient, Transport};
use checkout_core::config::Config;
use checkout_memory::{InMemoryCoupons, InMemoryOrders};

/// reqwest clients for the configured API.
pub fn http_clients(config: &Config) -> anyhow::Result<(OrdersClient, CouponsClient)> {
    let mut builder = Transport::builder(&config.api_base_url)
        .with_context(|| format!("API_BASE_URL {:?}", config.api_base_url))?;
    if let Some(timeout) = config.request_timeout() {
        builder = builder.with_timeout(timeout);
    }
    let transport = builder.build()?;
    tracing::info!(base = %transport.base(), "using http backend");
    Ok(connect(&transport))
}

/// Offline services with the sample coupon catalogue.
pub fn memory_services() -> (InMemoryOrders, InMemoryCoupons) {
    tracing::info!("using in-memory backend");
    (InMemoryOrders::new(), InMemoryCoupons::seeded())
}
