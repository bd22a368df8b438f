use checkout_app::backend::{http_clients, memory_services};
use checkout_core::config::{Backend, Config};
use checkout_types::ports::coupon_gateway::CouponGateway;
use checkout_types::ports::order_gateway::OrderGateway;

#[test]
fn builds_http_clients_from_config() {
    let config = Config::from_lookup(|key| match key {
        "API_BASE_URL" => Some("http://127.0.0.1:8080/api".into()),
        "API_TIMEOUT_SECS" => Some("5".into()),
        _ => None,
    })
    .expect("config");
    assert_eq!(config.backend, Backend::Http);
    assert!(http_clients(&config).is_ok());
}

#[test]
fn rejects_unusable_base_url() {
    let config = Config {
        api_base_url: "not a url".into(),
        ..Config::default()
    };
    let err = http_clients(&config).unwrap_err();
    assert!(format!("{err:#}").contains("API_BASE_URL"));
}

#[tokio::test]
async fn memory_backend_starts_with_sample_coupons() {
    let (orders, coupons) = memory_services();
    assert!(orders.list().await.expect("orders").is_empty());
    let codes: Vec<String> = coupons
        .list()
        .await
        .expect("coupons")
        .into_iter()
        .map(|c| c.code)
        .collect();
    assert_eq!(codes, vec!["SAVE20", "FLAT10", "EXPIRED"]);
}
