use async_trait::async_trait;
use checkout_types::domain::coupon::{Coupon, CouponDraft, DiscountQuote};
use checkout_types::ports::coupon_gateway::CouponGateway;
use checkout_types::ports::GatewayError;
use reqwest::Method;
use rust_decimal::Decimal;

use crate::transport::Transport;

/// HTTP adapter for the Coupon Service (`/coupons`).
#[derive(Clone, Debug)]
pub struct CouponsClient {
    transport: Transport,
}

impl CouponsClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CouponGateway for CouponsClient {
    async fn list(&self) -> Result<Vec<Coupon>, GatewayError> {
        let req = self.transport.request(Method::GET, &["coupons"])?;
        self.transport.fetch(req).await
    }

    async fn get(&self, id: i64) -> Result<Coupon, GatewayError> {
        let req = self
            .transport
            .request(Method::GET, &["coupons", &id.to_string()])?;
        self.transport.fetch(req).await
    }

    async fn get_by_code(&self, code: &str) -> Result<Coupon, GatewayError> {
        let req = self
            .transport
            .request(Method::GET, &["coupons", "code", code])?;
        self.transport.fetch(req).await
    }

    async fn create(&self, coupon: CouponDraft) -> Result<Coupon, GatewayError> {
        let req = self
            .transport
            .request(Method::POST, &["coupons"])?
            .json(&coupon);
        self.transport.fetch(req).await
    }

    async fn update(&self, id: i64, coupon: CouponDraft) -> Result<Coupon, GatewayError> {
        let req = self
            .transport
            .request(Method::PUT, &["coupons", &id.to_string()])?
            .json(&coupon);
        self.transport.fetch(req).await
    }

    async fn delete(&self, id: i64) -> Result<(), GatewayError> {
        let req = self
            .transport
            .request(Method::DELETE, &["coupons", &id.to_string()])?;
        self.transport.execute(req).await?;
        Ok(())
    }

    async fn deactivate(&self, id: i64) -> Result<Coupon, GatewayError> {
        let req = self
            .transport
            .request(Method::PATCH, &["coupons", &id.to_string(), "deactivate"])?;
        self.transport.fetch(req).await
    }

    async fn list_active(&self) -> Result<Vec<Coupon>, GatewayError> {
        let req = self.transport.request(Method::GET, &["coupons", "active"])?;
        self.transport.fetch(req).await
    }

    async fn list_valid(&self) -> Result<Vec<Coupon>, GatewayError> {
        let req = self.transport.request(Method::GET, &["coupons", "valid"])?;
        self.transport.fetch(req).await
    }

    async fn calculate_discount(
        &self,
        code: &str,
        order_amount: Decimal,
    ) -> Result<DiscountQuote, GatewayError> {
        let amount = order_amount.to_string();
        let req = self
            .transport
            .request(Method::POST, &["coupons", "calculate-discount"])?
            .query(&[("code", code), ("orderAmount", amount.as_str())]);
        self.transport.fetch(req).await
    }

    async fn use_code(&self, code: &str) -> Result<Coupon, GatewayError> {
        let req = self
            .transport
            .request(Method::PATCH, &["coupons", "code", code, "use"])?;
        self.transport.fetch(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_types::domain::coupon::CouponType;
    use chrono::NaiveDate;
    use httpmock::prelude::*;

    fn coupon(code: &str, used_count: i32) -> Coupon {
        let day = |m, d| {
            NaiveDate::from_ymd_opt(2026, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        Coupon {
            id: 1,
            code: code.into(),
            kind: CouponType::Percentage,
            value: Decimal::from(20),
            min_order_amount: Decimal::ZERO,
            max_uses: 100,
            used_count,
            valid_from: day(1, 1),
            valid_until: day(12, 31),
            active: true,
        }
    }

    fn client(server: &MockServer) -> CouponsClient {
        CouponsClient::new(Transport::new(&server.url("/api")).unwrap())
    }

    #[tokio::test]
    async fn calculate_discount_sends_code_and_amount_as_query() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/coupons/calculate-discount")
                .query_param("code", "SAVE20")
                .query_param("orderAmount", "199.99");
            then.status(200).json_body(serde_json::json!({
                "originalAmount": 199.99,
                "discount": 40.00,
                "finalAmount": 159.99
            }));
        });

        let quote = client(&server)
            .calculate_discount("SAVE20", "199.99".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(quote.discount, Decimal::from(40));
        assert_eq!(quote.final_amount, "159.99".parse::<Decimal>().unwrap());
        mock.assert();
    }

    #[tokio::test]
    async fn inapplicable_coupon_carries_service_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/coupons/calculate-discount");
            then.status(400)
                .json_body(serde_json::json!({ "message": "Coupon is not valid" }));
        });

        let err = client(&server)
            .calculate_discount("EXPIRED", Decimal::from(50))
            .await
            .unwrap_err();
        assert_eq!(err.message(), Some("Coupon is not valid"));
    }

    #[tokio::test]
    async fn use_code_patches_usage_endpoint() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::PATCH)
                .path("/api/coupons/code/SAVE20/use");
            then.status(200).json_body_obj(&coupon("SAVE20", 1));
        });

        let used = client(&server).use_code("SAVE20").await.unwrap();
        assert_eq!(used.used_count, 1);
        mock.assert();
    }

    #[tokio::test]
    async fn listing_and_admin_endpoints() {
        let server = MockServer::start();
        let all = server.mock(|when, then| {
            when.method(GET).path("/api/coupons");
            then.status(200).json_body_obj(&vec![coupon("SAVE20", 0)]);
        });
        let active = server.mock(|when, then| {
            when.method(GET).path("/api/coupons/active");
            then.status(200).json_body_obj(&vec![coupon("SAVE20", 0)]);
        });
        let valid = server.mock(|when, then| {
            when.method(GET).path("/api/coupons/valid");
            then.status(200).json_body(serde_json::json!([]));
        });
        let by_code = server.mock(|when, then| {
            when.method(GET).path("/api/coupons/code/SAVE20");
            then.status(200).json_body_obj(&coupon("SAVE20", 0));
        });
        let deactivate = server.mock(|when, then| {
            let mut off = coupon("SAVE20", 0);
            off.active = false;
            when.method(httpmock::Method::PATCH)
                .path("/api/coupons/1/deactivate");
            then.status(200).json_body_obj(&off);
        });
        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/api/coupons/1");
            then.status(204);
        });

        let client = client(&server);
        assert_eq!(client.list().await.unwrap().len(), 1);
        assert_eq!(client.list_active().await.unwrap().len(), 1);
        assert!(client.list_valid().await.unwrap().is_empty());
        assert_eq!(client.get_by_code("SAVE20").await.unwrap().id, 1);
        assert!(!client.deactivate(1).await.unwrap().active);
        client.delete(1).await.unwrap();

        for mock in [all, active, valid, by_code, deactivate, delete] {
            mock.assert();
        }
    }

    #[tokio::test]
    async fn create_omits_missing_code() {
        let server = MockServer::start();
        let template = coupon("AB12CD34", 0);
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/coupons")
                .json_body(serde_json::json!({
                    "type": "PERCENTAGE",
                    "value": 20.0,
                    "minOrderAmount": 0.0,
                    "maxUses": 100,
                    "validFrom": "2026-01-01T00:00:00",
                    "validUntil": "2026-12-31T00:00:00",
                    "active": true
                }));
            then.status(201).json_body_obj(&template);
        });

        let draft = CouponDraft {
            code: None,
            kind: CouponType::Percentage,
            value: Decimal::from(20),
            min_order_amount: Decimal::ZERO,
            max_uses: 100,
            valid_from: template.valid_from,
            valid_until: template.valid_until,
            active: true,
        };
        let created = client(&server).create(draft).await.unwrap();
        assert_eq!(created.code, "AB12CD34");
        mock.assert();
    }
}
