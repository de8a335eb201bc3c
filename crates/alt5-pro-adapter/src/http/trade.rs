/*
[INPUT]:  Account id and order parameters
[OUTPUT]: Order creation, listing and cancellation responses
[POS]:    HTTP layer - trading endpoints (require auth)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use reqwest::Method;

use crate::http::client::encode_component;
use crate::http::{Alt5Client, Result};
use crate::types::{ApiResponse, CreateOrderRequest, NewOrder};

impl Alt5Client {
    /// Place an order
    ///
    /// POST /frontoffice/api/{account_id}/order
    pub async fn create_order(&self, account_id: &str, order: NewOrder) -> Result<ApiResponse> {
        let endpoint = format!("/api/{}/order", encode_component(account_id));
        let body = CreateOrderRequest::from(order);
        self.request(Method::POST, &endpoint, Some(&body)).await
    }

    /// List the account's active orders
    ///
    /// GET /frontoffice/api/{account_id}/orders/my
    pub async fn get_orders(&self, account_id: &str) -> Result<ApiResponse> {
        let endpoint = format!("/api/{}/orders/my", encode_component(account_id));
        self.request_empty(Method::GET, &endpoint).await
    }

    /// Past orders of the account, oldest first
    ///
    /// GET /frontoffice/api/{account_id}/order_history?ascOrder=CreatedAt
    pub async fn get_order_history(&self, account_id: &str) -> Result<ApiResponse> {
        let endpoint = format!(
            "/api/{}/order_history?ascOrder=CreatedAt",
            encode_component(account_id)
        );
        self.request_empty(Method::GET, &endpoint).await
    }

    /// Cancel one order
    ///
    /// DELETE /frontoffice/api/{account_id}/orders/{order_id}
    pub async fn cancel_order(&self, account_id: &str, order_id: &str) -> Result<ApiResponse> {
        let endpoint = format!(
            "/api/{}/orders/{}",
            encode_component(account_id),
            encode_component(order_id)
        );
        self.request_empty(Method::DELETE, &endpoint).await
    }

    /// Cancel every order, optionally only on one market
    ///
    /// DELETE /frontoffice/api/{account_id}/orders?market={market}
    pub async fn cancel_all_orders(&self, account_id: &str, market: Option<&str>) -> Result<ApiResponse> {
        let account_id = encode_component(account_id);
        let endpoint = match market {
            Some(m) => format!("/api/{}/orders?market={}", account_id, encode_component(m)),
            None => format!("/api/{}/orders", account_id),
        };
        self.request_empty(Method::DELETE, &endpoint).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{Alt5Client, ClientConfig, Credentials};
    use crate::types::{NewOrder, OpenOrder, Side};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> Alt5Client {
        Alt5Client::with_config_and_base_url(
            ClientConfig::default(),
            &server.uri(),
            Credentials::api_key("pub-key", "priv-key"),
        )
        .expect("client init")
    }

    #[tokio::test]
    async fn test_create_order_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/frontoffice/api/A1/order"))
            .and(body_json(serde_json::json!({
                "Order": {
                    "Instrument": "xrp_usd",
                    "Type": "buy",
                    "Amount": 1.0,
                    "IsLimit": true,
                    "IsStop": false,
                    "ActivationPrice": null,
                    "Price": 0.01
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "ord-9"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let order = NewOrder::limit(
            "xrp_usd",
            Side::Buy,
            Decimal::from_str("1.0").unwrap(),
            Decimal::from_str("0.01").unwrap(),
        );
        let response = client(&server)
            .create_order("A1", order)
            .await
            .expect("create_order");

        assert!(response.success);
        assert_eq!(response.id_field(&["id", "orderId"]).as_deref(), Some("ord-9"));
    }

    #[tokio::test]
    async fn test_get_orders() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/frontoffice/api/A1/orders/my"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 5, "instrument": "xrp_usd", "type": "sell", "amount": 3, "price": 0.6}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server).get_orders("A1").await.expect("get_orders");
        let orders: Vec<OpenOrder> = response.decode().expect("decode orders");

        assert_eq!(orders[0].id, "5");
        assert_eq!(orders[0].side, Side::Sell);
    }

    #[tokio::test]
    async fn test_get_order_history_sorted_by_creation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/frontoffice/api/A1/order_history"))
            .and(query_param("ascOrder", "CreatedAt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "instrument": "xrp_usd", "type": "buy", "amount": 1, "price": 0.01, "status": "Cancelled"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .get_order_history("A1")
            .await
            .expect("get_order_history");
        let orders: Vec<OpenOrder> = response.decode().expect("decode history");

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].status.as_deref(), Some("Cancelled"));
    }

    #[tokio::test]
    async fn test_cancel_order_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/frontoffice/api/A1/orders/ord-9"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .cancel_order("A1", "ord-9")
            .await
            .expect("cancel_order");

        assert!(response.success);
        assert_eq!(response.status, 204);
    }

    #[tokio::test]
    async fn test_cancel_all_orders_with_market() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/frontoffice/api/A1/orders"))
            .and(query_param("market", "xrp_usd"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cancelled": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .cancel_all_orders("A1", Some("xrp_usd"))
            .await
            .expect("cancel_all_orders");

        assert!(response.success);
    }

    #[tokio::test]
    async fn test_cancel_all_orders_encodes_market() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/frontoffice/api/A1/orders"))
            .and(query_param("market", "a#b&c=d"))
            .and(query_param_is_missing("c"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .cancel_all_orders("A1", Some("a#b&c=d"))
            .await
            .expect("cancel_all_orders");

        assert!(response.success);
    }

    #[tokio::test]
    async fn test_cancel_order_encodes_order_id() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/frontoffice/api/A1/orders/x%2Fy"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .cancel_order("A1", "x/y")
            .await
            .expect("cancel_order");

        assert!(response.success);
    }
}
