use mudrex::api::types::Asset;
use mudrex::core::kernel::RestClient;
use mudrex::{build_client, ErrorKind, MudrexConfig, MudrexError};
use reqwest::Method;
use rust_decimal::Decimal;
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_SECRET: &str = "test-api-secret";

fn create_test_config(base_url: &str) -> MudrexConfig {
    MudrexConfig::new(TEST_SECRET.to_string())
        .base_url(base_url.to_string())
        .requests_per_second(100.0)
}

async fn mount_error(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/assets/BTC-USD"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

async fn fetch_asset(server: &MockServer) -> Result<Asset, MudrexError> {
    let rest = build_client(&create_test_config(&server.uri())).unwrap();
    rest.get_json("/assets/BTC-USD").await
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[tokio::test]
    async fn test_sends_secret_header_and_json_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/assets/BTC-USD"))
            .and(header("X-Authentication", TEST_SECRET))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": { "asset_id": "BTC-USD", "symbol": "BTCUSDT", "max_leverage": "100" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let asset = fetch_asset(&server).await.unwrap();
        assert_eq!(asset.symbol, "BTCUSDT");
        assert_eq!(asset.max_leverage, Some(Decimal::from(100)));
    }

    #[tokio::test]
    async fn test_bodyless_request_sends_empty_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/positions/pos-1/close"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
            .mount(&server)
            .await;

        let rest = build_client(&create_test_config(&server.uri())).unwrap();
        rest.send_ack(Method::POST, "/positions/pos-1/close", None)
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].body.is_empty());
        assert_eq!(
            requests[0].headers.get("content-type").unwrap().to_str().unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let cases = [
            (401, ErrorKind::Authentication),
            (429, ErrorKind::RateLimit),
            (400, ErrorKind::Validation),
            (404, ErrorKind::NotFound),
            (409, ErrorKind::Conflict),
            (500, ErrorKind::Server),
            (503, ErrorKind::Server),
            (418, ErrorKind::Generic),
        ];

        for (status, expected) in cases {
            let server = MockServer::start().await;
            mount_error(
                &server,
                status,
                json!({ "success": false, "message": "nope", "error": { "code": 42 } }),
            )
            .await;

            let err = fetch_asset(&server).await.unwrap_err();
            assert_eq!(err.kind(), expected, "status {}", status);
            assert_eq!(err.http_status(), i32::from(status));
            assert_eq!(err.code(), 42);
            assert_eq!(err.message(), "nope");
        }
    }

    #[tokio::test]
    async fn test_insufficient_balance_by_code() {
        let server = MockServer::start().await;
        mount_error(
            &server,
            400,
            json!({ "success": false, "message": "cannot place order", "error": { "code": 1002 } }),
        )
        .await;

        let err = fetch_asset(&server).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientBalance);
        assert!(err.is_validation());
        assert_eq!(err.code(), 1002);
    }

    #[tokio::test]
    async fn test_insufficient_balance_by_message() {
        let server = MockServer::start().await;
        mount_error(
            &server,
            400,
            json!({ "success": false, "message": "insufficient balance in futures wallet" }),
        )
        .await;

        let err = fetch_asset(&server).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientBalance);
        assert_eq!(err.message(), "insufficient balance in futures wallet");
    }

    #[tokio::test]
    async fn test_missing_message_falls_back_to_raw_body() {
        let server = MockServer::start().await;
        let body = r#"{"success":false,"data":{"reason":"insufficient balance"},"error":{"code":5,"message":"rejected"}}"#;
        Mock::given(method("GET"))
            .and(path("/assets/BTC-USD"))
            .respond_with(ResponseTemplate::new(400).set_body_string(body))
            .mount(&server)
            .await;

        let err = fetch_asset(&server).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientBalance);
        assert_eq!(err.code(), 5);
        assert_eq!(err.message(), body);
    }

    #[tokio::test]
    async fn test_empty_error_body_is_generic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/assets/BTC-USD"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = fetch_asset(&server).await.unwrap_err();
        assert!(matches!(err, MudrexError::Api(_)));
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.http_status(), 401);
        assert_eq!(err.code(), -1);
    }

    #[tokio::test]
    async fn test_non_json_error_body_is_generic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/assets/BTC-USD"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let err = fetch_asset(&server).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.http_status(), 502);
        assert_eq!(err.code(), -1);
        assert!(err.message().contains("Bad Gateway"));
    }

    #[tokio::test]
    async fn test_missing_data_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/assets/BTC-USD"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": null })),
            )
            .mount(&server)
            .await;

        let err = fetch_asset(&server).await.unwrap_err();
        assert!(matches!(err, MudrexError::InvalidResponse(_)));
        assert_eq!(err.kind(), ErrorKind::Generic);
    }

    #[tokio::test]
    async fn test_unsuccessful_envelope_on_ok_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/assets/BTC-USD"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "asset delisted",
                "data": { "asset_id": "BTC-USD" }
            })))
            .mount(&server)
            .await;

        let err = fetch_asset(&server).await.unwrap_err();
        assert!(matches!(err, MudrexError::Api(_)));
        assert_eq!(err.http_status(), 200);
        assert_eq!(err.message(), "asset delisted");
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let rest = build_client(&create_test_config("http://127.0.0.1:1")).unwrap();
        let err = rest.get_json::<Asset>("/assets/BTC-USD").await.unwrap_err();

        assert!(matches!(err, MudrexError::Transport(_)));
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.code(), -1);
        assert_eq!(err.http_status(), -1);
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/assets/BTC-USD"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "data": {} }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = create_test_config(&server.uri()).timeout_seconds(1);
        let rest = build_client(&config).unwrap();
        let err = rest.get_json::<Asset>("/assets/BTC-USD").await.unwrap_err();

        match err {
            MudrexError::Transport(ref e) => assert!(e.is_timeout()),
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_requests_are_spaced_by_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/assets/BTC-USD"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": {} })),
            )
            .expect(3)
            .mount(&server)
            .await;

        let config = create_test_config(&server.uri()).requests_per_second(4.0);
        let rest = build_client(&config).unwrap();

        let start = Instant::now();
        for _ in 0..3 {
            rest.get_json::<Asset>("/assets/BTC-USD").await.unwrap();
        }
        // two gaps of 250ms
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_limiter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/assets/BTC-USD"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": {} })),
            )
            .expect(4)
            .mount(&server)
            .await;

        let config = create_test_config(&server.uri()).requests_per_second(10.0);
        let rest = build_client(&config).unwrap();

        let start = Instant::now();
        let calls = (0..4).map(|_| {
            let rest = rest.clone();
            async move { rest.get_json::<Asset>("/assets/BTC-USD").await }
        });
        for result in futures::future::join_all(calls).await {
            assert!(result.is_ok());
        }
        // three gaps of 100ms across clones
        assert!(start.elapsed() >= Duration::from_millis(300));
    }
}
