//! Kite adapter tests against a mock HTTP server.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::json;
use tagged_orders::application::ports::{
    BrokerError, BrokerPort, InstrumentReferenceError, InstrumentReferencePort,
};
use tagged_orders::infrastructure::broker::kite::{KiteBrokerAdapter, KiteConfig, KiteHttpClient};
use tagged_orders::infrastructure::instruments::KiteInstrumentLoader;
use tagged_orders::infrastructure::retry::RetryConfig;
use tagged_orders::{Order, TransactionType};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INSTRUMENTS_CSV: &str = "\
instrument_token,exchange_token,tradingsymbol,name,last_price,expiry,strike,tick_size,lot_size,instrument_type,segment,exchange
10001,39,NIFTY24SEP24000CE,\"NIFTY\",0,2024-09-26,24000,0.05,25,CE,NFO-OPT,NFO
10002,40,BANKNIFTY24SEP52000PE,\"BANKNIFTY\",0,2024-09-25,52000,0.05,15,PE,NFO-OPT,NFO
10003,41,NIFTY24SEPFUT,\"NIFTY\",0,2024-09-26,0,0.05,25,FUT,NFO-FUT,NFO
10004,42,RELIANCE24SEP3000CE,\"RELIANCE\",0,2024-09-26,3000,0.05,250,CE,NFO-OPT,NFO
";

fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 3,
        initial_backoff: Duration::from_millis(1),
        max_backoff: Duration::from_millis(5),
        multiplier: 2.0,
        jitter_factor: 0.0,
    }
}

fn config(server: &MockServer, retry: RetryConfig) -> KiteConfig {
    KiteConfig::new("api_key".to_string(), "access_token".to_string())
        .with_base_url(server.uri())
        .with_retry(retry)
}

#[tokio::test]
async fn fetch_orders_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(header("X-Kite-Version", "3"))
        .and(header("Authorization", "token api_key:access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": [{
                "order_id": "240920000000001",
                "order_timestamp": "2024-09-20 09:15:00",
                "transaction_type": "SELL",
                "tag": "straddle1",
                "tradingsymbol": "NIFTY24SEP24000CE",
                "quantity": 25,
                "status": "COMPLETE"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = KiteBrokerAdapter::new(&config(&server, RetryConfig::no_retry())).unwrap();
    let orders = adapter.fetch_orders().await.unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].order_key().as_deref(), Some("240920000000001"));
    assert_eq!(orders[0].get("quantity"), Some(&json!(25)));

    let order = Order::try_from(orders[0].clone()).unwrap();
    assert_eq!(order.transaction_type, TransactionType::Sell);
}

#[tokio::test]
async fn orders_that_would_not_decode_are_returned_raw() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": [{
                "order_id": "240920000000002",
                "order_timestamp": null,
                "transaction_type": "BUY",
                "tag": null,
                "status": "REJECTED"
            }]
        })))
        .mount(&server)
        .await;

    let adapter = KiteBrokerAdapter::new(&config(&server, RetryConfig::no_retry())).unwrap();
    let orders = adapter.fetch_orders().await.unwrap();

    assert_eq!(orders.len(), 1);
    assert!(orders[0].tag().is_none());
}

#[tokio::test]
async fn token_exception_is_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "status": "error",
            "message": "Incorrect `api_key` or `access_token`.",
            "error_type": "TokenException"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = KiteBrokerAdapter::new(&config(&server, fast_retry())).unwrap();
    let err = adapter.fetch_orders().await.unwrap_err();

    assert!(matches!(err, BrokerError::AuthenticationError { .. }));
}

#[tokio::test]
async fn error_envelope_is_unknown_broker_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "message": "Something went wrong",
            "error_type": "GeneralException"
        })))
        .mount(&server)
        .await;

    let adapter = KiteBrokerAdapter::new(&config(&server, RetryConfig::no_retry())).unwrap();
    let err = adapter.fetch_orders().await.unwrap_err();

    match err {
        BrokerError::Unknown { message } => assert!(message.contains("GeneralException")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let adapter = KiteBrokerAdapter::new(&config(&server, RetryConfig::no_retry())).unwrap();
    let err = adapter.fetch_orders().await.unwrap_err();

    assert!(matches!(err, BrokerError::InvalidResponse { .. }));
}

#[tokio::test]
async fn server_errors_are_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": []
        })))
        .with_priority(2)
        .mount(&server)
        .await;

    let adapter = KiteBrokerAdapter::new(&config(&server, fast_retry())).unwrap();
    let orders = adapter.fetch_orders().await.unwrap();

    assert!(orders.is_empty());
}

#[tokio::test]
async fn persistent_server_errors_exhaust_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let adapter = KiteBrokerAdapter::new(&config(&server, fast_retry())).unwrap();
    let err = adapter.fetch_orders().await.unwrap_err();

    assert!(matches!(err, BrokerError::ConnectionError { .. }));
}

#[tokio::test]
async fn instruments_dump_is_filtered_to_index_derivatives() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/instruments/NFO"))
        .respond_with(ResponseTemplate::new(200).set_body_string(INSTRUMENTS_CSV))
        .expect(1)
        .mount(&server)
        .await;

    let as_of = NaiveDate::from_ymd_opt(2024, 9, 20).unwrap();
    let client = KiteHttpClient::new(&config(&server, RetryConfig::no_retry())).unwrap();
    let loader = KiteInstrumentLoader::with_client(client).with_as_of(as_of);

    let dataset = loader.load_reference().await.unwrap();

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.as_of(), as_of);
    assert_eq!(dataset.by_name("RELIANCE").count(), 0);

    let entry = dataset.by_tradingsymbol("BANKNIFTY24SEP52000PE").next().unwrap();
    assert_eq!(entry.name, "BANKNIFTY");
    assert_eq!(entry.expiry, NaiveDate::from_ymd_opt(2024, 9, 25).unwrap());
    assert_eq!(entry.strike, dec!(52000));
    assert_eq!(entry.instrument_type, "PE");
}

#[tokio::test]
async fn corrupt_instruments_dump_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/instruments/NFO"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "instrument_token,exchange_token,tradingsymbol,name,last_price,expiry,strike,tick_size,lot_size,instrument_type,segment,exchange\n\
             1,2,NIFTY24SEP24000CE,NIFTY,0,26-09-2024,24000,0.05,25,CE,NFO-OPT,NFO\n",
        ))
        .mount(&server)
        .await;

    let client = KiteHttpClient::new(&config(&server, RetryConfig::no_retry())).unwrap();
    let err = KiteInstrumentLoader::with_client(client)
        .load_reference()
        .await
        .unwrap_err();

    assert!(matches!(err, InstrumentReferenceError::ParseError { .. }));
}
