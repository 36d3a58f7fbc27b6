//! Integration tests using wiremock to simulate the Durianpay API.

use durianpay::resources::disbursements::{
    SubmitDisbursementOptions, SubmitDisbursementPayload, ValidateDisbursementPayload,
    ValidateDisbursementResponse,
};
use durianpay::resources::orders::{CreateOrderPayload, FetchOrdersOptions};
use durianpay::resources::settlements::FetchSettlementsOptions;
use durianpay::{Client, Error, SDK_INTERNAL_ERROR};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "dp_test_key";
// base64("dp_test_key:")
const BASIC_AUTH: &str = "Basic ZHBfdGVzdF9rZXk6";

fn client_for(mock_server: &MockServer) -> Client {
    Client::builder()
        .api_key(API_KEY)
        .base_url(mock_server.uri())
        .unwrap()
        .build()
        .unwrap()
}

fn validate_payload() -> ValidateDisbursementPayload {
    ValidateDisbursementPayload {
        idempotency_key: "1".to_string(),
        account_number: "123".to_string(),
        bank_code: "bca".to_string(),
    }
}

#[tokio::test]
async fn test_validate_disbursement_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/disbursements/validate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "account_number": "123737383830",
                "bank_code": "bca",
                "status": "processing"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client
        .disbursements()
        .validate(&validate_payload())
        .await
        .unwrap();

    assert_eq!(
        response,
        ValidateDisbursementResponse {
            account_number: "123737383830".to_string(),
            account_holder: String::new(),
            bank_code: "bca".to_string(),
            status: "processing".to_string(),
        }
    );
}

#[tokio::test]
async fn test_validate_disbursement_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/disbursements/validate"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "error reading request body",
            "error_code": "DPAY_INTERNAL_ERROR"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.disbursements().validate(&validate_payload()).await;

    match result {
        Err(Error::Api {
            status,
            message,
            error_code,
            ..
        }) => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(message, "error reading request body");
            assert_eq!(error_code, "DPAY_INTERNAL_ERROR");
        }
        _ => panic!("Expected Api error, got {:?}", result),
    }
}

#[tokio::test]
async fn test_create_order_malformed_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/orders"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .orders()
        .create(&CreateOrderPayload {
            amount: "10000".to_string(),
            currency: "IDR".to_string(),
            order_ref_id: "order_ref_001".to_string(),
            ..Default::default()
        })
        .await;

    match result {
        Err(e @ Error::MalformedErrorBody { .. }) => {
            assert_eq!(e.error_code(), SDK_INTERNAL_ERROR);
            assert_eq!(e.status(), None);
            assert_eq!(e.raw_response(), Some("upstream exploded"));
        }
        _ => panic!("Expected MalformedErrorBody, got {:?}", result),
    }
}

#[tokio::test]
async fn test_request_headers_and_body() {
    let mock_server = MockServer::start().await;
    let payload = validate_payload();
    let expected_body = String::from_utf8(serde_json::to_vec(&payload).unwrap()).unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/disbursements/validate"))
        .and(header("Authorization", BASIC_AUTH))
        .and(header("Content-Type", "application/json"))
        .and(header("X-Idempotency-Key", "1"))
        .and(body_string(expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client.disbursements().validate(&payload).await.unwrap();
}

#[tokio::test]
async fn test_submit_sends_query_options_and_idempotency_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/disbursements/submit"))
        .and(query_param("force_disburse", "true"))
        .and(header("X-Idempotency-Key", "batch-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "dis_XkGq12",
                "name": "payroll",
                "total_amount": "20000.00",
                "total_disbursements": 2,
                "description": "monthly",
                "fees": 8000
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let disbursement = client
        .disbursements()
        .submit(
            &SubmitDisbursementPayload {
                idempotency_key: "batch-42".to_string(),
                name: "payroll".to_string(),
                description: "monthly".to_string(),
                items: Vec::new(),
            },
            &SubmitDisbursementOptions {
                force_disburse: Some(true),
                skip_validation: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(disbursement.id, "dis_XkGq12");
    assert_eq!(disbursement.total_disbursements, 2);
    assert_eq!(disbursement.fees, 8000);
    assert_eq!(disbursement.status, "");

    let requests = mock_server.received_requests().await.unwrap();
    assert!(!requests[0].url.query().unwrap_or_default().contains("skip_validation"));
}

#[tokio::test]
async fn test_operation_without_idempotency_key_sends_empty_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/orders"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"orders": [], "total": 0}})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let orders = client
        .orders()
        .fetch(&FetchOrdersOptions::default())
        .await
        .unwrap();
    assert_eq!(orders.total, 0);

    let requests = mock_server.received_requests().await.unwrap();
    let idempotency_key = requests[0]
        .headers
        .get("x-idempotency-key")
        .map(|value| value.to_str().unwrap().to_string())
        .unwrap_or_default();
    assert_eq!(idempotency_key, "");
}

#[tokio::test]
async fn test_non_200_success_status_is_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/merchants/balance"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"data": {"balance": "100"}})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.disbursements().fetch_balance().await;

    assert!(
        matches!(result, Err(Error::MalformedErrorBody { .. })),
        "Expected MalformedErrorBody, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_non_200_success_status_with_error_body_keeps_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/merchants/balance"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "error": "balance is being recalculated",
            "error_code": "DPAY_BALANCE_PENDING"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.disbursements().fetch_balance().await.unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(202));
    assert_eq!(err.error_code(), "DPAY_BALANCE_PENDING");
}

#[tokio::test]
async fn test_deserialization_error_on_unexpected_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/disbursements/banks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"not": "a list"}})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.disbursements().fetch_banks().await;

    match result {
        Err(Error::Deserialization { status, .. }) => assert_eq!(status.as_u16(), 200),
        _ => panic!("Expected Deserialization, got {:?}", result),
    }
}

#[tokio::test]
async fn test_settlements_are_not_enveloped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/settlements/details"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "settlements": [{"id": "stl_1", "status": "settled", "amount": "5000"}],
            "total": 1
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let details = client
        .settlements()
        .fetch_details(&FetchSettlementsOptions {
            limit: Some(5),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(details.total, 1);
    assert_eq!(details.settlements[0].id, "stl_1");
    assert_eq!(details.settlements[0].status, "settled");
}

#[tokio::test]
async fn test_path_id_is_substituted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/disbursements/dis_XkGq12/approve"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"id": "dis_XkGq12", "status": "approved"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let disbursement = client
        .disbursements()
        .approve("dis_XkGq12", &Default::default())
        .await
        .unwrap();

    assert_eq!(disbursement.status, "approved");
}

#[tokio::test]
async fn test_path_id_stays_one_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/disbursements/..%2F..%2Fmerchants%2Fbalance"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"id": "dis_1", "status": "approved"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/merchants/balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"balance": "1"}})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let disbursement = client
        .disbursements()
        .fetch_by_id("../../merchants/balance")
        .await
        .unwrap();

    assert_eq!(disbursement.id, "dis_1");
}

#[tokio::test]
async fn test_dot_segment_id_is_rejected_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.disbursements().fetch_by_id("..").await;

    match result {
        Err(e @ Error::Configuration(_)) => {
            assert_eq!(e.error_code(), SDK_INTERNAL_ERROR);
            assert_eq!(e.status(), None);
        }
        other => panic!("Expected Configuration error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_ewallet_endpoints_send_is_live_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/ewallet/account/ewa_123"))
        .and(header("Is-live", "true"))
        .and(query_param("wallet_type", "GOPAY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "ewa_123", "wallet_type": "GOPAY", "balance": "250000"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let account = client
        .ewallet_accounts()
        .fetch_by_id(
            "ewa_123",
            &durianpay::resources::ewallet_accounts::FetchEwalletAccountOptions {
                wallet_type: Some("GOPAY".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(account.balance, "250000");
}

#[tokio::test]
async fn test_client_timeout_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/merchants/balance"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"balance": "1"}}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .api_key(API_KEY)
        .base_url(mock_server.uri())
        .unwrap()
        .timeout(Duration::from_millis(100))
        .build()
        .unwrap();

    let result = client.disbursements().fetch_balance().await;

    match result {
        Err(Error::Network(e)) => assert!(e.is_timeout()),
        _ => panic!("Expected Network timeout, got {:?}", result),
    }
}

#[tokio::test]
async fn test_dropping_the_future_cancels_the_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/merchants/balance"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"balance": "1"}}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = tokio::time::timeout(
        Duration::from_millis(100),
        client.disbursements().fetch_balance(),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_connection_refused_is_sdk_error() {
    let client = Client::builder()
        .api_key(API_KEY)
        .base_url("http://127.0.0.1:1")
        .unwrap()
        .build()
        .unwrap();

    let err = client.disbursements().fetch_balance().await.unwrap_err();

    assert!(matches!(err, Error::Network(_)));
    assert_eq!(err.error_code(), SDK_INTERNAL_ERROR);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_default_header_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/disbursements/banks"))
        .and(header("User-Agent", "shop/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::builder()
        .api_key(API_KEY)
        .base_url(mock_server.uri())
        .unwrap()
        .default_header("User-Agent", "shop/1.0")
        .unwrap()
        .build()
        .unwrap();

    let banks = client.disbursements().fetch_banks().await.unwrap();
    assert!(banks.is_empty());
}
