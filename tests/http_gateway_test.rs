use axum::http::StatusCode;
use manual_pay::config::Config;
use manual_pay::domain::package::lookup;
use manual_pay::domain::ports::ManualPaymentGateway;
use manual_pay::domain::status::VerificationStatus;
use manual_pay::domain::submission::{PaymentMethod, PaymentSubmission, ProofForm};
use manual_pay::error::PaymentError;
use manual_pay::infrastructure::http::HttpGateway;
use rust_decimal_macros::dec;
use serde_json::json;

mod common;

fn gateway(url: &str) -> HttpGateway {
    HttpGateway::new(Config::new(url).unwrap()).unwrap()
}

fn submission() -> PaymentSubmission {
    let form = ProofForm {
        user_name: "Asha Rao".into(),
        user_email: "asha@example.com".into(),
        user_phone: "+91 98765 43210".into(),
        transaction_id: "UTR123456789".into(),
        notes: String::new(),
    };
    PaymentSubmission::new(&lookup(Some("pro")), PaymentMethod::Bank, &form)
}

#[tokio::test]
async fn test_fetches_both_detail_panels() {
    let backend = common::MockBackend::new();
    let url = common::spawn(&backend).await;
    let gateway = gateway(&url);

    let bank = gateway.bank_details().await.unwrap();
    assert_eq!(bank.bank_details.ifsc_code, "HDFC0001234");
    assert_eq!(bank.instructions.len(), 2);

    let upi = gateway.upi_details().await.unwrap();
    assert_eq!(upi.upi_details.upi_id, "writeai@hdfcbank");
}

#[tokio::test]
async fn test_submit_sends_contract_body() {
    let backend = common::MockBackend::new();
    let url = common::spawn(&backend).await;

    let receipt = gateway(&url).submit_payment(&submission()).await.unwrap();
    assert_eq!(receipt.order_id, "ORD123");
    assert_eq!(backend.submit_calls(), 1);

    let body = backend.last_submission().unwrap();
    assert_eq!(
        body,
        json!({
            "package_id": "pro",
            "package_name": "Pro",
            "amount": 6500.0,
            "currency": "INR",
            "payment_method": "bank",
            "transaction_id": "UTR123456789",
            "user_name": "Asha Rao",
            "user_email": "asha@example.com",
            "user_phone": "+91 98765 43210",
            "notes": null
        })
    );
}

#[tokio::test]
async fn test_rejection_detail_is_verbatim() {
    let backend = common::MockBackend::new();
    backend.reply_to_submit(
        StatusCode::BAD_REQUEST,
        json!({"detail": "Amount mismatch. Expected: ₹6500, Received: ₹10"}),
    );
    let url = common::spawn(&backend).await;

    let err = gateway(&url)
        .submit_payment(&submission())
        .await
        .unwrap_err();
    match err {
        PaymentError::BackendRejection { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail, "Amount mismatch. Expected: ₹6500, Received: ₹10");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_unprocessable_entity_detail_list() {
    let backend = common::MockBackend::new();
    backend.reply_to_submit(
        StatusCode::UNPROCESSABLE_ENTITY,
        json!({"detail": [{"loc": ["body", "user_email"], "msg": "field required", "type": "value_error.missing"}]}),
    );
    let url = common::spawn(&backend).await;

    let err = gateway(&url)
        .submit_payment(&submission())
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "field required");
}

#[tokio::test]
async fn test_status_lookup_and_not_found() {
    let backend = common::MockBackend::new();
    backend.reply_to_status(
        StatusCode::OK,
        common::status_body("ORD123", "verified", "Starter", 2400.0),
    );
    let url = common::spawn(&backend).await;
    let gateway = gateway(&url);

    let view = gateway.payment_status("ORD123").await.unwrap();
    assert_eq!(view.status, Some(VerificationStatus::Verified));
    assert_eq!(view.amount, dec!(2400));

    let err = gateway.payment_status("ORD123").await.unwrap_err();
    assert!(matches!(
        err,
        PaymentError::BackendRejection { status: 404, .. }
    ));
    assert_eq!(backend.status_calls(), 2);
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let url = common::dead_url().await;
    let err = gateway(&url).upi_details().await.unwrap_err();
    assert!(matches!(err, PaymentError::Network(_)));
}

#[tokio::test]
async fn test_malformed_success_body_is_network_error() {
    let backend = common::MockBackend::new();
    backend.override_upi(StatusCode::OK, json!({"unexpected": true}));
    let url = common::spawn(&backend).await;

    let err = gateway(&url).upi_details().await.unwrap_err();
    assert!(matches!(err, PaymentError::Network(_)));
}
