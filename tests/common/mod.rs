#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub type Reply = (StatusCode, Value);

/// Scriptable stand-in for the manual-payments backend.
#[derive(Clone, Default)]
pub struct MockBackend {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    submit_calls: AtomicUsize,
    status_calls: AtomicUsize,
    submit_replies: Mutex<VecDeque<Reply>>,
    status_replies: Mutex<VecDeque<Reply>>,
    bank_reply: Mutex<Option<Reply>>,
    upi_reply: Mutex<Option<Reply>>,
    submissions: Mutex<Vec<Value>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit_calls(&self) -> usize {
        self.inner.submit_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.inner.status_calls.load(Ordering::SeqCst)
    }

    pub fn last_submission(&self) -> Option<Value> {
        self.inner.submissions.lock().unwrap().last().cloned()
    }

    pub fn reply_to_submit(&self, status: StatusCode, body: Value) -> &Self {
        self.inner
            .submit_replies
            .lock()
            .unwrap()
            .push_back((status, body));
        self
    }

    pub fn reply_to_status(&self, status: StatusCode, body: Value) -> &Self {
        self.inner
            .status_replies
            .lock()
            .unwrap()
            .push_back((status, body));
        self
    }

    pub fn override_bank(&self, status: StatusCode, body: Value) -> &Self {
        *self.inner.bank_reply.lock().unwrap() = Some((status, body));
        self
    }

    pub fn override_upi(&self, status: StatusCode, body: Value) -> &Self {
        *self.inner.upi_reply.lock().unwrap() = Some((status, body));
        self
    }

    fn router(&self) -> Router {
        Router::new()
            .route("/api/manual-payments/bank-details", get(bank_details))
            .route("/api/manual-payments/upi-details", get(upi_details))
            .route("/api/manual-payments/submit-payment", post(submit_payment))
            .route(
                "/api/manual-payments/payment-status/{order_id}",
                get(payment_status),
            )
            .with_state(self.clone())
    }
}

pub fn default_bank() -> Value {
    json!({
        "bank_details": {
            "account_name": "WRITEAI PRO",
            "account_number": "998877665544",
            "ifsc_code": "HDFC0001234",
            "bank_name": "HDFC Bank",
            "branch": "Pune",
            "account_type": "Current Account"
        },
        "instructions": ["Transfer the exact amount", "Use your Order ID as reference"]
    })
}

pub fn default_upi() -> Value {
    json!({
        "upi_details": {"upi_id": "writeai@hdfcbank", "upi_name": "WRITEAI PRO", "qr_code_url": null},
        "instructions": ["Open any UPI app", "Pay to the above UPI ID"]
    })
}

async fn bank_details(State(backend): State<MockBackend>) -> (StatusCode, Json<Value>) {
    let reply = backend.inner.bank_reply.lock().unwrap().clone();
    let (status, body) = reply.unwrap_or((StatusCode::OK, default_bank()));
    (status, Json(body))
}

async fn upi_details(State(backend): State<MockBackend>) -> (StatusCode, Json<Value>) {
    let reply = backend.inner.upi_reply.lock().unwrap().clone();
    let (status, body) = reply.unwrap_or((StatusCode::OK, default_upi()));
    (status, Json(body))
}

async fn submit_payment(
    State(backend): State<MockBackend>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.inner.submit_calls.fetch_add(1, Ordering::SeqCst);
    backend.inner.submissions.lock().unwrap().push(body);
    let reply = backend.inner.submit_replies.lock().unwrap().pop_front();
    let (status, body) = reply.unwrap_or((
        StatusCode::OK,
        json!({"success": true, "order_id": "ORD123", "status": "pending_verification"}),
    ));
    (status, Json(body))
}

async fn payment_status(
    State(backend): State<MockBackend>,
    Path(order_id): Path<String>,
) -> (StatusCode, Json<Value>) {
    backend.inner.status_calls.fetch_add(1, Ordering::SeqCst);
    let reply = backend.inner.status_replies.lock().unwrap().pop_front();
    let (status, body) = reply.unwrap_or((
        StatusCode::NOT_FOUND,
        json!({"detail": format!("Payment record not found: {order_id}")}),
    ));
    (status, Json(body))
}

pub fn status_body(order_id: &str, status: &str, package: &str, amount: f64) -> Value {
    json!({
        "order_id": order_id,
        "status": status,
        "package_name": package,
        "amount": amount,
        "currency": "INR",
        "submitted_at": "2025-03-01T09:30:00",
        "verified_at": null,
        "message": format!("status is {status}")
    })
}

/// Serves `backend` on the current runtime and returns its base URL.
pub async fn spawn(backend: &MockBackend) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = backend.router();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Serves `backend` from a background thread, for tests that drive the binary.
pub fn spawn_in_thread(backend: &MockBackend) -> String {
    let backend = backend.clone();
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let url = spawn(&backend).await;
            tx.send(url).unwrap();
            std::future::pending::<()>().await;
        });
    });
    rx.recv().unwrap()
}

/// A base URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
