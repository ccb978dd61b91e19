use crate::config::Config;
use crate::domain::details::{BankTransferInstructions, UpiInstructions};
use crate::domain::ports::ManualPaymentGateway;
use crate::domain::status::PaymentStatusView;
use crate::domain::submission::{PaymentSubmission, SubmitReceipt};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

const BANK_DETAILS_PATH: &str = "/api/manual-payments/bank-details";
const UPI_DETAILS_PATH: &str = "/api/manual-payments/upi-details";
const SUBMIT_PAYMENT_PATH: &str = "/api/manual-payments/submit-payment";
const PAYMENT_STATUS_PATH: &str = "/api/manual-payments/payment-status";

/// Gateway speaking the manual-payments HTTP contract.
///
/// No retries and no cancellation: a dropped future simply discards its response.
#[derive(Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    config: Config,
}

impl HttpGateway {
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.config.endpoint(path)?;
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| PaymentError::Network(format!("Failed to parse response: {e}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(PaymentError::BackendRejection {
            status: status.as_u16(),
            detail: rejection_detail(status.as_u16(), &body),
        })
    }
}

/// Pulls the human-readable `detail` out of an error body.
///
/// FastAPI sends validation failures as a list of `{loc, msg}` objects; those are joined.
fn rejection_detail(status: u16, body: &str) -> String {
    let fallback = || format!("Request failed with status {status}");
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback();
    };
    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.clone(),
        Some(serde_json::Value::Array(items)) if !items.is_empty() => items
            .iter()
            .map(|item| match item.get("msg").and_then(|m| m.as_str()) {
                Some(msg) => msg.to_string(),
                None => item.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => fallback(),
    }
}

#[async_trait]
impl ManualPaymentGateway for HttpGateway {
    async fn bank_details(&self) -> Result<BankTransferInstructions> {
        self.get_json(BANK_DETAILS_PATH).await
    }

    async fn upi_details(&self) -> Result<UpiInstructions> {
        self.get_json(UPI_DETAILS_PATH).await
    }

    async fn submit_payment(&self, submission: &PaymentSubmission) -> Result<SubmitReceipt> {
        let url = self.config.endpoint(SUBMIT_PAYMENT_PATH)?;
        debug!(%url, method = %submission.payment_method, "POST");
        let response = self.client.post(url).json(submission).send().await?;
        decode(response).await
    }

    async fn payment_status(&self, order_id: &str) -> Result<PaymentStatusView> {
        let mut url = self.config.endpoint(PAYMENT_STATUS_PATH)?;
        url.path_segments_mut()
            .map_err(|_| PaymentError::Config("backend URL cannot be a base".to_string()))?
            .push(order_id);
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        decode(response).await
    }
}
