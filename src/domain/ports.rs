use super::details::{BankTransferInstructions, UpiInstructions};
use super::status::PaymentStatusView;
use super::submission::{PaymentSubmission, SubmitReceipt};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// The manual-payments backend as seen by the checkout pages.
#[async_trait]
pub trait ManualPaymentGateway: Send + Sync {
    async fn bank_details(&self) -> Result<BankTransferInstructions>;
    async fn upi_details(&self) -> Result<UpiInstructions>;
    async fn submit_payment(&self, submission: &PaymentSubmission) -> Result<SubmitReceipt>;
    async fn payment_status(&self, order_id: &str) -> Result<PaymentStatusView>;
}

/// Shared handle to a gateway; each page gets its own clone.
pub type GatewayHandle = Arc<dyn ManualPaymentGateway>;
