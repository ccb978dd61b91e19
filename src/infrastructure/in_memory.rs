use crate::domain::details::{BankDetails, BankTransferInstructions, UpiDetails, UpiInstructions};
use crate::domain::ports::ManualPaymentGateway;
use crate::domain::status::{PaymentStatusView, VerificationStatus};
use crate::domain::submission::{PaymentSubmission, SubmitReceipt};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredPayment {
    submission: PaymentSubmission,
    amount: Decimal,
    status: VerificationStatus,
    submitted_at: String,
    verified_at: Option<String>,
}

#[derive(Debug, Default)]
struct Faults {
    bank_details: Option<PaymentError>,
    upi_details: Option<PaymentError>,
    next_submit: Option<PaymentError>,
}

/// An in-process stand-in for the manual-payments backend.
///
/// Uses `Arc<RwLock<..>>` so clones share one set of records. Submissions are stored as
/// `pending` under an `ORD` + 8 hex digit order id. Faults can be scripted per endpoint.
/// Like the backend, it only accepts a numeric amount; `Custom` is refused with a 422.
#[derive(Clone)]
pub struct InMemoryGateway {
    bank: BankTransferInstructions,
    upi: UpiInstructions,
    payments: Arc<RwLock<HashMap<String, StoredPayment>>>,
    faults: Arc<RwLock<Faults>>,
    next_order: Arc<AtomicU32>,
    submit_calls: Arc<AtomicU32>,
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new(reference_bank_details(), reference_upi_details())
    }
}

impl InMemoryGateway {
    pub fn new(bank: BankTransferInstructions, upi: UpiInstructions) -> Self {
        Self {
            bank,
            upi,
            payments: Arc::default(),
            faults: Arc::default(),
            next_order: Arc::new(AtomicU32::new(1)),
            submit_calls: Arc::default(),
        }
    }

    /// Number of submit requests received, including failed ones.
    pub fn submit_calls(&self) -> u32 {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub async fn fail_bank_details(&self, error: PaymentError) {
        self.faults.write().await.bank_details = Some(error);
    }

    pub async fn fail_upi_details(&self, error: PaymentError) {
        self.faults.write().await.upi_details = Some(error);
    }

    /// Makes the next submit fail once with `error`.
    pub async fn fail_next_submit(&self, error: PaymentError) {
        self.faults.write().await.next_submit = Some(error);
    }

    /// Moves a stored payment to a new status, as an operator would.
    pub async fn set_status(&self, order_id: &str, status: VerificationStatus) -> Result<()> {
        let mut payments = self.payments.write().await;
        let payment = payments
            .get_mut(order_id)
            .ok_or_else(|| not_found(order_id))?;
        payment.status = status;
        payment.verified_at = match status {
            VerificationStatus::Verified | VerificationStatus::Rejected => {
                Some(Utc::now().naive_utc().to_string())
            }
            _ => None,
        };
        Ok(())
    }

    pub async fn stored_submission(&self, order_id: &str) -> Option<PaymentSubmission> {
        let payments = self.payments.read().await;
        payments.get(order_id).map(|p| p.submission.clone())
    }
}

fn not_found(order_id: &str) -> PaymentError {
    PaymentError::BackendRejection {
        status: 404,
        detail: format!("Payment record not found: {order_id}"),
    }
}

fn status_message(status: VerificationStatus) -> &'static str {
    match status {
        VerificationStatus::Pending => {
            "Your payment is under verification. You'll receive an email once verified."
        }
        VerificationStatus::Verified => "Payment verified! Your subscription is now active.",
        VerificationStatus::Rejected => "Payment verification failed. Please contact support.",
        VerificationStatus::Unknown => "Unknown status",
    }
}

#[async_trait]
impl ManualPaymentGateway for InMemoryGateway {
    async fn bank_details(&self) -> Result<BankTransferInstructions> {
        if let Some(err) = self.faults.write().await.bank_details.take() {
            return Err(err);
        }
        Ok(self.bank.clone())
    }

    async fn upi_details(&self) -> Result<UpiInstructions> {
        if let Some(err) = self.faults.write().await.upi_details.take() {
            return Err(err);
        }
        Ok(self.upi.clone())
    }

    async fn submit_payment(&self, submission: &PaymentSubmission) -> Result<SubmitReceipt> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.faults.write().await.next_submit.take() {
            return Err(err);
        }
        let amount = submission
            .amount
            .value()
            .ok_or_else(|| PaymentError::BackendRejection {
                status: 422,
                detail: "value is not a valid float".to_string(),
            })?;

        let order_id = format!(
            "ORD{:08X}",
            self.next_order.fetch_add(1, Ordering::SeqCst)
        );
        let mut payments = self.payments.write().await;
        payments.insert(
            order_id.clone(),
            StoredPayment {
                submission: submission.clone(),
                amount,
                status: VerificationStatus::Pending,
                submitted_at: Utc::now().naive_utc().to_string(),
                verified_at: None,
            },
        );

        Ok(SubmitReceipt {
            order_id,
            message: Some("Payment details submitted successfully!".to_string()),
            status: Some("pending_verification".to_string()),
        })
    }

    async fn payment_status(&self, order_id: &str) -> Result<PaymentStatusView> {
        let payments = self.payments.read().await;
        let payment = payments.get(order_id).ok_or_else(|| not_found(order_id))?;
        Ok(PaymentStatusView {
            order_id: Some(order_id.to_string()),
            status: Some(payment.status),
            package_name: payment.submission.package_name.clone(),
            amount: payment.amount,
            currency: Some(payment.submission.currency.to_string()),
            submitted_at: Some(payment.submitted_at.clone()),
            verified_at: payment.verified_at.clone(),
            message: Some(status_message(payment.status).to_string()),
            extra: Default::default(),
        })
    }
}

/// Bank transfer instructions used by the offline gateway.
pub fn reference_bank_details() -> BankTransferInstructions {
    BankTransferInstructions {
        bank_details: BankDetails {
            account_name: "WRITEAI PRO".to_string(),
            account_number: "000012345678".to_string(),
            ifsc_code: "KKBK0000001".to_string(),
            bank_name: "Kotak Mahindra Bank".to_string(),
            branch: "Main Branch".to_string(),
            account_type: "Current Account".to_string(),
        },
        instructions: vec![
            "Transfer the exact amount to the above bank account".to_string(),
            "Use your Order ID as reference/remark".to_string(),
            "Note the UTR number of the successful transaction".to_string(),
            "Enter the UTR number in the next step".to_string(),
            "Your subscription will be activated within 2-24 hours after verification"
                .to_string(),
        ],
    }
}

/// UPI instructions used by the offline gateway.
pub fn reference_upi_details() -> UpiInstructions {
    UpiInstructions {
        upi_details: UpiDetails {
            upi_id: "writeaipro@kotak".to_string(),
            upi_name: Some("WRITEAI PRO".to_string()),
            qr_code_url: None,
        },
        instructions: vec![
            "Open any UPI app (PhonePe, GPay, Paytm, etc.)".to_string(),
            "Pay to the above UPI ID".to_string(),
            "Enter the exact amount".to_string(),
            "Use your Order ID in notes/remark".to_string(),
            "Enter the transaction ID in the next step".to_string(),
            "Your subscription will be activated within 2-24 hours after verification"
                .to_string(),
        ],
    }
}
