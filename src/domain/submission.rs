use super::package::{Package, PackageAmount};
use crate::error::{PaymentError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const CURRENCY_INR: &str = "INR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Upi,
    Bank,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "UPI Payment",
            PaymentMethod::Bank => "Bank Transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Upi => f.write_str("upi"),
            PaymentMethod::Bank => f.write_str("bank"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upi" => Ok(PaymentMethod::Upi),
            "bank" => Ok(PaymentMethod::Bank),
            other => Err(PaymentError::Validation(format!(
                "Unknown payment method '{other}', expected 'upi' or 'bank'"
            ))),
        }
    }
}

/// Client-side checks applied right before a proof is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationRules {
    /// Block submission when the transaction id / UTR is blank.
    pub require_transaction_id: bool,
}

/// What the user typed into the proof form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProofForm {
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub transaction_id: String,
    pub notes: String,
}

impl ProofForm {
    pub fn validate(&self, rules: &ValidationRules) -> Result<()> {
        if self.user_name.trim().is_empty() || self.user_email.trim().is_empty() {
            return Err(PaymentError::Validation(
                "Please fill in all required fields".to_string(),
            ));
        }
        if rules.require_transaction_id && self.transaction_id.trim().is_empty() {
            return Err(PaymentError::Validation(
                "Please enter the transaction ID / UTR number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Body of `POST /api/manual-payments/submit-payment`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentSubmission {
    pub package_id: String,
    pub package_name: String,
    pub amount: PackageAmount,
    pub currency: &'static str,
    pub payment_method: PaymentMethod,
    pub transaction_id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: Option<String>,
    pub notes: Option<String>,
}

impl PaymentSubmission {
    pub fn new(package: &Package, method: PaymentMethod, form: &ProofForm) -> Self {
        Self {
            package_id: package.id.to_string(),
            package_name: package.name.to_string(),
            amount: package.amount,
            currency: CURRENCY_INR,
            payment_method: method,
            transaction_id: form.transaction_id.clone(),
            user_name: form.user_name.clone(),
            user_email: form.user_email.clone(),
            user_phone: non_blank(&form.user_phone),
            notes: non_blank(&form.notes),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Successful response of the submit endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitReceipt {
    pub order_id: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}
