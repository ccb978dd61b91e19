use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankDetails {
    pub account_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
    pub branch: String,
    pub account_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpiDetails {
    pub upi_id: String,
    #[serde(default)]
    pub upi_name: Option<String>,
    #[serde(default)]
    pub qr_code_url: Option<String>,
}

/// Response of `GET /api/manual-payments/bank-details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankTransferInstructions {
    pub bank_details: BankDetails,
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// Response of `GET /api/manual-payments/upi-details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpiInstructions {
    pub upi_details: UpiDetails,
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// A labelled value the user can copy from an instruction panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyField {
    pub label: &'static str,
    pub value: String,
}

impl CopyField {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

impl UpiInstructions {
    pub fn copy_fields(&self, reference: &str) -> Vec<CopyField> {
        vec![
            CopyField::new("UPI ID", &self.upi_details.upi_id),
            CopyField::new("Reference (Add in notes)", reference),
        ]
    }
}

impl BankTransferInstructions {
    pub fn copy_fields(&self, reference: &str) -> Vec<CopyField> {
        let bank = &self.bank_details;
        vec![
            CopyField::new("Account Name", &bank.account_name),
            CopyField::new("Account Number", &bank.account_number),
            CopyField::new("IFSC Code", &bank.ifsc_code),
            CopyField::new("Bank Name", &bank.bank_name),
            CopyField::new("Branch", &bank.branch),
            CopyField::new("Account Type", &bank.account_type),
            CopyField::new("Reference / Remark", reference),
        ]
    }
}
