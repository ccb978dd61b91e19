use super::navigation::Route;
use crate::domain::details::{BankTransferInstructions, CopyField, UpiInstructions};
use crate::domain::notice::Notice;
use crate::domain::order::OrderId;
use crate::domain::package::{self, Package};
use crate::domain::ports::GatewayHandle;
use crate::domain::submission::{
    PaymentMethod, PaymentSubmission, ProofForm, SubmitReceipt, ValidationRules,
};
use crate::error::{PaymentError, Result};
use std::fmt;
use tracing::{info, warn};

/// Where the checkout page is in its flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    SelectingMethod,
    ReviewingInstructions,
    EnteringProof,
    Submitting,
    /// Terminal: the backend accepted the proof and the page navigated away.
    Submitted { order_id: String },
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::SelectingMethod => "selecting a method",
            Phase::ReviewingInstructions => "reviewing instructions",
            Phase::EnteringProof => "entering proof",
            Phase::Submitting => "submitting",
            Phase::Submitted { .. } => "submitted",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The `/indian-payment` page: method selection, instructions and the proof form.
///
/// Owns all of its state. The only thing that leaves the page is the `Route`
/// returned by a successful submit.
pub struct CheckoutPage {
    gateway: GatewayHandle,
    rules: ValidationRules,
    package: Package,
    order_id: OrderId,
    phase: Phase,
    method: Option<PaymentMethod>,
    upi: Option<UpiInstructions>,
    bank: Option<BankTransferInstructions>,
    form: ProofForm,
    last_error: Option<String>,
    notices: Vec<Notice>,
}

impl CheckoutPage {
    /// Builds the page for `package_id`; the order reference is fixed for the page's lifetime.
    pub fn new(gateway: GatewayHandle, rules: ValidationRules, package_id: Option<&str>) -> Self {
        Self {
            gateway,
            rules,
            package: package::lookup(package_id),
            order_id: OrderId::generate(),
            phase: Phase::SelectingMethod,
            method: None,
            upi: None,
            bank: None,
            form: ProofForm::default(),
            last_error: None,
            notices: Vec::new(),
        }
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn method(&self) -> Option<PaymentMethod> {
        self.method
    }

    pub fn upi_details(&self) -> Option<&UpiInstructions> {
        self.upi.as_ref()
    }

    pub fn bank_details(&self) -> Option<&BankTransferInstructions> {
        self.bank.as_ref()
    }

    pub fn form(&self) -> &ProofForm {
        &self.form
    }

    /// Message from the most recent failed submit, cleared on the next attempt.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Fetches UPI and bank instructions concurrently.
    ///
    /// Each panel is filled independently; a failed fetch leaves its panel empty and
    /// raises a notice. Never fails the page.
    pub async fn load_details(&mut self) {
        let (upi, bank) = tokio::join!(self.gateway.upi_details(), self.gateway.bank_details());

        let mut failed = Vec::new();
        match upi {
            Ok(details) => self.upi = Some(details),
            Err(e) => {
                warn!(error = %e, "failed to load UPI details");
                failed.push("UPI");
            }
        }
        match bank {
            Ok(details) => self.bank = Some(details),
            Err(e) => {
                warn!(error = %e, "failed to load bank details");
                failed.push("bank transfer");
            }
        }
        if !failed.is_empty() {
            self.notices.push(Notice::error(format!(
                "Failed to load payment details ({})",
                failed.join(", ")
            )));
        }
    }

    /// Picks or switches the payment method while instructions are on screen.
    pub fn select_method(&mut self, method: PaymentMethod) -> Result<()> {
        match self.phase {
            Phase::SelectingMethod | Phase::ReviewingInstructions => {
                self.method = Some(method);
                self.phase = Phase::ReviewingInstructions;
                Ok(())
            }
            _ => Err(self.invalid("select a payment method")),
        }
    }

    /// "I've Completed Payment": moves on to the proof form.
    ///
    /// Requires a selected method whose instructions have loaded.
    pub fn confirm_payment_made(&mut self) -> Result<()> {
        if self.phase != Phase::ReviewingInstructions {
            return Err(self.invalid("continue to the proof form"));
        }
        let Some(method) = self.method else {
            return Err(self.invalid("continue to the proof form"));
        };
        let loaded = match method {
            PaymentMethod::Upi => self.upi.is_some(),
            PaymentMethod::Bank => self.bank.is_some(),
        };
        if !loaded {
            return Err(PaymentError::MissingData(format!(
                "{} instructions are not available",
                method.label()
            )));
        }
        self.phase = Phase::EnteringProof;
        Ok(())
    }

    /// "Back" from the proof form. Keeps the selected method and the typed form.
    pub fn back(&mut self) -> Result<()> {
        if self.phase != Phase::EnteringProof {
            return Err(self.invalid("go back"));
        }
        self.phase = Phase::ReviewingInstructions;
        Ok(())
    }

    /// Edits the proof form in place.
    pub fn edit_form(&mut self, edit: impl FnOnce(&mut ProofForm)) -> Result<()> {
        if self.phase != Phase::EnteringProof {
            return Err(self.invalid("edit the proof form"));
        }
        edit(&mut self.form);
        Ok(())
    }

    /// Validates the form and, if it passes, enters `Submitting` and returns the request body.
    ///
    /// A failed validation never reaches the network and leaves the phase unchanged.
    pub fn begin_submit(&mut self) -> Result<PaymentSubmission> {
        match self.phase {
            Phase::EnteringProof => {}
            Phase::Submitting => return Err(PaymentError::SubmissionInFlight),
            _ => return Err(self.invalid("submit")),
        }
        let Some(method) = self.method else {
            return Err(self.invalid("submit"));
        };
        if let Err(e) = self.form.validate(&self.rules) {
            self.last_error = Some(e.user_message());
            self.notices.push(Notice::error(e.user_message()));
            return Err(e);
        }

        self.last_error = None;
        self.phase = Phase::Submitting;
        Ok(PaymentSubmission::new(&self.package, method, &self.form))
    }

    /// Settles an in-flight submit.
    ///
    /// On success the page is done and the pending-status route is returned. On failure
    /// the page returns to the proof form with its contents intact.
    pub fn finish_submit(&mut self, outcome: Result<SubmitReceipt>) -> Result<Route> {
        if self.phase != Phase::Submitting {
            return Err(self.invalid("settle a submission"));
        }
        match outcome {
            Ok(receipt) => {
                info!(
                    order_id = %receipt.order_id,
                    package = self.package.id,
                    "payment submitted for verification"
                );
                self.notices.push(Notice::success("Payment submitted for verification!"));
                let route = Route::pending(receipt.order_id.clone());
                self.phase = Phase::Submitted {
                    order_id: receipt.order_id,
                };
                Ok(route)
            }
            Err(e) => {
                warn!(error = %e, "payment submission failed");
                self.phase = Phase::EnteringProof;
                self.last_error = Some(e.user_message());
                self.notices.push(Notice::error(e.user_message()));
                Err(e)
            }
        }
    }

    /// Validates, sends the proof, and settles the result.
    pub async fn submit(&mut self) -> Result<Route> {
        let submission = self.begin_submit()?;
        let outcome = self.gateway.submit_payment(&submission).await;
        self.finish_submit(outcome)
    }

    /// Copyable fields for the panel of `method`, empty if its details never loaded.
    pub fn copy_fields(&self, method: PaymentMethod) -> Vec<CopyField> {
        let reference = self.order_id.as_str();
        match method {
            PaymentMethod::Upi => self
                .upi
                .as_ref()
                .map(|d| d.copy_fields(reference))
                .unwrap_or_default(),
            PaymentMethod::Bank => self
                .bank
                .as_ref()
                .map(|d| d.copy_fields(reference))
                .unwrap_or_default(),
        }
    }

    fn invalid(&self, action: &'static str) -> PaymentError {
        PaymentError::InvalidTransition {
            phase: self.phase.name(),
            action,
        }
    }
}
