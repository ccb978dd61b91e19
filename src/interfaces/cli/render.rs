use crate::application::checkout::CheckoutPage;
use crate::application::navigation::Route;
use crate::application::status::StatusPage;
use crate::domain::submission::PaymentMethod;
use std::io::{self, Write};

/// Writes page state as plain text for the terminal.
pub struct PageWriter<W: Write> {
    out: W,
}

impl<W: Write> PageWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Package summary, order reference and both instruction panels.
    pub fn write_checkout(&mut self, page: &CheckoutPage) -> io::Result<()> {
        let package = page.package();
        writeln!(self.out, "Payment for {} Plan", package.name)?;
        writeln!(self.out, "Amount to Pay: ₹{}", package.amount)?;
        writeln!(self.out, "Order ID: {}", page.order_id())?;
        for feature in package.features {
            writeln!(self.out, "  * {feature}")?;
        }

        for method in [PaymentMethod::Upi, PaymentMethod::Bank] {
            writeln!(self.out)?;
            writeln!(self.out, "== {} ==", method.label())?;
            let fields = page.copy_fields(method);
            if fields.is_empty() {
                writeln!(self.out, "(details unavailable)")?;
                continue;
            }
            for field in fields {
                writeln!(self.out, "{}: {}", field.label, field.value)?;
            }
            writeln!(self.out, "Amount: ₹{}", package.amount)?;
            let instructions = match method {
                PaymentMethod::Upi => page.upi_details().map(|d| &d.instructions),
                PaymentMethod::Bank => page.bank_details().map(|d| &d.instructions),
            };
            for (idx, step) in instructions.into_iter().flatten().enumerate() {
                writeln!(self.out, "{}. {step}", idx + 1)?;
            }
        }
        Ok(())
    }

    pub fn write_redirect(&mut self, route: &Route) -> io::Result<()> {
        writeln!(self.out, "Redirect: {route}")
    }

    pub fn write_status(&mut self, page: &StatusPage) -> io::Result<()> {
        writeln!(self.out, "Payment Under Verification")?;
        writeln!(self.out, "Order ID: {}", page.display_order_id())?;
        if let Some(view) = page.view() {
            writeln!(self.out, "Package: {}", view.package_name)?;
            writeln!(self.out, "Amount: ₹{}", view.amount.normalize())?;
            if let Some(status) = view.status {
                writeln!(self.out, "Status: {status}")?;
            }
            if let Some(message) = &view.message {
                writeln!(self.out, "{message}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::package::lookup;
    use crate::domain::ports::ManualPaymentGateway;
    use crate::domain::submission::{PaymentSubmission, ProofForm, ValidationRules};
    use crate::error::PaymentError;
    use crate::infrastructure::in_memory::InMemoryGateway;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_checkout_output_marks_missing_panel() {
        let gateway = InMemoryGateway::default();
        gateway
            .fail_upi_details(PaymentError::Network("down".into()))
            .await;
        let mut page = CheckoutPage::new(
            Arc::new(gateway),
            ValidationRules::default(),
            Some("starter"),
        );
        page.load_details().await;

        let mut writer = PageWriter::new(Vec::new());
        writer.write_checkout(&page).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();

        assert!(text.contains("Payment for Starter Plan"));
        assert!(text.contains("Amount to Pay: ₹2400"));
        assert!(text.contains("== UPI Payment ==\n(details unavailable)"));
        assert!(text.contains("IFSC Code: KKBK0000001"));
    }

    #[tokio::test]
    async fn test_status_output() {
        let gateway = InMemoryGateway::default();
        let mut page = StatusPage::new(Arc::new(gateway.clone()), None);
        let mut writer = PageWriter::new(Vec::new());
        writer.write_status(&page).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert!(text.contains("Order ID: N/A"));
        assert!(!text.contains("Package:"));

        let form = ProofForm {
            user_name: "A".into(),
            user_email: "a@example.com".into(),
            ..Default::default()
        };
        let submission = PaymentSubmission::new(&lookup(Some("pro")), PaymentMethod::Bank, &form);
        let receipt = gateway.submit_payment(&submission).await.unwrap();
        page = StatusPage::new(Arc::new(gateway), Some(receipt.order_id));
        page.refresh().await.unwrap();

        let mut writer = PageWriter::new(Vec::new());
        writer.write_status(&page).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert!(text.contains("Package: Pro"));
        assert!(text.contains("Amount: ₹6500"));
        assert!(text.contains("Status: pending"));
    }
}
