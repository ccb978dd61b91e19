use crate::domain::ports::GatewayHandle;
use crate::domain::status::PaymentStatusView;
use crate::error::Result;
use tracing::warn;

pub const MISSING_ORDER_PLACEHOLDER: &str = "N/A";

/// The `/payment-pending` page.
///
/// Fetches on mount and on explicit refresh only. A failed fetch keeps whatever was
/// shown before; a successful one replaces it completely.
pub struct StatusPage {
    gateway: GatewayHandle,
    order_id: Option<String>,
    view: Option<PaymentStatusView>,
}

impl StatusPage {
    pub fn new(gateway: GatewayHandle, order_id: Option<String>) -> Self {
        Self {
            gateway,
            order_id,
            view: None,
        }
    }

    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    /// The order id as displayed, `N/A` when the URL carried none.
    pub fn display_order_id(&self) -> &str {
        self.order_id.as_deref().unwrap_or(MISSING_ORDER_PLACEHOLDER)
    }

    pub fn view(&self) -> Option<&PaymentStatusView> {
        self.view.as_ref()
    }

    /// Fetches the current status. Without an order id this does nothing.
    ///
    /// Errors are logged and returned; the displayed view is left untouched.
    pub async fn refresh(&mut self) -> Result<Option<&PaymentStatusView>> {
        let Some(order_id) = self.order_id.as_deref() else {
            return Ok(None);
        };
        match self.gateway.payment_status(order_id).await {
            Ok(view) => {
                self.view = Some(view);
                Ok(self.view.as_ref())
            }
            Err(e) => {
                warn!(order_id, error = %e, "failed to check payment status");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::package::lookup;
    use crate::domain::ports::ManualPaymentGateway;
    use crate::domain::status::VerificationStatus;
    use crate::domain::submission::{PaymentMethod, PaymentSubmission, ProofForm};
    use crate::error::PaymentError;
    use crate::infrastructure::in_memory::InMemoryGateway;
    use std::sync::Arc;

    async fn submitted(gateway: &InMemoryGateway) -> String {
        let form = ProofForm {
            user_name: "Asha".into(),
            user_email: "asha@example.com".into(),
            ..Default::default()
        };
        let submission = PaymentSubmission::new(&lookup(Some("pro")), PaymentMethod::Upi, &form);
        gateway.submit_payment(&submission).await.unwrap().order_id
    }

    #[tokio::test]
    async fn test_missing_order_id_renders_placeholder() {
        let mut page = StatusPage::new(Arc::new(InMemoryGateway::default()), None);
        assert_eq!(page.display_order_id(), "N/A");
        assert!(page.refresh().await.unwrap().is_none());
        assert!(page.view().is_none());
    }

    #[tokio::test]
    async fn test_refresh_replaces_view() {
        let gateway = InMemoryGateway::default();
        let order_id = submitted(&gateway).await;
        let mut page = StatusPage::new(Arc::new(gateway.clone()), Some(order_id.clone()));

        page.refresh().await.unwrap();
        assert_eq!(
            page.view().unwrap().status,
            Some(VerificationStatus::Pending)
        );

        gateway
            .set_status(&order_id, VerificationStatus::Verified)
            .await
            .unwrap();
        page.refresh().await.unwrap();
        let view = page.view().unwrap();
        assert_eq!(view.status, Some(VerificationStatus::Verified));
        assert_eq!(
            view.message.as_deref(),
            Some("Payment verified! Your subscription is now active.")
        );
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_stale_view() {
        let gateway = InMemoryGateway::default();
        let order_id = submitted(&gateway).await;
        let mut page = StatusPage::new(Arc::new(gateway), Some(order_id));
        page.refresh().await.unwrap();
        let before = page.view().cloned();

        page.order_id = Some("ORDUNKNOWN".into());
        let err = page.refresh().await.unwrap_err();
        assert!(matches!(
            err,
            PaymentError::BackendRejection { status: 404, .. }
        ));
        assert_eq!(page.view().cloned(), before);
    }
}
