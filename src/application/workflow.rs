use super::checkout::CheckoutPage;
use super::navigation::Route;
use super::status::StatusPage;
use crate::domain::ports::GatewayHandle;
use crate::domain::submission::ValidationRules;
use crate::error::{PaymentError, Result};
use tracing::info;

/// The page currently on screen.
pub enum Page {
    Home,
    Checkout(Box<CheckoutPage>),
    Pending(StatusPage),
}

/// Sequences the checkout and pending pages.
///
/// Every navigation builds a fresh page from the route alone; nothing is shared
/// between pages except the query string.
pub struct Workflow {
    gateway: GatewayHandle,
    rules: ValidationRules,
    route: Route,
    page: Page,
}

impl Workflow {
    pub fn new(gateway: GatewayHandle, rules: ValidationRules) -> Self {
        Self {
            gateway,
            rules,
            route: Route::Home,
            page: Page::Home,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Parses `location` and opens it.
    pub async fn open(&mut self, location: &str) -> Result<()> {
        let route = Route::parse(location)?;
        self.navigate(route).await;
        Ok(())
    }

    /// Mounts the page for `route`, running its on-mount fetches.
    pub async fn navigate(&mut self, route: Route) {
        info!(route = %route, "navigating");
        self.page = match &route {
            Route::Home => Page::Home,
            Route::Checkout { package } => {
                let mut page =
                    CheckoutPage::new(self.gateway.clone(), self.rules, package.as_deref());
                page.load_details().await;
                Page::Checkout(Box::new(page))
            }
            Route::PaymentPending { order_id } => {
                let mut page = StatusPage::new(self.gateway.clone(), order_id.clone());
                // failures are logged by the page and leave it on its placeholder
                let _ = page.refresh().await;
                Page::Pending(page)
            }
        };
        self.route = route;
    }

    pub fn checkout_mut(&mut self) -> Result<&mut CheckoutPage> {
        match &mut self.page {
            Page::Checkout(page) => Ok(page.as_mut()),
            _ => Err(PaymentError::MissingData(
                "checkout page is not open".to_string(),
            )),
        }
    }

    pub fn status_mut(&mut self) -> Result<&mut StatusPage> {
        match &mut self.page {
            Page::Pending(page) => Ok(page),
            _ => Err(PaymentError::MissingData(
                "payment status page is not open".to_string(),
            )),
        }
    }

    /// Submits the open checkout page and, on success, follows it to the pending page.
    pub async fn submit_checkout(&mut self) -> Result<Route> {
        let route = self.checkout_mut()?.submit().await?;
        self.navigate(route.clone()).await;
        Ok(route)
    }
}
