use crate::error::{PaymentError, Result};
use std::fmt;
use url::Url;

pub const CHECKOUT_PATH: &str = "/indian-payment";
pub const PENDING_PATH: &str = "/payment-pending";

// Relative routes are resolved against this to reuse the url crate's query parsing.
const ROUTE_BASE: &str = "http://app.local";

/// A page location. Query parameters are the only state carried between pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Checkout { package: Option<String> },
    PaymentPending { order_id: Option<String> },
}

impl Route {
    pub fn checkout(package: impl Into<String>) -> Self {
        Route::Checkout {
            package: Some(package.into()),
        }
    }

    pub fn pending(order_id: impl Into<String>) -> Self {
        Route::PaymentPending {
            order_id: Some(order_id.into()),
        }
    }

    /// Parses a path with optional query, e.g. `/payment-pending?order_id=ORD1`.
    ///
    /// Blank query values count as absent.
    pub fn parse(location: &str) -> Result<Self> {
        let url = Url::parse(ROUTE_BASE)?.join(location)?;
        let query = |name: &str| {
            url.query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        match url.path().trim_end_matches('/') {
            "" => Ok(Route::Home),
            CHECKOUT_PATH => Ok(Route::Checkout {
                package: query("package"),
            }),
            PENDING_PATH => Ok(Route::PaymentPending {
                order_id: query("order_id"),
            }),
            other => Err(PaymentError::MissingData(format!("no page at '{other}'"))),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (path, param) = match self {
            Route::Home => return f.write_str("/"),
            Route::Checkout { package } => {
                (CHECKOUT_PATH, package.as_deref().map(|p| ("package", p)))
            }
            Route::PaymentPending { order_id } => {
                (PENDING_PATH, order_id.as_deref().map(|o| ("order_id", o)))
            }
        };
        match param {
            Some((key, value)) => {
                let query = url::form_urlencoded::Serializer::new(String::new())
                    .append_pair(key, value)
                    .finish();
                write!(f, "{path}?{query}")
            }
            None => f.write_str(path),
        }
    }
}
