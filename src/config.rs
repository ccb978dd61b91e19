use crate::domain::submission::ValidationRules;
use crate::error::{PaymentError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const BACKEND_URL_VAR: &str = "BACKEND_URL";
pub const REQUIRE_TRANSACTION_ID_VAR: &str = "REQUIRE_TRANSACTION_ID";
pub const REQUEST_TIMEOUT_VAR: &str = "REQUEST_TIMEOUT_SECS";

/// Settings injected into the HTTP gateway and the checkout page.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend_url: Url,
    pub validation: ValidationRules,
    /// `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn new(backend_url: &str) -> Result<Self> {
        Ok(Self {
            backend_url: parse_backend_url(backend_url)?,
            validation: ValidationRules::default(),
            request_timeout: None,
        })
    }

    pub fn with_transaction_id_required(mut self, required: bool) -> Self {
        self.validation.require_transaction_id = required;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Reads the process environment, after loading `.env` if one exists.
    ///
    /// `defaults` only apply where the environment is silent; `overrides` always win.
    pub fn from_env_layered(
        defaults: Vec<(String, String)>,
        overrides: Vec<(String, String)>,
    ) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_layers([defaults, std::env::vars().collect(), overrides])
    }

    /// Builds a config from variable layers, later layers taking precedence.
    pub fn from_layers<I>(layers: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<(String, String)>>,
    {
        Self::from_vars(layers.into_iter().flatten())
    }

    /// Reads settings from a dotenv file without touching the process environment.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let iter = dotenvy::from_path_iter(path.as_ref())
            .map_err(|e| PaymentError::Config(e.to_string()))?;
        let mut vars = Vec::new();
        for item in iter {
            vars.push(item.map_err(|e| PaymentError::Config(e.to_string()))?);
        }
        Self::from_vars(vars)
    }

    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: HashMap<String, String> = vars.into_iter().collect();
        let backend_url = vars
            .get(BACKEND_URL_VAR)
            .ok_or_else(|| PaymentError::Config(format!("{BACKEND_URL_VAR} is not set")))?;

        let require_transaction_id = match vars.get(REQUIRE_TRANSACTION_ID_VAR) {
            Some(raw) => parse_bool(REQUIRE_TRANSACTION_ID_VAR, raw)?,
            None => false,
        };

        let request_timeout = match vars.get(REQUEST_TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    PaymentError::Config(format!("{REQUEST_TIMEOUT_VAR} must be whole seconds"))
                })?;
                if secs == 0 {
                    return Err(PaymentError::Config(format!(
                        "{REQUEST_TIMEOUT_VAR} must be at least 1 second"
                    )));
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self::new(backend_url)?
            .with_transaction_id_required(require_transaction_id)
            .with_request_timeout(request_timeout))
    }

    /// Joins an API path onto the base URL, keeping any path prefix the base carries.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.backend_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }
}

fn parse_backend_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(PaymentError::Config(format!(
            "backend URL must use http or https, got '{other}'"
        ))),
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(PaymentError::Config(format!(
            "{name} must be a boolean, got '{raw}'"
        ))),
    }
}
