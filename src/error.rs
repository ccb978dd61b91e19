use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum PaymentError {
    #[error("{0}")]
    #[diagnostic(
        code(manual_pay::validation),
        help("correct the highlighted fields and submit again")
    )]
    Validation(String),

    #[error("Network error: {0}")]
    #[diagnostic(code(manual_pay::network), help("check the backend URL and retry"))]
    Network(String),

    #[error("{detail}")]
    #[diagnostic(code(manual_pay::backend_rejection))]
    BackendRejection { status: u16, detail: String },

    #[error("Missing data: {0}")]
    #[diagnostic(code(manual_pay::missing_data))]
    MissingData(String),

    #[error("Cannot {action} while {phase}")]
    #[diagnostic(code(manual_pay::invalid_transition))]
    InvalidTransition {
        phase: &'static str,
        action: &'static str,
    },

    #[error("A submission is already in flight")]
    #[diagnostic(
        code(manual_pay::in_flight),
        help("wait for the current request to settle")
    )]
    SubmissionInFlight,

    #[error("Configuration error: {0}")]
    #[diagnostic(code(manual_pay::config))]
    Config(String),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PaymentError {
    /// Text shown to the user when this error is surfaced as a notice.
    ///
    /// Backend rejections are passed through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            PaymentError::BackendRejection { detail, .. } => detail.clone(),
            PaymentError::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for PaymentError {
    fn from(err: reqwest::Error) -> Self {
        PaymentError::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PaymentError>;
