//! Shared error types for the api-client crate.
#[cfg(not(target_arch = "wasm32"))]
pub use color_eyre::Report;

use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[cfg(not(target_arch = "wasm32"))]
    #[error("Failed to install color_eyre")]
    ColorEyre(#[from] color_eyre::Report),
    #[error("Failed to install tracing-subscriber")]
    TracingSubscriber(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API base URL is not configured (set API_BASE_URL)")]
    MissingBaseUrl,
    #[cfg(not(target_arch = "wasm32"))]
    #[error("Invalid environment configuration: {0}")]
    Env(#[from] envy::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered outside of `200..=299`.
    #[error("{status}: {}", .label.as_deref().unwrap_or_default())]
    Status { status: u16, label: Option<String> },
    #[cfg(not(target_arch = "wasm32"))]
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[cfg(target_arch = "wasm32")]
    #[error("Network error: {0}")]
    Network(#[from] gloo_net::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Multipart error: {0}")]
    Multipart(#[from] multer::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// The HTTP status carried by a [`ApiError::Status`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure class carried by a [`CustomError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Status(u16),
    Throttled,
    Request,
}

impl ErrorCode {
    pub const THROTTLED: &'static str = "THROTTLED-ERROR";
    pub const REQUEST: &'static str = "REQUEST-ERROR";
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Status(status) => write!(f, "{status}"),
            ErrorCode::Throttled => f.write_str(Self::THROTTLED),
            ErrorCode::Request => f.write_str(Self::REQUEST),
        }
    }
}

impl From<u16> for ErrorCode {
    fn from(status: u16) -> Self {
        ErrorCode::Status(status)
    }
}

/// A domain failure raised by callers of the client, e.g. to signal throttling.
///
/// The client itself never constructs one; it only defines the shape so that
/// every layer above it reports failures the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CustomError {
    code: ErrorCode,
    message: String,
}

impl CustomError {
    pub const NAME: &'static str = "CustomError";

    pub fn new(code: impl Into<ErrorCode>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn throttled(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Throttled, message)
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Request, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }
}

impl From<&ApiError> for CustomError {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Status { status, .. } => Self::new(*status, err.to_string()),
            _ => Self::request(err.to_string()),
        }
    }
}
