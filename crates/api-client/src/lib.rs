//! Shared HTTP client for calling the backend API from browser and native code.
//!
//! [`HttpApiClient`] resolves URIs against a configured base URL, encodes
//! nested query parameters, sends JSON bodies, decodes responses by content
//! type and turns non-2xx statuses into [`ApiError::Status`] with a localized
//! label.

pub mod body;
pub mod client;
pub mod config;
pub mod errors;
pub mod http;
pub mod log;
pub mod query;
pub mod status;
pub mod transport;

pub use body::{Blob, FormData, FormPart, ResponseData};
pub use client::{ApiClient, ApiResponse, ApiResult, HttpApiClient};
pub use config::ClientConfig;
pub use errors::{ApiError, ConfigError, CustomError, ErrorCode};
pub use http::{ApiHeaders, HttpMethod, RequestOptions};
pub use query::{ArrayFormat, Params};
pub use status::StatusTable;

pub use serde;
pub use serde_json;
pub use tracing;
