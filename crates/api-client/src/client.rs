use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::body::{self, ResponseData};
use crate::config::ClientConfig;
use crate::errors::ApiError;
use crate::http::{ApiHeaders, HttpMethod, RequestOptions, TransportRequest};
use crate::log::{debug, warn};
use crate::query;
use crate::status::StatusTable;
use crate::transport::{DefaultTransport, Transport};

pub type ApiResult<T> = Result<T, ApiError>;

/// URI schemes that bypass the base URL.
const ABSOLUTE_SCHEMES: &[&str] = &[
    "http://", "https://", "ftp://", "sftp://", "ws://", "wss://", "data://", "file://",
];

/// Returns true if `uri` starts with one of the schemes the client treats as absolute.
pub fn is_absolute(uri: &str) -> bool {
    ABSOLUTE_SCHEMES.iter().any(|scheme| uri.starts_with(scheme))
}

/// The result of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T = ResponseData> {
    pub status: u16,
    /// Label from the status table; `None` for codes the table does not know.
    pub msg: Option<String>,
    pub data: T,
}

impl ApiResponse<ResponseData> {
    /// Deserializes `data` into `T`, keeping status and message.
    pub fn into_json<T: DeserializeOwned>(self) -> ApiResult<ApiResponse<T>> {
        Ok(ApiResponse {
            status: self.status,
            msg: self.msg,
            data: self.data.json()?,
        })
    }
}

#[async_trait::async_trait(?Send)]
pub trait ApiClient {
    /// Core request method; every other method funnels into it.
    async fn request(
        &self,
        method: HttpMethod,
        uri: &str,
        options: RequestOptions,
    ) -> ApiResult<ApiResponse>;

    async fn get(&self, uri: &str, options: RequestOptions) -> ApiResult<ApiResponse> {
        let options = RequestOptions {
            body: None,
            ..options
        };
        self.request(HttpMethod::Get, uri, options).await
    }

    async fn post<B>(
        &self,
        uri: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> ApiResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let options = json_options(body, options)?;
        self.request(HttpMethod::Post, uri, options).await
    }

    async fn put<B>(
        &self,
        uri: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> ApiResult<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let options = json_options(body, options)?;
        self.request(HttpMethod::Put, uri, options).await
    }

    /// Any body set in `options` is forwarded as-is.
    async fn delete(&self, uri: &str, options: RequestOptions) -> ApiResult<ApiResponse> {
        self.request(HttpMethod::Delete, uri, options).await
    }

    // Typed variants

    async fn get_json<T>(&self, uri: &str, options: RequestOptions) -> ApiResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        self.get(uri, options).await?.into_json()
    }

    async fn post_json<T, B>(
        &self,
        uri: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> ApiResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.post(uri, body, options).await?.into_json()
    }

    async fn put_json<T, B>(
        &self,
        uri: &str,
        body: Option<&B>,
        options: RequestOptions,
    ) -> ApiResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.put(uri, body, options).await?.into_json()
    }

    async fn delete_json<T>(&self, uri: &str, options: RequestOptions) -> ApiResult<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        self.delete(uri, options).await?.into_json()
    }
}

/// `Content-Type: application/json` first, the caller's headers on top, and the
/// body serialized only when it is truthy (not `null`, `false`, `0` or `""`).
fn json_options<B>(body: Option<&B>, options: RequestOptions) -> ApiResult<RequestOptions>
where
    B: Serialize + ?Sized,
{
    let mut headers = ApiHeaders::new().with("Content-Type", "application/json");
    headers.merge(options.headers);

    let body = match body {
        Some(body) => {
            let value = serde_json::to_value(body)?;
            if is_truthy(&value) {
                Some(serde_json::to_string(&value)?)
            } else {
                None
            }
        }
        None => None,
    };

    Ok(RequestOptions {
        headers,
        body,
        params: options.params,
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// HTTP client bound to a single base URL.
#[derive(Debug, Clone)]
pub struct HttpApiClient<T = DefaultTransport> {
    config: ClientConfig,
    statuses: StatusTable,
    transport: T,
}

impl HttpApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, DefaultTransport::new())
    }

    /// Builds a client from [`ClientConfig::from_env`].
    pub fn from_env() -> ApiResult<Self> {
        Ok(Self::new(ClientConfig::from_env()?))
    }
}

impl<T: Transport> HttpApiClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            statuses: StatusTable::korean(),
            transport,
        }
    }

    pub fn with_status_table(mut self, statuses: StatusTable) -> Self {
        self.statuses = statuses;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URIs pass through; anything else is appended to the base URL as-is.
    pub fn resolve_url(&self, uri: &str) -> String {
        if is_absolute(uri) {
            uri.to_string()
        } else {
            format!("{}{}", self.config.base_url, uri)
        }
    }
}

#[async_trait::async_trait(?Send)]
impl<T: Transport> ApiClient for HttpApiClient<T> {
    async fn request(
        &self,
        method: HttpMethod,
        uri: &str,
        mut options: RequestOptions,
    ) -> ApiResult<ApiResponse> {
        let mut url = self.resolve_url(uri);

        // Appended even when `uri` already carries a query string
        if let Some(params) = options.params.take() {
            url.push('?');
            url.push_str(&query::encode(&params, self.config.array_format));
        }

        debug!("{} {}", method, url);

        let response = self
            .transport
            .send(TransportRequest {
                method,
                url,
                headers: options.headers,
                body: options.body,
            })
            .await?;

        let status = response.status;
        let msg = self.statuses.label(status).map(str::to_string);

        if !response.ok() {
            warn!("{} {} failed with status {}", method, uri, status);
            return Err(ApiError::Status { status, label: msg });
        }

        let data = body::decode(response.header("Content-Type"), response.body.clone()).await?;
        debug!("{} {} -> {}", method, uri, status);

        Ok(ApiResponse { status, msg, data })
    }
}
