//! The fetch-like seam between [`HttpApiClient`](crate::client::HttpApiClient)
//! and the network.
//!
//! Native builds send through `reqwest`, browser builds through `gloo-net`.
//! Both buffer the whole body; decoding happens in the client.

use crate::errors::ApiError;
use crate::http::{TransportRequest, TransportResponse};

#[async_trait::async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ApiError>;
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport as DefaultTransport;
#[cfg(target_arch = "wasm32")]
pub use web::GlooTransport as DefaultTransport;

#[cfg(not(target_arch = "wasm32"))]
pub use native::ReqwestTransport;
#[cfg(target_arch = "wasm32")]
pub use web::GlooTransport;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use crate::http::{ApiHeaders, HttpMethod};

    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        http: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_client(http: reqwest::Client) -> Self {
            Self { http }
        }
    }

    #[async_trait::async_trait(?Send)]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ApiError> {
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Put => reqwest::Method::PUT,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.http.request(method, &request.url);
            for (key, value) in request.headers.iter() {
                builder = builder.header(key, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let mut headers = ApiHeaders::new();
            for (name, value) in response.headers() {
                headers.append(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
            }
            let body = response.bytes().await?;

            Ok(TransportResponse {
                status,
                headers,
                body,
            })
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::*;
    use crate::http::{ApiHeaders, HttpMethod};
    use gloo_net::http::{Method, RequestBuilder};

    #[derive(Debug, Clone, Copy, Default)]
    pub struct GlooTransport;

    impl GlooTransport {
        pub fn new() -> Self {
            Self
        }
    }

    impl From<ApiHeaders> for gloo_net::http::Headers {
        fn from(val: ApiHeaders) -> Self {
            let headers = gloo_net::http::Headers::new();
            for (key, value) in val.iter() {
                headers.set(key, value);
            }
            headers
        }
    }

    #[async_trait::async_trait(?Send)]
    impl Transport for GlooTransport {
        async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ApiError> {
            let method = match request.method {
                HttpMethod::Get => Method::GET,
                HttpMethod::Post => Method::POST,
                HttpMethod::Put => Method::PUT,
                HttpMethod::Delete => Method::DELETE,
            };

            let builder = RequestBuilder::new(&request.url)
                .method(method)
                .headers(request.headers.into());
            let request = match request.body {
                Some(body) => builder.body(body)?,
                None => builder.build()?,
            };

            let response = request.send().await?;
            let status = response.status();
            let mut headers = ApiHeaders::new();
            for (name, value) in response.headers().entries() {
                headers.append(name, value);
            }
            let body = response.binary().await?.into();

            Ok(TransportResponse {
                status,
                headers,
                body,
            })
        }
    }
}
