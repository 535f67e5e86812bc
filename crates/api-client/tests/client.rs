//! End-to-end tests over real HTTP.
//!
//! Each test starts a small axum server on a random port and drives the
//! client against it through the default reqwest transport.

use api_client::http::{ApiHeaders, HttpMethod, TransportRequest};
use api_client::transport::{ReqwestTransport, Transport};
use api_client::{
    ApiClient, ApiError, ApiResponse, ArrayFormat, ClientConfig, HttpApiClient, RequestOptions, ResponseData,
};
use axum::{
    Json, Router,
    extract::RawQuery,
    http::{HeaderMap, StatusCode, header},
    response::{AppendHeaders, IntoResponse},
    routing::{get, post},
};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::net::TcpListener;

const MULTIPART_BODY: &str = "--b0undary\r\n\
    Content-Disposition: form-data; name=\"name\"\r\n\
    \r\n\
    kiwi\r\n\
    --b0undary--\r\n";

fn app() -> Router {
    Router::new()
        .route("/users", get(echo_query).post(echo_body))
        .route("/users/{id}", get(user).put(echo_body).delete(no_content))
        .route("/batch", axum::routing::delete(echo_body))
        .route("/text", get(|| async { "hello" }))
        .route(
            "/tags",
            get(|| async { (AppendHeaders([("x-tag", "a"), ("x-tag", "b")]), "tagged") }),
        )
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
        .route("/broken", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route(
            "/bytes",
            get(|| async { ([(header::CONTENT_TYPE, "application/octet-stream")], vec![1u8, 2, 3]) }),
        )
        .route(
            "/form",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "multipart/form-data; boundary=b0undary")],
                    MULTIPART_BODY,
                )
            }),
        )
}

async fn echo_query(RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!({ "query": query }))
}

async fn echo_body(headers: HeaderMap, body: String) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({ "content_type": content_type, "body": body }))
}

async fn user(axum::extract::Path(id): axum::extract::Path<u32>) -> impl IntoResponse {
    Json(User {
        id,
        name: "kim".to_string(),
    })
}

async fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct User {
    id: u32,
    name: String,
}

async fn start() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app()).await.unwrap() });
    format!("http://{addr}")
}

async fn client() -> HttpApiClient {
    HttpApiClient::new(ClientConfig::new(start().await))
}

#[tokio::test]
async fn get_sends_nested_params() {
    let client = client().await;
    let options = RequestOptions::new()
        .param("page", 1)
        .param("filter", json!({ "active": true }));

    let response = client.get("/users", options).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.msg.as_deref(), Some("성공"));
    assert_eq!(
        response.data,
        ResponseData::Json(json!({ "query": "page=1&filter.active=true" }))
    );
}

#[tokio::test]
async fn array_params_follow_configured_format() {
    let base_url = start().await;
    let options = || RequestOptions::new().param("tag", json!(["a", "b"]));

    let legacy = HttpApiClient::new(ClientConfig::new(base_url.clone()));
    let response = legacy.get("/users", options()).await.unwrap();
    assert_eq!(response.data, ResponseData::Json(json!({ "query": "a,b" })));

    let fixed = HttpApiClient::new(ClientConfig::new(base_url).with_array_format(ArrayFormat::Repeat));
    let response = fixed.get("/users", options()).await.unwrap();
    assert_eq!(
        response.data,
        ResponseData::Json(json!({ "query": "tag=a&tag=b" }))
    );
}

#[tokio::test]
async fn post_sends_json_body() {
    let client = client().await;

    let response = client
        .post("/users", Some(&json!({ "a": 1 })), RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(
        response.data,
        ResponseData::Json(json!({ "content_type": "application/json", "body": "{\"a\":1}" }))
    );
}

#[tokio::test]
async fn put_honours_content_type_override() {
    let client = client().await;
    let options = RequestOptions::new().header("Content-Type", "text/plain");

    let response = client
        .put("/users/1", Some("raw"), options)
        .await
        .unwrap();

    assert_eq!(
        response.data,
        ResponseData::Json(json!({ "content_type": "text/plain", "body": "\"raw\"" }))
    );
}

#[tokio::test]
async fn typed_get_decodes_into_struct() {
    let client = client().await;

    let response: ApiResponse<User> = client
        .get_json("/users/7", RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(
        response.data,
        User {
            id: 7,
            name: "kim".to_string()
        }
    );
}

#[tokio::test]
async fn delete_returns_no_content() {
    let client = client().await;

    let response = client.delete("/users/7", RequestOptions::new()).await.unwrap();

    assert_eq!(response.status, 204);
    assert_eq!(response.msg.as_deref(), Some("콘텐츠 없음"));
    assert_eq!(response.data, ResponseData::Text(String::new()));
}

#[tokio::test]
async fn delete_forwards_options_body() {
    let client = client().await;
    let options = RequestOptions::new()
        .header("Content-Type", "application/json")
        .body(r#"{"ids":[1,2]}"#);

    let response = client.delete("/batch", options).await.unwrap();

    assert_eq!(
        response.data,
        ResponseData::Json(json!({
            "content_type": "application/json",
            "body": r#"{"ids":[1,2]}"#,
        }))
    );
}

#[tokio::test]
async fn repeated_response_headers_are_joined() {
    let base_url = start().await;
    let transport = ReqwestTransport::with_client(reqwest::Client::new());

    let response = transport
        .send(TransportRequest {
            method: HttpMethod::Get,
            url: format!("{base_url}/tags"),
            headers: ApiHeaders::new(),
            body: None,
        })
        .await
        .unwrap();

    assert!(response.ok());
    assert_eq!(response.header("X-Tag"), Some("a, b"));
    assert_eq!(&response.body[..], b"tagged");
}

#[tokio::test]
async fn text_octet_stream_and_multipart_bodies() {
    let client = client().await;

    let text = client.get("/text", RequestOptions::new()).await.unwrap();
    assert_eq!(text.data, ResponseData::Text("hello".to_string()));

    let bytes = client.get("/bytes", RequestOptions::new()).await.unwrap();
    assert_eq!(bytes.data, ResponseData::Bytes(vec![1u8, 2, 3].into()));

    let form = client.get("/form", RequestOptions::new()).await.unwrap();
    let ResponseData::FormData(form) = form.data else {
        panic!("expected form data");
    };
    assert_eq!(form.text("name").as_deref(), Some("kiwi"));
}

#[tokio::test]
async fn error_statuses_fail_with_label() {
    let client = client().await;

    let err = client.get("/missing", RequestOptions::new()).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));
    assert_eq!(err.to_string(), "404: 찾을 수 없음");

    let err = client
        .post("/broken", Some(&json!({ "a": 1 })), RequestOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "500: 내부 서버 오류");
}

#[tokio::test]
async fn absolute_uri_ignores_base_url() {
    let base_url = start().await;
    let client = HttpApiClient::new(ClientConfig::new("http://unused.invalid"));

    let response = client
        .get(&format!("{base_url}/text"), RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(response.data, ResponseData::Text("hello".to_string()));
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpApiClient::new(ClientConfig::new(format!("http://{addr}")));
    let err = client.get("/text", RequestOptions::new()).await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}
