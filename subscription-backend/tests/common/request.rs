// tests/common/request.rs
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    response::Response,
};
use serde_json::Value;

/// JSON ボディ付きのリクエストを作成
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    let method = Method::from_bytes(method.as_bytes()).unwrap();

    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// ボディなしのリクエストを作成
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    let method = Method::from_bytes(method.as_bytes()).unwrap();

    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Bearer トークン付きのリクエストを作成
pub fn authenticated_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    let method = Method::from_bytes(method.as_bytes()).unwrap();

    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub async fn response_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn response_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
