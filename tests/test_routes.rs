//! Integration tests for the HTTP front of the detector.

#![cfg(feature = "server")]

mod common;

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::Router;
use tower::ServiceExt;
use toolshed::service::router;

use common::*;

const BODY_LIMIT: usize = 16 * 1024 * 1024;

fn app() -> Router {
    router(Arc::new(WorkbenchDetector::default()), BODY_LIMIT)
}

fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/process")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("Failed to build request")
}

async fn json_body(response: axum::response::Response) -> anyhow::Result<serde_json::Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn test_missing_image_returns_400() -> anyhow::Result<()> {
    let response = app().oneshot(post_json("{}")).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await?;
    assert_eq!(body, serde_json::json!({ "error": "No image provided" }));

    Ok(())
}

#[tokio::test]
async fn test_malformed_json_returns_400() -> anyhow::Result<()> {
    let response = app().oneshot(post_json("not json")).await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await?;
    assert!(body["error"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_bad_payload_returns_400() -> anyhow::Result<()> {
    let response = app()
        .oneshot(post_json(r#"{ "image": "data:image/png;base64,@@@@" }"#))
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_valid_upload_returns_annotated_jpeg() -> anyhow::Result<()> {
    let (img, _) = slab_image();
    let request = serde_json::json!({ "image": png_data_url(&img) }).to_string();

    let response = app().oneshot(post_json(request)).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await?;
    let data_url = body["image"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("image missing from {}", body))?;
    let annotated = decode_data_url(data_url);
    assert_eq!((annotated.width(), annotated.height()), img.dimensions());
    assert!(body["detections"].is_array());

    Ok(())
}

#[tokio::test]
async fn test_index_page_is_served() -> anyhow::Result<()> {
    let request = Request::builder().uri("/").body(Body::empty())?;
    let response = app().oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let html = String::from_utf8(bytes.to_vec())?;
    assert!(html.contains("/process"));

    Ok(())
}
