//! Integration tests for the `/process` payload handling.
//!
//! Tests cover:
//! - Rejecting requests without an image
//! - Rejecting malformed base64 and undecodable bytes
//! - Annotated JPEG responses preserving the input dimensions

mod common;

use toolshed::ServiceError;
use toolshed::service::{
    decode_data_url as decode_payload, encode_jpeg_data_url, process_payload, ErrorBody,
    ProcessRequest,
};

use common::*;

#[test]
fn test_missing_image_is_rejected() {
    let detector = WorkbenchDetector::default();
    let result = process_payload(&detector, ProcessRequest { image: None });

    let err = result.expect_err("A request without an image must fail");
    assert!(matches!(err, ServiceError::MissingImage));
    assert!(err.is_client_error());
    assert_eq!(ErrorBody::from(&err).error, "No image provided");
}

#[test]
fn test_request_without_image_key_deserializes() -> anyhow::Result<()> {
    let request: ProcessRequest = serde_json::from_str("{}")?;
    assert!(request.image.is_none());

    let request: ProcessRequest = serde_json::from_str(r#"{ "image": null }"#)?;
    assert!(request.image.is_none());

    Ok(())
}

#[test]
fn test_bad_base64_is_client_error() {
    let detector = WorkbenchDetector::default();
    let request = ProcessRequest {
        image: Some("data:image/png;base64,!!!not base64!!!".to_string()),
    };

    let err = process_payload(&detector, request).expect_err("Invalid base64 must fail");
    assert!(matches!(err, ServiceError::Base64(_)));
    assert!(err.is_client_error());
}

#[test]
fn test_undecodable_bytes_are_client_error() {
    // Valid base64 of bytes that are no image format
    let err = decode_payload("data:image/png;base64,aGVsbG8gd29ybGQ=")
        .expect_err("Text is not an image");
    assert!(matches!(err, ServiceError::Decode(_)));
    assert!(err.is_client_error());
}

#[test]
fn test_bare_base64_is_accepted() -> anyhow::Result<()> {
    let img = uniform_image(12, 8, 200);
    let data_url = png_data_url(&img);
    let (_, payload) = data_url
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("no header"))?;

    let decoded = decode_payload(payload)?;
    assert_eq!((decoded.width(), decoded.height()), (12, 8));

    Ok(())
}

#[test]
fn test_process_returns_jpeg_of_same_size() -> anyhow::Result<()> {
    let (img, _) = slab_image();
    let detector = WorkbenchDetector::default();

    let response = process_payload(
        &detector,
        ProcessRequest {
            image: Some(png_data_url(&img)),
        },
    )?;

    assert!(response.image.starts_with("data:image/jpeg;base64,"));
    let annotated = decode_data_url(&response.image);
    assert_eq!((annotated.width(), annotated.height()), img.dimensions());
    assert!(!response.detections.is_empty());

    Ok(())
}

#[test]
fn test_jpeg_round_trip_keeps_dimensions() -> anyhow::Result<()> {
    let img = gradient_image(33, 17);
    let data_url = encode_jpeg_data_url(&img)?;
    let decoded = decode_payload(&data_url)?;
    assert_eq!((decoded.width(), decoded.height()), (33, 17));

    Ok(())
}

#[test]
fn test_response_json_shape() -> anyhow::Result<()> {
    let (img, _) = slab_image();
    let detector = WorkbenchDetector::new(DetectorConfig::mass_only())?;
    let response = process_payload(
        &detector,
        ProcessRequest {
            image: Some(png_data_url(&img)),
        },
    )?;

    let json = serde_json::to_value(&response)?;
    let first = &json["detections"][0];
    assert_eq!(first["type"], "Surface (AI Mass)");
    for key in ["x", "y", "w", "h"] {
        assert!(first[key].is_u64(), "missing {}", key);
    }

    Ok(())
}
