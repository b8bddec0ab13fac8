use thiserror::Error;

/// Rejected detector configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be in {range}, got {value}")]
    OutOfRange {
        field: &'static str,
        range: &'static str,
        value: f32,
    },
    #[error("edges.low_threshold ({low}) must not exceed edges.high_threshold ({high})")]
    EdgeThresholds { low: f32, high: f32 },
    #[error("contrast tile grid must be at least 1x1, got {0}x{1}")]
    EmptyTileGrid(u32, u32),
}

/// Failure while serving a `/process` request.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("No image provided")]
    MissingImage,
    #[error("Invalid request body: {0}")]
    InvalidJson(String),
    #[error("Image payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Could not decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("Could not encode annotated image: {0}")]
    Encode(#[source] image::ImageError),
    #[error("Detection failed: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Whether the caller sent something unusable, as opposed to a fault on our side.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::MissingImage
                | ServiceError::InvalidJson(_)
                | ServiceError::Base64(_)
                | ServiceError::Decode(_)
        )
    }
}
