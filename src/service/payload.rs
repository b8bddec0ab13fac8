use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};

use crate::detection::WorkbenchDetector;
use crate::error::ServiceError;
use crate::models::Detection;

/// Quality used when re-encoding the annotated image.
pub const JPEG_QUALITY: u8 = 95;

/// Body of `POST /process`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// `data:image/jpeg;base64,...`
    pub image: String,
    pub detections: Vec<Detection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&ServiceError> for ErrorBody {
    fn from(err: &ServiceError) -> Self {
        ErrorBody {
            error: err.to_string(),
        }
    }
}

/// Decode a `data:image/<fmt>;base64,<payload>` URL.
///
/// A bare base64 payload without the `data:` header is accepted too.
pub fn decode_data_url(data_url: &str) -> Result<DynamicImage, ServiceError> {
    let payload = match data_url.split_once(',') {
        Some((_, payload)) => payload,
        None => data_url,
    };
    let bytes = STANDARD.decode(payload.trim())?;
    image::load_from_memory(&bytes).map_err(ServiceError::Decode)
}

/// Encode as `data:image/jpeg;base64,...`.
pub fn encode_jpeg_data_url(image: &RgbImage) -> Result<String, ServiceError> {
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
    image.write_with_encoder(encoder).map_err(ServiceError::Encode)?;
    Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(buffer.into_inner())))
}

/// Decode, detect, annotate and re-encode one upload.
pub fn process_payload(
    detector: &WorkbenchDetector,
    request: ProcessRequest,
) -> Result<ProcessResponse, ServiceError> {
    let data_url = request.image.ok_or(ServiceError::MissingImage)?;
    let image = decode_data_url(&data_url)?;

    let output = detector
        .detect(&image)
        .map_err(|e| ServiceError::Internal(e.to_string()))?;

    Ok(ProcessResponse {
        image: encode_jpeg_data_url(&output.annotated)?,
        detections: output.detections,
    })
}
