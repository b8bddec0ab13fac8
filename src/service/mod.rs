//! Detector service: the `/process` contract and its HTTP front.

pub mod payload;
#[cfg(feature = "server")]
pub mod routes;

pub use payload::{
    decode_data_url, encode_jpeg_data_url, process_payload, ErrorBody, ProcessRequest,
    ProcessResponse,
};
#[cfg(feature = "server")]
pub use routes::{router, serve, ServerConfig};
