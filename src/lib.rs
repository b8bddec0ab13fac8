pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod service;
pub mod simulator;

pub use config::DetectorConfig;
pub use detection::{DetectionOutput, WorkbenchDetector};
pub use error::{ConfigError, ServiceError};
pub use models::{BoundingBox, Color, Detection, DetectionSource};
pub use pipeline::{
    DebugConfig, MetadataValue, Pipeline, PipelineContext, PipelineData, PipelineStep,
};

#[cfg(feature = "gui")]
pub mod gui;
