mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from toolshed for tests
pub use toolshed::{
    BoundingBox, Color, Detection, DetectionOutput, DetectionSource, DetectorConfig,
    WorkbenchDetector,
};
