pub mod preprocessing;
pub mod contours;
pub mod lines;
pub mod overlap;
pub mod annotate;
pub mod steps;

use std::path::PathBuf;
use std::sync::Arc;

use image::{DynamicImage, RgbImage};
use tracing::info;

use crate::config::DetectorConfig;
use crate::models::Detection;
use crate::pipeline::Pipeline;

/// Annotated copy of the input plus the accepted boxes.
#[derive(Debug, Clone)]
pub struct DetectionOutput {
    pub annotated: RgbImage,
    pub detections: Vec<Detection>,
}

/// Workbench detector: one configured run of the surface-and-leg heuristic.
#[derive(Debug, Clone, Default)]
pub struct WorkbenchDetector {
    config: DetectorConfig,
    debug_out: Option<PathBuf>,
}

impl WorkbenchDetector {
    pub fn new(config: DetectorConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            debug_out: None,
        })
    }

    /// Dump every intermediate image under `dir` (must be empty or absent).
    pub fn with_debug(mut self, dir: PathBuf) -> Self {
        self.debug_out = Some(dir);
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Build the step pipeline for the current configuration
    pub fn build_pipeline(&self) -> Pipeline {
        use crate::detection::steps::*;

        let config = &self.config;
        let mut pipeline = Pipeline::new()
            .add_step(Arc::new(GrayscaleStep))
            .add_step(Arc::new(ContrastStep {
                config: config.contrast.clone(),
            }));

        if config.lines.enabled {
            pipeline = pipeline
                .add_step(Arc::new(EdgeDetectionStep {
                    config: config.edges.clone(),
                }))
                .add_step(Arc::new(LineSegmentStep {
                    config: config.lines.clone(),
                }))
                .add_step(Arc::new(LegMatchStep {
                    lines: config.lines.clone(),
                    legs: config.legs.clone(),
                    max_overlap: config.max_overlap,
                }));
        }

        if config.mass.enabled {
            pipeline = pipeline.add_step(Arc::new(SurfaceMassStep {
                config: config.mass.clone(),
                max_overlap: config.max_overlap,
            }));
        }

        pipeline.add_step(Arc::new(AnnotateStep {
            config: config.annotation.clone(),
        }))
    }

    /// Run the heuristic on one image.
    ///
    /// Only the debug dump can fail; detection itself always produces an
    /// output, possibly with no boxes.
    pub fn detect(&self, img: &DynamicImage) -> anyhow::Result<DetectionOutput> {
        let rgb = img.to_rgb8();
        if rgb.width() == 0 || rgb.height() == 0 {
            return Ok(DetectionOutput {
                annotated: rgb,
                detections: Vec::new(),
            });
        }

        let mut pipeline = self.build_pipeline();
        if let Some(dir) = &self.debug_out {
            pipeline = pipeline.with_debug(dir.clone())?;
        }

        let (width, height) = rgb.dimensions();
        let data = pipeline.run(rgb)?;
        info!(width, height, detections = data.detections.len(), "Workbench detection done");

        let annotated = match data.image {
            DynamicImage::ImageRgb8(annotated) => annotated,
            other => other.to_rgb8(),
        };
        Ok(DetectionOutput {
            annotated,
            detections: data.detections,
        })
    }
}
