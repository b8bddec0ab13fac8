use image::{DynamicImage, GrayImage, RgbImage};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Result;
use tracing::{debug, info};

use crate::models::{Detection, LineSegment};

/// Data that flows through the pipeline
///
/// Unlike a plain image filter chain, the detector keeps several
/// intermediate products alive at once: the mass path thresholds the
/// contrast-enhanced image while the line path works on its edge map.
#[derive(Clone)]
pub struct PipelineData {
    /// Output of the most recent step (what debug mode writes to disk)
    pub image: DynamicImage,

    /// The decoded input, shared with every step
    pub original: Arc<RgbImage>,

    /// Grayscale after optional contrast normalization
    pub enhanced: Option<GrayImage>,

    /// Binary edge map
    pub edges: Option<GrayImage>,

    /// Segments extracted from the edge map, before classification
    pub segments: Vec<LineSegment>,

    /// Vertical segments that were matched to a table top
    pub legs: Vec<LineSegment>,

    /// Accepted detections, in acceptance order
    pub detections: Vec<Detection>,

    /// Per-step statistics (e.g. "segment_count", "edge_density")
    pub metadata: HashMap<String, MetadataValue>,
}

/// Metadata value types
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Float(f32),
    Int(i64),
}

impl PipelineData {
    /// Create PipelineData for a full image
    pub fn from_image(image: RgbImage) -> Self {
        let original = Arc::new(image);
        Self {
            image: DynamicImage::ImageRgb8(original.as_ref().clone()),
            original,
            enhanced: None,
            edges: None,
            segments: Vec::new(),
            legs: Vec::new(),
            detections: Vec::new(),
            metadata: HashMap::new(),
        }
    }

    pub fn set_metadata(&mut self, key: impl Into<String>, value: MetadataValue) {
        self.metadata.insert(key.into(), value);
    }

    pub fn get_float(&self, key: &str) -> Option<f32> {
        match self.metadata.get(key) {
            Some(MetadataValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.metadata.get(key) {
            Some(MetadataValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// The enhanced grayscale image, computing a plain grayscale if no
    /// contrast step ran.
    pub fn enhanced_or_gray(&self) -> GrayImage {
        match &self.enhanced {
            Some(gray) => gray.clone(),
            None => DynamicImage::ImageRgb8(self.original.as_ref().clone()).to_luma8(),
        }
    }
}

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Root directory for debug outputs
    pub output_dir: PathBuf,
    /// Whether debug mode is enabled
    pub enabled: bool,
}

/// Context available to all pipeline steps
#[derive(Clone, Debug, Default)]
pub struct PipelineContext {
    pub debug: Option<DebugConfig>,
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    /// Consume the data of the previous step and return the updated data
    fn process(&self, data: PipelineData, context: &PipelineContext) -> Result<PipelineData>;

    /// Human-readable name for this step (used in logs and debug directory names)
    fn name(&self) -> &str;
}

/// Composable pipeline builder
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    context: PipelineContext,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            context: PipelineContext::default(),
        }
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: PathBuf) -> Result<Self> {
        if output_dir.exists() {
            let entries = std::fs::read_dir(&output_dir)?;
            if entries.count() > 0 {
                return Err(anyhow::anyhow!(
                    "Debug directory is not empty: {}",
                    output_dir.display()
                ));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        self.context.debug = Some(DebugConfig {
            output_dir,
            enabled: true,
        });

        Ok(self)
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Helper method to add a step from a Box (for convenience)
    pub fn add_step_boxed(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.steps.push(Arc::from(step));
        self
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Run every step in order on an input image
    pub fn run(&self, input: RgbImage) -> Result<PipelineData> {
        self.run_partial(input, self.steps.len())
    }

    /// Run the pipeline but stop after `num_steps` steps (useful for debugging)
    pub fn run_partial(&self, input: RgbImage, num_steps: usize) -> Result<PipelineData> {
        let mut data = PipelineData::from_image(input);
        self.save_debug_image(0, "input", &data.image)?;

        for (step_idx, step) in self.steps.iter().take(num_steps).enumerate() {
            debug!(step = step.name(), "Running step");
            data = step.process(data, &self.context)?;
            self.save_debug_image(step_idx + 1, step.name(), &data.image)?;
        }

        info!(
            steps = num_steps.min(self.steps.len()),
            detections = data.detections.len(),
            "Pipeline finished"
        );
        Ok(data)
    }

    fn save_debug_image(&self, index: usize, step_name: &str, image: &DynamicImage) -> Result<()> {
        let Some(debug_config) = &self.context.debug else {
            return Ok(());
        };
        if !debug_config.enabled {
            return Ok(());
        }

        let step_dir_name = format!("{:02}_{}", index, step_name.to_lowercase().replace(' ', "_"));
        let step_dir = debug_config.output_dir.join(&step_dir_name);
        std::fs::create_dir_all(&step_dir)?;

        let output_path = step_dir.join("01.png");
        image
            .save(&output_path)
            .map_err(|e| anyhow::anyhow!("Failed to save debug image: {}", e))?;
        debug!("Debug: saved {}/01.png", step_dir_name);

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
