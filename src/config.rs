//! Tunable thresholds for the workbench heuristic.
//!
//! Every constant the detector uses lives here. The defaults reproduce the
//! most complete variant of the heuristic; the presets switch one of the two
//! candidate paths off.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub contrast: ContrastConfig,
    pub edges: EdgeConfig,
    pub lines: LineConfig,
    pub legs: LegConfig,
    pub mass: MassConfig,
    /// A candidate is dropped when more than this fraction of its area lies
    /// inside an already accepted box.
    pub max_overlap: f32,
    pub annotation: AnnotationConfig,
}

/// Contrast-limited adaptive histogram equalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastConfig {
    pub enabled: bool,
    pub clip_limit: f32,
    pub tiles_x: u32,
    pub tiles_y: u32,
}

/// Canny hysteresis thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeConfig {
    pub low_threshold: f32,
    pub high_threshold: f32,
}

/// Segment extraction and orientation classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    pub enabled: bool,
    pub vote_threshold: u32,
    pub suppression_radius: u32,
    pub min_line_length: f32,
    pub max_line_gap: u32,
    /// `dx > dy * horizontal_ratio` makes a segment horizontal.
    pub horizontal_ratio: f32,
    /// `dy > dx * vertical_ratio` makes a segment vertical.
    pub vertical_ratio: f32,
}

/// Matching of vertical "legs" to horizontal "tops".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegConfig {
    /// Max distance between a leg's top and the top segment's y.
    pub vertical_tolerance: i32,
    /// Slack allowed on either side of the top segment's x span.
    pub horizontal_margin: i32,
    pub min_legs: usize,
}

/// Contour based "solid mass" path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassConfig {
    pub enabled: bool,
    /// Radius of the square closing element (7 gives a 15x15 kernel).
    pub close_radius: u8,
    /// Minimum contour area as a fraction of the image area.
    pub min_area_fraction: f32,
    /// The box must satisfy `w > h * min_aspect_ratio`.
    pub min_aspect_ratio: f32,
    /// The box top must be below this fraction of the image height.
    pub min_top_fraction: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    pub draw_legs: bool,
    pub leg_color: [u8; 3],
    pub line_box_color: [u8; 3],
    pub mass_box_color: [u8; 3],
    pub leg_thickness: u32,
    pub box_thickness: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            contrast: ContrastConfig::default(),
            edges: EdgeConfig::default(),
            lines: LineConfig::default(),
            legs: LegConfig::default(),
            mass: MassConfig::default(),
            max_overlap: 0.7,
            annotation: AnnotationConfig::default(),
        }
    }
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            clip_limit: 2.0,
            tiles_x: 8,
            tiles_y: 8,
        }
    }
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            low_threshold: 50.0,
            high_threshold: 150.0,
        }
    }
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            vote_threshold: 40,
            suppression_radius: 4,
            min_line_length: 60.0,
            max_line_gap: 20,
            horizontal_ratio: 3.0,
            vertical_ratio: 2.0,
        }
    }
}

impl Default for LegConfig {
    fn default() -> Self {
        Self {
            vertical_tolerance: 40,
            horizontal_margin: 20,
            min_legs: 1,
        }
    }
}

impl Default for MassConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            close_radius: 7,
            min_area_fraction: 0.05,
            min_aspect_ratio: 1.2,
            min_top_fraction: 0.2,
        }
    }
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            draw_legs: true,
            leg_color: [0, 100, 255],
            line_box_color: [0, 255, 0],
            mass_box_color: [255, 200, 0],
            leg_thickness: 3,
            box_thickness: 2,
        }
    }
}

impl DetectorConfig {
    /// Only the table-top/leg path.
    pub fn lines_only() -> Self {
        let mut config = Self::default();
        config.mass.enabled = false;
        config
    }

    /// Only the contour mass path.
    pub fn mass_only() -> Self {
        let mut config = Self::default();
        config.lines.enabled = false;
        config
    }

    /// Load a JSON config file. Missing keys fall back to the defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_overlap > 0.0 && self.max_overlap <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "max_overlap",
                range: "(0, 1]",
                value: self.max_overlap,
            });
        }
        if self.edges.low_threshold > self.edges.high_threshold {
            return Err(ConfigError::EdgeThresholds {
                low: self.edges.low_threshold,
                high: self.edges.high_threshold,
            });
        }
        if self.contrast.tiles_x == 0 || self.contrast.tiles_y == 0 {
            return Err(ConfigError::EmptyTileGrid(
                self.contrast.tiles_x,
                self.contrast.tiles_y,
            ));
        }
        if self.contrast.clip_limit <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "contrast.clip_limit",
                range: "(0, inf)",
                value: self.contrast.clip_limit,
            });
        }
        if !(0.0..=1.0).contains(&self.mass.min_area_fraction) {
            return Err(ConfigError::OutOfRange {
                field: "mass.min_area_fraction",
                range: "[0, 1]",
                value: self.mass.min_area_fraction,
            });
        }
        if !(0.0..=1.0).contains(&self.mass.min_top_fraction) {
            return Err(ConfigError::OutOfRange {
                field: "mass.min_top_fraction",
                range: "[0, 1]",
                value: self.mass.min_top_fraction,
            });
        }
        Ok(())
    }
}
