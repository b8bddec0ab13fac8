use crate::config::{AnnotationConfig, ContrastConfig, EdgeConfig, LegConfig, LineConfig, MassConfig};
use crate::detection::{annotate, contours, lines, overlap, preprocessing};
use crate::models::{BoundingBox, Detection, DetectionSource, LineSegment};
use crate::pipeline::{MetadataValue, PipelineContext, PipelineData, PipelineStep};
use anyhow::Result;
use image::DynamicImage;
use tracing::debug;

/// Convert image to grayscale
pub struct GrayscaleStep;

impl PipelineStep for GrayscaleStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let gray = preprocessing::to_grayscale(&data.image);
        data.image = DynamicImage::ImageLuma8(gray.clone());
        data.enhanced = Some(gray);
        Ok(data)
    }

    fn name(&self) -> &str {
        "Grayscale Conversion"
    }
}

/// Local contrast normalization for unevenly lit sheds
pub struct ContrastStep {
    pub config: ContrastConfig,
}

impl PipelineStep for ContrastStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        if !self.config.enabled {
            return Ok(data);
        }
        let gray = data.enhanced_or_gray();
        let enhanced = preprocessing::equalize_adaptive(
            &gray,
            self.config.clip_limit,
            self.config.tiles_x,
            self.config.tiles_y,
        );
        data.image = DynamicImage::ImageLuma8(enhanced.clone());
        data.enhanced = Some(enhanced);
        Ok(data)
    }

    fn name(&self) -> &str {
        "Contrast Enhancement"
    }
}

/// Detect edges using Canny
pub struct EdgeDetectionStep {
    pub config: EdgeConfig,
}

impl PipelineStep for EdgeDetectionStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let gray = data.enhanced_or_gray();
        let edges = preprocessing::detect_edges(
            &gray,
            self.config.low_threshold,
            self.config.high_threshold,
        );
        let edge_pixels = edges.pixels().filter(|p| p[0] > 0).count();
        let area = edges.width() as usize * edges.height() as usize;
        let edge_density = if area == 0 {
            0.0
        } else {
            edge_pixels as f32 / area as f32
        };
        debug!(edge_pixels, edge_density, "Edge map computed");

        data.set_metadata("edge_pixels", MetadataValue::Int(edge_pixels as i64));
        data.set_metadata("edge_density", MetadataValue::Float(edge_density));
        data.image = DynamicImage::ImageLuma8(edges.clone());
        data.edges = Some(edges);
        Ok(data)
    }

    fn name(&self) -> &str {
        "Edge Detection"
    }
}

/// Straight segments from the edge map
pub struct LineSegmentStep {
    pub config: LineConfig,
}

impl PipelineStep for LineSegmentStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let Some(edges) = &data.edges else {
            return Err(anyhow::anyhow!("Line extraction needs an edge map; add EdgeDetectionStep first"));
        };
        let segments = lines::extract_segments(edges, &self.config);
        debug!(segments = segments.len(), "Line segments extracted");

        data.set_metadata("segment_count", MetadataValue::Int(segments.len() as i64));
        data.segments = segments;
        Ok(data)
    }

    fn name(&self) -> &str {
        "Line Segments"
    }
}

/// Table tops supported by legs
///
/// Every horizontal segment is a potential table top; vertical segments
/// starting near its height and inside its span count as legs. A top with
/// enough legs becomes a box reaching down to the lowest leg end.
pub struct LegMatchStep {
    pub lines: LineConfig,
    pub legs: LegConfig,
    pub max_overlap: f32,
}

impl LegMatchStep {
    fn match_legs(&self, top: &LineSegment, verticals: &[LineSegment]) -> Vec<LineSegment> {
        let (left, right) = top.x_span();
        let top_y = top.y1;
        verticals
            .iter()
            .filter(|leg| {
                let (leg_top, _) = leg.y_span();
                (leg_top - top_y).abs() < self.legs.vertical_tolerance
                    && leg.x1 >= left - self.legs.horizontal_margin
                    && leg.x1 <= right + self.legs.horizontal_margin
            })
            .copied()
            .collect()
    }
}

impl PipelineStep for LegMatchStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let (horizontal, vertical) = lines::classify_segments(
            &data.segments,
            self.lines.horizontal_ratio,
            self.lines.vertical_ratio,
        );
        debug!(
            horizontal = horizontal.len(),
            vertical = vertical.len(),
            "Segments classified"
        );

        let (img_width, img_height) = data.original.dimensions();
        let mut accepted = 0;

        for top in &horizontal {
            let legs = self.match_legs(top, &vertical);
            if legs.is_empty() || legs.len() < self.legs.min_legs {
                continue;
            }

            let (left, right) = top.x_span();
            let lowest = legs
                .iter()
                .map(|leg| leg.y_span().1)
                .fold(top.y1, i32::max);
            data.legs.extend_from_slice(&legs);

            let x = left.max(0) as u32;
            let y = top.y1.max(0) as u32;
            let bbox = BoundingBox::new(x, y, (right - left).max(0) as u32, (lowest - top.y1).max(0) as u32)
                .clamped(img_width, img_height);

            if overlap::accept(&mut data.detections, Detection::new(bbox, DetectionSource::Line), self.max_overlap) {
                accepted += 1;
                debug!(x = bbox.x, y = bbox.y, w = bbox.width, h = bbox.height, legs = legs.len(), "Workstation accepted");
            }
        }

        data.set_metadata("line_detections", MetadataValue::Int(accepted));
        Ok(data)
    }

    fn name(&self) -> &str {
        "Leg Matching"
    }
}

/// Large wide blobs low in the frame
///
/// Broken edges (tools lying on the bench) defeat the line path; a
/// thresholded and closed image still shows the whole surface as one mass.
pub struct SurfaceMassStep {
    pub config: MassConfig,
    pub max_overlap: f32,
}

impl PipelineStep for SurfaceMassStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let gray = data.enhanced_or_gray();
        let (binary, level) = preprocessing::binarize_otsu(&gray);
        let closed = preprocessing::close_gaps(&binary, self.config.close_radius);
        let found = contours::find_external_contours(&closed);
        debug!(otsu_level = level, contours = found.len(), "Surface contours found");

        let (img_width, img_height) = data.original.dimensions();
        let min_area = img_width as f64 * img_height as f64 * self.config.min_area_fraction as f64;
        let min_top = img_height as f32 * self.config.min_top_fraction;
        let mut accepted = 0;

        for contour in &found {
            if contour.area < min_area {
                continue;
            }
            let bbox = contour.bounding_box().clamped(img_width, img_height);
            let wide = bbox.width as f32 > bbox.height as f32 * self.config.min_aspect_ratio;
            let low = bbox.y as f32 > min_top;
            if !(wide && low) {
                continue;
            }

            if overlap::accept(&mut data.detections, Detection::new(bbox, DetectionSource::Mass), self.max_overlap) {
                accepted += 1;
                debug!(x = bbox.x, y = bbox.y, w = bbox.width, h = bbox.height, area = contour.area, "Surface accepted");
            }
        }

        data.set_metadata("otsu_level", MetadataValue::Int(level as i64));
        data.set_metadata("contour_count", MetadataValue::Int(found.len() as i64));
        data.set_metadata("mass_detections", MetadataValue::Int(accepted));
        data.image = DynamicImage::ImageLuma8(closed);
        Ok(data)
    }

    fn name(&self) -> &str {
        "Surface Mass"
    }
}

/// Draw legs and boxes on a copy of the input
pub struct AnnotateStep {
    pub config: AnnotationConfig,
}

impl PipelineStep for AnnotateStep {
    fn process(&self, mut data: PipelineData, _context: &PipelineContext) -> Result<PipelineData> {
        let mut canvas = data.original.as_ref().clone();
        annotate::draw_annotations(&mut canvas, &data.legs, &data.detections, &self.config);
        data.image = DynamicImage::ImageRgb8(canvas);
        Ok(data)
    }

    fn name(&self) -> &str {
        "Annotate"
    }
}
