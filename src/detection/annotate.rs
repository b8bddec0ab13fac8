use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::config::AnnotationConfig;
use crate::models::{Detection, DetectionSource, LineSegment};

/// Draw matched legs and accepted boxes onto `image`.
pub fn draw_annotations(
    image: &mut RgbImage,
    legs: &[LineSegment],
    detections: &[Detection],
    config: &AnnotationConfig,
) {
    if config.draw_legs {
        let color = Rgb(config.leg_color);
        for leg in legs {
            draw_leg(image, leg, color, config.leg_thickness);
        }
    }

    for detection in detections {
        let color = match detection.source {
            DetectionSource::Line => Rgb(config.line_box_color),
            DetectionSource::Mass => Rgb(config.mass_box_color),
        };
        draw_box(image, detection, color, config.box_thickness);
    }
}

/// Vertical leg as a band of parallel one-pixel lines.
fn draw_leg(image: &mut RgbImage, leg: &LineSegment, color: Rgb<u8>, thickness: u32) {
    let (top, bottom) = leg.y_span();
    let half = thickness as i32 / 2;
    for offset in -half..(thickness as i32 - half) {
        let x = (leg.x1 + offset) as f32;
        draw_line_segment_mut(image, (x, top as f32), (x, bottom as f32), color);
    }
}

/// Box outline, grown inwards one pixel per unit of thickness.
fn draw_box(image: &mut RgbImage, detection: &Detection, color: Rgb<u8>, thickness: u32) {
    let bbox = &detection.bbox;
    for inset in 0..thickness {
        let width = bbox.width.saturating_sub(2 * inset);
        let height = bbox.height.saturating_sub(2 * inset);
        if width == 0 || height == 0 {
            break;
        }
        let rect = Rect::at((bbox.x + inset) as i32, (bbox.y + inset) as i32).of_size(width, height);
        draw_hollow_rect_mut(image, rect, color);
    }
}
