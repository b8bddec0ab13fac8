use image::GrayImage;
use imageproc::hough::{detect_lines, LineDetectionOptions, PolarLine};

use crate::config::LineConfig;
use crate::models::{LineSegment, Orientation};

const EPSILON: f32 = 1e-6;

/// Extract finite segments from a binary edge map.
///
/// Peaks of the Hough accumulator give infinite lines. Each line is walked
/// across the image one pixel at a time; runs of edge samples separated by no
/// more than `max_line_gap` misses are joined, and every run at least
/// `min_line_length` long becomes a segment.
pub fn extract_segments(edges: &GrayImage, config: &LineConfig) -> Vec<LineSegment> {
    let (width, height) = edges.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let options = LineDetectionOptions {
        vote_threshold: config.vote_threshold,
        suppression_radius: config.suppression_radius,
    };

    detect_lines(edges, options)
        .iter()
        .flat_map(|line| segments_along(edges, line, config.max_line_gap, config.min_line_length))
        .collect()
}

/// Split segments into (horizontal, vertical), dropping ambiguous ones.
pub fn classify_segments(
    segments: &[LineSegment],
    horizontal_ratio: f32,
    vertical_ratio: f32,
) -> (Vec<LineSegment>, Vec<LineSegment>) {
    let mut horizontal = Vec::new();
    let mut vertical = Vec::new();

    for segment in segments {
        match segment.orientation(horizontal_ratio, vertical_ratio) {
            Some(Orientation::Horizontal) => horizontal.push(*segment),
            Some(Orientation::Vertical) => vertical.push(*segment),
            None => {}
        }
    }

    (horizontal, vertical)
}

/// Where the line `x cos(t) + y sin(t) = r` enters and leaves the image.
fn clip_to_image(line: &PolarLine, width: u32, height: u32) -> Option<((f32, f32), (f32, f32))> {
    let theta = (line.angle_in_degrees as f32).to_radians();
    let (sin_t, cos_t) = theta.sin_cos();
    let r = line.r;
    let max_x = (width - 1) as f32;
    let max_y = (height - 1) as f32;

    let mut points: Vec<(f32, f32)> = Vec::with_capacity(4);
    if sin_t.abs() > EPSILON {
        for x in [0.0, max_x] {
            let y = (r - x * cos_t) / sin_t;
            if (0.0..=max_y).contains(&y) {
                points.push((x, y));
            }
        }
    }
    if cos_t.abs() > EPSILON {
        for y in [0.0, max_y] {
            let x = (r - y * sin_t) / cos_t;
            if (0.0..=max_x).contains(&x) {
                points.push((x, y));
            }
        }
    }

    // The two intersections farthest apart span the visible part of the line.
    let mut best: Option<((f32, f32), (f32, f32), f32)> = None;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let d = (a.0 - b.0).powi(2) + (a.1 - b.1).powi(2);
            if best.is_none_or(|(_, _, bd)| d > bd) {
                best = Some((*a, *b, d));
            }
        }
    }

    match best {
        Some((a, b, d)) if d > EPSILON => Some((a, b)),
        _ => None,
    }
}

/// Edge test that tolerates the one-pixel jitter of rounded line samples.
fn is_edge_near(edges: &GrayImage, x: i32, y: i32) -> bool {
    let (width, height) = edges.dimensions();
    for ny in (y - 1)..=(y + 1) {
        for nx in (x - 1)..=(x + 1) {
            if nx >= 0
                && ny >= 0
                && (nx as u32) < width
                && (ny as u32) < height
                && edges.get_pixel(nx as u32, ny as u32)[0] > 0
            {
                return true;
            }
        }
    }
    false
}

fn segments_along(
    edges: &GrayImage,
    line: &PolarLine,
    max_gap: u32,
    min_length: f32,
) -> Vec<LineSegment> {
    let (width, height) = edges.dimensions();
    let Some((p0, p1)) = clip_to_image(line, width, height) else {
        return Vec::new();
    };

    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let steps = (dx.abs().max(dy.abs()).ceil() as usize).max(1);

    let mut segments = Vec::new();
    let mut run_start: Option<(i32, i32)> = None;
    let mut run_end = (0i32, 0i32);
    let mut misses = 0u32;

    let mut close_run = |start: Option<(i32, i32)>, end: (i32, i32)| {
        if let Some((sx, sy)) = start {
            let segment = LineSegment::new(sx, sy, end.0, end.1);
            if segment.length() >= min_length {
                segments.push(segment);
            }
        }
    };

    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = (p0.0 + dx * t).round() as i32;
        let y = (p0.1 + dy * t).round() as i32;

        if is_edge_near(edges, x, y) {
            if run_start.is_none() {
                run_start = Some((x, y));
            }
            run_end = (x, y);
            misses = 0;
        } else if run_start.is_some() {
            misses += 1;
            if misses > max_gap {
                close_run(run_start.take(), run_end);
                misses = 0;
            }
        }
    }
    close_run(run_start, run_end);

    segments
}
