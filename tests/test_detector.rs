//! Integration tests for the workbench detector.
//!
//! Tests cover:
//! - Featureless photos yielding nothing and an untouched image
//! - The surface-mass path on a single bright slab
//! - The top-and-legs path on a synthetic bench
//! - Debug directory output
//! - Loading and validating detector configs

mod common;

use image::DynamicImage;
use toolshed::ConfigError;

use common::*;

#[test]
fn test_uniform_image_has_no_detections() -> anyhow::Result<()> {
    let img = uniform_image(320, 240, 128);
    let detector = WorkbenchDetector::default();

    let output = detector.detect(&DynamicImage::ImageRgb8(img.clone()))?;

    assert!(output.detections.is_empty());
    assert_eq!(output.annotated.dimensions(), img.dimensions());
    assert_eq!(output.annotated, img, "Nothing found, nothing drawn");

    Ok(())
}

#[test]
fn test_uniform_image_of_uneven_size_has_no_detections() -> anyhow::Result<()> {
    let detector = WorkbenchDetector::default();

    // Sizes the 8x8 contrast grid does not divide, including ones whose last
    // tile row or column would be a single pixel
    let sizes = [(74, 95), (60, 190), (130, 90), (97, 61), (57, 25), (9, 17), (201, 113)];
    for (width, height) in sizes {
        for value in [0, 30, 128, 255] {
            let img = uniform_image(width, height, value);
            let output = detector.detect(&DynamicImage::ImageRgb8(img.clone()))?;

            assert!(
                output.detections.is_empty(),
                "{}x{}@{}: {:?}",
                width,
                height,
                value,
                output.detections
            );
            assert_eq!(output.annotated, img, "{}x{}@{} was drawn on", width, height, value);
        }
    }

    Ok(())
}

#[test]
fn test_empty_image_is_returned_unchanged() -> anyhow::Result<()> {
    let detector = WorkbenchDetector::default();
    let output = detector.detect(&DynamicImage::new_rgb8(0, 0))?;

    assert!(output.detections.is_empty());
    assert_eq!(output.annotated.dimensions(), (0, 0));

    Ok(())
}

#[test]
fn test_slab_found_by_mass_path() -> anyhow::Result<()> {
    let (img, expected) = slab_image();
    let detector = WorkbenchDetector::new(DetectorConfig::mass_only())?;

    let output = detector.detect(&DynamicImage::ImageRgb8(img))?;

    assert_eq!(output.detections.len(), 1, "{:?}", output.detections);
    let detection = output.detections[0];
    assert_eq!(detection.source, DetectionSource::Mass);
    assert!(
        detection.bbox.iou(&expected) >= 0.7,
        "IoU too low: {:?} vs {:?}",
        detection.bbox,
        expected
    );

    Ok(())
}

#[test]
fn test_high_slab_is_ignored() -> anyhow::Result<()> {
    // Same slab, but starting in the top fifth of the frame
    let mut img = uniform_image(400, 300, BACKGROUND);
    fill_rect(&mut img, 80, 20, 320, 100, SURFACE);
    let detector = WorkbenchDetector::new(DetectorConfig::mass_only())?;

    let output = detector.detect(&DynamicImage::ImageRgb8(img))?;
    assert!(output.detections.is_empty(), "{:?}", output.detections);

    Ok(())
}

#[test]
fn test_slab_annotation_uses_mass_color() -> anyhow::Result<()> {
    let (img, _) = slab_image();
    let config = DetectorConfig::mass_only();
    let mass_color = config.annotation.mass_box_color;
    let detector = WorkbenchDetector::new(config)?;

    let output = detector.detect(&DynamicImage::ImageRgb8(img))?;
    let bbox = output.detections[0].bbox;

    assert_eq!(output.annotated.get_pixel(bbox.x, bbox.y).0, mass_color);

    Ok(())
}

#[test]
fn test_bench_found_by_line_path() -> anyhow::Result<()> {
    let img = bench_image();
    let detector = WorkbenchDetector::new(DetectorConfig::lines_only())?;

    let output = detector.detect(&DynamicImage::ImageRgb8(img))?;

    let bench = output
        .detections
        .iter()
        .find(|d| d.source == DetectionSource::Line)
        .ok_or_else(|| anyhow::anyhow!("No line detection in {:?}", output.detections))?;

    // Box spans the top and reaches down the legs
    assert!(bench.bbox.width >= 200, "{:?}", bench.bbox);
    assert!(bench.bbox.height >= 80, "{:?}", bench.bbox);
    assert!(bench.bbox.y <= 140, "{:?}", bench.bbox);

    Ok(())
}

#[test]
fn test_detections_stay_inside_image() -> anyhow::Result<()> {
    let detector = WorkbenchDetector::default();
    let (slab, _) = slab_image();

    for img in [bench_image(), slab] {
        let (width, height) = img.dimensions();
        let output = detector.detect(&DynamicImage::ImageRgb8(img))?;
        assert!(!output.detections.is_empty());
        for detection in &output.detections {
            assert!(
                within_bounds(&detection.bbox, width, height),
                "{:?} outside {}x{}",
                detection.bbox,
                width,
                height
            );
        }
    }

    Ok(())
}

#[test]
fn test_no_redundant_boxes_survive() -> anyhow::Result<()> {
    let detector = WorkbenchDetector::default();
    let output = detector.detect(&DynamicImage::ImageRgb8(bench_image()))?;
    let max_overlap = detector.config().max_overlap;

    for (i, later) in output.detections.iter().enumerate() {
        for earlier in &output.detections[..i] {
            assert!(
                later.bbox.covered_fraction(&earlier.bbox) <= max_overlap,
                "{:?} is mostly inside {:?}",
                later,
                earlier
            );
        }
    }

    Ok(())
}

#[test]
fn test_debug_output_written_per_step() -> anyhow::Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let debug_dir = temp_dir.path().join("debug");
    let detector = WorkbenchDetector::default().with_debug(debug_dir.clone());

    let (img, _) = slab_image();
    detector.detect(&DynamicImage::ImageRgb8(img))?;

    assert!(debug_dir.join("00_input/01.png").exists());
    assert!(debug_dir.join("01_grayscale_conversion/01.png").exists());

    let step_count = detector.build_pipeline().step_names().len();
    let written = std::fs::read_dir(&debug_dir)?.count();
    assert_eq!(written, step_count + 1, "One directory per step plus the input");

    Ok(())
}

#[test]
fn test_debug_dir_must_be_empty() -> anyhow::Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    std::fs::write(temp_dir.path().join("leftover.txt"), "old run")?;
    let detector = WorkbenchDetector::default().with_debug(temp_dir.path().to_path_buf());

    let result = detector.detect(&DynamicImage::ImageRgb8(uniform_image(32, 32, 0)));
    assert!(result.is_err(), "Should refuse a non-empty debug directory");

    Ok(())
}

#[test]
fn test_pipeline_steps_follow_config() -> anyhow::Result<()> {
    let full = WorkbenchDetector::default().build_pipeline();
    assert_eq!(
        full.step_names(),
        vec![
            "Grayscale Conversion",
            "Contrast Enhancement",
            "Edge Detection",
            "Line Segments",
            "Leg Matching",
            "Surface Mass",
            "Annotate",
        ]
    );

    let mass = WorkbenchDetector::new(DetectorConfig::mass_only())?.build_pipeline();
    assert!(!mass.step_names().contains(&"Leg Matching"));
    assert!(mass.step_names().contains(&"Surface Mass"));

    Ok(())
}

#[test]
fn test_config_loads_partial_json() -> anyhow::Result<()> {
    let temp_dir = tempfile::TempDir::new()?;
    let path = temp_dir.path().join("detector.json");
    std::fs::write(
        &path,
        r#"{ "max_overlap": 0.5, "lines": { "enabled": false }, "edges": { "low_threshold": 30.0 } }"#,
    )?;

    let config = DetectorConfig::from_json_file(&path)?;
    let defaults = DetectorConfig::default();

    assert_eq!(config.max_overlap, 0.5);
    assert!(!config.lines.enabled);
    assert_eq!(config.lines.vote_threshold, defaults.lines.vote_threshold);
    assert_eq!(config.edges.low_threshold, 30.0);
    assert_eq!(config.edges.high_threshold, defaults.edges.high_threshold);
    assert_eq!(config.mass, defaults.mass);

    Ok(())
}

#[test]
fn test_config_rejects_invalid_values() -> anyhow::Result<()> {
    let mut config = DetectorConfig::default();
    config.max_overlap = 1.5;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutOfRange { field: "max_overlap", .. })
    ));
    assert!(WorkbenchDetector::new(config).is_err());

    let mut config = DetectorConfig::default();
    config.edges.low_threshold = 200.0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EdgeThresholds { .. })
    ));

    let mut config = DetectorConfig::default();
    config.contrast.tiles_x = 0;
    assert_eq!(config.validate(), Err(ConfigError::EmptyTileGrid(0, 8)));

    Ok(())
}

#[test]
fn test_detection_serializes_with_short_keys() -> anyhow::Result<()> {
    let detection = Detection::new(BoundingBox::new(1, 2, 3, 4), DetectionSource::Line);
    let json = serde_json::to_value(detection)?;

    assert_eq!(
        json,
        serde_json::json!({ "x": 1, "y": 2, "w": 3, "h": 4, "type": "Workstation (AI Line)" })
    );

    Ok(())
}
