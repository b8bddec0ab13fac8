#![allow(dead_code)]

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use toolshed::BoundingBox;

/// Dark background used by the synthetic shed photos.
pub const BACKGROUND: u8 = 30;
/// Brightness of the synthetic furniture.
pub const SURFACE: u8 = 220;

/// A featureless image: no edges, no contours worth reporting.
pub fn uniform_image(width: u32, height: u32, value: u8) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([value, value, value]))
}

/// Paint `[x0, x1) x [y0, y1)` with `value`.
pub fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, value: u8) {
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, Rgb([value, value, value]));
        }
    }
}

/// 400x300 photo with one bright wide slab low in the frame.
pub fn slab_image() -> (RgbImage, BoundingBox) {
    let mut img = uniform_image(400, 300, BACKGROUND);
    fill_rect(&mut img, 80, 150, 320, 230, SURFACE);
    (img, BoundingBox::new(80, 150, 240, 80))
}

/// 400x300 photo of a bench: a top bar on two thick legs.
pub fn bench_image() -> RgbImage {
    let mut img = uniform_image(400, 300, BACKGROUND);
    // Top
    fill_rect(&mut img, 60, 120, 340, 136, SURFACE);
    // Legs
    fill_rect(&mut img, 80, 136, 96, 260, SURFACE);
    fill_rect(&mut img, 304, 136, 320, 260, SURFACE);
    img
}

/// Binary edge map with one horizontal line of the given length.
pub fn horizontal_edge_map(width: u32, height: u32, y: u32, x0: u32, x1: u32) -> GrayImage {
    let mut edges = GrayImage::new(width, height);
    for x in x0..x1 {
        edges.put_pixel(x, y, Luma([255]));
    }
    edges
}

/// Alternating 8x8 squares, so any blur visibly changes it.
pub fn checkerboard(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            Rgb([240, 240, 240])
        } else {
            Rgb([10, 10, 10])
        }
    })
}

/// Every pixel distinct enough to catch off-by-one copies.
pub fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x * 7 + y * 13) % 256) as u8])
    })
}

/// Encode as `data:image/png;base64,...`.
pub fn png_data_url(img: &RgbImage) -> String {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img.clone())
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("Failed to encode test PNG");
    format!("data:image/png;base64,{}", STANDARD.encode(buffer.into_inner()))
}

/// Decode the payload of any `data:` URL.
pub fn decode_data_url(data_url: &str) -> DynamicImage {
    let (_, payload) = data_url.split_once(',').expect("Missing data URL header");
    let bytes = STANDARD.decode(payload).expect("Invalid base64 payload");
    image::load_from_memory(&bytes).expect("Invalid image payload")
}

pub fn within_bounds(bbox: &BoundingBox, width: u32, height: u32) -> bool {
    bbox.x + bbox.width <= width && bbox.y + bbox.height <= height
}
