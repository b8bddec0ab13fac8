use image::{DynamicImage, GrayImage, Luma};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::morphology::close;

/// Convert image to grayscale
pub fn to_grayscale(img: &DynamicImage) -> GrayImage {
    img.to_luma8()
}

/// Detect edges using Canny edge detector
pub fn detect_edges(img: &GrayImage, low_threshold: f32, high_threshold: f32) -> GrayImage {
    canny(img, low_threshold, high_threshold)
}

/// Global Otsu binarization; returns the binary image and the level used.
pub fn binarize_otsu(img: &GrayImage) -> (GrayImage, u8) {
    let level = otsu_level(img);
    (threshold(img, level, ThresholdType::Binary), level)
}

/// Morphological closing with a `(2 * radius + 1)` square element.
pub fn close_gaps(img: &GrayImage, radius: u8) -> GrayImage {
    if radius == 0 {
        return img.clone();
    }
    close(img, Norm::LInf, radius)
}

/// Contrast-limited adaptive histogram equalization.
///
/// The image is split into a `tiles_x` x `tiles_y` grid. When the size is not
/// a multiple of the grid, the image is extended by reflection (without
/// repeating the border pixel) so every tile covers the same area. Each tile
/// gets its own equalization table built from a histogram clipped at
/// `clip_limit * tile_area / 256`, with the clipped excess spread evenly over
/// all bins. Pixels are mapped by bilinear interpolation between the tables
/// of the four nearest tile centers, so tile seams do not show.
pub fn equalize_adaptive(img: &GrayImage, clip_limit: f32, tiles_x: u32, tiles_y: u32) -> GrayImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return img.clone();
    }

    // Never more tiles than pixels along an axis.
    let tiles_x = tiles_x.clamp(1, width);
    let tiles_y = tiles_y.clamp(1, height);
    let tile_w = width.div_ceil(tiles_x);
    let tile_h = height.div_ceil(tiles_y);

    let mut luts = vec![[0u8; 256]; (tiles_x * tiles_y) as usize];
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            luts[(ty * tiles_x + tx) as usize] =
                tile_lut(img, tx * tile_w, ty * tile_h, tile_w, tile_h, clip_limit);
        }
    }

    let lut_at = |tx: u32, ty: u32| &luts[(ty * tiles_x + tx) as usize];
    let mut output = GrayImage::new(width, height);

    for y in 0..height {
        let fy = (y as f32 + 0.5) / tile_h as f32 - 0.5;
        let ty0 = fy.floor().max(0.0) as u32;
        let ty1 = (ty0 + 1).min(tiles_y - 1);
        let wy = (fy - ty0 as f32).clamp(0.0, 1.0);
        let ty0 = ty0.min(tiles_y - 1);

        for x in 0..width {
            let fx = (x as f32 + 0.5) / tile_w as f32 - 0.5;
            let tx0 = fx.floor().max(0.0) as u32;
            let tx1 = (tx0 + 1).min(tiles_x - 1);
            let wx = (fx - tx0 as f32).clamp(0.0, 1.0);
            let tx0 = tx0.min(tiles_x - 1);

            let v = img.get_pixel(x, y)[0] as usize;
            let top = lut_at(tx0, ty0)[v] as f32 * (1.0 - wx) + lut_at(tx1, ty0)[v] as f32 * wx;
            let bottom = lut_at(tx0, ty1)[v] as f32 * (1.0 - wx) + lut_at(tx1, ty1)[v] as f32 * wx;
            let mapped = top * (1.0 - wy) + bottom * wy;

            output.put_pixel(x, y, Luma([mapped.round().clamp(0.0, 255.0) as u8]));
        }
    }

    output
}

/// Index into `0..len` of position `i` on the reflected extension
/// `... 2 1 | 0 1 2 ... len-1 | len-2 ...`.
fn reflect_101(i: u32, len: u32) -> u32 {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let i = i % period;
    if i < len { i } else { period - i }
}

/// Clipped equalization table for the `tile_w` x `tile_h` tile at `(x0, y0)`
/// of the reflect-padded image.
fn tile_lut(img: &GrayImage, x0: u32, y0: u32, tile_w: u32, tile_h: u32, clip_limit: f32) -> [u8; 256] {
    let (width, height) = img.dimensions();
    let area = tile_w as u64 * tile_h as u64;

    let mut histogram = [0u64; 256];
    for y in y0..y0 + tile_h {
        let sy = reflect_101(y, height);
        for x in x0..x0 + tile_w {
            let sx = reflect_101(x, width);
            histogram[img.get_pixel(sx, sy)[0] as usize] += 1;
        }
    }

    let clip = ((clip_limit * area as f32 / 256.0) as u64).max(1);
    let mut excess = 0u64;
    for count in histogram.iter_mut() {
        if *count > clip {
            excess += *count - clip;
            *count = clip;
        }
    }

    let batch = excess / 256;
    let residual = excess % 256;
    for count in histogram.iter_mut() {
        *count += batch;
    }
    if residual > 0 {
        let step = (256 / residual).max(1) as usize;
        for count in histogram.iter_mut().step_by(step).take(residual as usize) {
            *count += 1;
        }
    }

    let mut lut = [0u8; 256];
    let scale = 255.0 / area as f32;
    let mut cumulative = 0u64;
    for (entry, count) in lut.iter_mut().zip(histogram.iter()) {
        cumulative += count;
        *entry = (cumulative as f32 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}
