use image::{imageops, RgbImage};

/// Rectangular selection on the photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Shrink the selection to fit a `width` x `height` image.
    pub fn clamped(&self, width: u32, height: u32) -> Region {
        let x = self.x.min(width.saturating_sub(1));
        let y = self.y.min(height.saturating_sub(1));
        Region {
            x,
            y,
            width: self.width.min(width - x.min(width)),
            height: self.height.min(height - y.min(height)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Lift a region of the photo and drop it somewhere else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutMove {
    pub source: Region,
    pub dest_x: u32,
    pub dest_y: u32,
    /// Blur the vacated source area so the moved object reads as gone
    pub hide_original: bool,
    pub blur_sigma: f32,
}

impl CutMove {
    pub fn new(source: Region, dest_x: u32, dest_y: u32) -> Self {
        Self {
            source,
            dest_x,
            dest_y,
            hide_original: false,
            blur_sigma: 15.0,
        }
    }

    pub fn with_hide_original(mut self, hide: bool) -> Self {
        self.hide_original = hide;
        self
    }

    /// Produce the edited photo. The pasted pixels are an exact copy of the
    /// source region; anything falling outside the image is dropped.
    pub fn apply(&self, base: &RgbImage) -> RgbImage {
        let (width, height) = base.dimensions();
        let source = self.source.clamped(width, height);
        let mut canvas = base.clone();
        if source.is_empty() {
            return canvas;
        }

        let patch = imageops::crop_imm(base, source.x, source.y, source.width, source.height).to_image();

        if self.hide_original && self.blur_sigma > 0.0 {
            let blurred = imageops::blur(&patch, self.blur_sigma);
            imageops::replace(&mut canvas, &blurred, source.x as i64, source.y as i64);
        }

        imageops::replace(&mut canvas, &patch, self.dest_x as i64, self.dest_y as i64);
        canvas
    }
}
