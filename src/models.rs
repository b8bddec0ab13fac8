use serde::{Deserialize, Serialize};

/// Axis-aligned box in image pixel coordinates.
///
/// Serialized with the short `w`/`h` keys used by the `/process` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    #[serde(rename = "w")]
    pub width: u32,
    #[serde(rename = "h")]
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Area shared with `other`, zero when the boxes only touch.
    pub fn intersection_area(&self, other: &BoundingBox) -> u64 {
        let ix = self.x.max(other.x);
        let iy = self.y.max(other.y);
        let ir = self.right().min(other.right());
        let ib = self.bottom().min(other.bottom());
        if ir <= ix || ib <= iy {
            return 0;
        }
        (ir - ix) as u64 * (ib - iy) as u64
    }

    /// Fraction of this box covered by `other`.
    pub fn covered_fraction(&self, other: &BoundingBox) -> f32 {
        let area = self.area();
        if area == 0 {
            return 0.0;
        }
        self.intersection_area(other) as f32 / area as f32
    }

    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let inter = self.intersection_area(other);
        let union = self.area() + other.area() - inter;
        if union == 0 {
            return 0.0;
        }
        inter as f32 / union as f32
    }

    /// Shrink the box so it lies inside a `width` x `height` image.
    pub fn clamped(&self, width: u32, height: u32) -> BoundingBox {
        let x = self.x.min(width);
        let y = self.y.min(height);
        BoundingBox {
            x,
            y,
            width: self.right().min(width) - x,
            height: self.bottom().min(height) - y,
        }
    }
}

/// Which branch of the heuristic proposed a detection.
///
/// The serialized names are the labels clients of `/process` already expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetectionSource {
    #[serde(rename = "Workstation (AI Line)")]
    Line,
    #[serde(rename = "Surface (AI Mass)")]
    Mass,
}

impl DetectionSource {
    pub fn label(&self) -> &'static str {
        match self {
            DetectionSource::Line => "Workstation (AI Line)",
            DetectionSource::Mass => "Surface (AI Mass)",
        }
    }
}

impl std::fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A hypothesized workbench or work surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(flatten)]
    pub bbox: BoundingBox,
    #[serde(rename = "type")]
    pub source: DetectionSource,
}

impl Detection {
    pub fn new(bbox: BoundingBox, source: DetectionSource) -> Self {
        Self { bbox, source }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Straight segment extracted from an edge map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl LineSegment {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn dx(&self) -> i32 {
        (self.x2 - self.x1).abs()
    }

    pub fn dy(&self) -> i32 {
        (self.y2 - self.y1).abs()
    }

    pub fn length(&self) -> f32 {
        ((self.dx() * self.dx() + self.dy() * self.dy()) as f32).sqrt()
    }

    /// Horizontal when `dx > dy * horizontal_ratio`, vertical when
    /// `dy > dx * vertical_ratio`, otherwise `None`.
    pub fn orientation(&self, horizontal_ratio: f32, vertical_ratio: f32) -> Option<Orientation> {
        let dx = self.dx() as f32;
        let dy = self.dy() as f32;
        if dx > dy * horizontal_ratio {
            Some(Orientation::Horizontal)
        } else if dy > dx * vertical_ratio {
            Some(Orientation::Vertical)
        } else {
            None
        }
    }

    /// x range, left to right.
    pub fn x_span(&self) -> (i32, i32) {
        (self.x1.min(self.x2), self.x1.max(self.x2))
    }

    /// y range, top to bottom.
    pub fn y_span(&self) -> (i32, i32) {
        (self.y1.min(self.y2), self.y1.max(self.y2))
    }
}

/// External contour of a binary blob.
#[derive(Debug, Clone)]
pub struct Contour {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    /// Polygon area enclosed by the contour, holes included.
    pub area: f64,
}

impl Contour {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.min_x, self.min_y, self.width(), self.height())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex_string(value: &str) -> anyhow::Result<Self> {
        let hex = value.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            anyhow::bail!("Expected a color like #RRGGBB, got {:?}", value);
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        Ok(Color {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    pub fn to_hex_string(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<Color> for image::Rgb<u8> {
    fn from(color: Color) -> Self {
        image::Rgb([color.r, color.g, color.b])
    }
}
