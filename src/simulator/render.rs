use std::sync::OnceLock;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use tracing::warn;

use crate::simulator::item::{Shape, SimulationItem};

const LABEL_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");
const LABEL_SCALE: f32 = 18.0;
const LABEL_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
/// Gap between a label's baseline and the top of its item.
const LABEL_GAP: i32 = 10;

fn label_font() -> Option<&'static FontArc> {
    static FONT: OnceLock<Option<FontArc>> = OnceLock::new();
    FONT.get_or_init(|| match FontArc::try_from_slice(LABEL_FONT) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!("Label font unavailable, items are drawn without labels: {}", e);
            None
        }
    })
    .as_ref()
}

/// Composite `items` over `base`.
///
/// All items are painted, in order, onto one overlay copy of the base, and
/// that overlay is then blended against the base once with `opacity`.
/// Overlapping items therefore never stack their transparency. Labels are
/// part of the overlay and fade with it.
pub fn render(base: &RgbImage, items: &[SimulationItem], opacity: f32) -> RgbImage {
    let mut overlay = base.clone();
    for item in items {
        draw_item(&mut overlay, item);
    }
    blend(&overlay, base, opacity)
}

/// Paint one item fully opaque, with its kind written in white just above
/// its top-left corner.
pub fn draw_item(canvas: &mut RgbImage, item: &SimulationItem) {
    let color: Rgb<u8> = item.color.into();
    let (x, y) = (item.x as i32, item.y as i32);
    let anchor = match item.shape {
        Shape::Rectangle { width, height } => {
            if width == 0 || height == 0 {
                return;
            }
            draw_filled_rect_mut(canvas, Rect::at(x, y).of_size(width, height), color);
            (x, y)
        }
        Shape::Circle { radius } => {
            let r = radius as i32;
            draw_filled_circle_mut(canvas, (x, y), r, color);
            (x - r, y - r)
        }
    };
    draw_label(canvas, item.kind.label(), anchor);
}

fn draw_label(canvas: &mut RgbImage, label: &str, (x, y): (i32, i32)) {
    let Some(font) = label_font() else {
        return;
    };
    let scale = PxScale::from(LABEL_SCALE);
    // Glyphs are laid out from the ascent line down
    let ascent = font.as_scaled(scale).ascent();
    let top = ((y - LABEL_GAP) as f32 - ascent).round() as i32;
    draw_text_mut(canvas, LABEL_COLOR, x, top, scale, font, label);
}

/// `top * alpha + bottom * (1 - alpha)`, rounded per channel.
///
/// Both images must have the same dimensions.
pub fn blend(top: &RgbImage, bottom: &RgbImage, alpha: f32) -> RgbImage {
    let alpha = alpha.clamp(0.0, 1.0);
    let mut out = bottom.clone();
    for (dst, src) in out.pixels_mut().zip(top.pixels()) {
        for c in 0..3 {
            let value = src[c] as f32 * alpha + dst[c] as f32 * (1.0 - alpha);
            dst[c] = value.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}
