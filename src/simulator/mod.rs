//! Layout simulator: place furniture over a photo, or move part of it.

pub mod item;
pub mod session;
pub mod render;
pub mod cut_move;
pub mod export;

pub use cut_move::{CutMove, Region};
pub use export::{export_png, save_png, DEFAULT_EXPORT_NAME};
pub use item::{ItemKind, Shape, SimulationItem};
pub use render::render;
pub use session::Session;

use image::RgbImage;

/// Render the current session over `base`.
pub fn render_session(base: &RgbImage, session: &Session) -> RgbImage {
    render(base, session.items(), session.opacity())
}
