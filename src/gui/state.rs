use std::sync::Arc;

use iced::widget::image::Handle;
use image::RgbImage;

use crate::models::Color;
use crate::simulator::{self, CutMove, ItemKind, Region, Session, Shape, SimulationItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Overlay,
    CutMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeChoice {
    Rectangle,
    Circle,
}

/// Values of the "add new item" controls.
#[derive(Debug, Clone)]
pub struct Placement {
    pub kind: ItemKind,
    pub shape: ShapeChoice,
    pub color_input: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub radius: u32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            kind: ItemKind::Shelf,
            shape: ShapeChoice::Rectangle,
            color_input: "#00FFAA".to_string(),
            x: 0,
            y: 0,
            width: 100,
            height: 100,
            radius: 50,
        }
    }
}

impl Placement {
    pub fn item(&self) -> Result<SimulationItem, String> {
        let color = Color::from_hex_string(&self.color_input).map_err(|e| e.to_string())?;
        let shape = match self.shape {
            ShapeChoice::Rectangle => Shape::Rectangle {
                width: self.width,
                height: self.height,
            },
            ShapeChoice::Circle => Shape::Circle {
                radius: self.radius,
            },
        };
        Ok(SimulationItem::new(self.kind, shape, self.x, self.y, color))
    }
}

/// Values of the cut-and-move controls.
#[derive(Debug, Clone)]
pub struct CutMoveControls {
    pub source: Region,
    pub dest_x: u32,
    pub dest_y: u32,
    pub hide_original: bool,
}

impl Default for CutMoveControls {
    fn default() -> Self {
        Self {
            source: Region::new(0, 0, 100, 100),
            dest_x: 0,
            dest_y: 0,
            hide_original: false,
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub photo: Option<Arc<RgbImage>>,
    pub session: Session,
    pub mode: Mode,
    pub placement: Placement,
    pub cut_move: CutMoveControls,
    pub preview: Option<Handle>,
    pub composite: Option<RgbImage>,
    pub status: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            photo: None,
            session: Session::new(),
            mode: Mode::Overlay,
            placement: Placement::default(),
            cut_move: CutMoveControls::default(),
            preview: None,
            composite: None,
            status: None,
        }
    }
}

impl AppState {
    pub fn photo_size(&self) -> (u32, u32) {
        self.photo
            .as_ref()
            .map(|p| p.dimensions())
            .unwrap_or((0, 0))
    }

    /// Start a fresh session on a newly captured photo.
    pub fn set_photo(&mut self, photo: Arc<RgbImage>) {
        let (width, height) = photo.dimensions();
        self.placement.x = width / 2;
        self.placement.y = height / 2;
        self.cut_move = CutMoveControls {
            source: Region::new(0, 0, width / 4, height / 4),
            dest_x: width / 2,
            dest_y: height / 2,
            hide_original: false,
        };
        self.session.clear();
        self.photo = Some(photo);
        self.clamp_controls();
        self.refresh();
    }

    /// Keep every slider value inside the ranges the current photo allows.
    pub fn clamp_controls(&mut self) {
        let (width, height) = self.photo_size();
        if let Ok(item) = self.placement.item() {
            let clamped = item.clamped(width, height);
            self.placement.x = clamped.x;
            self.placement.y = clamped.y;
            match clamped.shape {
                Shape::Rectangle { width, height } => {
                    self.placement.width = width;
                    self.placement.height = height;
                }
                Shape::Circle { radius } => self.placement.radius = radius,
            }
        }
        self.cut_move.source = self.cut_move.source.clamped(width, height);
        self.cut_move.dest_x = self.cut_move.dest_x.min(width);
        self.cut_move.dest_y = self.cut_move.dest_y.min(height);
    }

    pub fn cut_move_op(&self) -> CutMove {
        CutMove::new(self.cut_move.source, self.cut_move.dest_x, self.cut_move.dest_y)
            .with_hide_original(self.cut_move.hide_original)
    }

    /// Recompute the composite from the photo and the current controls.
    pub fn refresh(&mut self) {
        let Some(photo) = &self.photo else {
            self.composite = None;
            self.preview = None;
            return;
        };

        let composite = match self.mode {
            Mode::Overlay => simulator::render_session(photo, &self.session),
            Mode::CutMove => self.cut_move_op().apply(photo),
        };

        let (width, height) = composite.dimensions();
        let rgba = image::DynamicImage::ImageRgb8(composite.clone()).to_rgba8().into_raw();
        self.preview = Some(Handle::from_rgba(width, height, rgba));
        self.composite = Some(composite);
    }
}
