use std::sync::Arc;

use image::RgbImage;

use crate::gui::state::{Mode, ShapeChoice};
use crate::simulator::ItemKind;

#[derive(Debug, Clone)]
pub enum Message {
    OpenPhoto,
    PhotoLoaded(Result<Arc<RgbImage>, String>),
    PhotoPickCancelled,
    ModeSelected(Mode),

    // Overlay placement
    KindSelected(ItemKind),
    ShapeSelected(ShapeChoice),
    ColorChanged(String),
    OpacityChanged(f32),
    XChanged(u32),
    YChanged(u32),
    WidthChanged(u32),
    HeightChanged(u32),
    RadiusChanged(u32),
    AddItem,
    RemoveItem(usize),
    ClearItems,

    // Cut and move
    SourceXChanged(u32),
    SourceYChanged(u32),
    SourceWidthChanged(u32),
    SourceHeightChanged(u32),
    DestXChanged(u32),
    DestYChanged(u32),
    ToggleHideOriginal,

    Export,
    Exported(Result<Option<String>, String>),
}
