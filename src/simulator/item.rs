use crate::models::Color;

/// Furniture a user can drop into the photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Shelf,
    ToolRack,
    Workbench,
    StorageBin,
    WallHook,
    Cabinet,
    TrashCan,
    DrillStation,
}

impl ItemKind {
    pub const ALL: [ItemKind; 8] = [
        ItemKind::Shelf,
        ItemKind::ToolRack,
        ItemKind::Workbench,
        ItemKind::StorageBin,
        ItemKind::WallHook,
        ItemKind::Cabinet,
        ItemKind::TrashCan,
        ItemKind::DrillStation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Shelf => "Shelf",
            ItemKind::ToolRack => "Tool Rack",
            ItemKind::Workbench => "Workbench",
            ItemKind::StorageBin => "Storage Bin",
            ItemKind::WallHook => "Wall Hook",
            ItemKind::Cabinet => "Cabinet",
            ItemKind::TrashCan => "Trash Can",
            ItemKind::DrillStation => "Drill Station",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Anchored at its top-left corner
    Rectangle { width: u32, height: u32 },
    /// Anchored at its center
    Circle { radius: u32 },
}

impl Shape {
    /// Bounding size as (width, height)
    pub fn size(&self) -> (u32, u32) {
        match *self {
            Shape::Rectangle { width, height } => (width, height),
            Shape::Circle { radius } => (radius * 2, radius * 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationItem {
    pub kind: ItemKind,
    pub shape: Shape,
    pub x: u32,
    pub y: u32,
    pub color: Color,
}

impl SimulationItem {
    pub fn new(kind: ItemKind, shape: Shape, x: u32, y: u32, color: Color) -> Self {
        Self { kind, shape, x, y, color }
    }

    /// Keep the item placeable on a `width` x `height` photo, mirroring the
    /// placement slider ranges: position within the image, rectangles
    /// 10..=width/2 by 10..=height/2, radius 5..=width/4.
    pub fn clamped(&self, width: u32, height: u32) -> Self {
        let shape = match self.shape {
            Shape::Rectangle { width: w, height: h } => Shape::Rectangle {
                width: w.clamp(10, (width / 2).max(10)),
                height: h.clamp(10, (height / 2).max(10)),
            },
            Shape::Circle { radius } => Shape::Circle {
                radius: radius.clamp(5, (width / 4).max(5)),
            },
        };
        Self {
            kind: self.kind,
            shape,
            x: self.x.min(width),
            y: self.y.min(height),
            color: self.color,
        }
    }
}
