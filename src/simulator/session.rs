use crate::simulator::item::SimulationItem;

/// Items placed during one simulation session, in insertion order.
#[derive(Debug, Clone)]
pub struct Session {
    items: Vec<SimulationItem>,
    /// Opacity of the whole overlay layer, 0.0..=1.0
    opacity: f32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            opacity: 0.6,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[SimulationItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, item: SimulationItem) {
        self.items.push(item);
    }

    /// Remove the item at `index`; later items move down by one.
    pub fn remove(&mut self, index: usize) -> Option<SimulationItem> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// One line per item, numbered from 1. Circles report their bounding
    /// square.
    pub fn summary(&self) -> Vec<String> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let (width, height) = item.shape.size();
                format!(
                    "{}. {} at ({}, {}) size {}x{}",
                    i + 1,
                    item.kind,
                    item.x,
                    item.y,
                    width,
                    height
                )
            })
            .collect()
    }
}
