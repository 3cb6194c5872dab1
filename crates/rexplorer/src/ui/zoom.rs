use gpui::{Pixels, px};

pub const MIN_FONT_SIZE: f32 = 8.0;
pub const MAX_FONT_SIZE: f32 = 32.0;
const STEP: f32 = 1.0;

/// Display font size of the value panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontZoom {
    base: f32,
    size: f32,
}

impl FontZoom {
    pub fn new(base: f32) -> Self {
        let base = clamp_font_size(base);
        Self { base, size: base }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn pixels(&self) -> Pixels {
        px(self.size)
    }

    /// Returns whether the size changed.
    pub fn zoom_in(&mut self) -> bool {
        self.set(self.size + STEP)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set(self.size - STEP)
    }

    pub fn reset(&mut self) -> bool {
        self.set(self.base)
    }

    fn set(&mut self, size: f32) -> bool {
        let size = clamp_font_size(size);
        let changed = size != self.size;
        self.size = size;
        changed
    }
}

fn clamp_font_size(size: f32) -> f32 {
    if size.is_finite() {
        size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
    } else {
        MIN_FONT_SIZE
    }
}
