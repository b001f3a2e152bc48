//! Custom cursor: a dot pinned to the pointer and an outline that eases toward it.

pub trait CursorSurface {
    fn place_dot(&mut self, x: f64, y: f64);
    fn place_outline(&mut self, x: f64, y: f64);
    fn set_hover(&mut self, hovering: bool);
}

#[derive(Debug, Clone, PartialEq)]
pub struct CursorFollower {
    smoothing: f64,
    pointer: (f64, f64),
    outline: (f64, f64),
    hovering: bool,
}

impl CursorFollower {
    pub fn new(smoothing: f64) -> Self {
        Self {
            smoothing,
            pointer: (0.0, 0.0),
            outline: (0.0, 0.0),
            hovering: false,
        }
    }

    /// Touch-sized viewports keep the native cursor.
    pub fn enabled_for_width(viewport_width: f64, min_width: f64) -> bool {
        viewport_width > min_width
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer = (x, y);
    }

    pub fn outline(&self) -> (f64, f64) {
        self.outline
    }

    /// Per display frame: the outline covers `smoothing` of the remaining
    /// distance, the dot jumps to the raw pointer.
    pub fn frame(&mut self, surface: &mut impl CursorSurface) {
        let (px, py) = self.pointer;
        self.outline.0 += (px - self.outline.0) * self.smoothing;
        self.outline.1 += (py - self.outline.1) * self.smoothing;
        surface.place_dot(px, py);
        surface.place_outline(self.outline.0, self.outline.1);
    }

    pub fn hover_changed(&mut self, hovering: bool, surface: &mut impl CursorSurface) {
        if self.hovering != hovering {
            self.hovering = hovering;
            surface.set_hover(hovering);
        }
    }
}

/// CSS `transform` for an absolute pixel position.
pub fn translate(x: f64, y: f64) -> String {
    format!("translate({x}px, {y}px)")
}
