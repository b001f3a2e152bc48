//! Boot sequencing: body `loading` class until window load, loader overlay
//! hidden after a fixed delay.

pub trait LoadingSurface {
    fn set_body_loading(&mut self, loading: bool);
    fn hide_loading_screen(&mut self);
    /// Restore normal page scrolling (body overflow `visible`).
    fn release_scroll(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingSequence {
    delay_ms: u32,
    screen_visible: bool,
    body_loading: bool,
}

impl LoadingSequence {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            screen_visible: true,
            body_loading: false,
        }
    }

    pub fn is_screen_visible(&self) -> bool {
        self.screen_visible
    }

    pub fn is_body_loading(&self) -> bool {
        self.body_loading
    }

    /// Marks the body as loading; returns the overlay delay to schedule.
    pub fn boot(&mut self, surface: &mut impl LoadingSurface) -> u32 {
        self.body_loading = true;
        surface.set_body_loading(true);
        self.delay_ms
    }

    pub fn delay_elapsed(&mut self, surface: &mut impl LoadingSurface) {
        if !self.screen_visible {
            return;
        }
        self.screen_visible = false;
        surface.hide_loading_screen();
        surface.release_scroll();
    }

    pub fn window_loaded(&mut self, surface: &mut impl LoadingSurface) {
        if self.body_loading {
            self.body_loading = false;
            surface.set_body_loading(false);
        }
    }
}
