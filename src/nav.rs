//! Navigation: mobile menu, navbar scroll effect, scroll spy, anchor scrolling.

pub trait NavSurface {
    fn set_menu_open(&mut self, open: bool);
    /// Body overflow: hidden while the mobile menu covers the page.
    fn set_scroll_locked(&mut self, locked: bool);
    fn set_scrolled(&mut self, scrolled: bool);
    /// Marks the nav link pointing at `#section_id` active and clears the rest.
    fn mark_active(&mut self, href: &str);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavTuning {
    pub mobile_breakpoint: f64,
    pub scrolled_offset: f64,
    pub probe_offset: f64,
    pub anchor_offset: f64,
}

/// A page section as the scroll spy sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBox {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavMenu {
    tuning: NavTuning,
    open: bool,
    scrolled: bool,
}

impl NavMenu {
    pub fn new(tuning: NavTuning) -> Self {
        Self {
            tuning,
            open: false,
            scrolled: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self, surface: &mut impl NavSurface) -> bool {
        self.open = !self.open;
        surface.set_menu_open(self.open);
        surface.set_scroll_locked(self.open);
        self.open
    }

    /// Closes the menu if open. Returns whether anything changed.
    pub fn close(&mut self, surface: &mut impl NavSurface) -> bool {
        if !self.open {
            return false;
        }
        self.toggle(surface);
        true
    }

    /// A document click; `inside_navbar` is whether the target sits in the navbar.
    pub fn clicked(&mut self, inside_navbar: bool, surface: &mut impl NavSurface) -> bool {
        if inside_navbar {
            return false;
        }
        self.close(surface)
    }

    /// Growing past the mobile breakpoint closes the menu.
    pub fn viewport_resized(&mut self, width: f64, surface: &mut impl NavSurface) -> bool {
        if width > self.tuning.mobile_breakpoint {
            return self.close(surface);
        }
        false
    }

    /// Scroll position for an anchor target so it clears the fixed navbar.
    pub fn anchor_scroll_top(&self, target_offset_top: f64) -> f64 {
        target_offset_top - self.tuning.anchor_offset
    }

    /// Anchor link followed: closes the menu and highlights the link.
    pub fn anchor_followed(&mut self, href: &str, surface: &mut impl NavSurface) {
        self.close(surface);
        surface.mark_active(href);
    }

    /// Throttled scroll handler body: navbar shadow + scroll spy.
    pub fn scrolled_to(
        &mut self,
        scroll_y: f64,
        sections: &[SectionBox],
        surface: &mut impl NavSurface,
    ) {
        let scrolled = scroll_y > self.tuning.scrolled_offset;
        if scrolled != self.scrolled {
            self.scrolled = scrolled;
            surface.set_scrolled(scrolled);
        }
        if let Some(id) = active_section(sections, scroll_y + self.tuning.probe_offset) {
            surface.mark_active(&format!("#{id}"));
        }
    }
}

/// Last section whose `[top, top + height)` span contains `probe`.
pub fn active_section(sections: &[SectionBox], probe: f64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|s| probe >= s.top && probe < s.top + s.height)
        .map(|s| s.id.as_str())
}

/// Debounce-by-flag: at most one pending callback per window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollThrottle {
    pending: bool,
}

impl ScrollThrottle {
    /// Returns `true` when the caller should arm the timer.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Timer fired; the next scroll may arm it again.
    pub fn fired(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Bar {
        open: bool,
        locked: bool,
        scrolled_changes: Vec<bool>,
        active: Vec<String>,
    }

    impl NavSurface for Bar {
        fn set_menu_open(&mut self, open: bool) {
            self.open = open;
        }
        fn set_scroll_locked(&mut self, locked: bool) {
            self.locked = locked;
        }
        fn set_scrolled(&mut self, scrolled: bool) {
            self.scrolled_changes.push(scrolled);
        }
        fn mark_active(&mut self, href: &str) {
            self.active.push(href.to_string());
        }
    }

    fn menu() -> NavMenu {
        NavMenu::new(NavTuning {
            mobile_breakpoint: 768.0,
            scrolled_offset: 100.0,
            probe_offset: 150.0,
            anchor_offset: 70.0,
        })
    }

    fn sections() -> Vec<SectionBox> {
        vec![
            SectionBox {
                id: "home".into(),
                top: 0.0,
                height: 800.0,
            },
            SectionBox {
                id: "about".into(),
                top: 800.0,
                height: 600.0,
            },
            SectionBox {
                id: "skills".into(),
                top: 1400.0,
                height: 700.0,
            },
        ]
    }

    #[test]
    fn toggle_locks_body_scroll_while_open() {
        let mut nav = menu();
        let mut bar = Bar::default();
        assert!(nav.toggle(&mut bar));
        assert!(bar.open && bar.locked);
        assert!(!nav.toggle(&mut bar));
        assert!(!bar.open && !bar.locked);
    }

    #[test]
    fn outside_click_closes_only_open_menu() {
        let mut nav = menu();
        let mut bar = Bar::default();
        assert!(!nav.clicked(false, &mut bar));
        nav.toggle(&mut bar);
        assert!(!nav.clicked(true, &mut bar));
        assert!(nav.is_open());
        assert!(nav.clicked(false, &mut bar));
        assert!(!nav.is_open() && !bar.locked);
    }

    #[test]
    fn resize_past_breakpoint_closes_menu() {
        let mut nav = menu();
        let mut bar = Bar::default();
        nav.toggle(&mut bar);
        assert!(!nav.viewport_resized(600.0, &mut bar));
        assert!(nav.viewport_resized(1024.0, &mut bar));
        assert!(!nav.is_open());
    }

    #[test]
    fn anchor_offsets_for_fixed_navbar_and_marks_link() {
        let mut nav = menu();
        let mut bar = Bar::default();
        nav.toggle(&mut bar);
        assert_eq!(nav.anchor_scroll_top(800.0), 730.0);
        nav.anchor_followed("#about", &mut bar);
        assert!(!nav.is_open());
        assert_eq!(bar.active, vec!["#about"]);
    }

    #[test]
    fn scroll_spy_tracks_section_under_probe() {
        let mut nav = menu();
        let mut bar = Bar::default();
        nav.scrolled_to(0.0, &sections(), &mut bar);
        nav.scrolled_to(700.0, &sections(), &mut bar);
        nav.scrolled_to(1300.0, &sections(), &mut bar);
        assert_eq!(bar.active, vec!["#home", "#about", "#skills"]);
        assert_eq!(bar.scrolled_changes, vec![true]);
        nav.scrolled_to(50.0, &sections(), &mut bar);
        assert_eq!(bar.scrolled_changes, vec![true, false]);
    }

    #[test]
    fn probe_past_last_section_marks_nothing() {
        assert_eq!(active_section(&sections(), 5000.0), None);
        assert_eq!(active_section(&sections(), 1400.0), Some("skills"));
    }

    #[test]
    fn throttle_arms_once_per_window() {
        let mut t = ScrollThrottle::default();
        assert!(t.request());
        assert!(!t.request());
        assert!(!t.request());
        t.fired();
        assert!(!t.is_pending());
        assert!(t.request());
    }
}
