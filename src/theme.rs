//! Light / dark theme switching.
//!
//! The chosen theme lives only in this process; nothing is written to storage,
//! so a reload falls back to the system color-scheme preference.

use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Value of the root element's `data-theme` attribute.
    pub fn as_attr(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_attr())
    }
}

pub trait ThemeSurface {
    /// Parsed `data-theme`, `None` when absent or unrecognised.
    fn applied(&self) -> Option<Theme>;
    fn apply(&mut self, theme: Theme);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeState {
    preference: Option<Theme>,
}

impl ThemeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preference(&self) -> Option<Theme> {
        self.preference
    }

    /// Initial theme: remembered preference, else the system's light
    /// preference, else dark.
    pub fn setup(&self, surface: &mut impl ThemeSurface, system_prefers_light: bool) -> Theme {
        let theme = match self.preference {
            Some(t) => t,
            None if system_prefers_light => Theme::Light,
            None => Theme::Dark,
        };
        surface.apply(theme);
        theme
    }

    /// Flips the applied theme; an unset / unknown attribute counts as dark.
    pub fn toggle(&mut self, surface: &mut impl ThemeSurface) -> Theme {
        let next = surface.applied().unwrap_or(Theme::Dark).toggled();
        surface.apply(next);
        self.preference = Some(next);
        next
    }

    /// System `prefers-color-scheme: dark` changed. Only honoured while the
    /// page carries no theme of its own.
    pub fn system_changed(&self, surface: &mut impl ThemeSurface, prefers_dark: bool) -> bool {
        if surface.applied().is_some() {
            return false;
        }
        surface.apply(if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        });
        true
    }
}
