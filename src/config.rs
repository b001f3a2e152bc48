//! Tuning constants for every effect, overridable from JS as a JSON object.
//!
//! Missing keys keep their defaults; unknown keys are rejected so a typo in the
//! host page does not silently fall back to a default.

use std::fmt::{Display, Formatter};

use serde::Deserialize;

pub const DEFAULT_PHRASES: &[&str] = &[
    "Full Stack Developer",
    "UI/UX Designer",
    "Problem Solver",
    "Tech Enthusiast",
    "Creative Thinker",
];

/// One `<link rel="preconnect">` emitted at boot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Preconnect {
    pub href: String,
    #[serde(default)]
    pub cross_origin: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FxConfig {
    // Typewriter
    pub phrases: Vec<String>,
    pub type_delay_ms: u32,
    pub delete_delay_ms: u32,
    pub end_pause_ms: u32,
    pub next_phrase_pause_ms: u32,
    // Loader
    pub loading_delay_ms: u32,
    // Counters / skill bars
    pub counter_steps: u32,
    pub skill_bar_delay_ms: u32,
    // Cursor
    pub cursor_smoothing: f64,
    pub cursor_min_width: f64,
    // Navigation
    pub mobile_breakpoint: f64,
    pub navbar_scrolled_offset: f64,
    pub section_probe_offset: f64,
    pub nav_scroll_offset: f64,
    pub scroll_throttle_ms: u32,
    // Particles
    pub particle_count: usize,
    pub particle_resize_threshold: f64,
    // Theme
    pub theme_spin_ms: u32,
    // Contact form / notifications
    pub submit_delay_ms: u32,
    pub label_blur_delay_ms: u32,
    pub notification_enter_ms: u32,
    pub notification_visible_ms: u32,
    pub notification_exit_ms: u32,
    // Reveal observers
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub preconnect_origins: Vec<Preconnect>,
    pub log_level: String,
}

impl Default for FxConfig {
    fn default() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
            type_delay_ms: 100,
            delete_delay_ms: 50,
            end_pause_ms: 2000,
            next_phrase_pause_ms: 500,
            loading_delay_ms: 2000,
            counter_steps: 100,
            skill_bar_delay_ms: 300,
            cursor_smoothing: 0.1,
            cursor_min_width: 768.0,
            mobile_breakpoint: 768.0,
            navbar_scrolled_offset: 100.0,
            section_probe_offset: 150.0,
            nav_scroll_offset: 70.0,
            scroll_throttle_ms: 16,
            particle_count: 50,
            particle_resize_threshold: 200.0,
            theme_spin_ms: 300,
            submit_delay_ms: 2000,
            label_blur_delay_ms: 100,
            notification_enter_ms: 100,
            notification_visible_ms: 3000,
            notification_exit_ms: 300,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            preconnect_origins: vec![
                Preconnect {
                    href: "https://fonts.googleapis.com".to_string(),
                    cross_origin: false,
                },
                Preconnect {
                    href: "https://fonts.gstatic.com".to_string(),
                    cross_origin: true,
                },
            ],
            log_level: "info".to_string(),
        }
    }
}

impl FxConfig {
    /// Parses a (possibly partial) JSON override and validates the result.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: FxConfig =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.phrases.is_empty() {
            return Err(ConfigError::Invalid {
                field: "phrases",
                reason: "must not be empty",
            });
        }
        if self.counter_steps == 0 {
            return Err(ConfigError::Invalid {
                field: "counter_steps",
                reason: "must be at least 1",
            });
        }
        if !(self.cursor_smoothing > 0.0 && self.cursor_smoothing <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "cursor_smoothing",
                reason: "must be in (0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(ConfigError::Invalid {
                field: "reveal_threshold",
                reason: "must be in [0, 1]",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid config json: {msg}"),
            Self::Invalid { field, reason } => write!(f, "invalid config `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}
