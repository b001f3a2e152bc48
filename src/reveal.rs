//! Scroll-triggered reveal rules.
//!
//! Two observers share the same options. The section observer adds
//! [`VISIBLE_CLASS`] on every intersection and kicks off the skill bars /
//! counters when their section enters; the card observer runs a one-shot
//! keyframe animation and stops watching the card afterwards.

use crate::config::FxConfig;

pub const SECTION_SELECTOR: &str = "section";
pub const ITEM_SELECTOR: &str = ".skill-item, .creative-skill, .project-card";
pub const CARD_SELECTOR: &str = ".about-card, .skills-category, .project-card, .contact-card";

pub const FADE_IN_CLASS: &str = "fade-in";
pub const VISIBLE_CLASS: &str = "visible";

pub const CARD_ANIMATION: &str = "fadeInUp 0.8s ease-out forwards";
pub const CARD_HIDDEN_OPACITY: &str = "0";
pub const CARD_HIDDEN_TRANSFORM: &str = "translateY(30px)";

#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: String,
}

impl ObserverOptions {
    pub fn from_config(cfg: &FxConfig) -> Self {
        Self {
            threshold: cfg.reveal_threshold,
            root_margin: cfg.reveal_root_margin.clone(),
        }
    }
}

/// Extra work triggered when a revealed element is a known section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    SkillBars,
    Counters,
}

/// What to do for one section-observer entry; `None` when not intersecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionReveal {
    pub follow_up: Option<FollowUp>,
}

pub fn section_entry(id: &str, intersecting: bool) -> Option<SectionReveal> {
    if !intersecting {
        return None;
    }
    let follow_up = match id {
        "skills" => Some(FollowUp::SkillBars),
        "about" => Some(FollowUp::Counters),
        _ => None,
    };
    Some(SectionReveal { follow_up })
}

/// Card observer: animate and unobserve on the first intersection only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Animate,
    Wait,
}

pub fn card_entry(intersecting: bool) -> CardAction {
    if intersecting {
        CardAction::Animate
    } else {
        CardAction::Wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sections_trigger_follow_ups() {
        assert_eq!(
            section_entry("skills", true),
            Some(SectionReveal {
                follow_up: Some(FollowUp::SkillBars),
            })
        );
        assert_eq!(
            section_entry("about", true),
            Some(SectionReveal {
                follow_up: Some(FollowUp::Counters),
            })
        );
        assert_eq!(section_entry("projects", true), Some(SectionReveal { follow_up: None }));
        assert_eq!(section_entry("about", false), None);
    }

    #[test]
    fn cards_wait_until_intersecting() {
        assert_eq!(card_entry(false), CardAction::Wait);
        assert_eq!(card_entry(true), CardAction::Animate);
    }

    #[test]
    fn options_come_from_config() {
        let opts = ObserverOptions::from_config(&FxConfig::default());
        assert_eq!(opts.threshold, 0.1);
        assert_eq!(opts.root_margin, "0px 0px -50px 0px");
    }
}
