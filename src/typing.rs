//! Typewriter effect: type a phrase out, pause, delete it, move to the next one.
//!
//! The machine is advanced one step per timer callback; each step renders a
//! prefix of the active phrase and returns how long to wait before the next.

use crate::config::FxConfig;

/// Receives the rendered prefix.
pub trait TextSlot {
    fn set_text(&mut self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingSpeeds {
    pub type_ms: u32,
    pub delete_ms: u32,
    pub end_pause_ms: u32,
    pub next_phrase_pause_ms: u32,
}

impl TypingSpeeds {
    pub fn from_config(cfg: &FxConfig) -> Self {
        Self {
            type_ms: cfg.type_delay_ms,
            delete_ms: cfg.delete_delay_ms,
            end_pause_ms: cfg.end_pause_ms,
            next_phrase_pause_ms: cfg.next_phrase_pause_ms,
        }
    }
}

impl Default for TypingSpeeds {
    fn default() -> Self {
        Self::from_config(&FxConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    speeds: TypingSpeeds,
    text_index: usize,
    // Counted in chars, not bytes.
    char_index: usize,
    deleting: bool,
}

impl Typewriter {
    /// Returns `None` for an empty phrase list.
    pub fn new(phrases: Vec<String>, speeds: TypingSpeeds) -> Option<Self> {
        if phrases.is_empty() {
            return None;
        }
        Some(Self {
            phrases,
            speeds,
            text_index: 0,
            char_index: 0,
            deleting: false,
        })
    }

    pub fn text_index(&self) -> usize {
        self.text_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn current_phrase(&self) -> &str {
        &self.phrases[self.text_index]
    }

    /// Renders the next frame into `slot` and returns the delay (ms) until the
    /// following call.
    pub fn advance(&mut self, slot: &mut impl TextSlot) -> u32 {
        let len = self.current_phrase().chars().count();

        if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
        } else {
            self.char_index = (self.char_index + 1).min(len);
        }
        slot.set_text(prefix(self.current_phrase(), self.char_index));

        let mut delay = if self.deleting {
            self.speeds.delete_ms
        } else {
            self.speeds.type_ms
        };
        if !self.deleting && self.char_index == len {
            delay = self.speeds.end_pause_ms;
            self.deleting = true;
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.text_index = (self.text_index + 1) % self.phrases.len();
            delay = self.speeds.next_phrase_pause_ms;
        }
        delay
    }
}

/// First `chars` characters of `s`.
fn prefix(s: &str, chars: usize) -> &str {
    match s.char_indices().nth(chars) {
        Some((byte, _)) => &s[..byte],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl TextSlot for Recorder {
        fn set_text(&mut self, text: &str) {
            self.0.push(text.to_string());
        }
    }

    fn writer(phrases: &[&str]) -> Typewriter {
        Typewriter::new(phrases.iter().map(|p| p.to_string()).collect(), TypingSpeeds::default())
            .unwrap()
    }

    #[test]
    fn types_pauses_then_deletes() {
        let mut tw = writer(&["abc", "xy"]);
        let mut rec = Recorder::default();
        let delays: Vec<u32> = (0..7).map(|_| tw.advance(&mut rec)).collect();
        assert_eq!(rec.0, vec!["a", "ab", "abc", "ab", "a", "", "x"]);
        assert_eq!(delays, vec![100, 100, 2000, 50, 50, 500, 100]);
        assert_eq!(tw.text_index(), 1);
    }

    #[test]
    fn char_index_stays_within_phrase_bounds() {
        let mut tw = writer(&["Rust", "", "wasm-bindgen"]);
        let mut rec = Recorder::default();
        for _ in 0..500 {
            tw.advance(&mut rec);
            let len = tw.current_phrase().chars().count();
            assert!(tw.char_index() <= len, "char_index {} > {}", tw.char_index(), len);
        }
    }

    #[test]
    fn multibyte_phrases_slice_on_char_boundaries() {
        let mut tw = writer(&["汉字"]);
        let mut rec = Recorder::default();
        tw.advance(&mut rec);
        tw.advance(&mut rec);
        assert_eq!(rec.0, vec!["汉", "汉字"]);
    }

    #[test]
    fn empty_phrase_list_is_refused() {
        assert!(Typewriter::new(Vec::new(), TypingSpeeds::default()).is_none());
    }
}
