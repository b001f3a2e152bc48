//! One-shot animations: stat counters and skill bars.
//!
//! Both are guarded by [`Phase`]; once an animation left `Idle` a second start
//! request is a no-op, so re-triggering the reveal observer never restarts it.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Done,
}

/// Displays the counter's current integer.
pub trait NumberSlot {
    fn set_number(&mut self, value: u32);
}

/// Receives a skill bar's final fill percentage.
pub trait BarSlot {
    fn set_fill_percent(&mut self, percent: u32);
}

/// Result of a single counter frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Schedule another frame.
    Continue,
    Finished,
}

/// Interpolates 0 → `target` in `target / steps` increments, one per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    target: u32,
    increment: f64,
    current: f64,
    phase: Phase,
}

impl CounterAnimation {
    pub fn new(target: u32, steps: u32) -> Self {
        let steps = steps.max(1);
        Self {
            target,
            increment: f64::from(target) / f64::from(steps),
            current: 0.0,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    /// Moves `Idle` → `Running`. Returns `false` (and changes nothing) when the
    /// animation is already running or done.
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Running;
        true
    }

    /// Renders one frame. Outside `Running` this touches nothing.
    pub fn tick(&mut self, slot: &mut impl NumberSlot) -> Tick {
        if self.phase != Phase::Running {
            return Tick::Finished;
        }
        let target = f64::from(self.target);
        if self.current < target {
            self.current += self.increment;
            // Overshoot on the last step is clamped; the following frame snaps.
            slot.set_number(self.current.ceil().min(target) as u32);
            Tick::Continue
        } else {
            slot.set_number(self.target);
            self.phase = Phase::Done;
            Tick::Finished
        }
    }
}

/// Fills a skill bar to `level` percent once, after a fixed delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillBar {
    level: u32,
    phase: Phase,
}

impl SkillBar {
    pub fn new(level: u32) -> Self {
        Self {
            level: level.min(100),
            phase: Phase::Idle,
        }
    }

    /// A bar whose width is already set on the page starts out `Done`.
    pub fn already_filled(level: u32) -> Self {
        Self {
            level: level.min(100),
            phase: Phase::Done,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `true` when the caller should schedule [`SkillBar::fill`].
    pub fn schedule(&mut self) -> bool {
        if self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Running;
        true
    }

    pub fn fill(&mut self, slot: &mut impl BarSlot) {
        if self.phase == Phase::Running {
            slot.set_fill_percent(self.level);
            self.phase = Phase::Done;
        }
    }
}

/// Leading integer of a `data-target` / `data-skill` attribute, read like
/// `parseInt`: `"50+"` is 50 and `"12px"` is 12. Negative or digit-free values
/// give `None`.
pub fn parse_target(raw: &str) -> Option<u32> {
    let rest = raw.trim_start();
    let rest = rest.strip_prefix('+').unwrap_or(rest);
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}
