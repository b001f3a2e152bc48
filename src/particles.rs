//! Decorative particle field.
//!
//! A fixed number of particles with random size / position / timing. The field
//! is discarded and regenerated wholesale when the viewport width drifts more
//! than the threshold from the width it was last built for.

use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpec {
    /// px, square.
    pub size: f64,
    /// % of container.
    pub left: f64,
    pub top: f64,
    /// seconds
    pub duration: f64,
    pub delay: f64,
}

impl ParticleSpec {
    /// Map five unit samples in `[0, 1)` onto the particle ranges.
    pub fn from_unit(samples: [f64; 5]) -> Self {
        let [s, x, y, d, w] = samples;
        Self {
            size: s * 4.0 + 2.0,
            left: x * 100.0,
            top: y * 100.0,
            duration: d * 4.0 + 4.0,
            delay: w * 2.0,
        }
    }

    /// Inline style for the particle node.
    pub fn css_text(&self) -> String {
        format!(
            "width: {size}px; height: {size}px; left: {left}%; top: {top}%; \
             animation-duration: {dur}s; animation-delay: {delay}s;",
            size = self.size,
            left = self.left,
            top = self.top,
            dur = self.duration,
            delay = self.delay,
        )
    }
}

pub trait ParticleLayer {
    fn clear(&mut self);
    fn spawn(&mut self, spec: &ParticleSpec);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParticleField {
    count: usize,
    threshold: f64,
    built_for_width: f64,
}

impl ParticleField {
    pub fn new(count: usize, threshold: f64, width: f64) -> Self {
        Self {
            count,
            threshold,
            built_for_width: width,
        }
    }

    pub fn built_for_width(&self) -> f64 {
        self.built_for_width
    }

    pub fn populate(&self, layer: &mut impl ParticleLayer, rng: &mut impl FnMut() -> f64) {
        for _ in 0..self.count {
            let spec = ParticleSpec::from_unit([rng(), rng(), rng(), rng(), rng()]);
            layer.spawn(&spec);
        }
    }

    /// Returns `true` when the field was regenerated.
    pub fn resized(
        &mut self,
        width: f64,
        layer: &mut impl ParticleLayer,
        rng: &mut impl FnMut() -> f64,
    ) -> bool {
        if (width - self.built_for_width).abs() <= self.threshold {
            return false;
        }
        debug!(
            "event=particles_rebuild module=particles status=start from={} to={}",
            self.built_for_width, width
        );
        layer.clear();
        self.populate(layer, rng);
        self.built_for_width = width;
        true
    }
}

/// Uniform sample in `[0, 1)` from the platform entropy source.
pub fn unit_random() -> f64 {
    let mut buf = [0u8; 8];
    if let Err(err) = getrandom::getrandom(&mut buf) {
        warn!("event=rng module=particles status=error error={err}");
        return 0.5;
    }
    // Top 53 bits fill an f64 mantissa exactly.
    (u64::from_le_bytes(buf) >> 11) as f64 / (1u64 << 53) as f64
}
