#![forbid(unsafe_code)]

//! Local numeric controls.

use crate::format::trim_number;

/// A stepped numeric slider.
///
/// The value is stored as a step count from `min`, so it always sits on the
/// `min + k * step` grid and inside `[min, max]` without float drift.
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    min: f64,
    max: f64,
    step: f64,
    decimals: usize,
    suffix: &'static str,
    steps: u32,
    max_steps: u32,
}

impl Slider {
    /// Build a slider. `step` must be positive; `max` below `min` collapses
    /// the range to `min`.
    pub fn new(min: f64, max: f64, step: f64, value: f64) -> Self {
        let step = if step > 0.0 && step.is_finite() { step } else { 1.0 };
        let max_steps = ((max - min) / step).round().max(0.0) as u32;
        let mut slider = Self {
            min,
            max,
            step,
            decimals: decimals_of(step),
            suffix: "",
            steps: 0,
            max_steps,
        };
        slider.set(value);
        slider
    }

    /// Suffix printed after the value.
    #[must_use]
    pub fn suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }

    /// Animation speed: 0.5 to 2.0 in tenths, default `1x`.
    pub fn animation_speed() -> Self {
        Self::new(0.5, 2.0, 0.1, 1.0).suffix("x")
    }

    /// Data point count: 50 to 500 in tens, default `100 points`.
    pub fn data_points() -> Self {
        Self::new(50.0, 500.0, 10.0, 100.0).suffix(" points")
    }

    pub fn value(&self) -> f64 {
        let raw = self.min + f64::from(self.steps) * self.step;
        let scale = 10f64.powi(self.decimals as i32);
        ((raw * scale).round() / scale).min(self.max.max(self.min))
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Position within the range, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.max_steps == 0 {
            0.0
        } else {
            f64::from(self.steps) / f64::from(self.max_steps)
        }
    }

    /// Snap `value` to the nearest step, clamped to the range.
    pub fn set(&mut self, value: f64) {
        let k = if value.is_finite() {
            ((value - self.min) / self.step).round()
        } else {
            0.0
        };
        self.steps = k.clamp(0.0, f64::from(self.max_steps)) as u32;
    }

    /// One step up. Returns false at the maximum.
    pub fn increment(&mut self) -> bool {
        if self.steps < self.max_steps {
            self.steps += 1;
            true
        } else {
            false
        }
    }

    /// One step down. Returns false at the minimum.
    pub fn decrement(&mut self) -> bool {
        if self.steps > 0 {
            self.steps -= 1;
            true
        } else {
            false
        }
    }

    /// Value with trimmed decimals and the suffix: `1x`, `100 points`.
    pub fn label(&self) -> String {
        format!("{}{}", trim_number(self.value(), self.decimals), self.suffix)
    }
}

fn decimals_of(step: f64) -> usize {
    let mut decimals = 0;
    let mut scaled = step;
    while decimals < 6 && (scaled - scaled.round()).abs() > 1e-9 {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_labels() {
        let speed = Slider::animation_speed();
        assert_eq!(speed.value(), 1.0);
        assert_eq!(speed.label(), "1x");
        let points = Slider::data_points();
        assert_eq!(points.label(), "100 points");
    }

    #[test]
    fn steps_stay_on_grid() {
        let mut speed = Slider::animation_speed();
        for _ in 0..5 {
            speed.increment();
        }
        assert_eq!(speed.value(), 1.5);
        assert_eq!(speed.label(), "1.5x");
        for _ in 0..100 {
            speed.increment();
        }
        assert_eq!(speed.value(), 2.0);
        assert!(!speed.increment());
        for _ in 0..100 {
            speed.decrement();
        }
        assert_eq!(speed.value(), 0.5);
        assert!(!speed.decrement());
    }

    #[test]
    fn set_snaps_and_clamps() {
        let mut points = Slider::data_points();
        points.set(123.0);
        assert_eq!(points.value(), 120.0);
        points.set(9_999.0);
        assert_eq!(points.value(), 500.0);
        points.set(f64::NAN);
        assert_eq!(points.value(), 50.0);
        assert_eq!(points.fraction(), 0.0);
    }

    #[test]
    fn decimals_follow_step() {
        assert_eq!(decimals_of(0.1), 1);
        assert_eq!(decimals_of(10.0), 0);
        assert_eq!(decimals_of(0.25), 2);
    }
}
