#![forbid(unsafe_code)]

//! Interval timers that cycle a selection through its catalog.
//!
//! Timers are driven by elapsed time reported by the caller, not by a
//! clock of their own. The dashboard forwards its frame tick as elapsed
//! time, which keeps tests deterministic: feeding `5 * interval` fires
//! exactly five times.

use std::time::Duration;

use crate::catalog::{Catalog, Record};
use crate::selection::Selector;

/// Run state of a [`RotationTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running,
    Paused,
    /// Terminal. A cancelled timer never fires again.
    Cancelled,
}

/// Accumulates elapsed time and fires once per full interval.
#[derive(Debug, Clone)]
pub struct RotationTimer {
    interval: Duration,
    elapsed: Duration,
    state: TimerState,
    fired: u64,
}

impl RotationTimer {
    /// A running timer. A zero interval is raised to one millisecond.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            elapsed: Duration::ZERO,
            state: TimerState::Running,
            fired: 0,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[inline]
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Time accumulated towards the next fire.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Total fires since creation.
    #[inline]
    pub fn fired(&self) -> u64 {
        self.fired
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.state == TimerState::Cancelled
    }

    /// Progress towards the next fire, in `[0, 1)`.
    pub fn progress(&self) -> f64 {
        self.elapsed.as_secs_f64() / self.interval.as_secs_f64()
    }

    /// Add elapsed time. Returns how many intervals completed.
    pub fn elapse(&mut self, dt: Duration) -> u32 {
        if self.state != TimerState::Running {
            return 0;
        }
        self.elapsed += dt;
        let mut fires = 0u32;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            fires = fires.saturating_add(1);
        }
        self.fired += u64::from(fires);
        fires
    }

    pub fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == TimerState::Paused {
            self.state = TimerState::Running;
        }
    }

    /// Flip between running and paused. Returns true when now running.
    pub fn toggle(&mut self) -> bool {
        match self.state {
            TimerState::Running => self.pause(),
            TimerState::Paused => self.resume(),
            TimerState::Cancelled => {}
        }
        self.is_running()
    }

    pub fn cancel(&mut self) {
        self.state = TimerState::Cancelled;
    }
}

/// A selector whose selection advances every time its timer fires.
#[derive(Debug, Clone)]
pub struct Rotation<T> {
    selector: Selector<T>,
    timer: RotationTimer,
}

impl<T: Record> Rotation<T> {
    pub fn new(catalog: Catalog<T>, interval: Duration) -> Self {
        Self {
            selector: Selector::new(catalog),
            timer: RotationTimer::new(interval),
        }
    }

    #[inline]
    pub fn selector(&self) -> &Selector<T> {
        &self.selector
    }

    #[inline]
    pub fn selector_mut(&mut self) -> &mut Selector<T> {
        &mut self.selector
    }

    #[inline]
    pub fn timer(&self) -> &RotationTimer {
        &self.timer
    }

    #[inline]
    pub fn timer_mut(&mut self) -> &mut RotationTimer {
        &mut self.timer
    }

    #[inline]
    pub fn active_index(&self) -> Option<usize> {
        self.selector.selected_index()
    }

    pub fn active(&self) -> Option<&T> {
        self.selector.selected()
    }

    /// Feed elapsed time, advancing once per completed interval.
    pub fn elapse(&mut self, dt: Duration) -> u32 {
        let fires = self.timer.elapse(dt);
        for _ in 0..fires {
            self.fire();
        }
        fires
    }

    /// Advance as if the timer fired, unless it is cancelled.
    pub fn fire(&mut self) {
        if self.timer.is_cancelled() {
            return;
        }
        self.selector.advance();
        tracing::trace!(
            catalog = self.selector.catalog().name(),
            index = self.active_index(),
            "rotation fired"
        );
    }

    pub fn cancel(&mut self) {
        if !self.timer.is_cancelled() {
            self.timer.cancel();
            tracing::debug!(catalog = self.selector.catalog().name(), "rotation cancelled");
        }
    }

    /// Replace the timer with a fresh running one of the same interval.
    ///
    /// The selection is kept.
    pub fn restart(&mut self) {
        self.timer = RotationTimer::new(self.timer.interval);
    }
}
