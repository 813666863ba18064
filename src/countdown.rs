use chrono::{DateTime, Local};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::render;

/// Seconds slept per loop iteration.
pub const TICK_SECS: u64 = 1;
/// Seconds of local counting between checks against the wall clock.
pub const RESYNC_INTERVAL_SECS: i64 = 900;

/// The countdown state machine. The deadline is frozen at construction;
/// `remaining` is this loop's local belief about time left and drifts from
/// the wall clock by the per-iteration overhead, which a periodic resync
/// cancels out.
pub struct Countdown {
    total: u64,
    deadline: DateTime<Local>,
    remaining: u64,
    skew_budget: i64,
    total_skew: i64,
    tick_secs: u64,
    resync_interval: i64,
    quiet: bool,
}

impl Countdown {
    pub fn new(duration_secs: u64, now: DateTime<Local>) -> Self {
        // Saturate absurd spans instead of panicking inside chrono.
        let span = chrono::Duration::try_seconds(i64::try_from(duration_secs).unwrap_or(i64::MAX))
            .unwrap_or(chrono::Duration::MAX);
        let deadline = now
            .checked_add_signed(span)
            .unwrap_or(chrono::DateTime::<chrono::Utc>::MAX_UTC.into());
        Self {
            total: duration_secs,
            deadline,
            remaining: duration_secs,
            skew_budget: RESYNC_INTERVAL_SECS,
            total_skew: 0,
            tick_secs: TICK_SECS,
            resync_interval: RESYNC_INTERVAL_SECS,
            quiet: false,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_tick_secs(mut self, secs: u64) -> Self {
        self.tick_secs = secs.max(1);
        self
    }

    pub fn with_resync_interval(mut self, secs: i64) -> Self {
        self.resync_interval = secs;
        self.skew_budget = secs;
        self
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn total_skew(&self) -> i64 {
        self.total_skew
    }

    /// Runs the countdown to completion: render, sleep one tick, count
    /// down, resync against the deadline when the budget runs out.
    pub async fn run(&mut self) {
        let bar = if self.quiet || self.total == 0 {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(self.total);
            bar.set_style(ProgressStyle::with_template("{msg}").unwrap());
            bar
        };

        while self.remaining >= self.tick_secs {
            bar.set_message(render::status_line(self.total, self.remaining, true));
            tokio::time::sleep(Duration::from_secs(self.tick_secs)).await;
            self.tick_down();
            if self.skew_budget <= 0 {
                self.resync_at(Local::now());
            }
        }

        // Sub-tick leftover, possible after a resync or with a coarse tick.
        if self.remaining > 0 {
            tokio::time::sleep(Duration::from_secs(self.remaining)).await;
            self.remaining = 0;
        }
        bar.finish_and_clear();

        if self.total_skew != 0 {
            eprintln!(
                "tarry: corrected {}s of timer drift against the deadline",
                self.total_skew
            );
        }
    }

    fn tick_down(&mut self) {
        self.remaining = self.remaining.saturating_sub(self.tick_secs);
        self.skew_budget -= self.tick_secs as i64;
    }

    /// Replaces the local counter with the true time to deadline, clamped
    /// so a resync never raises it, and never below zero. The applied
    /// correction accumulates for the end-of-run diagnostic.
    fn resync_at(&mut self, now: DateTime<Local>) {
        let true_remaining = (self.deadline - now).num_seconds().max(0) as u64;
        let corrected = true_remaining.min(self.remaining);
        self.total_skew += (self.remaining - corrected) as i64;
        self.remaining = corrected;
        self.skew_budget = self.resync_interval;
    }
}
