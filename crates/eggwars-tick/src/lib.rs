//! Fixed-timestep tick driver for the EggWars match core.
//!
//! The match core is synchronous: it exposes a `tick()` that advances
//! every arena and generator by exactly one raw tick. This crate turns
//! wall-clock time into those calls at a fixed rate (20 Hz by default,
//! the rate every in-core interval is expressed in).
//!
//! Overruns are handled by skipping: when the loop wakes up late, the
//! missed ticks are dropped and the next one is scheduled from now.
//! Game timers therefore stretch under load instead of bursting, which
//! is the right trade for countdowns players watch on screen.
//!
//! # Integration
//!
//! The driver sits in the host's `tokio::select!` loop next to the
//! command channel:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = commands.recv() => { /* mutate the manager */ }
//!         info = driver.wait_for_tick() => {
//!             manager.tick();
//!             let _ = info;
//!         }
//!     }
//! }
//! ```

use std::time::Duration;

use rand::Rng;
use tokio::time::{self, Instant as TokioInstant};
use tracing::{debug, warn};

/// Configuration for the tick driver.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Tick rate in Hz, clamped to `1..=128`.
    pub tick_rate_hz: u32,
    /// Random jitter (0–max µs) added before the first tick so drivers
    /// created at the same instant don't all fire together.
    pub initial_jitter_us: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: Self::DEFAULT_TICK_RATE_HZ,
            initial_jitter_us: 2_000,
        }
    }
}

impl TickConfig {
    /// The match core's raw tick rate.
    pub const DEFAULT_TICK_RATE_HZ: u32 = 20;

    /// Maximum supported tick rate.
    pub const MAX_TICK_RATE_HZ: u32 = 128;

    pub fn with_rate(tick_rate_hz: u32) -> Self {
        Self {
            tick_rate_hz,
            ..Default::default()
        }
    }

    /// Clamps out-of-range values. Called by [`TickDriver::new`].
    pub fn validated(mut self) -> Self {
        if self.tick_rate_hz == 0 {
            warn!("tick_rate_hz of 0 is not supported — using 1");
            self.tick_rate_hz = 1;
        }
        if self.tick_rate_hz > Self::MAX_TICK_RATE_HZ {
            warn!(
                rate = self.tick_rate_hz,
                max = Self::MAX_TICK_RATE_HZ,
                "tick_rate_hz exceeds maximum — clamping"
            );
            self.tick_rate_hz = Self::MAX_TICK_RATE_HZ;
        }
        self
    }

    /// Duration of a single tick.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_rate_hz.max(1) as f64)
    }
}

/// Information about a tick that just fired.
#[derive(Debug, Clone)]
pub struct TickInfo {
    /// Monotonically increasing tick number (starts at 1).
    pub tick: u64,
    /// Fixed delta time (always `1 / tick_rate`). Use this, not wall
    /// clock, for anything that must stay deterministic.
    pub dt: Duration,
    /// `true` if this tick fired noticeably late.
    pub overrun: bool,
    /// Ticks dropped because of the overrun (0 normally).
    pub ticks_skipped: u64,
}

/// Fixed-timestep driver. One per match-core instance.
pub struct TickDriver {
    config: TickConfig,
    tick_duration: Duration,
    tick_count: u64,
    next_tick: TokioInstant,
    paused: bool,
    total_skipped: u64,
}

impl TickDriver {
    pub fn new(config: TickConfig) -> Self {
        let config = config.validated();
        let tick_duration = config.tick_duration();

        let jitter = if config.initial_jitter_us > 0 {
            Duration::from_micros(rand::rng().random_range(0..config.initial_jitter_us))
        } else {
            Duration::ZERO
        };

        debug!(
            rate_hz = config.tick_rate_hz,
            budget_ms = tick_duration.as_secs_f64() * 1000.0,
            "tick driver created"
        );

        Self {
            next_tick: TokioInstant::now() + tick_duration + jitter,
            config,
            tick_duration,
            tick_count: 0,
            paused: false,
            total_skipped: 0,
        }
    }

    pub fn with_rate(tick_rate_hz: u32) -> Self {
        Self::new(TickConfig::with_rate(tick_rate_hz))
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn tick_rate_hz(&self) -> u32 {
        self.config.tick_rate_hz
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn total_skipped(&self) -> u64 {
        self.total_skipped
    }

    /// Stops the tick from firing. [`wait_for_tick`](Self::wait_for_tick)
    /// pends forever while paused, which is exactly what a `select!`
    /// loop wants.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            debug!(tick = self.tick_count, "tick driver paused");
        }
    }

    /// Resumes ticking. The next tick fires one interval from now, not
    /// from where the schedule would have drifted to while paused.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            self.next_tick = TokioInstant::now() + self.tick_duration;
            debug!(tick = self.tick_count, "tick driver resumed");
        }
    }

    /// Waits until the next tick is due.
    ///
    /// While paused this future never resolves; a surrounding
    /// `tokio::select!` keeps processing its other branches.
    pub async fn wait_for_tick(&mut self) -> TickInfo {
        if self.paused {
            std::future::pending::<()>().await;
            unreachable!()
        }

        time::sleep_until(self.next_tick).await;

        let now = TokioInstant::now();
        self.tick_count += 1;

        // Waking >10% late counts as an overrun.
        let late_by = now.saturating_duration_since(self.next_tick);
        let overrun = late_by > self.tick_duration / 10;
        let mut ticks_skipped = 0u64;

        if overrun {
            ticks_skipped = late_by.as_nanos() as u64 / self.tick_duration.as_nanos() as u64;
            if ticks_skipped > 0 {
                self.total_skipped += ticks_skipped;
                warn!(
                    tick = self.tick_count,
                    skipped = ticks_skipped,
                    late_ms = late_by.as_secs_f64() * 1000.0,
                    "tick overrun — skipping ahead"
                );
            }
        }

        // Schedule from now, never from the missed deadline.
        self.next_tick = now + self.tick_duration;

        TickInfo {
            tick: self.tick_count,
            dt: self.tick_duration,
            overrun,
            ticks_skipped,
        }
    }
}
