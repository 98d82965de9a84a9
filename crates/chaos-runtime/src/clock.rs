//! Frame clock producing per-frame time deltas

use std::time::Instant;

/// Largest delta a realtime clock reports, to avoid a burst of steps
/// after a stall
const MAX_DELTA: f32 = 0.25;

enum Source {
    Realtime {
        last_instant: Instant,
        first_tick: bool,
    },
    Fixed {
        interval: f32,
    },
}

/// Tracks host time and yields the delta for each frame
pub struct FrameClock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f32,
    source: Source,
}

impl FrameClock {
    /// Measure wall-clock time between ticks
    pub fn realtime() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            source: Source::Realtime {
                last_instant: Instant::now(),
                first_tick: true,
            },
        }
    }

    /// Advance by exactly `1 / fps` per tick, independent of wall time
    pub fn fixed(fps: f32) -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            source: Source::Fixed {
                interval: 1.0 / fps,
            },
        }
    }

    /// Advance the clock. Call once per frame; returns the new delta.
    pub fn tick(&mut self) -> f32 {
        self.delta_time = match &mut self.source {
            Source::Realtime {
                last_instant,
                first_tick,
            } => {
                let now = Instant::now();
                let elapsed = now.duration_since(*last_instant).as_secs_f32();
                *last_instant = now;
                if *first_tick {
                    *first_tick = false;
                    0.0
                } else {
                    elapsed.min(MAX_DELTA)
                }
            }
            Source::Fixed { interval } => *interval,
        };
        self.total_time += self.delta_time as f64;
        self.delta_time
    }

    pub fn is_realtime(&self) -> bool {
        matches!(self.source, Source::Realtime { .. })
    }
}
