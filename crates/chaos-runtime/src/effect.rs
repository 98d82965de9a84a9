//! Effect trait and the shared particle appearance store

use crate::debug::DebugSink;
use crate::frame::FrameInfo;
use chaos_core::{Color, Vec3};

/// What the renderer draws for one particle slot
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParticleAppearance {
    pub point: Vec3,
    pub radius: f32,
    pub color: Color,
    pub intensity: f32,
}

/// Base state shared by particle effects: the appearance array the
/// renderer reads, plus per-frame bookkeeping.
#[derive(Debug, Default)]
pub struct ParticleEffect {
    pub appearance: Vec<ParticleAppearance>,
    frame_count: u64,
    total_time: f64,
}

impl ParticleEffect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the appearance array with `count` blank records
    pub fn reallocate(&mut self, count: usize) {
        self.appearance = vec![ParticleAppearance::default(); count];
    }

    /// Frame bookkeeping. Runs once per host frame.
    pub fn begin_frame(&mut self, frame: &FrameInfo) {
        self.frame_count += 1;
        self.total_time += frame.time_delta as f64;
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }
}

/// An effect driven by a host once per frame
///
/// The host calls `begin_frame` with the elapsed time, then reads
/// `appearance` to render.
pub trait Effect {
    /// Advance the effect by one host frame
    fn begin_frame(&mut self, frame: &FrameInfo);

    /// Emit diagnostic key/value lines
    fn debug(&self, sink: &mut dyn DebugSink);

    /// Current per-particle appearance
    fn appearance(&self) -> &[ParticleAppearance];

    /// Human-readable name for this effect
    fn name(&self) -> &str;
}
