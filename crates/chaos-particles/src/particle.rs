//! Per-particle simulation state

use chaos_core::Vec2;

/// Dynamics for one particle slot. Slots are never compacted; a particle
/// keeps its index until a respawn overwrites it with a donor's state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParticleDynamics {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Outside the bounding margin as of the last step
    pub escaped: bool,
    /// Aged past `max_age`; no longer integrated
    pub dead: bool,
    /// Fractal respawns in this particle's lineage
    pub generation: u32,
    /// Steps since the last (re)spawn
    pub age: u32,
}

impl ParticleDynamics {
    /// A fresh particle at `position`
    pub fn spawn(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            escaped: false,
            dead: false,
            generation: 0,
            age: 0,
        }
    }

    /// Normalized age in [0, 1] for a live particle
    pub fn age_fraction(&self, max_age: u32) -> f32 {
        self.age as f32 / max_age as f32
    }
}
