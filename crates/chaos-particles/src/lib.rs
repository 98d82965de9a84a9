//! Chaos Particles - Fractal respawning particle effect
//!
//! Particles spawn from a point and drift outward. Any particle that leaves
//! the model's bounding region is reborn as a copy of a surviving particle
//! with its speed and heading perturbed, so trails branch into
//! self-similar patterns.
//!
//! - Fixed-step simulation decoupled from the host frame rate
//! - Deterministic for a given seed and sequence of frame times
//! - Palette colors sampled by respawn generation and a slow color cycle

pub mod chaos;
pub mod config;
pub mod palette;
pub mod particle;
pub mod rand;
pub mod step;

pub use chaos::ChaosParticles;
pub use config::ChaosConfig;
pub use palette::{Palette, PaletteSampler};
pub use particle::ParticleDynamics;
pub use rand::ChaosRng;
pub use step::{StepContext, StepOutcome};
