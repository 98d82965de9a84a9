//! Chaos Runtime - Host-facing effect infrastructure
//!
//! Provides the pieces a host needs to drive an effect:
//! - `FrameInfo` / `BoundingBox` — per-frame timing and model geometry
//! - `ModelLayout` — LED layout loading (Open Pixel Control JSON)
//! - `ParticleEffect` / `Effect` — appearance storage and the effect trait
//! - `DebugSink` — key/value diagnostics
//! - `FrameClock` — wall-clock or fixed-rate frame deltas

mod clock;
mod debug;
mod effect;
mod frame;
mod layout;

pub use clock::FrameClock;
pub use debug::{DebugSink, LogSink};
pub use effect::{Effect, ParticleAppearance, ParticleEffect};
pub use frame::{BoundingBox, FrameInfo};
pub use layout::ModelLayout;
