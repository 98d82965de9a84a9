//! Chaos Core - Foundational types for the chaos particle effect
//!
//! This crate provides the types that all other chaos crates depend on:
//! - `Vec2`, `Vec3` - Simulation and model-space vectors
//! - `Color` - Linear RGB color
//! - Error types and Result alias

mod error;
mod types;

pub use error::{ChaosError, Result};
pub use types::{Color, Vec2, Vec3};
