//! The chaos particle effect: a seedable population that drifts outward
//! and re-forms around its survivors, producing branching fractal trails.

use crate::config::ChaosConfig;
use crate::palette::{Palette, PaletteSampler};
use crate::particle::ParticleDynamics;
use crate::rand::ChaosRng;
use crate::step::{self, StepContext, StepOutcome};
use chaos_core::{Result, Vec2};
use chaos_runtime::{DebugSink, Effect, FrameInfo, ParticleAppearance, ParticleEffect};
use std::f32::consts::TAU;

/// Seed for the population created at construction
const INITIAL_SEED: u32 = 42;

/// Ring initial velocities are drawn from, before scaling by `initial_speed`
const INITIAL_RING_INNER: f32 = 0.01;
const INITIAL_RING_OUTER: f32 = 1.0;

/// Fractal chaos effect. Owns its population, palette, and the
/// appearance array the renderer reads after each `on_frame`.
pub struct ChaosParticles<P: PaletteSampler = Palette> {
    base: ParticleEffect,
    palette: P,
    config: ChaosConfig,
    dynamics: Vec<ParticleDynamics>,
    /// Frame time carried over that did not fill a whole step
    time_delta_remainder: f32,
    /// Palette row phase, radians in [0, 2π)
    color_cycle: f32,
    total_intensity: f32,
    running: bool,
    last_step: StepOutcome,
    steps_run: u64,
}

impl<P: PaletteSampler> ChaosParticles<P> {
    /// Create the effect with a population seeded at the origin
    pub fn new(palette: P, config: ChaosConfig) -> Result<Self> {
        config.validate()?;
        let mut effect = Self {
            base: ParticleEffect::new(),
            palette,
            config,
            dynamics: Vec::new(),
            time_delta_remainder: 0.0,
            color_cycle: 0.0,
            total_intensity: f32::NAN,
            running: true,
            last_step: StepOutcome::default(),
            steps_run: 0,
        };
        effect.reseed(Vec2::ZERO, INITIAL_SEED);
        Ok(effect)
    }

    /// Replace the whole population with fresh particles at `location`.
    ///
    /// Total intensity reads NaN until the next step runs.
    pub fn reseed(&mut self, location: Vec2, seed: u32) {
        self.running = true;
        self.total_intensity = f32::NAN;
        self.last_step = StepOutcome::default();

        let count = self.config.num_particles;
        self.base.reallocate(count);

        let mut rng = ChaosRng::new(seed);
        self.color_cycle = rng.uniform(0.0, TAU);

        let initial_speed = self.config.initial_speed;
        self.dynamics = (0..count)
            .map(|_| {
                let velocity =
                    rng.ring_vector(INITIAL_RING_INNER, INITIAL_RING_OUTER) * initial_speed;
                ParticleDynamics::spawn(location, velocity)
            })
            .collect();

        log::info!(
            "[chaos-particles] reseeded {} particles at ({}, {}) with seed {}",
            count,
            location.x,
            location.y,
            seed
        );
    }

    /// Advance by one host frame: run as many fixed steps as the elapsed
    /// time allows, then advance the color cycle. No-op once the
    /// population has died out.
    pub fn on_frame(&mut self, frame: &FrameInfo) {
        if !self.running {
            return;
        }

        let step_size = self.config.step_size;
        let t = frame.time_delta + self.time_delta_remainder;
        let steps = (t / step_size).floor().max(0.0) as u32;
        self.time_delta_remainder = t - steps as f32 * step_size;

        for _ in 0..steps {
            self.run_step(frame);
            if !self.running {
                // Further steps over an all-dead population change nothing
                break;
            }
        }
        log::debug!(
            "[chaos-particles] frame dt={:.4}s ran {} step(s), remainder {:.5}s",
            frame.time_delta,
            steps,
            self.time_delta_remainder
        );

        self.color_cycle = (self.color_cycle + frame.time_delta * self.config.color_rate)
            .rem_euclid(TAU);

        self.base.begin_frame(frame);
    }

    fn run_step(&mut self, frame: &FrameInfo) {
        let ctx = StepContext {
            config: &self.config,
            frame,
            palette: &self.palette,
            color_cycle: self.color_cycle,
        };
        let outcome = step::run_step(&ctx, &mut self.dynamics, &mut self.base.appearance);

        self.total_intensity = outcome.total_intensity;
        self.last_step = outcome;
        self.steps_run += 1;

        if outcome.live_particles == 0 {
            self.running = false;
            log::info!(
                "[chaos-particles] population exhausted after {} steps",
                self.steps_run
            );
        }
    }

    /// Whether any particle is still alive
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Sum of live particle intensities from the last step
    pub fn total_intensity(&self) -> f32 {
        self.total_intensity
    }

    pub fn debug(&self, sink: &mut dyn DebugSink) {
        sink.line("running", &self.running);
        sink.line("totalIntensity", &self.total_intensity);
    }

    pub fn appearance(&self) -> &[ParticleAppearance] {
        &self.base.appearance
    }

    pub fn dynamics(&self) -> &[ParticleDynamics] {
        &self.dynamics
    }

    /// Mutable access for hosts staging a particular population state
    pub fn dynamics_mut(&mut self) -> &mut [ParticleDynamics] {
        &mut self.dynamics
    }

    pub fn config(&self) -> &ChaosConfig {
        &self.config
    }

    pub fn color_cycle(&self) -> f32 {
        self.color_cycle
    }

    pub fn last_step(&self) -> StepOutcome {
        self.last_step
    }

    /// Fixed steps run since construction
    pub fn steps_run(&self) -> u64 {
        self.steps_run
    }

    /// Host frames processed while running
    pub fn frame_count(&self) -> u64 {
        self.base.frame_count()
    }

    pub fn live_count(&self) -> usize {
        self.dynamics.iter().filter(|p| !p.dead).count()
    }

    pub fn max_generation(&self) -> u32 {
        self.dynamics
            .iter()
            .map(|p| p.generation)
            .max()
            .unwrap_or(0)
    }
}

impl<P: PaletteSampler> Effect for ChaosParticles<P> {
    fn begin_frame(&mut self, frame: &FrameInfo) {
        self.on_frame(frame);
    }

    fn debug(&self, sink: &mut dyn DebugSink) {
        ChaosParticles::debug(self, sink);
    }

    fn appearance(&self) -> &[ParticleAppearance] {
        ChaosParticles::appearance(self)
    }

    fn name(&self) -> &str {
        "chaos-particles"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chaos_core::{Color, Vec3};
    use chaos_runtime::BoundingBox;

    fn unit_frame(dt: f32) -> FrameInfo {
        let bounds = BoundingBox::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        FrameInfo::new(bounds, dt)
    }

    /// Bounds nothing can escape from
    fn huge_frame(dt: f32) -> FrameInfo {
        let bounds = BoundingBox::new(Vec3::new(-1e6, -1e6, -1e6), Vec3::new(1e6, 1e6, 1e6));
        FrameInfo::new(bounds, dt)
    }

    fn effect(config: ChaosConfig) -> ChaosParticles {
        ChaosParticles::new(Palette::ember(), config).unwrap()
    }

    fn small_config() -> ChaosConfig {
        ChaosConfig {
            num_particles: 16,
            max_age: 40,
            ..Default::default()
        }
    }

    #[test]
    fn reseed_initializes_population() {
        let mut fx = effect(ChaosConfig::default());
        fx.reseed(Vec2::new(0.3, -0.2), 7);

        assert!(fx.is_running());
        assert!(fx.total_intensity().is_nan());
        assert_eq!(fx.dynamics().len(), 700);
        assert_eq!(fx.appearance().len(), 700);
        assert!(fx.color_cycle() >= 0.0 && fx.color_cycle() < TAU);

        let speed = fx.config().initial_speed;
        for p in fx.dynamics() {
            assert_eq!(p.position, Vec2::new(0.3, -0.2));
            assert_eq!(p.age, 0);
            assert_eq!(p.generation, 0);
            assert!(!p.dead && !p.escaped);
            let v = p.velocity.length();
            assert!(v >= speed * 0.0099 && v <= speed * 1.0001);
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = ChaosConfig {
            max_age: 0,
            ..Default::default()
        };
        assert!(ChaosParticles::new(Palette::ember(), config).is_err());
    }

    #[test]
    fn short_frames_accumulate_into_steps() {
        let mut fx = effect(small_config());
        let step = fx.config().step_size;

        fx.on_frame(&huge_frame(step * 0.5));
        assert_eq!(fx.steps_run(), 0);
        assert!(fx.total_intensity().is_nan());

        fx.on_frame(&huge_frame(step * 0.75));
        assert_eq!(fx.steps_run(), 1);
        assert!(!fx.total_intensity().is_nan());
        assert_eq!(fx.frame_count(), 2);
    }

    #[test]
    fn begin_frame_runs_once_per_frame_not_per_step() {
        let mut fx = effect(small_config());
        let step = fx.config().step_size;
        fx.on_frame(&huge_frame(step * 5.0 + step * 0.5));
        assert_eq!(fx.steps_run(), 5);
        assert_eq!(fx.frame_count(), 1);
    }

    #[test]
    fn identical_inputs_give_identical_appearance() {
        let mut a = effect(ChaosConfig::default());
        let mut b = effect(ChaosConfig::default());
        a.reseed(Vec2::new(0.1, 0.1), 1234);
        b.reseed(Vec2::new(0.1, 0.1), 1234);

        for i in 0..30 {
            let frame = unit_frame(1.0 / 60.0 + (i % 3) as f32 * 0.003);
            a.on_frame(&frame);
            b.on_frame(&frame);
            assert_eq!(a.appearance(), b.appearance());
        }
        assert_eq!(a.dynamics(), b.dynamics());
        assert_eq!(a.total_intensity().to_bits(), b.total_intensity().to_bits());
    }

    #[test]
    fn split_frames_match_single_frame() {
        let mut split = effect(ChaosConfig::default());
        let mut whole = effect(ChaosConfig::default());
        let step = split.config().step_size;

        split.on_frame(&unit_frame(step));
        split.on_frame(&unit_frame(step));
        whole.on_frame(&unit_frame(2.0 * step));

        assert_eq!(split.steps_run(), 2);
        assert_eq!(whole.steps_run(), 2);
        assert_eq!(split.dynamics(), whole.dynamics());
    }

    #[test]
    fn population_size_is_conserved() {
        let mut fx = effect(ChaosConfig::default());
        for _ in 0..40 {
            fx.on_frame(&unit_frame(1.0 / 30.0));
            assert_eq!(fx.dynamics().len(), 700);
            assert_eq!(fx.appearance().len(), 700);
        }
    }

    #[test]
    fn live_ages_increase_each_step() {
        let mut fx = effect(small_config());
        let step = fx.config().step_size;
        for _ in 0..10 {
            let before: Vec<u32> = fx.dynamics().iter().map(|p| p.age).collect();
            fx.on_frame(&huge_frame(step));
            for (p, age) in fx.dynamics().iter().zip(before) {
                assert_eq!(p.age, age + 1);
            }
        }
    }

    #[test]
    fn population_dies_out_without_escapes() {
        let config = small_config();
        let max_age = config.max_age;
        let mut fx = effect(config);
        let step = fx.config().step_size;

        for _ in 0..max_age {
            fx.on_frame(&huge_frame(step));
        }
        assert!(fx.is_running());
        assert_eq!(fx.live_count(), 16);

        fx.on_frame(&huge_frame(step));
        assert!(!fx.is_running());
        assert_eq!(fx.live_count(), 0);
        assert_eq!(fx.total_intensity(), 0.0);
        assert!(fx.dynamics().iter().all(|p| p.dead && p.age == max_age + 1));

        // Further frames are no-ops
        let frames = fx.frame_count();
        fx.on_frame(&huge_frame(1.0));
        assert_eq!(fx.frame_count(), frames);
        assert!(!fx.is_running());

        fx.reseed(Vec2::ZERO, 3);
        assert!(fx.is_running());
        assert_eq!(fx.live_count(), 16);
    }

    #[test]
    fn total_intensity_matches_appearance_sum() {
        let mut fx = effect(ChaosConfig::default());
        fx.reseed(Vec2::ZERO, 99);
        for _ in 0..20 {
            fx.on_frame(&unit_frame(1.0 / 25.0));
            let sum: f32 = fx.appearance().iter().map(|a| a.intensity).sum();
            let total = fx.total_intensity();
            assert!(total >= 0.0);
            assert!((total - sum).abs() <= 1e-4 * sum.max(1.0));
        }
    }

    #[test]
    fn escapes_produce_new_generations() {
        let mut fx = effect(ChaosConfig::default());
        let step = fx.config().step_size;
        {
            let dynamics = fx.dynamics_mut();
            dynamics[0].position = Vec2::new(40.0, 0.0);
        }
        fx.on_frame(&unit_frame(step));
        assert_eq!(fx.last_step().respawned, 1);
        assert_eq!(fx.max_generation(), 1);
        assert_eq!(fx.dynamics()[0].generation, 1);
        assert_eq!(fx.dynamics()[0].age, 0);
    }

    #[test]
    fn color_cycle_wraps() {
        let config = ChaosConfig {
            color_rate: 4.0,
            ..small_config()
        };
        let mut fx = ChaosParticles::new(Palette::solid(Color::WHITE), config).unwrap();
        for _ in 0..50 {
            fx.on_frame(&huge_frame(0.1));
            assert!(fx.color_cycle() >= 0.0 && fx.color_cycle() < TAU);
        }
    }

    #[test]
    fn debug_reports_running_and_intensity() {
        let fx = effect(small_config());
        let mut lines: Vec<(String, String)> = Vec::new();
        Effect::debug(&fx, &mut lines);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], ("running".to_string(), "true".to_string()));
        assert_eq!(lines[1], ("totalIntensity".to_string(), "NaN".to_string()));
        assert_eq!(fx.name(), "chaos-particles");
    }

    #[test]
    fn drives_through_trait_object() {
        let mut fx: Box<dyn Effect> = Box::new(effect(small_config()));
        fx.begin_frame(&huge_frame(0.01));
        assert_eq!(fx.appearance().len(), 16);
        assert!(fx.appearance().iter().any(|a| a.intensity > 0.0));
    }
}
