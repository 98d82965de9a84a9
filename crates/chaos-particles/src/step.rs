//! One fixed simulation step: integrate every particle, then respawn the
//! ones that escaped from surviving neighbours.
//!
//! The two passes must stay separate. Respawn reads the escape flags and
//! positions written by integration for the whole array, including
//! particles it has not reached yet.

use crate::config::ChaosConfig;
use crate::palette::PaletteSampler;
use crate::particle::ParticleDynamics;
use crate::rand::ChaosRng;
use chaos_runtime::{FrameInfo, ParticleAppearance};
use std::f32::consts::PI;

/// Every step's escape randomness starts from this seed
pub const STEP_SEED: u32 = 19;

/// Donor picks tried per escaped particle before giving up for the step
pub const DONOR_ATTEMPTS: u32 = 100;

/// Scale applied to positions before remixing them into the step RNG
const REMIX_SCALE: f32 = 1e8;

/// Read-only inputs to a step
pub struct StepContext<'a, P: PaletteSampler> {
    pub config: &'a ChaosConfig,
    pub frame: &'a FrameInfo,
    pub palette: &'a P,
    pub color_cycle: f32,
}

/// Results of one step
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepOutcome {
    pub total_intensity: f32,
    pub live_particles: usize,
    pub respawned: usize,
    /// Escaped particles left unrepaired because no donor was found
    pub stranded: usize,
}

/// Run one step with a freshly seeded step RNG
pub fn run_step<P: PaletteSampler>(
    ctx: &StepContext<'_, P>,
    dynamics: &mut [ParticleDynamics],
    appearance: &mut [ParticleAppearance],
) -> StepOutcome {
    let mut rng = ChaosRng::new(STEP_SEED);
    run_step_with(ctx, dynamics, appearance, &mut rng)
}

/// Run one step drawing from `rng`
pub fn run_step_with<P: PaletteSampler>(
    ctx: &StepContext<'_, P>,
    dynamics: &mut [ParticleDynamics],
    appearance: &mut [ParticleAppearance],
    rng: &mut ChaosRng,
) -> StepOutcome {
    let (total_intensity, live_particles) = integrate(ctx, dynamics, appearance, rng);
    let (respawned, stranded) = respawn_escaped(ctx.config, dynamics, rng);
    StepOutcome {
        total_intensity,
        live_particles,
        respawned,
        stranded,
    }
}

/// Fade multiplier for a normalized age: zero at birth and at `max_age`,
/// peaking mid-life
pub fn fade(age_fraction: f32, exponent: f32) -> f32 {
    (age_fraction * PI).sin().max(0.0).powf(exponent)
}

/// Advance every live particle, write its appearance and escape flag.
/// Returns the summed intensity and the live particle count.
pub fn integrate<P: PaletteSampler>(
    ctx: &StepContext<'_, P>,
    dynamics: &mut [ParticleDynamics],
    appearance: &mut [ParticleAppearance],
    rng: &mut ChaosRng,
) -> (f32, usize) {
    let config = ctx.config;
    let palette_v = 0.5 + 0.5 * ctx.color_cycle.sin();
    let mut intensity_sum = 0.0f32;
    let mut live = 0usize;

    for (p, look) in dynamics.iter_mut().zip(appearance.iter_mut()) {
        if p.dead {
            look.intensity = 0.0;
            continue;
        }

        p.position += p.velocity;
        p.age += 1;
        if p.age > config.max_age {
            p.dead = true;
            look.intensity = 0.0;
            continue;
        }
        let age_f = p.age_fraction(config.max_age);

        // Simulation plane is the model's XZ plane; Y is left alone
        look.point.x = p.position.x;
        look.point.z = p.position.y;

        let fade_factor = fade(age_f, config.intensity_exp);
        let particle_intensity = config.intensity * fade_factor;
        look.intensity = particle_intensity;
        look.radius = ctx.frame.model_diameter * config.relative_size * fade_factor;

        live += 1;
        intensity_sum += particle_intensity;

        let palette_u = (p.generation as f32 + age_f) * config.generation_scale;
        look.color = ctx.palette.sample(palette_u, palette_v);

        p.escaped = ctx.frame.distance_outside_bounding_box(look.point)
            > config.outside_margin * look.radius;

        rng.remix(p.position.x * REMIX_SCALE);
        rng.remix(p.position.y * REMIX_SCALE);
    }

    (intensity_sum, live)
}

/// Reassign each escaped particle to a copy of a random non-escaped one,
/// with its speed and heading perturbed. Returns (respawned, stranded).
pub fn respawn_escaped(
    config: &ChaosConfig,
    dynamics: &mut [ParticleDynamics],
    rng: &mut ChaosRng,
) -> (usize, usize) {
    let count = dynamics.len();
    let mut respawned = 0;
    let mut stranded = 0;

    for i in 0..count {
        if !dynamics[i].escaped || dynamics[i].dead {
            continue;
        }

        let mut repaired = false;
        for _ in 0..DONOR_ATTEMPTS {
            let donor = (rng.uniform(0.0, count as f32 - 0.0001) as usize).min(count - 1);
            if dynamics[donor].escaped {
                continue;
            }

            let mut p = dynamics[donor];
            p.generation += 1;
            p.age = 0;
            p.velocity *= rng.uniform(config.speed_min, config.speed_max);
            p.velocity = p
                .velocity
                .rotated(rng.uniform(config.spin_min, config.spin_max));
            dynamics[i] = p;

            repaired = true;
            break;
        }

        if repaired {
            respawned += 1;
        } else {
            stranded += 1;
            log::trace!("particle {i} found no donor in {DONOR_ATTEMPTS} attempts");
        }
    }

    (respawned, stranded)
}
