use super::constants::*;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// One parallax layer of background stars.
///
/// `positions()` is always `base()[i] + wave_offset(time, i, amplitude)`.
#[derive(Clone, Debug)]
pub struct StarLayer {
    base: Vec<Vec3>,
    current: Vec<Vec3>,
    pub point_size: f32,
    pub drift_speed: f32,
    pub wave_amplitude: f32,
    pub tint: Vec3,
    pub opacity: f32,
    time: f32,
}

impl StarLayer {
    pub fn base(&self) -> &[Vec3] {
        &self.base
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.current
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Layer time of the last `animate` call (elapsed seconds × drift speed).
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Recompute displaced positions for the given elapsed wall-clock seconds.
    pub fn animate(&mut self, elapsed_secs: f64) {
        let time = (elapsed_secs * self.drift_speed as f64) as f32;
        self.time = time;
        let amplitude = self.wave_amplitude;
        for (i, (cur, base)) in self.current.iter_mut().zip(&self.base).enumerate() {
            *cur = *base + wave_offset(time, i, amplitude);
        }
    }
}

#[inline]
fn raw_wave(time: f32, offset: f32, amplitude: f32) -> Vec3 {
    let x = (time + offset).sin() * amplitude
        + (time * 0.7 + offset * 1.7).cos() * amplitude * 0.5;
    let y = (time + offset * 1.3).cos() * amplitude
        + (time * 1.2 + offset * 2.1).sin() * amplitude * 0.5;
    let z = (time * 0.8 + offset * 2.5).sin() * amplitude
        + (time * 1.5 + offset * 1.9).cos() * amplitude * 0.5;
    Vec3::new(x, y, z)
}

/// Drift of star `index` at layer time `time`, anchored so it is zero at `time == 0`.
#[inline]
pub fn wave_offset(time: f32, index: usize, amplitude: f32) -> Vec3 {
    if time == 0.0 {
        return Vec3::ZERO;
    }
    let offset = index as f32 * STAR_PHASE_STEP;
    raw_wave(time, offset, amplitude) - raw_wave(0.0, offset, amplitude)
}

/// Point on the star shell: radius biased outward, direction uniform on the sphere.
pub fn random_shell_point<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let u: f32 = rng.gen();
    let radius = STAR_RADIUS_MIN + u * u * STAR_RADIUS_SPAN;
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Build one layer of `count` stars. `_base_depth` is accepted for layout parity and unused.
pub fn create_star_layer<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    point_size: f32,
    _base_depth: f32,
    drift_speed: f32,
) -> StarLayer {
    let base: Vec<Vec3> = (0..count).map(|_| random_shell_point(rng)).collect();
    let tint = Vec3::new(
        0.9 + rng.gen::<f32>() * 0.1,
        0.8 + rng.gen::<f32>() * 0.2,
        0.9 + rng.gen::<f32>() * 0.1,
    );
    let opacity = STAR_OPACITY_MIN + rng.gen::<f32>() * STAR_OPACITY_SPAN;
    let wave_amplitude = STAR_WAVE_MIN + rng.gen::<f32>() * STAR_WAVE_SPAN;
    StarLayer {
        current: base.clone(),
        base,
        point_size,
        drift_speed,
        wave_amplitude,
        tint,
        opacity,
        time: 0.0,
    }
}

/// The fixed set of star layers, created once at start-up.
pub struct Starfield {
    layers: Vec<StarLayer>,
}

impl Starfield {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let layers = STAR_TIERS
            .iter()
            .map(|&(count, size, speed)| create_star_layer(rng, count, size, 0.0, speed))
            .collect();
        Self { layers }
    }

    pub fn layers(&self) -> &[StarLayer] {
        &self.layers
    }

    pub fn animate(&mut self, elapsed_secs: f64) {
        for layer in &mut self.layers {
            layer.animate(elapsed_secs);
        }
    }
}
