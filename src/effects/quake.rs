use kurbo::Vec2;

use crate::compile::attr::CharAttr;
use crate::foundation::math::Lcg32;

/// Random jitter effector for `<quake>` characters.
///
/// The generator state lives on the effector and is shared by every character
/// it drives: the offset is regenerated on every evaluation, not stable per
/// character within a frame. The sine gate over active time makes characters
/// rest periodically between bursts.
#[derive(Clone, Copy, Debug)]
pub struct Quaker {
    rng: Lcg32,
    speed: f32,
}

impl Quaker {
    const SEED: u32 = 200;
    const CYCLE_SECS: f32 = 0.7;

    /// Effector with the default seed and cycle.
    pub fn new() -> Self {
        Self {
            rng: Lcg32::new(Self::SEED),
            speed: std::f32::consts::TAU / Self::CYCLE_SECS,
        }
    }

    /// Offset to add to all four vertices of the character's quad.
    ///
    /// Zero when the character has no quake attribute or is in the resting
    /// part of its cycle. `point_size` is the renderer's font size; amplitudes
    /// are expressed relative to it.
    pub fn offset(&mut self, attr: &CharAttr, point_size: f32) -> Vec2 {
        let Some(params) = attr.quake else {
            return Vec2::ZERO;
        };

        let w = (attr.active_time * self.speed).sin() + 0.5;
        if w < 0.0 {
            return Vec2::ZERO;
        }

        let h = self.rng.next_signed_unit() * params.horizontal * point_size;
        let v = self.rng.next_signed_unit() * params.vertical * point_size;
        Vec2::new(f64::from(h), f64::from(v))
    }
}

impl Default for Quaker {
    fn default() -> Self {
        Self::new()
    }
}
