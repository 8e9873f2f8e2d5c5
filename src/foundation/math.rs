/// 31-bit linear congruential generator used by the quake effect.
///
/// Constants match the classic Numerical Recipes LCG. State is shared by all
/// characters driven by one effector, so quaking glyphs jitter from a common
/// stream rather than per-character independent seeds.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Lcg32(u32);

impl Lcg32 {
    const A: u32 = 1_664_525;
    const C: u32 = 1_013_904_223;
    const MASK: u32 = 0x7fff_ffff;

    pub(crate) fn new(seed: u32) -> Self {
        Self(seed & Self::MASK)
    }

    pub(crate) fn next_u31(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(Self::A).wrapping_add(Self::C) & Self::MASK;
        self.0
    }

    /// Uniform value in `[-1, 1]`.
    pub(crate) fn next_signed_unit(&mut self) -> f32 {
        let r = self.next_u31() as f32 / Self::MASK as f32;
        (r - 0.5) * 2.0
    }
}
