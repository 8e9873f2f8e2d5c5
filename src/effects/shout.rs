use std::f32::consts::FRAC_PI_2;

use crate::compile::attr::CharAttr;

/// Uniform quad scale for a `<shout>` character at its current active time.
///
/// Two-phase envelope: a quarter-sine ease-in over the grow duration, a
/// quarter-sine ease-out over the shrink duration, riding on a linear baseline
/// that saturates to 1 after the total duration. Applying the scale about the
/// quad centroid is the renderer's job. Returns 1 for characters without the
/// shout attribute; out-of-range times clamp rather than fail.
pub fn shout_scale(attr: &CharAttr) -> f32 {
    let Some(p) = attr.shout else {
        return 1.0;
    };
    let total = p.grow + p.shrink;
    if total <= 0.0 {
        return 1.0;
    }

    let t = attr.active_time.max(0.0);
    let base = (t / total).min(1.0);
    let envelope = if t <= p.grow {
        if p.grow <= 0.0 {
            1.0
        } else {
            (FRAC_PI_2 * t / p.grow).sin()
        }
    } else if t <= total {
        (FRAC_PI_2 * (t - p.grow) / p.shrink).cos()
    } else {
        0.0
    };

    base + envelope * (p.scale - 1.0)
}
