use crate::compile::attr::CharAttr;

/// Seconds for a fading character to ramp from fully transparent to opaque.
pub const FADE_SPAN: f32 = 0.7;
/// Extra delay applied to the trailing pair of quad vertices.
pub const FADE_TRAIL_DELAY: f32 = 0.2;

/// Per-vertex-pair alpha for a `<fade>` character.
///
/// The trailing pair lags the leading pair, producing a directional wipe
/// across the glyph rather than a flat fade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeAlpha {
    /// Alpha for the leading two vertices, in `[0, 1]`.
    pub leading: f32,
    /// Alpha for the trailing two vertices, in `[0, 1]`.
    pub trailing: f32,
}

/// Alpha values for a character at its current active time.
///
/// Fully opaque for characters without the fade attribute; times outside the
/// ramp clamp to the `[0, 1]` endpoints.
pub fn fade_alpha(attr: &CharAttr) -> FadeAlpha {
    if !attr.fade {
        return FadeAlpha {
            leading: 1.0,
            trailing: 1.0,
        };
    }
    FadeAlpha {
        leading: (attr.active_time / FADE_SPAN).clamp(0.0, 1.0),
        trailing: ((attr.active_time - FADE_TRAIL_DELAY) / FADE_SPAN).clamp(0.0, 1.0),
    }
}
