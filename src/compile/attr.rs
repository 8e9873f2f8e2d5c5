/// The closed set of per-character effects a tag can toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    /// Random jitter (`<quake>`).
    Quake,
    /// Pop-in scale envelope (`<shout>`).
    Shout,
    /// Directional alpha wipe (`<fade>`).
    Fade,
}

impl EffectKind {
    /// Tag name this effect answers to.
    pub fn tag_name(self) -> &'static str {
        match self {
            EffectKind::Quake => "quake",
            EffectKind::Shout => "shout",
            EffectKind::Fade => "fade",
        }
    }
}

/// Jitter amplitudes, in font-size units per axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QuakeParams {
    /// Horizontal amplitude.
    pub horizontal: f32,
    /// Vertical amplitude.
    pub vertical: f32,
}

impl Default for QuakeParams {
    fn default() -> Self {
        Self {
            horizontal: 0.1,
            vertical: 0.1,
        }
    }
}

impl QuakeParams {
    /// Build from the comma-separated tag arguments: one value drives both
    /// axes, two values drive each axis separately.
    pub(crate) fn from_args(args: &[f32]) -> Self {
        match args {
            [] => Self::default(),
            [v] => Self {
                horizontal: *v,
                vertical: *v,
            },
            [h, v, ..] => Self {
                horizontal: *h,
                vertical: *v,
            },
        }
    }
}

/// Shout envelope parameters: peak scale plus grow/shrink durations in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShoutParams {
    /// Scale at the envelope peak.
    pub scale: f32,
    /// Seconds spent growing to the peak.
    pub grow: f32,
    /// Seconds spent shrinking back to baseline.
    pub shrink: f32,
}

impl ShoutParams {
    /// Peak scale used when the tag carries no arguments.
    pub const DEFAULT_SCALE: f32 = 1.5;
    /// Grow/shrink duration used when the tag only supplies a scale.
    pub const DEFAULT_PHASE: f32 = 0.35;

    /// Layered defaults over the comma-separated tag arguments: three values
    /// are used verbatim, two share half the second value between grow and
    /// shrink, one keeps the fixed phase durations, zero keeps everything.
    pub(crate) fn from_args(args: &[f32]) -> Self {
        match args {
            [] => Self::default(),
            [scale] => Self {
                scale: *scale,
                ..Self::default()
            },
            [scale, span] => Self {
                scale: *scale,
                grow: span * 0.5,
                shrink: span * 0.5,
            },
            [scale, grow, shrink, ..] => Self {
                scale: *scale,
                grow: *grow,
                shrink: *shrink,
            },
        }
    }
}

impl Default for ShoutParams {
    fn default() -> Self {
        Self {
            scale: Self::DEFAULT_SCALE,
            grow: Self::DEFAULT_PHASE,
            shrink: Self::DEFAULT_PHASE,
        }
    }
}

/// Per-visible-character animation record.
///
/// One record exists per character that counts toward the reveal; pass-through
/// markup written into the raw buffer gets none. `active_time` starts at zero
/// and is advanced externally via [`advance_active_time`] once the character is
/// revealed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CharAttr {
    /// Seconds this attribute has been current, accumulated by the host.
    pub active_time: f32,
    /// Quake parameters when the quake effect is open.
    pub quake: Option<QuakeParams>,
    /// Shout parameters when the shout effect is open.
    pub shout: Option<ShoutParams>,
    /// Whether the fade effect is open.
    pub fade: bool,
}

impl CharAttr {
    /// Whether any effect applies to this character.
    pub fn is_animated(&self) -> bool {
        self.quake.is_some() || self.shout.is_some() || self.fade
    }
}

/// Advance the active time of already-revealed characters by `dt` seconds.
///
/// Callers slice to the revealed prefix (`&mut attrs[..visible]`), keeping
/// frame-time access out of the compiled data structures.
pub fn advance_active_time(attrs: &mut [CharAttr], dt: f32) {
    for attr in attrs {
        attr.active_time += dt;
    }
}
