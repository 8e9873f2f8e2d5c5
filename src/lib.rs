//! Typeflow renders dialogue-style rich text: tagged source strings become a
//! timed typewriter reveal with per-character visual effects.
//!
//! # Pipeline overview
//!
//! 1. **Compile**: [`Compiler::compile`] turns tagged text into a [`Script`]:
//!    a raw character buffer, a per-visible-character attribute array, an
//!    ordered command stream and a page table.
//! 2. **Playback**: [`Player`] walks the command stream in real time from the
//!    host's per-frame tick, revealing characters and firing callbacks.
//! 3. **Effects**: pure functions ([`Quaker`], [`shout_scale`], [`fade_alpha`])
//!    map each character's accumulated active time to offset/scale/alpha
//!    values an external renderer applies to its glyph quads.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: compilation is pure and stable for a given
//!   input; a failed compile publishes no partial state.
//! - **No IO, no globals**: tag registration and collaborators are passed into
//!   the compiler's constructor, keeping tests hermetic.
//! - **Single-threaded and frame-driven**: compile and tick are synchronous
//!   and non-blocking; the host owns the frame loop and the renderer.
#![forbid(unsafe_code)]

mod compile;
mod effects;
mod foundation;
mod markup;
mod playback;

pub use compile::attr::{CharAttr, EffectKind, QuakeParams, ShoutParams, advance_active_time};
pub use compile::compiler::{
    Compiler, Emit, MeasureText, MonospaceMeasure, ResolveVariable, TagConfig, TagHandler,
};
pub use compile::script::{CallbackParam, Command, PageSpan, Script, ScriptSlice, SliceSpan};
pub use effects::fade::{FADE_SPAN, FADE_TRAIL_DELAY, FadeAlpha, fade_alpha};
pub use effects::quake::Quaker;
pub use effects::shout::shout_scale;
pub use foundation::error::{TypeflowError, TypeflowResult};
pub use foundation::span::Span;
pub use markup::entity::decode as decode_entity;
pub use markup::lexer::{Lexer, Token, TokenKind, Tokens};
pub use markup::number::NumberLiteral;
pub use markup::split::{Split, split};
pub use markup::tag::Tag;
pub use playback::player::{PlayState, Player, PlayerSettings};

pub use kurbo::Vec2;
