use std::collections::HashMap;

use crate::compile::compiler::Compiler;
use crate::compile::script::{Command, PageSpan, Script};
use crate::foundation::error::{TypeflowError, TypeflowResult};

/// Playback state machine phases.
///
/// `Empty → Paused → Playing → {Paused, Waiting, Finished}`. `Waiting` is
/// entered automatically when a page's commands run out and more pages remain;
/// `Finished` when the last page runs out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayState {
    /// Post-construction / post-clear, nothing loaded.
    Empty,
    /// Text is loaded but the timeline is not advancing.
    Paused,
    /// The timeline advances on every [`Player::tick`].
    Playing,
    /// Current page is fully revealed; [`Player::next_page`] is legal.
    Waiting,
    /// The last page is fully revealed.
    Finished,
}

/// Tunable playback parameters.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct PlayerSettings {
    /// Default delay between character reveals, in seconds.
    pub default_wait: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self { default_wait: 0.05 }
    }
}

type CallbackFn = Box<dyn FnMut(&str)>;
type PutFn = Box<dyn FnMut(usize)>;

/// Real-time playback engine over a compiled [`Script`].
///
/// Owns a [`Compiler`] so `set_text` is a single call; everything is driven
/// synchronously from the host's per-frame `tick`. No threads, no blocking.
pub struct Player {
    compiler: Compiler,
    settings: PlayerSettings,
    script: Script,
    state: PlayState,
    page_index: usize,
    cursor: usize, // absolute index into script.commands
    wait: f32,
    wait_scale: f32,
    elapsed: f32,
    visible: usize, // revealed characters within the current page
    callbacks: HashMap<String, CallbackFn>,
    put_hook: Option<PutFn>,
}

impl Player {
    /// Player with default settings.
    pub fn new(compiler: Compiler) -> Self {
        Self::with_settings(compiler, PlayerSettings::default())
    }

    /// Player with explicit settings.
    pub fn with_settings(compiler: Compiler, settings: PlayerSettings) -> Self {
        Self {
            compiler,
            settings,
            script: Script::default(),
            state: PlayState::Empty,
            page_index: 0,
            cursor: 0,
            wait: 0.0,
            wait_scale: 1.0,
            elapsed: 0.0,
            visible: 0,
            callbacks: HashMap::new(),
            put_hook: None,
        }
    }

    /// Compile `text` and load it for playback, discarding any in-flight
    /// state. Lands in `Paused`; `auto_play` proceeds straight to `Playing`.
    #[tracing::instrument(skip(self, text))]
    pub fn set_text(&mut self, text: &str, auto_play: bool) -> TypeflowResult<()> {
        self.clear();
        self.script = self.compiler.compile(text)?;
        self.state = PlayState::Paused;
        if auto_play {
            self.play();
        }
        Ok(())
    }

    /// Resume the timeline. Only legal (and only effective) from `Paused`.
    pub fn play(&mut self) {
        if self.state == PlayState::Paused {
            self.state = PlayState::Playing;
        }
    }

    /// Halt the timeline without losing position.
    pub fn pause(&mut self) {
        if self.state == PlayState::Playing {
            self.state = PlayState::Paused;
        }
    }

    /// Drop the loaded script and all playback state.
    pub fn clear(&mut self) {
        self.script = Script::default();
        self.state = PlayState::Empty;
        self.page_index = 0;
        self.cursor = 0;
        self.wait = 0.0;
        self.wait_scale = 1.0;
        self.elapsed = 0.0;
        self.visible = 0;
    }

    /// Advance the timeline by `dt` seconds.
    ///
    /// While the accumulated time covers the pending wait (base value times
    /// the speed scale), commands are consumed: `Put` reveals characters and
    /// ends the tick's consumption, `Wait`/`Speed`/`Callback` chain without
    /// revealing anything. Exhausting the page's command slice transitions to
    /// `Waiting` or, on the last page, `Finished`.
    pub fn tick(&mut self, dt: f32) {
        if self.state != PlayState::Playing {
            return;
        }

        let page = self.current_page();
        let cmd_end = page.commands.start + page.commands.len;
        self.elapsed += dt;

        loop {
            if self.cursor >= cmd_end {
                self.finish_page();
                break;
            }
            if self.elapsed < self.wait * self.wait_scale {
                break;
            }
            self.elapsed = 0.0;

            let cmd = self.script.commands[self.cursor];
            self.cursor += 1;
            match cmd {
                Command::Put { count } => {
                    self.visible = (self.visible + count).min(page.attrs.len);
                    self.wait = self.settings.default_wait;
                    if let Some(hook) = &mut self.put_hook {
                        hook(self.visible);
                    }
                    break; // one reveal step per satisfied wait
                }
                Command::Wait { seconds } => {
                    self.wait = seconds;
                }
                Command::Speed { scale } => {
                    self.wait_scale = scale;
                }
                Command::Callback { index } => {
                    let param = &self.script.callbacks[index];
                    match self.callbacks.get_mut(&param.name) {
                        Some(handler) => handler(&param.value),
                        None => {
                            tracing::warn!(tag = %param.name, "no callback registered; skipping");
                        }
                    }
                }
            }
        }
    }

    /// Reveal the rest of the current page immediately.
    ///
    /// Moves the cursor to the end of the page's command slice without forcing
    /// a state transition; the transition happens naturally on the next tick.
    pub fn skip_all(&mut self) {
        if self.state == PlayState::Empty {
            return;
        }
        let page = self.current_page();
        self.visible = page.attrs.len;
        self.cursor = page.commands.start + page.commands.len;
        self.wait = 0.0;
    }

    /// Advance to the next page. Legal only in `Waiting`; returns whether a
    /// page turn happened. Per-page timers and the visible count reset; the
    /// speed scale persists across pages.
    pub fn next_page(&mut self) -> bool {
        if self.state != PlayState::Waiting {
            return false;
        }
        self.page_index += 1;
        let page = self.current_page();
        self.cursor = page.commands.start;
        self.visible = 0;
        self.wait = 0.0;
        self.elapsed = 0.0;
        self.state = PlayState::Playing;
        true
    }

    /// Register a handler for a callback tag name. At most one handler per
    /// name; registering twice is an error.
    pub fn register_callback(
        &mut self,
        name: impl Into<String>,
        handler: impl FnMut(&str) + 'static,
    ) -> TypeflowResult<()> {
        let name = name.into();
        if self.callbacks.contains_key(&name) {
            return Err(TypeflowError::playback(format!(
                "callback '{name}' registered twice"
            )));
        }
        self.callbacks.insert(name, Box::new(handler));
        Ok(())
    }

    /// Install the global per-reveal hook, invoked with the new visible count
    /// after every `Put`. At most one; setting twice is an error.
    pub fn set_put_callback(&mut self, hook: impl FnMut(usize) + 'static) -> TypeflowResult<()> {
        if self.put_hook.is_some() {
            return Err(TypeflowError::playback("put callback set twice"));
        }
        self.put_hook = Some(Box::new(hook));
        Ok(())
    }

    /// Current playback phase.
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Whether the timeline is actively advancing.
    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Whether playback is halted but loaded.
    pub fn is_paused(&self) -> bool {
        self.state == PlayState::Paused
    }

    /// Whether the current page is done and more pages remain.
    pub fn is_waiting(&self) -> bool {
        self.state == PlayState::Waiting
    }

    /// Whether the last page is done.
    pub fn is_finished(&self) -> bool {
        self.state == PlayState::Finished
    }

    /// Whether a script is loaded and not yet finished.
    pub fn is_streaming(&self) -> bool {
        !matches!(self.state, PlayState::Empty | PlayState::Finished)
    }

    /// Revealed character count within the current page. The renderer caps
    /// its visible characters at this value each frame.
    pub fn visible_chars(&self) -> usize {
        self.visible
    }

    /// Index of the page currently playing.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// The loaded script.
    pub fn script(&self) -> &Script {
        &self.script
    }

    /// Mutable access to the loaded script, for active-time accumulation.
    pub fn script_mut(&mut self) -> &mut Script {
        &mut self.script
    }

    fn current_page(&self) -> PageSpan {
        self.script
            .pages
            .get(self.page_index)
            .copied()
            .unwrap_or_default()
    }

    fn finish_page(&mut self) {
        if self.page_index + 1 < self.script.pages.len() {
            self.state = PlayState::Waiting;
        } else {
            self.state = PlayState::Finished;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/player.rs"]
mod tests;
