use crate::compile::attr::CharAttr;
use crate::foundation::error::{TypeflowError, TypeflowResult};

/// One step of the timed reveal stream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Reveal `count` more visible characters.
    Put {
        /// Characters revealed by this step.
        count: usize,
    },
    /// Pause before the next step.
    Wait {
        /// Pause duration in seconds.
        seconds: f32,
    },
    /// Multiply subsequent reveal delays by `scale`.
    Speed {
        /// Wait-time multiplier; `<speed=2>` compiles to `scale = 0.5`.
        scale: f32,
    },
    /// Invoke the registered handler for [`Script::callbacks`]`[index]`.
    Callback {
        /// Index into the callback-parameter table.
        index: usize,
    },
}

/// Name/value pair captured from a callback tag at compile time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackParam {
    /// Tag name the handler is registered under.
    pub name: String,
    /// Tag value passed to the handler (empty when the tag had none).
    pub value: String,
}

/// `(start, len)` pair locating a page's slice of one output array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SliceSpan {
    /// First element (buffer spans count bytes, the rest count records).
    pub start: usize,
    /// Number of elements.
    pub len: usize,
}

impl SliceSpan {
    pub(crate) fn range(self) -> std::ops::Range<usize> {
        self.start..self.start + self.len
    }
}

/// One page's slices over buffer, attributes, commands and callback params.
///
/// Pages partition all four arrays: contiguous, non-overlapping, in document
/// order. A page ends at an explicit `<break>` tag or at end of input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageSpan {
    /// Raw character buffer slice, in bytes.
    pub buffer: SliceSpan,
    /// Attribute array slice.
    pub attrs: SliceSpan,
    /// Command stream slice.
    pub commands: SliceSpan,
    /// Callback-parameter table slice.
    pub callbacks: SliceSpan,
}

/// Compiled output of one [`crate::Compiler::compile`] call.
///
/// Fully rebuilt on every compile; read-only afterwards (except the attribute
/// array, whose active times the host advances between frames).
#[derive(Clone, Debug, Default)]
pub struct Script {
    pub(crate) buffer: String,
    pub(crate) attrs: Vec<CharAttr>,
    pub(crate) commands: Vec<Command>,
    pub(crate) pages: Vec<PageSpan>,
    pub(crate) callbacks: Vec<CallbackParam>,
}

impl Script {
    /// Raw character buffer: visible characters plus pass-through markup.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Per-visible-character attribute records, in buffer order.
    pub fn attrs(&self) -> &[CharAttr] {
        &self.attrs
    }

    /// Mutable attribute records, for external active-time accumulation.
    pub fn attrs_mut(&mut self) -> &mut [CharAttr] {
        &mut self.attrs
    }

    /// The full command stream.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Page table. Always at least one page, even for empty input.
    pub fn pages(&self) -> &[PageSpan] {
        &self.pages
    }

    /// Callback-parameter table referenced by `Command::Callback`.
    pub fn callbacks(&self) -> &[CallbackParam] {
        &self.callbacks
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Slice for one page, or for the whole document when `page` is `None`.
    pub fn slice(&self, page: Option<usize>) -> TypeflowResult<ScriptSlice<'_>> {
        match page {
            None => Ok(ScriptSlice {
                text: &self.buffer,
                attrs: &self.attrs,
                commands: &self.commands,
                callbacks: &self.callbacks,
            }),
            Some(i) => {
                let span = self.pages.get(i).copied().ok_or_else(|| {
                    TypeflowError::playback(format!(
                        "page {i} out of range (have {})",
                        self.pages.len()
                    ))
                })?;
                Ok(ScriptSlice {
                    text: &self.buffer[span.buffer.range()],
                    attrs: &self.attrs[span.attrs.range()],
                    commands: &self.commands[span.commands.range()],
                    callbacks: &self.callbacks[span.callbacks.range()],
                })
            }
        }
    }
}

/// Borrowed view of one page (or the whole document) of a [`Script`].
#[derive(Clone, Copy, Debug)]
pub struct ScriptSlice<'a> {
    /// Raw buffer text for this page.
    pub text: &'a str,
    /// Attribute records for this page's visible characters.
    pub attrs: &'a [CharAttr],
    /// Commands driving this page's reveal.
    pub commands: &'a [Command],
    /// Callback params appended while compiling this page.
    pub callbacks: &'a [CallbackParam],
}
