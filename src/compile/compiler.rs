use std::collections::{BTreeSet, HashMap};

use crate::compile::attr::{CharAttr, EffectKind, QuakeParams, ShoutParams};
use crate::compile::script::{CallbackParam, Command, PageSpan, Script, SliceSpan};
use crate::foundation::error::{TypeflowError, TypeflowResult};
use crate::foundation::span::Span;
use crate::markup::entity;
use crate::markup::lexer::{Lexer, TokenKind};
use crate::markup::number;
use crate::markup::split::split;
use crate::markup::tag::Tag;

/// Text-width measurement collaborator, used only for ruby layout.
///
/// `formatted` may contain renderer markup (`<size=50%>…</size>`); the host's
/// text engine is expected to measure the rendered width of the visible text.
/// Must be idempotent for identical input.
pub trait MeasureText {
    /// Preferred rendered width of `formatted`, in the host's layout units.
    fn preferred_width(&self, formatted: &str) -> f32;
}

/// Crude built-in measurer: every visible character is one `char_width` wide.
///
/// Characters inside `<...>` runs are skipped. Good enough for headless use
/// and tests; hosts with a real text engine supply their own [`MeasureText`].
#[derive(Clone, Copy, Debug)]
pub struct MonospaceMeasure {
    /// Width assigned to each visible character.
    pub char_width: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { char_width: 1.0 }
    }
}

impl MeasureText for MonospaceMeasure {
    fn preferred_width(&self, formatted: &str) -> f32 {
        let mut in_tag = false;
        let mut count = 0usize;
        for c in formatted.chars() {
            match c {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => count += 1,
                _ => {}
            }
        }
        count as f32 * self.char_width
    }
}

/// Variable-substitution collaborator for `{name}` tokens.
///
/// May append arbitrary characters or markup into the in-progress script via
/// the [`Emit`] facade. Must be idempotent for identical input.
pub trait ResolveVariable {
    /// Expand the variable `name` into the output.
    fn resolve(&mut self, name: &str, out: &mut Emit<'_>) -> TypeflowResult<()>;
}

/// Pluggable processor for a custom tag name.
pub trait TagHandler {
    /// Handle one occurrence of the tag; `value` is the trimmed `=` argument.
    fn handle(&mut self, value: Option<&str>, out: &mut Emit<'_>) -> TypeflowResult<()>;
}

/// Name sets controlling how otherwise-unknown tags compile.
///
/// Passed into the compiler's constructor rather than living in global state,
/// which keeps tests hermetic. Tags in `through` are copied verbatim into the
/// buffer as invisible characters for the renderer (e.g. color tags); tags in
/// `callback` compile to [`Command::Callback`] entries and produce no buffer
/// output. Everything else not handled by a registered [`TagHandler`] is a
/// fatal compile error.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct TagConfig {
    /// Pass-through tag names.
    #[serde(default)]
    pub through: BTreeSet<String>,
    /// Callback tag names.
    #[serde(default)]
    pub callback: BTreeSet<String>,
}

/// Append facade handed to [`TagHandler`]s and [`ResolveVariable`]s.
///
/// Everything appended lands in the in-progress script exactly as if the
/// compiler had produced it: visible characters carry the current attribute
/// snapshot and one `Put` each, markup is invisible.
pub struct Emit<'a> {
    sink: &'a mut Sink,
}

impl Emit<'_> {
    /// Append one visible character with the current attribute snapshot.
    pub fn visible_char(&mut self, c: char) {
        self.sink.put_visible(c);
    }

    /// Append every character of `s` as visible text.
    pub fn visible_str(&mut self, s: &str) {
        for c in s.chars() {
            self.sink.put_visible(c);
        }
    }

    /// Append raw markup: written to the buffer, revealed with no delay.
    pub fn markup(&mut self, s: &str) {
        self.sink.markup_str(s);
    }

    /// Append a pause of `seconds` to the command stream.
    pub fn wait(&mut self, seconds: f32) {
        self.sink.command(Command::Wait { seconds });
    }
}

#[derive(Debug, Default)]
struct PageCursor {
    buffer: usize,
    attrs: usize,
    commands: usize,
    callbacks: usize,
}

#[derive(Debug)]
struct RubyOpen {
    text: String,
    body_start: usize, // byte offset just past the open tag
}

/// In-progress compile state. Dropped wholesale on error, so a failed compile
/// never publishes a partial script.
#[derive(Debug, Default)]
struct Sink {
    script: Script,
    current: CharAttr,
    ruby: Option<RubyOpen>,
    page: PageCursor,
}

impl Sink {
    fn put_visible(&mut self, c: char) {
        self.visible_no_command(c);
        self.command(Command::Put { count: 1 });
    }

    fn visible_no_command(&mut self, c: char) {
        self.script.buffer.push(c);
        self.script.attrs.push(self.current);
    }

    fn markup_str(&mut self, s: &str) {
        self.script.buffer.push_str(s);
    }

    fn command(&mut self, cmd: Command) {
        self.script.commands.push(cmd);
    }

    fn close_page(&mut self) {
        let span = |start: usize, end: usize| SliceSpan {
            start,
            len: end - start,
        };
        self.script.pages.push(PageSpan {
            buffer: span(self.page.buffer, self.script.buffer.len()),
            attrs: span(self.page.attrs, self.script.attrs.len()),
            commands: span(self.page.commands, self.script.commands.len()),
            callbacks: span(self.page.callbacks, self.script.callbacks.len()),
        });
        self.page = PageCursor {
            buffer: self.script.buffer.len(),
            attrs: self.script.attrs.len(),
            commands: self.script.commands.len(),
            callbacks: self.script.callbacks.len(),
        };
    }
}

/// Compiles tagged dialogue text into a [`Script`].
///
/// The compiler owns its tag registration and collaborators; each
/// [`Compiler::compile`] call is all-or-nothing and leaves no partial state
/// behind on failure.
pub struct Compiler {
    config: TagConfig,
    measure: Box<dyn MeasureText>,
    variables: Option<Box<dyn ResolveVariable>>,
    handlers: HashMap<String, Box<dyn TagHandler>>,
}

impl Compiler {
    /// Compiler with the given tag registration and the built-in measurer.
    pub fn new(config: TagConfig) -> Self {
        Self {
            config,
            measure: Box::new(MonospaceMeasure::default()),
            variables: None,
            handlers: HashMap::new(),
        }
    }

    /// Replace the text-width measurement collaborator.
    pub fn with_measurer(mut self, measure: Box<dyn MeasureText>) -> Self {
        self.measure = measure;
        self
    }

    /// Install the variable-substitution collaborator.
    pub fn with_variables(mut self, variables: Box<dyn ResolveVariable>) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Register a custom processor for `name`. Registering a name twice is an
    /// error.
    pub fn register_handler(
        &mut self,
        name: impl Into<String>,
        handler: Box<dyn TagHandler>,
    ) -> TypeflowResult<()> {
        let name = name.into();
        if self.handlers.contains_key(&name) {
            return Err(TypeflowError::compile(format!(
                "tag handler '{name}' registered twice"
            )));
        }
        self.handlers.insert(name, handler);
        Ok(())
    }

    /// Compile `source` into a fresh [`Script`].
    #[tracing::instrument(skip(self, source))]
    pub fn compile(&mut self, source: &str) -> TypeflowResult<Script> {
        let mut sink = Sink::default();

        for token in Lexer::new(source).tokens() {
            match token.kind {
                TokenKind::Tag => self.process_tag(source, token.span, &mut sink)?,
                TokenKind::Entity => {
                    if sink.ruby.is_none() {
                        let c = entity::decode(token.span)?;
                        sink.put_visible(c);
                    }
                }
                TokenKind::Variable => {
                    if sink.ruby.is_none() {
                        self.variable(token.span, &mut sink)?;
                    }
                }
                TokenKind::Text => {
                    if sink.ruby.is_none() {
                        for c in token.span.chars() {
                            sink.put_visible(c);
                        }
                    }
                }
            }
        }

        if sink.ruby.is_some() {
            return Err(TypeflowError::compile("<ruby> is never closed"));
        }
        for kind in [EffectKind::Quake, EffectKind::Shout, EffectKind::Fade] {
            if effect_is_open(&sink.current, kind) {
                return Err(TypeflowError::compile(format!(
                    "<{}> is never closed",
                    kind.tag_name()
                )));
            }
        }

        // Implicit final page break, guaranteeing at least one page.
        sink.close_page();
        Ok(sink.script)
    }

    fn process_tag(
        &mut self,
        source: &str,
        span: Span<'_>,
        sink: &mut Sink,
    ) -> TypeflowResult<()> {
        let tag = Tag::parse(span)?;
        let name = tag.name.as_str();

        match name {
            "wait" if !tag.is_close => {
                let seconds = single_value(&tag, "wait")?;
                sink.command(Command::Wait { seconds });
                Ok(())
            }
            "speed" if !tag.is_close => {
                let factor = single_value(&tag, "speed")?;
                if factor <= 0.0 {
                    return Err(TypeflowError::compile("<speed> factor must be > 0"));
                }
                // factor 2 halves the per-character wait.
                sink.command(Command::Speed {
                    scale: 1.0 / factor,
                });
                Ok(())
            }
            "break" if !tag.is_close => {
                sink.close_page();
                Ok(())
            }
            "quake" => self.effect_tag(EffectKind::Quake, &tag, sink),
            "shout" => self.effect_tag(EffectKind::Shout, &tag, sink),
            "fade" => self.effect_tag(EffectKind::Fade, &tag, sink),
            "ruby" => self.ruby_tag(source, &tag, span, sink),
            _ => {
                if self.config.through.contains(name) {
                    // Both open and close forms pass through for the renderer.
                    sink.markup_str(span.as_str());
                    Ok(())
                } else if self.config.callback.contains(name) && !tag.is_close {
                    let index = sink.script.callbacks.len();
                    sink.script.callbacks.push(CallbackParam {
                        name: name.to_string(),
                        value: tag.value.map(|v| v.as_str().to_string()).unwrap_or_default(),
                    });
                    sink.command(Command::Callback { index });
                    Ok(())
                } else if let Some(handler) = self.handlers.get_mut(name) {
                    let value = tag.value.map(|v| v.as_str());
                    handler.handle(value, &mut Emit { sink })
                } else {
                    Err(TypeflowError::markup(format!(
                        "invalid tag '<{name}>' in \"{source}\""
                    )))
                }
            }
        }
    }

    fn effect_tag(&self, kind: EffectKind, tag: &Tag<'_>, sink: &mut Sink) -> TypeflowResult<()> {
        if tag.is_close {
            let was_open = match kind {
                EffectKind::Quake => sink.current.quake.take().is_some(),
                EffectKind::Shout => sink.current.shout.take().is_some(),
                EffectKind::Fade => std::mem::take(&mut sink.current.fade),
            };
            if !was_open {
                return Err(TypeflowError::compile(format!(
                    "</{}> without a matching open tag",
                    kind.tag_name()
                )));
            }
            return Ok(());
        }

        if effect_is_open(&sink.current, kind) {
            return Err(TypeflowError::compile(format!(
                "<{}> opened twice without an intervening close",
                kind.tag_name()
            )));
        }
        let args = float_args(tag)?;
        match kind {
            EffectKind::Quake => sink.current.quake = Some(QuakeParams::from_args(&args)),
            EffectKind::Shout => sink.current.shout = Some(ShoutParams::from_args(&args)),
            EffectKind::Fade => sink.current.fade = true,
        }
        Ok(())
    }

    fn ruby_tag(
        &mut self,
        source: &str,
        tag: &Tag<'_>,
        span: Span<'_>,
        sink: &mut Sink,
    ) -> TypeflowResult<()> {
        if tag.is_close {
            let open = sink
                .ruby
                .take()
                .ok_or_else(|| TypeflowError::compile("</ruby> without a matching open tag"))?;
            let body = &source[open.body_start..span.start()];
            self.emit_ruby(&open.text, body, sink);
            return Ok(());
        }

        if sink.ruby.is_some() {
            return Err(TypeflowError::compile("nested <ruby> tags are illegal"));
        }
        let text = tag.value.map(|v| v.as_str().to_string()).unwrap_or_default();
        sink.ruby = Some(RubyOpen {
            text,
            body_start: span.end(),
        });
        Ok(())
    }

    /// Lay out a closed ruby annotation: centered above its base text via the
    /// measurement collaborator, revealed so the annotation never appears
    /// half-shown.
    fn emit_ruby(&self, ruby: &str, body: &str, sink: &mut Sink) {
        let ruby_fmt = format!("<size=50%>{ruby}</size>");
        let ruby_w = self.measure.preferred_width(&ruby_fmt);
        let body_w = self.measure.preferred_width(body);

        let prefix = if body_w < ruby_w {
            (ruby_w - body_w) * 0.5
        } else {
            0.0
        };
        let offset0 = -(body_w + ruby_w) * 0.5;
        let offset1 = (body_w - ruby_w) * 0.5 + prefix;

        sink.markup_str(&format!("<space={prefix}>"));
        for c in body.chars() {
            sink.visible_no_command(c);
        }
        sink.markup_str(&format!("<space={offset0}><voffset=1em><size=50%>"));
        for c in ruby.chars() {
            sink.visible_no_command(c);
        }
        sink.markup_str(&format!("</size></voffset><space={offset1}>"));

        let body_n = body.chars().count();
        let ruby_n = ruby.chars().count();
        if body_n > 0 {
            for _ in 0..body_n - 1 {
                sink.command(Command::Put { count: 1 });
            }
            // Last body character absorbs the whole annotation in one step.
            sink.command(Command::Put { count: 1 + ruby_n });
        } else if ruby_n > 0 {
            sink.command(Command::Put { count: ruby_n });
        }
    }

    fn variable(&mut self, span: Span<'_>, sink: &mut Sink) -> TypeflowResult<()> {
        let s = span.as_str();
        let name = s.strip_prefix('{').unwrap_or(s);
        let name = name.strip_suffix('}').unwrap_or(name).trim();
        match &mut self.variables {
            Some(resolver) => resolver.resolve(name, &mut Emit { sink }),
            None => Err(TypeflowError::compile(format!(
                "no variable resolver configured for '{{{name}}}'"
            ))),
        }
    }
}

fn effect_is_open(attr: &CharAttr, kind: EffectKind) -> bool {
    match kind {
        EffectKind::Quake => attr.quake.is_some(),
        EffectKind::Shout => attr.shout.is_some(),
        EffectKind::Fade => attr.fade,
    }
}

fn single_value(tag: &Tag<'_>, name: &str) -> TypeflowResult<f32> {
    let value = tag
        .value
        .ok_or_else(|| TypeflowError::compile(format!("<{name}> requires a value")))?;
    let mut fields = split(value, ' ');
    let first = fields
        .next()
        .ok_or_else(|| TypeflowError::compile(format!("<{name}> requires a value")))?;
    if fields.next().is_some() {
        return Err(TypeflowError::compile(format!(
            "<{name}> takes exactly one value"
        )));
    }
    number::parse_f32(first)
}

fn float_args(tag: &Tag<'_>) -> TypeflowResult<Vec<f32>> {
    match tag.value {
        None => Ok(Vec::new()),
        Some(value) => split(value, ',').map(number::parse_f32).collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
