use crate::foundation::error::{TypeflowError, TypeflowResult};
use crate::foundation::span::Span;

/// One decoded `<...>` markup span.
#[derive(Clone, Copy, Debug)]
pub struct Tag<'a> {
    /// Tag name (maximal alphabetic run after the optional `/`).
    pub name: Span<'a>,
    /// Whether the tag had a leading `/`.
    pub is_close: bool,
    /// Trimmed value after `=`, when present. Internal whitespace survives.
    pub value: Option<Span<'a>>,
}

impl<'a> Tag<'a> {
    /// Decode a `Tag`-kind lexer span, delimiters included.
    ///
    /// Whitespace anywhere inside the tag is tolerated (`<tag = 1 >`), and the
    /// value is trimmed of outer whitespace only, so `<wait=0 1 2>` keeps its
    /// internal spaces for the splitter. A tag with no discernible name is a
    /// fatal markup error.
    pub fn parse(span: Span<'a>) -> TypeflowResult<Tag<'a>> {
        let invalid = || TypeflowError::markup(format!("invalid tag '{}'", span.as_str()));

        let s = span.as_str();
        let body_start = if s.starts_with('<') { 1 } else { 0 };
        let body_end = if s.ends_with('>') { s.len() - 1 } else { s.len() };
        if body_start > body_end {
            return Err(invalid());
        }
        let inner = span.slice(body_start..body_end).trim();

        let mut rel = 0usize;
        let mut is_close = false;
        let mut chars = inner.as_str().char_indices().peekable();

        // Optional '/' with surrounding whitespace.
        while let Some(&(i, c)) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
            } else if c == '/' && !is_close {
                is_close = true;
                chars.next();
            } else {
                rel = i;
                break;
            }
        }

        let name_start = rel;
        let mut name_end = name_start;
        for (i, c) in chars.by_ref() {
            if c.is_alphabetic() {
                name_end = i + c.len_utf8();
            } else {
                rel = i;
                break;
            }
        }
        if name_end == name_start {
            return Err(invalid());
        }
        let name = inner.slice(name_start..name_end);

        // Anything after the name: optional whitespace, then '=' + value.
        let tail = inner.slice(name_end.max(rel)..inner.len());
        let tail_str = tail.as_str().trim_start();
        let value = match tail_str.strip_prefix('=') {
            Some(_) => {
                let eq = tail.as_str().len() - tail_str.len() + 1;
                Some(tail.slice(eq..tail.len()).trim())
            }
            None => None,
        };

        Ok(Tag {
            name,
            is_close,
            value,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/markup/tag.rs"]
mod tests;
