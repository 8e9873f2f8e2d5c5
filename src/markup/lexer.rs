use crate::foundation::span::Span;

/// Kind of a lexer token. Markup kinds carry their delimiters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// `<...>` tag markup.
    Tag,
    /// `&...;` character entity.
    Entity,
    /// `{...}` variable reference.
    Variable,
    /// Anything between markup spans.
    Text,
}

/// One lexer token: a kind plus the exact source span it covers.
#[derive(Clone, Copy, Debug)]
pub struct Token<'a> {
    /// Token classification.
    pub kind: TokenKind,
    /// Covered source region, delimiters included.
    pub span: Span<'a>,
}

/// Splits tagged source text into alternating markup and plain-text tokens.
///
/// Tokens cover the source exactly, with no gaps and no overlaps: concatenating
/// `token.span.as_str()` in order reconstructs the input. A markup token begins
/// at one of `<`, `&`, `{` and ends inclusively at its matching close character,
/// or at end of input when unterminated (not an error at this level). The lexer
/// is restartable: each [`Lexer::tokens`] call yields a fresh iteration.
#[derive(Clone, Copy, Debug)]
pub struct Lexer<'a> {
    source: &'a str,
}

impl<'a> Lexer<'a> {
    /// Lexer over `source`.
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Fresh token iteration over the whole source.
    pub fn tokens(&self) -> Tokens<'a> {
        Tokens {
            source: self.source,
            pos: 0,
        }
    }
}

fn open_kind(c: char) -> Option<(TokenKind, char)> {
    match c {
        '<' => Some((TokenKind::Tag, '>')),
        '&' => Some((TokenKind::Entity, ';')),
        '{' => Some((TokenKind::Variable, '}')),
        _ => None,
    }
}

/// Iterator state for one pass over the source.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.pos >= self.source.len() {
            return None;
        }

        let rest = &self.source[self.pos..];
        let first = rest.chars().next()?;
        let start = self.pos;

        let (kind, end) = match open_kind(first) {
            Some((kind, close)) => {
                let body = &rest[first.len_utf8()..];
                let end = match body.find(close) {
                    Some(i) => self.pos + first.len_utf8() + i + close.len_utf8(),
                    None => self.source.len(), // unterminated markup runs to EOF
                };
                (kind, end)
            }
            None => {
                let end = match rest.find(['<', '&', '{']) {
                    Some(i) => self.pos + i,
                    None => self.source.len(),
                };
                (TokenKind::Text, end)
            }
        };

        self.pos = end;
        Some(Token {
            kind,
            span: Span::new(self.source, start, end),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/markup/lexer.rs"]
mod tests;
