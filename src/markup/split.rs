use crate::foundation::span::Span;

/// Split a value span on a separator, collapsing separator runs.
///
/// Used for multi-argument tag values like `quake=1,2`. The source is trimmed
/// first and empty fields are never yielded, matching how `wait= 0.5 ` and
/// `shout=1,,2` should read.
pub fn split(span: Span<'_>, sep: char) -> Split<'_> {
    Split {
        span: span.trim(),
        pos: 0,
        sep,
    }
}

/// Iterator over the non-empty fields of a split span.
#[derive(Clone, Debug)]
pub struct Split<'a> {
    span: Span<'a>,
    pos: usize,
    sep: char,
}

impl<'a> Iterator for Split<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Span<'a>> {
        let s = self.span.as_str();
        let rest = &s[self.pos..];
        let skipped = rest.len() - rest.trim_start_matches(self.sep).len();
        let start = self.pos + skipped;
        if start >= s.len() {
            return None;
        }

        let end = match s[start..].find(self.sep) {
            Some(i) => start + i,
            None => s.len(),
        };
        self.pos = end;
        Some(self.span.slice(start..end))
    }
}
