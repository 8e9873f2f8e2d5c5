use std::ops::Range;

/// Borrowed view over a byte range of the compiler's source text.
///
/// Spans never allocate; lexing and tag parsing pass these around instead of
/// substring copies. Anything that survives a compile call is copied into the
/// owned [`crate::Script`], so spans never cross the compile/playback boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span<'a> {
    source: &'a str,
    start: usize,
    end: usize, // exclusive
}

impl<'a> Span<'a> {
    /// View over `source[start..end]`. Offsets must lie on char boundaries.
    pub fn new(source: &'a str, start: usize, end: usize) -> Self {
        debug_assert!(start <= end && end <= source.len());
        debug_assert!(source.is_char_boundary(start) && source.is_char_boundary(end));
        Self { source, start, end }
    }

    /// View over the whole source string.
    pub fn whole(source: &'a str) -> Self {
        Self::new(source, 0, source.len())
    }

    /// Byte offset of the first spanned character in the source.
    pub fn start(self) -> usize {
        self.start
    }

    /// Exclusive byte offset of the end of the span.
    pub fn end(self) -> usize {
        self.end
    }

    /// Spanned length in bytes.
    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no characters.
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// The spanned text.
    pub fn as_str(self) -> &'a str {
        &self.source[self.start..self.end]
    }

    /// The full source string this span borrows from.
    pub fn source(self) -> &'a str {
        self.source
    }

    /// Sub-span over a byte range relative to this span's start.
    pub fn slice(self, range: Range<usize>) -> Span<'a> {
        Span::new(self.source, self.start + range.start, self.start + range.end)
    }

    /// Span with leading and trailing whitespace removed.
    pub fn trim(self) -> Span<'a> {
        let s = self.as_str();
        let trimmed = s.trim_start();
        let lead = s.len() - trimmed.len();
        let trimmed = trimmed.trim_end();
        Span::new(self.source, self.start + lead, self.start + lead + trimmed.len())
    }

    /// First spanned character, if any.
    pub fn first(self) -> Option<char> {
        self.as_str().chars().next()
    }

    /// Iterator over the spanned characters.
    pub fn chars(self) -> std::str::Chars<'a> {
        self.as_str().chars()
    }
}
