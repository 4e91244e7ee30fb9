/// A position in the source stream.
///
/// `offset` is a byte offset into the raw input, before any decoding, so it
/// points into the user's file regardless of encoding; `line` and `column`
/// count decoded characters. All three count from zero. The derived
/// ordering compares offsets first, which is the stream order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mark {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Mark {
    /// Advance past `ch`, which occupied `width` bytes in the source
    /// encoding. YAML counts `\n`, `\r`, U+0085, U+2028, and U+2029 as
    /// line breaks, and `"\r\n"` as a single one; the caller passes the
    /// upcoming character in `next` so the pair can be collapsed.
    pub(crate) fn advance(&mut self, ch: char, width: usize, next: Option<char>) {
        self.offset += width;
        let is_break = match ch {
            '\r' => next != Some('\n'),
            '\n' | '\u{85}' | '\u{2028}' | '\u{2029}' => true,
            _ => false,
        };
        if is_break {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    /// Directives and document indicators are only recognized in this
    /// position.
    #[inline]
    pub fn at_line_start(&self) -> bool {
        self.column == 0
    }

    /// The span from this position up to (but not including) `end`.
    #[inline]
    pub fn to(self, end: Mark) -> Span {
        Span { start: self, end }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line + 1, self.column + 1)
    }
}

/// The source range a token or event was read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Mark,
    pub end: Mark,
}

impl Span {
    /// A zero-width span. Synthesized tokens that have no spelling in the
    /// input, such as a spliced `Key` or an indentation-closing `BlockEnd`,
    /// carry one of these at the position that triggered them.
    #[inline]
    pub fn point(mark: Mark) -> Self {
        Self {
            start: mark,
            end: mark,
        }
    }
}

/// A value together with the span it was read from.
#[derive(Debug, Clone, Copy)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Where the value started; the mark reported in diagnostics.
    #[inline]
    pub fn mark(&self) -> Mark {
        self.span.start
    }
}

pub(crate) trait SpannedExt {
    fn in_span(self, span: Span) -> Spanned<Self>
    where
        Self: Sized,
    {
        Spanned { value: self, span }
    }
}

impl<T> SpannedExt for T {}
