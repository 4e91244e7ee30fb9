pub(crate) trait CharExt {
    fn is_break(self) -> bool;
    fn is_blank(self) -> bool;
    fn is_blank_or_break(self) -> bool;
    fn is_flow_indicator(self) -> bool;
    fn is_anchor_char(self) -> bool;
    fn is_tag_char(self) -> bool;
    fn is_word_char(self) -> bool;
}

impl CharExt for char {
    #[inline]
    fn is_break(self) -> bool {
        matches!(self, '\n' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}')
    }

    #[inline]
    fn is_blank(self) -> bool {
        self == ' ' || self == '\t'
    }

    #[inline]
    fn is_blank_or_break(self) -> bool {
        self.is_blank() || self.is_break()
    }

    #[inline]
    fn is_flow_indicator(self) -> bool {
        matches!(self, ',' | '[' | ']' | '{' | '}')
    }

    /// Anchor and alias names exclude whitespace and flow indicators.
    #[inline]
    fn is_anchor_char(self) -> bool {
        !self.is_blank_or_break() && !self.is_flow_indicator()
    }

    /// Characters permitted in a tag shorthand suffix or verbatim tag.
    /// Flow indicators are excluded so that tags terminate properly inside
    /// `[...]` and `{...}`; a verbatim `!<uri>` form is available for tags
    /// that genuinely need them.
    #[inline]
    fn is_tag_char(self) -> bool {
        self.is_ascii_alphanumeric()
            || matches!(
                self,
                '-' | ';' | '/' | '?' | ':' | '@' | '&' | '=' | '+' | '$' | '_' | '.' | '~' | '*'
                    | '\'' | '(' | ')' | '%' | ',' | '!'
            )
    }

    /// Characters permitted in a `%TAG` handle between the `!`s.
    #[inline]
    fn is_word_char(self) -> bool {
        self.is_ascii_alphanumeric() || self == '-'
    }
}

/// Lookahead positions are `Option<char>`, with `None` marking the end of
/// the stream. These helpers treat EOF as a terminator class, which is what
/// nearly every scanner rule wants.
pub(crate) trait PeekExt {
    fn is_breakz(self) -> bool;
    fn is_blankz(self) -> bool;
}

impl PeekExt for Option<char> {
    #[inline]
    fn is_breakz(self) -> bool {
        match self {
            Some(ch) => ch.is_break(),
            None => true,
        }
    }

    #[inline]
    fn is_blankz(self) -> bool {
        match self {
            Some(ch) => ch.is_blank_or_break(),
            None => true,
        }
    }
}
