/// A single lexical unit of the input stream.
///
/// Tokens own their payloads so the scanner can splice synthesized `Key` and
/// `BlockMappingStart` tokens into the middle of its queue without
/// borrowing from the character buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A `%NAME param param` line before a document.
    Directive { name: String, params: Vec<String> },
    /// The `---` document indicator.
    DocumentStart,
    /// The `...` document indicator.
    DocumentEnd,
    /// Start of an indentation-structured sequence. Synthesized; has no
    /// literal spelling.
    BlockSequenceStart,
    /// Start of an indentation-structured mapping. Synthesized.
    BlockMappingStart,
    /// End of an indentation-structured collection. Synthesized when the
    /// indentation level closes.
    BlockEnd,
    /// The `[` token.
    FlowSequenceStart,
    /// The `]` token.
    FlowSequenceEnd,
    /// The `{` token.
    FlowMappingStart,
    /// The `}` token.
    FlowMappingEnd,
    /// The `- ` block entry indicator.
    BlockEntry,
    /// The `,` separator inside flow collections.
    FlowEntry,
    /// The `? ` explicit key indicator, or a synthesized marker spliced in
    /// front of a simple key.
    Key,
    /// The `:` value indicator.
    Value,
    /// The `&name` property.
    Anchor(String),
    /// The `*name` reference.
    Alias(String),
    /// A `!handle!suffix` tag property. Verbatim `!<uri>` tags are carried
    /// with an empty handle.
    Tag { handle: String, suffix: String },
    /// Scalar content in any of the five styles.
    Scalar { value: String, style: ScalarStyle },
    /// End of input; always the last token.
    StreamEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

impl Token {
    #[inline]
    pub fn scalar(value: &str, style: ScalarStyle) -> Self {
        Self::Scalar {
            value: value.to_owned(),
            style,
        }
    }

    #[inline]
    pub fn plain(value: &str) -> Self {
        Self::scalar(value, ScalarStyle::Plain)
    }

    #[inline]
    pub fn single_quoted(value: &str) -> Self {
        Self::scalar(value, ScalarStyle::SingleQuoted)
    }

    #[inline]
    pub fn double_quoted(value: &str) -> Self {
        Self::scalar(value, ScalarStyle::DoubleQuoted)
    }

    pub fn ty(&self) -> TokenType {
        match self {
            Token::Directive { .. } => TokenType::Directive,
            Token::DocumentStart => TokenType::DocumentStart,
            Token::DocumentEnd => TokenType::DocumentEnd,
            Token::BlockSequenceStart => TokenType::BlockSequenceStart,
            Token::BlockMappingStart => TokenType::BlockMappingStart,
            Token::BlockEnd => TokenType::BlockEnd,
            Token::FlowSequenceStart => TokenType::FlowSequenceStart,
            Token::FlowSequenceEnd => TokenType::FlowSequenceEnd,
            Token::FlowMappingStart => TokenType::FlowMappingStart,
            Token::FlowMappingEnd => TokenType::FlowMappingEnd,
            Token::BlockEntry => TokenType::BlockEntry,
            Token::FlowEntry => TokenType::FlowEntry,
            Token::Key => TokenType::Key,
            Token::Value => TokenType::Value,
            Token::Anchor(_) => TokenType::Anchor,
            Token::Alias(_) => TokenType::Alias,
            Token::Tag { .. } => TokenType::Tag,
            Token::Scalar { style, .. } => TokenType::Scalar(*style),
            Token::StreamEnd => TokenType::StreamEnd,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenType {
    Directive,
    DocumentStart,
    DocumentEnd,
    BlockSequenceStart,
    BlockMappingStart,
    BlockEnd,
    FlowSequenceStart,
    FlowSequenceEnd,
    FlowMappingStart,
    FlowMappingEnd,
    BlockEntry,
    FlowEntry,
    Key,
    Value,
    Anchor,
    Alias,
    Tag,
    Scalar(ScalarStyle),
    StreamEnd,
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Directive => f.write_str("directive"),
            TokenType::DocumentStart => f.write_str("document start '---'"),
            TokenType::DocumentEnd => f.write_str("document end '...'"),
            TokenType::BlockSequenceStart => f.write_str("block sequence start"),
            TokenType::BlockMappingStart => f.write_str("block mapping start"),
            TokenType::BlockEnd => f.write_str("block end"),
            TokenType::FlowSequenceStart => f.write_str("flow sequence start '['"),
            TokenType::FlowSequenceEnd => f.write_str("flow sequence end ']'"),
            TokenType::FlowMappingStart => f.write_str("flow mapping start '{'"),
            TokenType::FlowMappingEnd => f.write_str("flow mapping end '}'"),
            TokenType::BlockEntry => f.write_str("block entry '-'"),
            TokenType::FlowEntry => f.write_str("flow entry ','"),
            TokenType::Key => f.write_str("key indicator"),
            TokenType::Value => f.write_str("value indicator ':'"),
            TokenType::Anchor => f.write_str("anchor"),
            TokenType::Alias => f.write_str("alias"),
            TokenType::Tag => f.write_str("tag"),
            TokenType::Scalar(ScalarStyle::Plain) => f.write_str("plain scalar"),
            TokenType::Scalar(ScalarStyle::SingleQuoted) => f.write_str("single-quoted scalar"),
            TokenType::Scalar(ScalarStyle::DoubleQuoted) => f.write_str("double-quoted scalar"),
            TokenType::Scalar(ScalarStyle::Literal) => f.write_str("literal block scalar"),
            TokenType::Scalar(ScalarStyle::Folded) => f.write_str("folded block scalar"),
            TokenType::StreamEnd => f.write_str("end of stream"),
        }
    }
}
