use std::collections::VecDeque;
use std::io::Read;

use crate::{
    chars::{CharExt, PeekExt},
    scalars,
    stream::Stream,
    Error, Mark, ParserError, ScalarStyle, ScannerError, Span, Spanned, SpannedExt, Token,
};

/// The tokenizer.
///
/// Tokens are produced into a queue rather than handed out directly because
/// recognizing a simple key is retroactive: only when a `:` arrives does the
/// scanner know that an earlier scalar was a key, at which point it splices
/// `Key` (and possibly `BlockMappingStart`) tokens into the queue at the
/// position the candidate was recorded. The queue front is released only
/// once no candidate could still splice in front of it.
pub struct Scanner<R> {
    stream: Stream<R>,
    tokens: VecDeque<Spanned<Token>>,
    /// Columns of the enclosing open block collections.
    indents: Vec<isize>,
    /// Column of the innermost open block collection, -1 at the root.
    indent: isize,
    /// Depth of `[...]`/`{...}` nesting; 0 means block context.
    flow_level: usize,
    /// One simple-key candidate per flow level.
    simple_keys: Vec<SimpleKey>,
    allow_simple_key: bool,
    /// Number of tokens handed out so far; queue indices are relative to it.
    tokens_popped: usize,
    stream_end_queued: bool,
}

#[derive(Clone, Copy, Default)]
struct SimpleKey {
    possible: bool,
    /// A key at the exact indentation of its block mapping must be followed
    /// by `:` on the same line.
    required: bool,
    /// Absolute token index where `Key` would be spliced.
    token_number: usize,
    mark: Mark,
}

impl<R: Read> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            stream: Stream::new(reader),
            tokens: VecDeque::new(),
            indents: Vec::new(),
            indent: -1,
            flow_level: 0,
            simple_keys: vec![SimpleKey::default()],
            allow_simple_key: true,
            tokens_popped: 0,
            stream_end_queued: false,
        }
    }

    pub fn peek_token(&mut self) -> Result<&Spanned<Token>, Error> {
        self.fetch_if_needed()?;
        match self.tokens.front() {
            Some(token) => Ok(token),
            None => Err(ScannerError::UnexpectedEof(self.stream.mark()).into()),
        }
    }

    pub fn pop_token(&mut self) -> Result<Spanned<Token>, Error> {
        self.fetch_if_needed()?;
        match self.tokens.pop_front() {
            Some(token) => {
                self.tokens_popped += 1;
                Ok(token)
            }
            None => Err(ScannerError::UnexpectedEof(self.stream.mark()).into()),
        }
    }

    fn fetch_if_needed(&mut self) -> Result<(), Error> {
        loop {
            if !self.tokens.is_empty() {
                self.stale_simple_keys()?;
                let front_blocked = self
                    .simple_keys
                    .iter()
                    .any(|sk| sk.possible && sk.token_number == self.tokens_popped);
                if !front_blocked {
                    return Ok(());
                }
            }
            if self.stream_end_queued {
                return Ok(());
            }
            self.fetch_next_token()?;
        }
    }

    /// A candidate dies when the line advances past it or it grows beyond
    /// 1024 characters; a required candidate dying this way is an error.
    fn stale_simple_keys(&mut self) -> Result<(), Error> {
        let mark = self.stream.mark();
        for sk in &mut self.simple_keys {
            if sk.possible && (sk.mark.line < mark.line || sk.mark.column + 1024 < mark.column) {
                if sk.required {
                    return Err(ParserError::EndOfMapping(sk.mark).into());
                }
                sk.possible = false;
            }
        }
        Ok(())
    }

    fn fetch_next_token(&mut self) -> Result<(), Error> {
        self.scan_to_next_token()?;
        self.stale_simple_keys()?;

        let mark = self.stream.mark();
        self.unroll_indent(mark.column as isize);

        let Some(ch) = self.stream.peek()? else {
            return self.fetch_stream_end();
        };

        if mark.at_line_start() {
            if ch == '%' {
                return self.fetch_directive();
            }
            if self.stream.next_is_str("---")? && self.stream.peek_nth(3)?.is_blankz() {
                return self.fetch_document_indicator(Token::DocumentStart);
            }
            if self.stream.next_is_str("...")? && self.stream.peek_nth(3)?.is_blankz() {
                return self.fetch_document_indicator(Token::DocumentEnd);
            }
        }

        let next_blankz = self.stream.peek_nth(1)?.is_blankz();
        match ch {
            '[' => self.fetch_flow_collection_start(Token::FlowSequenceStart),
            '{' => self.fetch_flow_collection_start(Token::FlowMappingStart),
            ']' => self.fetch_flow_collection_end(Token::FlowSequenceEnd),
            '}' => self.fetch_flow_collection_end(Token::FlowMappingEnd),
            ',' => self.fetch_flow_entry(),
            '-' if next_blankz => self.fetch_block_entry(),
            '?' if self.flow_level > 0 || next_blankz => self.fetch_key(),
            ':' if self.flow_level > 0 || next_blankz => self.fetch_value(),
            '*' => self.fetch_anchor(true),
            '&' => self.fetch_anchor(false),
            '!' => self.fetch_tag(),
            '|' | '>' if self.flow_level == 0 => self.fetch_block_scalar(),
            '\'' => self.fetch_flow_scalar(true),
            '"' => self.fetch_flow_scalar(false),
            '@' | '`' => Err(ScannerError::UnexpectedChar(ch, mark).into()),
            _ => self.fetch_plain_scalar(),
        }
    }

    fn scan_to_next_token(&mut self) -> Result<(), Error> {
        loop {
            match self.stream.peek()? {
                Some(' ') | Some('\t') => self.stream.skip()?,
                Some('#') => {
                    while !self.stream.peek()?.is_breakz() {
                        self.stream.skip()?;
                    }
                }
                Some(ch) if ch.is_break() => {
                    scalars::skip_break(&mut self.stream)?;
                    if self.flow_level == 0 {
                        self.allow_simple_key = true;
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn unroll_indent(&mut self, column: isize) {
        if self.flow_level > 0 {
            return;
        }
        while self.indent > column {
            let mark = self.stream.mark();
            self.tokens
                .push_back(Token::BlockEnd.in_span(Span::point(mark)));
            self.indent = self.indents.pop().unwrap_or(-1);
        }
    }

    fn roll_indent(&mut self, column: usize, token: Token, mark: Mark, at: Option<usize>) {
        if self.flow_level > 0 {
            return;
        }
        if self.indent < column as isize {
            self.indents.push(self.indent);
            self.indent = column as isize;
            let spanned = token.in_span(Span::point(mark));
            match at {
                Some(pos) => self.tokens.insert(pos, spanned),
                None => self.tokens.push_back(spanned),
            }
        }
    }

    fn save_simple_key(&mut self) -> Result<(), Error> {
        if !self.allow_simple_key {
            return Ok(());
        }
        let mark = self.stream.mark();
        let required = self.flow_level == 0 && self.indent == mark.column as isize;
        let token_number = self.tokens_popped + self.tokens.len();
        self.remove_simple_key()?;
        if let Some(sk) = self.simple_keys.last_mut() {
            *sk = SimpleKey {
                possible: true,
                required,
                token_number,
                mark,
            };
        }
        Ok(())
    }

    fn remove_simple_key(&mut self) -> Result<(), Error> {
        if let Some(sk) = self.simple_keys.last_mut() {
            if sk.possible && sk.required {
                return Err(ParserError::EndOfMapping(sk.mark).into());
            }
            sk.possible = false;
        }
        Ok(())
    }

    fn fetch_stream_end(&mut self) -> Result<(), Error> {
        let mark = self.stream.mark();
        self.remove_simple_key()?;
        self.unroll_indent(-1);
        self.allow_simple_key = false;
        self.tokens
            .push_back(Token::StreamEnd.in_span(Span::point(mark)));
        self.stream_end_queued = true;
        Ok(())
    }

    fn fetch_directive(&mut self) -> Result<(), Error> {
        self.remove_simple_key()?;
        self.unroll_indent(-1);
        self.allow_simple_key = false;

        let start = self.stream.mark();
        self.stream.skip()?;

        let mut name = String::new();
        while let Some(ch) = self.stream.peek()? {
            if ch.is_blank_or_break() {
                break;
            }
            name.push(ch);
            self.stream.skip()?;
        }

        let mut params = Vec::new();
        loop {
            while self.stream.peek()?.map_or(false, CharExt::is_blank) {
                self.stream.skip()?;
            }
            let Some(ch) = self.stream.peek()? else {
                break;
            };
            if ch.is_break() || ch == '#' {
                break;
            }
            let mut param = String::new();
            while let Some(ch) = self.stream.peek()? {
                if ch.is_blank_or_break() {
                    break;
                }
                param.push(ch);
                self.stream.skip()?;
            }
            params.push(param);
        }

        let span = start.to(self.stream.mark());
        self.tokens
            .push_back(Token::Directive { name, params }.in_span(span));
        Ok(())
    }

    fn fetch_document_indicator(&mut self, token: Token) -> Result<(), Error> {
        self.remove_simple_key()?;
        self.unroll_indent(-1);
        self.allow_simple_key = false;

        let start = self.stream.mark();
        self.stream.skip()?;
        self.stream.skip()?;
        self.stream.skip()?;
        self.tokens
            .push_back(token.in_span(start.to(self.stream.mark())));
        Ok(())
    }

    fn fetch_flow_collection_start(&mut self, token: Token) -> Result<(), Error> {
        // A flow collection may itself be a key.
        self.save_simple_key()?;
        self.simple_keys.push(SimpleKey::default());
        self.flow_level += 1;
        self.allow_simple_key = true;

        let start = self.stream.mark();
        self.stream.skip()?;
        self.tokens
            .push_back(token.in_span(start.to(self.stream.mark())));
        Ok(())
    }

    fn fetch_flow_collection_end(&mut self, token: Token) -> Result<(), Error> {
        self.remove_simple_key()?;
        if self.flow_level > 0 {
            self.flow_level -= 1;
            self.simple_keys.pop();
        }
        self.allow_simple_key = false;

        let start = self.stream.mark();
        self.stream.skip()?;
        self.tokens
            .push_back(token.in_span(start.to(self.stream.mark())));
        Ok(())
    }

    fn fetch_flow_entry(&mut self) -> Result<(), Error> {
        self.remove_simple_key()?;
        self.allow_simple_key = true;

        let start = self.stream.mark();
        self.stream.skip()?;
        self.tokens
            .push_back(Token::FlowEntry.in_span(start.to(self.stream.mark())));
        Ok(())
    }

    fn fetch_block_entry(&mut self) -> Result<(), Error> {
        let mark = self.stream.mark();
        if self.flow_level > 0 {
            return Err(ScannerError::UnexpectedChar('-', mark).into());
        }
        if !self.allow_simple_key {
            return Err(ParserError::EndOfSequence(mark).into());
        }
        self.roll_indent(mark.column, Token::BlockSequenceStart, mark, None);
        self.remove_simple_key()?;
        self.allow_simple_key = true;

        self.stream.skip()?;
        self.tokens
            .push_back(Token::BlockEntry.in_span(mark.to(self.stream.mark())));
        Ok(())
    }

    fn fetch_key(&mut self) -> Result<(), Error> {
        let mark = self.stream.mark();
        if self.flow_level == 0 {
            if !self.allow_simple_key {
                return Err(ParserError::EndOfMapping(mark).into());
            }
            self.roll_indent(mark.column, Token::BlockMappingStart, mark, None);
        }
        self.remove_simple_key()?;
        self.allow_simple_key = self.flow_level == 0;

        self.stream.skip()?;
        self.tokens
            .push_back(Token::Key.in_span(mark.to(self.stream.mark())));
        Ok(())
    }

    fn fetch_value(&mut self) -> Result<(), Error> {
        let mark = self.stream.mark();
        let sk = self.simple_keys.last().copied().unwrap_or_default();

        if sk.possible {
            // Retroactively mark the candidate as a key, splicing at the
            // position recorded when the candidate started. The spliced
            // tokens carry the candidate's original mark.
            let pos = sk.token_number - self.tokens_popped;
            self.tokens
                .insert(pos, Token::Key.in_span(Span::point(sk.mark)));
            self.roll_indent(sk.mark.column, Token::BlockMappingStart, sk.mark, Some(pos));
            if let Some(sk) = self.simple_keys.last_mut() {
                sk.possible = false;
            }
            self.allow_simple_key = false;
        } else {
            if self.flow_level == 0 {
                if !self.allow_simple_key {
                    return Err(ScannerError::UnexpectedChar(':', mark).into());
                }
                // A lone ':' opens a mapping with a null key.
                self.roll_indent(mark.column, Token::BlockMappingStart, mark, None);
            }
            self.allow_simple_key = self.flow_level == 0;
        }

        self.stream.skip()?;
        self.tokens
            .push_back(Token::Value.in_span(mark.to(self.stream.mark())));
        Ok(())
    }

    fn fetch_anchor(&mut self, alias: bool) -> Result<(), Error> {
        self.save_simple_key()?;
        self.allow_simple_key = false;

        let start = self.stream.mark();
        self.stream.skip()?;
        let mut name = String::new();
        while let Some(ch) = self.stream.peek()? {
            if !ch.is_anchor_char() {
                break;
            }
            name.push(ch);
            self.stream.skip()?;
        }
        if name.is_empty() {
            let indicator = if alias { '*' } else { '&' };
            return Err(ScannerError::UnexpectedChar(indicator, start).into());
        }

        let token = if alias {
            Token::Alias(name)
        } else {
            Token::Anchor(name)
        };
        self.tokens
            .push_back(token.in_span(start.to(self.stream.mark())));
        Ok(())
    }

    fn fetch_tag(&mut self) -> Result<(), Error> {
        self.save_simple_key()?;
        self.allow_simple_key = false;

        let start = self.stream.mark();
        self.stream.skip()?;

        let mut handle = String::from("!");
        let mut suffix = String::new();

        if self.stream.peek()? == Some('<') {
            // Verbatim tag; resolution will use it as-is.
            self.stream.skip()?;
            handle.clear();
            loop {
                match self.stream.peek()? {
                    None => return Err(ScannerError::UnexpectedEof(self.stream.mark()).into()),
                    Some('>') => break,
                    Some(ch) if ch.is_blank_or_break() => {
                        return Err(ScannerError::UnexpectedChar(ch, self.stream.mark()).into());
                    }
                    Some(ch) => {
                        suffix.push(ch);
                        self.stream.skip()?;
                    }
                }
            }
            self.stream.skip()?;
            if suffix.is_empty() {
                return Err(ParserError::InvalidTag(start).into());
            }
        } else {
            // Shorthand: !suffix, !!suffix, or !handle!suffix.
            let mut word = String::new();
            while let Some(ch) = self.stream.peek()? {
                if !ch.is_word_char() {
                    break;
                }
                word.push(ch);
                self.stream.skip()?;
            }
            if self.stream.peek()? == Some('!') {
                self.stream.skip()?;
                handle.push_str(&word);
                handle.push('!');
            } else {
                suffix = word;
            }
            while let Some(ch) = self.stream.peek()? {
                if !ch.is_tag_char() || (self.flow_level > 0 && ch.is_flow_indicator()) {
                    break;
                }
                suffix.push(ch);
                self.stream.skip()?;
            }
        }

        self.tokens
            .push_back(Token::Tag { handle, suffix }.in_span(start.to(self.stream.mark())));
        Ok(())
    }

    fn fetch_block_scalar(&mut self) -> Result<(), Error> {
        self.remove_simple_key()?;
        // The scalar swallows the rest of the line, so a key may follow.
        self.allow_simple_key = true;

        let start = self.stream.mark();
        let (value, style) = scalars::scan_block_scalar(&mut self.stream, self.indent)?;
        self.tokens
            .push_back(Token::Scalar { value, style }.in_span(start.to(self.stream.mark())));
        Ok(())
    }

    fn fetch_flow_scalar(&mut self, single: bool) -> Result<(), Error> {
        self.save_simple_key()?;
        self.allow_simple_key = false;

        let start = self.stream.mark();
        let value = scalars::scan_flow_scalar(&mut self.stream, single)?;
        let style = if single {
            ScalarStyle::SingleQuoted
        } else {
            ScalarStyle::DoubleQuoted
        };
        self.tokens
            .push_back(Token::Scalar { value, style }.in_span(start.to(self.stream.mark())));
        Ok(())
    }

    fn fetch_plain_scalar(&mut self) -> Result<(), Error> {
        self.save_simple_key()?;
        self.allow_simple_key = false;

        let start = self.stream.mark();
        let (value, consumed_break) =
            scalars::scan_plain_scalar(&mut self.stream, self.flow_level, self.indent)?;
        if consumed_break && self.flow_level == 0 {
            self.allow_simple_key = true;
        }
        self.tokens.push_back(
            Token::Scalar {
                value,
                style: ScalarStyle::Plain,
            }
            .in_span(start.to(self.stream.mark())),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn assert_tokens_eq(input: &str, expected: &[Token]) {
        let mut scanner = Scanner::new(input.as_bytes());
        let mut tokens = vec![];
        loop {
            let token = scanner.pop_token().unwrap_or_else(|e| panic!("error: {e}"));
            let done = token.value == Token::StreamEnd;
            tokens.push(token.into_inner());
            if done {
                break;
            }
        }
        assert_eq!(tokens, expected);
    }

    #[track_caller]
    fn assert_scan_fails(input: &str) {
        let mut scanner = Scanner::new(input.as_bytes());
        loop {
            match scanner.pop_token() {
                Ok(token) => {
                    if token.value == Token::StreamEnd {
                        panic!("expected a scan error");
                    }
                }
                Err(_) => return,
            }
        }
    }

    #[test]
    fn one_scalar() {
        assert_tokens_eq("hello", &[Token::plain("hello"), Token::StreamEnd]);
    }

    #[test]
    fn simple_mapping() {
        assert_tokens_eq(
            "a: 1",
            &[
                Token::BlockMappingStart,
                Token::Key,
                Token::plain("a"),
                Token::Value,
                Token::plain("1"),
                Token::BlockEnd,
                Token::StreamEnd,
            ],
        );
    }

    #[test]
    fn block_sequence() {
        assert_tokens_eq(
            "- eggs\n- bread\n- milk",
            &[
                Token::BlockSequenceStart,
                Token::BlockEntry,
                Token::plain("eggs"),
                Token::BlockEntry,
                Token::plain("bread"),
                Token::BlockEntry,
                Token::plain("milk"),
                Token::BlockEnd,
                Token::StreamEnd,
            ],
        );
    }

    #[test]
    fn flow_sequence() {
        assert_tokens_eq(
            "[ 2 , 3]",
            &[
                Token::FlowSequenceStart,
                Token::plain("2"),
                Token::FlowEntry,
                Token::plain("3"),
                Token::FlowSequenceEnd,
                Token::StreamEnd,
            ],
        );
    }

    #[test]
    fn flow_mapping_splices_keys() {
        assert_tokens_eq(
            "{hr: 65, avg: 0.278}",
            &[
                Token::FlowMappingStart,
                Token::Key,
                Token::plain("hr"),
                Token::Value,
                Token::plain("65"),
                Token::FlowEntry,
                Token::Key,
                Token::plain("avg"),
                Token::Value,
                Token::plain("0.278"),
                Token::FlowMappingEnd,
                Token::StreamEnd,
            ],
        );
    }

    #[test]
    fn nested_block_mapping_closes_in_order() {
        assert_tokens_eq(
            "outer:\n  inner: 1\nnext: 2",
            &[
                Token::BlockMappingStart,
                Token::Key,
                Token::plain("outer"),
                Token::Value,
                Token::BlockMappingStart,
                Token::Key,
                Token::plain("inner"),
                Token::Value,
                Token::plain("1"),
                Token::BlockEnd,
                Token::Key,
                Token::plain("next"),
                Token::Value,
                Token::plain("2"),
                Token::BlockEnd,
                Token::StreamEnd,
            ],
        );
    }

    #[test]
    fn compressed_mapping_and_sequence() {
        assert_tokens_eq(
            "key:\n- one\n- two",
            &[
                Token::BlockMappingStart,
                Token::Key,
                Token::plain("key"),
                Token::Value,
                Token::BlockEntry,
                Token::plain("one"),
                Token::BlockEntry,
                Token::plain("two"),
                Token::BlockEnd,
                Token::StreamEnd,
            ],
        );
    }

    #[test]
    fn anchor_on_simple_key() {
        assert_tokens_eq(
            "- &a b: c",
            &[
                Token::BlockSequenceStart,
                Token::BlockEntry,
                Token::BlockMappingStart,
                Token::Key,
                Token::Anchor("a".into()),
                Token::plain("b"),
                Token::Value,
                Token::plain("c"),
                Token::BlockEnd,
                Token::BlockEnd,
                Token::StreamEnd,
            ],
        );
    }

    #[test]
    fn alias_as_simple_key() {
        assert_tokens_eq(
            "*a : c",
            &[
                Token::BlockMappingStart,
                Token::Key,
                Token::Alias("a".into()),
                Token::Value,
                Token::plain("c"),
                Token::BlockEnd,
                Token::StreamEnd,
            ],
        );
    }

    #[test]
    fn document_indicators() {
        assert_tokens_eq(
            "---\n- one\n...",
            &[
                Token::DocumentStart,
                Token::BlockSequenceStart,
                Token::BlockEntry,
                Token::plain("one"),
                Token::BlockEnd,
                Token::DocumentEnd,
                Token::StreamEnd,
            ],
        );
    }

    #[test]
    fn directives() {
        assert_tokens_eq(
            "%YAML 1.2\n%TAG !e! tag:example.com,2000:\n--- x",
            &[
                Token::Directive {
                    name: "YAML".into(),
                    params: vec!["1.2".into()],
                },
                Token::Directive {
                    name: "TAG".into(),
                    params: vec!["!e!".into(), "tag:example.com,2000:".into()],
                },
                Token::DocumentStart,
                Token::plain("x"),
                Token::StreamEnd,
            ],
        );
    }

    #[test]
    fn tags() {
        assert_tokens_eq(
            "!!int 12",
            &[
                Token::Tag {
                    handle: "!!".into(),
                    suffix: "int".into(),
                },
                Token::plain("12"),
                Token::StreamEnd,
            ],
        );
        assert_tokens_eq(
            "!<tag:yaml.org,2002:int> 12",
            &[
                Token::Tag {
                    handle: "".into(),
                    suffix: "tag:yaml.org,2002:int".into(),
                },
                Token::plain("12"),
                Token::StreamEnd,
            ],
        );
        assert_tokens_eq(
            "! 12",
            &[
                Token::Tag {
                    handle: "!".into(),
                    suffix: "".into(),
                },
                Token::plain("12"),
                Token::StreamEnd,
            ],
        );
    }

    #[test]
    fn plain_scalar_with_colons() {
        assert_tokens_eq("::vector", &[Token::plain("::vector"), Token::StreamEnd]);
        assert_tokens_eq("-123", &[Token::plain("-123"), Token::StreamEnd]);
        assert_tokens_eq(
            "http://example.com/foo#bar",
            &[Token::plain("http://example.com/foo#bar"), Token::StreamEnd],
        );
    }

    #[test]
    fn comma_stays_in_block_plain_scalar() {
        assert_tokens_eq(
            "Up, up, and away!",
            &[Token::plain("Up, up, and away!"), Token::StreamEnd],
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_tokens_eq(
            "# heading\nkey: value # trailing\n# footer",
            &[
                Token::BlockMappingStart,
                Token::Key,
                Token::plain("key"),
                Token::Value,
                Token::plain("value"),
                Token::BlockEnd,
                Token::StreamEnd,
            ],
        );
    }

    #[test]
    fn quoted_scalars() {
        assert_tokens_eq(
            "\"key\": 'value'",
            &[
                Token::BlockMappingStart,
                Token::Key,
                Token::double_quoted("key"),
                Token::Value,
                Token::single_quoted("value"),
                Token::BlockEnd,
                Token::StreamEnd,
            ],
        );
    }

    #[test]
    fn spliced_key_keeps_candidate_mark() {
        let mut scanner = Scanner::new(&b"foo: 1"[..]);
        let mapping_start = scanner.pop_token().unwrap();
        let key = scanner.pop_token().unwrap();
        assert_eq!(mapping_start.value, Token::BlockMappingStart);
        assert_eq!(key.value, Token::Key);
        assert_eq!(mapping_start.mark().column, 0);
        assert_eq!(key.mark().column, 0);
    }

    #[test]
    fn mapping_value_after_value_fails() {
        assert_scan_fails("a: b: c");
    }

    #[test]
    fn overlong_simple_key_candidate_expires_silently() {
        // Past 1024 characters the candidate is dropped, so no Key token is
        // spliced; in flow context the ':' still reads as a value indicator
        // and scanning carries on.
        let long_key = "a".repeat(1100);
        let input = format!("{{{long_key}: 1}}");
        let mut scanner = Scanner::new(input.as_bytes());
        let mut tokens = vec![];
        loop {
            let token = scanner.pop_token().unwrap_or_else(|e| panic!("error: {e}"));
            let done = token.value == Token::StreamEnd;
            tokens.push(token.into_inner());
            if done {
                break;
            }
        }
        assert!(!tokens.contains(&Token::Key));
        assert!(tokens.contains(&Token::Value));
        assert!(tokens.contains(&Token::plain(&long_key)));
    }

    #[test]
    fn overlong_required_simple_key_fails() {
        // A key at its mapping's own indentation must resolve within the
        // limit; here the ':' arrives 1100 columns after the candidate.
        let long_key = "a".repeat(1100);
        let input = format!("a: 1\n{long_key}: 2");
        let mut scanner = Scanner::new(input.as_bytes());
        let err = loop {
            match scanner.pop_token() {
                Ok(token) => {
                    assert_ne!(token.value, Token::StreamEnd, "expected an error");
                }
                Err(e) => break e,
            }
        };
        assert!(matches!(err, Error::Parser(ParserError::EndOfMapping(_))));
    }

    #[test]
    fn block_entry_in_flow_fails() {
        assert_scan_fails("[- ]");
    }
}
