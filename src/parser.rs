use std::io::Read;

use crate::{
    directive::Directives, CollectionStyle, Error, Event, Mark, ParserError, ScalarFlags,
    ScalarStyle, Scanner, Span, Spanned, SpannedExt, Token,
};

/// Streaming parser that turns [`Token`]s into [`Event`]s.
///
/// This is a pushdown machine: the current state decides how to interpret
/// the next token, and nested collections push the state to return to.
/// Node properties (anchor, tag) are held pending until the node they
/// describe is emitted; tags leave here fully resolved.
pub struct ParseStream<R> {
    scanner: Scanner<R>,
    state: State,
    states: Vec<State>,
    directives: Directives,
    pending_anchor: Option<Spanned<String>>,
    pending_tag: Option<Spanned<(String, String)>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    StreamStart,
    ImplicitDocumentStart,
    DocumentStart,
    DocumentContent,
    DocumentEnd,
    BlockSequenceFirstEntry,
    BlockSequenceEntry,
    IndentlessSequenceEntry,
    BlockMappingFirstKey,
    BlockMappingKey,
    BlockMappingValue,
    FlowSequenceFirstEntry,
    FlowSequenceEntry,
    FlowSequenceEntryMappingKey,
    FlowSequenceEntryMappingValue,
    FlowSequenceEntryMappingEnd,
    FlowMappingFirstKey,
    FlowMappingKey,
    FlowMappingValue,
    FlowMappingEmptyValue,
    End,
}

impl<R: Read> ParseStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            scanner: Scanner::new(reader),
            state: State::StreamStart,
            states: Vec::new(),
            directives: Directives::default(),
            pending_anchor: None,
            pending_tag: None,
        }
    }

    /// The next event, or `None` once `StreamEnd` has been emitted.
    pub fn next_event(&mut self) -> Result<Option<Spanned<Event>>, Error> {
        match self.state {
            State::End => Ok(None),
            State::StreamStart => {
                let span = self.scanner.peek_token()?.span;
                self.state = State::ImplicitDocumentStart;
                Ok(Some(Event::StreamStart.in_span(span)))
            }
            State::ImplicitDocumentStart | State::DocumentStart => self.document_start(),
            State::DocumentContent => self.document_content(),
            State::DocumentEnd => self.document_end(),
            State::BlockSequenceFirstEntry => self.block_sequence_entry(true),
            State::BlockSequenceEntry => self.block_sequence_entry(false),
            State::IndentlessSequenceEntry => self.indentless_sequence_entry(),
            State::BlockMappingFirstKey => self.block_mapping_key(true),
            State::BlockMappingKey => self.block_mapping_key(false),
            State::BlockMappingValue => self.block_mapping_value(),
            State::FlowSequenceFirstEntry => self.flow_sequence_entry(true),
            State::FlowSequenceEntry => self.flow_sequence_entry(false),
            State::FlowSequenceEntryMappingKey => self.flow_sequence_entry_mapping_key(),
            State::FlowSequenceEntryMappingValue => self.flow_sequence_entry_mapping_value(),
            State::FlowSequenceEntryMappingEnd => self.flow_sequence_entry_mapping_end(),
            State::FlowMappingFirstKey => self.flow_mapping_key(true),
            State::FlowMappingKey => self.flow_mapping_key(false),
            State::FlowMappingValue => self.flow_mapping_value(false),
            State::FlowMappingEmptyValue => self.flow_mapping_value(true),
        }
    }

    fn pop_state(&mut self) -> State {
        self.states.pop().expect("inconsistent parser state")
    }

    fn document_start(&mut self) -> Result<Option<Spanned<Event>>, Error> {
        while self.scanner.peek_token()?.value == Token::DocumentEnd {
            self.scanner.pop_token()?;
        }

        let token = self.scanner.peek_token()?;
        let span = token.span;
        match token.value {
            Token::StreamEnd => {
                let token = self.scanner.pop_token()?;
                self.state = State::End;
                Ok(Some(Event::StreamEnd.in_span(token.span)))
            }
            Token::Directive { .. } | Token::DocumentStart => {
                self.process_directives()?;
                let token = self.scanner.peek_token()?;
                if token.value != Token::DocumentStart {
                    return Err(
                        ParserError::UnexpectedToken(token.value.ty(), token.mark()).into(),
                    );
                }
                let token = self.scanner.pop_token()?;
                self.states.push(State::DocumentEnd);
                self.state = State::DocumentContent;
                Ok(Some(Event::DocumentStart { explicit: true }.in_span(token.span)))
            }
            _ => {
                self.directives.reset();
                self.states.push(State::DocumentEnd);
                self.state = State::DocumentContent;
                Ok(Some(
                    Event::DocumentStart { explicit: false }.in_span(Span::point(span.start)),
                ))
            }
        }
    }

    fn process_directives(&mut self) -> Result<(), Error> {
        self.directives.reset();
        loop {
            let token = self.scanner.peek_token()?;
            if !matches!(token.value, Token::Directive { .. }) {
                return Ok(());
            }
            let token = self.scanner.pop_token()?;
            let mark = token.mark();
            let Token::Directive { name, params } = token.value else {
                unreachable!()
            };
            match name.as_str() {
                "YAML" => {
                    let [version] = params.as_slice() else {
                        return Err(ParserError::InvalidDirective(mark).into());
                    };
                    let Some((major, minor)) = version.split_once('.') else {
                        return Err(ParserError::InvalidDirective(mark).into());
                    };
                    let major = major
                        .parse()
                        .map_err(|_| ParserError::InvalidDirective(mark))?;
                    let minor = minor
                        .parse()
                        .map_err(|_| ParserError::InvalidDirective(mark))?;
                    self.directives.set_version(major, minor, mark)?;
                }
                "TAG" => {
                    let [handle, prefix] = params.as_slice() else {
                        return Err(ParserError::InvalidDirective(mark).into());
                    };
                    self.directives.register(handle, prefix, mark)?;
                }
                // Reserved directives are ignored.
                _ => {}
            }
        }
    }

    fn document_content(&mut self) -> Result<Option<Spanned<Event>>, Error> {
        let token = self.scanner.peek_token()?;
        let span = token.span;
        match token.value {
            Token::Directive { .. }
            | Token::DocumentStart
            | Token::DocumentEnd
            | Token::StreamEnd => {
                // An empty document is a single null scalar.
                self.state = self.pop_state();
                Ok(Some(self.empty_scalar(span.start)?))
            }
            _ => self.parse_node(true, false),
        }
    }

    fn document_end(&mut self) -> Result<Option<Spanned<Event>>, Error> {
        let token = self.scanner.peek_token()?;
        let span = token.span;
        let explicit = if token.value == Token::DocumentEnd {
            self.scanner.pop_token()?;
            true
        } else {
            false
        };
        self.state = State::DocumentStart;
        Ok(Some(
            Event::DocumentEnd { explicit }.in_span(Span::point(span.start)),
        ))
    }

    fn parse_node(
        &mut self,
        block: bool,
        indentless: bool,
    ) -> Result<Option<Spanned<Event>>, Error> {
        loop {
            let token = self.scanner.peek_token()?;
            match token.value {
                Token::Alias(_) => {
                    let token = self.scanner.pop_token()?;
                    let span = token.span;
                    let Token::Alias(name) = token.value else {
                        unreachable!()
                    };
                    if self.pending_anchor.is_some() || self.pending_tag.is_some() {
                        return Err(ParserError::UnexpectedToken(
                            crate::TokenType::Alias,
                            span.start,
                        )
                        .into());
                    }
                    self.state = self.pop_state();
                    return Ok(Some(Event::Alias(name).in_span(span)));
                }
                Token::Anchor(_) => {
                    let token = self.scanner.pop_token()?;
                    let span = token.span;
                    let Token::Anchor(name) = token.value else {
                        unreachable!()
                    };
                    if self.pending_anchor.is_some() {
                        return Err(ParserError::UnexpectedToken(
                            crate::TokenType::Anchor,
                            span.start,
                        )
                        .into());
                    }
                    self.pending_anchor = Some(name.in_span(span));
                }
                Token::Tag { .. } => {
                    let token = self.scanner.pop_token()?;
                    let span = token.span;
                    let Token::Tag { handle, suffix } = token.value else {
                        unreachable!()
                    };
                    if self.pending_tag.is_some() {
                        return Err(ParserError::UnexpectedToken(
                            crate::TokenType::Tag,
                            span.start,
                        )
                        .into());
                    }
                    self.pending_tag = Some((handle, suffix).in_span(span));
                }
                _ => break,
            }
        }

        let token = self.scanner.peek_token()?;
        let span = token.span;
        match token.value {
            Token::BlockEntry if indentless => {
                self.state = State::IndentlessSequenceEntry;
                Ok(Some(self.collection_start(false, CollectionStyle::Block, span)?))
            }
            Token::Scalar { .. } => {
                let token = self.scanner.pop_token()?;
                let span = token.span;
                let Token::Scalar { value, style } = token.value else {
                    unreachable!()
                };
                self.state = self.pop_state();
                Ok(Some(self.scalar(value, style, span)?))
            }
            Token::FlowSequenceStart => {
                self.state = State::FlowSequenceFirstEntry;
                Ok(Some(self.collection_start(false, CollectionStyle::Flow, span)?))
            }
            Token::FlowMappingStart => {
                self.state = State::FlowMappingFirstKey;
                Ok(Some(self.collection_start(true, CollectionStyle::Flow, span)?))
            }
            Token::BlockSequenceStart if block => {
                self.state = State::BlockSequenceFirstEntry;
                Ok(Some(self.collection_start(false, CollectionStyle::Block, span)?))
            }
            Token::BlockMappingStart if block => {
                self.state = State::BlockMappingFirstKey;
                Ok(Some(self.collection_start(true, CollectionStyle::Block, span)?))
            }
            _ if self.pending_anchor.is_some() || self.pending_tag.is_some() => {
                // A property with no node attaches to an empty scalar.
                self.state = self.pop_state();
                Ok(Some(self.empty_scalar(span.start)?))
            }
            ref other => Err(ParserError::UnexpectedToken(other.ty(), span.start).into()),
        }
    }

    fn scalar(
        &mut self,
        value: String,
        style: ScalarStyle,
        span: Span,
    ) -> Result<Spanned<Event>, Error> {
        let anchor = self.pending_anchor.take().map(Spanned::into_inner);
        let (tag, flags) = match self.pending_tag.take() {
            Some(tag) => {
                let mark = tag.mark();
                let (handle, suffix) = tag.into_inner();
                (
                    self.directives.resolve(&handle, &suffix, mark)?,
                    ScalarFlags::empty(),
                )
            }
            None if style == ScalarStyle::Plain => {
                ("?".to_owned(), ScalarFlags::PLAIN_IMPLICIT)
            }
            None => ("!".to_owned(), ScalarFlags::QUOTED_IMPLICIT),
        };
        Ok(Event::Scalar {
            value,
            tag,
            style,
            anchor,
            flags,
        }
        .in_span(span))
    }

    fn empty_scalar(&mut self, mark: Mark) -> Result<Spanned<Event>, Error> {
        self.scalar(String::new(), ScalarStyle::Plain, Span::point(mark))
    }

    fn collection_start(
        &mut self,
        mapping: bool,
        style: CollectionStyle,
        span: Span,
    ) -> Result<Spanned<Event>, Error> {
        let anchor = self.pending_anchor.take().map(Spanned::into_inner);
        let tag = match self.pending_tag.take() {
            Some(tag) => {
                let mark = tag.mark();
                let (handle, suffix) = tag.into_inner();
                self.directives.resolve(&handle, &suffix, mark)?
            }
            None => "?".to_owned(),
        };
        let event = if mapping {
            Event::MappingStart { anchor, tag, style }
        } else {
            Event::SequenceStart { anchor, tag, style }
        };
        Ok(event.in_span(span))
    }

    fn block_sequence_entry(&mut self, first: bool) -> Result<Option<Spanned<Event>>, Error> {
        if first {
            self.scanner.pop_token()?;
        }
        let token = self.scanner.peek_token()?;
        let span = token.span;
        match token.value {
            Token::BlockEnd => {
                let token = self.scanner.pop_token()?;
                self.state = self.pop_state();
                Ok(Some(Event::SequenceEnd.in_span(token.span)))
            }
            Token::BlockEntry => {
                self.scanner.pop_token()?;
                let next = self.scanner.peek_token()?;
                let next_mark = next.mark();
                match next.value {
                    Token::BlockEntry | Token::BlockEnd => {
                        self.state = State::BlockSequenceEntry;
                        Ok(Some(self.empty_scalar(next_mark)?))
                    }
                    _ => {
                        self.states.push(State::BlockSequenceEntry);
                        self.parse_node(true, false)
                    }
                }
            }
            _ => Err(ParserError::EndOfSequence(span.start).into()),
        }
    }

    fn indentless_sequence_entry(&mut self) -> Result<Option<Spanned<Event>>, Error> {
        let token = self.scanner.peek_token()?;
        let span = token.span;
        if token.value != Token::BlockEntry {
            // An indentless sequence has no BlockEnd; any other token
            // closes it.
            self.state = self.pop_state();
            return Ok(Some(Event::SequenceEnd.in_span(Span::point(span.start))));
        }
        self.scanner.pop_token()?;
        let next = self.scanner.peek_token()?;
        let next_mark = next.mark();
        match next.value {
            Token::BlockEntry | Token::Key | Token::Value | Token::BlockEnd => {
                self.state = State::IndentlessSequenceEntry;
                Ok(Some(self.empty_scalar(next_mark)?))
            }
            _ => {
                self.states.push(State::IndentlessSequenceEntry);
                self.parse_node(true, false)
            }
        }
    }

    fn block_mapping_key(&mut self, first: bool) -> Result<Option<Spanned<Event>>, Error> {
        if first {
            self.scanner.pop_token()?;
        }
        let token = self.scanner.peek_token()?;
        let span = token.span;
        match token.value {
            Token::BlockEnd => {
                let token = self.scanner.pop_token()?;
                self.state = self.pop_state();
                Ok(Some(Event::MappingEnd.in_span(token.span)))
            }
            Token::Key => {
                self.scanner.pop_token()?;
                let next = self.scanner.peek_token()?;
                let next_mark = next.mark();
                match next.value {
                    Token::Key | Token::Value | Token::BlockEnd => {
                        self.state = State::BlockMappingValue;
                        Ok(Some(self.empty_scalar(next_mark)?))
                    }
                    _ => {
                        self.states.push(State::BlockMappingValue);
                        self.parse_node(true, true)
                    }
                }
            }
            // A value with no preceding key reads as a null key.
            Token::Value => {
                self.state = State::BlockMappingValue;
                Ok(Some(self.empty_scalar(span.start)?))
            }
            _ => Err(ParserError::EndOfMapping(span.start).into()),
        }
    }

    fn block_mapping_value(&mut self) -> Result<Option<Spanned<Event>>, Error> {
        let token = self.scanner.peek_token()?;
        let span = token.span;
        if token.value != Token::Value {
            self.state = State::BlockMappingKey;
            return Ok(Some(self.empty_scalar(span.start)?));
        }
        self.scanner.pop_token()?;
        let next = self.scanner.peek_token()?;
        let next_mark = next.mark();
        match next.value {
            Token::Key | Token::Value | Token::BlockEnd => {
                self.state = State::BlockMappingKey;
                Ok(Some(self.empty_scalar(next_mark)?))
            }
            _ => {
                self.states.push(State::BlockMappingKey);
                self.parse_node(true, true)
            }
        }
    }

    fn flow_sequence_entry(&mut self, first: bool) -> Result<Option<Spanned<Event>>, Error> {
        if first {
            self.scanner.pop_token()?;
        }
        {
            let token = self.scanner.peek_token()?;
            let span = token.span;
            match token.value {
                Token::FlowSequenceEnd => {
                    let token = self.scanner.pop_token()?;
                    self.state = self.pop_state();
                    return Ok(Some(Event::SequenceEnd.in_span(token.span)));
                }
                Token::FlowEntry if !first => {
                    self.scanner.pop_token()?;
                }
                _ if !first => {
                    return Err(ParserError::EndOfSequenceFlow(span.start).into());
                }
                _ => {}
            }
        }

        let token = self.scanner.peek_token()?;
        let span = token.span;
        match token.value {
            Token::FlowSequenceEnd => {
                let token = self.scanner.pop_token()?;
                self.state = self.pop_state();
                Ok(Some(Event::SequenceEnd.in_span(token.span)))
            }
            Token::Key => {
                // A single-pair mapping as a sequence entry.
                self.scanner.pop_token()?;
                self.state = State::FlowSequenceEntryMappingKey;
                Ok(Some(self.collection_start(true, CollectionStyle::Flow, span)?))
            }
            // `[: value]`: a single-pair mapping with an omitted key.
            Token::Value => {
                self.state = State::FlowSequenceEntryMappingKey;
                Ok(Some(self.collection_start(true, CollectionStyle::Flow, span)?))
            }
            _ => {
                self.states.push(State::FlowSequenceEntry);
                self.parse_node(false, false)
            }
        }
    }

    fn flow_sequence_entry_mapping_key(&mut self) -> Result<Option<Spanned<Event>>, Error> {
        let token = self.scanner.peek_token()?;
        let span = token.span;
        match token.value {
            Token::Value | Token::FlowEntry | Token::FlowSequenceEnd => {
                self.state = State::FlowSequenceEntryMappingValue;
                Ok(Some(self.empty_scalar(span.start)?))
            }
            _ => {
                self.states.push(State::FlowSequenceEntryMappingValue);
                self.parse_node(false, false)
            }
        }
    }

    fn flow_sequence_entry_mapping_value(&mut self) -> Result<Option<Spanned<Event>>, Error> {
        let token = self.scanner.peek_token()?;
        let span = token.span;
        if token.value != Token::Value {
            self.state = State::FlowSequenceEntryMappingEnd;
            return Ok(Some(self.empty_scalar(span.start)?));
        }
        self.scanner.pop_token()?;
        let next = self.scanner.peek_token()?;
        let next_mark = next.mark();
        match next.value {
            Token::FlowEntry | Token::FlowSequenceEnd => {
                self.state = State::FlowSequenceEntryMappingEnd;
                Ok(Some(self.empty_scalar(next_mark)?))
            }
            _ => {
                self.states.push(State::FlowSequenceEntryMappingEnd);
                self.parse_node(false, false)
            }
        }
    }

    fn flow_sequence_entry_mapping_end(&mut self) -> Result<Option<Spanned<Event>>, Error> {
        self.state = State::FlowSequenceEntry;
        let mark = self.scanner.peek_token()?.mark();
        Ok(Some(Event::MappingEnd.in_span(Span::point(mark))))
    }

    fn flow_mapping_key(&mut self, first: bool) -> Result<Option<Spanned<Event>>, Error> {
        if first {
            self.scanner.pop_token()?;
        }
        {
            let token = self.scanner.peek_token()?;
            let span = token.span;
            match token.value {
                Token::FlowMappingEnd => {
                    let token = self.scanner.pop_token()?;
                    self.state = self.pop_state();
                    return Ok(Some(Event::MappingEnd.in_span(token.span)));
                }
                Token::FlowEntry if !first => {
                    self.scanner.pop_token()?;
                }
                _ if !first => {
                    return Err(ParserError::EndOfMappingFlow(span.start).into());
                }
                _ => {}
            }
        }

        let token = self.scanner.peek_token()?;
        let span = token.span;
        match token.value {
            Token::FlowMappingEnd => {
                let token = self.scanner.pop_token()?;
                self.state = self.pop_state();
                Ok(Some(Event::MappingEnd.in_span(token.span)))
            }
            Token::Key => {
                self.scanner.pop_token()?;
                let next = self.scanner.peek_token()?;
                let next_mark = next.mark();
                match next.value {
                    Token::Value | Token::FlowEntry | Token::FlowMappingEnd => {
                        self.state = State::FlowMappingValue;
                        Ok(Some(self.empty_scalar(next_mark)?))
                    }
                    _ => {
                        self.states.push(State::FlowMappingValue);
                        self.parse_node(false, false)
                    }
                }
            }
            // `{: value}`: the key was omitted.
            Token::Value => {
                self.state = State::FlowMappingValue;
                Ok(Some(self.empty_scalar(span.start)?))
            }
            // `{a: b, c}`: a solo entry whose value is null.
            _ => {
                self.states.push(State::FlowMappingEmptyValue);
                self.parse_node(false, false)
            }
        }
    }

    fn flow_mapping_value(&mut self, empty: bool) -> Result<Option<Spanned<Event>>, Error> {
        if empty {
            self.state = State::FlowMappingKey;
            let mark = self.scanner.peek_token()?.mark();
            return Ok(Some(self.empty_scalar(mark)?));
        }
        let token = self.scanner.peek_token()?;
        let span = token.span;
        if token.value != Token::Value {
            self.state = State::FlowMappingKey;
            return Ok(Some(self.empty_scalar(span.start)?));
        }
        self.scanner.pop_token()?;
        let next = self.scanner.peek_token()?;
        let next_mark = next.mark();
        match next.value {
            Token::FlowEntry | Token::FlowMappingEnd => {
                self.state = State::FlowMappingKey;
                Ok(Some(self.empty_scalar(next_mark)?))
            }
            _ => {
                self.states.push(State::FlowMappingKey);
                self.parse_node(false, false)
            }
        }
    }
}
