use crate::{Mark, TokenType};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Scanner(#[from] ScannerError),
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error(transparent)]
    Builder(#[from] BuilderError),
}

/// Errors raised while turning bytes into tokens.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ScannerError {
    #[error("invalid encoding at {0}")]
    InvalidEncoding(Mark),
    #[error("unexpected end of stream at {0}")]
    UnexpectedEof(Mark),
    #[error("invalid escape sequence {0:?} at {1}")]
    InvalidEscape(char, Mark),
    #[error("unexpected character {0:?} at {1}")]
    UnexpectedChar(char, Mark),
}

/// Errors raised while turning tokens into events.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ParserError {
    #[error("unexpected {0} at {1}")]
    UnexpectedToken(TokenType, Mark),
    #[error("end of sequence at {0}")]
    EndOfSequence(Mark),
    #[error("end of sequence flow at {0}")]
    EndOfSequenceFlow(Mark),
    #[error("end of mapping at {0}")]
    EndOfMapping(Mark),
    #[error("end of mapping flow at {0}")]
    EndOfMappingFlow(Mark),
    #[error("repeated YAML directive at {0}")]
    RepeatedYamlDirective(Mark),
    #[error("repeated TAG directive at {0}")]
    RepeatedTagDirective(Mark),
    #[error("tag handle with no suffix at {0}")]
    TagWithNoSuffix(Mark),
    #[error("invalid tag at {0}")]
    InvalidTag(Mark),
    #[error("invalid directive at {0}")]
    InvalidDirective(Mark),
}

/// Errors raised while folding events into nodes.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum BuilderError {
    #[error("anchor not found: {0} at {1}")]
    AnchorNotFound(String, Mark),
}

/// Errors raised by node accessors at the consumer call site. These never
/// invalidate the document they are raised from.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("invalid scalar: {0:?}")]
    InvalidScalar(String),
    #[error("key not found: {0}")]
    KeyNotFound(String),
    #[error("bad dereference")]
    BadDereference,
    #[error("cannot dereference an entry of a scalar")]
    DereferenceScalar,
    #[error("cannot dereference a mapping entry as a value; use key/value")]
    DereferenceMap,
    #[error("cannot take the key of a scalar entry")]
    DereferenceKeyScalar,
    #[error("cannot take the key of a sequence entry")]
    DereferenceKeySeq,
    #[error("cannot take the value of a scalar entry")]
    DereferenceValueScalar,
    #[error("cannot take the value of a sequence entry")]
    DereferenceValueSeq,
}

impl PartialEq<ScannerError> for Error {
    fn eq(&self, other: &ScannerError) -> bool {
        if let Error::Scanner(err) = self {
            *err == *other
        } else {
            false
        }
    }
}

impl PartialEq<ParserError> for Error {
    fn eq(&self, other: &ParserError) -> bool {
        if let Error::Parser(err) = self {
            *err == *other
        } else {
            false
        }
    }
}

impl PartialEq<BuilderError> for Error {
    fn eq(&self, other: &BuilderError) -> bool {
        if let Error::Builder(err) = self {
            *err == *other
        } else {
            false
        }
    }
}

impl Error {
    /// The position the error was raised at, when the stage recorded one.
    pub fn mark(&self) -> Option<Mark> {
        match self {
            Error::Io(_) => None,
            Error::Scanner(e) => Some(match e {
                ScannerError::InvalidEncoding(m)
                | ScannerError::UnexpectedEof(m)
                | ScannerError::InvalidEscape(_, m)
                | ScannerError::UnexpectedChar(_, m) => *m,
            }),
            Error::Parser(e) => Some(match e {
                ParserError::UnexpectedToken(_, m)
                | ParserError::EndOfSequence(m)
                | ParserError::EndOfSequenceFlow(m)
                | ParserError::EndOfMapping(m)
                | ParserError::EndOfMappingFlow(m)
                | ParserError::RepeatedYamlDirective(m)
                | ParserError::RepeatedTagDirective(m)
                | ParserError::TagWithNoSuffix(m)
                | ParserError::InvalidTag(m)
                | ParserError::InvalidDirective(m) => *m,
            }),
            Error::Builder(BuilderError::AnchorNotFound(_, m)) => Some(*m),
        }
    }
}
