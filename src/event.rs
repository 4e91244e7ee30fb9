use crate::ScalarStyle;

bitflags::bitflags! {
    /// How a scalar's tag may be interpreted downstream. `PLAIN_IMPLICIT`
    /// accompanies the `"?"` sentinel (the consumer picks the type);
    /// `QUOTED_IMPLICIT` accompanies the `"!"` non-specific tag.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct ScalarFlags: u8 {
        const PLAIN_IMPLICIT = 0b0000_0001;
        const QUOTED_IMPLICIT = 0b0000_0010;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CollectionStyle {
    Block,
    Flow,
}

/// The parser's output. Tags are fully resolved strings by this point;
/// downstream never sees handles or directives.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    StreamStart,
    StreamEnd,
    DocumentStart {
        explicit: bool,
    },
    DocumentEnd {
        explicit: bool,
    },
    Alias(String),
    Scalar {
        value: String,
        tag: String,
        style: ScalarStyle,
        anchor: Option<String>,
        flags: ScalarFlags,
    },
    SequenceStart {
        anchor: Option<String>,
        tag: String,
        style: CollectionStyle,
    },
    SequenceEnd,
    MappingStart {
        anchor: Option<String>,
        tag: String,
        style: CollectionStyle,
    },
    MappingEnd,
}

impl Event {
    #[inline]
    pub fn plain(value: &str) -> Self {
        Event::Scalar {
            value: value.to_owned(),
            tag: "?".to_owned(),
            style: ScalarStyle::Plain,
            anchor: None,
            flags: ScalarFlags::PLAIN_IMPLICIT,
        }
    }

    /// An empty plain scalar, standing in for an omitted key or value.
    #[inline]
    pub fn empty() -> Self {
        Self::plain("")
    }

    #[inline]
    pub fn quoted(value: &str, style: ScalarStyle) -> Self {
        Event::Scalar {
            value: value.to_owned(),
            tag: "!".to_owned(),
            style,
            anchor: None,
            flags: ScalarFlags::QUOTED_IMPLICIT,
        }
    }

    #[inline]
    pub fn alias(name: &str) -> Self {
        Event::Alias(name.to_owned())
    }

    #[inline]
    pub fn sequence_start(style: CollectionStyle) -> Self {
        Event::SequenceStart {
            anchor: None,
            tag: "?".to_owned(),
            style,
        }
    }

    #[inline]
    pub fn mapping_start(style: CollectionStyle) -> Self {
        Event::MappingStart {
            anchor: None,
            tag: "?".to_owned(),
            style,
        }
    }

    pub fn with_anchor(self, name: &str) -> Self {
        let anchor = Some(name.to_owned());
        match self {
            Event::Scalar {
                value,
                tag,
                style,
                flags,
                ..
            } => Event::Scalar {
                value,
                tag,
                style,
                anchor,
                flags,
            },
            Event::SequenceStart { tag, style, .. } => Event::SequenceStart { anchor, tag, style },
            Event::MappingStart { tag, style, .. } => Event::MappingStart { anchor, tag, style },
            other => other,
        }
    }

    pub fn with_tag(self, new_tag: &str) -> Self {
        let new_tag = new_tag.to_owned();
        match self {
            Event::Scalar {
                value,
                style,
                anchor,
                ..
            } => Event::Scalar {
                value,
                tag: new_tag,
                style,
                anchor,
                flags: ScalarFlags::empty(),
            },
            Event::SequenceStart { anchor, style, .. } => Event::SequenceStart {
                anchor,
                tag: new_tag,
                style,
            },
            Event::MappingStart { anchor, style, .. } => Event::MappingStart {
                anchor,
                tag: new_tag,
                style,
            },
            other => other,
        }
    }
}
