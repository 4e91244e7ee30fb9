use std::collections::HashMap;
use std::io::Read;

use crate::{BuilderError, Error, Event, Mark, Node, NodeKind, ParseStream};

/// Open a byte source for reading documents.
pub fn open<R: Read>(reader: R) -> Parser<R> {
    Parser::new(reader)
}

/// The document-level reader: pulls events out of a [`ParseStream`] and
/// folds them into [`Node`] trees, one document at a time.
pub struct Parser<R> {
    events: ParseStream<R>,
    done: bool,
}

impl<R: Read> Parser<R> {
    pub fn new(reader: R) -> Self {
        Self {
            events: ParseStream::new(reader),
            done: false,
        }
    }

    /// The next document's root node, or `None` once the stream is
    /// exhausted. Errors are fatal to the stream.
    pub fn next_document(&mut self) -> Result<Option<Node>, Error> {
        if self.done {
            return Ok(None);
        }
        let mut builder = NodeBuilder::default();
        loop {
            let Some(event) = self.events.next_event()? else {
                self.done = true;
                return Ok(None);
            };
            let mark = event.mark();
            match event.value {
                Event::StreamStart => {}
                Event::StreamEnd => {
                    self.done = true;
                    return Ok(None);
                }
                Event::DocumentStart { .. } => builder.begin_document(),
                Event::DocumentEnd { .. } => return Ok(Some(builder.finish())),
                other => builder.feed(other, mark)?,
            }
        }
    }
}

/// Folds events into nodes. Container frames mirror the open
/// sequence/mapping starts; anchors are scoped to one document.
#[derive(Default)]
struct NodeBuilder {
    frames: Vec<Frame>,
    anchors: HashMap<String, Node>,
    root: Option<Node>,
}

struct Frame {
    node: Node,
    anchor: Option<String>,
    pending_key: Option<Node>,
}

impl NodeBuilder {
    fn begin_document(&mut self) {
        self.frames.clear();
        self.anchors.clear();
        self.root = None;
    }

    fn feed(&mut self, event: Event, mark: Mark) -> Result<(), Error> {
        match event {
            Event::Scalar {
                value, tag, anchor, ..
            } => {
                let node = Node::scalar(value, tag, mark);
                if let Some(name) = anchor {
                    // Re-anchoring a name silently replaces it.
                    self.anchors.insert(name, node.clone());
                }
                self.push_value(node);
            }
            Event::Alias(name) => {
                let node = self.resolve_alias(&name, mark)?;
                self.push_value(node);
            }
            Event::SequenceStart { anchor, tag, .. } => {
                self.frames.push(Frame {
                    node: Node::sequence(tag, mark),
                    anchor,
                    pending_key: None,
                });
            }
            Event::MappingStart { anchor, tag, .. } => {
                self.frames.push(Frame {
                    node: Node::mapping(tag, mark),
                    anchor,
                    pending_key: None,
                });
            }
            Event::SequenceEnd | Event::MappingEnd => {
                let frame = self.frames.pop().expect("inconsistent builder state");
                if let Some(name) = frame.anchor {
                    self.anchors.insert(name, frame.node.clone());
                }
                self.push_value(frame.node);
            }
            Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart { .. }
            | Event::DocumentEnd { .. } => {}
        }
        Ok(())
    }

    /// An alias names either a completed node or a still-open collection.
    /// The latter resolves to a snapshot of what has been built so far, a
    /// finite clone; the tree never contains cycles.
    fn resolve_alias(&self, name: &str, mark: Mark) -> Result<Node, Error> {
        if let Some(node) = self.anchors.get(name) {
            return Ok(node.clone());
        }
        for frame in self.frames.iter().rev() {
            if frame.anchor.as_deref() == Some(name) {
                return Ok(frame.node.clone());
            }
        }
        Err(BuilderError::AnchorNotFound(name.to_owned(), mark).into())
    }

    fn push_value(&mut self, node: Node) {
        let Some(frame) = self.frames.last_mut() else {
            self.root = Some(node);
            return;
        };
        match frame.node.kind() {
            NodeKind::Sequence => frame.node.push_item(node),
            NodeKind::Mapping => match frame.pending_key.take() {
                Some(key) => frame.node.insert_pair(key, node),
                None => frame.pending_key = Some(node),
            },
            NodeKind::Scalar => panic!("inconsistent builder state"),
        }
    }

    fn finish(&mut self) -> Node {
        self.root.take().unwrap_or_else(Node::null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[track_caller]
    fn parse_one(input: &str) -> Node {
        let mut parser = Parser::new(input.as_bytes());
        parser
            .next_document()
            .unwrap_or_else(|e| panic!("error: {e}"))
            .expect("no document")
    }

    #[test]
    fn scalar_document() {
        let doc = parse_one("5");
        assert_eq!(doc.kind(), NodeKind::Scalar);
        assert_eq!(doc.as_int().unwrap(), 5);
    }

    #[test]
    fn mapping_document() {
        let doc = parse_one("name: Prince Fielder\nposition: 1B");
        assert_eq!(doc.kind(), NodeKind::Mapping);
        assert_eq!(doc.at("name").unwrap().as_scalar().unwrap(), "Prince Fielder");
        assert_eq!(doc.at("position").unwrap().as_scalar().unwrap(), "1B");
    }

    #[test]
    fn alias_copies_the_anchored_node() {
        let doc = parse_one("- &alias test\n- *alias");
        assert_eq!(doc.size(), 2);
        assert_eq!(doc.at(0).unwrap(), doc.at(1).unwrap());
        assert_eq!(doc.at(1).unwrap().as_scalar().unwrap(), "test");
    }

    #[test]
    fn anchor_on_a_simple_key() {
        let doc = parse_one("- &a b: c\n- *a");
        assert_eq!(doc.size(), 2);
        assert_eq!(doc.at(0).unwrap().at("b").unwrap().as_scalar().unwrap(), "c");
        assert_eq!(doc.at(1).unwrap().as_scalar().unwrap(), "b");
    }

    #[test]
    fn alias_into_its_own_anchor_takes_a_snapshot() {
        let doc = parse_one("&a [1, *a]");
        assert_eq!(doc.size(), 2);
        let snapshot = doc.at(1).unwrap();
        assert_eq!(snapshot.size(), 1);
        assert_eq!(snapshot.at(0).unwrap().as_int().unwrap(), 1);
    }

    #[test]
    fn unknown_alias_fails() {
        let mut parser = Parser::new(&b"- *nope"[..]);
        let err = parser.next_document().unwrap_err();
        assert!(matches!(
            err,
            Error::Builder(BuilderError::AnchorNotFound(_, _))
        ));
    }

    #[test]
    fn anchors_reset_between_documents() {
        let mut parser = Parser::new(&b"--- &a one\n--- *a"[..]);
        let first = parser.next_document().unwrap().expect("first document");
        assert_eq!(first.as_scalar().unwrap(), "one");
        let err = parser.next_document().unwrap_err();
        assert!(matches!(
            err,
            Error::Builder(BuilderError::AnchorNotFound(_, _))
        ));
    }

    #[test]
    fn last_anchor_wins() {
        let doc = parse_one("- &a one\n- &a two\n- *a");
        assert_eq!(doc.at(2).unwrap().as_scalar().unwrap(), "two");
    }

    #[test]
    fn empty_stream_has_no_documents() {
        let mut parser = Parser::new(&b""[..]);
        assert!(parser.next_document().unwrap().is_none());
        assert!(parser.next_document().unwrap().is_none());
    }
}
