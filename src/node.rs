use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::{schema, Mark, NodeError};

/// One node of a parsed document: a scalar, an ordered sequence, or an
/// insertion-ordered mapping. Every node carries its resolved tag and the
/// position it was read from.
///
/// Equality and hashing compare content only; tags, styles, and marks are
/// ignored. That makes an alias compare equal to its anchor target, and it
/// is the equality used for mapping-key lookup.
#[derive(Debug, Clone)]
pub struct Node {
    tag: String,
    mark: Mark,
    data: NodeData,
}

#[derive(Debug, Clone)]
enum NodeData {
    Scalar(String),
    Sequence(Vec<Node>),
    Mapping(Mapping),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Scalar,
    Sequence,
    Mapping,
}

/// Insertion-ordered pairs with a content-hash index for O(1) lookup, so
/// sequence- and mapping-valued keys cost the same as string keys.
#[derive(Debug, Clone, Default)]
struct Mapping {
    pairs: Vec<(Node, Node)>,
    index: HashMap<u64, Vec<usize>>,
}

impl Mapping {
    /// Last value wins on duplicate keys; the key keeps its first position.
    fn insert(&mut self, key: Node, value: Node) {
        let hash = content_hash(&key);
        let slots = self.index.entry(hash).or_default();
        for &i in slots.iter() {
            if self.pairs[i].0 == key {
                self.pairs[i].1 = value;
                return;
            }
        }
        slots.push(self.pairs.len());
        self.pairs.push((key, value));
    }

    fn get(&self, key: &Node) -> Option<&Node> {
        let slots = self.index.get(&content_hash(key))?;
        slots
            .iter()
            .find(|&&i| self.pairs[i].0 == *key)
            .map(|&i| &self.pairs[i].1)
    }
}

fn content_hash(node: &Node) -> u64 {
    let mut hasher = DefaultHasher::new();
    node.hash(&mut hasher);
    hasher.finish()
}

fn describe(node: &Node) -> String {
    match &node.data {
        NodeData::Scalar(value) => value.clone(),
        NodeData::Sequence(_) => "<sequence>".to_owned(),
        NodeData::Mapping(_) => "<mapping>".to_owned(),
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (&self.data, &other.data) {
            (NodeData::Scalar(a), NodeData::Scalar(b)) => a == b,
            (NodeData::Sequence(a), NodeData::Sequence(b)) => a == b,
            (NodeData::Mapping(a), NodeData::Mapping(b)) => a.pairs == b.pairs,
            _ => false,
        }
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match &self.data {
            NodeData::Scalar(value) => {
                0u8.hash(state);
                value.hash(state);
            }
            NodeData::Sequence(items) => {
                1u8.hash(state);
                items.hash(state);
            }
            NodeData::Mapping(mapping) => {
                2u8.hash(state);
                for (key, value) in &mapping.pairs {
                    key.hash(state);
                    value.hash(state);
                }
            }
        }
    }
}

impl Node {
    pub(crate) fn scalar(value: String, tag: String, mark: Mark) -> Self {
        Self {
            tag,
            mark,
            data: NodeData::Scalar(value),
        }
    }

    pub(crate) fn sequence(tag: String, mark: Mark) -> Self {
        Self {
            tag,
            mark,
            data: NodeData::Sequence(Vec::new()),
        }
    }

    pub(crate) fn mapping(tag: String, mark: Mark) -> Self {
        Self {
            tag,
            mark,
            data: NodeData::Mapping(Mapping::default()),
        }
    }

    /// A null scalar, also usable to look up mappings with omitted keys.
    pub fn null() -> Self {
        Self::scalar(String::new(), "?".to_owned(), Mark::default())
    }

    pub(crate) fn push_item(&mut self, item: Node) {
        match &mut self.data {
            NodeData::Sequence(items) => items.push(item),
            _ => panic!("push_item on a non-sequence node"),
        }
    }

    pub(crate) fn insert_pair(&mut self, key: Node, value: Node) {
        match &mut self.data {
            NodeData::Mapping(mapping) => mapping.insert(key, value),
            _ => panic!("insert_pair on a non-mapping node"),
        }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::Scalar(_) => NodeKind::Scalar,
            NodeData::Sequence(_) => NodeKind::Sequence,
            NodeData::Mapping(_) => NodeKind::Mapping,
        }
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Element count for sequences and mappings; 0 for scalars.
    pub fn size(&self) -> usize {
        match &self.data {
            NodeData::Scalar(_) => 0,
            NodeData::Sequence(items) => items.len(),
            NodeData::Mapping(mapping) => mapping.pairs.len(),
        }
    }

    pub fn is_null(&self) -> bool {
        match &self.data {
            NodeData::Scalar(value) => schema::is_null(value),
            _ => false,
        }
    }

    /// Look up a child: a `usize` indexes sequences (or integer-looking
    /// mapping keys), a `&str` looks up scalar mapping keys, and a `&Node`
    /// looks up any key by deep value equality.
    pub fn at<I: NodeIndex>(&self, index: I) -> Result<&Node, NodeError> {
        index.index_into(self)
    }

    pub fn as_scalar(&self) -> Result<&str, NodeError> {
        match &self.data {
            NodeData::Scalar(value) => Ok(value),
            _ => Err(NodeError::InvalidScalar(describe(self))),
        }
    }

    pub fn as_int(&self) -> Result<i64, NodeError> {
        let value = self.as_scalar()?;
        schema::parse_int(value).ok_or_else(|| NodeError::InvalidScalar(value.to_owned()))
    }

    pub fn as_uint(&self) -> Result<u64, NodeError> {
        let value = self.as_scalar()?;
        schema::parse_uint(value).ok_or_else(|| NodeError::InvalidScalar(value.to_owned()))
    }

    pub fn as_float(&self) -> Result<f64, NodeError> {
        let value = self.as_scalar()?;
        schema::parse_float(value).ok_or_else(|| NodeError::InvalidScalar(value.to_owned()))
    }

    pub fn as_bool(&self) -> Result<bool, NodeError> {
        let value = self.as_scalar()?;
        schema::parse_bool(value).ok_or_else(|| NodeError::InvalidScalar(value.to_owned()))
    }

    /// Decode the scalar text as base64, ignoring whitespace.
    pub fn as_binary(&self) -> Result<Vec<u8>, NodeError> {
        let value = self.as_scalar()?;
        schema::decode_base64(value).ok_or_else(|| NodeError::InvalidScalar(value.to_owned()))
    }

    pub fn iter(&self) -> Entries<'_> {
        Entries {
            source: match &self.data {
                NodeData::Scalar(_) => EntrySource::Scalar,
                NodeData::Sequence(items) => EntrySource::Sequence(items),
                NodeData::Mapping(mapping) => EntrySource::Mapping(&mapping.pairs),
            },
            pos: 0,
        }
    }
}

pub trait NodeIndex {
    fn index_into<'a>(self, node: &'a Node) -> Result<&'a Node, NodeError>;
}

impl NodeIndex for usize {
    fn index_into<'a>(self, node: &'a Node) -> Result<&'a Node, NodeError> {
        match &node.data {
            NodeData::Sequence(items) => items
                .get(self)
                .ok_or_else(|| NodeError::KeyNotFound(self.to_string())),
            NodeData::Mapping(mapping) => {
                let key = Node::scalar(self.to_string(), "?".to_owned(), Mark::default());
                mapping
                    .get(&key)
                    .ok_or_else(|| NodeError::KeyNotFound(self.to_string()))
            }
            NodeData::Scalar(_) => Err(NodeError::KeyNotFound(self.to_string())),
        }
    }
}

impl NodeIndex for &str {
    fn index_into<'a>(self, node: &'a Node) -> Result<&'a Node, NodeError> {
        match &node.data {
            NodeData::Mapping(mapping) => {
                let key = Node::scalar(self.to_owned(), "?".to_owned(), Mark::default());
                mapping
                    .get(&key)
                    .ok_or_else(|| NodeError::KeyNotFound(self.to_owned()))
            }
            _ => Err(NodeError::KeyNotFound(self.to_owned())),
        }
    }
}

impl NodeIndex for &Node {
    fn index_into<'a>(self, node: &'a Node) -> Result<&'a Node, NodeError> {
        match &node.data {
            NodeData::Mapping(mapping) => mapping
                .get(self)
                .ok_or_else(|| NodeError::KeyNotFound(describe(self))),
            _ => Err(NodeError::KeyNotFound(describe(self))),
        }
    }
}

/// Cursor-style iterator over a node's entries.
///
/// As an [`Iterator`] it yields [`Entry::Item`] for sequences and
/// [`Entry::Pair`] for mappings, and nothing for scalars. The `node`,
/// `key`, and `value` accessors address the entry at the cursor and raise
/// the kind-mismatch errors; they never fail at construction time.
pub struct Entries<'a> {
    source: EntrySource<'a>,
    pos: usize,
}

#[derive(Clone, Copy)]
enum EntrySource<'a> {
    Scalar,
    Sequence(&'a [Node]),
    Mapping(&'a [(Node, Node)]),
}

#[derive(Debug, Clone, Copy)]
pub enum Entry<'a> {
    Item(&'a Node),
    Pair(&'a Node, &'a Node),
}

impl<'a> Entries<'a> {
    /// The current entry as a sequence element.
    pub fn node(&self) -> Result<&'a Node, NodeError> {
        match self.source {
            EntrySource::Scalar => Err(NodeError::DereferenceScalar),
            EntrySource::Mapping(_) => Err(NodeError::DereferenceMap),
            EntrySource::Sequence(items) => {
                items.get(self.pos).ok_or(NodeError::BadDereference)
            }
        }
    }

    /// The key of the current mapping entry.
    pub fn key(&self) -> Result<&'a Node, NodeError> {
        match self.source {
            EntrySource::Scalar => Err(NodeError::DereferenceKeyScalar),
            EntrySource::Sequence(_) => Err(NodeError::DereferenceKeySeq),
            EntrySource::Mapping(pairs) => pairs
                .get(self.pos)
                .map(|(key, _)| key)
                .ok_or(NodeError::BadDereference),
        }
    }

    /// The value of the current mapping entry.
    pub fn value(&self) -> Result<&'a Node, NodeError> {
        match self.source {
            EntrySource::Scalar => Err(NodeError::DereferenceValueScalar),
            EntrySource::Sequence(_) => Err(NodeError::DereferenceValueSeq),
            EntrySource::Mapping(pairs) => pairs
                .get(self.pos)
                .map(|(_, value)| value)
                .ok_or(NodeError::BadDereference),
        }
    }

    /// Advance the cursor. Returns false once exhausted.
    pub fn advance(&mut self) -> bool {
        let len = match self.source {
            EntrySource::Scalar => 0,
            EntrySource::Sequence(items) => items.len(),
            EntrySource::Mapping(pairs) => pairs.len(),
        };
        if self.pos < len {
            self.pos += 1;
        }
        self.pos < len
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = Entry<'a>;

    fn next(&mut self) -> Option<Entry<'a>> {
        let entry = match self.source {
            EntrySource::Scalar => return None,
            EntrySource::Sequence(items) => Entry::Item(items.get(self.pos)?),
            EntrySource::Mapping(pairs) => {
                let (key, value) = pairs.get(self.pos)?;
                Entry::Pair(key, value)
            }
        };
        self.pos += 1;
        Some(entry)
    }
}
