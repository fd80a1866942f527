//! Tree node types.

use super::tags::TagId;

/// Unique identifier for a node within a [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The synthetic document node (always 0).
    pub const ROOT: NodeId = NodeId(0);
}

/// Range into the document's shared text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRange {
    /// Byte offset into `Document::text`.
    pub start: u32,
    /// Length in bytes.
    pub len: u32,
}

impl TextRange {
    /// Create a new text range.
    pub fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    /// Check if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A node in the document tree.
///
/// The tree uses a parent-pointer / first-child / next-sibling representation;
/// sibling order is document order and is semantically meaningful (ordinal
/// counters in the eId engine depend on it).
#[derive(Debug, Clone)]
pub struct Node {
    /// Interned tag name. [`TagId::TEXT`] marks text nodes.
    pub tag: TagId,
    /// Parent node (None for the document node).
    pub parent: Option<NodeId>,
    /// First child node.
    pub first_child: Option<NodeId>,
    /// Next sibling node.
    pub next_sibling: Option<NodeId>,
    /// Text content range (only for text nodes).
    pub text: TextRange,
}

impl Node {
    /// Create a new element node with the given tag.
    pub fn element(tag: TagId) -> Self {
        Self {
            tag,
            parent: None,
            first_child: None,
            next_sibling: None,
            text: TextRange::default(),
        }
    }

    /// Create a text node with the given range.
    pub fn text(range: TextRange) -> Self {
        Self {
            tag: TagId::TEXT,
            parent: None,
            first_child: None,
            next_sibling: None,
            text: range,
        }
    }

    /// Check if this is a text node.
    pub fn is_text(&self) -> bool {
        self.tag == TagId::TEXT
    }
}
