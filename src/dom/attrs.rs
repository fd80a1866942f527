//! Sparse attribute storage for document nodes.
//!
//! Most nodes carry no attributes at all, and the eId engine reads and writes
//! exactly one (`eId`), so that attribute gets a dedicated map. Remaining
//! attributes are kept per node in document order for serialization fidelity.
//!
//! String values live in a single contiguous buffer addressed by [`TextRange`]
//! references, avoiding per-attribute allocations. Rewriting a value appends
//! the replacement and re-points the entry; old bytes become unreachable but
//! buffer space is not reclaimed.

use std::collections::HashMap;

use super::node::{NodeId, TextRange};

/// The attribute name the eId engine operates on.
pub const EID_ATTR: &str = "eId";

/// Sparse map of node attributes.
#[derive(Debug, Default, Clone)]
pub struct AttrMap {
    /// Contiguous buffer for all attribute names and values.
    buffer: String,
    /// eId attribute (the engine's single read/write surface).
    eid: HashMap<NodeId, TextRange>,
    /// All other attributes, in document order per node.
    extra: HashMap<NodeId, Vec<(TextRange, TextRange)>>,
}

impl AttrMap {
    /// Create a new empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a string to the buffer and return its TextRange.
    fn append(&mut self, s: &str) -> TextRange {
        let start = self.buffer.len() as u32;
        self.buffer.push_str(s);
        TextRange::new(start, s.len() as u32)
    }

    /// Get a string slice from a TextRange.
    fn get_str(&self, range: TextRange) -> &str {
        let start = range.start as usize;
        let end = (range.start + range.len) as usize;
        &self.buffer[start..end]
    }

    // --- eId ---

    /// Set the eId for a node.
    ///
    /// Empty values are ignored: an empty eId is indistinguishable from an
    /// absent one, matching how the engine treats the attribute.
    pub fn set_eid(&mut self, node: NodeId, eid: &str) {
        if !eid.is_empty() {
            let range = self.append(eid);
            self.eid.insert(node, range);
        }
    }

    /// Get the eId for a node.
    pub fn eid(&self, node: NodeId) -> Option<&str> {
        self.eid.get(&node).map(|r| self.get_str(*r))
    }

    // --- other attributes ---

    /// Set an attribute by name.
    ///
    /// `eId` is routed to its dedicated map; any other name is stored in the
    /// node's extra-attribute list, replacing an existing entry of the same
    /// name or appending in document order.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if name == EID_ATTR {
            self.set_eid(node, value);
            return;
        }

        let existing = self
            .extra
            .get(&node)
            .and_then(|attrs| attrs.iter().position(|(n, _)| self.get_str(*n) == name));

        let value_range = self.append(value);
        match existing {
            Some(pos) => {
                if let Some(attrs) = self.extra.get_mut(&node) {
                    attrs[pos].1 = value_range;
                }
            }
            None => {
                let name_range = self.append(name);
                self.extra
                    .entry(node)
                    .or_default()
                    .push((name_range, value_range));
            }
        }
    }

    /// Get an attribute by name.
    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        if name == EID_ATTR {
            return self.eid(node);
        }
        self.extra.get(&node).and_then(|attrs| {
            attrs
                .iter()
                .find(|(n, _)| self.get_str(*n) == name)
                .map(|(_, v)| self.get_str(*v))
        })
    }

    /// Iterate over a node's non-eId attributes in document order.
    pub fn extras(&self, node: NodeId) -> impl Iterator<Item = (&str, &str)> {
        self.extra
            .get(&node)
            .map(|attrs| attrs.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|(n, v)| (self.get_str(*n), self.get_str(*v)))
    }

    /// Get the total number of stored attributes.
    pub fn len(&self) -> usize {
        self.eid.len() + self.extra.values().map(Vec::len).sum::<usize>()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
