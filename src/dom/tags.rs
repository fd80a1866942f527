//! Interned tag names.
//!
//! Akoma Ntoso documents repeat a small set of tag names thousands of times
//! (`paragraph`, `p`, `num`, ...), so nodes store a compact [`TagId`] and the
//! pool holds one copy of each distinct name.

use std::collections::HashMap;

/// Interned tag name identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagId(pub u32);

impl TagId {
    /// The synthetic document node's tag (`#document`, always 0).
    pub const DOCUMENT: TagId = TagId(0);
    /// The text node tag (`#text`, always 1).
    pub const TEXT: TagId = TagId(1);
}

/// Deduplicating pool of tag names.
#[derive(Debug, Clone)]
pub struct TagPool {
    /// All unique tag names.
    names: Vec<String>,
    /// Hash-based deduplication map.
    intern_map: HashMap<String, TagId>,
}

impl Default for TagPool {
    fn default() -> Self {
        Self::new()
    }
}

impl TagPool {
    /// Create a new pool with `#document` and `#text` pre-interned.
    pub fn new() -> Self {
        let mut pool = Self {
            names: Vec::new(),
            intern_map: HashMap::new(),
        };
        pool.intern("#document");
        pool.intern("#text");
        pool
    }

    /// Intern a tag name, returning its [`TagId`].
    ///
    /// If the name is already known, returns the existing ID.
    pub fn intern(&mut self, name: &str) -> TagId {
        if let Some(&id) = self.intern_map.get(name) {
            return id;
        }

        let id = TagId(self.names.len() as u32);
        self.intern_map.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    /// Look up a name without interning it.
    pub fn lookup(&self, name: &str) -> Option<TagId> {
        self.intern_map.get(name).copied()
    }

    /// Get the name for a [`TagId`].
    pub fn name(&self, id: TagId) -> &str {
        self.names.get(id.0 as usize).map_or("", |n| n.as_str())
    }

    /// Get the number of distinct names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the pool is empty (never true; the reserved names are always present).
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
