//! Arena-based document tree.
//!
//! A [`Document`] owns every node in a flat `Vec`, linked through
//! parent/first-child/next-sibling indices. Tag names are interned in a
//! [`TagPool`], text content lives in one contiguous buffer, and attributes
//! are stored sparsely in an [`AttrMap`].

pub mod attrs;
pub mod node;
pub mod tags;

pub use attrs::{AttrMap, EID_ATTR};
pub use node::{Node, NodeId, TextRange};
pub use tags::{TagId, TagPool};

/// A document tree with interned tags, pooled text, and sparse attributes.
#[derive(Debug, Default, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    tags: TagPool,
    attrs: AttrMap,
    text: String,
}

impl Document {
    /// Create a new document containing only the root node.
    pub fn new() -> Self {
        let mut doc = Document {
            nodes: Vec::new(),
            tags: TagPool::new(),
            attrs: AttrMap::new(),
            text: String::new(),
        };
        doc.nodes.push(Node::element(TagId::DOCUMENT));
        doc
    }

    /// Get the root node id.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable node by id.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Get the number of nodes in the document.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Create a detached element node with the given tag name.
    pub fn new_element(&mut self, name: &str) -> NodeId {
        let tag = self.tags.intern(name);
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::element(tag));
        id
    }

    /// Create a detached text node with the given content.
    pub fn new_text(&mut self, content: &str) -> NodeId {
        let start = self.text.len() as u32;
        self.text.push_str(content);
        let range = TextRange::new(start, content.len() as u32);
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::text(range));
        id
    }

    /// Append a node as the last child of a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        match self.node(parent).and_then(|n| n.first_child) {
            None => {
                if let Some(node) = self.node_mut(parent) {
                    node.first_child = Some(child);
                }
            }
            Some(mut last) => {
                while let Some(next) = self.node(last).and_then(|n| n.next_sibling) {
                    last = next;
                }
                if let Some(node) = self.node_mut(last) {
                    node.next_sibling = Some(child);
                }
            }
        }
    }

    /// Iterate over the children of a node.
    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        ChildIter {
            doc: self,
            next: self.node(id).and_then(|n| n.first_child),
        }
    }

    /// Get the name of an interned tag.
    pub fn tag_name(&self, tag: TagId) -> &str {
        self.tags.name(tag)
    }

    /// Look up the id of an interned tag name, if present.
    pub fn lookup_tag(&self, name: &str) -> Option<TagId> {
        self.tags.lookup(name)
    }

    /// Get a text slice from the document's text buffer.
    pub fn text(&self, range: TextRange) -> &str {
        let start = range.start as usize;
        let end = (range.start + range.len) as usize;
        &self.text[start..end]
    }

    /// Collect the concatenated text content of a node's subtree.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.node(current) {
                if node.is_text() {
                    out.push_str(self.text(node.text));
                }
            }
            let children: Vec<NodeId> = self.children(current).collect();
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Get a node's eId attribute.
    pub fn eid(&self, id: NodeId) -> Option<&str> {
        self.attrs.eid(id)
    }

    /// Set a node's eId attribute. Empty values are ignored.
    pub fn set_eid(&mut self, id: NodeId, eid: &str) {
        self.attrs.set_eid(id, eid);
    }

    /// Get a node's attribute by name.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attrs.attr(id, name)
    }

    /// Set a node's attribute by name.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        self.attrs.set_attr(id, name, value);
    }

    /// Iterate over a node's non-eId attributes in document order.
    pub fn extra_attrs(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.extras(id)
    }

    /// Find the first node (in document order) with the given eId.
    pub fn node_by_eid(&self, eid: &str) -> Option<NodeId> {
        let mut stack = vec![self.root()];
        while let Some(current) = stack.pop() {
            if self.eid(current) == Some(eid) {
                return Some(current);
            }
            let children: Vec<NodeId> = self.children(current).collect();
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }
        None
    }
}

/// Iterator over the children of a node.
pub struct ChildIter<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for ChildIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_root() {
        let doc = Document::new();
        assert_eq!(doc.node_count(), 1);
        assert_eq!(doc.node(doc.root()).map(|n| n.tag), Some(TagId::DOCUMENT));
    }

    #[test]
    fn test_append_child_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let a = doc.new_element("section");
        let b = doc.new_element("paragraph");
        let c = doc.new_element("paragraph");
        doc.append_child(root, a);
        doc.append_child(root, b);
        doc.append_child(root, c);

        let children: Vec<NodeId> = doc.children(root).collect();
        assert_eq!(children, vec![a, b, c]);
        assert_eq!(doc.node(b).and_then(|n| n.parent), Some(root));
    }

    #[test]
    fn test_tag_interning() {
        let mut doc = Document::new();
        let a = doc.new_element("paragraph");
        let b = doc.new_element("paragraph");
        let tag_a = doc.node(a).map(|n| n.tag);
        let tag_b = doc.node(b).map(|n| n.tag);
        assert_eq!(tag_a, tag_b);
        assert_eq!(doc.lookup_tag("paragraph"), tag_a);
    }

    #[test]
    fn test_text_content_concatenates_subtree() {
        let mut doc = Document::new();
        let root = doc.root();
        let num = doc.new_element("num");
        let t1 = doc.new_text("1");
        let t2 = doc.new_text(".");
        doc.append_child(root, num);
        doc.append_child(num, t1);
        doc.append_child(num, t2);

        assert_eq!(doc.text_content(num), "1.");
        assert_eq!(doc.text_content(root), "1.");
    }

    #[test]
    fn test_node_by_eid() {
        let mut doc = Document::new();
        let root = doc.root();
        let sec = doc.new_element("section");
        let para = doc.new_element("paragraph");
        doc.append_child(root, sec);
        doc.append_child(sec, para);
        doc.set_eid(sec, "sec_1");
        doc.set_eid(para, "sec_1__para_1");

        assert_eq!(doc.node_by_eid("sec_1"), Some(sec));
        assert_eq!(doc.node_by_eid("sec_1__para_1"), Some(para));
        assert_eq!(doc.node_by_eid("sec_2"), None);
    }
}
