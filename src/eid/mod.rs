//! Assignment and rewriting of eIds across a document tree.
//!
//! eIds are hierarchical: an element's id is its ancestor's id joined with a
//! fragment derived from the element's tag name and number. The number comes
//! from a leading `num` child when present, otherwise from an `nn` placeholder
//! or a per-scope counter. When a recomputed id differs from the stored one,
//! the change cascades through the element's subtree so descendant ids keep
//! the new prefix.

pub mod vocab;

use std::collections::HashMap;

use crate::dom::{Document, NodeId, TagId};

/// Recursion limit for traversal. A tree this deep means the caller handed
/// over a cyclic or otherwise broken structure, which is a contract breach.
const MAX_DEPTH: usize = 512;

/// Assigns unique, hierarchical eIds to every element in a document.
#[derive(Debug, Default)]
pub struct EidRewriter;

impl EidRewriter {
    /// Create a new rewriter.
    pub fn new() -> Self {
        EidRewriter
    }

    /// Rewrite the eIds for all nodes in the tree.
    ///
    /// Counters and uniqueness state are reset on every call, so repeated
    /// rewrites of the same document produce the same ids.
    ///
    /// # Panics
    ///
    /// Panics if the tree is nested deeper than 512 levels, which only
    /// happens when the caller built a cyclic or degenerate structure.
    pub fn rewrite_all_eids(&self, doc: &mut Document) {
        let mut session = Session::default();
        let mut child = doc.node(doc.root()).and_then(|n| n.first_child);
        while let Some(c) = child {
            session.rewrite_element(doc, c, "", 0);
            child = doc.node(c).and_then(|n| n.next_sibling);
        }
    }
}

/// Rewrite the eIds for all nodes in a document.
pub fn rewrite_all_eids(doc: &mut Document) {
    EidRewriter::new().rewrite_all_eids(doc);
}

/// Mutable state for a single rewrite pass.
#[derive(Debug, Default)]
struct Session {
    /// Fallback counters, keyed by (prefix, tag).
    counters: HashMap<(String, TagId), u32>,
    /// Number of times each candidate eId has been handed out.
    eid_counter: HashMap<String, u32>,
}

impl Session {
    fn rewrite_element(&mut self, doc: &mut Document, element: NodeId, prefix: &str, depth: usize) {
        assert!(depth < MAX_DEPTH, "document tree deeper than {MAX_DEPTH} levels");
        let tag = match doc.node(element) {
            Some(node) => node.tag,
            None => return,
        };

        // skip meta blocks
        if doc.tag_name(tag) == "meta" {
            return;
        }

        let old_eid = doc.eid(element).map(str::to_owned);
        let mut new_eid = String::new();

        // only recalculate existing eIds instead of deciding whether the
        // element should have one
        if let Some(old) = old_eid {
            // inside a preface or preamble the parent tag replaces the prefix
            let override_prefix = doc
                .node(element)
                .and_then(|n| n.parent)
                .and_then(|p| doc.node(p))
                .map(|n| doc.tag_name(n.tag))
                .filter(|name| *name == "preface" || *name == "preamble")
                .map(str::to_owned);
            let effective = override_prefix.as_deref().unwrap_or(prefix);

            new_eid = self.compute_eid(doc, element, effective);

            // only rewrite eIds (and their descendants) that have changed
            if old != new_eid {
                log::debug!(target: "aknid.eid", "rewriting {old} to {new_eid}");
                rewrite_eids(doc, element, &old, &new_eid, depth);
            }
        }

        // use the new eId as the prefix if there is one, else keep the parent's
        let next_prefix = if new_eid.is_empty() {
            prefix
        } else {
            new_eid.as_str()
        };
        let mut child = doc.node(element).and_then(|n| n.first_child);
        while let Some(c) = child {
            self.rewrite_element(doc, c, next_prefix, depth + 1);
            child = doc.node(c).and_then(|n| n.next_sibling);
        }
    }

    /// Generate a unique eId for an element from its tag and num contents.
    fn compute_eid(&mut self, doc: &Document, element: NodeId, prefix: &str) -> String {
        let tag = match doc.node(element) {
            Some(node) => node.tag,
            None => return String::new(),
        };
        let name = doc.tag_name(tag);
        let short = vocab::short_name(name);

        // the num only counts when it is literally the first child
        let num_raw = doc
            .node(element)
            .and_then(|n| n.first_child)
            .filter(|&c| doc.node(c).map(|n| doc.tag_name(n.tag)) == Some("num"))
            .map(|c| doc.text_content(c))
            .unwrap_or_default();

        let mut eid = if prefix.is_empty() {
            short.to_string()
        } else {
            format!("{prefix}__{short}")
        };

        if !vocab::eid_unnecessary(name) {
            let mut nn = false;
            let mut num = clean_num(&num_raw);

            // e.g. paragraph_nn for unnumbered elements that usually have a num
            if num.is_empty() && vocab::num_expected(name) {
                num = "nn".to_string();
                nn = true;
            }

            // e.g. hcontainer_1 for unnumbered elements where a num isn't expected
            if num.is_empty() {
                let count = self.counters.entry((prefix.to_string(), tag)).or_insert(0);
                *count += 1;
                num = count.to_string();
            }

            eid = self.ensure_unique(format!("{eid}_{num}"), nn);
        }

        eid
    }

    /// Ensure an eId is unique; appends the count to `nn` and non-unique ids.
    fn ensure_unique(&mut self, eid: String, nn: bool) -> String {
        let count = self
            .eid_counter
            .entry(eid.clone())
            .and_modify(|c| *c += 1)
            .or_insert(1);
        let count = *count;
        if count == 1 && !nn {
            return eid;
        }
        self.ensure_unique(format!("{eid}_{count}"), false)
    }
}

/// Swap the old eId prefix for the new one on an element and all of its
/// descendants, keeping any suffix intact.
fn rewrite_eids(doc: &mut Document, element: NodeId, old_eid: &str, new_eid: &str, depth: usize) {
    assert!(depth < MAX_DEPTH, "document tree deeper than {MAX_DEPTH} levels");
    let rewritten = doc
        .eid(element)
        .and_then(|cur| cur.strip_prefix(old_eid))
        .map(|tail| format!("{new_eid}{tail}"));
    if let Some(eid) = rewritten {
        doc.set_eid(element, &eid);
    }

    let mut child = doc.node(element).and_then(|n| n.first_child);
    while let Some(c) = child {
        rewrite_eids(doc, c, old_eid, new_eid, depth + 1);
        child = doc.node(c).and_then(|n| n.next_sibling);
    }
}

/// Strip brackets, parentheses, and whitespace from a num, then trim
/// surrounding stop runs.
fn clean_num(num: &str) -> String {
    let stripped: String = num
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '[' | ']') && !c.is_whitespace())
        .collect();
    stripped.trim_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Build a document with a single top-level element carrying an eId.
    fn doc_with_root(tag: &str) -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.new_element(tag);
        doc.append_child(doc.root(), root);
        (doc, root)
    }

    fn add_numbered(doc: &mut Document, parent: NodeId, tag: &str, num: &str) -> NodeId {
        let element = doc.new_element(tag);
        doc.append_child(parent, element);
        doc.set_eid(element, "stale");
        let num_el = doc.new_element("num");
        doc.append_child(element, num_el);
        let text = doc.new_text(num);
        doc.append_child(num_el, text);
        element
    }

    #[test]
    fn test_clean_num() {
        assert_eq!(clean_num("(a)"), "a");
        assert_eq!(clean_num("1."), "1");
        assert_eq!(clean_num(" [2] "), "2");
        assert_eq!(clean_num("3.1"), "3.1");
        assert_eq!(clean_num("..."), "");
        assert_eq!(clean_num("(1.2)"), "1.2");
        assert_eq!(clean_num(""), "");
    }

    #[test]
    fn test_numbered_element() {
        let (mut doc, body) = doc_with_root("body");
        let dvs = add_numbered(&mut doc, body, "division", "A.");

        rewrite_all_eids(&mut doc);

        assert_eq!(doc.eid(body), None);
        assert_eq!(doc.eid(dvs), Some("dvs_A"));
    }

    #[test]
    fn test_counter_fallback() {
        let (mut doc, body) = doc_with_root("body");
        let a = doc.new_element("hcontainer");
        let b = doc.new_element("hcontainer");
        doc.append_child(body, a);
        doc.append_child(body, b);
        doc.set_eid(a, "x");
        doc.set_eid(b, "y");

        rewrite_all_eids(&mut doc);

        assert_eq!(doc.eid(a), Some("hcontainer_1"));
        assert_eq!(doc.eid(b), Some("hcontainer_2"));
    }

    #[test]
    fn test_nn_placeholder() {
        let (mut doc, body) = doc_with_root("body");
        let a = doc.new_element("paragraph");
        let b = doc.new_element("paragraph");
        doc.append_child(body, a);
        doc.append_child(body, b);
        doc.set_eid(a, "x");
        doc.set_eid(b, "y");

        rewrite_all_eids(&mut doc);

        assert_eq!(doc.eid(a), Some("para_nn_1"));
        assert_eq!(doc.eid(b), Some("para_nn_2"));
    }

    #[test]
    fn test_duplicate_nums_disambiguated() {
        let (mut doc, body) = doc_with_root("body");
        let a = add_numbered(&mut doc, body, "section", "1");
        let b = add_numbered(&mut doc, body, "section", "1");

        rewrite_all_eids(&mut doc);

        assert_eq!(doc.eid(a), Some("sec_1"));
        assert_eq!(doc.eid(b), Some("sec_1_2"));
    }

    #[test]
    fn test_unnecessary_id_kept_bare() {
        let (mut doc, preface) = doc_with_root("preface");
        doc.set_eid(preface, "something_else");

        rewrite_all_eids(&mut doc);

        assert_eq!(doc.eid(preface), Some("preface"));
    }

    #[test]
    fn test_preface_overrides_prefix() {
        let (mut doc, akn) = doc_with_root("akomaNtoso");
        let act = doc.new_element("act");
        doc.append_child(akn, act);
        let preface = doc.new_element("preface");
        doc.append_child(act, preface);
        // no eId on preface itself
        let p = doc.new_element("p");
        doc.append_child(preface, p);
        doc.set_eid(p, "old");

        rewrite_all_eids(&mut doc);

        assert_eq!(doc.eid(preface), None);
        assert_eq!(doc.eid(p), Some("preface__p_1"));
    }

    #[test]
    fn test_element_without_eid_passes_prefix_through() {
        let (mut doc, body) = doc_with_root("body");
        let dvs = add_numbered(&mut doc, body, "division", "A.");
        let container = doc.new_element("hcontainer");
        doc.append_child(dvs, container);
        let p = doc.new_element("p");
        doc.append_child(container, p);
        doc.set_eid(p, "old");

        rewrite_all_eids(&mut doc);

        assert_eq!(doc.eid(container), None);
        assert_eq!(doc.eid(p), Some("dvs_A__p_1"));
    }

    #[test]
    fn test_meta_skipped_but_cascade_reaches_it() {
        let (mut doc, body) = doc_with_root("body");
        let dvs = add_numbered(&mut doc, body, "division", "B.");
        doc.set_eid(dvs, "dvs_A");
        let meta = doc.new_element("meta");
        doc.append_child(dvs, meta);
        doc.set_eid(meta, "dvs_A__meta");

        rewrite_all_eids(&mut doc);

        // the meta element is never renumbered itself, but the prefix swap
        // from its ancestor still applies
        assert_eq!(doc.eid(dvs), Some("dvs_B"));
        assert_eq!(doc.eid(meta), Some("dvs_B__meta"));
    }

    #[test]
    fn test_top_level_meta_untouched() {
        let (mut doc, meta) = doc_with_root("meta");
        doc.set_eid(meta, "keep_me");
        let inner = doc.new_element("identification");
        doc.append_child(meta, inner);
        doc.set_eid(inner, "keep_me_too");

        rewrite_all_eids(&mut doc);

        assert_eq!(doc.eid(meta), Some("keep_me"));
        assert_eq!(doc.eid(inner), Some("keep_me_too"));
    }

    #[test]
    fn test_num_must_be_first_child() {
        let (mut doc, body) = doc_with_root("body");
        let sec = doc.new_element("section");
        doc.append_child(body, sec);
        doc.set_eid(sec, "x");
        // heading comes first, so the num doesn't count
        let heading = doc.new_element("heading");
        doc.append_child(sec, heading);
        let num_el = doc.new_element("num");
        doc.append_child(sec, num_el);
        let text = doc.new_text("9");
        doc.append_child(num_el, text);

        rewrite_all_eids(&mut doc);

        assert_eq!(doc.eid(sec), Some("sec_nn_1"));
    }

    proptest! {
        #[test]
        fn prop_assigned_eids_are_unique(nums in prop::collection::vec("[a-z0-9(). \\[\\]]{0,6}", 1..20)) {
            let mut doc = Document::new();
            let body = doc.new_element("body");
            doc.append_child(doc.root(), body);
            doc.set_eid(body, "b");
            let mut paragraphs = Vec::new();
            for num in &nums {
                paragraphs.push(add_numbered(&mut doc, body, "paragraph", num));
            }

            rewrite_all_eids(&mut doc);

            let eids: Vec<String> = paragraphs
                .iter()
                .filter_map(|&p| doc.eid(p).map(str::to_owned))
                .collect();
            prop_assert_eq!(eids.len(), nums.len());
            let mut deduped = eids.clone();
            deduped.sort();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), eids.len());

            // a second pass over already-correct ids changes nothing
            rewrite_all_eids(&mut doc);
            let again: Vec<String> = paragraphs
                .iter()
                .filter_map(|&p| doc.eid(p).map(str::to_owned))
                .collect();
            prop_assert_eq!(again, eids);
        }

        #[test]
        fn prop_clean_num_strips_everything(num in "[a-z0-9(). \\[\\]]{0,12}") {
            let cleaned = clean_num(&num);
            prop_assert!(!cleaned.contains(['(', ')', '[', ']', ' ']));
            prop_assert!(!cleaned.starts_with('.'));
            prop_assert!(!cleaned.ends_with('.'));
        }
    }
}
