//! XML bridge for document trees.
//!
//! Parses Akoma Ntoso XML into a [`Document`] and serializes it back out.
//! Whitespace-only text is dropped during parsing, so a leading `num` element
//! is its parent's literal first child even in indented input. Text is trimmed
//! at both ends of every text event, so inter-element whitespace in mixed
//! content is not preserved either. Serialization is compact: no declaration,
//! no added whitespace, childless elements self-closed, and the eId attribute
//! written first.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};

/// Maximum element nesting depth accepted by the parser.
const MAX_DEPTH: usize = 512;

/// Parse an XML string into a document tree.
///
/// Every text event is trimmed at both ends, so `<i>Noting</i> the report`
/// comes back as `<i>Noting</i>the report`. Identifier rewriting never needs
/// that whitespace; callers that do should keep their own copy of the input.
pub fn parse_document(xml: &str) -> Result<Document> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut doc = Document::new();
    let mut stack: Vec<NodeId> = vec![doc.root()];
    let mut pending_text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                flush_text(&mut doc, &stack, &mut pending_text);
                if stack.len() > MAX_DEPTH {
                    return Err(Error::InvalidDocument(format!(
                        "element nesting deeper than {MAX_DEPTH}"
                    )));
                }
                let name = String::from_utf8(e.name().as_ref().to_vec())?;
                let element = doc.new_element(&name);
                for attr in e.attributes().flatten() {
                    let key = String::from_utf8(attr.key.as_ref().to_vec())?;
                    let value = String::from_utf8(attr.value.to_vec())?;
                    doc.set_attr(element, &key, &resolve_entities(&value));
                }
                if let Some(&parent) = stack.last() {
                    doc.append_child(parent, element);
                }
                stack.push(element);
            }
            Ok(Event::Empty(e)) => {
                flush_text(&mut doc, &stack, &mut pending_text);
                let name = String::from_utf8(e.name().as_ref().to_vec())?;
                let element = doc.new_element(&name);
                for attr in e.attributes().flatten() {
                    let key = String::from_utf8(attr.key.as_ref().to_vec())?;
                    let value = String::from_utf8(attr.value.to_vec())?;
                    doc.set_attr(element, &key, &resolve_entities(&value));
                }
                if let Some(&parent) = stack.last() {
                    doc.append_child(parent, element);
                }
            }
            Ok(Event::Text(e)) => {
                pending_text.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Ok(Event::GeneralRef(e)) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                if let Some(resolved) = resolve_entity(&entity) {
                    pending_text.push_str(&resolved);
                }
            }
            Ok(Event::End(_)) => {
                flush_text(&mut doc, &stack, &mut pending_text);
                if stack.len() <= 1 {
                    return Err(Error::InvalidDocument(
                        "closing tag without a matching open".to_string(),
                    ));
                }
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    if stack.len() > 1 {
        return Err(Error::InvalidDocument(
            "document ended with unclosed elements".to_string(),
        ));
    }

    Ok(doc)
}

/// Append any accumulated text as a text node under the open element.
fn flush_text(doc: &mut Document, stack: &[NodeId], pending: &mut String) {
    if !pending.is_empty()
        && let Some(&parent) = stack.last()
    {
        let text = doc.new_text(pending);
        doc.append_child(parent, text);
        pending.clear();
    }
}

/// Serialize a document tree to an XML string.
pub fn write_document(doc: &Document) -> String {
    let mut out = String::new();
    let mut child = doc.node(doc.root()).and_then(|n| n.first_child);
    while let Some(c) = child {
        write_node(doc, c, &mut out);
        child = doc.node(c).and_then(|n| n.next_sibling);
    }
    out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    let Some(node) = doc.node(id) else { return };

    if node.is_text() {
        out.push_str(&escape_xml(doc.text(node.text)));
        return;
    }

    let name = doc.tag_name(node.tag);
    out.push('<');
    out.push_str(name);
    if let Some(eid) = doc.eid(id) {
        out.push_str(&format!(" eId=\"{}\"", escape_xml(eid)));
    }
    for (attr, value) in doc.extra_attrs(id) {
        out.push_str(&format!(" {}=\"{}\"", attr, escape_xml(value)));
    }

    if node.first_child.is_none() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    let mut child = node.first_child;
    while let Some(c) = child {
        write_node(doc, c, out);
        child = doc.node(c).and_then(|n| n.next_sibling);
    }
    out.push_str(&format!("</{name}>"));
}

/// Resolve entity references embedded in an attribute value.
///
/// The reader reports references in text content as separate events, but
/// attribute values arrive raw. Unresolvable references are dropped, the same
/// as in text content.
fn resolve_entities(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match after.find(';') {
            Some(semi) => {
                if let Some(resolved) = resolve_entity(&after[..semi]) {
                    out.push_str(&resolved);
                }
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Resolve XML entity references.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        if let Ok(code) = u32::from_str_radix(hex, 16)
            && let Some(c) = char::from_u32(code)
        {
            return Some(c.to_string());
        }
    } else if let Some(dec) = entity.strip_prefix('#')
        && let Ok(code) = dec.parse::<u32>()
        && let Some(c) = char::from_u32(code)
    {
        return Some(c.to_string());
    }

    None
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
