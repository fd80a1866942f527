//! # aknid
//!
//! A fast, lightweight library for assigning and rewriting eIds in
//! Akoma Ntoso legal document trees.
//!
//! ## Features
//!
//! - Stable, unique, hierarchical eIds derived from element structure
//! - Prefix rewrites cascade through a changed element's subtree
//! - Arena-based document trees with interned tags and pooled text
//! - Parse and serialize Akoma Ntoso XML
//!
//! ## Quick Start
//!
//! ```
//! use aknid::{parse_document, rewrite_all_eids, write_document};
//!
//! let mut doc = parse_document(
//!     r#"<body><division eId="x"><num>A.</num><content eId="y"><p>text</p></content></division></body>"#,
//! ).unwrap();
//!
//! rewrite_all_eids(&mut doc);
//!
//! assert_eq!(
//!     write_document(&doc),
//!     r#"<body><division eId="dvs_A"><num>A.</num><content eId="dvs_A__content_1"><p>text</p></content></division></body>"#,
//! );
//! ```
//!
//! ## Working with Documents
//!
//! The [`Document`] struct is the central data type. Trees can also be built
//! directly, without going through XML:
//!
//! ```
//! use aknid::{Document, rewrite_all_eids};
//!
//! let mut doc = Document::new();
//! let body = doc.new_element("body");
//! doc.append_child(doc.root(), body);
//! let section = doc.new_element("section");
//! doc.append_child(body, section);
//! doc.set_eid(section, "placeholder");
//!
//! rewrite_all_eids(&mut doc);
//! assert_eq!(doc.eid(section), Some("sec_nn_1"));
//! ```

pub mod dom;
pub mod eid;
pub mod error;
pub mod xml;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use dom::{Document, Node, NodeId, TagId, TextRange};
pub use eid::{EidRewriter, rewrite_all_eids};
pub use error::{Error, Result};
pub use xml::{parse_document, write_document};
