//! Akoma Ntoso element vocabulary for eId construction.
//!
//! This module defines which element names are abbreviated in eIds, which
//! never take a numbered eId, and which are expected to carry a `num`.

/// Map an element name to its abbreviated eId fragment, if it has one.
pub fn alias(name: &str) -> Option<&'static str> {
    match name {
        // Document bodies all share one fragment
        "amendmentBody" | "debateBody" | "judgmentBody" | "mainBody" => Some("body"),

        // Hierarchical containers
        "alinea" => Some("al"),
        "article" => Some("art"),
        "chapter" => Some("chp"),
        "clause" => Some("cl"),
        "division" => Some("dvs"),
        "paragraph" => Some("para"),
        "section" => Some("sec"),
        "subchapter" => Some("subchp"),
        "subclause" => Some("subcl"),
        "subdivision" => Some("subdvs"),
        "subparagraph" => Some("subpara"),
        "subsection" => Some("subsec"),

        // Citations and recitals
        "citation" => Some("cit"),
        "citations" => Some("cits"),
        "recital" => Some("rec"),
        "recitals" => Some("recs"),

        // Attachments and components
        "attachment" => Some("att"),
        "component" => Some("cmp"),
        "componentRef" => Some("cref"),
        "components" => Some("cmpnts"),

        // References
        "documentRef" => Some("dref"),
        "eventRef" => Some("eref"),

        // Blocks and inlines
        "blockList" => Some("list"),
        "debateSection" => Some("dbsect"),
        "listIntroduction" => Some("intro"),
        "listWrapUp" | "wrapUp" => Some("wrapup"),
        "quotedStructure" => Some("qstr"),
        "quotedText" => Some("qtext"),
        "temporalGroup" => Some("tmpg"),

        _ => None,
    }
}

/// Get the fragment used for an element in an eId: its alias, or the name itself.
pub fn short_name(name: &str) -> &str {
    alias(name).unwrap_or(name)
}

/// Check whether an element takes a bare prefixed eId, with no number and no
/// uniqueness pass.
pub fn eid_unnecessary(name: &str) -> bool {
    matches!(
        name,
        "arguments"
            | "background"
            | "conclusions"
            | "decision"
            | "header"
            | "introduction"
            | "motivation"
            | "preamble"
            | "preface"
            | "remedies"
    )
}

/// Check whether an element is expected to carry a `num`, so a missing one is
/// marked with the `nn` placeholder.
pub fn num_expected(name: &str) -> bool {
    matches!(
        name,
        "alinea"
            | "article"
            | "book"
            | "chapter"
            | "clause"
            | "division"
            | "indent"
            | "item"
            | "level"
            | "list"
            | "paragraph"
            | "part"
            | "point"
            | "proviso"
            | "rule"
            | "section"
            | "subchapter"
            | "subclause"
            | "subdivision"
            | "sublist"
            | "subparagraph"
            | "subpart"
            | "subrule"
            | "subsection"
            | "subtitle"
            | "title"
            | "tome"
            | "transitional"
    )
}
