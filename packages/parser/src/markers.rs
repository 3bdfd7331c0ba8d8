//! Marker tag tables shared by the parser and serializer.
//!
//! Tags absent from every table are treated as unstyled text and preserved
//! verbatim, so these lists only need to cover the markers the editor
//! understands structurally.

/// Paragraph-level markers: open a new block, no closing tag
pub const PARAGRAPH_MARKERS: &[&str] = &[
    "p", "m", "po", "pr", "cls", "pmo", "pm", "pmc", "pmr", "pi", "pi1", "pi2", "pi3", "mi", "nb",
    "pc", "b", "q", "q1", "q2", "q3", "q4", "qr", "qc", "qa", "qm", "qm1", "qm2", "d", "sp", "lh",
    "li", "li1", "li2", "li3", "li4", "lf", "mt", "mt1", "mt2", "mt3", "mt4", "ms", "ms1", "ms2",
    "mr", "s", "s1", "s2", "s3", "s4", "sr", "r", "sd", "sd1", "sd2", "ide", "rem", "h", "toc1",
    "toc2", "toc3", "cl", "cp", "cd",
];

/// Character-style markers: paired, closed with `\tag*`
pub const CHAR_MARKERS: &[&str] = &[
    "add", "bk", "dc", "k", "nd", "ord", "pn", "png", "qs", "qt", "sig", "sls", "tl", "wj", "em",
    "bd", "it", "bdit", "no", "sc", "sup", "w", "wa", "wg", "wh", "rb", "ndx", "litl", "lik",
    "liv", "liv1",
];

/// Note-opening markers: paired, content starts with a caller token
pub const NOTE_MARKERS: &[&str] = &["f", "fe", "ef", "x", "ex"];

/// Markers legal inside notes that run until the next marker, no closing tag
pub const NOTE_TEXT_MARKERS: &[&str] = &[
    "fr", "ft", "fq", "fqa", "fk", "fl", "fw", "fp", "fv", "fdc", "fm", "xo", "xk", "xq", "xt",
    "xot", "xnt", "xdc",
];

/// Attribute key carrying word-alignment payload
pub const ALIGNMENT_ATTR: &str = "alignment";

pub fn is_paragraph(tag: &str) -> bool {
    PARAGRAPH_MARKERS.contains(&tag)
}

pub fn is_char(tag: &str) -> bool {
    CHAR_MARKERS.contains(&tag)
}

pub fn is_note(tag: &str) -> bool {
    NOTE_MARKERS.contains(&tag)
}

pub fn is_note_text(tag: &str) -> bool {
    NOTE_TEXT_MARKERS.contains(&tag)
}

/// True for attribute keys that must not survive stripped serialization
pub fn is_alignment_attr(key: &str) -> bool {
    key == ALIGNMENT_ATTR || key.starts_with("x-align")
}
