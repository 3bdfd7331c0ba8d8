//! Round-trip properties over realistic marker documents

use crate::*;

// Poetry, headings, a blank-line marker and an inline char style
const HABAKKUK: &str = "\\id HAB 45HABGNT92.usfm, Good News Translation, June 2003\n\
\\c 3\n\
\\s1 A Prayer of Habakkuk\n\
\\p\n\
\\v 1 This is a prayer of the prophet Habakkuk:\n\
\\b\n\
\\q1\n\
\\v 2 O \\nd Lord\\nd*, I have heard of what you have done,\n\
\\q2 and I am filled with awe.\n\
\\q1 Now do again in our times\n\
\\q2 the great deeds you used to do.\n\
\\q1 Be merciful, even when you are angry.\n";

const ALIGNED: &str = "\\id GEN\n\
\\c 1\n\
\\p\n\
\\v 1 \\w In|alignment=\"w1:0\"\\w* \\w the|alignment=\"w1:1\"\\w* beginning\n\
\\v 2 \\w darkness|lemma=\"dark\" x-align-src=\"2\"\\w* was there\n";

const WITH_NOTE: &str = "\\id GEN\n\
\\c 1\n\
\\p\n\
\\v 1 In the beginning\\f + \\fr 1:1 \\ft Or when\\f* God created\n";

fn roundtrip(source: &str) -> String {
    let doc = parse(source).expect("parse");
    serialize(&doc, SerializeMode::Full).expect("serialize")
}

#[test]
fn test_roundtrip_habakkuk() {
    assert_eq!(
        normalize_marker_text(&roundtrip(HABAKKUK)),
        normalize_marker_text(HABAKKUK)
    );
}

#[test]
fn test_roundtrip_alignment_attributes() {
    assert_eq!(
        normalize_marker_text(&roundtrip(ALIGNED)),
        normalize_marker_text(ALIGNED)
    );
}

#[test]
fn test_roundtrip_note_with_caller() {
    assert_eq!(
        normalize_marker_text(&roundtrip(WITH_NOTE)),
        normalize_marker_text(WITH_NOTE)
    );
}

#[test]
fn test_roundtrip_unknown_markers_survive() {
    let source = "\\id GEN\n\\c 1\n\\p\n\\v 1 text \\zcustom payload here\n";
    assert_eq!(
        normalize_marker_text(&roundtrip(source)),
        normalize_marker_text(source)
    );
}

#[test]
fn test_explicit_note_text_close_roundtrips() {
    let source = "\\id GEN\n\\c 1\n\\p\n\\v 1 a\\f + \\ft note\\ft* tail\\f* b\n";
    assert_eq!(
        normalize_marker_text(&roundtrip(source)),
        normalize_marker_text(source)
    );
}

#[test]
fn test_unclosed_char_roundtrips_without_synthesized_close() {
    let source = "\\id GEN\n\\c 1\n\\p\n\\v 1 praise the \\nd Lord\n";
    let text = roundtrip(source);
    assert!(!text.contains("\\nd*"));
    assert_eq!(
        normalize_marker_text(&text),
        normalize_marker_text(source)
    );
}

#[test]
fn test_marker_argument_space_runs_canonicalized() {
    let doc = parse("\\id GEN\n\\c  1\n\\p\n\\v  1 spaced  text\n").unwrap();
    let text = serialize(&doc, SerializeMode::Full).unwrap();
    // The separator run collapses; spacing inside the text run does not
    assert!(text.contains("\\c 1\n"));
    assert!(text.contains("\\v 1 spaced  text\n"));
}

#[test]
fn test_serialize_is_idempotent() {
    for source in [HABAKKUK, ALIGNED, WITH_NOTE] {
        let first = roundtrip(source);
        let second = roundtrip(&first);
        assert_eq!(first, second, "second pass must be a fixed point");
    }
}

#[test]
fn test_stripped_output_never_contains_alignment() {
    let doc = parse(ALIGNED).unwrap();
    let stripped = serialize(&doc, SerializeMode::Stripped).unwrap();
    assert!(!stripped.contains("alignment"));
    assert!(!stripped.contains("x-align"));
    // Non-alignment attributes stay
    assert!(stripped.contains("lemma=\"dark\""));
}

#[test]
fn test_stripped_then_full_roundtrips() {
    let doc = parse(ALIGNED).unwrap();
    let stripped = serialize(&doc, SerializeMode::Stripped).unwrap();
    let reparsed = parse(&stripped).unwrap();
    let again = serialize(&reparsed, SerializeMode::Full).unwrap();
    assert_eq!(normalize_marker_text(&stripped), normalize_marker_text(&again));
}

#[test]
fn test_reparse_preserves_structure() {
    let doc = parse(HABAKKUK).unwrap();
    let text = serialize(&doc, SerializeMode::Full).unwrap();
    let reparsed = parse(&text).unwrap();
    assert_eq!(doc, reparsed);
}

#[test]
fn test_validate_roundtripped_document() {
    let doc = parse(HABAKKUK).unwrap();
    assert!(validate(&doc).is_ok());
}
