use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical USFM book codes, protocanon through deuterocanon
pub const BOOK_CODES: &[&str] = &[
    "GEN", "EXO", "LEV", "NUM", "DEU", "JOS", "JDG", "RUT", "1SA", "2SA", "1KI", "2KI", "1CH",
    "2CH", "EZR", "NEH", "EST", "JOB", "PSA", "PRO", "ECC", "SNG", "ISA", "JER", "LAM", "EZK",
    "DAN", "HOS", "JOL", "AMO", "OBA", "JON", "MIC", "NAM", "HAB", "ZEP", "HAG", "ZEC", "MAL",
    "MAT", "MRK", "LUK", "JHN", "ACT", "ROM", "1CO", "2CO", "GAL", "EPH", "PHP", "COL", "1TH",
    "2TH", "1TI", "2TI", "TIT", "PHM", "HEB", "JAS", "1PE", "2PE", "1JN", "2JN", "3JN", "JUD",
    "REV", "TOB", "JDT", "ESG", "WIS", "SIR", "BAR", "LJE", "S3Y", "SUS", "BEL", "1MA", "2MA",
    "3MA", "4MA", "1ES", "2ES", "MAN",
];

pub fn is_book_code(code: &str) -> bool {
    BOOK_CODES.contains(&code)
}

/// Canonical (book, chapter, verse) address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerseRef {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseRef {
    pub fn new(book: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse,
        }
    }
}

impl fmt::Display for VerseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// Extract a verse reference from the start of a line.
///
/// The line must begin with `<BookCode> <chapter>:<verse>`; anything after
/// the verse number is ignored. Malformed or unrecognized prefixes yield
/// `None`, never an error.
pub fn extract_verse_ref(line: &str) -> Option<VerseRef> {
    let (code, rest) = line.split_once(' ')?;
    if !is_book_code(code) {
        return None;
    }

    let (chapter_digits, rest) = take_digits(rest)?;
    let rest = rest.strip_prefix(':')?;
    let (verse_digits, rest) = take_digits(rest)?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let chapter: u32 = chapter_digits.parse().ok()?;
    let verse: u32 = verse_digits.parse().ok()?;
    if chapter == 0 || verse == 0 {
        return None;
    }

    Some(VerseRef::new(code, chapter, verse))
}

fn take_digits(s: &str) -> Option<(&str, &str)> {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some((&s[..end], &s[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_leading_reference() {
        assert_eq!(
            extract_verse_ref("PSA 1:1 In the beginning"),
            Some(VerseRef::new("PSA", 1, 1))
        );
    }

    #[test]
    fn test_resolves_bare_reference() {
        assert_eq!(
            extract_verse_ref("HAB 3:12"),
            Some(VerseRef::new("HAB", 3, 12))
        );
    }

    #[test]
    fn test_rejects_non_references() {
        assert_eq!(extract_verse_ref("not a verse"), None);
        assert_eq!(extract_verse_ref(""), None);
        assert_eq!(extract_verse_ref("\\v 1 marker text"), None);
    }

    #[test]
    fn test_rejects_unknown_book_code() {
        assert_eq!(extract_verse_ref("ZZZ 1:1 text"), None);
    }

    #[test]
    fn test_rejects_partial_matches() {
        assert_eq!(extract_verse_ref("PSA 1 text"), None);
        assert_eq!(extract_verse_ref("PSA 1:"), None);
        assert_eq!(extract_verse_ref("PSA 0:1"), None);
        assert_eq!(extract_verse_ref("PSA 1:0"), None);
        assert_eq!(extract_verse_ref("PSA 1:1b"), None);
    }

    #[test]
    fn test_display_matches_input_form() {
        let verse_ref = extract_verse_ref("GEN 12:3 and in you").unwrap();
        assert_eq!(verse_ref.to_string(), "GEN 12:3");
    }
}
