use crate::ast::{Node, ScriptureDocument};
use crate::error::ValidateError;

/// Check structural invariants, returning the first violation.
///
/// Validation is advisory: callers may surface violations as warnings. Only
/// the single-root-book invariant is fatal, enforced separately by the
/// serializer through `require_single_root`.
pub fn validate(doc: &ScriptureDocument) -> Result<(), ValidateError> {
    match check(doc).into_iter().next() {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

/// Collect every structural violation in document order
pub fn check(doc: &ScriptureDocument) -> Vec<ValidateError> {
    let mut issues = Vec::new();

    let books = count_root_books(doc);
    if books != 1 {
        issues.push(ValidateError::SingleRootViolation { found: books });
    }

    let mut walker = Walker {
        chapter: 0,
        last_verse: 0,
        issues: &mut issues,
    };
    walker.walk(&doc.content);

    issues
}

/// The fatal subset: exactly one root book
pub fn require_single_root(doc: &ScriptureDocument) -> Result<(), ValidateError> {
    let books = count_root_books(doc);
    if books != 1 {
        return Err(ValidateError::SingleRootViolation { found: books });
    }
    Ok(())
}

fn count_root_books(doc: &ScriptureDocument) -> usize {
    doc.content
        .iter()
        .filter(|node| matches!(node, Node::Book { .. }))
        .count()
}

struct Walker<'a> {
    chapter: u32,
    last_verse: u32,
    issues: &'a mut Vec<ValidateError>,
}

impl Walker<'_> {
    fn walk(&mut self, nodes: &[Node]) {
        for node in nodes {
            match node {
                Node::Chapter { number, .. } => {
                    if *number == 0 {
                        self.issues.push(ValidateError::NonPositiveChapter);
                    }
                    // Monotonicity is tracked per chapter only; cross-chapter
                    // and cross-book ordering stays unchecked.
                    self.chapter = *number;
                    self.last_verse = 0;
                }
                Node::Verse { number, .. } => {
                    if *number < self.last_verse {
                        self.issues.push(ValidateError::VerseOrder {
                            chapter: self.chapter,
                            prev: self.last_verse,
                            next: *number,
                        });
                    } else {
                        self.last_verse = *number;
                    }
                }
                _ => {}
            }
            if let Some(children) = node.content() {
                self.walk(children);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_valid_document_passes() {
        let doc = parse("\\id GEN\\c 1\\v 1 a\\v 2 b\\c 2\\v 1 c").unwrap();
        assert!(validate(&doc).is_ok());
    }

    #[test]
    fn test_verse_going_backwards_is_reported() {
        let doc = parse("\\id GEN\\c 1\\v 2 a\\v 1 b").unwrap();
        let err = validate(&doc).unwrap_err();
        assert_eq!(
            err,
            ValidateError::VerseOrder {
                chapter: 1,
                prev: 2,
                next: 1
            }
        );
    }

    #[test]
    fn test_repeated_verse_number_is_allowed() {
        let doc = parse("\\id GEN\\c 1\\v 1 a\\v 1 b").unwrap();
        assert!(validate(&doc).is_ok());
    }

    #[test]
    fn test_verse_counter_resets_per_chapter() {
        let doc = parse("\\id GEN\\c 1\\v 5 a\\c 2\\v 1 b").unwrap();
        assert!(validate(&doc).is_ok());
    }

    #[test]
    fn test_chapter_zero_is_reported() {
        let doc = parse("\\id GEN\\c 0\\v 1 a").unwrap();
        assert_eq!(validate(&doc).unwrap_err(), ValidateError::NonPositiveChapter);
    }

    #[test]
    fn test_multiple_books_reported_but_not_fatal_here() {
        let doc = parse("\\id GEN\\c 1\\v 1 a\\id EXO\\c 1\\v 1 b").unwrap();
        assert_eq!(
            validate(&doc).unwrap_err(),
            ValidateError::SingleRootViolation { found: 2 }
        );
        // Advisory check reports every issue
        assert_eq!(check(&doc).len(), 1);
    }
}
