use crate::ast::{Attributes, Node, ScriptureDocument};
use crate::error::{ParseError, ParseResult};
use crate::markers;
use crate::tokenizer::{tokenize, Token};
use std::ops::Range;

/// Parse marker text into a scripture tree
pub fn parse(source: &str) -> ParseResult<ScriptureDocument> {
    Parser::new(source).parse_document()
}

/// Single-pass parser over the token stream.
///
/// Structure is rebuilt with an explicit stack of open nodes. Chapter and
/// verse markers never nest into themselves: a new one implicitly closes the
/// previous sibling of the same kind. A verse stays open until the next
/// chapter or verse marker, so paragraph markers seen mid-verse nest inside
/// the verse (poetry lines).
pub struct Parser<'src> {
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
    stack: Vec<Node>,
    root: Vec<Node>,
    book: Option<String>,
    chapter: u32,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            tokens: tokenize(source),
            pos: 0,
            stack: Vec::new(),
            root: Vec::new(),
            book: None,
            chapter: 0,
        }
    }

    pub fn parse_document(&mut self) -> ParseResult<ScriptureDocument> {
        while self.pos < self.tokens.len() {
            let (token, span) = self.tokens[self.pos].clone();
            self.pos += 1;
            match token {
                Token::Text(text) => self.push_text(text),
                Token::Marker(raw) => self.handle_marker(raw, span.start)?,
                Token::CloseMarker(raw) => self.handle_close(raw, span.start)?,
            }
        }

        // Documents in the wild frequently end with unclosed inline markers;
        // close everything still open instead of failing.
        while !self.stack.is_empty() {
            self.close_top();
        }

        Ok(ScriptureDocument::with_content(std::mem::take(
            &mut self.root,
        )))
    }

    fn handle_marker(&mut self, raw: &str, pos: usize) -> ParseResult<()> {
        let tag = &raw[1..];

        if markers::is_note_text(tag) {
            // Runs until the next marker: a sibling note-text span closes first
            if matches!(self.top_tag(), Some(t) if markers::is_note_text(t)) {
                self.close_top();
            }
            self.stack.push(Node::Char {
                marker: tag.to_string(),
                attributes: Vec::new(),
                content: Vec::new(),
                closed: false,
            });
            return Ok(());
        }

        if markers::is_char(tag) {
            self.stack.push(Node::Char {
                marker: tag.to_string(),
                attributes: Vec::new(),
                content: Vec::new(),
                closed: false,
            });
            return Ok(());
        }

        if markers::is_note(tag) {
            let (caller, rest) = self
                .take_argument()
                .ok_or_else(|| ParseError::missing_argument(tag, pos))?;
            self.stack.push(Node::Note {
                marker: tag.to_string(),
                caller,
                attributes: Vec::new(),
                content: Vec::new(),
            });
            self.push_text(&rest);
            return Ok(());
        }

        if markers::is_paragraph(tag) {
            self.open_paragraph(tag);
            return Ok(());
        }

        match tag {
            "id" => return self.open_book(pos),
            "c" => {
                let (word, rest) = self
                    .take_argument()
                    .ok_or_else(|| ParseError::missing_argument("c", pos))?;
                let number = word
                    .parse()
                    .map_err(|_| ParseError::invalid_number("c", pos, word))?;
                self.open_chapter(number);
                self.push_text(&rest);
                return Ok(());
            }
            "v" => {
                let (word, rest) = self
                    .take_argument()
                    .ok_or_else(|| ParseError::missing_argument("v", pos))?;
                let number = word
                    .parse()
                    .map_err(|_| ParseError::invalid_number("v", pos, word))?;
                self.open_verse(number);
                // One separator space belongs to the marker, the rest is text
                self.push_text(rest.strip_prefix(' ').unwrap_or(&rest));
                return Ok(());
            }
            _ => {}
        }

        // `\c1` / `\v12` lex as a single tag; peel the number back off
        if let Some((base, digits)) = split_trailing_digits(tag) {
            match base {
                "c" => {
                    let number = digits
                        .parse()
                        .map_err(|_| ParseError::invalid_number("c", pos, digits))?;
                    self.open_chapter(number);
                    return Ok(());
                }
                "v" => {
                    let number = digits
                        .parse()
                        .map_err(|_| ParseError::invalid_number("v", pos, digits))?;
                    self.open_verse(number);
                    // The separator space belongs to the marker here too
                    if let Some((Token::Text(text), _)) = self.tokens.get(self.pos) {
                        let text = text.strip_prefix(' ').unwrap_or(text).to_string();
                        self.pos += 1;
                        self.push_text(&text);
                    }
                    return Ok(());
                }
                _ => {}
            }
        }

        // Unrecognized marker: preserve it verbatim as an unstyled run
        self.push_text(raw);
        Ok(())
    }

    fn handle_close(&mut self, raw: &str, pos: usize) -> ParseResult<()> {
        let tag = &raw[1..raw.len() - 1];

        let opener = self.stack.iter().rposition(|node| match node {
            Node::Char { marker, .. } | Node::Note { marker, .. } => marker == tag,
            _ => false,
        });
        let Some(index) = opener else {
            return Err(ParseError::unmatched_close(tag, pos));
        };

        // Anything opened above the matching node closes implicitly
        while self.stack.len() > index + 1 {
            self.close_top();
        }

        let mut node = self.stack.pop().unwrap_or_else(|| unreachable!());
        if let Node::Char { closed, .. } = &mut node {
            *closed = true;
        }
        split_attributes(&mut node);
        self.attach(node);
        Ok(())
    }

    fn open_book(&mut self, pos: usize) -> ParseResult<()> {
        while !self.stack.is_empty() {
            self.close_top();
        }

        let (code, rest) = self
            .take_argument()
            .ok_or_else(|| ParseError::missing_argument("id", pos))?;

        // The rest of the `\id` line is a free-text description
        let (description, trailing) = match rest.find('\n') {
            Some(i) => (rest[..i].trim().to_string(), rest[i..].to_string()),
            None => (rest.trim().to_string(), String::new()),
        };

        self.book = Some(code.clone());
        self.chapter = 0;
        self.stack.push(Node::Book {
            code,
            description,
            content: Vec::new(),
        });
        if !trailing.is_empty() {
            self.push_text(&trailing);
        }
        Ok(())
    }

    fn open_chapter(&mut self, number: u32) {
        while !matches!(self.stack.last(), None | Some(Node::Book { .. })) {
            self.close_top();
        }
        self.chapter = number;
        self.stack.push(Node::Chapter {
            number,
            content: Vec::new(),
        });
    }

    fn open_verse(&mut self, number: u32) {
        while matches!(
            self.stack.last(),
            Some(Node::Char { .. } | Node::Note { .. })
        ) {
            self.close_top();
        }

        // A new verse closes the previous one, including any paragraph
        // markers nested inside it, but keeps the enclosing paragraph open.
        if self.stack.iter().any(|n| matches!(n, Node::Verse { .. })) {
            while !matches!(self.stack.last(), Some(Node::Verse { .. })) {
                self.close_top();
            }
            self.close_top();
        }

        let sid = match &self.book {
            Some(book) => format!("{} {}:{}", book, self.chapter, number),
            None => format!("{}:{}", self.chapter, number),
        };
        self.stack.push(Node::Verse {
            number,
            sid,
            content: Vec::new(),
        });
    }

    fn open_paragraph(&mut self, tag: &str) {
        while matches!(
            self.stack.last(),
            Some(Node::Char { .. } | Node::Note { .. })
        ) {
            self.close_top();
        }
        // Closes a sibling paragraph; when a verse is open the sibling lives
        // inside the verse, so the pop stops there and the new paragraph
        // nests within the verse.
        while matches!(self.stack.last(), Some(Node::Para { .. })) {
            self.close_top();
        }
        self.stack.push(Node::Para {
            marker: tag.to_string(),
            content: Vec::new(),
        });
    }

    /// Pop the top node and attach it to its parent
    fn close_top(&mut self) {
        if let Some(node) = self.stack.pop() {
            self.attach(node);
        }
    }

    fn attach(&mut self, node: Node) {
        let target = match self.stack.last_mut() {
            Some(parent) => parent
                .content_mut()
                .unwrap_or_else(|| unreachable!("only container nodes are stacked")),
            None => &mut self.root,
        };
        target.push(node);
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let target = match self.stack.last_mut() {
            Some(parent) => parent
                .content_mut()
                .unwrap_or_else(|| unreachable!("only container nodes are stacked")),
            None => &mut self.root,
        };
        if let Some(Node::Text { text: existing }) = target.last_mut() {
            existing.push_str(text);
        } else {
            target.push(Node::text(text));
        }
    }

    fn top_tag(&self) -> Option<&str> {
        match self.stack.last() {
            Some(Node::Char { marker, .. }) => Some(marker),
            _ => None,
        }
    }

    /// Consume the next text token's first word; the remainder is returned
    /// for the caller to re-push as ordinary text.
    ///
    /// Leading spaces are the marker-argument separator: a run of them is
    /// consumed here and comes back as the canonical single space when the
    /// marker is serialized.
    fn take_argument(&mut self) -> Option<(String, String)> {
        match self.tokens.get(self.pos) {
            Some((Token::Text(text), _)) => {
                self.pos += 1;
                let trimmed = text.trim_start_matches(' ');
                let split = trimmed
                    .find(|c: char| c.is_whitespace())
                    .unwrap_or(trimmed.len());
                let word = &trimmed[..split];
                if word.is_empty() {
                    return None;
                }
                Some((word.to_string(), trimmed[split..].to_string()))
            }
            _ => None,
        }
    }
}

/// Split `q1` into `("q", "1")`; `None` when the tag has no trailing digits
fn split_trailing_digits(tag: &str) -> Option<(&str, &str)> {
    let base_len = tag.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if base_len == tag.len() || base_len == 0 {
        return None;
    }
    Some((&tag[..base_len], &tag[base_len..]))
}

/// Peel a trailing `|key="value" ...` attribute list off a just-closed node
fn split_attributes(node: &mut Node) {
    let (Node::Char {
        attributes,
        content,
        ..
    }
    | Node::Note {
        attributes,
        content,
        ..
    }) = node
    else {
        return;
    };

    let Some(Node::Text { text }) = content.last_mut() else {
        return;
    };
    let Some(bar) = text.find('|') else {
        return;
    };

    let raw = text[bar + 1..].to_string();
    text.truncate(bar);
    if text.is_empty() {
        content.pop();
    }
    *attributes = parse_attribute_list(&raw);
}

fn parse_attribute_list(raw: &str) -> Attributes {
    let mut attributes = Vec::new();
    let mut rest = raw.trim();

    while !rest.is_empty() {
        let eq = rest.find('=');
        match eq {
            Some(i) if !rest[..i].contains(char::is_whitespace) => {
                let key = rest[..i].to_string();
                let after = &rest[i + 1..];
                let (value, consumed) = if let Some(quoted) = after.strip_prefix('"') {
                    match quoted.find('"') {
                        Some(end) => (quoted[..end].to_string(), i + 2 + end + 1),
                        None => (quoted.to_string(), rest.len()),
                    }
                } else {
                    let end = after.find(char::is_whitespace).unwrap_or(after.len());
                    (after[..end].to_string(), i + 1 + end)
                };
                attributes.push((key, value));
                rest = rest[consumed.min(rest.len())..].trim_start();
            }
            _ => {
                // Bare positional value, kept under the empty key
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                attributes.push((String::new(), rest[..end].to_string()));
                rest = rest[end..].trim_start();
            }
        }
    }

    attributes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_scenario() {
        let doc = parse("\\id PSA\\c1\\v1 In the beginning").unwrap();
        assert_eq!(doc.content.len(), 1);

        let Node::Book { code, content, .. } = &doc.content[0] else {
            panic!("expected a book at the root");
        };
        assert_eq!(code, "PSA");

        let Node::Chapter { number, content } = &content[0] else {
            panic!("expected a chapter inside the book");
        };
        assert_eq!(*number, 1);

        let Node::Verse {
            number,
            sid,
            content,
        } = &content[0]
        else {
            panic!("expected a verse inside the chapter");
        };
        assert_eq!(*number, 1);
        assert_eq!(sid, "PSA 1:1");
        assert_eq!(content[0], Node::text("In the beginning"));
    }

    #[test]
    fn test_new_verse_closes_previous() {
        let doc = parse("\\id GEN\n\\c 1\n\\p\n\\v 1 first\n\\v 2 second").unwrap();
        let Node::Book { content, .. } = &doc.content[0] else {
            panic!()
        };
        let Some(Node::Chapter { content, .. }) = content.iter().find(|n| matches!(n, Node::Chapter { .. })) else {
            panic!()
        };
        let Some(Node::Para { content, .. }) = content.iter().find(|n| matches!(n, Node::Para { .. })) else {
            panic!()
        };
        let verses: Vec<_> = content
            .iter()
            .filter(|n| matches!(n, Node::Verse { .. }))
            .collect();
        assert_eq!(verses.len(), 2);
    }

    #[test]
    fn test_paragraph_inside_open_verse_nests() {
        let doc = parse("\\id HAB\n\\c 3\n\\q1\n\\v 2 first line\n\\q2 second line\n").unwrap();
        let Node::Book { content, .. } = &doc.content[0] else {
            panic!()
        };
        let Some(Node::Chapter { content, .. }) = content.iter().find(|n| matches!(n, Node::Chapter { .. })) else {
            panic!()
        };
        let Some(Node::Para { content, .. }) = content.iter().find(|n| matches!(n, Node::Para { .. })) else {
            panic!()
        };
        let Some(Node::Verse { content, .. }) = content.iter().find(|n| matches!(n, Node::Verse { .. })) else {
            panic!()
        };
        assert!(
            content.iter().any(|n| matches!(n, Node::Para { marker, .. } if marker == "q2")),
            "mid-verse poetry marker should nest inside the verse"
        );
    }

    #[test]
    fn test_char_style_with_attributes() {
        let doc = parse("\\id GEN\\c 1\\v 1 \\w gracious|lemma=\"grace\" alignment=\"0:1\"\\w* word").unwrap();
        let mut found = None;
        collect_chars(&doc.content, &mut found);
        let (attributes, content) = found.expect("char node present");
        assert_eq!(content[0], Node::text(" gracious"));
        assert_eq!(
            attributes,
            vec![
                ("lemma".to_string(), "grace".to_string()),
                ("alignment".to_string(), "0:1".to_string()),
            ]
        );
    }

    fn collect_chars(nodes: &[Node], found: &mut Option<(Attributes, Vec<Node>)>) {
        for node in nodes {
            if let Node::Char {
                attributes,
                content,
                ..
            } = node
            {
                *found = Some((attributes.clone(), content.clone()));
            }
            if let Some(children) = node.content() {
                collect_chars(children, found);
            }
        }
    }

    #[test]
    fn test_bare_attribute_value() {
        let doc = parse("\\id GEN\\c 1\\v 1 \\w word|strong\\w*").unwrap();
        let mut found = None;
        collect_chars(&doc.content, &mut found);
        let (attributes, _) = found.unwrap();
        assert_eq!(attributes, vec![(String::new(), "strong".to_string())]);
    }

    #[test]
    fn test_unmatched_close_is_an_error() {
        let err = parse("\\id GEN\\c 1\\v 1 oops\\f*").unwrap_err();
        assert!(matches!(err, ParseError::UnmatchedClose { tag, .. } if tag == "f"));
    }

    #[test]
    fn test_unclosed_char_at_eof_is_fine() {
        let doc = parse("\\id GEN\\c 1\\v 1 \\nd Lord").unwrap();
        let mut found = None;
        collect_chars(&doc.content, &mut found);
        let (_, content) = found.expect("implicitly closed char node");
        assert_eq!(content[0], Node::text(" Lord"));
    }

    #[test]
    fn test_unknown_marker_preserved_as_text() {
        let doc = parse("\\id GEN\\c 1\\v 1 text \\zweird more").unwrap();
        let mut texts = Vec::new();
        collect_texts(&doc.content, &mut texts);
        assert!(texts.iter().any(|t| t.contains("\\zweird more")));
    }

    fn collect_texts(nodes: &[Node], out: &mut Vec<String>) {
        for node in nodes {
            if let Node::Text { text } = node {
                out.push(text.clone());
            }
            if let Some(children) = node.content() {
                collect_texts(children, out);
            }
        }
    }

    #[test]
    fn test_note_caller() {
        let doc = parse("\\id GEN\\c 1\\v 1 word\\f + \\ft a note\\f* more").unwrap();
        let mut caller = None;
        find_note(&doc.content, &mut caller);
        assert_eq!(caller.as_deref(), Some("+"));
    }

    fn find_note(nodes: &[Node], out: &mut Option<String>) {
        for node in nodes {
            if let Node::Note { caller, .. } = node {
                *out = Some(caller.clone());
            }
            if let Some(children) = node.content() {
                find_note(children, out);
            }
        }
    }

    #[test]
    fn test_closed_note_text_span_ends_at_close_marker() {
        let doc = parse("\\id GEN\\c 1\\v 1 a\\f + \\ft note\\ft* tail\\f* b").unwrap();
        let mut content = None;
        find_note_content(&doc.content, &mut content);
        let content = content.expect("note present");
        assert!(matches!(
            &content[1],
            Node::Char { marker, closed: true, .. } if marker == "ft"
        ));
        // Text after the explicit close belongs to the note, not the span
        assert_eq!(content[2], Node::text(" tail"));
    }

    fn find_note_content(nodes: &[Node], out: &mut Option<Vec<Node>>) {
        for node in nodes {
            if let Node::Note { content, .. } = node {
                *out = Some(content.clone());
            }
            if let Some(children) = node.content() {
                find_note_content(children, out);
            }
        }
    }

    #[test]
    fn test_missing_chapter_number() {
        let err = parse("\\id GEN\\c \\v 1 text").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { .. } | ParseError::MissingArgument { .. }));
    }
}
