use logos::Logos;

/// Token types for USFM-style marker text
///
/// Text runs are significant (they carry the scripture content and its
/// whitespace), so nothing is skipped. A lone backslash that does not start
/// a marker is folded back into the surrounding text by `tokenize`.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token<'src> {
    // Closing markers for paired tags, e.g. `\nd*`, `\f*`
    #[regex(r"\\[a-zA-Z][a-zA-Z0-9-]*\*", |lex| lex.slice())]
    CloseMarker(&'src str),

    // Opening or standalone markers, e.g. `\id`, `\c`, `\q1`
    #[regex(r"\\[a-zA-Z][a-zA-Z0-9-]*", |lex| lex.slice())]
    Marker(&'src str),

    // Raw text run up to the next backslash
    #[regex(r"[^\\]+", |lex| lex.slice())]
    Text(&'src str),
}

impl<'src> Token<'src> {
    /// Marker tag without the backslash (and trailing `*` for close markers)
    pub fn tag(&self) -> Option<&'src str> {
        match self {
            Token::Marker(raw) => Some(&raw[1..]),
            Token::CloseMarker(raw) => Some(&raw[1..raw.len() - 1]),
            Token::Text(_) => None,
        }
    }
}

/// Tokenize marker text into (token, byte range) pairs in document order
pub fn tokenize(source: &str) -> Vec<(Token<'_>, std::ops::Range<usize>)> {
    Token::lexer(source)
        .spanned()
        .map(|(token, span)| match token {
            Ok(token) => (token, span.clone()),
            // Stray backslash with nothing lexable after it: keep it as text
            Err(()) => (Token::Text(&source[span.clone()]), span),
        })
        .collect()
}
