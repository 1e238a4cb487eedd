//! Token kinds and raw tokenization for template source
//!
//! Templates mix an HTML-like markup grammar with embedded code reached
//! through the `@` transition. One logos-derived token alphabet covers both
//! modes; the parser decides which grammar applies at any point. Every byte
//! of input lexes to some token — there is no lexer error path, stray input
//! simply becomes `Text`.

use logos::Logos;

/// All token kinds produced by the lexer.
///
/// Punctuation, whitespace, and newlines are cacheable in the token store;
/// `Identifier` and `Text` carry arbitrary content and are always freshly
/// allocated. See [`TokenKind::is_cacheable`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Markup structure
    #[token("<")]
    OpenAngle,
    #[token(">")]
    CloseAngle,
    #[token("/")]
    ForwardSlash,
    #[token("=")]
    Equals,
    #[token("\"")]
    DoubleQuote,
    #[token("'")]
    SingleQuote,

    // Transition into code
    #[token("@")]
    Transition,

    // Code structure
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Dot,

    // Whitespace (spaces, tabs, stray carriage returns)
    #[regex(r"[ \t\r]+", priority = 2)]
    Whitespace,
    #[regex(r"\r?\n", priority = 3)]
    Newline,

    // Tag/attribute names and code identifiers; '-' and ':' are legal inside
    // component tag names (e.g. nav-menu)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_\-:]*", priority = 3)]
    Identifier,

    // Catch-all for everything else
    #[regex(r#"[^ \t\r\n<>/="'@{}();.]+"#, priority = 1)]
    Text,
}

impl TokenKind {
    /// The closed decision table for token interning: fixed-content
    /// punctuation and common whitespace runs are shared across files,
    /// identifier/text content is not.
    pub fn is_cacheable(self) -> bool {
        !matches!(self, TokenKind::Identifier | TokenKind::Text)
    }

    /// Whitespace or newline.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Newline)
    }
}

/// Tokenize source text, keeping the byte span of every token.
///
/// Unrecognized input is folded into `Text` so the token stream always covers
/// the entire source.
pub fn tokenize_with_spans(source: &str) -> Vec<(TokenKind, std::ops::Range<usize>)> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let kind = result.unwrap_or(TokenKind::Text);
        tokens.push((kind, lexer.span()));
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize_with_spans(source).into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn test_markup_tag_tokenization() {
        assert_eq!(
            kinds("<div>"),
            vec![TokenKind::OpenAngle, TokenKind::Identifier, TokenKind::CloseAngle]
        );
    }

    #[test]
    fn test_dashed_tag_name_is_one_identifier() {
        assert_eq!(
            kinds("<nav-menu>"),
            vec![TokenKind::OpenAngle, TokenKind::Identifier, TokenKind::CloseAngle]
        );
    }

    #[test]
    fn test_self_closing_tag() {
        assert_eq!(
            kinds("<br/>"),
            vec![
                TokenKind::OpenAngle,
                TokenKind::Identifier,
                TokenKind::ForwardSlash,
                TokenKind::CloseAngle
            ]
        );
    }

    #[test]
    fn test_attribute_tokens() {
        assert_eq!(
            kinds(r#"a="b""#),
            vec![
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::DoubleQuote,
                TokenKind::Identifier,
                TokenKind::DoubleQuote
            ]
        );
    }

    #[test]
    fn test_transition_and_code_block() {
        assert_eq!(
            kinds("@{ x; }"),
            vec![
                TokenKind::Transition,
                TokenKind::OpenBrace,
                TokenKind::Whitespace,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Whitespace,
                TokenKind::CloseBrace
            ]
        );
    }

    #[test]
    fn test_newline_wins_over_whitespace() {
        assert_eq!(kinds("\r\n"), vec![TokenKind::Newline]);
        assert_eq!(kinds("  \n"), vec![TokenKind::Whitespace, TokenKind::Newline]);
    }

    #[test]
    fn test_spans_cover_entire_source() {
        let source = "<p>Hello @name</p>";
        let tokens = tokenize_with_spans(source);
        let mut end = 0;
        for (_, span) in &tokens {
            assert_eq!(span.start, end);
            end = span.end;
        }
        assert_eq!(end, source.len());
    }

    #[test]
    fn test_unicode_text_lexes_as_text() {
        // Maximal munch: the text pattern keeps matching past the non-ASCII
        // char, so the whole word is one token.
        assert_eq!(kinds("héllo"), vec![TokenKind::Text]);
    }

    #[test]
    fn test_cacheable_table() {
        assert!(TokenKind::OpenAngle.is_cacheable());
        assert!(TokenKind::Whitespace.is_cacheable());
        assert!(TokenKind::Newline.is_cacheable());
        assert!(!TokenKind::Identifier.is_cacheable());
        assert!(!TokenKind::Text.is_cacheable());
    }
}
