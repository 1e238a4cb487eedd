//! Recursive-descent parser for hybrid markup+code templates
//!
//! The parser runs in markup mode by default — an HTML-like grammar of
//! elements, attributes, and text runs — and drops into code mode at the `@`
//! transition, where it scans `@{ ... }` statement blocks and
//! `@expr.chain(...)` implicit expressions.
//!
//! Error recovery never aborts: when the grammar expects a token the source
//! does not provide, the parser synthesizes a zero-width missing token
//! carrying the diagnostic and resumes at the next stable sync point
//! (closing angle, closing brace, end tag, or end of input). The result is
//! always a complete, traversable tree, degraded where the input was.

use std::collections::HashSet;
use std::ops::Range;

use once_cell::sync::Lazy;

use crate::diagnostics::{Diagnostic, Span};
use crate::lexer::{tokenize_with_spans, TokenKind};
use crate::syntax::{NodeKind, StructureNode, SyntaxNode, SyntaxTree, TokenCache};

/// HTML elements that never take an end tag.
static VOID_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
        "track", "wbr",
    ]
    .into_iter()
    .collect()
});

fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(name.to_ascii_lowercase().as_str())
}

/// Parse template source into a syntax tree whose leaves are tokens interned
/// through `cache`. Always returns a tree; problems surface as diagnostics.
pub fn parse(source: &str, cache: &TokenCache) -> SyntaxTree {
    let mut parser = Parser {
        source,
        tokens: tokenize_with_spans(source),
        pos: 0,
        cache,
    };
    parser.document()
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<(TokenKind, Range<usize>)>,
    pos: usize,
    cache: &'a TokenCache,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|(kind, _)| *kind)
    }

    fn peek_at(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + offset).map(|(kind, _)| *kind)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn current_offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, span)| span.start)
            .unwrap_or(self.source.len())
    }

    fn current_slice(&self) -> &'a str {
        self.tokens
            .get(self.pos)
            .map(|(_, span)| &self.source[span.clone()])
            .unwrap_or("")
    }

    /// Consume the current token and intern it.
    fn bump(&mut self) -> SyntaxNode {
        self.bump_with(Vec::new())
    }

    /// Consume the current token, attaching diagnostics to it (which also
    /// exempts it from interning).
    fn bump_with(&mut self, diagnostics: Vec<Diagnostic>) -> SyntaxNode {
        let (kind, span) = self.tokens[self.pos].clone();
        let content = &self.source[span];
        self.pos += 1;
        SyntaxNode::Token(self.cache.intern(kind, content, diagnostics))
    }

    /// Synthesize a zero-width missing token at the current position.
    fn missing(&self, kind: TokenKind, expected: &str) -> SyntaxNode {
        let diag = Diagnostic::error(
            format!("expected {expected}"),
            Span::empty(self.current_offset()),
        );
        SyntaxNode::Token(self.cache.missing(kind, vec![diag]))
    }

    /// Consume a token of `kind` or synthesize a missing one without
    /// advancing.
    fn expect(&mut self, kind: TokenKind, expected: &str) -> SyntaxNode {
        if self.peek() == Some(kind) {
            self.bump()
        } else {
            self.missing(kind, expected)
        }
    }

    fn document(&mut self) -> SyntaxTree {
        let mut children = Vec::new();
        while !self.at_eof() {
            children.push(self.markup_item());
        }
        SyntaxTree::new(StructureNode::new(NodeKind::Document, children))
    }

    fn markup_item(&mut self) -> SyntaxNode {
        match self.peek() {
            Some(TokenKind::OpenAngle) => self.element_or_stray_end_tag(),
            Some(TokenKind::Transition) => self.transition(),
            _ => self.text_run(),
        }
    }

    /// A run of plain markup tokens, ending before the next `<`, `@`, or EOF.
    fn text_run(&mut self) -> SyntaxNode {
        let mut children = Vec::new();
        while !matches!(
            self.peek(),
            None | Some(TokenKind::OpenAngle) | Some(TokenKind::Transition)
        ) {
            children.push(self.bump());
        }
        SyntaxNode::Structure(StructureNode::new(NodeKind::MarkupText, children))
    }

    fn element_or_stray_end_tag(&mut self) -> SyntaxNode {
        if self.peek_at(1) == Some(TokenKind::ForwardSlash) {
            // An end tag with no matching open element. Keep it in the tree,
            // degraded, with the diagnostic on the slash.
            let open = self.bump();
            let offset = self.current_offset();
            let slash = self.bump_with(vec![Diagnostic::error(
                "unexpected closing tag",
                Span::new(offset, offset + 1),
            )]);
            let name = self.expect(TokenKind::Identifier, "tag name");
            let close = self.expect(TokenKind::CloseAngle, "'>'");
            return SyntaxNode::Structure(StructureNode::new(
                NodeKind::EndTag,
                vec![open, slash, name, close],
            ));
        }
        self.element()
    }

    fn element(&mut self) -> SyntaxNode {
        let mut start_children = vec![self.bump()]; // '<'
        let name = if self.peek() == Some(TokenKind::Identifier) {
            let name = self.current_slice().to_string();
            start_children.push(self.bump());
            name
        } else {
            start_children.push(self.missing(TokenKind::Identifier, "tag name"));
            String::new()
        };

        let mut self_closing = false;
        loop {
            match self.peek() {
                Some(TokenKind::Whitespace) | Some(TokenKind::Newline) => {
                    start_children.push(self.bump());
                }
                Some(TokenKind::Identifier) => {
                    start_children.push(self.attribute());
                }
                Some(TokenKind::ForwardSlash) => {
                    start_children.push(self.bump());
                    start_children.push(self.expect(TokenKind::CloseAngle, "'>'"));
                    self_closing = true;
                    break;
                }
                Some(TokenKind::CloseAngle) => {
                    start_children.push(self.bump());
                    break;
                }
                None => {
                    start_children.push(self.missing(TokenKind::CloseAngle, "'>'"));
                    break;
                }
                Some(_) => {
                    // Stray token inside a tag; keep it, flag it, move on.
                    let offset = self.current_offset();
                    let end = offset + self.current_slice().len();
                    start_children.push(self.bump_with(vec![Diagnostic::error(
                        "unexpected token in tag",
                        Span::new(offset, end),
                    )]));
                }
            }
        }

        let start_tag = SyntaxNode::Structure(StructureNode::new(NodeKind::StartTag, start_children));
        if self_closing || is_void_element(&name) {
            return SyntaxNode::Structure(StructureNode::new(NodeKind::Element, vec![start_tag]));
        }

        let mut children = vec![start_tag];
        loop {
            match self.peek() {
                None => {
                    // Unclosed element; synthesize the end tag's absence.
                    children.push(SyntaxNode::Structure(StructureNode::new(
                        NodeKind::EndTag,
                        vec![self.missing_end_tag(&name)],
                    )));
                    break;
                }
                Some(TokenKind::OpenAngle) if self.peek_at(1) == Some(TokenKind::ForwardSlash) => {
                    children.push(self.end_tag(&name));
                    break;
                }
                _ => children.push(self.markup_item()),
            }
        }
        SyntaxNode::Structure(StructureNode::new(NodeKind::Element, children))
    }

    fn missing_end_tag(&self, name: &str) -> SyntaxNode {
        let diag = Diagnostic::error(
            format!("unclosed element '{name}'"),
            Span::empty(self.current_offset()),
        );
        SyntaxNode::Token(self.cache.missing(TokenKind::Identifier, vec![diag]))
    }

    fn end_tag(&mut self, open_name: &str) -> SyntaxNode {
        let open = self.bump(); // '<'
        let slash = self.bump(); // '/'
        let name = if self.peek() == Some(TokenKind::Identifier) {
            let found = self.current_slice();
            if found.eq_ignore_ascii_case(open_name) {
                self.bump()
            } else {
                let offset = self.current_offset();
                let end = offset + found.len();
                let diag = Diagnostic::error(
                    format!("closing tag '{found}' does not match '{open_name}'"),
                    Span::new(offset, end),
                );
                self.bump_with(vec![diag])
            }
        } else {
            self.missing(TokenKind::Identifier, "tag name")
        };
        let close = self.expect(TokenKind::CloseAngle, "'>'");
        SyntaxNode::Structure(StructureNode::new(
            NodeKind::EndTag,
            vec![open, slash, name, close],
        ))
    }

    fn attribute(&mut self) -> SyntaxNode {
        let mut children = vec![self.bump()]; // name
        while self.peek() == Some(TokenKind::Whitespace) {
            children.push(self.bump());
        }
        if self.peek() != Some(TokenKind::Equals) {
            // Bare attribute.
            return SyntaxNode::Structure(StructureNode::new(NodeKind::Attribute, children));
        }
        children.push(self.bump()); // '='
        while self.peek() == Some(TokenKind::Whitespace) {
            children.push(self.bump());
        }
        match self.peek() {
            Some(quote @ (TokenKind::DoubleQuote | TokenKind::SingleQuote)) => {
                children.push(self.bump());
                loop {
                    match self.peek() {
                        None => {
                            children.push(self.missing(quote, "closing quote"));
                            break;
                        }
                        Some(kind) if kind == quote => {
                            children.push(self.bump());
                            break;
                        }
                        Some(_) => children.push(self.bump()),
                    }
                }
            }
            _ => {
                // Unquoted value: a run of value-ish tokens.
                while matches!(
                    self.peek(),
                    Some(TokenKind::Identifier) | Some(TokenKind::Text) | Some(TokenKind::Dot)
                ) {
                    children.push(self.bump());
                }
            }
        }
        SyntaxNode::Structure(StructureNode::new(NodeKind::Attribute, children))
    }

    fn transition(&mut self) -> SyntaxNode {
        let at = self.bump(); // '@'
        match self.peek() {
            // '@@' escapes to a literal '@' in markup.
            Some(TokenKind::Transition) => {
                let literal = self.bump();
                SyntaxNode::Structure(StructureNode::new(NodeKind::MarkupText, vec![literal]))
            }
            Some(TokenKind::OpenBrace) => self.statement_block(at),
            Some(TokenKind::Identifier) => self.implicit_expression(at),
            _ => {
                let missing = self.missing(TokenKind::Identifier, "identifier after '@'");
                SyntaxNode::Structure(StructureNode::new(
                    NodeKind::ImplicitExpression,
                    vec![at, missing],
                ))
            }
        }
    }

    /// `@{ ... }` with balanced-brace scanning.
    fn statement_block(&mut self, at: SyntaxNode) -> SyntaxNode {
        let mut children = vec![at, self.bump()]; // '@' '{'
        let mut depth = 1usize;
        loop {
            match self.peek() {
                None => {
                    children.push(self.missing(TokenKind::CloseBrace, "'}' to close code block"));
                    break;
                }
                Some(TokenKind::OpenBrace) => {
                    depth += 1;
                    children.push(self.bump());
                }
                Some(TokenKind::CloseBrace) => {
                    depth -= 1;
                    children.push(self.bump());
                    if depth == 0 {
                        break;
                    }
                }
                Some(_) => children.push(self.bump()),
            }
        }
        SyntaxNode::Structure(StructureNode::new(NodeKind::StatementBlock, children))
    }

    /// `@name`, `@name.prop`, `@name.Method(args)` — dotted segments and
    /// balanced call parentheses, nothing further.
    fn implicit_expression(&mut self, at: SyntaxNode) -> SyntaxNode {
        let mut children = vec![at, self.bump()]; // '@' identifier
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(TokenKind::Dot), Some(TokenKind::Identifier)) => {
                    children.push(self.bump());
                    children.push(self.bump());
                }
                (Some(TokenKind::OpenParen), _) => {
                    children.push(self.bump());
                    let mut depth = 1usize;
                    loop {
                        match self.peek() {
                            None => {
                                children.push(
                                    self.missing(TokenKind::CloseParen, "')' to close call"),
                                );
                                break;
                            }
                            Some(TokenKind::OpenParen) => {
                                depth += 1;
                                children.push(self.bump());
                            }
                            Some(TokenKind::CloseParen) => {
                                depth -= 1;
                                children.push(self.bump());
                                if depth == 0 {
                                    break;
                                }
                            }
                            Some(_) => children.push(self.bump()),
                        }
                    }
                }
                _ => break,
            }
        }
        SyntaxNode::Structure(StructureNode::new(NodeKind::ImplicitExpression, children))
    }
}
