//! Immutable lexical tokens
//!
//! A token is `(kind, content, diagnostics)` behind an `Arc`. Cloning is a
//! reference-count bump, which is what lets the token cache hand the same
//! instance to every caller that asks for a cacheable `(kind, content)` pair.

use std::fmt;
use std::sync::Arc;

use crate::diagnostics::Diagnostic;
use crate::lexer::TokenKind;

/// An immutable lexical token. Equality is structural; identity (for
/// interning assertions) is exposed through [`SyntaxToken::ptr_eq`].
#[derive(Clone)]
pub struct SyntaxToken {
    data: Arc<TokenData>,
}

struct TokenData {
    kind: TokenKind,
    content: Box<str>,
    diagnostics: Vec<Diagnostic>,
    missing: bool,
}

impl SyntaxToken {
    /// A regular token. Prefer [`crate::syntax::TokenCache::intern`], which
    /// routes cacheable tokens through the shared store.
    pub fn new(kind: TokenKind, content: &str, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            data: Arc::new(TokenData {
                kind,
                content: Box::from(content),
                diagnostics,
                missing: false,
            }),
        }
    }

    /// A zero-width placeholder for a token the grammar expected but the
    /// source did not provide. Used by error-recovery productions.
    pub fn missing(kind: TokenKind, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            data: Arc::new(TokenData {
                kind,
                content: Box::from(""),
                diagnostics,
                missing: true,
            }),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.data.kind
    }

    pub fn content(&self) -> &str {
        &self.data.content
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.data.diagnostics
    }

    pub fn is_missing(&self) -> bool {
        self.data.missing
    }

    /// Width in bytes of the source this token covers; zero for missing
    /// tokens.
    pub fn width(&self) -> usize {
        self.data.content.len()
    }

    /// True when both handles point at the same underlying allocation.
    pub fn ptr_eq(a: &SyntaxToken, b: &SyntaxToken) -> bool {
        Arc::ptr_eq(&a.data, &b.data)
    }
}

impl PartialEq for SyntaxToken {
    fn eq(&self, other: &Self) -> bool {
        self.data.kind == other.data.kind
            && self.data.content == other.data.content
            && self.data.missing == other.data.missing
            && self.data.diagnostics == other.data.diagnostics
    }
}

impl Eq for SyntaxToken {}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.missing {
            write!(f, "Missing({:?})", self.data.kind)
        } else {
            write!(f, "{:?}({:?})", self.data.kind, &*self.data.content)
        }
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content())
    }
}
