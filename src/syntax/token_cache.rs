//! Session-scoped token interning
//!
//! Thousands of compiled files repeat the same punctuation and whitespace
//! tokens; the cache hands out one shared instance per cacheable
//! `(kind, content)` pair. The cache is an explicit component owned by the
//! compilation session, not process-global state, so parallel test runs and
//! independent sessions stay isolated. There is no eviction: the cache lives
//! as long as the session does.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::diagnostics::Diagnostic;
use crate::lexer::TokenKind;
use crate::syntax::token::SyntaxToken;

/// Interns immutable tokens for one compilation session.
///
/// Concurrent lookups take a read lock; insertion is first-writer-wins, and a
/// thread that loses the race simply returns the winner's instance and drops
/// its own allocation.
#[derive(Default)]
pub struct TokenCache {
    map: RwLock<HashMap<(TokenKind, Box<str>), SyntaxToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a token for `(kind, content)`. Cacheable kinds with no
    /// diagnostics share one instance per distinct pair; anything carrying a
    /// diagnostic, and any identifier/text content, is freshly allocated.
    pub fn intern(
        &self,
        kind: TokenKind,
        content: &str,
        diagnostics: Vec<Diagnostic>,
    ) -> SyntaxToken {
        if !diagnostics.is_empty() || !kind.is_cacheable() {
            return SyntaxToken::new(kind, content, diagnostics);
        }

        let key = (kind, Box::from(content));
        if let Some(token) = self
            .map
            .read()
            .expect("token cache lock poisoned")
            .get(&key)
        {
            return token.clone();
        }

        let fresh = SyntaxToken::new(kind, content, Vec::new());
        let mut map = self.map.write().expect("token cache lock poisoned");
        match map.entry(key) {
            // Another writer got here first; use its token.
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                entry.insert(fresh.clone());
                fresh
            }
        }
    }

    /// A zero-width placeholder for expected-but-absent syntax. Never cached.
    pub fn missing(&self, kind: TokenKind, diagnostics: Vec<Diagnostic>) -> SyntaxToken {
        SyntaxToken::missing(kind, diagnostics)
    }

    /// Number of distinct interned tokens.
    pub fn len(&self) -> usize {
        self.map.read().expect("token cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
