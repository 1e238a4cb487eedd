//! Immutable syntax model: interned tokens and the node tree
//!
//! Tokens are immutable and shared through the session-scoped [`TokenCache`];
//! nodes own ordered child sequences and never point back at a parent, so
//! identical subtrees can be shared freely across files and threads.

pub mod node;
pub mod token;
pub mod token_cache;

pub use node::{
    AttributeFacts, ElementFacts, NodeKind, ObservedStructure, StructureNode, SyntaxNode,
    SyntaxTree,
};
pub use token::SyntaxToken;
pub use token_cache::TokenCache;
