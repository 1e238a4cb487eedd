//! Immutable syntax nodes and trees
//!
//! A node is either a token leaf or a structure node owning an ordered child
//! sequence behind an `Arc`. There are no parent pointers: trees are built
//! bottom-up from owned children, and any traversal that needs ancestor
//! context (e.g. the tag matcher needing a parent tag name) carries that
//! context as accumulated state.

use std::fmt;
use std::sync::Arc;

use crate::diagnostics::Diagnostic;
use crate::lexer::TokenKind;
use crate::syntax::token::SyntaxToken;

/// Kinds of structure (non-leaf) nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Element,
    StartTag,
    EndTag,
    Attribute,
    MarkupText,
    StatementBlock,
    ImplicitExpression,
}

/// A tree node: token leaf or structure node.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    Token(SyntaxToken),
    Structure(StructureNode),
}

impl SyntaxNode {
    pub fn as_token(&self) -> Option<&SyntaxToken> {
        match self {
            SyntaxNode::Token(token) => Some(token),
            SyntaxNode::Structure(_) => None,
        }
    }

    pub fn as_structure(&self) -> Option<&StructureNode> {
        match self {
            SyntaxNode::Token(_) => None,
            SyntaxNode::Structure(node) => Some(node),
        }
    }

    pub fn is_kind(&self, kind: NodeKind) -> bool {
        matches!(self, SyntaxNode::Structure(node) if node.kind() == kind)
    }

    /// Width in bytes of the source this node covers.
    pub fn width(&self) -> usize {
        match self {
            SyntaxNode::Token(token) => token.width(),
            SyntaxNode::Structure(node) => node.width(),
        }
    }

    /// Append the full source text of this subtree. Missing tokens contribute
    /// nothing.
    pub fn write_text(&self, out: &mut String) {
        match self {
            SyntaxNode::Token(token) => out.push_str(token.content()),
            SyntaxNode::Structure(node) => {
                for child in node.children() {
                    child.write_text(out);
                }
            }
        }
    }

    pub fn text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    /// Collect all diagnostics attached anywhere in this subtree, in source
    /// order.
    pub fn collect_diagnostics(&self, out: &mut Vec<Diagnostic>) {
        match self {
            SyntaxNode::Token(token) => out.extend_from_slice(token.diagnostics()),
            SyntaxNode::Structure(node) => {
                for child in node.children() {
                    child.collect_diagnostics(out);
                }
            }
        }
    }
}

/// A structure node: a kind plus an ordered, immutable child sequence.
#[derive(Clone)]
pub struct StructureNode {
    data: Arc<StructureData>,
}

struct StructureData {
    kind: NodeKind,
    children: Vec<SyntaxNode>,
}

impl StructureNode {
    pub fn new(kind: NodeKind, children: Vec<SyntaxNode>) -> Self {
        Self {
            data: Arc::new(StructureData { kind, children }),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.data.children
    }

    pub fn width(&self) -> usize {
        self.children().iter().map(SyntaxNode::width).sum()
    }

    /// First token child of the given kind, ignoring nested structures.
    pub fn first_token(&self, kind: TokenKind) -> Option<&SyntaxToken> {
        self.children()
            .iter()
            .filter_map(SyntaxNode::as_token)
            .find(|token| token.kind() == kind)
    }

    fn has_token(&self, kind: TokenKind) -> bool {
        self.first_token(kind).is_some()
    }

    fn first_child_of_kind(&self, kind: NodeKind) -> Option<&StructureNode> {
        self.children()
            .iter()
            .filter_map(SyntaxNode::as_structure)
            .find(|node| node.kind() == kind)
    }
}

impl PartialEq for StructureNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
            || (self.data.kind == other.data.kind && self.data.children == other.data.children)
    }
}

impl fmt::Debug for StructureNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StructureNode")
            .field(&self.data.kind)
            .field(&self.data.children)
            .finish()
    }
}

/// How a tag was actually written in source, as opposed to the structure a
/// matching rule requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservedStructure {
    /// Separate start and end tags.
    Paired,
    /// `<tag/>`.
    SelfClosing,
    /// Start tag only, no end tag (HTML void elements and unclosed tags).
    Void,
}

/// One attribute as written on a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeFacts {
    pub name: String,
    /// `None` for a bare attribute with no `=`.
    pub value: Option<String>,
}

/// Everything the tag matching engine needs to know about one element,
/// reconstructed by traversal (the tree itself stores no parent links).
#[derive(Debug, Clone, PartialEq)]
pub struct ElementFacts {
    pub tag_name: String,
    pub parent_tag: Option<String>,
    pub attributes: Vec<AttributeFacts>,
    pub structure: ObservedStructure,
}

/// A fully parsed template: an immutable, freely shareable tree.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    root: StructureNode,
}

impl SyntaxTree {
    pub fn new(root: StructureNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &StructureNode {
        &self.root
    }

    /// All diagnostics attached anywhere in the tree, in source order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        for child in self.root.children() {
            child.collect_diagnostics(&mut out);
        }
        out
    }

    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in self.root.children() {
            child.write_text(&mut out);
        }
        out
    }

    /// Visit every element in document order, handing the callback the
    /// element's reconstructed facts. Parent context is threaded through the
    /// traversal explicitly.
    pub fn visit_elements(&self, f: &mut dyn FnMut(&ElementFacts)) {
        for child in self.root.children() {
            visit_node(child, None, f);
        }
    }
}

fn visit_node(node: &SyntaxNode, parent: Option<&str>, f: &mut dyn FnMut(&ElementFacts)) {
    let structure = match node.as_structure() {
        Some(structure) => structure,
        None => return,
    };

    if structure.kind() == NodeKind::Element {
        if let Some(facts) = element_facts(structure, parent) {
            f(&facts);
            for child in structure.children() {
                visit_node(child, Some(&facts.tag_name), f);
            }
            return;
        }
    }

    for child in structure.children() {
        visit_node(child, parent, f);
    }
}

fn element_facts(element: &StructureNode, parent: Option<&str>) -> Option<ElementFacts> {
    let start_tag = element.first_child_of_kind(NodeKind::StartTag)?;
    let tag_name = start_tag
        .first_token(TokenKind::Identifier)
        .map(|token| token.content().to_string())
        .unwrap_or_default();

    let structure = if start_tag.has_token(TokenKind::ForwardSlash) {
        ObservedStructure::SelfClosing
    } else if element.first_child_of_kind(NodeKind::EndTag).is_some() {
        ObservedStructure::Paired
    } else {
        ObservedStructure::Void
    };

    let attributes = start_tag
        .children()
        .iter()
        .filter_map(SyntaxNode::as_structure)
        .filter(|node| node.kind() == NodeKind::Attribute)
        .map(attribute_facts)
        .collect();

    Some(ElementFacts {
        tag_name,
        parent_tag: parent.map(str::to_string),
        attributes,
        structure,
    })
}

fn attribute_facts(attribute: &StructureNode) -> AttributeFacts {
    let name = attribute
        .first_token(TokenKind::Identifier)
        .map(|token| token.content().to_string())
        .unwrap_or_default();

    let mut value = None;
    let mut seen_equals = false;
    for child in attribute.children() {
        let token = match child.as_token() {
            Some(token) => token,
            None => continue,
        };
        match token.kind() {
            TokenKind::Equals if !seen_equals => {
                seen_equals = true;
                value = Some(String::new());
            }
            TokenKind::DoubleQuote | TokenKind::SingleQuote => {}
            _ if seen_equals => {
                if let Some(value) = value.as_mut() {
                    value.push_str(token.content());
                }
            }
            _ => {}
        }
    }

    AttributeFacts { name, value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::token_cache::TokenCache;

    fn token(cache: &TokenCache, kind: TokenKind, content: &str) -> SyntaxNode {
        SyntaxNode::Token(cache.intern(kind, content, Vec::new()))
    }

    fn simple_element(cache: &TokenCache, name: &str) -> StructureNode {
        let start = StructureNode::new(
            NodeKind::StartTag,
            vec![
                token(cache, TokenKind::OpenAngle, "<"),
                token(cache, TokenKind::Identifier, name),
                token(cache, TokenKind::CloseAngle, ">"),
            ],
        );
        let end = StructureNode::new(
            NodeKind::EndTag,
            vec![
                token(cache, TokenKind::OpenAngle, "<"),
                token(cache, TokenKind::ForwardSlash, "/"),
                token(cache, TokenKind::Identifier, name),
                token(cache, TokenKind::CloseAngle, ">"),
            ],
        );
        StructureNode::new(
            NodeKind::Element,
            vec![SyntaxNode::Structure(start), SyntaxNode::Structure(end)],
        )
    }

    #[test]
    fn test_write_text_round_trips_children() {
        let cache = TokenCache::new();
        let element = simple_element(&cache, "div");
        assert_eq!(SyntaxNode::Structure(element).text(), "<div></div>");
    }

    #[test]
    fn test_width_sums_children() {
        let cache = TokenCache::new();
        let element = simple_element(&cache, "p");
        assert_eq!(element.width(), "<p></p>".len());
    }

    #[test]
    fn test_element_facts_paired_structure() {
        let cache = TokenCache::new();
        let element = simple_element(&cache, "div");
        let facts = element_facts(&element, None).expect("element facts");
        assert_eq!(facts.tag_name, "div");
        assert_eq!(facts.structure, ObservedStructure::Paired);
        assert_eq!(facts.parent_tag, None);
        assert!(facts.attributes.is_empty());
    }

    #[test]
    fn test_visit_elements_reconstructs_parent_context() {
        let cache = TokenCache::new();
        let inner = simple_element(&cache, "li");
        let outer_start = StructureNode::new(
            NodeKind::StartTag,
            vec![
                token(&cache, TokenKind::OpenAngle, "<"),
                token(&cache, TokenKind::Identifier, "ul"),
                token(&cache, TokenKind::CloseAngle, ">"),
            ],
        );
        let outer = StructureNode::new(
            NodeKind::Element,
            vec![
                SyntaxNode::Structure(outer_start),
                SyntaxNode::Structure(inner),
            ],
        );
        let tree = SyntaxTree::new(StructureNode::new(
            NodeKind::Document,
            vec![SyntaxNode::Structure(outer)],
        ));

        let mut seen = Vec::new();
        tree.visit_elements(&mut |facts| {
            seen.push((facts.tag_name.clone(), facts.parent_tag.clone()));
        });
        assert_eq!(
            seen,
            vec![
                ("ul".to_string(), None),
                ("li".to_string(), Some("ul".to_string()))
            ]
        );
    }

    #[test]
    fn test_structural_sharing_of_identical_subtrees() {
        let cache = TokenCache::new();
        let shared = simple_element(&cache, "br");
        let a = SyntaxNode::Structure(shared.clone());
        let b = SyntaxNode::Structure(shared);
        // Same allocation reachable from two parents; both render identically.
        assert_eq!(a.text(), b.text());
    }
}
