//! Lowering from the syntax tree to the generator's intermediate form
//!
//! The generator does not walk the syntax tree directly; the tree is first
//! flattened into a sequence of markup literals, expressions, and statement
//! blocks. Adjacent markup coalesces into one literal, and code nodes shed
//! their transition/delimiter tokens.

use crate::lexer::TokenKind;
use crate::syntax::{NodeKind, SyntaxNode, SyntaxTree};

/// One lowered unit of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrNode {
    /// Literal markup to write through as-is.
    Markup(String),
    /// A rendered expression (`@model.Name` minus the transition).
    Expression(String),
    /// A statement block's body (`@{ ... }` minus transition and braces).
    Statement(String),
}

/// Flatten a tree into generator input.
pub fn lower(tree: &SyntaxTree) -> Vec<IrNode> {
    let mut ir = Vec::new();
    let mut markup = String::new();
    for child in tree.root().children() {
        lower_node(child, &mut ir, &mut markup);
    }
    flush_markup(&mut ir, &mut markup);
    ir
}

fn lower_node(node: &SyntaxNode, ir: &mut Vec<IrNode>, markup: &mut String) {
    let structure = match node {
        SyntaxNode::Token(token) => {
            markup.push_str(token.content());
            return;
        }
        SyntaxNode::Structure(structure) => structure,
    };

    match structure.kind() {
        NodeKind::ImplicitExpression => {
            flush_markup(ir, markup);
            ir.push(IrNode::Expression(code_text(structure.children())));
        }
        NodeKind::StatementBlock => {
            flush_markup(ir, markup);
            ir.push(IrNode::Statement(statement_body(structure.children())));
        }
        _ => {
            for child in structure.children() {
                lower_node(child, ir, markup);
            }
        }
    }
}

fn flush_markup(ir: &mut Vec<IrNode>, markup: &mut String) {
    if !markup.is_empty() {
        ir.push(IrNode::Markup(std::mem::take(markup)));
    }
}

/// Expression text without the leading `@`.
fn code_text(children: &[SyntaxNode]) -> String {
    let mut out = String::new();
    for child in children {
        if let SyntaxNode::Token(token) = child {
            if token.kind() == TokenKind::Transition {
                continue;
            }
            out.push_str(token.content());
        }
    }
    out
}

/// Statement body without `@`, the opening brace, or the closing brace.
fn statement_body(children: &[SyntaxNode]) -> String {
    let mut out = String::new();
    let mut depth = 0usize;
    for child in children {
        let token = match child {
            SyntaxNode::Token(token) => token,
            SyntaxNode::Structure(_) => continue,
        };
        match token.kind() {
            TokenKind::Transition if out.is_empty() && depth == 0 => {}
            TokenKind::OpenBrace => {
                if depth > 0 {
                    out.push_str(token.content());
                }
                depth += 1;
            }
            TokenKind::CloseBrace => {
                depth = depth.saturating_sub(1);
                if depth > 0 {
                    out.push_str(token.content());
                }
            }
            _ => out.push_str(token.content()),
        }
    }
    out.trim().to_string()
}
