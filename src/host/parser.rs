//! Tree-sitter parser integration for Swift

use anyhow::{Context, Result};
use tree_sitter::{Language, Node, Parser, Tree};

/// Extras the grammar allows between any two tokens.
const TRIVIA: &[&str] = &["comment", "multiline_comment"];

pub fn language() -> Language {
    tree_sitter_swift::LANGUAGE.into()
}

/// Parse Swift source into a tree-sitter tree.
pub fn parse_swift(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&language())
        .context("Failed to set tree-sitter language")?;

    parser
        .parse(source, None)
        .context("Failed to parse Swift source")
}

/// Get text for a tree-sitter node
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Get the line number for a tree-sitter node (1-indexed)
pub fn node_line(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Get the column number for a tree-sitter node (1-indexed)
pub fn node_column(node: &Node) -> usize {
    node.start_position().column + 1
}

pub fn is_trivia(node: &Node) -> bool {
    TRIVIA.contains(&node.kind())
}

/// Direct children in source order, comments excluded.
pub fn children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| !is_trivia(child))
        .collect()
}
