//! Locates generator attributes in the Swift syntax tree and the
//! declarations they are attached to.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use tracing::trace;
use tree_sitter::Node;

use super::declaration::read_declaration;
use super::parser::{node_column, node_line, node_text, parse_swift};
use crate::core::{self, Declaration};
use crate::generators::Generator;

static ATTRIBUTE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@\s*([A-Za-z_][A-Za-z0-9_]*)").unwrap());

/// One generator attribute and the declaration it decorates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSite {
    pub generator: Generator,
    /// Byte range of the attribute, `@` and any argument list included.
    pub attribute: Range<usize>,
    /// 1-based position of the attribute.
    pub line: usize,
    pub column: usize,
    /// The decorated declaration, or why it could not be read.
    pub declaration: core::Result<Declaration>,
    /// Byte offset just past the declaration, body included.
    pub declaration_end: usize,
    /// Leading whitespace of the attribute's line.
    pub indent: String,
}

/// Find every generator attribute in `source`, in source order.
///
/// Comments and string literals never produce attribute nodes, so text that
/// merely looks like an attribute is skipped.
pub fn scan(source: &str) -> anyhow::Result<Vec<AttributeSite>> {
    let tree = parse_swift(source)?;
    let mut sites = Vec::new();
    collect(tree.root_node(), source, &mut sites);
    Ok(sites)
}

fn collect(node: Node, source: &str, sites: &mut Vec<AttributeSite>) {
    if node.kind() == "attribute" {
        if let Some(site) = attribute_site(&node, source) {
            sites.push(site);
        }
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect(child, source, sites);
    }
}

fn attribute_site(attribute: &Node, source: &str) -> Option<AttributeSite> {
    let captures = ATTRIBUTE_NAME.captures(node_text(attribute, source))?;
    let generator = Generator::from_attribute(&captures[1])?;
    let declaration = attached_declaration(attribute)?;
    trace!(
        line = node_line(attribute),
        kind = declaration.kind(),
        "found generator attribute"
    );

    Some(AttributeSite {
        generator,
        attribute: attribute.start_byte()..attribute.end_byte(),
        line: node_line(attribute),
        column: node_column(attribute),
        declaration: read_declaration(&declaration, source),
        declaration_end: declaration.end_byte(),
        indent: line_indent(source, attribute.start_byte()).to_string(),
    })
}

/// Attributes sit in the declaration's `modifiers`, or directly under it.
fn attached_declaration<'t>(attribute: &Node<'t>) -> Option<Node<'t>> {
    let parent = attribute.parent()?;
    match parent.kind() {
        "modifiers" => parent.parent(),
        _ => Some(parent),
    }
}

fn line_indent(source: &str, offset: usize) -> &str {
    let line_start = source[..offset].rfind('\n').map_or(0, |p| p + 1);
    let line = &source[line_start..];
    &line[..line.len() - line.trim_start_matches([' ', '\t']).len()]
}
