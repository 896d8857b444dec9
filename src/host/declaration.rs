//! Reads declarations out of the Swift syntax tree.
//!
//! Converts a tree-sitter declaration node into the host-agnostic
//! [`Declaration`]. Only the header is read; bodies are never looked at.

use tracing::trace;
use tree_sitter::Node;

use super::parser::{children, node_text, parse_swift};
use crate::core::{Declaration, FunctionSignature, Parameter, Result, TransformError};
use crate::types;

/// Bodies whose direct declarations are type members.
const TYPE_BODIES: &[&str] = &["class_body", "enum_class_body", "protocol_body"];

/// Scopes that make a nested declaration local rather than a member.
const LOCAL_SCOPES: &[&str] = &[
    "function_body",
    "lambda_literal",
    "statements",
    "computed_property",
    "computed_getter",
    "computed_setter",
    "computed_modify",
    "init_declaration",
    "deinit_declaration",
    "subscript_declaration",
];

/// Convert one declaration node.
pub fn read_declaration(node: &Node, source: &str) -> Result<Declaration> {
    match node.kind() {
        "function_declaration" => read_function(node, source).map(Declaration::Function),
        "protocol_function_declaration" => Err(TransformError::custom(
            "Protocol requirements have no body to delegate to; attach the attribute to an implementation.",
        )),
        "ERROR" => Err(unreadable(node, source)),
        _ => {
            let introducer = introducer(node, source);
            trace!(introducer = %introducer, "attached to a non-function declaration");
            Ok(Declaration::Other { introducer })
        }
    }
}

/// Whether `node` is declared directly inside a type, extension or protocol body.
pub fn is_member(node: &Node) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        let kind = parent.kind();
        if TYPE_BODIES.contains(&kind) {
            return true;
        }
        if LOCAL_SCOPES.contains(&kind) {
            return false;
        }
        current = parent.parent();
    }
    false
}

/// Parse the first declaration in `text`.
///
/// `is_member` stands in for the surroundings the snippet was cut from.
pub fn parse_declaration(text: &str, is_member: bool) -> Result<Declaration> {
    let tree = parse_swift(text).map_err(|e| TransformError::custom(format!("{e:#}")))?;
    let root = tree.root_node();
    let node = children(&root)
        .into_iter()
        .find(|child| child.is_named())
        .ok_or_else(|| TransformError::custom("Expected a declaration."))?;

    let mut declaration = read_declaration(&node, text)?;
    if let Declaration::Function(signature) = &mut declaration {
        signature.is_member = is_member;
    }
    Ok(declaration)
}

/// Parse the inside of a parenthesised parameter clause.
pub fn parse_parameter_clause(text: &str) -> Result<Vec<Parameter>> {
    match parse_declaration(&format!("func clause({text}) {{}}"), false)? {
        Declaration::Function(signature) => Ok(signature.parameters),
        Declaration::Other { .. } => Err(TransformError::custom(format!(
            "Could not read parameter clause `{text}`."
        ))),
    }
}

fn read_function(node: &Node, source: &str) -> Result<FunctionSignature> {
    let parts = children(node);
    if parts
        .iter()
        .any(|part| part.kind() != "function_body" && (part.has_error() || part.is_missing()))
    {
        return Err(unreadable(node, source));
    }

    let func = parts
        .iter()
        .position(|part| part.kind() == "func")
        .ok_or_else(|| unreadable(node, source))?;
    let name = parts
        .get(func + 1)
        .map(|part| node_text(part, source).to_string())
        .ok_or_else(|| TransformError::custom("Expected a function name after `func`."))?;

    let mut signature = FunctionSignature::new(name, Vec::new());
    signature.modifiers = read_modifiers(&parts[..func], source);
    signature.is_member = is_member(node);

    let rest = &parts[func + 2..];
    let mut clause_end = None;
    let mut header_end = node.end_byte();
    for (idx, part) in rest.iter().enumerate() {
        match part.kind() {
            "type_parameters" if clause_end.is_none() => {
                signature.generic_clause = Some(types::normalize_whitespace(node_text(part, source)));
            }
            "parameter" if clause_end.is_none() => {
                signature.parameters.push(read_parameter(part, &rest[idx + 1..], source)?);
            }
            ")" if clause_end.is_none() => clause_end = Some(part.end_byte()),
            "type_constraints" => {
                let text = node_text(part, source).trim();
                let text = text.strip_prefix("where").unwrap_or(text);
                signature.where_clause = Some(types::normalize_whitespace(text));
                header_end = header_end.min(part.start_byte());
            }
            "function_body" => header_end = header_end.min(part.start_byte()),
            _ => {}
        }
    }

    let clause_end = clause_end.ok_or_else(|| {
        TransformError::custom(format!(
            "Expected a parameter clause after `{}`.",
            signature.name
        ))
    })?;
    read_effects(&source[clause_end..header_end.max(clause_end)], &mut signature);
    Ok(signature)
}

/// Modifier keywords before `func`; attributes are not modifiers.
fn read_modifiers(parts: &[Node], source: &str) -> Vec<String> {
    let mut modifiers = Vec::new();
    for part in parts {
        let words: Vec<Node> = match part.kind() {
            "modifiers" => children(part),
            _ => vec![*part],
        };
        for word in words.iter().filter(|w| w.kind() != "attribute") {
            modifiers.extend(
                node_text(word, source)
                    .split_whitespace()
                    .map(str::to_string),
            );
        }
    }
    modifiers
}

/// `async`, `throws` and `-> Return` between the parameter clause and the body.
fn read_effects(text: &str, signature: &mut FunctionSignature) {
    let (effects, return_type) = match text.find("->") {
        Some(arrow) => (&text[..arrow], Some(text[arrow + 2..].trim())),
        None => (text, None),
    };
    let words: Vec<&str> = effects
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .collect();
    signature.is_async = words.contains(&"async");
    signature.throws = words.iter().any(|w| *w == "throws" || *w == "rethrows");
    signature.return_type = return_type
        .filter(|ty| !ty.is_empty())
        .map(types::normalize_whitespace);
}

/// Read one `parameter` node plus the default value that follows it.
///
/// `following` holds the siblings after the parameter; its entry ends at the
/// next `,` or `)`.
fn read_parameter(node: &Node, following: &[Node], source: &str) -> Result<Parameter> {
    let parts = children(node);
    let colon = parts
        .iter()
        .position(|part| part.kind() == ":")
        .ok_or_else(|| unreadable(node, source))?;
    let names: Vec<&str> = parts[..colon]
        .iter()
        .map(|part| node_text(part, source))
        .collect();

    let entry: Vec<&Node> = following
        .iter()
        .take_while(|part| !matches!(part.kind(), "," | ")"))
        .collect();
    let entry_end = following
        .iter()
        .find(|part| matches!(part.kind(), "," | ")"))
        .map_or(node.end_byte(), |part| part.start_byte());
    let equals = entry.iter().find(|part| part.kind() == "=");
    let value = entry
        .iter()
        .find(|part| part.is_named() && part.kind() != "attribute");

    let type_end = match (equals, value) {
        (Some(eq), _) => eq.start_byte(),
        (None, Some(value)) => value.start_byte(),
        (None, None) => entry_end,
    };
    let default_start = match (equals, value) {
        (Some(eq), _) => Some(eq.end_byte()),
        (None, Some(value)) => Some(value.start_byte()),
        (None, None) => None,
    };

    let type_text = source[parts[colon].end_byte()..type_end.max(parts[colon].end_byte())]
        .trim()
        .trim_end_matches('=')
        .trim();
    let type_text = types::normalize_whitespace(type_text);

    let mut parameter = match names.as_slice() {
        [name] => Parameter::new(*name, type_text),
        [label, name] => Parameter::labeled(*label, *name, type_text),
        _ => return Err(unreadable(node, source)),
    };
    parameter.default_value = default_start
        .map(|start| source[start..entry_end.max(start)].trim().to_string())
        .filter(|value| !value.is_empty());
    Ok(parameter)
}

/// Leading keyword of a non-function declaration, e.g. `var` or `struct`.
fn introducer(node: &Node, source: &str) -> String {
    children(node)
        .iter()
        .find(|part| !matches!(part.kind(), "modifiers" | "attribute"))
        .map(|part| {
            node_text(part, source)
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .unwrap_or_else(|| node.kind().to_string())
}

fn unreadable(node: &Node, source: &str) -> TransformError {
    let text = node_text(node, source);
    let first_line = text.lines().next().unwrap_or_default().trim();
    TransformError::custom(format!("Could not read the declaration `{first_line}`."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn function(source: &str) -> FunctionSignature {
        match parse_declaration(source, true).unwrap() {
            Declaration::Function(signature) => signature,
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_simple_function() {
        let signature = function(
            "private func testAdd(a: Int, b: Int, completion: @escaping (Int) -> Void) {}",
        );
        assert_eq!(signature.name, "testAdd");
        assert_eq!(signature.modifiers, vec!["private"]);
        assert_eq!(signature.parameters.len(), 3);
        assert_eq!(signature.parameters[2].type_text, "@escaping (Int) -> Void");
        assert!(!signature.throws);
        assert_eq!(signature.return_type, None);
    }

    #[test]
    fn test_labels_defaults_and_generics() {
        let signature = function(indoc! {"
            public static func fetch<T: Decodable>(
                _ url: URL,
                decoding type: T.Type = T.self,
                retries: Int = max(1, 2),
                completion: @escaping (Result<T, Error>) -> Void
            ) rethrows -> URLSessionTask where T: Sendable {
                fatalError()
            }
        "});
        assert_eq!(signature.modifiers, vec!["public", "static"]);
        assert_eq!(signature.generic_clause.as_deref(), Some("<T: Decodable>"));
        assert_eq!(signature.parameters[0].label.as_deref(), Some("_"));
        assert_eq!(signature.parameters[1].label.as_deref(), Some("decoding"));
        assert_eq!(signature.parameters[1].name, "type");
        assert_eq!(signature.parameters[1].type_text, "T.Type");
        assert_eq!(signature.parameters[1].default_value.as_deref(), Some("T.self"));
        assert_eq!(
            signature.parameters[2].default_value.as_deref(),
            Some("max(1, 2)")
        );
        assert_eq!(
            signature.parameters[3].type_text,
            "@escaping (Result<T, Error>) -> Void"
        );
        assert!(signature.throws);
        assert_eq!(signature.return_type.as_deref(), Some("URLSessionTask"));
        assert_eq!(signature.where_clause.as_deref(), Some("T: Sendable"));
    }

    #[test]
    fn test_mutating_and_async_effects() {
        let signature = function("mutating func bump(by step: Int) async throws -> Int { step }");
        assert_eq!(signature.modifiers, vec!["mutating"]);
        assert!(signature.is_async);
        assert!(signature.throws);
        assert_eq!(signature.return_type.as_deref(), Some("Int"));
    }

    #[test]
    fn test_other_declarations() {
        for (source, introducer) in [
            ("var count: Int = 0", "var"),
            ("private(set) var count: Int = 0", "var"),
            ("struct Loader {}", "struct"),
            ("enum Mode { case on }", "enum"),
        ] {
            assert_eq!(
                parse_declaration(source, true).unwrap(),
                Declaration::Other {
                    introducer: introducer.into()
                },
                "{source}"
            );
        }
    }

    #[test]
    fn test_leading_attributes_are_not_modifiers() {
        let signature = function(
            "@discardableResult @MainActor func start(completion: @escaping (Bool) -> Void) -> Int { 0 }",
        );
        assert_eq!(signature.name, "start");
        assert!(signature.modifiers.is_empty());
        assert_eq!(signature.return_type.as_deref(), Some("Int"));
    }

    #[test]
    fn test_comments_in_header_are_ignored() {
        let signature = function(indoc! {"
            func upload(
                data: Data, // payload
                completion: @escaping (Result<Int, Error>) -> Void
            ) {}
        "});
        assert_eq!(signature.parameters.len(), 2);
        assert_eq!(signature.parameters[0].type_text, "Data");
    }

    #[test]
    fn test_member_detection_follows_enclosing_scope() {
        let source = indoc! {"
            struct S {
                func method() {
                    func local() {}
                }
            }
            func global() {
                let closure = {
                    func inClosure() {}
                }
            }
        "};
        let tree = parse_swift(source).unwrap();
        let mut found = Vec::new();
        collect_functions(tree.root_node(), source, &mut found);
        assert_eq!(
            found,
            vec![
                ("method".to_string(), true),
                ("local".to_string(), false),
                ("global".to_string(), false),
                ("inClosure".to_string(), false),
            ]
        );
    }

    fn collect_functions(node: Node, source: &str, found: &mut Vec<(String, bool)>) {
        if node.kind() == "function_declaration" {
            if let Ok(Declaration::Function(signature)) = read_declaration(&node, source) {
                found.push((signature.name, signature.is_member));
            }
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            collect_functions(child, source, found);
        }
    }

    #[test]
    fn test_parameter_clause() {
        let parameters = parse_parameter_clause("_ id: Int, to peer: [String: [Int]] = [:]").unwrap();
        assert_eq!(
            parameters,
            vec![
                Parameter::labeled("_", "id", "Int"),
                Parameter::labeled("to", "peer", "[String: [Int]]").with_default("[:]"),
            ]
        );
        assert!(parse_parameter_clause("").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_declaration_is_custom_error() {
        let err = parse_declaration("func f(a Int) {}", true).unwrap_err();
        assert!(matches!(err, TransformError::Custom(_)));
    }
}
