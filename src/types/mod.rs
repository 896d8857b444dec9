//! Structural matching over Swift type spellings.
//!
//! Nothing here resolves types semantically. Shapes are recognised from the
//! text alone, which is all a peer generator sees at expansion time.

pub mod scanner;

pub use scanner::{find_top_level, matching_close, split_top_level, top_level_chars};

use once_cell::sync::Lazy;
use regex::Regex;

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@[A-Za-z_][A-Za-z0-9_.]*").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RESULT_HEAD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:Swift\.)?Result\s*<").unwrap());

/// Ownership and passing specifiers that never change a closure's shape.
const SPECIFIERS: &[&str] = &["inout", "borrowing", "consuming", "__owned", "__shared", "sending"];

/// A parsed `(A, B) async throws -> R` spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    pub parameters: Vec<String>,
    pub is_async: bool,
    pub throws: bool,
    pub return_type: String,
}

impl FunctionType {
    /// True for the `(X) -> Void` completion shape.
    pub fn is_single_argument_void(&self) -> bool {
        self.parameters.len() == 1 && !self.is_async && !self.throws && is_void(&self.return_type)
    }
}

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Remove leading attributes (`@escaping`, `@Sendable`, `@convention(c)`)
/// and ownership specifiers (`inout`, `borrowing`, ...).
pub fn strip_qualifiers(text: &str) -> String {
    let mut rest = text.trim();

    loop {
        if let Some(m) = ATTRIBUTE.find(rest) {
            let mut end = m.end();
            if rest[end..].starts_with('(') {
                match matching_close(rest, end) {
                    Some(close) => end = close + 1,
                    None => break,
                }
            }
            rest = rest[end..].trim_start();
            continue;
        }

        let specifier = SPECIFIERS.iter().find(|s| {
            rest.strip_prefix(**s)
                .is_some_and(|after| after.starts_with(char::is_whitespace))
        });
        match specifier {
            Some(s) => rest = rest[s.len()..].trim_start(),
            None => break,
        }
    }

    normalize_whitespace(rest)
}

/// `Void`, `()` and `Swift.Void` all spell the empty tuple.
pub fn is_void(text: &str) -> bool {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    matches!(compact.as_str(), "Void" | "()" | "Swift.Void")
}

/// Parse a function-type spelling, looking through redundant parentheses.
///
/// Returns `None` for anything that is not a bare function type, including
/// optional closures such as `((Int) -> Void)?`.
pub fn parse_function_type(text: &str) -> Option<FunctionType> {
    let mut current = strip_qualifiers(text);

    loop {
        if !current.starts_with('(') {
            return None;
        }
        let close = matching_close(&current, 0)?;
        let inner = current[1..close].to_string();
        let rest = current[close + 1..].trim().to_string();

        if rest.is_empty() {
            // `((Int) -> Void)` wraps a single type; `(Int, Int)` is a tuple
            if split_top_level(&inner, ',').len() != 1 {
                return None;
            }
            current = strip_qualifiers(&inner);
            continue;
        }

        let (is_async, throws, return_type) = parse_effects_and_return(&rest)?;
        let parameters = split_top_level(&inner, ',')
            .into_iter()
            .map(closure_parameter_type)
            .collect();

        return Some(FunctionType {
            parameters,
            is_async,
            throws,
            return_type,
        });
    }
}

/// Match `Result<Success, Failure>` (optionally `Swift.`-qualified) with exactly
/// two depth-zero generic arguments.
pub fn parse_result_type(text: &str) -> Option<(String, String)> {
    let text = text.trim();
    let head = RESULT_HEAD.find(text)?;
    let open = head.end() - 1;
    let close = matching_close(text, open)?;
    if close != text.len() - 1 {
        return None;
    }

    let arguments = split_top_level(&text[open + 1..close], ',');
    match arguments.as_slice() {
        [success, failure] if !success.is_empty() && !failure.is_empty() => {
            Some((normalize_whitespace(success), normalize_whitespace(failure)))
        }
        _ => None,
    }
}

fn parse_effects_and_return(rest: &str) -> Option<(bool, bool, String)> {
    let mut rest = rest.trim_start();
    let mut is_async = false;
    let mut throws = false;

    if let Some(after) = strip_keyword(rest, "async") {
        is_async = true;
        rest = after;
    }
    for keyword in ["throws", "rethrows"] {
        if let Some(after) = strip_keyword(rest, keyword) {
            throws = true;
            rest = after;
            // typed throws: `throws(MyError)`
            if rest.starts_with('(') {
                let close = matching_close(rest, 0)?;
                rest = rest[close + 1..].trim_start();
            }
            break;
        }
    }

    let return_type = rest.strip_prefix("->")?.trim();
    if return_type.is_empty() {
        return None;
    }
    Some((is_async, throws, normalize_whitespace(return_type)))
}

fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let after = text.strip_prefix(keyword)?;
    match after.chars().next() {
        Some(c) if scanner::is_identifier_char(c) => None,
        _ => Some(after.trim_start()),
    }
}

/// Closure types may name their parameters: `(_ value: Int) -> Void`.
fn closure_parameter_type(parameter: &str) -> String {
    let ty = match find_top_level(parameter, ':') {
        Some(idx) => &parameter[idx + 1..],
        None => parameter,
    };
    strip_qualifiers(ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_qualifiers_removes_escaping_and_sendable() {
        assert_eq!(
            strip_qualifiers("@escaping @Sendable (Int) -> Void"),
            "(Int) -> Void"
        );
        assert_eq!(
            strip_qualifiers("@convention(block) (Int) -> Void"),
            "(Int) -> Void"
        );
        assert_eq!(strip_qualifiers("inout  [Int]"), "[Int]");
    }

    #[test]
    fn test_strip_qualifiers_keeps_plain_names() {
        assert_eq!(strip_qualifiers("inoutValue"), "inoutValue");
    }

    #[test]
    fn test_parse_function_type_single_argument() {
        let ty = parse_function_type("@escaping (Int) -> Void").unwrap();
        assert_eq!(ty.parameters, vec!["Int"]);
        assert!(ty.is_single_argument_void());
    }

    #[test]
    fn test_parse_function_type_unwraps_parentheses() {
        let ty = parse_function_type("@escaping ((String?) -> ())").unwrap();
        assert_eq!(ty.parameters, vec!["String?"]);
        assert!(ty.is_single_argument_void());
    }

    #[test]
    fn test_parse_function_type_named_parameter() {
        let ty = parse_function_type("(_ value: [String: Int]) -> Void").unwrap();
        assert_eq!(ty.parameters, vec!["[String: Int]"]);
    }

    #[test]
    fn test_parse_function_type_effects() {
        let ty = parse_function_type("(Int) async throws(MyError) -> Bool").unwrap();
        assert!(ty.is_async);
        assert!(ty.throws);
        assert_eq!(ty.return_type, "Bool");
        assert!(!ty.is_single_argument_void());
    }

    #[test]
    fn test_parse_function_type_rejects_non_closures() {
        assert_eq!(parse_function_type("Int"), None);
        assert_eq!(parse_function_type("((Int) -> Void)?"), None);
        assert_eq!(parse_function_type("(Int, String)"), None);
        assert_eq!(parse_function_type("(Int)"), None);
    }

    #[test]
    fn test_parse_function_type_zero_and_two_arguments() {
        assert_eq!(parse_function_type("() -> Void").unwrap().parameters.len(), 0);
        let two = parse_function_type("(Int, Error?) -> Void").unwrap();
        assert_eq!(two.parameters, vec!["Int", "Error?"]);
        assert!(!two.is_single_argument_void());
    }

    #[test]
    fn test_parse_result_type_simple() {
        assert_eq!(
            parse_result_type("Result<Int, Error>"),
            Some(("Int".to_string(), "Error".to_string()))
        );
        assert_eq!(
            parse_result_type("Swift.Result<Data, URLError>"),
            Some(("Data".to_string(), "URLError".to_string()))
        );
    }

    #[test]
    fn test_parse_result_type_nested_generics() {
        assert_eq!(
            parse_result_type("Result<Pair<A, B>, Error>"),
            Some(("Pair<A, B>".to_string(), "Error".to_string()))
        );
        assert_eq!(
            parse_result_type("Result<[String: (Int, Int)], any Error>"),
            Some(("[String: (Int, Int)]".to_string(), "any Error".to_string()))
        );
    }

    #[test]
    fn test_parse_result_type_rejects_other_shapes() {
        assert_eq!(parse_result_type("Int"), None);
        assert_eq!(parse_result_type("Result<Int>"), None);
        assert_eq!(parse_result_type("Result<Int, Error>?"), None);
        assert_eq!(parse_result_type("MyResult<Int, Error>"), None);
        assert_eq!(parse_result_type("Result<Int, Error, Extra>"), None);
    }

    #[test]
    fn test_is_void_spellings() {
        assert!(is_void("Void"));
        assert!(is_void("( )"));
        assert!(is_void("Swift.Void"));
        assert!(!is_void("Int"));
    }
}
