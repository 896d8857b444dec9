//! Body synthesis: bridge the completion callback into a continuation.
//!
//! The emitted body calls the original function exactly once and resumes
//! the continuation exactly once on every path through the completion
//! closure. Whether the original actually invokes its completion exactly
//! once is the caller's obligation; checked bridges turn violations into
//! run-time diagnostics.

use serde::Serialize;
use tracing::debug;

use super::classifier::CompletionShape;
use super::variant::BridgeVariant;
use super::TransformOptions;
use crate::core::FunctionSignature;

/// One line of the generated body, indented `depth` levels below the declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyLine {
    pub depth: usize,
    pub text: String,
}

impl BodyLine {
    fn new(depth: usize, text: impl Into<String>) -> Self {
        Self {
            depth,
            text: text.into(),
        }
    }
}

/// Who the delegating call is made on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    Instance,
    Type,
    None,
}

impl Receiver {
    pub fn for_signature(signature: &FunctionSignature) -> Self {
        if !signature.is_member {
            Self::None
        } else if signature.is_type_member() {
            Self::Type
        } else {
            Self::Instance
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Self::Instance => "self.",
            Self::Type => "Self.",
            Self::None => "",
        }
    }
}

/// Build the peer body for one classified completion.
pub fn synthesize(
    signature: &FunctionSignature,
    shape: &CompletionShape,
    variant: BridgeVariant,
    call_arguments: &str,
    options: &TransformOptions,
) -> Vec<BodyLine> {
    let continuation = options.continuation_name.as_str();
    let mut lines = vec![BodyLine::new(
        0,
        format!(
            "{} {} {{ {continuation} in",
            variant.await_prefix(),
            variant.primitive()
        ),
    )];

    let closure_argument = match shape {
        CompletionShape::PlainValue { .. } => options.value_name.as_str(),
        CompletionShape::ResultPair { .. } => options.result_name.as_str(),
    };
    lines.push(BodyLine::new(
        1,
        format!(
            "{} {{ {closure_argument} in",
            delegating_call(signature, call_arguments)
        ),
    ));
    lines.extend(resume_lines(shape, 2, closure_argument, continuation));
    lines.push(BodyLine::new(1, "}"));
    lines.push(BodyLine::new(0, "}"));
    debug!(
        function = %signature.name,
        primitive = variant.primitive(),
        lines = lines.len(),
        "synthesized body"
    );
    lines
}

/// `self.name(args)`, discarding the original's own return value.
fn delegating_call(signature: &FunctionSignature, call_arguments: &str) -> String {
    let mut call = String::new();
    if signature.returns_value() {
        call.push_str("_ = ");
    }
    call.push_str(Receiver::for_signature(signature).prefix());
    call.push_str(&signature.name);
    if !call_arguments.is_empty() {
        call.push('(');
        call.push_str(call_arguments);
        call.push(')');
    }
    call
}

fn resume_lines(
    shape: &CompletionShape,
    depth: usize,
    argument: &str,
    continuation: &str,
) -> Vec<BodyLine> {
    match shape {
        CompletionShape::PlainValue { .. } => vec![BodyLine::new(
            depth,
            format!("{continuation}.resume(returning: {argument})"),
        )],
        CompletionShape::ResultPair { .. } => vec![
            BodyLine::new(depth, format!("switch {argument} {{")),
            BodyLine::new(depth, "case .success(let value):"),
            BodyLine::new(depth + 1, format!("{continuation}.resume(returning: value)")),
            BodyLine::new(depth, "case .failure(let error):"),
            BodyLine::new(depth + 1, format!("{continuation}.resume(throwing: error)")),
            BodyLine::new(depth, "}"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Parameter;

    fn signature() -> FunctionSignature {
        FunctionSignature::new(
            "add",
            vec![
                Parameter::new("a", "Int"),
                Parameter::new("completion", "@escaping (Int) -> Void"),
            ],
        )
    }

    fn texts(lines: &[BodyLine]) -> Vec<String> {
        lines
            .iter()
            .map(|l| format!("{}{}", "  ".repeat(l.depth), l.text))
            .collect()
    }

    #[test]
    fn test_plain_value_body() {
        let shape = CompletionShape::PlainValue {
            payload: "Int".into(),
        };
        let lines = synthesize(
            &signature(),
            &shape,
            BridgeVariant::Checked,
            "a: a",
            &TransformOptions::default(),
        );
        assert_eq!(
            texts(&lines),
            vec![
                "await withCheckedContinuation { continuation in",
                "  self.add(a: a) { object in",
                "    continuation.resume(returning: object)",
                "  }",
                "}",
            ]
        );
    }

    #[test]
    fn test_result_pair_body_branches() {
        let shape = CompletionShape::ResultPair {
            success: "Int".into(),
            failure: "Error".into(),
        };
        let lines = synthesize(
            &signature(),
            &shape,
            BridgeVariant::UncheckedThrowing,
            "a: a",
            &TransformOptions::default(),
        );
        let texts = texts(&lines);
        assert_eq!(texts[0], "try await withUnsafeThrowingContinuation { continuation in");
        assert!(texts.contains(&"      continuation.resume(returning: value)".to_string()));
        assert!(texts.contains(&"      continuation.resume(throwing: error)".to_string()));
    }

    #[test]
    fn test_discardable_return_value_is_ignored() {
        let shape = CompletionShape::ResultPair {
            success: "Int".into(),
            failure: "Error".into(),
        };
        let lines = synthesize(
            &signature().with_return_type("Bool"),
            &shape,
            BridgeVariant::CheckedThrowing,
            "a: a",
            &TransformOptions::default(),
        );
        let texts = texts(&lines);
        assert_eq!(texts[1], "  _ = self.add(a: a) { result in");
        assert!(!texts.iter().any(|line| line.contains("catch")));
    }

    #[test]
    fn test_receiver_selection() {
        let instance = signature();
        assert_eq!(Receiver::for_signature(&instance), Receiver::Instance);

        let type_member = signature().with_modifiers(["public", "static"]);
        assert_eq!(Receiver::for_signature(&type_member), Receiver::Type);
        assert_eq!(delegating_call(&type_member, ""), "Self.add");

        let mut global = signature();
        global.is_member = false;
        assert_eq!(delegating_call(&global, "a: a"), "add(a: a)");
    }
}
