//! The signature transformer.
//!
//! A pure function from `(declaration, bridge variant)` to the text of an
//! async peer declaration, run as a short-circuiting pipeline:
//!
//! 1. [`eligibility`] - the declaration is a function with a trailing closure
//! 2. [`classifier`] - the closure delivers a plain value or a `Result`,
//!    then the original must be neither async nor throwing
//! 3. [`reemit`] - pass-through parameters in declaration and call form
//! 4. [`synthesize`] - the continuation-bridging body
//!
//! No state survives between calls; transforming the same input twice
//! yields byte-identical output.

pub mod classifier;
pub mod eligibility;
pub mod reemit;
pub mod synthesize;
pub mod variant;

pub use classifier::{classify, CompletionShape};
pub use reemit::{reemit, ReemittedParameters, WildcardArguments};
pub use synthesize::{synthesize, BodyLine, Receiver};
pub use variant::BridgeVariant;

use serde::Serialize;
use tracing::{debug_span, info};

use crate::core::{Declaration, FunctionSignature, Result, TransformError};
use crate::types;

/// Modifiers that keep their meaning on the generated peer.
const CARRIED_MODIFIERS: &[&str] = &[
    "public",
    "open",
    "package",
    "internal",
    "fileprivate",
    "private",
    "static",
    "class",
    "final",
    "nonisolated",
    "mutating",
    "nonmutating",
];

/// Modifiers that change how the peer is called or what it may touch, kept
/// even when access modifiers are dropped.
const SEMANTIC_MODIFIERS: &[&str] = &["static", "class", "mutating", "nonmutating"];

/// Naming and layout knobs applied to generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    pub indent_width: usize,
    pub continuation_name: String,
    /// Closure parameter for plain-value completions.
    pub value_name: String,
    /// Closure parameter for `Result` completions.
    pub result_name: String,
    pub wildcard_arguments: WildcardArguments,
    /// Carry access level and similar modifiers over to the peer.
    pub preserve_modifiers: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            continuation_name: "continuation".to_string(),
            value_name: "object".to_string(),
            result_name: "result".to_string(),
            wildcard_arguments: WildcardArguments::Positional,
            preserve_modifiers: true,
        }
    }
}

/// The async peer produced for one declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedDeclaration {
    pub name: String,
    pub modifiers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_clause: Option<String>,
    /// Pass-through parameters in declaration form, joined.
    pub parameters: String,
    pub shape: CompletionShape,
    pub throws: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
    pub variant: BridgeVariant,
    pub body: Vec<BodyLine>,
}

impl GeneratedDeclaration {
    /// Return type of the peer; `Void` payloads produce no return clause.
    pub fn return_type(&self) -> Option<&str> {
        Some(self.shape.return_type()).filter(|ty| !types::is_void(ty))
    }

    /// The `func ...` header line without the opening brace.
    pub fn header(&self) -> String {
        let mut header = String::new();
        for modifier in &self.modifiers {
            header.push_str(modifier);
            header.push(' ');
        }
        header.push_str("func ");
        header.push_str(&self.name);
        if let Some(generics) = &self.generic_clause {
            header.push_str(generics);
        }
        header.push('(');
        header.push_str(&self.parameters);
        header.push_str(") async");
        if self.throws {
            header.push_str(" throws");
        }
        if let Some(return_type) = self.return_type() {
            header.push_str(" -> ");
            header.push_str(return_type);
        }
        if let Some(where_clause) = &self.where_clause {
            header.push_str(" where ");
            header.push_str(where_clause);
        }
        header
    }

    /// Render the full declaration with `indent_width` spaces per level.
    pub fn render(&self, indent_width: usize) -> String {
        let unit = " ".repeat(indent_width);
        let mut text = self.header();
        text.push_str(" {\n");
        for line in &self.body {
            text.push_str(&unit.repeat(line.depth + 1));
            text.push_str(&line.text);
            text.push('\n');
        }
        text.push('}');
        text
    }
}

/// Transform one attached declaration into its async peer.
pub fn transform(
    declaration: &Declaration,
    variant: BridgeVariant,
    options: &TransformOptions,
) -> Result<GeneratedDeclaration> {
    let span = debug_span!("transform", %variant);
    let _enter = span.enter();

    let (signature, completion) = eligibility::check(declaration)?;
    let shape = classify(completion, variant)?;
    eligibility::check_effects(signature)?;
    let parameters = reemit(signature.pass_through(), options.wildcard_arguments)?;
    let body = synthesize(signature, &shape, variant, &parameters.call_list(), options);

    info!(function = %signature.name, "generated async peer");
    Ok(GeneratedDeclaration {
        name: signature.name.clone(),
        modifiers: carried_modifiers(signature, options.preserve_modifiers),
        generic_clause: signature.generic_clause.clone(),
        parameters: parameters.declaration_list(),
        throws: shape.is_result_pair(),
        shape,
        where_clause: signature.where_clause.clone(),
        variant,
        body,
    })
}

fn carried_modifiers(signature: &FunctionSignature, preserve: bool) -> Vec<String> {
    signature
        .modifiers
        .iter()
        .filter(|m| CARRIED_MODIFIERS.contains(&m.as_str()))
        .filter(|m| preserve || SEMANTIC_MODIFIERS.contains(&m.as_str()))
        .cloned()
        .collect()
}
