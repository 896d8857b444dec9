//! Re-emission of pass-through parameters.
//!
//! Each parameter gets two projections: the declaration form used in the
//! peer's parameter clause and the call form used when delegating to the
//! original function. Order is preserved exactly.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Parameter, Result, TransformError};
use crate::types;

/// How wildcard-labelled (`_ name: T`) parameters are passed in the delegating call.
///
/// The default is [`Positional`](Self::Positional), which departs from the
/// literal `name: name` argument form emitted for every other parameter.
/// [`Named`](Self::Named) keeps that literal form for wildcards too; the
/// resulting call only compiles against originals that accept the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WildcardArguments {
    /// `f(name)`, which is what an unlabeled parameter accepts.
    #[default]
    Positional,
    /// `f(name: name)`.
    Named,
}

/// Both projections of the pass-through parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReemittedParameters {
    pub declaration: Vec<String>,
    pub call: Vec<String>,
}

impl ReemittedParameters {
    pub fn declaration_list(&self) -> String {
        self.declaration.join(", ")
    }

    pub fn call_list(&self) -> String {
        self.call.join(", ")
    }
}

/// Re-emit every parameter, failing on the first one that cannot be carried over.
pub fn reemit(parameters: &[Parameter], wildcard: WildcardArguments) -> Result<ReemittedParameters> {
    let mut out = ReemittedParameters::default();
    for parameter in parameters {
        validate(parameter)?;
        out.declaration.push(declaration_form(parameter));
        out.call.push(call_form(parameter, wildcard));
    }
    debug!(count = parameters.len(), "re-emitted pass-through parameters");
    Ok(out)
}

/// `label name: Type = default`, with the name omitted when it equals the label.
pub fn declaration_form(parameter: &Parameter) -> String {
    let mut text = match parameter.label.as_deref() {
        Some(label) if label != parameter.name => format!("{label} {}", parameter.name),
        _ => parameter.name.clone(),
    };
    text.push_str(": ");
    text.push_str(&types::normalize_whitespace(&parameter.type_text));
    if let Some(default) = &parameter.default_value {
        text.push_str(" = ");
        text.push_str(default.trim());
    }
    text
}

/// `label: name`, or just `name` for a positional wildcard argument.
pub fn call_form(parameter: &Parameter, wildcard: WildcardArguments) -> String {
    if parameter.is_wildcard() {
        return match wildcard {
            WildcardArguments::Positional => parameter.name.clone(),
            WildcardArguments::Named => format!("{0}: {0}", parameter.name),
        };
    }
    format!("{}: {}", parameter.external_label(), parameter.name)
}

fn validate(parameter: &Parameter) -> Result<()> {
    if parameter.name.trim().is_empty() {
        return Err(TransformError::custom(
            "Encountered a parameter without a name.",
        ));
    }
    if parameter.type_text.trim().is_empty() {
        return Err(TransformError::custom(format!(
            "Could not read the type of parameter `{}`.",
            parameter.name
        )));
    }
    if parameter.is_variadic() {
        return Err(TransformError::custom(format!(
            "Variadic parameter `{}` cannot be forwarded to the original function.",
            parameter.name
        )));
    }
    Ok(())
}
