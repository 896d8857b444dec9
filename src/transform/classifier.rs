//! Completion-shape classification.
//!
//! Purely structural: the failure type of a `Result` is never checked for
//! `Error` conformance. A mismatch there surfaces when the host type-checks
//! the generated peer.

use serde::Serialize;
use tracing::debug;

use super::variant::BridgeVariant;
use crate::core::{Parameter, Result, TransformError};
use crate::types;

/// What the completion closure delivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum CompletionShape {
    /// `(T) -> Void`: the peer returns `T`.
    PlainValue { payload: String },
    /// `(Result<S, F>) -> Void`: the peer returns `S` and throws `F`.
    ResultPair { success: String, failure: String },
}

impl CompletionShape {
    /// Return type of the generated peer.
    pub fn return_type(&self) -> &str {
        match self {
            Self::PlainValue { payload } => payload,
            Self::ResultPair { success, .. } => success,
        }
    }

    pub fn is_result_pair(&self) -> bool {
        matches!(self, Self::ResultPair { .. })
    }
}

/// Classify the completion parameter for the requested bridge.
///
/// Non-throwing bridges can only resume with a value, so a `Result` payload
/// is handed back whole as a plain value. Throwing bridges require the
/// `Result<Success, Failure>` shape.
pub fn classify(completion: &Parameter, variant: BridgeVariant) -> Result<CompletionShape> {
    let function_type = types::parse_function_type(&completion.type_text)
        .filter(types::FunctionType::is_single_argument_void)
        .ok_or(TransformError::WrongFunctionType)?;
    let payload = &function_type.parameters[0];

    let shape = if variant.is_throwing() {
        let (success, failure) =
            types::parse_result_type(payload).ok_or(TransformError::NotThrowing)?;
        CompletionShape::ResultPair { success, failure }
    } else {
        CompletionShape::PlainValue {
            payload: payload.clone(),
        }
    };

    debug!(completion = %completion.name, ?shape, "classified completion");
    Ok(shape)
}
