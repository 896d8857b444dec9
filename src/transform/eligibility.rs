//! First pipeline stage: is the attached declaration something we can wrap?
//!
//! [`check`] looks at the declaration kind and the trailing closure;
//! [`check_effects`] runs once the closure has been classified, so a
//! closure of the wrong shape is reported before any effect problem.

use tracing::debug;

use crate::core::{Declaration, FunctionSignature, Parameter, Result, TransformError};

/// Accept only function declarations whose last parameter is a closure.
pub fn check(declaration: &Declaration) -> Result<(&FunctionSignature, &Parameter)> {
    let signature = match declaration {
        Declaration::Function(signature) => signature,
        Declaration::Other { introducer } => {
            debug!(introducer = %introducer, "rejected non-function declaration");
            return Err(TransformError::OnlyFunction);
        }
    };

    let completion = signature
        .completion()
        .filter(|parameter| parameter.is_callback())
        .ok_or(TransformError::WrongFunctionType)?;

    debug!(
        function = %signature.name,
        completion = %completion.name,
        "declaration is eligible"
    );
    Ok((signature, completion))
}

/// Reject originals whose effects the bridge cannot reproduce.
///
/// A throwing original would have to be called inside the continuation
/// closure, where an error thrown after the completion fired would resume
/// the continuation a second time.
pub fn check_effects(signature: &FunctionSignature) -> Result<()> {
    if signature.is_async {
        return Err(TransformError::custom(format!(
            "`{}` is already async; there is nothing to asyncify.",
            signature.name
        )));
    }
    if signature.throws {
        return Err(TransformError::custom(format!(
            "`{}` throws; its completion could fire before the error and resume the continuation twice. Report errors through a `Result` completion instead.",
            signature.name
        )));
    }
    Ok(())
}
