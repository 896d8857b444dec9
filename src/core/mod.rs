pub mod errors;
pub mod signature;

pub use errors::{Result, TransformError};
pub use signature::{Declaration, FunctionSignature, Parameter, WILDCARD_LABEL};
