// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod formatting;
pub mod generators;
pub mod host;
pub mod io;
pub mod observability;
pub mod transform;
pub mod types;

// Re-export commonly used types
pub use crate::core::{Declaration, FunctionSignature, Parameter, TransformError};

pub use crate::transform::{
    transform, BridgeVariant, CompletionShape, GeneratedDeclaration, TransformOptions,
    WildcardArguments,
};

pub use crate::generators::Generator;

pub use crate::host::{expand_source, ExpandOptions, ExpansionReport};

pub use crate::config::{load_config, AsyncifyConfig};
