//! Swift source adapter.
//!
//! Plays the role of the host compiler's macro system. The source is parsed
//! with tree-sitter; attached generator attributes are found in the tree,
//! each declaration node becomes the host-agnostic
//! [`Declaration`](crate::core::Declaration), and the generated peers are
//! spliced back into the source text.

pub mod declaration;
pub mod expand;
pub mod parser;
pub mod scanner;

pub use declaration::{is_member, parse_declaration, parse_parameter_clause, read_declaration};
pub use expand::{expand_source, ExpandOptions, ExpansionReport, SiteOutcome, SiteStatus};
pub use parser::parse_swift;
pub use scanner::{scan, AttributeSite};
