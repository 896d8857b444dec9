//! CLI command implementations.
//!
//! - **expand**: rewrite a Swift file with generated async peers
//! - **generate**: run one generator over a JSON-encoded declaration
//! - **init**: write a default `.asyncify.toml`

pub mod expand;
pub mod generate;
pub mod init;

pub use expand::{expand_file, ExpandConfig};
pub use generate::{generate_peer, render_peer, GenerateConfig};
pub use init::init_config;
