use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::formatting::ColorMode;
use crate::generators::Generator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Swift source text
    Text,
    /// The generated declaration as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "asyncify")]
#[command(about = "Generate async peers for completion-handler functions", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Expand every @Asyncify* attribute in a Swift source file
    Expand {
        /// Swift source file
        path: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to the nearest .asyncify.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Only report diagnostics; do not print the expanded source
        #[arg(long)]
        check: bool,

        /// Leave the generator attributes in the expanded source
        #[arg(long = "keep-attributes")]
        keep_attributes: bool,

        /// When to color diagnostics
        #[arg(long, value_enum, default_value = "auto")]
        color: ColorMode,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Run one generator over a JSON-encoded declaration
    Generate {
        /// JSON file holding a serialized declaration
        #[arg(short, long)]
        signature: PathBuf,

        /// Generator attribute to apply
        #[arg(short, long, value_enum, default_value = "AsyncifyChecked")]
        generator: Generator,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Configuration file (defaults to the nearest .asyncify.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Self::Expand { verbosity, .. } | Self::Generate { verbosity, .. } => *verbosity,
            Self::Init { .. } => 0,
        }
    }
}
