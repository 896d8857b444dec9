use anyhow::Result;
use asyncify::cli::{Cli, Commands};
use asyncify::commands::{expand, generate, init};
use asyncify::observability::init_tracing;
use clap::Parser;

// Main orchestrator function
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.command.verbosity());

    match cli.command {
        Commands::Expand {
            path,
            output,
            config,
            check,
            keep_attributes,
            color,
            verbosity: _,
        } => expand::expand_file(expand::ExpandConfig {
            path,
            output,
            config,
            check,
            keep_attributes,
            color,
        }),
        Commands::Generate {
            signature,
            generator,
            format,
            config,
            verbosity: _,
        } => generate::generate_peer(generate::GenerateConfig {
            signature,
            generator,
            format,
            config,
        }),
        Commands::Init { force } => init::init_config(force),
    }
}
