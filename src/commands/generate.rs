use anyhow::{Context, Result};
use std::path::PathBuf;

use super::expand::resolve_config;
use crate::cli::OutputFormat;
use crate::core::Declaration;
use crate::generators::Generator;
use crate::io;

pub struct GenerateConfig {
    pub signature: PathBuf,
    pub generator: Generator,
    pub format: OutputFormat,
    pub config: Option<PathBuf>,
}

/// Transform one JSON-encoded declaration and render the peer.
pub fn render_peer(
    json: &str,
    generator: Generator,
    format: OutputFormat,
    settings: &crate::config::AsyncifyConfig,
) -> Result<String> {
    let declaration: Declaration =
        serde_json::from_str(json).context("Failed to parse declaration JSON")?;
    let options = settings.transform_options();
    let generated = generator
        .expand(&declaration, &options)
        .with_context(|| format!("{generator} failed"))?;

    Ok(match format {
        OutputFormat::Text => generated.render(options.indent_width),
        OutputFormat::Json => serde_json::to_string_pretty(&generated)?,
    })
}

pub fn generate_peer(config: GenerateConfig) -> Result<()> {
    let settings = resolve_config(config.config.as_ref(), None)?;
    let json = io::read_file(&config.signature)?;
    let text = render_peer(&json, config.generator, config.format, &settings)?;
    println!("{text}");
    Ok(())
}
