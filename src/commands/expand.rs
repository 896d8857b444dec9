use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

use crate::config::{self, AsyncifyConfig};
use crate::formatting::{ColorMode, DiagnosticFormatter};
use crate::host::{expand_source, ExpandOptions};
use crate::io;

pub struct ExpandConfig {
    pub path: PathBuf,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub check: bool,
    pub keep_attributes: bool,
    pub color: ColorMode,
}

/// Explicit `--config` wins; otherwise search upward from the source file.
pub(crate) fn resolve_config(
    explicit: Option<&PathBuf>,
    near: Option<&std::path::Path>,
) -> Result<AsyncifyConfig> {
    match explicit {
        Some(path) => config::load_config_file(path),
        None => Ok(near
            .and_then(|p| p.parent())
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(config::load_config_from)
            .unwrap_or_else(config::load_config)),
    }
}

pub fn expand_file(config: ExpandConfig) -> Result<()> {
    let settings = resolve_config(config.config.as_ref(), Some(config.path.as_path()))?;
    let source = io::read_file(&config.path)?;

    let options = ExpandOptions {
        transform: settings.transform_options(),
        keep_attributes: config.keep_attributes || settings.output().keep_attributes,
    };
    let report = expand_source(&source, &options)
        .with_context(|| format!("Failed to parse {}", config.path.display()))?;
    debug!(
        path = %config.path.display(),
        sites = report.sites.len(),
        "expansion finished"
    );

    let formatter = DiagnosticFormatter::new(config.color);
    for outcome in &report.sites {
        if let Some(line) = formatter.diagnostic(&config.path, outcome) {
            eprintln!("{line}");
        }
    }

    if !config.check {
        match &config.output {
            Some(path) => io::write_file(path, &report.output)?,
            None => print!("{}", report.output),
        }
    }

    let failed = report.failures().count();
    eprintln!("{}", formatter.summary(report.expanded_count(), failed));

    if failed > 0 {
        anyhow::bail!("{failed} attribute site(s) could not be expanded")
    }
    Ok(())
}
