//! Source-level expansion: run every attribute site through the transformer
//! and splice the generated peers in after their originals.

use serde::Serialize;
use tracing::{debug, info, warn};

use super::scanner::{scan, AttributeSite};
use crate::core::{Declaration, TransformError};
use crate::generators::Generator;
use crate::transform::TransformOptions;

#[derive(Debug, Clone, Default)]
pub struct ExpandOptions {
    pub transform: TransformOptions,
    /// Leave the generator attributes in the output.
    pub keep_attributes: bool,
}

/// What happened at one attribute site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteOutcome {
    pub line: usize,
    pub column: usize,
    pub generator: Generator,
    /// Name of the decorated function, when the header could be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(flatten)]
    pub status: SiteStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SiteStatus {
    Expanded { peer: String },
    Failed { kind: &'static str, message: String },
}

impl SiteOutcome {
    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            SiteStatus::Failed { message, .. } => Some(message),
            SiteStatus::Expanded { .. } => None,
        }
    }
}

/// Expanded source plus one outcome per attribute site, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpansionReport {
    pub output: String,
    pub sites: Vec<SiteOutcome>,
}

impl ExpansionReport {
    pub fn failures(&self) -> impl Iterator<Item = &SiteOutcome> {
        self.sites.iter().filter(|s| s.error_message().is_some())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn expanded_count(&self) -> usize {
        self.sites.len() - self.failures().count()
    }
}

/// Pending text replacement over a byte range of the original source.
struct Edit {
    range: std::ops::Range<usize>,
    replacement: String,
}

/// Expand every generator attribute in `source`.
///
/// A failing site leaves its declaration untouched; other sites still expand.
/// Only a failure to parse the source at all is an error.
pub fn expand_source(source: &str, options: &ExpandOptions) -> anyhow::Result<ExpansionReport> {
    let sites = scan(source)?;
    debug!(sites = sites.len(), "scanned source for generator attributes");

    let mut edits = Vec::new();
    let mut outcomes = Vec::with_capacity(sites.len());

    for site in &sites {
        let function = site
            .declaration
            .as_ref()
            .ok()
            .and_then(Declaration::as_function)
            .map(|f| f.name.clone());

        let result = site
            .declaration
            .as_ref()
            .map_err(Clone::clone)
            .and_then(|d| site.generator.expand(d, &options.transform));
        let status = match result {
            Ok(generated) => {
                let peer = generated.render(options.transform.indent_width);
                info!(
                    line = site.line,
                    generator = %site.generator,
                    function = %generated.name,
                    "expanded"
                );
                if !options.keep_attributes {
                    edits.push(remove_attribute(source, site));
                }
                edits.push(Edit {
                    range: site.declaration_end..site.declaration_end,
                    replacement: format!("\n\n{}", indent_block(&peer, &site.indent)),
                });
                SiteStatus::Expanded { peer }
            }
            Err(err) => {
                warn!(line = site.line, generator = %site.generator, error = %err, "expansion failed");
                failed(&err)
            }
        };

        outcomes.push(SiteOutcome {
            line: site.line,
            column: site.column,
            generator: site.generator,
            function,
            status,
        });
    }

    Ok(ExpansionReport {
        output: apply_edits(source, edits),
        sites: outcomes,
    })
}

fn failed(err: &TransformError) -> SiteStatus {
    SiteStatus::Failed {
        kind: err.kind(),
        message: err.to_string(),
    }
}

/// Drop the whole line when the attribute stands alone on it, otherwise
/// just the attribute and the blanks after it.
fn remove_attribute(source: &str, site: &AttributeSite) -> Edit {
    let line_start = source[..site.attribute.start].rfind('\n').map_or(0, |p| p + 1);
    let line_end = source[site.attribute.end..]
        .find('\n')
        .map_or(source.len(), |p| site.attribute.end + p);

    let alone = source[line_start..site.attribute.start].trim().is_empty()
        && source[site.attribute.end..line_end].trim().is_empty();
    let range = if alone {
        line_start..(line_end + 1).min(source.len())
    } else {
        let trailing = source[site.attribute.end..line_end].len()
            - source[site.attribute.end..line_end]
                .trim_start_matches([' ', '\t'])
                .len();
        site.attribute.start..site.attribute.end + trailing
    };

    Edit {
        range,
        replacement: String::new(),
    }
}

fn indent_block(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn apply_edits(source: &str, mut edits: Vec<Edit>) -> String {
    // stable: inserts at one offset keep their source order
    edits.sort_by_key(|e| e.range.start);
    let mut output = source.to_string();
    for edit in edits.into_iter().rev() {
        output.replace_range(edit.range, &edit.replacement);
    }
    output
}
