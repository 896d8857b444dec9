use serde::{Deserialize, Serialize};

use crate::transform::{TransformOptions, WildcardArguments};

/// Root configuration structure for asyncify
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AsyncifyConfig {
    /// Layout of generated text
    #[serde(default)]
    pub output: Option<OutputConfig>,

    /// Identifiers used inside generated bodies
    #[serde(default)]
    pub naming: Option<NamingConfig>,

    /// How pass-through arguments are forwarded
    #[serde(default)]
    pub arguments: Option<ArgumentsConfig>,

    /// Which declaration modifiers the peer inherits
    #[serde(default)]
    pub modifiers: Option<ModifiersConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Keep generator attributes in expanded source
    #[serde(default)]
    pub keep_attributes: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            keep_attributes: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamingConfig {
    #[serde(default = "default_continuation")]
    pub continuation: String,
    #[serde(default = "default_value")]
    pub value: String,
    #[serde(default = "default_result")]
    pub result: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            continuation: default_continuation(),
            value: default_value(),
            result: default_result(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ArgumentsConfig {
    #[serde(default)]
    pub wildcard: WildcardArguments,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModifiersConfig {
    #[serde(default = "default_preserve")]
    pub preserve: bool,
}

impl Default for ModifiersConfig {
    fn default() -> Self {
        Self {
            preserve: default_preserve(),
        }
    }
}

fn default_indent() -> usize {
    4
}

fn default_continuation() -> String {
    "continuation".to_string()
}

fn default_value() -> String {
    "object".to_string()
}

fn default_result() -> String {
    "result".to_string()
}

fn default_preserve() -> bool {
    true
}

impl AsyncifyConfig {
    pub fn output(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }

    pub fn naming(&self) -> NamingConfig {
        self.naming.clone().unwrap_or_default()
    }

    /// Project the file settings onto transformer options.
    pub fn transform_options(&self) -> TransformOptions {
        let naming = self.naming();
        TransformOptions {
            indent_width: self.output().indent,
            continuation_name: naming.continuation,
            value_name: naming.value,
            result_name: naming.result,
            wildcard_arguments: self.arguments.clone().unwrap_or_default().wildcard,
            preserve_modifiers: self.modifiers.clone().unwrap_or_default().preserve,
        }
    }

    /// Reject settings that would produce uncompilable peers.
    pub fn validate(&self) -> Result<(), String> {
        let naming = self.naming();
        for (key, value) in [
            ("naming.continuation", &naming.continuation),
            ("naming.value", &naming.value),
            ("naming.result", &naming.result),
        ] {
            if !is_swift_identifier(value) {
                return Err(format!("`{key}` must be a Swift identifier, got `{value}`"));
            }
        }
        if naming.value == naming.continuation || naming.result == naming.continuation {
            return Err("closure argument names must differ from `naming.continuation`".into());
        }
        if self.output().indent == 0 || self.output().indent > 16 {
            return Err(format!(
                "`output.indent` must be between 1 and 16, got {}",
                self.output().indent
            ));
        }
        Ok(())
    }
}

fn is_swift_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}
