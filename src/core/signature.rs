//! Host-agnostic representation of an attached declaration.
//!
//! The host adapter (see [`crate::host`]) or any other front end converts its
//! native syntax tree into these records. The transformer only reads them.

use serde::{Deserialize, Serialize};

use crate::types;

/// The external label that means "no argument label".
pub const WILDCARD_LABEL: &str = "_";

/// Whatever the attribute was attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    /// A `func` declaration.
    Function(FunctionSignature),
    /// Any other declaration (`var`, `struct`, `init`, ...).
    Other {
        /// Introducer keyword as written in source.
        introducer: String,
    },
}

impl Declaration {
    pub fn as_function(&self) -> Option<&FunctionSignature> {
        match self {
            Self::Function(signature) => Some(signature),
            Self::Other { .. } => None,
        }
    }
}

/// Ordered parameters plus return and effect metadata of a function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    /// Generic parameter clause including angle brackets, e.g. `<T: Codable>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_clause: Option<String>,
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub is_async: bool,
    #[serde(default)]
    pub throws: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    /// Where clause without the `where` keyword.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,
    /// False for free functions, which have no `self` to delegate through.
    #[serde(default = "default_is_member")]
    pub is_member: bool,
}

fn default_is_member() -> bool {
    true
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
            generic_clause: None,
            parameters,
            is_async: false,
            throws: false,
            return_type: None,
            where_clause: None,
            is_member: true,
        }
    }

    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modifiers = modifiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_return_type(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = Some(return_type.into());
        self
    }

    pub fn throwing(mut self) -> Self {
        self.throws = true;
        self
    }

    /// The trailing completion parameter, if the function has any parameters.
    pub fn completion(&self) -> Option<&Parameter> {
        self.parameters.last()
    }

    /// Every parameter except the trailing completion one, in order.
    pub fn pass_through(&self) -> &[Parameter] {
        match self.parameters.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    /// `static` and `class` members delegate through `Self` rather than `self`.
    pub fn is_type_member(&self) -> bool {
        self.modifiers.iter().any(|m| m == "static" || m == "class")
    }

    /// True when the declared return type is present and not `Void`.
    pub fn returns_value(&self) -> bool {
        self.return_type
            .as_deref()
            .is_some_and(|ty| !types::is_void(ty))
    }
}

/// One entry of a parameter clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// External argument label; `None` when the internal name doubles as the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub type_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            label: None,
            name: name.into(),
            type_text: type_text.into(),
            default_value: None,
        }
    }

    pub fn labeled(
        label: impl Into<String>,
        name: impl Into<String>,
        type_text: impl Into<String>,
    ) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::new(name, type_text)
        }
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Label callers write, which is the name itself when no label is given.
    pub fn external_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    pub fn is_wildcard(&self) -> bool {
        self.label.as_deref() == Some(WILDCARD_LABEL)
    }

    /// Whether the type is itself a closure type.
    pub fn is_callback(&self) -> bool {
        types::parse_function_type(&self.type_text).is_some()
    }

    pub fn is_variadic(&self) -> bool {
        self.type_text.trim_end().ends_with("...")
    }
}
