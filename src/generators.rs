//! Attribute entry points.
//!
//! Each attribute a user can write maps to one fixed [`BridgeVariant`]; all of
//! them share the same transformation.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{Declaration, Result};
use crate::transform::{transform, BridgeVariant, GeneratedDeclaration, TransformOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Generator {
    #[value(name = "AsyncifyChecked")]
    AsyncifyChecked,
    #[value(name = "AsyncifyUnchecked")]
    AsyncifyUnchecked,
    #[value(name = "AsyncifyCheckedThrowing")]
    AsyncifyCheckedThrowing,
    #[value(name = "AsyncifyUncheckedThrowing")]
    AsyncifyUncheckedThrowing,
    /// Legacy spelling of `AsyncifyChecked`.
    #[value(name = "Asyncify")]
    Asyncify,
    /// Legacy spelling of `AsyncifyCheckedThrowing`.
    #[value(name = "AsyncifyThrowing")]
    AsyncifyThrowing,
}

impl Generator {
    pub const ALL: [Generator; 6] = [
        Self::AsyncifyChecked,
        Self::AsyncifyUnchecked,
        Self::AsyncifyCheckedThrowing,
        Self::AsyncifyUncheckedThrowing,
        Self::Asyncify,
        Self::AsyncifyThrowing,
    ];

    #[must_use]
    pub const fn attribute_name(self) -> &'static str {
        match self {
            Self::AsyncifyChecked => "AsyncifyChecked",
            Self::AsyncifyUnchecked => "AsyncifyUnchecked",
            Self::AsyncifyCheckedThrowing => "AsyncifyCheckedThrowing",
            Self::AsyncifyUncheckedThrowing => "AsyncifyUncheckedThrowing",
            Self::Asyncify => "Asyncify",
            Self::AsyncifyThrowing => "AsyncifyThrowing",
        }
    }

    #[must_use]
    pub const fn variant(self) -> BridgeVariant {
        match self {
            Self::AsyncifyChecked | Self::Asyncify => BridgeVariant::Checked,
            Self::AsyncifyUnchecked => BridgeVariant::Unchecked,
            Self::AsyncifyCheckedThrowing | Self::AsyncifyThrowing => BridgeVariant::CheckedThrowing,
            Self::AsyncifyUncheckedThrowing => BridgeVariant::UncheckedThrowing,
        }
    }

    #[must_use]
    pub const fn is_legacy(self) -> bool {
        matches!(self, Self::Asyncify | Self::AsyncifyThrowing)
    }

    /// Look up a generator by attribute name, with or without the leading `@`.
    pub fn from_attribute(name: &str) -> Option<Self> {
        let name = name.trim().trim_start_matches('@');
        Self::ALL.into_iter().find(|g| g.attribute_name() == name)
    }

    /// Expand `declaration` the way this attribute would.
    pub fn expand(
        self,
        declaration: &Declaration,
        options: &TransformOptions,
    ) -> Result<GeneratedDeclaration> {
        transform(declaration, self.variant(), options)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::AsyncifyChecked
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.attribute_name())
    }
}

impl FromStr for Generator {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_attribute(s).ok_or_else(|| format!("unknown generator attribute `{s}`"))
    }
}
