use serde::{Deserialize, Serialize};
use std::fmt;

/// Which continuation primitive the generated body suspends on.
///
/// Checked primitives trap at run time when the continuation is resumed
/// twice and log when it is dropped without being resumed. Unchecked ones
/// trust the wrapped function to call its completion exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BridgeVariant {
    Checked,
    Unchecked,
    CheckedThrowing,
    UncheckedThrowing,
}

impl Default for BridgeVariant {
    fn default() -> Self {
        Self::Checked
    }
}

impl BridgeVariant {
    pub const ALL: [BridgeVariant; 4] = [
        Self::Checked,
        Self::Unchecked,
        Self::CheckedThrowing,
        Self::UncheckedThrowing,
    ];

    #[must_use]
    pub const fn is_throwing(self) -> bool {
        matches!(self, Self::CheckedThrowing | Self::UncheckedThrowing)
    }

    /// Name of the suspension function the body calls.
    #[must_use]
    pub const fn primitive(self) -> &'static str {
        match self {
            Self::Checked => "withCheckedContinuation",
            Self::Unchecked => "withUnsafeContinuation",
            Self::CheckedThrowing => "withCheckedThrowingContinuation",
            Self::UncheckedThrowing => "withUnsafeThrowingContinuation",
        }
    }

    /// Keyword prefix needed in front of the primitive call.
    #[must_use]
    pub const fn await_prefix(self) -> &'static str {
        if self.is_throwing() {
            "try await"
        } else {
            "await"
        }
    }
}

impl fmt::Display for BridgeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checked => write!(f, "checked"),
            Self::Unchecked => write!(f, "unchecked"),
            Self::CheckedThrowing => write!(f, "checked_throwing"),
            Self::UncheckedThrowing => write!(f, "unchecked_throwing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_variant_names_a_distinct_primitive() {
        let mut names: Vec<_> = BridgeVariant::ALL.iter().map(|v| v.primitive()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_variant_flags() {
        assert!(!BridgeVariant::Checked.is_throwing());
        assert!(BridgeVariant::UncheckedThrowing.is_throwing());
        assert_eq!(BridgeVariant::CheckedThrowing.await_prefix(), "try await");
        assert_eq!(BridgeVariant::default(), BridgeVariant::Checked);
    }
}
