//! Validation diagnostics.
//!
//! The stack validator reports contract incompatibilities as data rather
//! than errors: one [`Diagnostic`] per failed adjacent-pair check, in scan
//! order. Each record carries both step names, which contract pair failed,
//! and the direction, so the caller can act on it without re-running the
//! check.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which adjacent-pair contract check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mismatch {
    /// `self`'s declared next-input does not satisfy `next`'s declared
    /// own-input.
    Argument,
    /// `next`'s declared own-output does not satisfy `self`'s declared
    /// next-output.
    Output,
}

impl Mismatch {
    /// The contract field on the `self` side of the pair.
    #[must_use]
    pub const fn self_contract(self) -> &'static str {
        match self {
            Self::Argument => "declared-next-input",
            Self::Output => "declared-next-output",
        }
    }

    /// The contract field on the `next` side of the pair.
    #[must_use]
    pub const fn next_contract(self) -> &'static str {
        match self {
            Self::Argument => "declared-own-input",
            Self::Output => "declared-own-output",
        }
    }

    /// The data-flow direction of the failed check.
    #[must_use]
    pub const fn direction(self) -> &'static str {
        match self {
            Self::Argument => "argument",
            Self::Output => "output",
        }
    }
}

/// One detected incompatibility between two adjacent steps.
///
/// `Display` renders the stable message shape consumed downstream:
///
/// ```text
/// Types don't match between self:<selfName>.<selfFieldKind> and next:<nextName>.<nextFieldKind> <direction> type
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Position of the `self` step in the stack.
    pub index: usize,
    /// Display name of the `self` step.
    pub self_name: String,
    /// Display name of the `next` step.
    pub next_name: String,
    /// Which contract pair failed.
    pub mismatch: Mismatch,
}

impl Diagnostic {
    /// Creates a diagnostic for the pair at `index`/`index + 1`.
    #[must_use]
    pub fn new(
        index: usize,
        self_name: impl Into<String>,
        next_name: impl Into<String>,
        mismatch: Mismatch,
    ) -> Self {
        Self {
            index,
            self_name: self_name.into(),
            next_name: next_name.into(),
            mismatch,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Types don't match between self:{}.{} and next:{}.{} {} type",
            self.self_name,
            self.mismatch.self_contract(),
            self.next_name,
            self.mismatch.next_contract(),
            self.mismatch.direction()
        )
    }
}
