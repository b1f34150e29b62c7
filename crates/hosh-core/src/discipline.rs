// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Composition disciplines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Hybrid permutations rotate symbols within consecutive blocks of this many
/// ordered positions. A trailing shorter block rotates on its own.
pub const HYBRID_BLOCK_LEN: usize = 4;

/// Subgroup a content-derived identifier is drawn from.
///
/// Variants are declared in dominance order: the discipline of a composition
/// is the maximum of its operands' disciplines.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    /// Central elements: commute with every identifier of the variant.
    Unordered,
    /// Commute with hybrid and unordered identifiers, not with ordered ones.
    Hybrid,
    /// Arbitrary permutation; composition is order-sensitive.
    #[default]
    Ordered,
}

impl Discipline {
    /// Discipline of `compose(a, b)` given the operands' disciplines.
    pub fn dominant(self, other: Discipline) -> Discipline {
        self.max(other)
    }

    /// Lowercase name, as used in config documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unordered => "unordered",
            Self::Hybrid => "hybrid",
            Self::Ordered => "ordered",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Discipline {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unordered" => Ok(Self::Unordered),
            "hybrid" => Ok(Self::Hybrid),
            "ordered" => Ok(Self::Ordered),
            other => Err(ConfigurationError::Parse(format!(
                "unknown discipline `{other}`"
            ))),
        }
    }
}
