// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy for identifier construction and composition.
//!
//! Every condition here is a programming or input error detected at the
//! boundary of the offending call. Nothing is retried and nothing leaves partial
//! state behind.

use num_bigint::BigUint;
use thiserror::Error;

/// Umbrella error returned by fallible identifier operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HoshError {
    /// Unknown or inconsistent variant parameters.
    #[error("[HOSH_CONFIG] {0}")]
    Configuration(#[from] ConfigurationError),
    /// Raw digest or canonical string that does not fit its variant.
    #[error("[HOSH_MALFORMED] {0}")]
    Malformed(#[from] MalformedIdentifier),
    /// Operands belong to different variants.
    #[error("[HOSH_VARIANT_MISMATCH] cannot combine `{left}` with `{right}`")]
    VariantMismatch {
        /// Variant name of the left operand.
        left: String,
        /// Variant name of the right operand.
        right: String,
    },
}

/// Variant configuration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No variant is registered under this name.
    #[error("unknown variant `{0}`")]
    UnknownVariant(String),
    /// A different variant is already registered under this name.
    #[error("variant `{0}` is already registered with different parameters")]
    Conflict(String),
    /// Parameters violate a structural constraint.
    #[error("invalid variant `{variant}`: {reason}")]
    Invalid {
        /// Offending variant name.
        variant: String,
        /// Human-readable constraint that failed.
        reason: String,
    },
    /// The configuration document could not be decoded.
    #[error("config parse error: {0}")]
    Parse(String),
}

/// Ways a raw digest or canonical string can fail to decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedIdentifier {
    /// Raw digest or string has the wrong length for the variant.
    #[error("expected length {expected}, got {actual}")]
    WrongLength {
        /// Length the variant requires.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },
    /// A character outside the variant alphabet.
    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter {
        /// The rejected character.
        ch: char,
        /// Character position in the input string.
        position: usize,
    },
    /// A separator missing from, or present outside, its fixed position.
    #[error("misplaced separator at position {position}")]
    MisplacedSeparator {
        /// Character position in the input string.
        position: usize,
    },
    /// A digit value at or above the base allowed at its position.
    #[error("digit {digit} at digit position {position} exceeds base {base}")]
    DigitOutOfRange {
        /// Digit position (separators excluded).
        position: usize,
        /// Decoded digit value.
        digit: u16,
        /// Base permitted at that position.
        base: u16,
    },
    /// An element rank at or above the order of the variant's group.
    #[error("rank {rank} is not below the group order {order}")]
    RankTooHigh {
        /// Requested rank.
        rank: BigUint,
        /// Number of elements in the group.
        order: BigUint,
    },
    /// No built-in variant renders to a string of this length.
    #[error("no built-in variant renders {0} characters")]
    UnknownLength(usize),
}
