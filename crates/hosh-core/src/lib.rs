// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! hosh-core: operable content identifiers.
//!
//! A [`Hosh`] is a content identifier that is also an element of a finite group.
//! Identifiers of composed artifacts can be computed from the identifiers of
//! their inputs alone, and the identifier of a future artifact can be predicted
//! before the artifact exists.
//!
//! Every identifier belongs to a [`Variant`] that fixes its digit count and the
//! split of those digits into two segments:
//!
//! - the **ordered** segment is a Lehmer code naming a permutation; composing
//!   it is permutation composition (associative, non-commutative);
//! - the **unordered** segment is a vector of residues; composing it is
//!   carry-free per-digit modular addition (commutative).
//!
//! Content-derived identifiers additionally carry a [`Discipline`] that selects
//! the subgroup they are drawn from, so that unordered identifiers commute with
//! everything and hybrid identifiers commute among themselves.
//!
//! ```
//! use hosh_core::{Discipline, Hosh, Variant};
//!
//! # fn main() -> Result<(), hosh_core::HoshError> {
//! let a = Hosh::from_content(b"lots of data");
//! let b = Hosh::from_content(b"lots of data 2");
//! let c = a.compose(&b)?;
//! assert_eq!(c.divide(&b)?, a);
//! assert_eq!(a.invert().compose(&c)?, b);
//!
//! let x = Hosh::from_content_in(&Variant::default_preset(), b"x", Discipline::Unordered);
//! assert_eq!(x.compose(&a)?, a.compose(&x)?);
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::unreadable_literal,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::many_single_char_names,
    clippy::module_name_repetitions,
    clippy::use_self
)]

/// Permutation and residue arithmetic behind composition.
pub mod algebra;
mod codec;
/// JSON-backed registry configuration.
pub mod config;
mod digest;
mod discipline;
mod error;
mod hosh;
mod registry;
mod variant;

/// Raw digest and string codecs for a variant.
pub use codec::{
    decode_element, digits_from_rank, encode_element, parse_digits, rank_digits, reduce,
    render_digits,
};
/// Content digest function (BLAKE3 XOF).
pub use digest::digest;
/// Composition discipline tags and the dominance rule.
pub use discipline::{Discipline, HYBRID_BLOCK_LEN};
/// Error taxonomy.
pub use error::{ConfigurationError, HoshError, MalformedIdentifier};
/// The identifier facade.
pub use hosh::{Hosh, HoshRecord, IDENTITY_ALIAS};
/// Arbitrary-precision element ranks.
pub use num_bigint::BigUint;
/// Named variant lookup.
pub use registry::VariantRegistry;
/// Variant configuration and presets.
pub use variant::{
    Variant, VariantSpec, CANONICAL_ALPHABET, DEFAULT_SEPARATOR, DEFAULT_SEPARATOR_STRIDE,
    MAX_DIGITS,
};
