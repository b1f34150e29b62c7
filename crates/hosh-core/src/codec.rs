// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Group element codec.
//!
//! Three representations of the same identifier:
//!
//! - **raw digest**: one byte per digit, ordered digits first;
//! - **structured element**: [`GroupElement`] (permutation + residues);
//! - **canonical string**: one alphabet glyph per digit with separators at the
//!   variant's fixed positions.
//!
//! Rendering and parsing are mutually inverse for every raw digest that
//! passes validation.

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::algebra::{GroupElement, Permutation};
use crate::digest::digest;
use crate::discipline::{Discipline, HYBRID_BLOCK_LEN};
use crate::error::MalformedIdentifier;
use crate::variant::Variant;

/// XOF bytes drawn per digit when reducing content.
const BYTES_PER_DIGIT: usize = 2;

/// Check that `raw` has the variant's length and every digit is below its base.
pub(crate) fn validate_raw(variant: &Variant, raw: &[u8]) -> Result<(), MalformedIdentifier> {
    if raw.len() != variant.digits() {
        return Err(MalformedIdentifier::WrongLength {
            expected: variant.digits(),
            actual: raw.len(),
        });
    }
    for (position, &digit) in raw.iter().enumerate() {
        let base = variant.digit_base(position);
        if u16::from(digit) >= base {
            return Err(MalformedIdentifier::DigitOutOfRange {
                position,
                digit: u16::from(digit),
                base,
            });
        }
    }
    Ok(())
}

/// Interpret a raw digest as a structured element.
///
/// # Errors
///
/// [`MalformedIdentifier::WrongLength`] or
/// [`MalformedIdentifier::DigitOutOfRange`] when `raw` does not fit `variant`.
pub fn decode_element(variant: &Variant, raw: &[u8]) -> Result<GroupElement, MalformedIdentifier> {
    validate_raw(variant, raw)?;
    let (ordered, unordered) = raw.split_at(variant.ordered_digits());
    // Every validated ordered digit is below its Lehmer base, so nothing clamps.
    Ok(GroupElement {
        permutation: Permutation::from_lehmer_saturating(ordered),
        residues: unordered.to_vec(),
    })
}

/// Raw digest of a structured element.
pub fn encode_element(element: &GroupElement) -> Vec<u8> {
    let mut raw = element.permutation.lehmer();
    raw.extend_from_slice(&element.residues);
    raw
}

/// Reduce content into a raw digest of `variant` drawn from the subgroup
/// selected by `discipline`.
///
/// Each digit consumes two XOF bytes read as a little-endian `u16` and reduced
/// modulo the digit base. Ordered digits are a Lehmer code for
/// [`Discipline::Ordered`], a block rotation for [`Discipline::Hybrid`], and
/// zero for [`Discipline::Unordered`]; unordered digits are residues in every
/// case.
pub fn reduce(variant: &Variant, content: &[u8], discipline: Discipline) -> Vec<u8> {
    encode_element(&reduce_element(variant, content, discipline))
}

/// Structured form of [`reduce`].
pub(crate) fn reduce_element(
    variant: &Variant,
    content: &[u8],
    discipline: Discipline,
) -> GroupElement {
    let stream = digest(content, variant.digits() * BYTES_PER_DIGIT);
    let word = |i: usize| u16::from_le_bytes([stream[2 * i], stream[2 * i + 1]]);
    // word % base < base <= 256
    let reduced = |i: usize, base: u16| u8::try_from(word(i) % base).unwrap_or(u8::MAX);

    let ordered = variant.ordered_digits();
    let permutation = match discipline {
        Discipline::Unordered => Permutation::identity(ordered),
        Discipline::Hybrid => Permutation::block_rotation(ordered, HYBRID_BLOCK_LEN, |block| {
            usize::from(word(block))
        }),
        Discipline::Ordered => {
            let code: Vec<u8> = (0..ordered)
                .map(|i| reduced(i, variant.digit_base(i)))
                .collect();
            Permutation::from_lehmer_saturating(&code)
        }
    };
    GroupElement {
        permutation,
        residues: (ordered..variant.digits())
            .map(|i| reduced(i, variant.base()))
            .collect(),
    }
}

/// Mixed-radix rank of a validated raw digest, digit 0 most significant.
///
/// The identity has rank 0 and ranks cover `0..variant.order()` exactly once.
pub fn rank_digits(variant: &Variant, raw: &[u8]) -> BigUint {
    raw.iter().enumerate().fold(BigUint::zero(), |acc, (i, &digit)| {
        acc * u32::from(variant.digit_base(i)) + u32::from(digit)
    })
}

/// Raw digest of the element with the given rank.
///
/// # Errors
///
/// [`MalformedIdentifier::RankTooHigh`] unless `rank < variant.order()`.
pub fn digits_from_rank(
    variant: &Variant,
    rank: &BigUint,
) -> Result<Vec<u8>, MalformedIdentifier> {
    let mut rest = rank.clone();
    let mut raw = vec![0u8; variant.digits()];
    for (i, slot) in raw.iter_mut().enumerate().rev() {
        let base = u32::from(variant.digit_base(i));
        // remainder < base <= 256
        *slot = (&rest % base).to_u8().unwrap_or(u8::MAX);
        rest /= base;
    }
    if rest.is_zero() {
        Ok(raw)
    } else {
        Err(MalformedIdentifier::RankTooHigh {
            rank: rank.clone(),
            order: variant.order(),
        })
    }
}

/// Render a validated raw digest as its canonical string.
///
/// Digits outside the alphabet (only possible for unvalidated input) render as
/// the zero glyph.
pub fn render_digits(variant: &Variant, raw: &[u8]) -> String {
    let alphabet = variant.alphabet();
    let mut separators = variant.separator_positions().iter().peekable();
    let mut out = String::with_capacity(variant.rendered_len());
    for (index, &digit) in raw.iter().enumerate() {
        if separators.next_if_eq(&&index).is_some() {
            out.push(variant.separator());
        }
        out.push(
            alphabet
                .get(usize::from(digit))
                .copied()
                .unwrap_or_else(|| variant.zero_glyph()),
        );
    }
    out
}

/// Parse a canonical string into a raw digest.
///
/// # Errors
///
/// - [`MalformedIdentifier::WrongLength`] when the character count differs
///   from [`Variant::rendered_len`];
/// - [`MalformedIdentifier::MisplacedSeparator`] for a missing or stray
///   separator;
/// - [`MalformedIdentifier::InvalidCharacter`] for a glyph outside the
///   alphabet;
/// - [`MalformedIdentifier::DigitOutOfRange`] for a glyph whose value exceeds
///   the base at its position.
pub fn parse_digits(variant: &Variant, text: &str) -> Result<Vec<u8>, MalformedIdentifier> {
    let actual = text.chars().count();
    if actual != variant.rendered_len() {
        return Err(MalformedIdentifier::WrongLength {
            expected: variant.rendered_len(),
            actual,
        });
    }

    let separator = variant.separator();
    let mut separators = variant.separator_positions().iter().peekable();
    let mut raw = Vec::with_capacity(variant.digits());
    for (position, ch) in text.chars().enumerate() {
        let index = raw.len();
        if separators.next_if_eq(&&index).is_some() {
            if ch != separator {
                return Err(MalformedIdentifier::MisplacedSeparator { position });
            }
            continue;
        }
        if ch == separator {
            return Err(MalformedIdentifier::MisplacedSeparator { position });
        }
        let digit = variant
            .glyph_value(ch)
            .ok_or(MalformedIdentifier::InvalidCharacter { ch, position })?;
        let base = variant.digit_base(index);
        if digit >= base {
            return Err(MalformedIdentifier::DigitOutOfRange {
                position: index,
                digit,
                base,
            });
        }
        raw.push(u8::try_from(digit).unwrap_or(u8::MAX));
    }
    Ok(raw)
}
