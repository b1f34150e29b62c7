// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Variant configuration: digit layout, numeral bases, and rendering alphabet.
//!
//! A variant is an immutable value. Identifiers hold it behind an [`Arc`] and
//! the codec and algebra take it as an explicit argument; there is no ambient
//! global lookup on the arithmetic path.
//!
//! # Digit layout
//!
//! A variant with `D` digits and `o` ordered digits stores one raw byte per
//! digit. Digit `i < o` is the `i`-th Lehmer digit of a permutation of `o`
//! symbols and has base `o - i`; the remaining `D - o` digits are residues with
//! the variant's unordered base.

use std::fmt;
use std::sync::{Arc, OnceLock};

use num_bigint::BigUint;
use num_traits::One;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Canonical 59-glyph alphabet. Omits `l`, `I` and `O`, which read too much
/// like `1` and `0`.
pub const CANONICAL_ALPHABET: &str =
    "0123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

/// Separator glyph used by the presets.
pub const DEFAULT_SEPARATOR: char = '-';

/// Presets insert a separator before every digit index divisible by this.
pub const DEFAULT_SEPARATOR_STRIDE: usize = 8;

/// Largest alphabet a variant may use; digits are stored as single bytes.
const MAX_ALPHABET_LEN: usize = 256;

/// Largest digit count, and so the largest raw digest in bytes.
pub const MAX_DIGITS: usize = 256;

fn printable(ch: char) -> bool {
    !ch.is_control() && !ch.is_whitespace()
}

/// Serializable description of a variant.
///
/// Optional fields fall back to [`CANONICAL_ALPHABET`], [`DEFAULT_SEPARATOR`]
/// and a separator before every [`DEFAULT_SEPARATOR_STRIDE`]-th digit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantSpec {
    /// Registry name.
    pub name: String,
    /// Total digit count `D`.
    pub digits: usize,
    /// Ordered-segment digit count `o` (`0 <= o <= D`).
    pub ordered: usize,
    /// Numeral base of every unordered digit.
    pub base: u16,
    /// Rendering alphabet; glyph `k` renders digit value `k`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alphabet: Option<String>,
    /// Readability separator glyph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<char>,
    /// Digit indices before which the separator is inserted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separators: Option<Vec<usize>>,
}

/// Immutable identifier layout.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Variant {
    name: String,
    digits: usize,
    ordered: usize,
    base: u16,
    alphabet: Vec<char>,
    separator: char,
    separators: Vec<usize>,
}

fn stride_separators(digits: usize) -> Vec<usize> {
    (DEFAULT_SEPARATOR_STRIDE..digits)
        .step_by(DEFAULT_SEPARATOR_STRIDE)
        .collect()
}

fn canonical_base() -> u16 {
    // The canonical alphabet is a short literal; its length always fits.
    u16::try_from(CANONICAL_ALPHABET.chars().count()).unwrap_or(u16::MAX)
}

impl Variant {
    fn preset(name: &str, digits: usize, ordered: usize) -> Self {
        Self {
            name: name.to_owned(),
            digits,
            ordered,
            base: canonical_base(),
            alphabet: CANONICAL_ALPHABET.chars().collect(),
            separator: DEFAULT_SEPARATOR,
            separators: stride_separators(digits),
        }
    }

    /// 32-digit preset: 12 ordered digits, 20 unordered.
    pub fn narrow() -> Arc<Variant> {
        static NARROW: OnceLock<Arc<Variant>> = OnceLock::new();
        Arc::clone(NARROW.get_or_init(|| Arc::new(Self::preset("narrow", 32, 12))))
    }

    /// 40-digit preset: 16 ordered digits, 24 unordered.
    pub fn default_preset() -> Arc<Variant> {
        static DEFAULT: OnceLock<Arc<Variant>> = OnceLock::new();
        Arc::clone(DEFAULT.get_or_init(|| Arc::new(Self::preset("default", 40, 16))))
    }

    /// 64-digit preset: 24 ordered digits, 40 unordered.
    pub fn wide() -> Arc<Variant> {
        static WIDE: OnceLock<Arc<Variant>> = OnceLock::new();
        Arc::clone(WIDE.get_or_init(|| Arc::new(Self::preset("wide", 64, 24))))
    }

    /// The built-in presets, narrowest first.
    pub fn presets() -> [Arc<Variant>; 3] {
        [Self::narrow(), Self::default_preset(), Self::wide()]
    }

    /// Build a custom variant, validating every structural constraint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Invalid`] naming the first violated
    /// constraint.
    pub fn custom(spec: &VariantSpec) -> Result<Self, ConfigurationError> {
        let invalid = |reason: String| ConfigurationError::Invalid {
            variant: spec.name.clone(),
            reason,
        };

        if spec.name.trim().is_empty() {
            return Err(invalid("name must not be empty".into()));
        }
        if spec.digits == 0 {
            return Err(invalid("digit count must be positive".into()));
        }
        if spec.digits > MAX_DIGITS {
            return Err(invalid(format!(
                "digit count {} exceeds {MAX_DIGITS}",
                spec.digits
            )));
        }
        if spec.ordered > spec.digits {
            return Err(invalid(format!(
                "ordered digits ({}) exceed total digits ({})",
                spec.ordered, spec.digits
            )));
        }

        let alphabet: Vec<char> = spec
            .alphabet
            .as_deref()
            .unwrap_or(CANONICAL_ALPHABET)
            .chars()
            .collect();
        if alphabet.len() < 2 || alphabet.len() > MAX_ALPHABET_LEN {
            return Err(invalid(format!(
                "alphabet must hold between 2 and {MAX_ALPHABET_LEN} glyphs, got {}",
                alphabet.len()
            )));
        }
        for (i, ch) in alphabet.iter().enumerate() {
            if !printable(*ch) {
                return Err(invalid(format!("alphabet glyph {ch:?} is not printable")));
            }
            if alphabet[..i].contains(ch) {
                return Err(invalid(format!("alphabet repeats glyph {ch:?}")));
            }
        }

        let separator = spec.separator.unwrap_or(DEFAULT_SEPARATOR);
        if !printable(separator) {
            return Err(invalid(format!("separator {separator:?} is not printable")));
        }
        if alphabet.contains(&separator) {
            return Err(invalid(format!(
                "separator {separator:?} is also an alphabet glyph"
            )));
        }

        let unordered = spec.digits - spec.ordered;
        if unordered > 0 && spec.base < 2 {
            return Err(invalid(format!("base {} is below 2", spec.base)));
        }
        if usize::from(spec.base) > alphabet.len() {
            return Err(invalid(format!(
                "base {} exceeds alphabet size {}",
                spec.base,
                alphabet.len()
            )));
        }
        if spec.ordered > alphabet.len() {
            return Err(invalid(format!(
                "{} ordered digits cannot be rendered with {} glyphs",
                spec.ordered,
                alphabet.len()
            )));
        }

        let separators = spec
            .separators
            .clone()
            .unwrap_or_else(|| stride_separators(spec.digits));
        let mut previous = 0;
        for &position in &separators {
            if position <= previous || position >= spec.digits {
                return Err(invalid(format!(
                    "separator positions must increase strictly within 1..{}, got {position}",
                    spec.digits
                )));
            }
            previous = position;
        }

        Ok(Self {
            name: spec.name.clone(),
            digits: spec.digits,
            ordered: spec.ordered,
            base: spec.base,
            alphabet,
            separator,
            separators,
        })
    }

    /// Serializable description that rebuilds this variant via [`Variant::custom`].
    pub fn spec(&self) -> VariantSpec {
        VariantSpec {
            name: self.name.clone(),
            digits: self.digits,
            ordered: self.ordered,
            base: self.base,
            alphabet: Some(self.alphabet.iter().collect()),
            separator: Some(self.separator),
            separators: Some(self.separators.clone()),
        }
    }

    /// Registry name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Total digit count; also the raw digest length in bytes.
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Digits in the ordered (permutation) segment.
    pub fn ordered_digits(&self) -> usize {
        self.ordered
    }

    /// Digits in the unordered (residue) segment.
    pub fn unordered_digits(&self) -> usize {
        self.digits - self.ordered
    }

    /// Base of every unordered digit.
    pub fn base(&self) -> u16 {
        self.base
    }

    /// Base permitted at digit position `index`.
    ///
    /// Ordered digit `i` is a Lehmer digit with base `o - i`; the last one is
    /// always zero.
    pub fn digit_base(&self, index: usize) -> u16 {
        if index < self.ordered {
            // ordered <= alphabet len <= 256
            u16::try_from(self.ordered - index).unwrap_or(u16::MAX)
        } else {
            self.base
        }
    }

    /// Number of elements in the group: `o! * base^(D - o)`.
    pub fn order(&self) -> BigUint {
        (0..self.digits).fold(BigUint::one(), |acc, i| {
            acc * u32::from(self.digit_base(i))
        })
    }

    /// Rendering alphabet.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Glyph for digit value zero.
    pub fn zero_glyph(&self) -> char {
        self.alphabet[0]
    }

    /// Separator glyph.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Digit indices before which the separator is rendered.
    pub fn separator_positions(&self) -> &[usize] {
        &self.separators
    }

    /// Character count of a rendered identifier, separators included.
    pub fn rendered_len(&self) -> usize {
        self.digits + self.separators.len()
    }

    pub(crate) fn glyph_value(&self, ch: char) -> Option<u16> {
        self.alphabet
            .iter()
            .position(|&c| c == ch)
            .and_then(|i| u16::try_from(i).ok())
    }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variant")
            .field("name", &self.name)
            .field("digits", &self.digits)
            .field("ordered", &self.ordered)
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn spec(name: &str, digits: usize, ordered: usize, base: u16) -> VariantSpec {
        VariantSpec {
            name: name.into(),
            digits,
            ordered,
            base,
            alphabet: None,
            separator: None,
            separators: None,
        }
    }

    #[test]
    fn canonical_alphabet_has_no_lookalikes() {
        let glyphs: Vec<char> = CANONICAL_ALPHABET.chars().collect();
        assert_eq!(glyphs.len(), 59);
        for banned in ['l', 'I', 'O'] {
            assert!(!glyphs.contains(&banned), "{banned} must be excluded");
        }
        assert_eq!(glyphs[0], '0');
    }

    #[test]
    fn preset_layouts() {
        let cases = [
            (Variant::narrow(), 32, 12, 35),
            (Variant::default_preset(), 40, 16, 44),
            (Variant::wide(), 64, 24, 71),
        ];
        for (v, digits, ordered, rendered) in cases {
            assert_eq!(v.digits(), digits);
            assert_eq!(v.ordered_digits(), ordered);
            assert_eq!(v.unordered_digits(), digits - ordered);
            assert_eq!(v.base(), 59);
            assert_eq!(v.rendered_len(), rendered);
        }
    }

    #[test]
    fn presets_are_shared() {
        assert!(Arc::ptr_eq(&Variant::wide(), &Variant::wide()));
    }

    #[test]
    fn group_order_counts_every_element() {
        let v = Variant::custom(&spec("tiny", 6, 3, 5)).unwrap();
        // 3! * 5^3
        assert_eq!(v.order(), BigUint::from(750u32));
        let expected = (1..=16u32).fold(BigUint::one(), |acc, k| acc * k)
            * BigUint::from(59u32).pow(24);
        assert_eq!(Variant::default_preset().order(), expected);
    }

    #[test]
    fn digit_bases_follow_lehmer_layout() {
        let v = Variant::narrow();
        assert_eq!(v.digit_base(0), 12);
        assert_eq!(v.digit_base(11), 1);
        assert_eq!(v.digit_base(12), 59);
        assert_eq!(v.digit_base(31), 59);
    }

    #[test]
    fn custom_round_trips_through_spec() {
        let v = Variant::custom(&spec("tiny", 10, 4, 16)).unwrap();
        assert_eq!(v.separator_positions(), &[8]);
        assert_eq!(Variant::custom(&v.spec()).unwrap(), v);
    }

    #[test]
    fn custom_rejects_bad_layouts() {
        let bad = [
            spec("", 8, 2, 16),
            spec("zero", 0, 0, 16),
            spec("over", 4, 5, 16),
            spec("base", 8, 2, 1),
            spec("wide-base", 8, 2, 60),
            spec("too-many-ordered", 80, 60, 16),
        ];
        for s in bad {
            assert!(
                matches!(Variant::custom(&s), Err(ConfigurationError::Invalid { .. })),
                "{s:?} should be rejected"
            );
        }
    }

    #[test]
    fn custom_rejects_bad_glyphs() {
        let mut repeated = spec("rep", 4, 0, 2);
        repeated.alphabet = Some("aab".into());
        assert!(Variant::custom(&repeated).is_err());

        let mut clash = spec("clash", 4, 0, 2);
        clash.alphabet = Some("ab-".into());
        assert!(Variant::custom(&clash).is_err());

        let mut unordered_seps = spec("seps", 8, 0, 16);
        unordered_seps.separators = Some(vec![4, 2]);
        assert!(Variant::custom(&unordered_seps).is_err());

        let mut edge_sep = spec("edge", 8, 0, 16);
        edge_sep.separators = Some(vec![0]);
        assert!(Variant::custom(&edge_sep).is_err());

        for glyphs in ["\u{0}\n", "a b", "ab\t"] {
            let mut unprintable = spec("ctl", 4, 0, 2);
            unprintable.alphabet = Some(glyphs.into());
            assert!(
                matches!(
                    Variant::custom(&unprintable),
                    Err(ConfigurationError::Invalid { .. })
                ),
                "{glyphs:?} should be rejected"
            );
        }

        for sep in [' ', '\n', '\u{7f}'] {
            let mut blank_sep = spec("blank", 8, 0, 16);
            blank_sep.separator = Some(sep);
            assert!(Variant::custom(&blank_sep).is_err(), "{sep:?} should be rejected");
        }
    }

    #[test]
    fn digit_count_is_capped() {
        let mut huge = spec("huge", usize::MAX, 0, 16);
        huge.separators = Some(Vec::new());
        assert!(matches!(
            Variant::custom(&huge),
            Err(ConfigurationError::Invalid { .. })
        ));
        assert!(Variant::custom(&spec("over", MAX_DIGITS + 1, 0, 16)).is_err());

        let largest = Variant::custom(&spec("largest", MAX_DIGITS, 8, 59)).unwrap();
        assert_eq!(largest.digits(), MAX_DIGITS);
        assert_eq!(largest.separator_positions().len(), MAX_DIGITS / 8 - 1);
    }

    #[test]
    fn fully_ordered_variant_has_no_residue_base_requirement() {
        let v = Variant::custom(&spec("perm", 6, 6, 0)).unwrap();
        assert_eq!(v.unordered_digits(), 0);
    }
}
