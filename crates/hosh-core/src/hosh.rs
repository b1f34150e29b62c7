// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The identifier facade.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Not, Sub};
use std::str::FromStr;
use std::sync::Arc;

use num_bigint::BigUint;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::algebra::{self, GroupElement};
use crate::codec::{
    decode_element, digits_from_rank, encode_element, parse_digits, rank_digits, reduce_element,
    render_digits,
};
use crate::discipline::Discipline;
use crate::error::{HoshError, MalformedIdentifier};
use crate::registry::VariantRegistry;
use crate::variant::Variant;

/// Token accepted by the parsers as a name for the identity element.
pub const IDENTITY_ALIAS: &str = "ø";

/// Operable content identifier.
///
/// Immutable: every operation returns a new value. Equality compares the raw
/// digest and the variant; the discipline tag is not part of identity, since
/// the same digest is reachable through different composition histories.
#[derive(Clone)]
pub struct Hosh {
    variant: Arc<Variant>,
    digest: Box<[u8]>,
    element: GroupElement,
    discipline: Discipline,
}

impl Hosh {
    fn from_element(variant: Arc<Variant>, element: GroupElement, discipline: Discipline) -> Self {
        let digest = encode_element(&element).into_boxed_slice();
        Self {
            variant,
            digest,
            element,
            discipline,
        }
    }

    fn from_validated(variant: &Arc<Variant>, raw: &[u8]) -> Result<Self, HoshError> {
        let element = decode_element(variant, raw)?;
        let discipline = element.discipline();
        Ok(Self {
            variant: Arc::clone(variant),
            digest: raw.into(),
            element,
            discipline,
        })
    }

    /// Ordered identifier of `content` in the `default` preset.
    pub fn from_content(content: &[u8]) -> Self {
        Self::from_content_in(&Variant::default_preset(), content, Discipline::Ordered)
    }

    /// Unordered identifier of `content` in the `default` preset.
    pub fn unordered(content: &[u8]) -> Self {
        Self::from_content_in(&Variant::default_preset(), content, Discipline::Unordered)
    }

    /// Hybrid identifier of `content` in the `default` preset.
    pub fn hybrid(content: &[u8]) -> Self {
        Self::from_content_in(&Variant::default_preset(), content, Discipline::Hybrid)
    }

    /// Identifier of `content` in `variant`, drawn from the subgroup of
    /// `discipline`.
    pub fn from_content_in(variant: &Arc<Variant>, content: &[u8], discipline: Discipline) -> Self {
        let element = reduce_element(variant, content, discipline);
        Self::from_element(Arc::clone(variant), element, discipline)
    }

    /// Identity element of `variant`.
    pub fn identity(variant: &Arc<Variant>) -> Self {
        Self::from_element(
            Arc::clone(variant),
            GroupElement::identity(variant),
            Discipline::Unordered,
        )
    }

    /// Wrap an existing raw digest. The discipline is inferred from structure.
    ///
    /// # Errors
    ///
    /// [`HoshError::Malformed`] if `raw` has the wrong length or a digit at or
    /// above its base.
    pub fn from_raw(variant: &Arc<Variant>, raw: &[u8]) -> Result<Self, HoshError> {
        Self::from_validated(variant, raw)
    }

    /// Parse a canonical string of `variant`, or [`IDENTITY_ALIAS`].
    ///
    /// # Errors
    ///
    /// [`HoshError::Malformed`] for wrong length, foreign glyphs, misplaced
    /// separators, or out-of-range digits.
    pub fn parse(variant: &Arc<Variant>, text: &str) -> Result<Self, HoshError> {
        if text == IDENTITY_ALIAS {
            return Ok(Self::identity(variant));
        }
        let raw = parse_digits(variant, text)?;
        Self::from_validated(variant, &raw)
    }

    /// Element with the given mixed-radix rank; the discipline is inferred
    /// from structure.
    ///
    /// # Errors
    ///
    /// [`MalformedIdentifier::RankTooHigh`] unless `rank < variant.order()`.
    pub fn from_rank(variant: &Arc<Variant>, rank: &BigUint) -> Result<Self, HoshError> {
        let raw = digits_from_rank(variant, rank)?;
        Self::from_validated(variant, &raw)
    }

    fn check_variant(&self, other: &Hosh) -> Result<(), HoshError> {
        if Arc::ptr_eq(&self.variant, &other.variant) || self.variant == other.variant {
            Ok(())
        } else {
            Err(HoshError::VariantMismatch {
                left: self.variant.name().to_owned(),
                right: other.variant.name().to_owned(),
            })
        }
    }

    /// `self · other`: permutation composition on the ordered segment,
    /// residue addition on the unordered one. The result carries the dominant
    /// discipline of the operands.
    ///
    /// # Errors
    ///
    /// [`HoshError::VariantMismatch`] if the operands belong to different
    /// variants.
    pub fn compose(&self, other: &Hosh) -> Result<Hosh, HoshError> {
        self.check_variant(other)?;
        let element = self.element.compose(&other.element, self.variant.base());
        Ok(Self::from_element(
            Arc::clone(&self.variant),
            element,
            self.discipline.dominant(other.discipline),
        ))
    }

    /// Inverse element; keeps the discipline.
    pub fn invert(&self) -> Hosh {
        let element = self.element.invert(self.variant.base());
        Self::from_element(Arc::clone(&self.variant), element, self.discipline)
    }

    /// `self · other⁻¹`.
    ///
    /// # Errors
    ///
    /// [`HoshError::VariantMismatch`] if the operands belong to different
    /// variants.
    pub fn divide(&self, other: &Hosh) -> Result<Hosh, HoshError> {
        self.compose(&other.invert())
    }

    /// Digit-wise sum: every digit is added modulo its own base, with no
    /// carry. Commutative for every pair of identifiers, and unrelated to
    /// [`Hosh::compose`]. The discipline is inferred from the result.
    ///
    /// # Errors
    ///
    /// [`HoshError::VariantMismatch`] if the operands belong to different
    /// variants.
    pub fn plus(&self, other: &Hosh) -> Result<Hosh, HoshError> {
        self.check_variant(other)?;
        let element = self.element.add_digitwise(&other.element, self.variant.base());
        let discipline = element.discipline();
        Ok(Self::from_element(Arc::clone(&self.variant), element, discipline))
    }

    /// Digit-wise additive inverse, so that `a.plus(&a.negated())` is the
    /// identity.
    pub fn negated(&self) -> Hosh {
        let element = self.element.negate_digitwise(self.variant.base());
        let discipline = element.discipline();
        Self::from_element(Arc::clone(&self.variant), element, discipline)
    }

    /// `self.plus(&other.negated())`.
    ///
    /// # Errors
    ///
    /// [`HoshError::VariantMismatch`] if the operands belong to different
    /// variants.
    pub fn minus(&self, other: &Hosh) -> Result<Hosh, HoshError> {
        self.plus(&other.negated())
    }

    /// `self` composed with itself `exponent` times; negative exponents use the
    /// inverse. `pow(0)` is the identity.
    pub fn pow(&self, exponent: i64) -> Hosh {
        let element = if exponent < 0 {
            self.element.invert(self.variant.base())
        } else {
            self.element.clone()
        };
        let element = algebra::power(&element, exponent.unsigned_abs(), &self.variant);
        let discipline = if exponent == 0 {
            Discipline::Unordered
        } else {
            self.discipline
        };
        Self::from_element(Arc::clone(&self.variant), element, discipline)
    }

    /// `self · from_content_in(self.variant(), content, discipline)`.
    pub fn then_content(&self, content: &[u8], discipline: Discipline) -> Hosh {
        let next = Self::from_content_in(&self.variant, content, discipline);
        let element = self.element.compose(&next.element, self.variant.base());
        Self::from_element(
            Arc::clone(&self.variant),
            element,
            self.discipline.dominant(discipline),
        )
    }

    /// Left-to-right composition of `items`, starting from the identity of
    /// `variant`. An empty input yields the identity.
    ///
    /// # Errors
    ///
    /// [`HoshError::VariantMismatch`] at the first item of another variant.
    pub fn compose_all<'a, I>(variant: &Arc<Variant>, items: I) -> Result<Hosh, HoshError>
    where
        I: IntoIterator<Item = &'a Hosh>,
    {
        items
            .into_iter()
            .try_fold(Self::identity(variant), |acc, item| acc.compose(item))
    }

    /// Mixed-radix rank among the `variant().order()` elements; the identity
    /// is 0.
    pub fn rank(&self) -> BigUint {
        rank_digits(&self.variant, &self.digest)
    }

    /// Canonical string.
    pub fn render(&self) -> String {
        render_digits(&self.variant, &self.digest)
    }

    /// Raw digest: one byte per digit, ordered digits first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.digest
    }

    /// Structured form of the digest.
    pub fn element(&self) -> &GroupElement {
        &self.element
    }

    /// Variant this identifier belongs to.
    pub fn variant(&self) -> &Arc<Variant> {
        &self.variant
    }

    /// Discipline tag.
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    /// Whether this is the identity element.
    pub fn is_identity(&self) -> bool {
        self.digest.iter().all(|&d| d == 0)
    }
}

impl PartialEq for Hosh {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest
            && (Arc::ptr_eq(&self.variant, &other.variant) || self.variant == other.variant)
    }
}

impl Eq for Hosh {}

impl Hash for Hosh {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.variant.name().hash(state);
        self.digest.hash(state);
    }
}

impl fmt::Display for Hosh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Hosh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hosh")
            .field("variant", &self.variant.name())
            .field("discipline", &self.discipline)
            .field("id", &self.render())
            .finish()
    }
}

/// Parses against the built-in presets, choosing the one whose rendered length
/// matches. [`IDENTITY_ALIAS`] parses as the `default` identity.
impl FromStr for Hosh {
    type Err = HoshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == IDENTITY_ALIAS {
            return Ok(Self::identity(&Variant::default_preset()));
        }
        let len = s.chars().count();
        let variant = VariantRegistry::builtin()
            .by_rendered_len(len)
            .ok_or(MalformedIdentifier::UnknownLength(len))?;
        Self::parse(&variant, s)
    }
}

impl Mul<&Hosh> for &Hosh {
    type Output = Result<Hosh, HoshError>;

    fn mul(self, rhs: &Hosh) -> Self::Output {
        self.compose(rhs)
    }
}

impl Mul for Hosh {
    type Output = Result<Hosh, HoshError>;

    fn mul(self, rhs: Hosh) -> Self::Output {
        self.compose(&rhs)
    }
}

impl Div<&Hosh> for &Hosh {
    type Output = Result<Hosh, HoshError>;

    fn div(self, rhs: &Hosh) -> Self::Output {
        self.divide(rhs)
    }
}

impl Div for Hosh {
    type Output = Result<Hosh, HoshError>;

    fn div(self, rhs: Hosh) -> Self::Output {
        self.divide(&rhs)
    }
}

impl Add<&Hosh> for &Hosh {
    type Output = Result<Hosh, HoshError>;

    fn add(self, rhs: &Hosh) -> Self::Output {
        self.plus(rhs)
    }
}

impl Add for Hosh {
    type Output = Result<Hosh, HoshError>;

    fn add(self, rhs: Hosh) -> Self::Output {
        self.plus(&rhs)
    }
}

impl Sub<&Hosh> for &Hosh {
    type Output = Result<Hosh, HoshError>;

    fn sub(self, rhs: &Hosh) -> Self::Output {
        self.minus(rhs)
    }
}

impl Sub for Hosh {
    type Output = Result<Hosh, HoshError>;

    fn sub(self, rhs: Hosh) -> Self::Output {
        self.minus(&rhs)
    }
}

/// Digit-wise additive inverse. The group inverse is `!`.
impl Neg for &Hosh {
    type Output = Hosh;

    fn neg(self) -> Hosh {
        self.negated()
    }
}

impl Neg for Hosh {
    type Output = Hosh;

    fn neg(self) -> Hosh {
        self.negated()
    }
}

/// Group inverse.
impl Not for &Hosh {
    type Output = Hosh;

    fn not(self) -> Hosh {
        self.invert()
    }
}

impl Not for Hosh {
    type Output = Hosh;

    fn not(self) -> Hosh {
        self.invert()
    }
}

/// Serialized form of a [`Hosh`]: variant name and canonical string.
///
/// The discipline tag is not recorded; it is inferred again on resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HoshRecord {
    /// Registry name of the variant.
    pub variant: String,
    /// Canonical string.
    pub id: String,
}

impl HoshRecord {
    /// Rebuild the identifier against `registry`.
    ///
    /// # Errors
    ///
    /// [`HoshError::Configuration`] if the variant is not registered,
    /// [`HoshError::Malformed`] if `id` does not parse in it.
    pub fn resolve(&self, registry: &VariantRegistry) -> Result<Hosh, HoshError> {
        let variant = registry.get(&self.variant)?;
        Hosh::parse(&variant, &self.id)
    }
}

impl From<&Hosh> for HoshRecord {
    fn from(hosh: &Hosh) -> Self {
        Self {
            variant: hosh.variant.name().to_owned(),
            id: hosh.render(),
        }
    }
}

impl Serialize for Hosh {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        HoshRecord::from(self).serialize(serializer)
    }
}

/// Resolves against [`VariantRegistry::builtin`]. Identifiers of custom
/// variants deserialize as a [`HoshRecord`] and go through
/// [`HoshRecord::resolve`].
impl<'de> Deserialize<'de> for Hosh {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        HoshRecord::deserialize(deserializer)?
            .resolve(VariantRegistry::builtin())
            .map_err(de::Error::custom)
    }
}
