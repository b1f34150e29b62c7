// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Group operation engine.
//!
//! An element of a variant's group is a pair `(permutation, residues)` and the
//! group is the direct product `S_o × (Z/base)^(D-o)`. Composition applies the
//! left permutation first and adds residues digit by digit; inversion inverts
//! the permutation and negates the residues.
//!
//! The raw-digest entry points ([`compose`], [`invert`], [`divide`],
//! [`identity`]) keep the boundary in bytes and validate their inputs against
//! the variant.

mod permutation;
mod residue;

pub use permutation::Permutation;

use crate::codec::{decode_element, encode_element};
use crate::discipline::{Discipline, HYBRID_BLOCK_LEN};
use crate::error::HoshError;
use crate::variant::Variant;

/// Structured group element: ordered segment as a permutation, unordered
/// segment as residues.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupElement {
    /// Ordered segment.
    pub permutation: Permutation,
    /// Unordered segment, one residue per digit.
    pub residues: Vec<u8>,
}

impl GroupElement {
    /// Neutral element for `variant`.
    pub fn identity(variant: &Variant) -> Self {
        Self {
            permutation: Permutation::identity(variant.ordered_digits()),
            residues: vec![0; variant.unordered_digits()],
        }
    }

    /// `self · other` with residues taken modulo `base`.
    pub fn compose(&self, other: &GroupElement, base: u16) -> Self {
        Self {
            permutation: self.permutation.then(&other.permutation),
            residues: residue::add(&self.residues, &other.residues, base),
        }
    }

    /// Inverse with residues taken modulo `base`.
    pub fn invert(&self, base: u16) -> Self {
        Self {
            permutation: self.permutation.inverse(),
            residues: residue::negate(&self.residues, base),
        }
    }

    /// Digit-wise sum: every digit, Lehmer digits included, is added modulo
    /// its own base. Always commutative; unrelated to [`GroupElement::compose`].
    pub fn add_digitwise(&self, other: &GroupElement, base: u16) -> Self {
        let n = self.permutation.len();
        let code = residue::add_mixed(
            &self.permutation.lehmer(),
            &other.permutation.lehmer(),
            |i| lehmer_base(n, i),
        );
        Self {
            permutation: Permutation::from_lehmer_saturating(&code),
            residues: residue::add(&self.residues, &other.residues, base),
        }
    }

    /// Inverse of [`GroupElement::add_digitwise`].
    pub fn negate_digitwise(&self, base: u16) -> Self {
        let n = self.permutation.len();
        let code = residue::negate_mixed(&self.permutation.lehmer(), |i| lehmer_base(n, i));
        Self {
            permutation: Permutation::from_lehmer_saturating(&code),
            residues: residue::negate(&self.residues, base),
        }
    }

    /// Smallest discipline subgroup containing this element.
    pub fn discipline(&self) -> Discipline {
        if self.permutation.is_identity() {
            Discipline::Unordered
        } else if self.permutation.is_block_rotation(HYBRID_BLOCK_LEN) {
            Discipline::Hybrid
        } else {
            Discipline::Ordered
        }
    }

    /// Whether this is the neutral element.
    pub fn is_identity(&self) -> bool {
        self.permutation.is_identity() && self.residues.iter().all(|&r| r == 0)
    }
}

fn lehmer_base(n: usize, index: usize) -> u16 {
    // n <= 256
    u16::try_from(n - index).unwrap_or(u16::MAX)
}

/// Raw digest of the identity element: all digits zero.
pub fn identity(variant: &Variant) -> Vec<u8> {
    vec![0; variant.digits()]
}

/// Compose two raw digests of `variant`.
///
/// # Errors
///
/// [`HoshError::Malformed`] if either digest does not fit the variant.
pub fn compose(variant: &Variant, a: &[u8], b: &[u8]) -> Result<Vec<u8>, HoshError> {
    let left = decode_element(variant, a)?;
    let right = decode_element(variant, b)?;
    Ok(encode_element(&left.compose(&right, variant.base())))
}

/// Invert a raw digest of `variant`.
///
/// # Errors
///
/// [`HoshError::Malformed`] if the digest does not fit the variant.
pub fn invert(variant: &Variant, a: &[u8]) -> Result<Vec<u8>, HoshError> {
    let element = decode_element(variant, a)?;
    Ok(encode_element(&element.invert(variant.base())))
}

/// `compose(a, invert(b))`.
///
/// # Errors
///
/// [`HoshError::Malformed`] if either digest does not fit the variant.
pub fn divide(variant: &Variant, a: &[u8], b: &[u8]) -> Result<Vec<u8>, HoshError> {
    compose(variant, a, &invert(variant, b)?)
}

/// Digit-wise sum of two raw digests of `variant`.
///
/// # Errors
///
/// [`HoshError::Malformed`] if either digest does not fit the variant.
pub fn add_digits(variant: &Variant, a: &[u8], b: &[u8]) -> Result<Vec<u8>, HoshError> {
    let left = decode_element(variant, a)?;
    let right = decode_element(variant, b)?;
    Ok(encode_element(&left.add_digitwise(&right, variant.base())))
}

/// Digit-wise negation of a raw digest of `variant`.
///
/// # Errors
///
/// [`HoshError::Malformed`] if the digest does not fit the variant.
pub fn negate_digits(variant: &Variant, a: &[u8]) -> Result<Vec<u8>, HoshError> {
    let element = decode_element(variant, a)?;
    Ok(encode_element(&element.negate_digitwise(variant.base())))
}

/// `element` composed with itself `exponent` times, by square-and-multiply.
pub fn power(element: &GroupElement, mut exponent: u64, variant: &Variant) -> GroupElement {
    let base = variant.base();
    let mut result = GroupElement::identity(variant);
    let mut square = element.clone();
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result.compose(&square, base);
        }
        exponent >>= 1;
        if exponent > 0 {
            square = square.compose(&square, base);
        }
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::codec::reduce;

    #[test]
    fn identity_digest_is_all_zero() {
        let v = Variant::default_preset();
        let id = identity(&v);
        assert_eq!(id.len(), 40);
        assert!(decode_element(&v, &id).unwrap().is_identity());
    }

    #[test]
    fn raw_compose_and_divide_cancel() {
        let v = Variant::narrow();
        let a = reduce(&v, b"left", Discipline::Ordered);
        let b = reduce(&v, b"right", Discipline::Ordered);
        let ab = compose(&v, &a, &b).unwrap();
        assert_eq!(divide(&v, &ab, &b).unwrap(), a);
        assert_eq!(compose(&v, &invert(&v, &a).unwrap(), &ab).unwrap(), b);
    }

    #[test]
    fn wrong_length_is_malformed() {
        let v = Variant::narrow();
        let err = compose(&v, &[0; 31], &[0; 32]).unwrap_err();
        assert!(matches!(err, HoshError::Malformed(_)));
        assert!(matches!(invert(&v, &[0; 33]), Err(HoshError::Malformed(_))));
    }

    #[test]
    fn digitwise_sum_of_raw_digests() {
        let v = Variant::narrow();
        let a = reduce(&v, b"left", Discipline::Ordered);
        let b = reduce(&v, b"right", Discipline::Ordered);
        let sum = add_digits(&v, &a, &b).unwrap();
        assert_eq!(sum, add_digits(&v, &b, &a).unwrap());
        for (i, &digit) in sum.iter().enumerate() {
            let base = v.digit_base(i);
            assert_eq!(u16::from(digit), (u16::from(a[i]) + u16::from(b[i])) % base);
        }
        let back = add_digits(&v, &sum, &negate_digits(&v, &b).unwrap()).unwrap();
        assert_eq!(back, a);
        assert!(matches!(negate_digits(&v, &[0; 3]), Err(HoshError::Malformed(_))));
    }

    #[test]
    fn power_matches_repeated_composition() {
        let v = Variant::narrow();
        let a = decode_element(&v, &reduce(&v, b"pow", Discipline::Ordered)).unwrap();
        let mut expected = GroupElement::identity(&v);
        for k in 0..12u64 {
            assert_eq!(power(&a, k, &v), expected, "exponent {k}");
            expected = expected.compose(&a, v.base());
        }
    }

    #[test]
    fn structural_discipline() {
        let v = Variant::default_preset();
        let of = |d| decode_element(&v, &reduce(&v, b"structure", d)).unwrap();
        assert_eq!(of(Discipline::Unordered).discipline(), Discipline::Unordered);
        // A hybrid draw with every shift zero is the identity permutation.
        assert!(of(Discipline::Hybrid).discipline() <= Discipline::Hybrid);
        assert_eq!(of(Discipline::Ordered).discipline(), Discipline::Ordered);
    }
}
