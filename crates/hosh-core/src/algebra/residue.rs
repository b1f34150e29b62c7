// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Carry-free residue vectors: a direct product of cyclic groups.
//!
//! Every digit is its own `Z/base`; there is no carry or borrow between
//! positions.

fn narrow(value: u16) -> u8 {
    // Callers reduce modulo a base <= 256 before narrowing.
    u8::try_from(value).unwrap_or(u8::MAX)
}

/// Per-digit `(a + b) mod base`.
pub fn add(a: &[u8], b: &[u8], base: u16) -> Vec<u8> {
    add_mixed(a, b, |_| base)
}

/// Per-digit additive inverse: `base - digit`, or `0` for a zero digit.
pub fn negate(a: &[u8], base: u16) -> Vec<u8> {
    negate_mixed(a, |_| base)
}

/// Per-digit `(a[i] + b[i]) mod base_at(i)`, for mixed-radix digit vectors.
pub fn add_mixed(a: &[u8], b: &[u8], base_at: impl Fn(usize) -> u16) -> Vec<u8> {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .enumerate()
        .map(|(i, (&x, &y))| narrow((u16::from(x) + u16::from(y)) % base_at(i)))
        .collect()
}

/// Per-digit additive inverse for mixed-radix digit vectors.
pub fn negate_mixed(a: &[u8], base_at: impl Fn(usize) -> u16) -> Vec<u8> {
    a.iter()
        .enumerate()
        .map(|(i, &x)| {
            let base = base_at(i);
            narrow(base.saturating_sub(u16::from(x)) % base)
        })
        .collect()
}
