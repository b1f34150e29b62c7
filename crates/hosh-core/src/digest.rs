// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Content digest function.
//!
//! `BLAKE3(content)` in extendable-output mode, with no domain prefix: the
//! content is the identity. Output depends only on the content bytes and the
//! requested length.

/// First `length` bytes of the BLAKE3 XOF stream for `content`.
///
/// Any prefix of a longer request equals the shorter request.
pub fn digest(content: &[u8], length: usize) -> Vec<u8> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(content);
    let mut out = vec![0u8; length];
    hasher.finalize_xof().fill(&mut out);
    out
}
