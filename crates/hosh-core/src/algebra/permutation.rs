// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Array-backed permutations and their Lehmer codes.
//!
//! A permutation of `n` symbols is stored as its image table: symbol `i` maps
//! to `images[i]`. Symbols are bytes, so `n <= 256`.
//!
//! The Lehmer code of a permutation is the digit sequence `d` with
//! `d[i] = |{ j > i : p[j] < p[i] }|`, so `d[i] < n - i`. It is a bijection
//! between the `n!` permutations and the mixed-radix numbers with bases
//! `n, n-1, ..., 1`, and the identity permutation is the all-zero code.

/// Permutation of a small symbol set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permutation {
    images: Vec<u8>,
}

impl Permutation {
    /// Identity permutation on `n` symbols.
    ///
    /// `n` is clamped to 256.
    pub fn identity(n: usize) -> Self {
        Self {
            images: (0..=u8::MAX).take(n).collect(),
        }
    }

    /// Build from an image table. Returns `None` unless `images` is a
    /// bijection on `0..images.len()`.
    pub fn from_images(images: Vec<u8>) -> Option<Self> {
        let n = images.len();
        if n > 256 {
            return None;
        }
        let mut seen = vec![false; n];
        for &image in &images {
            let slot = seen.get_mut(usize::from(image))?;
            if *slot {
                return None;
            }
            *slot = true;
        }
        Some(Self { images })
    }

    /// Decode a Lehmer code. Returns `None` if any `code[i] >= code.len() - i`.
    pub fn from_lehmer(code: &[u8]) -> Option<Self> {
        let n = code.len();
        let in_range = n <= 256
            && code
                .iter()
                .enumerate()
                .all(|(i, &digit)| usize::from(digit) < n - i);
        in_range.then(|| Self::from_lehmer_saturating(code))
    }

    /// Decode a Lehmer code, clamping each digit to `code.len() - i - 1`.
    ///
    /// Total over every input of at most 256 digits; agrees with
    /// [`Permutation::from_lehmer`] wherever that succeeds.
    pub fn from_lehmer_saturating(code: &[u8]) -> Self {
        let mut remaining: Vec<u8> = (0..=u8::MAX).take(code.len()).collect();
        let mut images = Vec::with_capacity(remaining.len());
        for &digit in code {
            let Some(last) = remaining.len().checked_sub(1) else {
                break;
            };
            images.push(remaining.remove(usize::from(digit).min(last)));
        }
        Self { images }
    }

    /// Lehmer code of this permutation.
    pub fn lehmer(&self) -> Vec<u8> {
        let n = self.images.len();
        (0..n)
            .map(|i| {
                let smaller = self.images[i + 1..]
                    .iter()
                    .filter(|&&later| later < self.images[i])
                    .count();
                // smaller < n - i <= 256
                u8::try_from(smaller).unwrap_or(u8::MAX)
            })
            .collect()
    }

    /// Product of rotations over consecutive blocks of `block_len` symbols.
    ///
    /// Block `j` covers symbols `[j * block_len, (j + 1) * block_len)` clipped
    /// to `n`; its symbols are cycled forward by `shifts(j) % block_size`.
    /// Rotations of disjoint blocks commute, so these permutations form an
    /// abelian subgroup.
    pub fn block_rotation(
        n: usize,
        block_len: usize,
        mut shifts: impl FnMut(usize) -> usize,
    ) -> Self {
        let mut images = Self::identity(n).images;
        if block_len == 0 {
            return Self { images };
        }
        for (block, chunk) in images.chunks_mut(block_len).enumerate() {
            let size = chunk.len();
            let shift = shifts(block) % size;
            chunk.rotate_left(shift);
        }
        Self { images }
    }

    /// Whether this permutation is a [`Permutation::block_rotation`] for
    /// `block_len`.
    pub fn is_block_rotation(&self, block_len: usize) -> bool {
        if block_len == 0 {
            return self.is_identity();
        }
        self.images
            .chunks(block_len)
            .enumerate()
            .all(|(block, chunk)| {
                let start = block * block_len;
                let size = chunk.len();
                let Some(shift) = usize::from(chunk[0]).checked_sub(start) else {
                    return false;
                };
                shift < size
                    && chunk
                        .iter()
                        .enumerate()
                        .all(|(k, &image)| usize::from(image) == start + (k + shift) % size)
            })
    }

    /// Apply `self` first, then `after`: `result[i] = after[self[i]]`.
    ///
    /// Both permutations must act on the same number of symbols.
    pub fn then(&self, after: &Permutation) -> Self {
        debug_assert_eq!(self.images.len(), after.images.len());
        Self {
            images: self
                .images
                .iter()
                .map(|&image| after.images[usize::from(image)])
                .collect(),
        }
    }

    /// Inverse permutation.
    pub fn inverse(&self) -> Self {
        let mut images = vec![0u8; self.images.len()];
        for (symbol, &image) in self.images.iter().enumerate() {
            // symbol < len <= 256
            images[usize::from(image)] = u8::try_from(symbol).unwrap_or(u8::MAX);
        }
        Self { images }
    }

    /// Whether every symbol is fixed.
    pub fn is_identity(&self) -> bool {
        self.images
            .iter()
            .enumerate()
            .all(|(symbol, &image)| usize::from(image) == symbol)
    }

    /// Number of symbols acted on.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether this is the permutation of the empty set.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Image table.
    pub fn images(&self) -> &[u8] {
        &self.images
    }
}
