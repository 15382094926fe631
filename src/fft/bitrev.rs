// src/fft/bitrev.rs

use alloc::vec;
use alloc::vec::Vec;

use num_complex::Complex32;

use crate::common::{FftError, check_size};

/// Bit-reversal permutation of `[0, N)`: `table[k]` is `k` with its
/// `log2(N)` low bits reversed. Immutable once built and a pure function of
/// `N`, so one table is shared by every engine of that size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitReversalTable {
    table: Vec<usize>,
}

impl BitReversalTable {
    pub fn new(n: usize) -> Result<Self, FftError> {
        check_size(n)?;
        let mut table = vec![0; n];
        precompute_bitrev(&mut table, n);
        Ok(Self { table })
    }

    pub fn size(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn get(&self, k: usize) -> usize {
        self.table[k]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.table
    }

    /// Scatters `src` into `dst` in bit-reversed order. Both hold `N` samples.
    pub(crate) fn permute_into(&self, src: &[Complex32], dst: &mut [Complex32]) {
        for (&r, &z) in self.table.iter().zip(src) {
            dst[r] = z;
        }
    }

    /// Same permutation by pairwise swaps; valid because it is an involution.
    pub(crate) fn permute_in_place(&self, buffer: &mut [Complex32]) {
        for (i, &j) in self.table.iter().enumerate() {
            if i < j {
                buffer.swap(i, j);
            }
        }
    }
}

/// Fills the bit-reversal table incrementally: each index is obtained from
/// the previous one by a reversed-order binary increment.
fn precompute_bitrev(bitrev: &mut [usize], n: usize) {
    bitrev[0] = 0;
    let mut j = 0;
    for slot in bitrev.iter_mut().take(n).skip(1) {
        let mut k = n >> 1;
        while j >= k {
            j -= k;
            k >>= 1;
        }
        j += k;
        *slot = j;
    }
}

#[cfg(test)]
#[path = "bitrev_tests.rs"]
mod tests;
