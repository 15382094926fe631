// src/fft/scalar.rs

use alloc::sync::Arc;
use alloc::vec::Vec;

use num_complex::Complex32;
use tracing::debug;

use super::bitrev::BitReversalTable;
use super::core::{radix_2_dit_butterflies, unit_roots, unitary_scale};
use crate::buffer::{as_complex, as_complex_mut};
use crate::common::{FftError, FourierTransform, check_len};

/// Sequential iterative radix-2 engine bound to one transform size.
///
/// Owns its unit-root table; the bit-reversal table is shared with every
/// other engine of the same size.
#[derive(Debug, Clone)]
pub struct ScalarFft {
    bitrev: Arc<BitReversalTable>,
    roots: Vec<Complex32>,
    scale: f32,
}

impl ScalarFft {
    /// Builds an engine with a private bit-reversal table.
    /// Fails with [`FftError::InvalidSize`] unless `n` is a power of two >= 2.
    pub fn new(n: usize) -> Result<Self, FftError> {
        let bitrev = BitReversalTable::new(n)?;
        Ok(Self::with_table(Arc::new(bitrev)))
    }

    /// Builds an engine around an existing (shared) bit-reversal table.
    pub fn with_table(bitrev: Arc<BitReversalTable>) -> Self {
        let n = bitrev.size();
        debug!(size = n, "building scalar FFT engine");
        Self {
            bitrev,
            roots: unit_roots(n),
            scale: unitary_scale(n),
        }
    }

    pub fn bit_reversal(&self) -> &Arc<BitReversalTable> {
        &self.bitrev
    }

    fn finish(&self, buffer: &mut [Complex32]) {
        radix_2_dit_butterflies(buffer, &self.roots);
        for z in buffer.iter_mut() {
            *z = z.scale(self.scale);
        }
    }
}

impl FourierTransform for ScalarFft {
    fn size(&self) -> usize {
        self.roots.len()
    }

    fn transform(&self, input: &[f32], output: &mut [f32]) -> Result<(), FftError> {
        check_len(input, 2 * self.size())?;
        check_len(output, 2 * self.size())?;

        let src = as_complex(input)?;
        let dst = as_complex_mut(output)?;
        self.bitrev.permute_into(src, dst);
        self.finish(dst);
        Ok(())
    }

    fn transform_in_place(&self, buffer: &mut [f32]) -> Result<(), FftError> {
        check_len(buffer, 2 * self.size())?;

        let data = as_complex_mut(buffer)?;
        self.bitrev.permute_in_place(data);
        self.finish(data);
        Ok(())
    }
}

#[cfg(test)]
#[path = "scalar_tests.rs"]
mod tests;
