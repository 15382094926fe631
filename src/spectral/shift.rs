// src/spectral/shift.rs

use alloc::vec;
use alloc::vec::Vec;

use tracing::trace;

use crate::buffer::{expand, shift};
use crate::common::{FftError, FourierTransform, check_len};
use crate::config::AnalysisConfig;
use crate::fft::ScalarFft;
use crate::math::sqrtf;

/// Repeats every sample of `input` `k` times: `output[i * k + j] = input[i]`.
pub fn stretch(input: &[f32], k: usize, output: &mut [f32]) -> Result<(), FftError> {
    if k == 0 {
        return Err(FftError::InvalidConfig("stretch factor must be positive"));
    }
    check_len(output, input.len() * k)?;
    for (chunk, &x) in output.chunks_exact_mut(k).zip(input) {
        chunk.fill(x);
    }
    Ok(())
}

/// Sub-bin spectra by the shift theorem.
///
/// Pass `s` of `S` multiplies the input by a phase ramp worth `-s/S` bins
/// and transforms it, which samples the spectrum at `k + s/S`. The passes
/// are interleaved so output index `k * S + s` holds that value.
#[derive(Debug, Clone)]
pub struct ShiftStack<F: FourierTransform> {
    fft: F,
    shifts: usize,
    shifted: Vec<f32>,
    spectrum: Vec<f32>,
    masked: Vec<f32>,
}

impl ShiftStack<ScalarFft> {
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, FftError> {
        config.validate()?;
        Self::new(ScalarFft::new(config.fft_size)?, config.num_shifts)
    }
}

impl<F: FourierTransform> ShiftStack<F> {
    pub fn new(fft: F, shifts: usize) -> Result<Self, FftError> {
        if shifts == 0 {
            return Err(FftError::InvalidConfig("at least one shift is required"));
        }
        let n = fft.size();
        Ok(Self {
            fft,
            shifts,
            shifted: vec![0.0; 2 * n],
            spectrum: vec![0.0; 2 * n],
            masked: vec![0.0; 2 * n],
        })
    }

    pub fn size(&self) -> usize {
        self.fft.size()
    }

    pub fn shifts(&self) -> usize {
        self.shifts
    }

    fn for_each_shift(
        &mut self,
        input: &[f32],
        mut emit: impl FnMut(usize, &[f32]),
    ) -> Result<(), FftError> {
        let total = self.shifts as f32;
        for s in 0..self.shifts {
            trace!(pass = s, shifts = self.shifts, "shift-stack pass");
            shift(input, -(s as f32) / total, &mut self.shifted)?;
            self.fft.transform(&self.shifted, &mut self.spectrum)?;
            emit(s, &self.spectrum);
        }
        Ok(())
    }

    /// Interleaved complex spectra: `input` is `2N` floats, `output` `2N·S`.
    pub fn transform(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), FftError> {
        let n = self.size();
        let stride = self.shifts;
        check_len(input, 2 * n)?;
        check_len(output, 2 * n * stride)?;

        self.for_each_shift(input, |s, spectrum| {
            for (k, z) in spectrum.chunks_exact(2).enumerate() {
                let j = 2 * (k * stride + s);
                output[j..j + 2].copy_from_slice(z);
            }
        })
    }

    /// Interleaved `|X|²`: `input` is `2N` floats, `output` `N·S`.
    pub fn power(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), FftError> {
        let n = self.size();
        let stride = self.shifts;
        check_len(input, 2 * n)?;
        check_len(output, n * stride)?;

        self.for_each_shift(input, |s, spectrum| {
            for (k, z) in spectrum.chunks_exact(2).enumerate() {
                output[k * stride + s] = z[0] * z[0] + z[1] * z[1];
            }
        })
    }

    /// Smoothed autocorrelation of a power spectrum: `power · mask` (both
    /// `N` reals) is shift-stacked and its magnitude written to `output`
    /// (`N·S`). The mask isolates frequency bands; all ones keeps them all.
    pub fn acf(&mut self, power: &[f32], mask: &[f32], output: &mut [f32]) -> Result<(), FftError> {
        let n = self.size();
        let stride = self.shifts;
        check_len(power, n)?;
        check_len(mask, n)?;
        check_len(output, n * stride)?;

        let mut masked = core::mem::take(&mut self.masked);
        let done = expand(power, &mut masked).and_then(|()| {
            for (z, m) in masked.chunks_exact_mut(2).zip(mask) {
                z[0] *= m;
            }
            self.for_each_shift(&masked, |s, spectrum| {
                for (k, z) in spectrum.chunks_exact(2).enumerate() {
                    output[k * stride + s] = sqrtf(z[0] * z[0] + z[1] * z[1]);
                }
            })
        });
        self.masked = masked;
        done
    }
}

#[cfg(test)]
#[path = "shift_tests.rs"]
mod tests;
