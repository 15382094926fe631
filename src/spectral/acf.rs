// src/spectral/acf.rs

use alloc::vec;
use alloc::vec::Vec;

use super::{check_tolerance, debug_check};
use crate::buffer::{expand, is_conjugate_symmetric, is_real, re, squared_magnitude, squared_magnitude_reim};
use crate::common::{FftError, FourierTransform, check_len};

/// Autocorrelation by the Wiener–Khinchin relation, reusing its scratch
/// buffers from frame to frame.
///
/// The second step is a *forward* transform of `|X|²`. That sequence is real
/// and even, so its forward and inverse transforms coincide; debug builds
/// verify both properties before relying on it.
#[derive(Debug, Clone)]
pub struct Autocorrelation<F: FourierTransform> {
    fft: F,
    spectrum: Vec<f32>,
    result: Vec<f32>,
}

impl<F: FourierTransform> Autocorrelation<F> {
    pub fn new(fft: F) -> Self {
        let n = fft.size();
        Self {
            fft,
            spectrum: vec![0.0; 2 * n],
            result: vec![0.0; 2 * n],
        }
    }

    pub fn size(&self) -> usize {
        self.fft.size()
    }

    /// Full complex result for a real, already windowed `frame` of `N`
    /// samples. The real part is the (unnormalized) autocorrelation, the
    /// imaginary part is rounding noise.
    pub fn process_complex(&mut self, frame: &[f32], output: &mut [f32]) -> Result<(), FftError> {
        let n = self.size();
        check_len(frame, n)?;
        check_len(output, 2 * n)?;

        expand(frame, &mut self.spectrum)?;
        self.fft.transform_in_place(&mut self.spectrum)?;
        squared_magnitude_reim(&self.spectrum, output)?;

        let tolerance = check_tolerance(output);
        debug_check(|| is_real(output, 0.0), "power spectrum is not real")?;
        debug_check(
            || is_conjugate_symmetric(output, tolerance),
            "power spectrum is not symmetric",
        )?;

        self.fft.transform_in_place(output)
    }

    /// Real autocorrelation of `frame` into `output` (`N` values, lag 0 first).
    pub fn process(&mut self, frame: &[f32], output: &mut [f32]) -> Result<(), FftError> {
        check_len(output, self.size())?;
        let mut result = core::mem::take(&mut self.result);
        let done = self.process_complex(frame, &mut result);
        self.result = result;
        done?;
        re(&self.result, output)
    }
}

/// One-shot autocorrelation of a real frame whose length is `fft.size()`.
pub fn autocorrelation<F: FourierTransform>(fft: F, frame: &[f32]) -> Result<Vec<f32>, FftError> {
    let mut output = vec![0.0; fft.size()];
    Autocorrelation::new(fft).process(frame, &mut output)?;
    Ok(output)
}

/// `|FFT[k]|²` of a real frame, all `N` bins.
pub fn power_spectrum<F: FourierTransform>(
    fft: &F,
    frame: &[f32],
    output: &mut [f32],
) -> Result<(), FftError> {
    let n = fft.size();
    check_len(frame, n)?;
    check_len(output, n)?;

    let mut spectrum = vec![0.0; 2 * n];
    expand(frame, &mut spectrum)?;
    fft.transform_in_place(&mut spectrum)?;
    squared_magnitude(&spectrum, output)
}

#[cfg(test)]
#[path = "acf_tests.rs"]
mod tests;
