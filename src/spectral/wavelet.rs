//! Morlet wavelet analysis by fast convolution.
//!
//! The wavelet kernel is never built in the time domain: its transform has a
//! closed form (a Gaussian centred on the wavelet frequency), so one row of
//! the CWT costs one pointwise product and one inverse transform.

use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::PI;

use tracing::{debug, trace};

use super::convolve::Convolver;
use crate::buffer::{as_complex_mut, expand};
use crate::common::{FftError, FourierTransform, check_size};
use crate::fft::ScalarFft;
use crate::math::{exp, exp2, floor, log2, sqrt};

/// Frequency-domain Morlet wavelet of `size` bins for a period of `period`
/// samples, `num_periods` periods wide.
pub fn morlet_spectrum(size: usize, period: f32, num_periods: f32) -> Result<Vec<f32>, FftError> {
    check_size(size)?;
    let mut output = vec![0.0; 2 * size];
    morlet_spectrum_into(period, num_periods, &mut output)?;
    Ok(output)
}

/// Writes the kernel into `output` (`2N` floats). Bins `0..=N/2` get
/// `sqrt(m·s) · π^¼ · exp(-½ (m (s·k/N - 1))²)` with `m = 2π · num_periods`
/// and `s = period`; the rest stay zero, so the result is one-sided.
pub fn morlet_spectrum_into(period: f32, num_periods: f32, output: &mut [f32]) -> Result<(), FftError> {
    if !(period.is_finite() && period > 0.0) {
        return Err(FftError::InvalidConfig("wavelet period must be positive"));
    }
    if !(num_periods.is_finite() && num_periods > 0.0) {
        return Err(FftError::InvalidConfig("wavelet periods must be positive"));
    }
    let kernel = as_complex_mut(output)?;
    let n = kernel.len();
    check_size(n)?;

    let m = 2.0 * PI * num_periods as f64;
    let s = period as f64;
    let amplitude = sqrt(m * s) * sqrt(sqrt(PI));

    kernel.fill(Default::default());
    for (k, z) in kernel.iter_mut().enumerate().take(n / 2 + 1) {
        let d = m * (s * k as f64 / n as f64 - 1.0);
        z.re = (amplitude * exp(-0.5 * d * d)) as f32;
    }
    Ok(())
}

/// `src[min..max]` with zeros wherever the range leaves `src`.
pub fn padded_slice(src: &[f32], min: isize, max: isize) -> Vec<f32> {
    let len = max.saturating_sub(min).max(0) as usize;
    let mut res = vec![0.0; len];
    let from = min.max(0) as usize;
    let to = max.clamp(0, src.len() as isize) as usize;
    if from < to {
        let offset = (from as isize - min) as usize;
        res[offset..offset + to - from].copy_from_slice(&src[from..to]);
    }
    res
}

/// Interpolates between `x` and `y` on a log2 scale, `a` in `[0, 1]`.
pub fn log2_mix(x: f32, y: f32, a: f32) -> f32 {
    let (lx, ly) = (log2(x as f64), log2(y as f64));
    exp2(ly * a as f64 + lx * (1.0 - a as f64)) as f32
}

/// Samples of padding on each side of a frame whose longest analyzed period
/// is `max_period` samples.
pub(crate) fn wavelet_padding(max_period: f32, num_periods: f32) -> Result<usize, FftError> {
    if !(max_period.is_finite() && max_period > 0.0) {
        return Err(FftError::InvalidConfig("longest wavelet period must be positive"));
    }
    if !(num_periods.is_finite() && num_periods > 0.0) {
        return Err(FftError::InvalidConfig("wavelet periods must be positive"));
    }
    let padding = floor(max_period as f64 * num_periods as f64);
    if padding >= isize::MAX as f64 {
        return Err(FftError::InvalidSize(usize::MAX));
    }
    Ok(padding as usize)
}

/// One forward-transformed stretch of audio ready to be convolved with
/// wavelets of any period up to the one it was padded for.
#[derive(Debug, Clone)]
pub struct CwtFrame<F: FourierTransform = ScalarFft> {
    convolver: Convolver<F>,
    signal_fft: Vec<f32>,
    kernel: Vec<f32>,
    magnitude: Vec<f32>,
    padding: usize,
    view_len: usize,
    num_periods: f32,
}

impl CwtFrame<ScalarFft> {
    /// Transform size needed to analyze `len` samples with the padding for
    /// `max_period` added on both sides.
    pub fn padded_size(len: usize, max_period: f32, num_periods: f32) -> Result<usize, FftError> {
        let size = wavelet_padding(max_period, num_periods)?
            .checked_mul(2)
            .and_then(|both| both.checked_add(len))
            .and_then(usize::checked_next_power_of_two)
            .ok_or(FftError::InvalidSize(usize::MAX))?
            .max(2);
        check_size(size)?;
        Ok(size)
    }

    /// Prepares `samples[start..start + len]` with a scalar engine of the
    /// right size. `start` may be negative; missing samples read as zero.
    pub fn prepare(
        samples: &[f32],
        start: isize,
        len: usize,
        max_period: f32,
        num_periods: f32,
    ) -> Result<Self, FftError> {
        let fft = ScalarFft::new(Self::padded_size(len, max_period, num_periods)?)?;
        Self::prepare_with(fft, samples, start, len, max_period, num_periods)
    }
}

impl<F: FourierTransform> CwtFrame<F> {
    /// Same as [`CwtFrame::prepare`] on a caller-supplied engine, whose size
    /// must be [`CwtFrame::padded_size`].
    pub fn prepare_with(
        fft: F,
        samples: &[f32],
        start: isize,
        len: usize,
        max_period: f32,
        num_periods: f32,
    ) -> Result<Self, FftError> {
        let size = CwtFrame::<ScalarFft>::padded_size(len, max_period, num_periods)?;
        if fft.size() != size {
            return Err(FftError::SizeMismatch {
                expected: 2 * size,
                actual: 2 * fft.size(),
            });
        }

        let padding = wavelet_padding(max_period, num_periods)?;
        let base = start.checked_sub(padding as isize);
        let end = base.and_then(|b| b.checked_add(size as isize));
        let (Some(base), Some(end)) = (base, end) else {
            return Err(FftError::InvalidConfig("frame start out of range"));
        };
        let signal = padded_slice(samples, base, end);
        debug!(start, len, padding, size, "preparing CWT frame");

        let mut signal_fft = vec![0.0; 2 * size];
        expand(&signal, &mut signal_fft)?;
        fft.transform_in_place(&mut signal_fft)?;

        Ok(Self {
            convolver: Convolver::new(fft),
            signal_fft,
            kernel: vec![0.0; 2 * size],
            magnitude: vec![0.0; size],
            padding,
            view_len: len,
            num_periods,
        })
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    pub fn view_len(&self) -> usize {
        self.view_len
    }

    /// Forward transform of the padded frame.
    pub fn signal_fft(&self) -> &[f32] {
        &self.signal_fft
    }

    /// Convolution magnitude for one wavelet period, padding discarded:
    /// `output` holds `view_len` samples.
    pub fn row(&mut self, period: f32, output: &mut [f32]) -> Result<(), FftError> {
        if output.len() != self.view_len {
            return Err(FftError::SizeMismatch {
                expected: self.view_len,
                actual: output.len(),
            });
        }
        trace!(period, "CWT row");
        morlet_spectrum_into(period, self.num_periods, &mut self.kernel)?;
        self.convolver
            .convolve(&self.signal_fft, &self.kernel, &mut self.magnitude)?;
        output.copy_from_slice(&self.magnitude[self.padding..self.padding + self.view_len]);
        Ok(())
    }
}

#[cfg(test)]
#[path = "wavelet_tests.rs"]
mod tests;
