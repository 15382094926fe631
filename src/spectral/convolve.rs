//! Circular convolution by the convolution theorem.
//!
//! With the unitary transform the theorem picks up a constant:
//! `x ⊛ y = sqrt(N) · IDFT(DFT(x) · DFT(y))`. [`Convolver`] returns the
//! inverse transform of the product as is, which is what the wavelet rows
//! need; callers that want the plain circular convolution multiply by
//! `sqrt(N)`.
//!
//! The transform is circular, so a finite signal wraps around its ends.
//! Pad the analyzed range on both sides and drop the padding afterwards
//! (see [`crate::spectral::CwtFrame`]).

use alloc::vec;
use alloc::vec::Vec;

use crate::buffer::{magnitude, multiply};
use crate::common::{FftError, FourierTransform, check_len};

#[derive(Debug, Clone)]
pub struct Convolver<F: FourierTransform> {
    fft: F,
    product: Vec<f32>,
    convolution: Vec<f32>,
}

impl<F: FourierTransform> Convolver<F> {
    pub fn new(fft: F) -> Self {
        let n = fft.size();
        Self {
            fft,
            product: vec![0.0; 2 * n],
            convolution: vec![0.0; 2 * n],
        }
    }

    pub fn fft(&self) -> &F {
        &self.fft
    }

    /// `IDFT(signal_fft · kernel_fft)` as a complex buffer of `2N` floats.
    pub fn convolve_complex(
        &mut self,
        signal_fft: &[f32],
        kernel_fft: &[f32],
        output: &mut [f32],
    ) -> Result<(), FftError> {
        let len = 2 * self.fft.size();
        check_len(signal_fft, len)?;
        check_len(kernel_fft, len)?;
        check_len(output, len)?;

        multiply(signal_fft, kernel_fft, &mut self.product)?;
        self.fft.inverse(&self.product, output)
    }

    /// Magnitude of [`Self::convolve_complex`], `N` floats.
    pub fn convolve(
        &mut self,
        signal_fft: &[f32],
        kernel_fft: &[f32],
        output: &mut [f32],
    ) -> Result<(), FftError> {
        check_len(output, self.fft.size())?;
        let mut convolution = core::mem::take(&mut self.convolution);
        let done = self.convolve_complex(signal_fft, kernel_fft, &mut convolution);
        self.convolution = convolution;
        done?;
        magnitude(&self.convolution, output)
    }

    /// The complex result of the last [`Self::convolve`] call.
    pub fn convolution(&self) -> &[f32] {
        &self.convolution
    }
}

#[cfg(test)]
#[path = "convolve_tests.rs"]
mod tests;
