use alloc::vec;
use alloc::vec::Vec;

use crate::buffer::{magnitude, phase, squared_magnitude};
use crate::common::{FftError, check_len, check_size};

/// The per-frame real sequences handed to a renderer.
///
/// Only the first `N/2` bins are kept: for a real input the upper half is
/// the mirror image of the lower one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpectralFrame {
    pub power: Vec<f32>,
    pub magnitude: Vec<f32>,
    pub phase: Vec<f32>,
}

impl SpectralFrame {
    /// Splits a `2N`-float spectrum of a real signal into its halves.
    pub fn from_spectrum(spectrum: &[f32]) -> Result<Self, FftError> {
        let n = spectrum.len() / 2;
        check_size(n)?;
        check_len(spectrum, 2 * n)?;
        let lower = &spectrum[..n];
        let half = n / 2;

        let mut frame = Self {
            power: vec![0.0; half],
            magnitude: vec![0.0; half],
            phase: vec![0.0; half],
        };
        squared_magnitude(lower, &mut frame.power)?;
        magnitude(lower, &mut frame.magnitude)?;
        phase(lower, &mut frame.phase)?;
        Ok(frame)
    }

    pub fn len(&self) -> usize {
        self.power.len()
    }

    pub fn is_empty(&self) -> bool {
        self.power.is_empty()
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
