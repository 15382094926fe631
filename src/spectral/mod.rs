//! Analyses derived from the forward transform.

pub mod acf;
pub mod bispectrum;
pub mod convolve;
pub mod frame;
pub mod shift;
pub mod wavelet;

pub use acf::{Autocorrelation, autocorrelation, power_spectrum};
pub use bispectrum::Bispectrum;
pub use convolve::Convolver;
pub use frame::SpectralFrame;
pub use shift::{ShiftStack, stretch};
pub use wavelet::{CwtFrame, log2_mix, morlet_spectrum, morlet_spectrum_into, padded_slice};

use crate::common::{EPS, FftError};
use crate::math::sqrt;

/// Runs `check` only in debug builds and turns a failure into
/// [`FftError::NumericAssertion`].
pub(crate) fn debug_check(check: impl FnOnce() -> bool, what: &'static str) -> Result<(), FftError> {
    if cfg!(debug_assertions) && !check() {
        return Err(FftError::NumericAssertion(what));
    }
    Ok(())
}

/// `EPS` scaled to the data: float32 rounding grows with the peak value and
/// with the transform length.
pub(crate) fn check_tolerance(buffer: &[f32]) -> f32 {
    let peak = buffer.iter().fold(1.0f32, |m, x| m.max(x.abs()));
    EPS * peak * sqrt((buffer.len() / 2).max(1) as f64) as f32
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
