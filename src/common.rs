// src/common.rs

use thiserror::Error;

use crate::buffer::conjugate;

/// Tolerance used by the self-check predicates (`is_real`, `is_conjugate_symmetric`).
/// Production math never rounds against it.
pub const EPS: f32 = 1e-6;

#[derive(Debug, PartialEq, Clone, Copy, Error)]
pub enum FftError {
    /// Transform size is below 2 or not a power of two.
    #[error("FFT size {0} is not a power of two >= 2")]
    InvalidSize(usize),
    /// Buffer length (in `f32` slots) disagrees with the configured transform.
    #[error("buffer holds {actual} floats, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },
    /// Internal consistency check; only raised in debug builds.
    #[error("numeric check failed: {0}")]
    NumericAssertion(&'static str),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

pub(crate) fn check_len(buffer: &[f32], expected: usize) -> Result<(), FftError> {
    if buffer.len() != expected {
        return Err(FftError::SizeMismatch {
            expected,
            actual: buffer.len(),
        });
    }
    Ok(())
}

/// Largest transform whose sample buffer still fits in one allocation.
pub(crate) const MAX_SIZE: usize = isize::MAX as usize / core::mem::size_of::<num_complex::Complex32>();

pub(crate) fn check_size(n: usize) -> Result<(), FftError> {
    if n < 2 || n > MAX_SIZE || !n.is_power_of_two() {
        return Err(FftError::InvalidSize(n));
    }
    Ok(())
}

/// The unitary complex DFT capability shared by the scalar and the
/// data-parallel engines.
///
/// All buffers are interleaved `(re, im)` and hold `2 * self.size()` floats.
/// The inverse has no code path of its own: it is the forward transform
/// wrapped in two conjugations, which is exact because both directions use
/// the same `1/sqrt(N)` factor.
pub trait FourierTransform {
    /// Number of complex samples consumed and produced per call.
    fn size(&self) -> usize;

    /// Forward transform from `input` into `output`.
    fn transform(&self, input: &[f32], output: &mut [f32]) -> Result<(), FftError>;

    /// Forward transform overwriting `buffer`.
    fn transform_in_place(&self, buffer: &mut [f32]) -> Result<(), FftError>;

    /// Inverse transform: `conj(forward(conj(input)))`. `input` is left untouched.
    fn inverse(&self, input: &[f32], output: &mut [f32]) -> Result<(), FftError> {
        check_len(input, 2 * self.size())?;
        check_len(output, 2 * self.size())?;
        output.copy_from_slice(input);
        conjugate(output);
        self.transform_in_place(output)?;
        conjugate(output);
        Ok(())
    }

    fn inverse_in_place(&self, buffer: &mut [f32]) -> Result<(), FftError> {
        check_len(buffer, 2 * self.size())?;
        conjugate(buffer);
        self.transform_in_place(buffer)?;
        conjugate(buffer);
        Ok(())
    }
}

impl<T: FourierTransform + ?Sized> FourierTransform for &T {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn transform(&self, input: &[f32], output: &mut [f32]) -> Result<(), FftError> {
        (**self).transform(input, output)
    }

    fn transform_in_place(&self, buffer: &mut [f32]) -> Result<(), FftError> {
        (**self).transform_in_place(buffer)
    }
}

impl<T: FourierTransform + ?Sized> FourierTransform for alloc::boxed::Box<T> {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn transform(&self, input: &[f32], output: &mut [f32]) -> Result<(), FftError> {
        (**self).transform(input, output)
    }

    fn transform_in_place(&self, buffer: &mut [f32]) -> Result<(), FftError> {
        (**self).transform_in_place(buffer)
    }
}

impl<T: FourierTransform + ?Sized> FourierTransform for alloc::sync::Arc<T> {
    fn size(&self) -> usize {
        (**self).size()
    }

    fn transform(&self, input: &[f32], output: &mut [f32]) -> Result<(), FftError> {
        (**self).transform(input, output)
    }

    fn transform_in_place(&self, buffer: &mut [f32]) -> Result<(), FftError> {
        (**self).transform_in_place(buffer)
    }
}
