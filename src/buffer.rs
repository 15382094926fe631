//! Elementwise operations over interleaved `(re, im)` buffers.
//!
//! A complex buffer of `N` samples is `2 * N` floats. Real-valued outputs
//! (magnitude, phase, ...) hold `N` floats. Every operation checks lengths up
//! front and returns [`FftError::SizeMismatch`] without touching the output
//! when they disagree.

use core::f64::consts::PI;

use num_complex::Complex32;

use crate::common::{FftError, check_len};
use crate::math::{acosf, exp, sin_cos, sqrt, sqrtf};

/// Views an interleaved buffer as complex samples.
pub(crate) fn as_complex(buffer: &[f32]) -> Result<&[Complex32], FftError> {
    bytemuck::try_cast_slice(buffer).map_err(|_| odd_length(buffer.len()))
}

pub(crate) fn as_complex_mut(buffer: &mut [f32]) -> Result<&mut [Complex32], FftError> {
    let len = buffer.len();
    bytemuck::try_cast_slice_mut(buffer).map_err(|_| odd_length(len))
}

fn odd_length(len: usize) -> FftError {
    // The nearest valid interleaved length.
    FftError::SizeMismatch {
        expected: len + 1,
        actual: len,
    }
}

/// Copies a real signal into the real slots of `output`, zeroing the imaginary ones.
pub fn expand(real: &[f32], output: &mut [f32]) -> Result<(), FftError> {
    check_len(output, 2 * real.len())?;
    for (pair, &x) in output.chunks_exact_mut(2).zip(real) {
        pair[0] = x;
        pair[1] = 0.0;
    }
    Ok(())
}

/// Negates every imaginary slot in place.
pub fn conjugate(buffer: &mut [f32]) {
    for im in buffer.iter_mut().skip(1).step_by(2) {
        *im = -*im;
    }
}

pub fn re(src: &[f32], output: &mut [f32]) -> Result<(), FftError> {
    let src = as_complex(src)?;
    check_len(output, src.len())?;
    for (out, z) in output.iter_mut().zip(src) {
        *out = z.re;
    }
    Ok(())
}

pub fn im(src: &[f32], output: &mut [f32]) -> Result<(), FftError> {
    let src = as_complex(src)?;
    check_len(output, src.len())?;
    for (out, z) in output.iter_mut().zip(src) {
        *out = z.im;
    }
    Ok(())
}

/// `sqrt(re² + im²)` per sample.
pub fn magnitude(src: &[f32], output: &mut [f32]) -> Result<(), FftError> {
    let src = as_complex(src)?;
    check_len(output, src.len())?;
    for (out, z) in output.iter_mut().zip(src) {
        *out = sqrtf(z.norm_sqr());
    }
    Ok(())
}

/// `re² + im²` per sample.
pub fn squared_magnitude(src: &[f32], output: &mut [f32]) -> Result<(), FftError> {
    let src = as_complex(src)?;
    check_len(output, src.len())?;
    for (out, z) in output.iter_mut().zip(src) {
        *out = z.norm_sqr();
    }
    Ok(())
}

/// `|z|²` written back as a complex buffer with zero imaginary parts.
/// `src` and `output` have the same length.
pub fn squared_magnitude_reim(src: &[f32], output: &mut [f32]) -> Result<(), FftError> {
    let src = as_complex(src)?;
    let output = as_complex_mut(output)?;
    if output.len() != src.len() {
        return Err(FftError::SizeMismatch {
            expected: 2 * src.len(),
            actual: 2 * output.len(),
        });
    }
    for (out, z) in output.iter_mut().zip(src) {
        *out = Complex32::new(z.norm_sqr(), 0.0);
    }
    Ok(())
}

/// Argument of each sample in `(-π, π]`; exactly 0 where the magnitude is 0.
pub fn phase(src: &[f32], output: &mut [f32]) -> Result<(), FftError> {
    let src = as_complex(src)?;
    check_len(output, src.len())?;
    for (out, z) in output.iter_mut().zip(src) {
        let r = sqrtf(z.norm_sqr());
        *out = if r == 0.0 {
            0.0
        } else {
            // acos is undefined past ±1, which rounding can reach.
            let a = acosf((z.re / r).clamp(-1.0, 1.0));
            if z.im < 0.0 { -a } else { a }
        };
    }
    Ok(())
}

/// Elementwise complex product `a * b`.
pub fn multiply(a: &[f32], b: &[f32], output: &mut [f32]) -> Result<(), FftError> {
    check_len(b, a.len())?;
    check_len(output, a.len())?;
    let a = as_complex(a)?;
    let b = as_complex(b)?;
    let output = as_complex_mut(output)?;
    for ((out, x), y) in output.iter_mut().zip(a).zip(b) {
        *out = x * y;
    }
    Ok(())
}

/// Multiplies sample `i` by `exp(2πi · i/N · phase)`.
///
/// By the shift theorem the transform of the result is the transform of
/// `src` moved by `-phase` bins.
pub fn shift(src: &[f32], phase: f32, output: &mut [f32]) -> Result<(), FftError> {
    check_len(output, src.len())?;
    let src = as_complex(src)?;
    let output = as_complex_mut(output)?;
    let n = src.len() as f64;
    for (i, (out, z)) in output.iter_mut().zip(src).enumerate() {
        let (sin, cos) = sin_cos(2.0 * PI * (i as f64) / n * phase as f64);
        *out = z * Complex32::new(cos as f32, sin as f32);
    }
    Ok(())
}

/// Additive mixing: `dst += factor * src`.
pub fn add_scaled(dst: &mut [f32], src: &[f32], factor: f32) -> Result<(), FftError> {
    check_len(src, dst.len())?;
    for (d, s) in dst.iter_mut().zip(src) {
        *d += factor * s;
    }
    Ok(())
}

/// Scales every slot by `1/sqrt(N)`, where `N = buffer.len() / 2`.
pub fn normalize(buffer: &mut [f32]) {
    let n = buffer.len() / 2;
    if n == 0 {
        return;
    }
    let factor = (1.0 / sqrt(n as f64)) as f32;
    for x in buffer.iter_mut() {
        *x *= factor;
    }
}

/// Fills `output` with `exp(i · freq · (k - shift))`.
pub fn exp_wave(freq: f32, shift: f32, output: &mut [f32]) -> Result<(), FftError> {
    let output = as_complex_mut(output)?;
    for (k, out) in output.iter_mut().enumerate() {
        let (sin, cos) = sin_cos(freq as f64 * (k as f64 - shift as f64));
        *out = Complex32::new(cos as f32, sin as f32);
    }
    Ok(())
}

/// Fills `output` with a real Gaussian centred at `shift` on the circle:
/// indices past `N/2` stand for negative offsets.
pub fn gaussian(sigma: f32, shift: f32, output: &mut [f32]) -> Result<(), FftError> {
    if sigma.is_nan() || sigma <= 0.0 {
        return Err(FftError::InvalidConfig("gaussian sigma must be positive"));
    }
    let output = as_complex_mut(output)?;
    let size = output.len();
    for (k, out) in output.iter_mut().enumerate() {
        let x = if k < size / 2 {
            k as f64
        } else {
            k as f64 - size as f64
        };
        let d = (x - shift as f64) / sigma as f64;
        *out = Complex32::new(exp(-0.5 * d * d) as f32, 0.0);
    }
    Ok(())
}

/// True when every imaginary slot is within `eps` of zero.
pub fn is_real(buffer: &[f32], eps: f32) -> bool {
    buffer.iter().skip(1).step_by(2).all(|im| im.abs() <= eps)
}

/// True when `X[k] == conj(X[N - k])` within `eps` for every `k`, the
/// spectrum shape of a real signal.
pub fn is_conjugate_symmetric(buffer: &[f32], eps: f32) -> bool {
    let Ok(z) = as_complex(buffer) else {
        return false;
    };
    let n = z.len();
    (1..n).all(|k| {
        let d = z[k] - z[n - k].conj();
        d.re.abs() <= eps && d.im.abs() <= eps
    })
}

/// True when a real sequence satisfies `a[k] == a[N - k]` within `eps`.
pub fn is_even(real: &[f32], eps: f32) -> bool {
    let n = real.len();
    (1..n).all(|k| (real[k] - real[n - k]).abs() <= eps)
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
