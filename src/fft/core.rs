// src/fft/core.rs

use alloc::vec::Vec;
use core::f64::consts::PI;

use num_complex::Complex32;

use crate::math::{sin_cos, sqrt};

/// Computes the `N` unit roots `exp(2πik/N)`, `k` in `[0, N)`.
///
/// The forward transform multiplies by their conjugates. Angles are
/// evaluated in `f64` so large sizes do not accumulate phase error.
pub(crate) fn unit_roots(n: usize) -> Vec<Complex32> {
    (0..n)
        .map(|k| {
            let (sin, cos) = sin_cos(2.0 * PI * (k as f64) / (n as f64));
            Complex32::new(cos as f32, sin as f32)
        })
        .collect()
}

/// `1/sqrt(N)`, the unitary normalization factor.
pub(crate) fn unitary_scale(n: usize) -> f32 {
    (1.0 / sqrt(n as f64)) as f32
}

/// Radix-2 decimation-in-time butterflies over an already bit-reversed buffer.
/// Stage `s` reads only values stage `s/2` wrote, so stages run strictly in order.
pub(crate) fn radix_2_dit_butterflies(buffer: &mut [Complex32], roots: &[Complex32]) {
    let n = buffer.len();
    let mut s = 2;

    while s <= n {
        let half = s >> 1;
        let step = n / s;

        for k in 0..half {
            // exp(-2πi/s)^k
            let w = roots[k * step].conj();

            for j in (0..n).step_by(s) {
                let u = j + k;
                let v = u + half;

                let even = buffer[u];
                let t = buffer[v] * w;

                buffer[u] = even + t;
                buffer[v] = even - t;
            }
        }
        s <<= 1;
    }
}

/// One output element of stage `s`, computed only from its two inputs in
/// the previous stage. `read` maps a position of the 1-D sequence to the
/// previous stage's value there.
#[inline]
pub(crate) fn stage_element(
    i: usize,
    s: usize,
    n: usize,
    roots: &[Complex32],
    read: impl Fn(usize) -> Complex32,
) -> Complex32 {
    let half = s >> 1;
    let j = i / s;
    let k = i % half;

    let even = read(j * s + k);
    let odd = read(j * s + k + half);
    let t = odd * roots[n / s * k].conj();

    if i % s < half { even + t } else { even - t }
}

#[cfg(test)]
#[path = "core_tests.rs"]
mod tests;
