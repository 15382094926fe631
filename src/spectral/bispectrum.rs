// src/spectral/bispectrum.rs

use alloc::sync::Arc;
use alloc::vec;
use core::f64::consts::PI;

use tracing::debug;

use crate::buffer::expand;
use crate::common::{FftError, check_len};
use crate::config::AnalysisConfig;
use crate::fft::{BitReversalTable, CpuDevice, Grid, GridDevice, Layout, ParallelFft};
use crate::math::{exp, sqrtf};

/// Bispectrum `B(f1, f2) = X(f1) · X(f2) · conj(X(f1 + f2))` of a real
/// waveform and its time-domain counterpart, the triple correlation.
///
/// All three engines (the 1-D waveform transform and the row/column passes
/// over the `N × N` surface) run on the same device and share one
/// bit-reversal table.
///
/// Memory grows with `N²`. Every call allocates fresh surfaces of `N × N`
/// complex samples (8 bytes each): one for [`Bispectrum::spectrum`] and
/// [`Bispectrum::magnitude`], up to four at once for
/// [`Bispectrum::triple_correlation`]. At `N = 4096` that is 512 MiB of
/// scratch on top of the caller's output, so keep `N` to a few hundred bins
/// (512 needs 8 MiB).
#[derive(Debug, Clone)]
pub struct Bispectrum<D: GridDevice + Clone = CpuDevice> {
    size: usize,
    device: D,
    wave: ParallelFft<D>,
    rows: ParallelFft<D>,
    cols: ParallelFft<D>,
    smoothing: Option<f32>,
}

impl Bispectrum<CpuDevice> {
    pub fn new(size: usize) -> Result<Self, FftError> {
        Self::with_device(CpuDevice, size)
    }

    /// Size and smoothing taken from `config`.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, FftError> {
        config.validate()?;
        Self::new(config.fft_size)?.with_smoothing(config.smoothing_sigma)
    }
}

impl<D: GridDevice + Clone> Bispectrum<D> {
    pub fn with_device(device: D, size: usize) -> Result<Self, FftError> {
        let table = Arc::new(BitReversalTable::new(size)?);
        debug!(size, "building bispectrum engines");
        Ok(Self {
            size,
            wave: ParallelFft::with_table(device.clone(), size, 1, Layout::Rows, table.clone())?,
            rows: ParallelFft::with_table(device.clone(), size, size, Layout::Rows, table.clone())?,
            cols: ParallelFft::with_table(device.clone(), size, size, Layout::Cols, table)?,
            device,
            smoothing: None,
        })
    }

    /// Gaussian smoothing of the surface along both frequency axes, `sigma`
    /// in bins. It is applied to the triple correlation as the equivalent
    /// lag window. `None` turns it off.
    pub fn with_smoothing(mut self, sigma: Option<f32>) -> Result<Self, FftError> {
        if let Some(sigma) = sigma {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(FftError::InvalidConfig("smoothing sigma must be positive"));
            }
        }
        self.smoothing = sigma;
        Ok(self)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn smoothing(&self) -> Option<f32> {
        self.smoothing
    }

    /// The complex `N × N` bispectrum; `f1` runs along x, `f2` along y.
    pub fn spectrum(&self, waveform: &[f32]) -> Result<Grid, FftError> {
        let n = self.size;
        check_len(waveform, n)?;

        let mut signal = vec![0.0; 2 * n];
        expand(waveform, &mut signal)?;
        let x = self.wave.transform_grid(&Grid::from_interleaved(n, 1, &signal)?)?;

        let x = &x;
        let mut surface = self.device.allocate(n, n);
        self.device.run(&mut surface, |i| {
            let (f1, f2) = (i % n, i / n);
            x.at(f1) * x.at(f2) * x.at((f1 + f2) % n).conj()
        });
        Ok(surface)
    }

    /// Real triple correlation `c3(t1, t2) / sqrt(N)` written row-major into
    /// `output` (`N²` floats, `t1` along the row), where
    /// `c3(t1, t2) = Σ x[n] · x[n + t1] · x[n + t2]` with circular indices.
    ///
    /// Computed as the 2-D inverse transform of the bispectrum: a row pass
    /// then a column pass, between two conjugation passes.
    pub fn triple_correlation(&self, waveform: &[f32], output: &mut [f32]) -> Result<(), FftError> {
        let n = self.size;
        check_len(output, n * n)?;

        let surface = self.spectrum(waveform)?;
        let surface = &surface;
        let mut conj = self.device.allocate(n, n);
        self.device.run(&mut conj, |i| surface.at(i).conj());

        let rows = self.rows.transform_grid(&conj)?;
        let lags = self.cols.transform_grid(&rows)?;

        // The final conjugation leaves the real part alone.
        for (out, z) in output.iter_mut().zip(lags.as_slice()) {
            *out = z.re;
        }

        if let Some(sigma) = self.smoothing {
            let a = 2.0 * PI * sigma as f64 / n as f64;
            let lag = |t: usize| t.min(n - t) as f64;
            for (i, out) in output.iter_mut().enumerate() {
                let (d1, d2) = (lag(i % n), lag(i / n));
                *out *= exp(-0.5 * a * a * (d1 * d1 + d2 * d2)) as f32;
            }
        }
        Ok(())
    }

    /// `|B|` of the surface, row-major, `N²` floats.
    pub fn magnitude(&self, waveform: &[f32], output: &mut [f32]) -> Result<(), FftError> {
        check_len(output, self.size * self.size)?;
        let surface = self.spectrum(waveform)?;
        for (out, z) in output.iter_mut().zip(surface.as_slice()) {
            *out = sqrtf(z.norm_sqr());
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "bispectrum_tests.rs"]
mod tests;
