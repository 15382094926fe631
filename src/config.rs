//! Analysis parameters owned by the caller.
//!
//! Nothing in the transforms reads this directly; it gathers the knobs a
//! front end passes into them and the unit conversions between bins,
//! periods and Hz.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::common::{FftError, check_size};
use crate::spectral::wavelet::wavelet_padding;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct AnalysisConfig {
    /// Transform size, a power of two.
    pub fft_size: usize,
    /// Samples per second of the analyzed audio.
    pub sample_rate: f32,
    /// Wavelet width in periods of its center frequency (the Q factor).
    pub num_periods: f32,
    /// Sub-bin shifts per bin for shift stacking; 1 disables it.
    pub num_shifts: usize,
    /// Bispectrum lag-window width in bins; `None` disables smoothing.
    pub smoothing_sigma: Option<f32>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fft_size: 4096,
            sample_rate: 44_100.0,
            num_periods: 30.0,
            num_shifts: 1,
            smoothing_sigma: None,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), FftError> {
        check_size(self.fft_size)?;
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(FftError::InvalidConfig("sample rate must be positive"));
        }
        if !(self.num_periods.is_finite() && self.num_periods > 0.0) {
            return Err(FftError::InvalidConfig("wavelet periods must be positive"));
        }
        if self.num_shifts == 0 {
            return Err(FftError::InvalidConfig("at least one shift is required"));
        }
        if let Some(sigma) = self.smoothing_sigma {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(FftError::InvalidConfig("smoothing sigma must be positive"));
            }
        }
        Ok(())
    }

    /// Center frequency of bin `k` in Hz.
    pub fn bin_to_hz(&self, k: f32) -> f32 {
        k * self.sample_rate / self.fft_size as f32
    }

    pub fn hz_to_bin(&self, hz: f32) -> f32 {
        hz * self.fft_size as f32 / self.sample_rate
    }

    /// Length of one period of `hz`, in samples.
    pub fn period_in_samples(&self, hz: f32) -> f32 {
        self.sample_rate / hz
    }

    /// Samples of padding needed on each side of a CWT frame whose longest
    /// analyzed period is `max_period` samples.
    pub fn wavelet_padding(&self, max_period: f32) -> Result<usize, FftError> {
        wavelet_padding(max_period, self.num_periods)
    }

    /// Defaults overlaid with `SPECTRAL_*` environment variables, validated.
    #[cfg(feature = "std")]
    pub fn from_env() -> Result<Self, FftError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    #[cfg(feature = "std")]
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FftError> {
        fn parse<T: core::str::FromStr>(
            value: Option<String>,
            what: &'static str,
        ) -> Result<Option<T>, FftError> {
            value
                .map(|v| v.trim().parse().map_err(|_| FftError::InvalidConfig(what)))
                .transpose()
        }

        let mut config = Self::default();
        if let Some(v) = parse(lookup("SPECTRAL_FFT_SIZE"), "SPECTRAL_FFT_SIZE is not an integer")? {
            config.fft_size = v;
        }
        if let Some(v) = parse(lookup("SPECTRAL_SAMPLE_RATE"), "SPECTRAL_SAMPLE_RATE is not a number")? {
            config.sample_rate = v;
        }
        if let Some(v) = parse(lookup("SPECTRAL_NUM_PERIODS"), "SPECTRAL_NUM_PERIODS is not a number")? {
            config.num_periods = v;
        }
        if let Some(v) = parse(lookup("SPECTRAL_NUM_SHIFTS"), "SPECTRAL_NUM_SHIFTS is not an integer")? {
            config.num_shifts = v;
        }
        if let Some(v) = lookup("SPECTRAL_SMOOTHING_SIGMA") {
            config.smoothing_sigma = if v.trim() == "off" {
                None
            } else {
                parse(Some(v), "SPECTRAL_SMOOTHING_SIGMA is not a number")?
            };
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
