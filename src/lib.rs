#![cfg_attr(not(feature = "std"), no_std)]

//! Power-of-two complex DFT engine and the spectral analyses built on it:
//! autocorrelation, bispectrum/triple correlation, Morlet wavelet analysis by
//! fast convolution, and sub-bin spectra by shift stacking.
//!
//! Signals are flat `f32` slices in interleaved `[re, im, re, im, ...]` layout,
//! so a transform of size `N` reads and writes `2 * N` floats.

extern crate alloc;

pub mod buffer;
pub mod common;
pub mod config;
pub mod fft;
pub mod spectral;
mod math;

pub use common::{EPS, FftError, FourierTransform};
pub use config::AnalysisConfig;
#[cfg(feature = "std")]
pub use fft::FftPlanner;
pub use fft::{BitReversalTable, CpuDevice, Grid, GridDevice, Layout, ParallelFft, ScalarFft};
