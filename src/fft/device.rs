//! The device seam for the data-parallel engine.
//!
//! A device only has to allocate two-channel `(re, im)` grids and evaluate a
//! per-element kernel over a whole output grid. Each kernel invocation is a
//! pure function of reads from grids it captured, so a device is free to run
//! invocations in any order or all at once (shader invocations, SIMD lanes,
//! a thread pool). Passes themselves are issued strictly one after another.

use alloc::vec;
use alloc::vec::Vec;

use num_complex::Complex32;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::buffer::as_complex;
use crate::common::{FftError, check_len};

/// A `width × height` buffer of complex samples stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    data: Vec<Complex32>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![Complex32::default(); width * height],
        }
    }

    /// Uploads an interleaved `(re, im)` buffer of `2 * width * height` floats.
    pub fn from_interleaved(width: usize, height: usize, src: &[f32]) -> Result<Self, FftError> {
        check_len(src, 2 * width * height)?;
        Ok(Self {
            width,
            height,
            data: as_complex(src)?.to_vec(),
        })
    }

    /// Downloads the grid into an interleaved buffer.
    pub fn write_interleaved(&self, output: &mut [f32]) -> Result<(), FftError> {
        check_len(output, 2 * self.data.len())?;
        output.copy_from_slice(self.as_interleaved());
        Ok(())
    }

    pub fn as_interleaved(&self) -> &[f32] {
        bytemuck::cast_slice(&self.data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Complex32 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn at(&self, index: usize) -> Complex32 {
        self.data[index]
    }

    pub fn as_slice(&self) -> &[Complex32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Complex32] {
        &mut self.data
    }
}

pub trait GridDevice {
    fn allocate(&self, width: usize, height: usize) -> Grid {
        Grid::new(width, height)
    }

    /// Sets `output[i] = kernel(i)` for every element index of `output`.
    fn run<K>(&self, output: &mut Grid, kernel: K)
    where
        K: Fn(usize) -> Complex32 + Sync + Send;
}

/// Runs kernels on the CPU: on the rayon pool with the `parallel` feature,
/// in index order otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuDevice;

impl GridDevice for CpuDevice {
    fn run<K>(&self, output: &mut Grid, kernel: K)
    where
        K: Fn(usize) -> Complex32 + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        output
            .data
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, out)| *out = kernel(i));

        #[cfg(not(feature = "parallel"))]
        for (i, out) in output.data.iter_mut().enumerate() {
            *out = kernel(i);
        }
    }
}
