// src/fft/parallel.rs

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::mem;

use num_complex::Complex32;
use tracing::debug;

use super::bitrev::BitReversalTable;
use super::core::{stage_element, unit_roots, unitary_scale};
use super::device::{CpuDevice, Grid, GridDevice};
use crate::common::{FftError, FourierTransform, MAX_SIZE, check_len, check_size};

/// Which dimension of a `width × height` grid a 1-D transform runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// The whole grid is one row-major sequence of `width * height` samples.
    #[default]
    Flat,
    /// Every row is an independent transform of `width` samples.
    Rows,
    /// Every column is an independent transform of `height` samples.
    Cols,
}

/// Maps a grid element to its sequence: `(index within sequence, base, stride)`.
#[derive(Debug, Clone, Copy)]
struct Locator {
    layout: Layout,
    width: usize,
}

impl Locator {
    #[inline]
    fn locate(self, i: usize) -> (usize, usize, usize) {
        match self.layout {
            Layout::Flat => (i, 0, 1),
            Layout::Rows => (i % self.width, i - i % self.width, 1),
            Layout::Cols => (i / self.width, i % self.width, self.width),
        }
    }
}

/// Radix-2 FFT restructured as a sequence of data-parallel passes.
///
/// Every pass computes each output element independently from a bounded
/// set of reads of the previous pass's grid: one bit-reversal gather, one
/// pass per stage `s = 2, 4, ..., n`, and one normalization pass. Grids are
/// ping-ponged between passes, so no pass reads what it writes.
#[derive(Debug, Clone)]
pub struct ParallelFft<D: GridDevice = CpuDevice> {
    device: D,
    width: usize,
    height: usize,
    layout: Layout,
    bitrev: Arc<BitReversalTable>,
    roots: Vec<Complex32>,
    scale: f32,
}

impl ParallelFft<CpuDevice> {
    pub fn new(width: usize, height: usize, layout: Layout) -> Result<Self, FftError> {
        Self::with_device(CpuDevice, width, height, layout)
    }

    /// A flat transform of `n` samples laid out on a near-square grid.
    pub fn flat(n: usize) -> Result<Self, FftError> {
        check_size(n)?;
        let log2n = n.trailing_zeros();
        let width = 1 << log2n.div_ceil(2);
        let height = 1 << (log2n / 2);
        Self::new(width, height, Layout::Flat)
    }
}

impl<D: GridDevice> ParallelFft<D> {
    pub fn with_device(device: D, width: usize, height: usize, layout: Layout) -> Result<Self, FftError> {
        let n = sequence_len(width, height, layout)?;
        let bitrev = Arc::new(BitReversalTable::new(n)?);
        Self::with_table(device, width, height, layout, bitrev)
    }

    /// Reuses a shared bit-reversal table; its size must equal the sequence length.
    pub fn with_table(
        device: D,
        width: usize,
        height: usize,
        layout: Layout,
        bitrev: Arc<BitReversalTable>,
    ) -> Result<Self, FftError> {
        let n = sequence_len(width, height, layout)?;
        if bitrev.size() != n {
            return Err(FftError::InvalidSize(bitrev.size()));
        }
        debug!(width, height, ?layout, sequence = n, "building data-parallel FFT engine");
        Ok(Self {
            device,
            width,
            height,
            layout,
            bitrev,
            roots: unit_roots(n),
            scale: unitary_scale(n),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Length of each 1-D transform.
    pub fn sequence_len(&self) -> usize {
        self.roots.len()
    }

    fn check_grid(&self, grid: &Grid) -> Result<(), FftError> {
        if grid.width() != self.width || grid.height() != self.height {
            return Err(FftError::SizeMismatch {
                expected: 2 * self.width * self.height,
                actual: 2 * grid.len(),
            });
        }
        Ok(())
    }

    /// Forward unitary transform of every sequence in `input`.
    pub fn transform_grid(&self, input: &Grid) -> Result<Grid, FftError> {
        self.check_grid(input)?;

        let n = self.sequence_len();
        let locator = Locator {
            layout: self.layout,
            width: self.width,
        };
        let table = self.bitrev.as_slice();
        let roots = self.roots.as_slice();
        let scale = self.scale;

        let mut src = self.device.allocate(self.width, self.height);
        let mut dst = self.device.allocate(self.width, self.height);

        self.device.run(&mut src, |i| {
            let (j, base, stride) = locator.locate(i);
            input.at(base + table[j] * stride)
        });

        let mut s = 2;
        while s <= n {
            let prev = &src;
            self.device.run(&mut dst, |i| {
                let (j, base, stride) = locator.locate(i);
                stage_element(j, s, n, roots, |p| prev.at(base + p * stride))
            });
            mem::swap(&mut src, &mut dst);
            s <<= 1;
        }

        let prev = &src;
        self.device.run(&mut dst, |i| prev.at(i).scale(scale));
        Ok(dst)
    }

    /// Inverse transform: conjugate, forward, conjugate, each as its own pass.
    pub fn inverse_grid(&self, input: &Grid) -> Result<Grid, FftError> {
        self.check_grid(input)?;

        let mut conj = self.device.allocate(self.width, self.height);
        self.device.run(&mut conj, |i| input.at(i).conj());
        let spectrum = self.transform_grid(&conj)?;
        self.device.run(&mut conj, |i| spectrum.at(i).conj());
        Ok(conj)
    }
}

impl<D: GridDevice> FourierTransform for ParallelFft<D> {
    fn size(&self) -> usize {
        self.width * self.height
    }

    fn transform(&self, input: &[f32], output: &mut [f32]) -> Result<(), FftError> {
        check_len(output, 2 * self.size())?;
        let grid = Grid::from_interleaved(self.width, self.height, input)?;
        self.transform_grid(&grid)?.write_interleaved(output)
    }

    fn transform_in_place(&self, buffer: &mut [f32]) -> Result<(), FftError> {
        let grid = Grid::from_interleaved(self.width, self.height, buffer)?;
        self.transform_grid(&grid)?.write_interleaved(buffer)
    }
}

/// Length of each 1-D transform of a `width × height` grid, validated.
/// The whole grid must fit in one allocation too.
pub(crate) fn sequence_len(width: usize, height: usize, layout: Layout) -> Result<usize, FftError> {
    if width == 0 || height == 0 {
        return Err(FftError::InvalidSize(0));
    }
    let total = width
        .checked_mul(height)
        .ok_or(FftError::InvalidSize(usize::MAX))?;
    if total > MAX_SIZE {
        return Err(FftError::InvalidSize(total));
    }
    let n = match layout {
        Layout::Flat => total,
        Layout::Rows => width,
        Layout::Cols => height,
    };
    check_size(n)?;
    Ok(n)
}

#[cfg(test)]
#[path = "parallel_tests.rs"]
mod tests;
