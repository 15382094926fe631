// src/fft/planner.rs

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::bitrev::BitReversalTable;
use super::device::GridDevice;
use super::parallel::{Layout, ParallelFft, sequence_len};
use super::scalar::ScalarFft;
use crate::common::FftError;

/// Explicit cache of per-size transform resources.
///
/// Holds one bit-reversal table and one scalar engine per size, built lazily
/// on first request and kept for the planner's lifetime. Lookups take a read
/// lock; a miss builds outside the lock and inserts with `or_insert`, so two
/// threads racing on the same size may both build, but both get the single
/// stored value.
#[derive(Debug, Default)]
pub struct FftPlanner {
    tables: RwLock<BTreeMap<usize, Arc<BitReversalTable>>>,
    engines: RwLock<BTreeMap<usize, Arc<ScalarFft>>>,
}

impl FftPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared bit-reversal table for `n`.
    pub fn bit_reversal(&self, n: usize) -> Result<Arc<BitReversalTable>, FftError> {
        let cached = self
            .tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&n)
            .cloned();
        if let Some(table) = cached {
            return Ok(table);
        }

        let built = Arc::new(BitReversalTable::new(n)?);
        debug!(size = n, "bit-reversal table cache miss");
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        Ok(tables.entry(n).or_insert(built).clone())
    }

    /// The shared scalar engine for `n`.
    pub fn scalar(&self, n: usize) -> Result<Arc<ScalarFft>, FftError> {
        let cached = self
            .engines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&n)
            .cloned();
        if let Some(engine) = cached {
            return Ok(engine);
        }

        let built = Arc::new(ScalarFft::with_table(self.bit_reversal(n)?));
        debug!(size = n, "scalar engine cache miss");
        let mut engines = self.engines.write().unwrap_or_else(PoisonError::into_inner);
        Ok(engines.entry(n).or_insert(built).clone())
    }

    /// A data-parallel engine on `device` that shares this planner's table.
    pub fn parallel<D: GridDevice>(
        &self,
        device: D,
        width: usize,
        height: usize,
        layout: Layout,
    ) -> Result<ParallelFft<D>, FftError> {
        let n = sequence_len(width, height, layout)?;
        ParallelFft::with_table(device, width, height, layout, self.bit_reversal(n)?)
    }

    /// Number of distinct sizes with a cached table.
    pub fn cached_sizes(&self) -> usize {
        self.tables.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
