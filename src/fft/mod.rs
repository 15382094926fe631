pub mod bitrev;
mod core;
pub mod device;
pub mod parallel;
#[cfg(feature = "std")]
pub mod planner;
pub mod scalar;

pub use bitrev::BitReversalTable;
pub use device::{CpuDevice, Grid, GridDevice};
pub use parallel::{Layout, ParallelFft};
#[cfg(feature = "std")]
pub use planner::FftPlanner;
pub use scalar::ScalarFft;
