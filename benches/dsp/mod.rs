//! Benchmarks for the gain kernels.

mod kernel;

pub use kernel::bench_kernels;
