//! Real-world scenario benchmarks.
//!
//! These run the mixer node the way a host does: blocks arrive on queues,
//! one update per block, output pulled and recycled.

mod mixer;

pub use mixer::bench_mixer;
