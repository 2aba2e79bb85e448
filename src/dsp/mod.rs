//! Fixed-point gain kernels used by the crossfade mixer.
//!
//! Everything here is pure integer math over sample slices: no allocation, no
//! I/O, no state. `kernel` defines the interface and picks the build's active
//! variant; `wide` and `narrow` are the two datapath implementations.

/// Portable equivalents of the DSP instructions the packed path relies on.
pub mod intrinsics;
/// `GainKernel` trait, control clamping and build-time kernel selection.
pub mod kernel;
/// Q8 single-sample kernel for narrow 32-bit multipliers.
pub mod narrow;
/// Q16 kernel processing two samples per 32-bit word.
pub mod wide;

pub use kernel::{clamp_control, ActiveKernel, GainKernel};
pub use narrow::NarrowKernel;
pub use wide::WideKernel;
