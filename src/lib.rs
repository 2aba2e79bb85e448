//! Fixed-point crossfade mixer for 16-bit audio blocks.
//!
//! `dsp` holds the gain-application kernels (pure integer math), `block` the
//! buffer ownership contract, and `graph` the mixer node that ties them
//! together once per audio block.

pub mod block;
pub mod dsp;
pub mod graph;

/// Number of 16-bit samples per audio block.
pub const AUDIO_BLOCK_SAMPLES: usize = 128;

/// Nominal sample rate in Hz.
pub const AUDIO_SAMPLE_RATE: u32 = 44_100;

/// One block of mono PCM audio.
pub type AudioBlock = [i16; AUDIO_BLOCK_SAMPLES];
