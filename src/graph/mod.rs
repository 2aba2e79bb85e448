//! Block-processing nodes.
//!
//! A node is called once per audio block by the host's scheduler. It pulls
//! blocks from its input channels through a [`BlockPool`](crate::block::BlockPool),
//! runs a `dsp` kernel over them and transmits the result.

/// Two-input crossfade mixer with optional per-sample control input.
pub mod crossfade;
/// Core trait shared by all nodes.
pub mod node;

pub use crossfade::{ControlPolicy, CrossfadeMixer, MixOutcome, MixerConfig};
pub use node::AudioNode;
