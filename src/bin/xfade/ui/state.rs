//! Shared state types for UI communication
//!
//! Everything crossing the thread boundary is `Copy` so the audio callback
//! never allocates.

use saavy_xfade::graph::{ControlPolicy, MixOutcome};

/// Commands sent from UI thread to audio thread
#[derive(Clone, Copy, Debug)]
pub enum ControlMessage {
    /// Move the fixed control level by this much (1.0 = all of B)
    Nudge(f32),
    /// Fixed → Sweep → Off → Fixed
    CycleControl,
    /// Start/stop feeding input A
    ToggleInputA,
    /// Start/stop feeding input B
    ToggleInputB,
    /// Switch between unclamped and clamped control handling
    ToggleClamp,
}

/// Where the control input comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlMode {
    /// Constant level set with the arrow keys
    Fixed,
    /// Slow triangle sweep from A to B and back
    Sweep,
    /// No control block; the mixer falls back to 50/50
    Off,
}

impl ControlMode {
    pub fn next(self) -> Self {
        match self {
            ControlMode::Fixed => ControlMode::Sweep,
            ControlMode::Sweep => ControlMode::Off,
            ControlMode::Off => ControlMode::Fixed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ControlMode::Fixed => "fixed",
            ControlMode::Sweep => "sweep",
            ControlMode::Off => "off",
        }
    }
}

/// Dynamic state update sent from audio thread (allocation-free, Copy)
#[derive(Clone, Copy, Debug)]
pub struct UiStateUpdate {
    /// Name of the active gain kernel
    pub kernel: &'static str,
    /// Branch taken for the last block
    pub outcome: MixOutcome,
    pub control_mode: ControlMode,
    /// Current control level, 1.0 = all of B
    pub level: f32,
    pub policy: ControlPolicy,
    pub input_a: bool,
    pub input_b: bool,
    /// Output peak since the previous update (0.0-1.0)
    pub peak: f32,
}
