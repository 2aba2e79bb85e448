use std::marker::PhantomData;

use crate::{
    block::{BlockPool, ReadOnlyBlock, WritableBlock},
    dsp::{clamp_control, ActiveKernel, GainKernel},
    graph::node::AudioNode,
    AudioBlock, AUDIO_BLOCK_SAMPLES,
};

/*
Crossfade Mixer
===============

Blends input A and input B into one output. A third input carries a control
signal that sets the mix ratio per sample.

Inputs:
  0  A        received writable; mixed in place and becomes the output
  1  B        received read-only
  2  control  received read-only, one gain per sample

Each block is a fresh decision on which inputs delivered something:

  A   B   control   result
  ─   ─   ───────   ──────────────────────────────────────────────
  no  *   *         nothing transmitted (silence by omission)
  yes no  *         A forwarded unchanged
  yes yes no        A = 0.5 × A + 0.5 × B
  yes yes yes       A = (1 - g) × A + g × B, g from control

B and control are released once the block is mixed; A moves downstream. The
control input is only looked at when B is present, so a control block that
arrives without B stays queued for a later block.

Handles release themselves when dropped, so an early return can never leak a
block and no branch can release one twice.

Control scale depends on the kernel (see `dsp::kernel`): Q15 on the wide
datapath, Q8 on the narrow one. By default control values are used exactly as
received, out-of-range values included. `ControlPolicy::Clamped` limits them
to [0, unity] first.
*/

/// Input channel mixed in place and transmitted.
pub const INPUT_A: usize = 0;
/// Input channel blended into A.
pub const INPUT_B: usize = 1;
/// Per-sample mix control.
pub const INPUT_CONTROL: usize = 2;
/// The only output channel.
pub const OUTPUT: usize = 0;

/// What to do with control samples outside `[0, unity]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlPolicy {
    /// Use control samples as received; the sum saturates.
    #[default]
    Unclamped,
    /// Limit control samples to `[0, unity]` before mixing.
    Clamped,
}

/// Configuration for a [`CrossfadeMixer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MixerConfig {
    pub control_policy: ControlPolicy,
}

/// Which branch the mixer took for the last block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MixOutcome {
    /// Input A was absent; nothing was transmitted.
    #[default]
    Silent,
    /// Input B was absent; A was forwarded unchanged.
    PassThrough,
    /// No control block; A and B mixed 50/50.
    ConstantMix,
    /// A and B crossfaded by the control block.
    Crossfade,
}

impl MixOutcome {
    /// Whether a block was transmitted.
    pub fn produced_output(self) -> bool {
        !matches!(self, MixOutcome::Silent)
    }
}

/// Three-input crossfade node using kernel `K`.
pub struct CrossfadeMixer<K: GainKernel = ActiveKernel> {
    config: MixerConfig,
    last_outcome: MixOutcome,
    scratch: AudioBlock,
    _kernel: PhantomData<K>,
}

impl<K: GainKernel> CrossfadeMixer<K> {
    pub fn new() -> Self {
        Self::with_config(MixerConfig::default())
    }

    pub fn with_config(config: MixerConfig) -> Self {
        CrossfadeMixer {
            config,
            last_outcome: MixOutcome::default(),
            scratch: [0; AUDIO_BLOCK_SAMPLES],
            _kernel: PhantomData,
        }
    }

    pub fn config(&self) -> MixerConfig {
        self.config
    }

    pub fn set_control_policy(&mut self, policy: ControlPolicy) {
        self.config.control_policy = policy;
    }

    /// Branch taken by the most recent block.
    pub fn last_outcome(&self) -> MixOutcome {
        self.last_outcome
    }

    /// Name of the kernel this mixer runs.
    pub fn kernel_name(&self) -> &'static str {
        K::NAME
    }

    /// Run one block against `pool` and report the branch taken.
    pub fn process<P: BlockPool>(&mut self, pool: &P) -> MixOutcome {
        let outcome = self.mix_block(pool);
        self.last_outcome = outcome;
        outcome
    }

    fn mix_block<P: BlockPool>(&mut self, pool: &P) -> MixOutcome {
        let Some(mut out) = WritableBlock::receive(pool, INPUT_A) else {
            return MixOutcome::Silent;
        };

        let outcome = match ReadOnlyBlock::receive(pool, INPUT_B) {
            None => MixOutcome::PassThrough,
            Some(b) => match ReadOnlyBlock::receive(pool, INPUT_CONTROL) {
                Some(ctrl) => {
                    self.crossfade(&mut out, &b, &ctrl);
                    MixOutcome::Crossfade
                }
                None => {
                    K::apply_gain_const(&mut out[..], &b[..]);
                    MixOutcome::ConstantMix
                }
            },
        };

        out.transmit(OUTPUT);
        outcome
    }

    fn crossfade(&mut self, out: &mut AudioBlock, b: &AudioBlock, ctrl: &AudioBlock) {
        match self.config.control_policy {
            ControlPolicy::Unclamped => K::apply_gain_xf(out, b, ctrl),
            ControlPolicy::Clamped => {
                clamp_control::<K>(ctrl, &mut self.scratch);
                K::apply_gain_xf(out, b, &self.scratch);
            }
        }
    }
}

impl<K: GainKernel> Default for CrossfadeMixer<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: GainKernel, P: BlockPool> AudioNode<P> for CrossfadeMixer<K> {
    const NUM_INPUTS: usize = 3;
    const NUM_OUTPUTS: usize = 1;

    fn update(&mut self, pool: &P) {
        self.process(pool);
    }
}
