//! Audio-thread side: tone generators feeding the mixer through a RingPool

use std::f32::consts::TAU;

use saavy_xfade::{
    block::ring::{BoxedBlock, RingPool, RingPorts},
    dsp::{ActiveKernel, GainKernel},
    graph::{
        crossfade::{INPUT_A, INPUT_B, INPUT_CONTROL},
        ControlPolicy, CrossfadeMixer, MixOutcome,
    },
    AudioBlock, AUDIO_BLOCK_SAMPLES,
};

use super::ui::{ControlMessage, ControlMode, UiStateUpdate};

/// Blocks in flight per queue
const QUEUE_BLOCKS: usize = 4;
/// Full-scale sweep period in seconds
const SWEEP_SECONDS: f32 = 4.0;
/// Control levels the user can dial in, in units of "all of B"
const LEVEL_RANGE: (f32, f32) = (-1.0, 2.0);

/// Sine generator producing 16-bit blocks
struct Tone {
    phase: f32,
    step: f32,
    amplitude: f32,
}

impl Tone {
    fn new(sample_rate: f32, freq: f32) -> Self {
        Self {
            phase: 0.0,
            step: TAU * freq / sample_rate,
            amplitude: 24_000.0,
        }
    }

    fn fill(&mut self, block: &mut AudioBlock) {
        for sample in block.iter_mut() {
            *sample = (self.phase.sin() * self.amplitude) as i16;
            self.phase = (self.phase + self.step) % TAU;
        }
    }
}

/// Produces the control stream in kernel units
struct ControlSource {
    mode: ControlMode,
    level: f32,
    sweep_phase: f32,
    sweep_step: f32,
}

impl ControlSource {
    fn new(sample_rate: f32) -> Self {
        Self {
            mode: ControlMode::Fixed,
            level: 0.5,
            sweep_phase: 0.0,
            sweep_step: 1.0 / (SWEEP_SECONDS * sample_rate),
        }
    }

    fn to_control(level: f32) -> i16 {
        let unity = ActiveKernel::CONTROL_UNITY as f32;
        (level * unity).clamp(i16::MIN as f32, i16::MAX as f32) as i16
    }

    fn fill(&mut self, block: &mut AudioBlock) {
        match self.mode {
            ControlMode::Sweep => {
                for sample in block.iter_mut() {
                    // Triangle 0 → 1 → 0
                    let tri = 1.0 - (2.0 * self.sweep_phase - 1.0).abs();
                    self.level = tri;
                    *sample = Self::to_control(tri);
                    self.sweep_phase = (self.sweep_phase + self.sweep_step) % 1.0;
                }
            }
            ControlMode::Fixed | ControlMode::Off => block.fill(Self::to_control(self.level)),
        }
    }
}

/// Everything the audio callback owns
pub struct Engine {
    pool: RingPool,
    ports: RingPorts,
    mixer: CrossfadeMixer,
    tone_a: Tone,
    tone_b: Tone,
    control: ControlSource,
    input_a: bool,
    input_b: bool,
    current: Option<BoxedBlock>,
    cursor: usize,
    peak: i16,
}

impl Engine {
    pub fn new(sample_rate: f32, freq_a: f32, freq_b: f32) -> Self {
        let (pool, ports) = RingPool::new(QUEUE_BLOCKS);

        Self {
            pool,
            ports,
            mixer: CrossfadeMixer::new(),
            tone_a: Tone::new(sample_rate, freq_a),
            tone_b: Tone::new(sample_rate, freq_b),
            control: ControlSource::new(sample_rate),
            input_a: true,
            input_b: true,
            current: None,
            cursor: AUDIO_BLOCK_SAMPLES,
            peak: 0,
        }
    }

    pub fn handle(&mut self, msg: ControlMessage) {
        match msg {
            ControlMessage::Nudge(delta) => {
                self.control.mode = ControlMode::Fixed;
                self.control.level = (self.control.level + delta).clamp(LEVEL_RANGE.0, LEVEL_RANGE.1);
            }
            ControlMessage::CycleControl => self.control.mode = self.control.mode.next(),
            ControlMessage::ToggleInputA => self.input_a = !self.input_a,
            ControlMessage::ToggleInputB => self.input_b = !self.input_b,
            ControlMessage::ToggleClamp => {
                let policy = match self.mixer.config().control_policy {
                    ControlPolicy::Unclamped => ControlPolicy::Clamped,
                    ControlPolicy::Clamped => ControlPolicy::Unclamped,
                };
                self.mixer.set_control_policy(policy);
            }
        }
    }

    /// Feed one block per live input, run the mixer, pull its output
    fn next_block(&mut self) -> MixOutcome {
        if let Some(block) = self.current.take() {
            self.ports.reclaim(block);
        }

        // Only feed inputs the mixer will consume so nothing piles up
        if self.input_a {
            self.ports.send(INPUT_A, |block| self.tone_a.fill(block));
            if self.input_b {
                self.ports.send(INPUT_B, |block| self.tone_b.fill(block));
                if self.control.mode != ControlMode::Off {
                    self.ports.send(INPUT_CONTROL, |block| self.control.fill(block));
                }
            }
        }

        let outcome = self.mixer.process(&self.pool);
        self.current = self.ports.receive();
        self.cursor = 0;
        outcome
    }

    /// Fill an interleaved device buffer, mono to all channels
    pub fn render(&mut self, data: &mut [f32], channels: usize) {
        for frame in data.chunks_mut(channels) {
            if self.cursor >= AUDIO_BLOCK_SAMPLES {
                self.next_block();
            }

            let sample = self.current.as_ref().map_or(0, |block| block[self.cursor]);
            self.cursor += 1;
            self.peak = self.peak.max(sample.saturating_abs());

            frame.fill(sample as f32 / 32768.0);
        }
    }

    /// Current state for the UI; resets the peak meter
    pub fn snapshot(&mut self) -> UiStateUpdate {
        let peak = self.peak as f32 / i16::MAX as f32;
        self.peak = 0;

        UiStateUpdate {
            kernel: self.mixer.kernel_name(),
            outcome: self.mixer.last_outcome(),
            control_mode: self.control.mode,
            level: self.control.level,
            policy: self.mixer.config().control_policy,
            input_a: self.input_a,
            input_b: self.input_b,
            peak,
        }
    }
}
