//! Xfade - application builder and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use super::engine::Engine;
use super::ui::{ControlMessage, UiApp, UiStateUpdate};

/// Main application builder
pub struct Xfade {
    freq_a: f32,
    freq_b: f32,
}

impl Xfade {
    pub fn new() -> Self {
        Self {
            freq_a: 220.0,
            freq_b: 330.0,
        }
    }

    /// Frequency of the tone on input A
    pub fn tone_a(mut self, freq: f32) -> Self {
        self.freq_a = freq;
        self
    }

    /// Frequency of the tone on input B
    pub fn tone_b(mut self, freq: f32) -> Self {
        self.freq_b = freq;
        self
    }

    /// Open the default output device and run the UI until the user quits
    pub fn run(self) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        // UI → audio commands, audio → UI snapshots
        let (msg_tx, mut msg_rx) = RingBuffer::<ControlMessage>::new(64);
        let (mut state_tx, state_rx) = RingBuffer::<UiStateUpdate>::new(64);

        let mut engine = Engine::new(sample_rate, self.freq_a, self.freq_b);
        let initial_state = engine.snapshot();

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    while let Ok(msg) = msg_rx.pop() {
                        engine.handle(msg);
                    }

                    engine.render(data, channels);

                    // Drop the snapshot if the UI is behind
                    let _ = state_tx.push(engine.snapshot());
                },
                |err| eprintln!("Stream error: {err}"),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;

        let mut terminal = ratatui::init();
        let result = UiApp::new(msg_tx, state_rx, initial_state).run(&mut terminal);
        ratatui::restore();

        result
    }
}

impl Default for Xfade {
    fn default() -> Self {
        Self::new()
    }
}
