//! TUI module for xfade
//!
//! Shows which branch the mixer takes and lets the user drive its inputs.

mod meter;
pub mod state;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use saavy_xfade::graph::{ControlPolicy, MixOutcome};
use std::time::Duration;

pub use state::{ControlMessage, ControlMode, UiStateUpdate};

use meter::render_meters;

/// Control level change per arrow key press
const NUDGE_STEP: f32 = 0.05;

/// UI application state
pub struct UiApp {
    /// Commands to the audio thread
    msg_tx: Producer<ControlMessage>,
    /// Snapshots from the audio thread
    state_rx: Consumer<UiStateUpdate>,
    /// Latest snapshot
    current_state: UiStateUpdate,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        msg_tx: Producer<ControlMessage>,
        state_rx: Consumer<UiStateUpdate>,
        initial_state: UiStateUpdate,
    ) -> Self {
        Self {
            msg_tx,
            state_rx,
            current_state: initial_state,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_state();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Keep only the latest state
    fn poll_state(&mut self) {
        while let Ok(state) = self.state_rx.pop() {
            self.current_state = state;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let msg = match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Left => ControlMessage::Nudge(-NUDGE_STEP),
            KeyCode::Right => ControlMessage::Nudge(NUDGE_STEP),
            KeyCode::Char('c') => ControlMessage::CycleControl,
            KeyCode::Char('a') => ControlMessage::ToggleInputA,
            KeyCode::Char('b') => ControlMessage::ToggleInputB,
            KeyCode::Char('k') => ControlMessage::ToggleClamp,
            _ => return,
        };
        // Audio thread drains this every callback; a full queue means it stalled
        let _ = self.msg_tx.push(msg);
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Length(6), // Meters
                Constraint::Min(3),    // Branch
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        render_status(frame, chunks[0], &self.current_state);
        render_meters(frame, chunks[1], &self.current_state);
        render_branch(frame, chunks[2], &self.current_state);

        let help = Paragraph::new(
            " [Q] Quit  [←/→] Level  [C] Control mode  [A]/[B] Toggle input  [K] Clamp",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}

fn on_off(enabled: bool) -> Span<'static> {
    if enabled {
        Span::styled("on ", Style::default().fg(Color::Green))
    } else {
        Span::styled("off", Style::default().fg(Color::Red))
    }
}

fn render_status(frame: &mut Frame, area: Rect, state: &UiStateUpdate) {
    let policy = match state.policy {
        ControlPolicy::Unclamped => "unclamped",
        ControlPolicy::Clamped => "clamped",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" kernel: {}  ", state.kernel),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("A: "),
        on_off(state.input_a),
        Span::raw("  B: "),
        on_off(state.input_b),
        Span::styled(
            format!("  control: {}  ", state.control_mode.label()),
            Style::default().fg(Color::White),
        ),
        Span::styled(policy, Style::default().fg(Color::Magenta)),
    ]);

    let paragraph = Paragraph::new(line).block(Block::default().title(" xfade ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_branch(frame: &mut Frame, area: Rect, state: &UiStateUpdate) {
    let (label, detail, color) = match state.outcome {
        MixOutcome::Silent => ("silent", "input A absent, nothing transmitted", Color::DarkGray),
        MixOutcome::PassThrough => ("pass-through", "input B absent, A forwarded", Color::Yellow),
        MixOutcome::ConstantMix => ("constant mix", "no control block, 50/50", Color::Blue),
        MixOutcome::Crossfade => ("crossfade", "per-sample control", Color::Green),
    };

    let text = vec![
        Line::from(Span::styled(format!(" {}", label), Style::default().fg(color))),
        Line::from(Span::styled(format!(" {}", detail), Style::default().fg(Color::DarkGray))),
    ];

    let paragraph = Paragraph::new(text).block(Block::default().title(" Branch ").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
