//! Interactive braille player.
//!
//! Shows the current braille cell, the recognized text with the playback
//! position, progress and a status line. The actuator can be connected
//! and disconnected while a sequence plays.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};
use tracing::debug;

use super::app::{App, InputResult};
use super::status::{display_char, StatusLine};
use super::widgets::{BrailleCell, SequenceStrip};
use crate::actuator::{ActuatorSink, SerialActuator, SerialSettings};
use crate::player::{PlaybackTiming, PlayerEvent, PlayerPhase, SequencePlayer};
use crate::recognition::RecognizedSequence;
use crate::theme::{current_theme, Theme};

/// Longest wait between redraws when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Footer key hints.
const KEY_HINTS: &[(&str, &str)] = &[
    ("r", "reset"),
    ("p", "replay"),
    ("a", "actuator"),
    ("?", "help"),
    ("q", "quit"),
];

/// Player application state.
pub struct PlayerApp {
    player: SequencePlayer,
    actuator: Arc<SerialActuator>,
    serial: Option<SerialSettings>,
    events: Receiver<PlayerEvent>,
    status: StatusLine,
    show_help: bool,
    theme: Theme,
}

impl PlayerApp {
    /// Create an idle player forwarding to `actuator`.
    ///
    /// `serial` is used when the user toggles the actuator connection.
    pub fn new(
        actuator: Arc<SerialActuator>,
        serial: Option<SerialSettings>,
        timing: PlaybackTiming,
    ) -> Self {
        let sink: Arc<dyn ActuatorSink> = actuator.clone();
        let mut player = SequencePlayer::new(sink, timing);
        let (tx, events) = mpsc::channel();
        player.subscribe(move |event| {
            // Receiver lives as long as the app
            let _ = tx.send(event.clone());
        });

        Self {
            player,
            actuator,
            serial,
            events,
            status: StatusLine::default(),
            show_help: false,
            theme: current_theme(),
        }
    }

    /// Use `theme` instead of the default palette.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn player(&self) -> &SequencePlayer {
        &self.player
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Replace the status line (e.g. with the connect result).
    pub fn set_status(&mut self, status: StatusLine) {
        self.status = status;
    }

    /// Start playing `sequence`.
    pub fn load(&mut self, sequence: RecognizedSequence, now: Instant) {
        self.player.load(sequence, now);
        self.drain_events();
    }

    /// Run the UI until the user quits.
    #[cfg(not(tarpaulin_include))]
    pub fn run(&mut self, sequence: RecognizedSequence) -> Result<()> {
        let mut app = App::new()?;
        self.load(sequence, Instant::now());

        loop {
            app.draw(|frame| self.render(frame))?;

            let timeout = self
                .player
                .time_until_next(Instant::now())
                .map_or(IDLE_POLL, |t| t.min(IDLE_POLL));
            if let Some(key) = app.poll_key(timeout)? {
                if self.handle_key(key, Instant::now()) == InputResult::Quit {
                    break;
                }
            }
            self.tick(Instant::now());
        }
        Ok(())
    }

    /// Advance playback to `now` and refresh the status.
    pub fn tick(&mut self, now: Instant) {
        self.player.poll(now);
        self.drain_events();
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> InputResult {
        // If help is showing, any key closes it
        if self.show_help {
            self.show_help = false;
            return InputResult::Continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return InputResult::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return InputResult::Quit
            }
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') => self.player.reset(),
            KeyCode::Char('p') => self.player.replay(now),
            KeyCode::Char('a') => self.toggle_actuator(),
            _ => {}
        }
        self.drain_events();
        InputResult::Continue
    }

    /// Connect if disconnected, disconnect if connected.
    pub fn toggle_actuator(&mut self) {
        if self.actuator.connection_info().is_some() {
            self.actuator.disconnect();
            self.status = StatusLine::info("Disconnected from actuator.");
            return;
        }

        let Some(settings) = &self.serial else {
            self.status = StatusLine::warning("No actuator device configured (use --device).");
            return;
        };
        self.status = match self.actuator.connect(settings) {
            Ok(info) => StatusLine::success(format!("Connected to actuator on {}.", info.device)),
            Err(e) => StatusLine::error(format!("Could not connect to actuator: {}", e)),
        };
    }

    fn drain_events(&mut self) {
        let connected = self.actuator.is_connected();
        while let Ok(event) = self.events.try_recv() {
            debug!(?event, "player event");
            self.status = StatusLine::from_event(&event, connected);
        }
        if let Some(failure) = self.actuator.take_failures().pop() {
            self.status = StatusLine::error(format!(
                "Actuator write failed for '{}': {}. Playback continues.",
                display_char(failure.character),
                failure.message
            ));
        }
    }

    /// Draw the whole view.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(3), // text strip
                Constraint::Min(9),    // cell
                Constraint::Length(1), // progress
                Constraint::Length(1), // status
                Constraint::Length(1), // footer
            ])
            .split(area);

        self.render_title(frame, chunks[0]);
        frame.render_widget(SequenceStrip::new(self.player.state(), &self.theme), chunks[1]);
        self.render_cell(frame, chunks[2]);
        self.render_progress(frame, chunks[3]);
        frame.render_widget(
            Paragraph::new(self.status.message.clone())
                .style(Style::default().fg(self.status.kind.color(&self.theme))),
            chunks[4],
        );
        frame.render_widget(
            Paragraph::new(footer_line(KEY_HINTS, &self.theme)).alignment(Alignment::Center),
            chunks[5],
        );

        if self.show_help {
            render_help_modal(frame, area, &self.theme);
        }
    }

    fn render_title(&self, frame: &mut Frame, area: Rect) {
        let actuator = match self.actuator.connection_info() {
            Some(info) if self.actuator.is_connected() => {
                Span::styled(format!("actuator: {}", info.device), self.theme.success_style())
            }
            Some(info) => {
                Span::styled(format!("actuator: {} (lost)", info.device), self.theme.error_style())
            }
            None => Span::styled("actuator: off", self.theme.text_secondary_style()),
        };
        let line = Line::from(vec![
            Span::styled("braille-reader", self.theme.accent_bold_style()),
            Span::raw("  "),
            actuator,
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_cell(&self, frame: &mut Frame, area: Rect) {
        let state = self.player.state();
        let width = 13.min(area.width);
        let height = 9.min(area.height);
        let cell_area = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        let mut cell = BrailleCell::new(state.current_pattern(), &self.theme)
            .active(state.current_char().is_some());
        if let Some(c) = state.current_char() {
            cell = cell.label(display_char(c));
        }
        frame.render_widget(cell, cell_area);
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect) {
        let state = self.player.state();
        let label = match state.phase() {
            PlayerPhase::Idle => "idle".to_string(),
            PlayerPhase::AwaitingStep => format!("{}/{}", state.position(), state.total()),
            PlayerPhase::Completed => "done".to_string(),
        };
        let ratio = if state.phase() == PlayerPhase::Idle {
            0.0
        } else {
            state.progress()
        };
        let gauge = Gauge::default()
            .gauge_style(self.theme.accent_style())
            .ratio(ratio.clamp(0.0, 1.0))
            .label(label);
        frame.render_widget(gauge, area);
    }
}

/// Key hints as styled spans separated by `" | "`.
fn footer_line(keys: &[(&str, &str)], theme: &Theme) -> Line<'static> {
    let mut spans = Vec::with_capacity(keys.len() * 3);
    for (i, (key, desc)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", theme.text_secondary_style()));
        }
        spans.push(Span::styled(key.to_string(), theme.accent_style()));
        spans.push(Span::styled(
            format!(": {}", desc),
            theme.text_secondary_style(),
        ));
    }
    Line::from(spans)
}

fn render_help_modal(frame: &mut Frame, area: Rect, theme: &Theme) {
    let width = 44.min(area.width.saturating_sub(2));
    let height = 11.min(area.height.saturating_sub(2));
    let modal = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let entries = [
        ("r", "Reset to idle and clear the actuator"),
        ("p", "Replay the text from the start"),
        ("a", "Connect / disconnect the actuator"),
        ("?", "Show this help"),
        ("q, Esc", "Quit"),
    ];
    let mut lines = vec![Line::default()];
    for (key, desc) in entries {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<8}", key), theme.accent_bold_style()),
            Span::styled(desc, theme.text_style()),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::styled("  Press any key to close", theme.text_secondary_style()));

    frame.render_widget(Clear, modal);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.accent_style())
                .title(" Help "),
        ),
        modal,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::braille::SymbolTable;
    use crate::recognition::recognize;
    use crate::tui::status::StatusKind;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> PlayerApp {
        PlayerApp::new(
            Arc::new(SerialActuator::new()),
            None,
            PlaybackTiming::new(Duration::ZERO, Duration::from_millis(100)),
        )
    }

    fn screen(app: &PlayerApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(64, 18)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let area = buffer.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn tick_shows_first_character() {
        let mut app = app();
        let t0 = Instant::now();
        app.load(recognize("Hi", SymbolTable::standard()).unwrap(), t0);
        app.tick(t0);

        assert_eq!(app.player().state().current_char(), Some('H'));
        assert_eq!(app.status().kind, StatusKind::Warning);
        assert!(app.status().message.contains("'H' (1/2)"));
    }

    #[test]
    fn quit_keys_quit() {
        let mut app = app();
        let now = Instant::now();
        assert_eq!(app.handle_key(key(KeyCode::Char('q')), now), InputResult::Quit);
        assert_eq!(app.handle_key(key(KeyCode::Esc), now), InputResult::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c, now), InputResult::Quit);
    }

    #[test]
    fn reset_key_returns_to_idle() {
        let mut app = app();
        let t0 = Instant::now();
        app.load(recognize("AB", SymbolTable::standard()).unwrap(), t0);
        app.tick(t0);

        app.handle_key(key(KeyCode::Char('r')), t0);
        assert_eq!(app.player().phase(), PlayerPhase::Idle);
        assert!(app.status().message.starts_with("Reset"));
    }

    #[test]
    fn help_closes_on_any_key() {
        let mut app = app();
        let now = Instant::now();
        app.handle_key(key(KeyCode::Char('?')), now);
        assert!(screen(&app).contains("Help"));
        // 'q' only closes help
        assert_eq!(app.handle_key(key(KeyCode::Char('q')), now), InputResult::Continue);
        assert!(!screen(&app).contains("Press any key"));
    }

    #[test]
    fn toggle_without_device_warns() {
        let mut app = app();
        app.toggle_actuator();
        assert_eq!(app.status().kind, StatusKind::Warning);
    }

    #[cfg(unix)]
    #[test]
    fn toggle_connects_and_disconnects() {
        let dir = tempfile::tempdir().unwrap();
        let device = dir.path().join("tty");
        std::fs::write(&device, b"").unwrap();

        let actuator = Arc::new(SerialActuator::new());
        let mut app = PlayerApp::new(
            actuator.clone(),
            Some(SerialSettings::new(&device)),
            PlaybackTiming::default(),
        );

        app.toggle_actuator();
        assert!(actuator.is_connected());
        assert_eq!(app.status().kind, StatusKind::Success);

        app.toggle_actuator();
        assert!(!actuator.is_connected());
        assert_eq!(std::fs::read_to_string(&device).unwrap(), "00");
    }

    #[test]
    fn render_shows_cell_and_text() {
        let mut app = app();
        let t0 = Instant::now();
        app.load(recognize("Ok", SymbolTable::standard()).unwrap(), t0);
        app.tick(t0);

        let screen = screen(&app);
        assert!(screen.contains("braille-reader"));
        assert!(screen.contains("actuator: off"));
        assert!(screen.contains(" O "));
        assert!(screen.contains("1/2"));
        assert!(screen.contains("q: quit"));
    }

    #[test]
    fn configured_theme_colors_raised_dots() {
        let mut app = app().with_theme(Theme::high_contrast());
        let t0 = Instant::now();
        app.load(recognize("A", SymbolTable::standard()).unwrap(), t0);
        app.tick(t0);

        let mut terminal = Terminal::new(TestBackend::new(64, 18)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let raised = buffer
            .content()
            .iter()
            .find(|cell| cell.symbol() == "●")
            .expect("a raised dot is drawn");
        assert_eq!(raised.fg, Theme::high_contrast().dot_raised);
    }

    #[test]
    fn render_idle_does_not_panic_on_small_terminal() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
