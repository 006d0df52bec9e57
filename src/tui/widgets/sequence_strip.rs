//! Recognized text with the playback position marked.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::player::PlaybackState;
use crate::theme::Theme;
use crate::tui::status::display_char;

/// Shows every character of the sequence. Already-shown characters use the
/// primary color, the current one is highlighted, the rest are dimmed.
pub struct SequenceStrip<'a> {
    state: &'a PlaybackState,
    theme: &'a Theme,
}

impl<'a> SequenceStrip<'a> {
    pub fn new(state: &'a PlaybackState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn line(&self) -> Line<'static> {
        let position = self.state.position();
        let current = self.state.current_char().map(|_| position.saturating_sub(1));

        let spans: Vec<Span<'static>> = self
            .state
            .sequence()
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let text = display_char(c);
                if Some(i) == current {
                    Span::styled(
                        text,
                        self.theme
                            .accent_bold_style()
                            .add_modifier(Modifier::UNDERLINED),
                    )
                } else if i < position {
                    Span::styled(text, self.theme.text_style())
                } else {
                    Span::styled(text, self.theme.text_secondary_style())
                }
            })
            .collect();
        Line::from(spans)
    }
}

impl Widget for SequenceStrip<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.text_secondary_style())
            .title(" Text ");
        let line = if self.state.sequence().is_empty() {
            Line::styled("(nothing loaded)", self.theme.text_secondary_style())
        } else {
            self.line()
        };
        Paragraph::new(line)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
