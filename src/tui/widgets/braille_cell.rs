//! Braille cell widget.
//!
//! Draws the 2x3 dot grid, dots 1-3 down the left column and 4-6 down the
//! right, with a border that lights up while a character is shown.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::braille::DotPattern;
use crate::theme::Theme;

/// Glyph for a raised dot.
pub const RAISED: &str = "●";
/// Glyph for a lowered dot.
pub const LOWERED: &str = "○";

/// Plain-text rows of a cell, top to bottom, e.g. `"● ●"`.
pub fn cell_lines(pattern: DotPattern) -> [String; 3] {
    pattern
        .rows()
        .map(|[left, right]| format!("{} {}", glyph(left), glyph(right)))
}

fn glyph(raised: bool) -> &'static str {
    if raised {
        RAISED
    } else {
        LOWERED
    }
}

/// A single braille cell.
pub struct BrailleCell<'a> {
    pattern: DotPattern,
    label: Option<String>,
    active: bool,
    theme: &'a Theme,
}

impl<'a> BrailleCell<'a> {
    pub fn new(pattern: DotPattern, theme: &'a Theme) -> Self {
        Self {
            pattern,
            label: None,
            active: false,
            theme,
        }
    }

    /// Title shown on the border (usually the character).
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Highlight the border.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Rows with a blank spacer between them so the grid reads as a cell.
    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(5);
        for (i, [left, right]) in self.pattern.rows().into_iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.push(Line::from(vec![
                Span::styled(glyph(left), self.theme.dot_style(left)),
                Span::raw("   "),
                Span::styled(glyph(right), self.theme.dot_style(right)),
            ]));
        }
        lines
    }
}

impl Widget for BrailleCell<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.active {
            self.theme.accent_bold_style()
        } else {
            self.theme.text_secondary_style()
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style);
        if let Some(label) = &self.label {
            block = block.title(format!(" {} ", label));
        }

        let inner = block.inner(area);
        block.render(area, buf);

        let lines = self.lines();
        let height = (lines.len() as u16).min(inner.height);
        let top = inner.y + inner.height.saturating_sub(height) / 2;
        let grid_area = Rect::new(inner.x, top, inner.width, height);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(grid_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(widget: BrailleCell<'_>, width: u16, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        (0..height)
            .map(|y| (0..width).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn cell_lines_follow_dot_layout() {
        let lines = cell_lines(DotPattern::from_dots(&[1, 4, 5]));
        insta::assert_snapshot!(lines.join("\n"), @r"
        ● ●
        ○ ●
        ○ ○
        ");
    }

    #[test]
    fn empty_pattern_has_no_raised_dots() {
        let lines = cell_lines(DotPattern::EMPTY);
        assert!(lines.iter().all(|l| !l.contains(RAISED)));
    }

    #[test]
    fn widget_draws_one_glyph_per_dot() {
        let theme = Theme::standard();
        let pattern = DotPattern::from_dots(&[1, 2, 6]);
        let rows = rendered(BrailleCell::new(pattern, &theme), 13, 9);
        let text = rows.join("\n");

        assert_eq!(text.matches(RAISED).count(), 3);
        assert_eq!(text.matches(LOWERED).count(), 3);
    }

    #[test]
    fn widget_shows_label_on_border() {
        let theme = Theme::standard();
        let widget = BrailleCell::new(DotPattern::EMPTY, &theme)
            .label("Q")
            .active(true);
        let rows = rendered(widget, 13, 9);
        assert!(rows[0].contains(" Q "));
    }

    #[test]
    fn widget_survives_tiny_area() {
        let theme = Theme::standard();
        let rows = rendered(BrailleCell::new(DotPattern::from_dots(&[1]), &theme), 3, 3);
        assert_eq!(rows.len(), 3);
    }
}
