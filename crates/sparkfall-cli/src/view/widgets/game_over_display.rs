use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Text},
    widgets::{Clear, Widget},
};
use sparkfall_engine::render::Rgb;

use crate::view::widgets::to_color;

const TITLE: &str = "Game Over!";
const PROMPT: &str = "Press any key to restart";

/// Two-line game-over message on a solid box.
#[derive(Debug)]
pub(crate) struct GameOverDisplay {
    background: Rgb,
}

impl GameOverDisplay {
    pub(crate) fn new(background: Rgb) -> Self {
        Self { background }
    }

    /// Box size: the prompt plus two columns of padding on each side, and
    /// the two lines with one blank line above and below.
    pub(crate) fn size() -> (u16, u16) {
        let width = u16::try_from(PROMPT.len()).unwrap_or(u16::MAX) + 4;
        (width, 4)
    }

    /// Box area centered horizontally in `horizontal` and vertically in
    /// `vertical`.
    pub(crate) fn area(horizontal: Rect, vertical: Rect) -> Rect {
        let (width, height) = Self::size();
        let [columns] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(horizontal);
        let [rows] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(vertical);
        Rect::new(columns.x, rows.y, columns.width, rows.height)
    }
}

impl Widget for GameOverDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let style = Style::new().fg(Color::White).bg(to_color(self.background));
        buf.set_style(area, style);

        let text = Text::from(vec![
            Line::from(TITLE).style(Style::new().add_modifier(Modifier::BOLD)),
            Line::from(PROMPT),
        ])
        .style(style)
        .centered();
        let [text_area] = Layout::vertical([Constraint::Length(2)])
            .flex(Flex::Center)
            .areas(area);
        text.render(text_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_renders_both_lines_centered() {
        let (width, height) = GameOverDisplay::size();
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);

        GameOverDisplay::new(Rgb::new(50, 50, 50)).render(area, &mut buf);

        assert_eq!(row_text(&buf, 1).trim(), TITLE);
        assert_eq!(row_text(&buf, 2).trim(), PROMPT);
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(50, 50, 50));
    }

    #[test]
    fn test_area_is_centered() {
        let area = GameOverDisplay::area(Rect::new(0, 0, 80, 24), Rect::new(0, 0, 80, 22));
        let (width, height) = GameOverDisplay::size();
        assert_eq!(area, Rect::new((80 - width) / 2, (22 - height) / 2, width, height));
    }
}
