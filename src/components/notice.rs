use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Blocking notice box. Stays up until the player presses a key.
pub struct Notice<'a> {
    message: &'a str,
}

impl<'a> Notice<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Widget for Notice<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width.saturating_sub(8).clamp(20, 60);
        let text_rows = (self.message.len() as u16 / width.saturating_sub(4).max(1)) + 2;
        let height = text_rows + 4;

        let [_, area, _] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(height), Constraint::Fill(1)]).areas(area);
        let [_, area, _] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(width), Constraint::Fill(1)]).areas(area);

        Clear.render(area, buf);
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red))
            .title("Notice")
            .title_alignment(Alignment::Center)
            .title_style(Style::default().fg(Color::Red).bold())
            .render(area, buf);

        let inner = area.inner(Margin { horizontal: 2, vertical: 1 });
        let [text_area, hint_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
        Paragraph::new(self.message).wrap(Wrap { trim: true }).alignment(Alignment::Center).render(text_area, buf);
        Paragraph::new("press any key")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .render(hint_area, buf);
    }
}
