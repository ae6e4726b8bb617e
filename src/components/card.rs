use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

const CARD_HPADDING: u16 = 3;
const CARD_VPADDING: u16 = 1;

/// Boxed message card centered in its area, used for the terminal-state
/// screens over the frozen field.
pub struct Card<'a> {
    title: &'a str,
    lines: Vec<Line<'a>>,
    accent: Color,
}

impl<'a> Card<'a> {
    pub fn new(title: &'a str, lines: Vec<Line<'a>>, accent: Color) -> Self {
        Self { title, lines, accent }
    }
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width =
            self.lines.iter().map(|line| line.width()).max().unwrap_or(0).max(self.title.len() + 2) as u16
                + CARD_HPADDING * 2
                + 2;
        let height = self.lines.len() as u16 + CARD_VPADDING * 2 + 2;

        let [_, area, _] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(height), Constraint::Fill(1)]).areas(area);
        let [_, area, _] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(width), Constraint::Fill(1)]).areas(area);

        Clear.render(area, buf);
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.accent))
            .title(self.title)
            .title_alignment(Alignment::Center)
            .title_style(Style::default().fg(self.accent).bold())
            .render(area, buf);

        let inner = area.inner(Margin { horizontal: CARD_HPADDING, vertical: CARD_VPADDING });
        Paragraph::new(self.lines).alignment(Alignment::Center).render(inner, buf);
    }
}
