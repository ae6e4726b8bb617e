use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

/// Multi-line text sprite anchored at the top-left of its area. Whitespace
/// cells are skipped so sprites overlay the scene without punching holes.
pub struct Sprite<'a> {
    text: &'a str,
    style: Style,
}

impl<'a> Sprite<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, style: Style::default() }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// (width, height) in cells of the non-empty lines.
    pub fn size(text: &str) -> (u16, u16) {
        let lines: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) as u16;
        (width, lines.len() as u16)
    }
}

impl Widget for Sprite<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.text.lines().filter(|line| !line.is_empty());
        for (row, line) in lines.enumerate() {
            let y = area.y.saturating_add(row as u16);
            if y >= area.bottom() || y >= buf.area.bottom() {
                break;
            }
            for (col, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let x = area.x.saturating_add(col as u16);
                if x >= area.right() || x >= buf.area.right() {
                    break;
                }
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(ch);
                    cell.set_style(self.style);
                }
            }
        }
    }
}
