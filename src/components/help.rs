use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, Clear, Row, Table, Widget},
};

use crate::{
    action::Action,
    config::{key_event_to_string, PageKeyBindings},
};

/// Keybinding reference overlay, one boxed table per binding group.
pub struct Help {
    keybinding_groups: Vec<(String, Vec<(String, String)>)>,
}

impl Help {
    pub fn new(keybinding_groups: Vec<(String, PageKeyBindings)>) -> Self {
        let groups = keybinding_groups
            .into_iter()
            .map(|(group_name, keybindings)| {
                let mut keybindings: Vec<(String, String)> = keybindings
                    .0
                    .iter()
                    .map(|(event, action)| (key_event_to_string(event), describe(action)))
                    .collect();
                keybindings.sort_by_key(|(key, _)| key.clone());
                (group_name, keybindings)
            })
            .collect();

        Self { keybinding_groups: groups }
    }

    fn render_group(&self, area: Rect, buf: &mut Buffer, group_name: &str, keybindings: &[(String, String)]) {
        let rows: Vec<Row> =
            keybindings.iter().map(|(key, action)| Row::new(vec![key.clone(), action.clone()])).collect();
        let widths = [Constraint::Length(10), Constraint::Min(12)];

        let table = Table::new(rows, widths)
            .column_spacing(3)
            .header(Row::new(vec!["Key", "Command"]).style(Style::new().bold()).bottom_margin(1))
            .block(
                Block::new()
                    .title(group_name.to_string())
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::new().bold().fg(Color::Cyan))
                    .padding(ratatui::widgets::Padding::symmetric(2, 1)),
            );

        table.render(area, buf);
    }
}

fn describe(action: &Action) -> String {
    match action {
        Action::Home(inner) => inner.to_string(),
        Action::Game(inner) => inner.to_string(),
        other => other.to_string(),
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let heights: Vec<u16> =
            self.keybinding_groups.iter().map(|(_, bindings)| bindings.len() as u16 + 6).collect();
        let total: u16 = heights.iter().sum();
        let width = 40u16.min(area.width);

        let [_, column, _] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(width), Constraint::Fill(1)]).areas(area);
        let [_, column, _] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(total), Constraint::Fill(1)]).areas(column);

        Clear.render(column, buf);

        let constraints: Vec<Constraint> = heights.iter().map(|&h| Constraint::Length(h)).collect();
        let group_areas = Layout::vertical(constraints).split(column);

        for ((group_name, keybindings), group_area) in self.keybinding_groups.iter().zip(group_areas.iter()) {
            self.render_group(*group_area, buf, group_name, keybindings);
        }
    }
}
