use std::collections::HashMap;

use color_eyre::eyre::Result;
use derive_builder::Builder;
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use super::{Frame, Page, PageId};
use crate::{
    action::{Action, HomeAction},
    audio::AudioManager,
    config::PageKeyBindings,
    constants::{TAGLINE, TITLE_TEXT},
    score::{ScoreBook, ScoreRecord},
};

const BEST_SCORES_SHOWN: usize = 5;

#[derive(Copy, Clone, PartialEq, Eq)]
pub enum OptionItem {
    Start,
    Mute,
    Quit,
}

#[derive(Builder)]
#[builder(pattern = "owned")]
pub struct HomePage {
    #[builder(default)]
    pub action_tx: Option<UnboundedSender<Action>>,
    #[builder(default)]
    pub keymap: PageKeyBindings,
    options: Vec<(OptionItem, &'static str)>,
    selected_option_index: usize,
    scores: ScoreBook,
    audio: AudioManager,
    #[builder(default)]
    best_scores: Vec<ScoreRecord>,
}

impl HomePage {
    pub fn new(scores: ScoreBook, audio: AudioManager) -> Self {
        HomePageBuilder::default()
            .options(vec![(OptionItem::Start, "Start playing"), (OptionItem::Mute, "Toggle sound"), (OptionItem::Quit, "Quit")])
            .selected_option_index(0)
            .scores(scores)
            .audio(audio)
            .build()
            .unwrap()
    }

    pub fn up(&mut self) {
        if self.selected_option_index > 0 {
            self.selected_option_index -= 1;
        }
    }

    pub fn down(&mut self) {
        if self.selected_option_index < self.options.len() - 1 {
            self.selected_option_index += 1;
        }
    }

    fn select(&mut self) -> Option<Action> {
        match self.options[self.selected_option_index].0 {
            OptionItem::Start => Some(Action::StartRun),
            OptionItem::Mute => Some(Action::ToggleMute),
            OptionItem::Quit => Some(Action::Quit),
        }
    }

    fn refresh_scores(&mut self) {
        self.best_scores = self.scores.best_scores(BEST_SCORES_SHOWN);
    }
}

impl Page for HomePage {
    fn id(&self) -> PageId {
        PageId::Home
    }

    fn register_keymap(&mut self, keymaps: &HashMap<PageId, PageKeyBindings>) -> Result<()> {
        if let Some(keymap) = keymaps.get(&self.id()) {
            self.keymap = keymap.clone();
        }
        Ok(())
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(tx);
        Ok(())
    }

    fn init(&mut self) -> Result<()> {
        self.refresh_scores();
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Home(command) => match command {
                HomeAction::Up => self.up(),
                HomeAction::Down => self.down(),
                HomeAction::Select => return Ok(self.select()),
            },
            Action::GoHome => self.refresh_scores(),
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, rect: Rect) -> Result<()> {
        f.render_widget(Clear, rect);

        let title_lines: Vec<&str> = TITLE_TEXT.lines().filter(|s| !s.is_empty()).collect();
        let num_title_lines = title_lines.len() as u16;

        let num_options = self.options.len() as u16;
        let option_height = num_options * 2 - 1;
        let score_height = (self.best_scores.len().max(1) as u16) + 1;

        let [title_area, option_area, score_area] = Layout::vertical(vec![
            Constraint::Length(num_title_lines + 2),
            Constraint::Length(option_height),
            Constraint::Length(score_height),
        ])
        .flex(layout::Flex::SpaceAround)
        .areas(rect);

        let mut lines: Vec<Line> =
            title_lines.into_iter().map(|s| Line::from(s).style(Style::default().fg(Color::Yellow))).collect();
        lines.push(Line::default());
        lines.push(Line::from(TAGLINE).style(Style::default().fg(Color::DarkGray)));
        f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), title_area);

        let option_lines: Vec<Line> = self
            .options
            .iter()
            .enumerate()
            .flat_map(|(index, (item, label))| {
                let label = match item {
                    OptionItem::Mute if self.audio.is_muted() => "Toggle sound (muted)".to_string(),
                    _ => label.to_string(),
                };
                let line = if index == self.selected_option_index {
                    Line::from(format!("> {} <", label)).style(Style::default().fg(Color::LightGreen).bold())
                } else {
                    Line::from(label)
                };
                [line, Line::default()]
            })
            .collect();
        f.render_widget(Paragraph::new(option_lines).alignment(Alignment::Center), option_area);

        let mut score_lines: Vec<Line> = vec![Line::from("Best runs").style(Style::default().fg(Color::Cyan))];
        if self.best_scores.is_empty() {
            score_lines.push(Line::from("no scores yet").style(Style::default().fg(Color::DarkGray)));
        } else {
            for (rank, record) in self.best_scores.iter().enumerate() {
                score_lines.push(Line::from(format!("{}. {} pts", rank + 1, record.score)));
            }
        }
        f.render_widget(Paragraph::new(score_lines).alignment(Alignment::Center), score_area);

        Ok(())
    }
}
