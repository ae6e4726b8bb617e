use color_eyre::eyre::Result;
use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Borders},
};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::{
    action::Action,
    audio::AudioManager,
    components::{card::Card, help::Help, notice::Notice},
    config::Config,
    constants::{FIELD_COLS, FIELD_ROWS},
    pages::{game::GamePage, home::HomePage, Page, PageId},
    score::ScoreBook,
    tui,
    voice::{self, SpectrumFeed},
};

/// Terminal-state card shown over the frozen field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EndCard {
    GameOver(u32),
    Victory(u32),
}

pub struct App {
    config: Config,
    tick_rate: f64,
    frame_rate: f64,
    should_quit: bool,
    should_suspend: bool,
    show_help: bool,
    pages: Vec<Box<dyn Page>>,
    active_page_index: usize,
    audio: AudioManager,
    scores: ScoreBook,
    /// Handed to a microphone capture integration; frames published here
    /// drive the bird.
    _spectrum_feed: SpectrumFeed,
    card: Option<EndCard>,
    notice: Option<String>,
}

impl App {
    pub fn new(tick_rate: f64, frame_rate: f64) -> Result<Self> {
        let config = Config::new()?;

        let audio = AudioManager::start();
        let scores = ScoreBook::new();
        let (spectrum_feed, voice) = voice::spectrum_channel();

        let home_page = HomePage::new(scores.clone(), audio.clone());
        let game_page = GamePage::new(voice, audio.clone(), frame_rate);

        Ok(Self {
            tick_rate,
            frame_rate,
            should_quit: false,
            should_suspend: false,
            show_help: false,
            config,
            pages: vec![Box::new(home_page), Box::new(game_page)],
            active_page_index: 0,
            audio,
            scores,
            _spectrum_feed: spectrum_feed,
            card: None,
            notice: None,
        })
    }

    fn get_active_page(&mut self) -> &mut Box<dyn Page> {
        self.pages.get_mut(self.active_page_index).unwrap()
    }

    fn set_active_page(&mut self, page_id: PageId) {
        if let Some(index) = self.pages.iter().position(|page| page.id() == page_id) {
            self.active_page_index = index;
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = tui::Tui::new()?;
        tui.tick_rate(self.tick_rate);
        tui.frame_rate(self.frame_rate);
        tui.enter()?;

        for page in self.pages.iter_mut() {
            page.register_keymap(&self.config.keybindings.pages)?;
        }

        for page in self.pages.iter_mut() {
            page.register_action_handler(action_tx.clone())?;
        }

        for page in self.pages.iter_mut() {
            page.register_config_handler(self.config.clone())?;
        }

        for page in self.pages.iter_mut() {
            page.init()?;
        }

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    tui::Event::Quit => action_tx.send(Action::Quit)?,
                    tui::Event::Tick => action_tx.send(Action::Tick)?,
                    tui::Event::Render => action_tx.send(Action::Render)?,
                    tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
                    tui::Event::Key(key) => {
                        // A notice blocks everything until dismissed.
                        if self.notice.take().is_some() {
                            continue;
                        }

                        let mut action = None;

                        let active_page_id = self.get_active_page().id();
                        if let Some(keymap) = self.config.keybindings.pages.get(&active_page_id) {
                            action = keymap.0.get(&key);
                        };
                        if let Some(act) = self.config.keybindings.global.0.get(&key) {
                            action = Some(act)
                        }

                        if let Some(action) = action {
                            log::info!("Got action: {action:?}");
                            action_tx.send(action.clone())?;
                        }
                    },
                    _ => {},
                }
                if let Some(action) = self.get_active_page().handle_events(Some(e))? {
                    action_tx.send(action)?;
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render && !matches!(action, Action::Game(_)) {
                    log::debug!("{action:?}");
                }
                match &action {
                    Action::Quit => self.should_quit = true,
                    Action::Suspend => self.should_suspend = true,
                    Action::Resume => self.should_suspend = false,
                    Action::ToggleShowHelp => self.show_help = !self.show_help,
                    Action::ToggleMute => {
                        let muted = self.audio.toggle_mute();
                        log::info!("sound {}", if muted { "muted" } else { "unmuted" });
                    },
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        self.render(&mut tui, &action_tx)?;
                    },
                    Action::Render => {
                        self.render(&mut tui, &action_tx)?;
                    },
                    Action::StartRun | Action::RestartRun => {
                        self.card = None;
                        self.set_active_page(PageId::Game);
                    },
                    Action::GoHome => {
                        self.card = None;
                        self.set_active_page(PageId::Home);
                    },
                    Action::ShowGameOver(score) => {
                        self.card = Some(EndCard::GameOver(*score));
                    },
                    Action::ShowVictory(score) => {
                        self.card = Some(EndCard::Victory(*score));
                    },
                    Action::RecordScore(score) => {
                        self.scores.record_completed_score(*score);
                    },
                    Action::Error(message) => {
                        self.notice = Some(message.clone());
                    },
                    _ => {},
                }
                if !self.show_help {
                    if let Some(action) = self.get_active_page().update(action)? {
                        action_tx.send(action)?
                    }
                }
            }
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                tui = tui::Tui::new()?;
                tui.tick_rate(self.tick_rate);
                tui.frame_rate(self.frame_rate);
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn render(&mut self, tui: &mut tui::Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
        tui.draw(|f| {
            let area = f.area();

            let [_, area, _] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(FIELD_ROWS + 2), Constraint::Fill(1)])
                    .areas(area);
            let [_, area, _] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(FIELD_COLS + 2), Constraint::Fill(1)])
                    .areas(area);

            let border = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().bg(Color::Black));
            f.render_widget(border, area);

            let area = area.inner(Margin { horizontal: 1, vertical: 1 });

            if let Some(page) = self.pages.get_mut(self.active_page_index) {
                let r = page.draw(f, area);
                if let Err(e) = r {
                    action_tx.send(Action::Error(format!("Failed to draw: {:?}", e))).unwrap();
                }
            }

            if let Some(card) = self.card {
                f.render_widget(end_card(card), area);
            }

            if self.show_help {
                let active_page_id = self.get_active_page().id();
                let help = Help::new(vec![
                    ("System".to_string(), self.config.keybindings.global.clone()),
                    (
                        active_page_id.to_string(),
                        self.config.keybindings.pages.get(&active_page_id).cloned().unwrap_or_default(),
                    ),
                ]);
                f.render_widget(help, area);
            }

            if let Some(message) = &self.notice {
                f.render_widget(Notice::new(message), area);
            }
        })?;

        Ok(())
    }
}

fn end_card(card: EndCard) -> Card<'static> {
    match card {
        EndCard::GameOver(score) => Card::new(
            " Game Over ",
            vec![
                Line::from(format!("Score: {score}")),
                Line::default(),
                Line::from("r  try again").style(Style::default().fg(Color::DarkGray)),
                Line::from("h  home").style(Style::default().fg(Color::DarkGray)),
            ],
            Color::Red,
        ),
        EndCard::Victory(score) => Card::new(
            " You Won! ",
            vec![
                Line::from(format!("Score: {score}")).style(Style::default().fg(Color::Yellow).bold()),
                Line::default(),
                Line::from("r  play again").style(Style::default().fg(Color::DarkGray)),
                Line::from("h  home").style(Style::default().fg(Color::DarkGray)),
            ],
            Color::Green,
        ),
    }
}
