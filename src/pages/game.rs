use std::{collections::HashMap, time::Duration};

use color_eyre::eyre::Result;
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use super::{Frame, Page, PageId};
use crate::{
    action::{Action, GameAction},
    audio::AudioManager,
    components::sprite::Sprite,
    config::PageKeyBindings,
    constants::game,
    game::{
        frame::{self, FrameEvent},
        geometry,
        session::GameSession,
        spawner,
        types::{ObstacleKind, RunState},
    },
    voice::VoiceControl,
};

pub struct GamePage {
    pub action_tx: Option<UnboundedSender<Action>>,
    pub keymap: PageKeyBindings,
    session: GameSession,
    voice: VoiceControl,
    audio: AudioManager,
    frame_period: Duration,
    /// Monitor bookkeeping: ticks since loss detection, and whether the
    /// terminal state has been presented.
    notice_ticks: u16,
    notified: bool,
}

impl GamePage {
    pub fn new(voice: VoiceControl, audio: AudioManager, frame_rate: f64) -> Self {
        GamePage {
            action_tx: None,
            keymap: PageKeyBindings::default(),
            session: GameSession::new(),
            voice,
            audio,
            frame_period: Duration::from_secs_f64(1.0 / frame_rate),
            notice_ticks: 0,
            notified: false,
        }
    }

    fn begin_run(&mut self) {
        let Some(action_tx) = self.action_tx.clone() else {
            log::error!("game page has no action handler, cannot start a run");
            return;
        };

        self.session.reset();
        self.notice_ticks = 0;
        self.notified = false;

        self.ensure_voice(&action_tx);
        self.session.start(action_tx, self.frame_period);
        self.audio.play_music();
    }

    /// Kicks off capture initialization in the background. Voice failure is
    /// surfaced as a notice; the run itself continues without lift.
    fn ensure_voice(&self, action_tx: &UnboundedSender<Action>) {
        if self.voice.is_ready() {
            return;
        }
        let voice = self.voice.clone();
        let tx = action_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = voice.initialize().await {
                log::warn!("voice capture initialization failed: {e}");
                let _ = tx.send(Action::Error(format!(
                    "Voice control is unavailable ({e}). Without a microphone feed the bird will just fall."
                )));
            } else {
                log::info!("voice capture initialized");
            }
        });
    }

    fn step_frame(&mut self) {
        let sample = self.voice.sample();
        let mut rng = rand::thread_rng();
        let events = frame::advance(&mut self.session.state, sample, &mut rng);

        for event in events {
            match event {
                FrameEvent::Cue(id) => self.audio.cue(id),
                FrameEvent::DelayedCue(id, delay) => self.audio.cue_after(id, delay),
                FrameEvent::Finished(outcome) => {
                    log::info!("run finished: {outcome:?}, score {}", self.session.state.display_score());
                    self.session.halt_spawning();
                    self.audio.pause_music();
                    if let Some(tx) = &self.action_tx {
                        let _ = tx.send(Action::RecordScore(self.session.state.display_score()));
                    }
                },
            }
        }
    }

    /// Runs on the 100ms tick, decoupled from the frame driver: presents
    /// terminal states outward, delaying a loss so the splash shows first.
    fn monitor_tick(&mut self) -> Option<Action> {
        if !self.session.state.over || self.notified {
            return None;
        }
        if self.session.state.won {
            self.notified = true;
            return Some(Action::ShowVictory(self.session.state.display_score()));
        }
        self.notice_ticks += 1;
        if self.notice_ticks >= game::LOSS_NOTICE_TICKS {
            self.session.state.show_splash = false;
            self.notified = true;
            return Some(Action::ShowGameOver(self.session.state.display_score()));
        }
        None
    }

    /// World rectangle to cell rectangle, clipped to the draw area.
    fn cell_rect(area: Rect, world: geometry::Rect) -> Option<Rect> {
        let scale_x = area.width as f32 / game::FIELD_WIDTH;
        let scale_y = area.height as f32 / game::FIELD_HEIGHT;

        let left = (world.x * scale_x).round() as i32;
        let right = ((world.x + world.width) * scale_x).round() as i32;
        let top = (world.y * scale_y).round() as i32;
        let bottom = ((world.y + world.height) * scale_y).round() as i32;

        let left = left.clamp(0, area.width as i32);
        let right = right.clamp(0, area.width as i32);
        let top = top.clamp(0, area.height as i32);
        let bottom = bottom.clamp(0, area.height as i32);

        if left >= right || top >= bottom {
            return None;
        }
        Some(Rect {
            x: area.x + left as u16,
            y: area.y + top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        })
    }

    fn cell_pos(area: Rect, x: f32, y: f32) -> Option<(u16, u16)> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / game::FIELD_WIDTH * area.width as f32).round() as i32;
        let row = (y / game::FIELD_HEIGHT * area.height as f32).round() as i32;
        if col >= area.width as i32 || row >= area.height as i32 {
            return None;
        }
        Some((area.x + col as u16, area.y + row as u16))
    }

    fn draw_obstacles(&self, f: &mut Frame<'_>, area: Rect, state: &RunState) {
        for obstacle in &state.obstacles {
            if let Some(rect) = Self::cell_rect(area, obstacle.rect()) {
                f.render_widget(Block::default().style(Style::default().bg(game::PIPE_COLOR)), rect);

                // Cap row on the gap-facing end, like the upstream pipe art.
                let cap_y = match obstacle.kind {
                    ObstacleKind::Top => rect.bottom().saturating_sub(1),
                    ObstacleKind::Bottom => rect.y,
                };
                let cap = Rect { x: rect.x, y: cap_y, width: rect.width, height: 1 };
                f.render_widget(Block::default().style(Style::default().bg(game::PIPE_CAP_COLOR)), cap);
            }
        }
    }

    fn draw_bird(&self, f: &mut Frame<'_>, area: Rect, state: &RunState) {
        let (width, height) = Sprite::size(game::BIRD_TEXT);
        if let Some((x, y)) = Self::cell_pos(area, state.bird.x, state.bird.y) {
            let rect = Rect { x, y, width, height }.intersection(area);
            f.render_widget(Sprite::new(game::BIRD_TEXT).style(Style::default().fg(game::BIRD_COLOR)), rect);
        }
    }

    fn draw_confetti(&self, f: &mut Frame<'_>, area: Rect, state: &RunState) {
        let buf = f.buffer_mut();
        for particle in &state.confetti {
            if let Some((x, y)) = Self::cell_pos(area, particle.x, particle.y) {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(particle.glyph());
                    cell.set_fg(particle.color);
                }
            }
        }
    }

    fn draw_splash(&self, f: &mut Frame<'_>, area: Rect, state: &RunState) {
        let Some(crash) = state.crash_location else {
            return;
        };
        let (width, height) = Sprite::size(game::SPLASH_TEXT);
        // Centered on the crashed bird, nudged up so it reads above the edge.
        let center_x = crash.x + state.bird.width / 2.0;
        let center_y = (crash.y + state.bird.height / 2.0 - 40.0).min(game::FIELD_HEIGHT - 1.0);
        if let Some((x, y)) = Self::cell_pos(area, center_x, center_y) {
            let rect = Rect {
                x: x.saturating_sub(width / 2).max(area.x),
                y: y.saturating_sub(height / 2).max(area.y),
                width,
                height,
            }
            .intersection(area);
            f.render_widget(Sprite::new(game::SPLASH_TEXT).style(Style::default().fg(game::SPLASH_COLOR)), rect);
        }
    }

    fn draw_score(&self, f: &mut Frame<'_>, area: Rect, state: &RunState) {
        if !state.started && !state.over {
            return;
        }
        let score_area = Rect { x: area.x + 1, y: area.y, width: area.width.saturating_sub(1), height: 1 };
        f.render_widget(
            Paragraph::new(state.display_score().to_string()).style(Style::default().fg(Color::White).bold()),
            score_area,
        );
    }
}

impl Page for GamePage {
    fn id(&self) -> PageId {
        PageId::Game
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

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => return Ok(self.monitor_tick()),
            Action::StartRun | Action::RestartRun => self.begin_run(),
            Action::Game(GameAction::Frame) => self.step_frame(),
            Action::Game(GameAction::SpawnObstacles) => {
                let mut rng = rand::thread_rng();
                spawner::spawn_pair(&mut self.session.state, &mut rng);
            },
            Action::Game(GameAction::Abandon) => {
                self.session.stop();
                self.audio.pause_music();
                return Ok(Some(Action::GoHome));
            },
            Action::Game(GameAction::Restart) => {
                if self.session.state.over {
                    return Ok(Some(Action::RestartRun));
                }
            },
            Action::Game(GameAction::Home) => {
                if self.session.state.over {
                    self.session.stop();
                    return Ok(Some(Action::GoHome));
                }
            },
            _ => {},
        }

        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, rect: Rect) -> Result<()> {
        // Fixed draw order: the app's background block clears the field, then
        // obstacles, bird, score, and the terminal overlays.
        let state = &self.session.state;

        self.draw_obstacles(f, rect, state);
        self.draw_bird(f, rect, state);
        self.draw_score(f, rect, state);

        if state.won {
            self.draw_confetti(f, rect, state);
        } else if state.over && state.show_splash {
            self.draw_splash(f, rect, state);
        }

        Ok(())
    }
}
