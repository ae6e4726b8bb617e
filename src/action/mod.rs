mod game;
mod home;

use serde::Deserialize;
use strum::Display;

pub use crate::action::game::GameAction;
pub use crate::action::home::HomeAction;

#[derive(Debug, Clone, PartialEq, Eq, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    ToggleShowHelp,
    ToggleMute,
    StartRun,
    RestartRun,
    GoHome,
    ShowGameOver(u32),
    ShowVictory(u32),
    RecordScore(u32),
    // Page actions
    Home(HomeAction),
    Game(GameAction),
}
