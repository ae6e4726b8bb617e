use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, Deserialize)]
pub enum GameAction {
    /// One physics step, sent by the session's frame driver.
    Frame,
    /// Sent by the session's spawn timer.
    SpawnObstacles,
    Abandon,
    Restart,
    Home,
}
