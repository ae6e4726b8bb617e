//! Run lifecycle orchestration.
//!
//! The session owns the run state together with the two scheduled tasks that
//! drive it: the frame driver (one `GameAction::Frame` per display refresh)
//! and the obstacle spawn timer (one `GameAction::SpawnObstacles` every
//! 2.7 s). Both tasks only send actions into the app's serialized channel, so
//! every state mutation still happens in one place.

use std::time::Duration;

use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle, time};

use crate::{
    action::{Action, GameAction},
    constants::game,
    game::types::RunState,
};

pub struct GameSession {
    pub state: RunState,
    spawn_timer: Option<JoinHandle<()>>,
    frame_driver: Option<JoinHandle<()>>,
}

impl GameSession {
    pub fn new() -> Self {
        Self { state: RunState::new(), spawn_timer: None, frame_driver: None }
    }

    /// Begins a run. No-op if one is already in progress. The bird gets a
    /// stronger one-time impulse so it does not immediately fall.
    pub fn start(&mut self, action_tx: UnboundedSender<Action>, frame_period: Duration) {
        if self.state.started {
            return;
        }
        self.state.started = true;
        self.state.bird.velocity = game::INITIAL_VELOCITY * game::START_IMPULSE_FACTOR;

        let tx = action_tx.clone();
        self.spawn_timer = Some(tokio::spawn(async move {
            let first = time::Instant::now() + game::SPAWN_PERIOD;
            let mut interval = time::interval_at(first, game::SPAWN_PERIOD);
            loop {
                interval.tick().await;
                if tx.send(Action::Game(GameAction::SpawnObstacles)).is_err() {
                    break;
                }
            }
        }));

        if self.frame_driver.is_none() {
            self.frame_driver = Some(tokio::spawn(async move {
                let mut interval = time::interval(frame_period);
                loop {
                    interval.tick().await;
                    if action_tx.send(Action::Game(GameAction::Frame)).is_err() {
                        break;
                    }
                }
            }));
        }
    }

    /// Cancels the spawn timer alone; the frame driver keeps running so the
    /// terminal frame (splash, confetti) continues to render.
    pub fn halt_spawning(&mut self) {
        if let Some(timer) = self.spawn_timer.take() {
            timer.abort();
        }
    }

    /// Cancels both tasks and restores the run state to its initial values.
    pub fn reset(&mut self) {
        self.cancel_tasks();
        self.state.reset();
    }

    /// Marks the run inactive and cancels both tasks, leaving state fields as
    /// they are.
    pub fn stop(&mut self) {
        self.state.started = false;
        self.cancel_tasks();
    }

    fn cancel_tasks(&mut self) {
        if let Some(timer) = self.spawn_timer.take() {
            timer.abort();
        }
        if let Some(driver) = self.frame_driver.take() {
            driver.abort();
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.cancel_tasks();
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    const FRAME_PERIOD: Duration = Duration::from_millis(16);

    #[tokio::test(start_paused = true)]
    async fn start_drives_frames_and_spawns() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = GameSession::new();
        session.start(tx, FRAME_PERIOD);

        assert!(session.state.started);
        assert_eq!(session.state.bird.velocity, game::INITIAL_VELOCITY * game::START_IMPULSE_FACTOR);

        let mut saw_frame = false;
        loop {
            match rx.recv().await.expect("channel open") {
                Action::Game(GameAction::Frame) => saw_frame = true,
                Action::Game(GameAction::SpawnObstacles) => break,
                _ => {},
            }
        }
        assert!(saw_frame, "frames arrive before the first spawn");
    }

    #[tokio::test(start_paused = true)]
    async fn start_is_idempotent_while_running() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut session = GameSession::new();
        session.start(tx.clone(), FRAME_PERIOD);
        session.state.bird.velocity = 1.0;

        session.start(tx, FRAME_PERIOD);

        // A second start must not re-apply the impulse.
        assert_eq!(session.state.bird.velocity, 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_returns_to_initial_values() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut session = GameSession::new();
        session.start(tx, FRAME_PERIOD);
        session.state.score = 1.5;
        session.state.over = true;

        session.reset();

        assert!(!session.state.started);
        assert!(!session.state.over);
        assert_eq!(session.state.score, 0.0);
        assert!(session.spawn_timer.is_none());
        assert!(session.frame_driver.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_preserves_state_fields() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut session = GameSession::new();
        session.start(tx, FRAME_PERIOD);
        session.state.score = 1.0;

        session.stop();

        assert!(!session.state.started);
        assert_eq!(session.state.score, 1.0, "stop does not reset fields");
        assert!(session.spawn_timer.is_none());
        assert!(session.frame_driver.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn halt_spawning_keeps_the_frame_driver() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = GameSession::new();
        session.start(tx, FRAME_PERIOD);

        session.halt_spawning();
        assert!(session.spawn_timer.is_none());
        assert!(session.frame_driver.is_some());

        // Frames keep flowing.
        loop {
            if let Action::Game(GameAction::Frame) = rx.recv().await.expect("channel open") {
                break;
            }
        }
    }
}
