//! Sound cues and background music.
//!
//! All playback runs on a dedicated audio thread commanded over a channel, so
//! the game loop can fire a cue without ever blocking. Cues are synthesized
//! sine segments; there are no asset files.

mod thread;

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use crossbeam_channel::{unbounded, Sender};
use strum::Display;

/// Named one-shot cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CueId {
    Wing,
    Point,
    Hit,
    Die,
    Win,
}

#[derive(Debug, Clone)]
pub(crate) enum AudioCommand {
    Cue(CueId),
    PlayMusic,
    PauseMusic,
    SetMuted(bool),
}

/// Handle for controlling audio from the game side. Clones share the command
/// channel and the global mute flag.
#[derive(Clone)]
pub struct AudioManager {
    cmd_tx: Sender<AudioCommand>,
    muted: Arc<AtomicBool>,
}

impl AudioManager {
    /// Spawns the audio thread and returns its control handle.
    pub fn start() -> Self {
        let (cmd_tx, cmd_rx) = unbounded();
        let muted = Arc::new(AtomicBool::new(false));
        thread::start_audio_thread(cmd_rx, muted.clone());
        Self { cmd_tx, muted }
    }

    pub fn cue(&self, id: CueId) {
        let _ = self.cmd_tx.send(AudioCommand::Cue(id));
    }

    /// Fires a cue after a delay without blocking the caller.
    pub fn cue_after(&self, id: CueId, delay: Duration) {
        let tx = self.cmd_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(AudioCommand::Cue(id));
        });
    }

    pub fn play_music(&self) {
        let _ = self.cmd_tx.send(AudioCommand::PlayMusic);
    }

    pub fn pause_music(&self) {
        let _ = self.cmd_tx.send(AudioCommand::PauseMusic);
    }

    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    /// Flips the global mute flag and returns the new value.
    pub fn toggle_mute(&self) -> bool {
        let muted = !self.is_muted();
        self.muted.store(muted, Ordering::Relaxed);
        let _ = self.cmd_tx.send(AudioCommand::SetMuted(muted));
        muted
    }
}
