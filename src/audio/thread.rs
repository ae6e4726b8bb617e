//! Dedicated audio thread.
//!
//! Owns the output device and every sink. Runs in silent mode when no device
//! is available so the game keeps working on headless machines.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use crossbeam_channel::Receiver;
use rodio::{
    source::{SineWave, Source},
    OutputStream, OutputStreamHandle, Sink,
};

use crate::audio::{AudioCommand, CueId};

const MUSIC_VOLUME: f32 = 0.2;
/// Repetitions of the background motif appended up front; enough for well
/// over an hour of play.
const MUSIC_REPEATS: usize = 400;

struct AudioWorker {
    _stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
    music: Option<Sink>,
    muted: Arc<AtomicBool>,
}

impl AudioWorker {
    fn new(muted: Arc<AtomicBool>) -> Self {
        match OutputStream::try_default() {
            Ok((_stream, stream_handle)) => {
                log::info!("AUDIO: device found, audio enabled");
                Self { _stream: Some(_stream), stream_handle: Some(stream_handle), music: None, muted }
            },
            Err(e) => {
                log::warn!("AUDIO: no audio device found ({}), running in silent mode", e);
                Self { _stream: None, stream_handle: None, music: None, muted }
            },
        }
    }

    fn handle_command(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Cue(id) => {
                if !self.muted.load(Ordering::Relaxed) {
                    self.play_cue(id);
                }
            },
            AudioCommand::PlayMusic => {
                self.ensure_music();
                if let Some(music) = &self.music {
                    music.play();
                }
            },
            AudioCommand::PauseMusic => {
                if let Some(music) = &self.music {
                    music.pause();
                }
            },
            AudioCommand::SetMuted(muted) => {
                // Cues are gated at dispatch; music keeps running silently.
                if let Some(music) = &self.music {
                    music.set_volume(if muted { 0.0 } else { MUSIC_VOLUME });
                }
            },
        }
    }

    fn play_cue(&self, id: CueId) {
        let Some(stream_handle) = &self.stream_handle else {
            return;
        };
        let Ok(sink) = Sink::try_new(stream_handle) else {
            log::error!("AUDIO: failed to create cue sink");
            return;
        };
        for &(freq, millis, amplitude) in cue_notes(id) {
            sink.append(SineWave::new(freq).take_duration(Duration::from_millis(millis)).amplify(amplitude));
        }
        sink.detach();
    }

    fn ensure_music(&mut self) {
        if self.music.is_some() {
            return;
        }
        let Some(stream_handle) = &self.stream_handle else {
            return;
        };
        let Ok(sink) = Sink::try_new(stream_handle) else {
            log::error!("AUDIO: failed to create music sink");
            return;
        };
        sink.set_volume(if self.muted.load(Ordering::Relaxed) { 0.0 } else { MUSIC_VOLUME });
        for _ in 0..MUSIC_REPEATS {
            for &(freq, millis) in MUSIC_MOTIF {
                sink.append(SineWave::new(freq).take_duration(Duration::from_millis(millis)).amplify(0.5));
            }
        }
        sink.pause();
        self.music = Some(sink);
    }
}

/// (frequency Hz, duration ms, amplitude) segments per cue.
fn cue_notes(id: CueId) -> &'static [(f32, u64, f32)] {
    match id {
        CueId::Wing => &[(700.0, 40, 0.10), (950.0, 50, 0.10)],
        CueId::Point => &[(1320.0, 90, 0.15)],
        CueId::Hit => &[(220.0, 80, 0.25), (160.0, 120, 0.25)],
        CueId::Die => &[(600.0, 90, 0.20), (450.0, 90, 0.20), (300.0, 90, 0.20), (200.0, 140, 0.20)],
        CueId::Win => &[(523.25, 140, 0.20), (659.25, 140, 0.20), (783.99, 140, 0.20), (1046.5, 260, 0.20)],
    }
}

const MUSIC_MOTIF: &[(f32, u64)] =
    &[(392.0, 300), (440.0, 300), (493.88, 300), (523.25, 450), (493.88, 300), (440.0, 450)];

pub(crate) fn start_audio_thread(cmd_rx: Receiver<AudioCommand>, muted: Arc<AtomicBool>) {
    thread::Builder::new()
        .name("audio".to_string())
        .spawn(move || {
            log::info!("AUDIO: thread started");

            let mut worker = AudioWorker::new(muted);

            while let Ok(cmd) = cmd_rx.recv() {
                worker.handle_command(cmd);
            }

            log::info!("AUDIO: thread stopped");
        })
        .expect("Failed to spawn audio thread");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cue_has_notes() {
        for id in [CueId::Wing, CueId::Point, CueId::Hit, CueId::Die, CueId::Win] {
            assert!(!cue_notes(id).is_empty());
        }
    }

    #[test]
    fn die_cue_descends() {
        let notes = cue_notes(CueId::Die);
        for pair in notes.windows(2) {
            assert!(pair[0].0 > pair[1].0);
        }
    }
}
