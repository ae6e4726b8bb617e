//! Voice-derived control input.
//!
//! The microphone itself is an external collaborator: a capture integration
//! publishes frequency-magnitude frames through a [`SpectrumFeed`], and the
//! game polls the latest frame once per physics frame through
//! [`VoiceControl::sample`].

pub mod analysis;
pub mod capture;

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

pub use crate::voice::capture::{spectrum_channel, SpectrumFeed};

/// How long `initialize` waits for the capture feed to produce its first
/// frame before giving up.
const INIT_TIMEOUT: Duration = Duration::from_secs(3);
const INIT_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceSample {
    /// Normalized loudness; speaking or clapping near the device exceeds 1.0.
    pub volume: f32,
    /// Normalized spectral centroid in [0, 1].
    pub sharpness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceError {
    CaptureUnavailable,
}

impl fmt::Display for VoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceError::CaptureUnavailable => {
                write!(f, "no capture feed produced a spectrum frame in time")
            },
        }
    }
}

impl std::error::Error for VoiceError {}

/// Read side of the voice boundary.
///
/// Cheap to clone; all clones observe the same capture cell and readiness.
#[derive(Clone)]
pub struct VoiceControl {
    cell: Arc<capture::SpectrumCell>,
    ready: Arc<AtomicBool>,
}

impl VoiceControl {
    pub(crate) fn new(cell: Arc<capture::SpectrumCell>) -> Self {
        Self { cell, ready: Arc::new(AtomicBool::new(false)) }
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Waits until the capture feed delivers its first frame. Not retried
    /// automatically anywhere; callers decide when to invoke it again.
    pub async fn initialize(&self) -> Result<(), VoiceError> {
        if self.is_ready() {
            return Ok(());
        }
        let cell = self.cell.clone();
        let wait = async move {
            while !cell.has_frame() {
                tokio::time::sleep(INIT_POLL).await;
            }
        };
        tokio::time::timeout(INIT_TIMEOUT, wait).await.map_err(|_| VoiceError::CaptureUnavailable)?;
        self.ready.store(true, Ordering::Release);
        Ok(())
    }

    /// Latest control sample, or `None` until initialization succeeded.
    pub fn sample(&self) -> Option<VoiceSample> {
        if !self.is_ready() {
            return None;
        }
        self.cell.latest().map(|frame| analysis::analyze(&frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn initialize_times_out_without_feed() {
        let (_feed, voice) = spectrum_channel();
        assert_eq!(voice.initialize().await, Err(VoiceError::CaptureUnavailable));
        assert!(!voice.is_ready());
        assert!(voice.sample().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn initialize_succeeds_once_frames_flow() {
        let (feed, voice) = spectrum_channel();
        feed.publish(&[128; 16]);
        voice.initialize().await.unwrap();
        assert!(voice.is_ready());

        let sample = voice.sample().unwrap();
        assert!((sample.volume - 1.0).abs() < 1e-4);
    }

    #[tokio::test(start_paused = true)]
    async fn sample_is_unavailable_before_initialize() {
        let (feed, voice) = spectrum_channel();
        feed.publish(&[200; 16]);
        // A published frame alone is not enough; the capability must be
        // initialized first.
        assert!(voice.sample().is_none());
    }
}
