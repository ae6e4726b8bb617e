use std::sync::{Arc, Mutex};

use crate::voice::VoiceControl;

/// Latest-frame mailbox between a capture device thread and the game loop.
/// Only the newest frame is kept; the loop never replays history.
#[derive(Debug, Default)]
pub(crate) struct SpectrumCell {
    frame: Mutex<Option<Box<[u8]>>>,
}

impl SpectrumCell {
    pub(crate) fn publish(&self, spectrum: &[u8]) {
        let mut slot = self.frame.lock().unwrap();
        *slot = Some(spectrum.into());
    }

    pub(crate) fn latest(&self) -> Option<Box<[u8]>> {
        self.frame.lock().unwrap().clone()
    }

    pub(crate) fn has_frame(&self) -> bool {
        self.frame.lock().unwrap().is_some()
    }
}

/// Write side of the voice boundary, handed to the capture integration.
/// Publish one frequency-magnitude frame per analysis window.
#[derive(Clone)]
pub struct SpectrumFeed {
    cell: Arc<SpectrumCell>,
}

impl SpectrumFeed {
    pub fn publish(&self, spectrum: &[u8]) {
        self.cell.publish(spectrum);
    }
}

pub fn spectrum_channel() -> (SpectrumFeed, VoiceControl) {
    let cell = Arc::new(SpectrumCell::default());
    (SpectrumFeed { cell: cell.clone() }, VoiceControl::new(cell))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_keeps_only_the_newest_frame() {
        let cell = SpectrumCell::default();
        assert!(!cell.has_frame());

        cell.publish(&[1, 2, 3]);
        cell.publish(&[4, 5, 6]);

        assert_eq!(cell.latest().unwrap().as_ref(), &[4, 5, 6]);
    }
}
