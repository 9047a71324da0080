//! Recording lifecycle — drives a [`CaptureCapability`] and assembles the
//! captured fragments into one [`AudioSource`].
//!
//! The capability delivers fragments on a channel from its callback context;
//! [`Recorder::begin`] spawns a run-scoped accumulator task that collects
//! them in order, and [`Recorder::end`] stops the stream, waits for the
//! accumulator to drain, and concatenates everything into a single payload.
//! The in-progress buffer belongs to the recorder only until `end` emits the
//! finished source; it is discarded with the accumulator after that.

use std::sync::Arc;

use crate::audio::capture::{CaptureCapability, CaptureConstraints, CaptureError, CaptureHandle};
use crate::audio::source::{AudioFragment, AudioSource};

// ---------------------------------------------------------------------------
// Recorder
// ---------------------------------------------------------------------------

/// Start/stop lifecycle around one capture capability.
///
/// The physical device is held exclusively between a successful
/// [`begin`](Recorder::begin) and the matching [`end`](Recorder::end);
/// `begin` while already recording is refused without touching the device.
pub struct Recorder {
    capture: Arc<dyn CaptureCapability>,
    active: Option<ActiveCapture>,
}

/// Run-scoped state for one in-progress recording.
struct ActiveCapture {
    handle: Box<dyn CaptureHandle>,
    accumulator: tokio::task::JoinHandle<Vec<AudioFragment>>,
    media_type: String,
}

impl Recorder {
    pub fn new(capture: Arc<dyn CaptureCapability>) -> Self {
        Self {
            capture,
            active: None,
        }
    }

    /// `true` while a capture stream is open.
    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    /// Acquire the capture device and start buffering fragments.
    ///
    /// # Errors
    ///
    /// [`CaptureError::Unavailable`] when the device cannot be acquired or a
    /// recording is already in progress. No state is changed on failure.
    pub async fn begin(&mut self, constraints: &CaptureConstraints) -> Result<(), CaptureError> {
        if self.active.is_some() {
            return Err(CaptureError::Unavailable(
                "a recording is already in progress".into(),
            ));
        }

        let opened = self.capture.open(constraints).await?;
        log::debug!("recorder: capture open ({})", opened.media_type);

        let mut rx = opened.fragments;
        let accumulator = tokio::spawn(async move {
            let mut fragments = Vec::new();
            while let Some(fragment) = rx.recv().await {
                fragments.push(fragment);
            }
            fragments
        });

        self.active = Some(ActiveCapture {
            handle: opened.handle,
            accumulator,
            media_type: opened.media_type,
        });
        Ok(())
    }

    /// Stop capturing and assemble the buffered fragments into one
    /// [`AudioSource`].
    ///
    /// Returns `None` (a no-op) when no recording is in progress. A stop
    /// that captured zero fragments still yields a valid, empty source.
    pub async fn end(&mut self) -> Option<AudioSource> {
        let active = self.active.take()?;

        // Releasing the device closes the fragment channel, which lets the
        // accumulator task run to completion.
        active.handle.stop().await;

        let fragments = match active.accumulator.await {
            Ok(fragments) => fragments,
            Err(e) => {
                log::warn!("recorder: fragment accumulator failed: {e}");
                Vec::new()
            }
        };

        let source = AudioSource::from_fragments(fragments, active.media_type);
        log::debug!(
            "recorder: assembled {} bytes of {}",
            source.len(),
            source.media_type()
        );
        Some(source)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
