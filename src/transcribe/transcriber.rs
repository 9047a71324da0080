//! Transcription driver — plays an [`AudioSource`] while a recognition
//! session listens, then stops the session and collects the text.
//!
//! Completion is coupled to playback duration rather than to the engine's
//! own end-of-input signal: the session is stopped explicitly when playback
//! ends. A transcript can therefore never cover more speech than one
//! playback's worth, and a clip whose recognition finalises early (trailing
//! silence, slow engine start) yields a complete but possibly truncated
//! transcript.

use std::sync::Arc;

use thiserror::Error;

use crate::audio::AudioSource;
use crate::transcribe::playback::PlaybackCapability;
use crate::transcribe::recognition::{
    RecognitionCapability, RecognitionConfig, RecognitionError,
};

// ---------------------------------------------------------------------------
// TranscribeError
// ---------------------------------------------------------------------------

/// Errors surfaced by [`Transcriber::transcribe`].
#[derive(Debug, Clone, Error)]
pub enum TranscribeError {
    /// No recognition engine exists in this environment. Not recoverable
    /// without a different environment.
    #[error("speech recognition is not supported in this environment")]
    RecognitionUnsupported,

    /// The engine (or the playback it listens to) reported an error during
    /// the listening window. Recoverable by re-recording.
    #[error("speech recognition failed: {0}")]
    RecognitionFailed(String),
}

impl From<RecognitionError> for TranscribeError {
    fn from(e: RecognitionError) -> Self {
        match e {
            RecognitionError::Unsupported => TranscribeError::RecognitionUnsupported,
            RecognitionError::Failed(msg) => TranscribeError::RecognitionFailed(msg),
        }
    }
}

// ---------------------------------------------------------------------------
// Transcriber
// ---------------------------------------------------------------------------

/// Derives a transcript from one audio clip.
///
/// Holds the recognition and playback capabilities behind `Arc<dyn …>` so a
/// single transcriber can serve every pipeline run.
pub struct Transcriber {
    recognition: Arc<dyn RecognitionCapability>,
    playback: Arc<dyn PlaybackCapability>,
    config: RecognitionConfig,
}

impl Transcriber {
    pub fn new(
        recognition: Arc<dyn RecognitionCapability>,
        playback: Arc<dyn PlaybackCapability>,
        config: RecognitionConfig,
    ) -> Self {
        Self {
            recognition,
            playback,
            config,
        }
    }

    /// Transcribe `source`.
    ///
    /// Feature-detects the engine, opens a session, plays the clip while the
    /// engine listens, then stops the session at playback end and returns
    /// whatever text the engine aggregated. An empty string is a valid
    /// transcript.
    ///
    /// # Errors
    ///
    /// - [`TranscribeError::RecognitionUnsupported`] — no engine available.
    /// - [`TranscribeError::RecognitionFailed`] — session start, playback,
    ///   or listening failed.
    pub async fn transcribe(&self, source: &AudioSource) -> Result<String, TranscribeError> {
        if !self.recognition.is_available() {
            return Err(TranscribeError::RecognitionUnsupported);
        }

        log::debug!(
            "transcriber: starting session ({}, {} bytes of {})",
            self.config.locale,
            source.len(),
            source.media_type()
        );

        let session = self.recognition.start(&self.config).await?;

        // The engine listens while the clip plays. A playback failure
        // abandons the session (dropping it discards interest in any
        // partial result).
        if let Err(e) = self.playback.play(source).await {
            return Err(TranscribeError::RecognitionFailed(e.to_string()));
        }

        // Playback ended — stop listening now, not at the engine's own
        // end-of-input.
        let text = session.stop().await?;
        log::debug!("transcriber: session closed, {} chars", text.len());
        Ok(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
