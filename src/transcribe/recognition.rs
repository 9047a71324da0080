//! Speech-recognition capability contract.
//!
//! Recognition is an external collaborator: engines are configured once per
//! session with a locale and listening flags, aggregate whatever they hear
//! while the session is open, and hand back the final transcript when the
//! session is stopped. Availability must be feature-detected up front —
//! absence is a defined failure, never a crash.

use async_trait::async_trait;
use thiserror::Error;

// ---------------------------------------------------------------------------
// RecognitionError
// ---------------------------------------------------------------------------

/// Errors reported by a recognition capability.
#[derive(Debug, Clone, Error)]
pub enum RecognitionError {
    /// The environment provides no recognition engine at all.
    #[error("speech recognition is not supported in this environment")]
    Unsupported,

    /// The engine reported an internal error while listening.
    #[error("speech recognition failed: {0}")]
    Failed(String),
}

// ---------------------------------------------------------------------------
// RecognitionConfig
// ---------------------------------------------------------------------------

/// Per-session engine configuration.
///
/// The pipeline always listens continuously for the full playback window and
/// never consumes interim results, so [`for_locale`](Self::for_locale) pins
/// `continuous = true` and `interim_results = false`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionConfig {
    /// BCP-47 locale tag the engine should recognise (e.g. `"en-US"`).
    pub locale: String,
    /// Keep listening across pauses instead of finalising at the first one.
    pub continuous: bool,
    /// Emit partial hypotheses while listening.
    pub interim_results: bool,
}

impl RecognitionConfig {
    /// Session config for `locale` with the pipeline's fixed listening flags.
    pub fn for_locale(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            continuous: true,
            interim_results: false,
        }
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self::for_locale("en-US")
    }
}

// ---------------------------------------------------------------------------
// RecognitionCapability / RecognitionSession
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface to a speech-recognition engine.
#[async_trait]
pub trait RecognitionCapability: Send + Sync {
    /// Feature detection. When `false`, [`start`](Self::start) must not be
    /// called; the transcriber surfaces
    /// [`RecognitionUnsupported`](crate::transcribe::TranscribeError::RecognitionUnsupported)
    /// instead.
    fn is_available(&self) -> bool;

    /// Begin a listening session.
    async fn start(
        &self,
        config: &RecognitionConfig,
    ) -> Result<Box<dyn RecognitionSession>, RecognitionError>;
}

/// One open listening session.
///
/// Dropping a session without stopping it abandons interest in its result;
/// the engine's own cleanup is its responsibility.
#[async_trait]
pub trait RecognitionSession: Send {
    /// Stop listening and return the transcript aggregated so far.
    ///
    /// An empty transcript is a success — recognition that heard nothing is
    /// not an error.
    async fn stop(self: Box<Self>) -> Result<String, RecognitionError>;
}

// Compile-time assertion: Box<dyn RecognitionCapability> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn RecognitionCapability>) {}
};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
