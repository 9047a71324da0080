//! Transcription — derives text from an [`AudioSource`](crate::audio::AudioSource)
//! by playing it back while an external recognition engine listens.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                     Transcriber                        │
//! │                                                        │
//! │  RecognitionCapability::start ──▶ session listening     │
//! │  PlaybackCapability::play     ──▶ clip plays out loud  │
//! │        (resolves at playback end)                      │
//! │  session.stop()               ──▶ aggregated transcript │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! Completion is coupled to playback, not to the engine's own end-of-input —
//! see the truncation note on [`transcriber`].

pub mod playback;
pub mod recognition;
pub mod transcriber;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use playback::{PlaybackCapability, PlaybackError};
pub use recognition::{
    RecognitionCapability, RecognitionConfig, RecognitionError, RecognitionSession,
};
pub use transcriber::{TranscribeError, Transcriber};
