//! Playback capability contract.
//!
//! Recognition engines in this design listen to a live audio stream rather
//! than a static file, so transcription works by playing the clip out loud
//! while the engine listens. The playback capability is the collaborator
//! that performs that playback; its `play` future resolves when the clip
//! has finished playing, which is the transcriber's completion signal.

use async_trait::async_trait;
use thiserror::Error;

use crate::audio::AudioSource;

/// Errors raised while playing a clip back.
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    /// The clip could not be decoded or routed to an output device.
    #[error("audio playback failed: {0}")]
    Failed(String),
}

/// Object-safe, thread-safe interface to an audio playback backend.
#[async_trait]
pub trait PlaybackCapability: Send + Sync {
    /// Play `source` to completion.
    ///
    /// Must not resolve before the clip has finished playing — the
    /// transcriber stops its recognition session the moment this returns.
    async fn play(&self, source: &AudioSource) -> Result<(), PlaybackError>;
}

// Compile-time assertion: Box<dyn PlaybackCapability> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn PlaybackCapability>) {}
};
