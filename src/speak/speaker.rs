//! Speaker — vocalises a summary through the synthesis capability.

use std::sync::Arc;

use crate::config::SpeechConfig;
use crate::speak::synthesis::{SynthesisCapability, Utterance};

/// Fire-and-forget wrapper around a [`SynthesisCapability`].
///
/// Applies the configured rate/pitch/volume to every utterance. A missing
/// synthesis engine makes [`speak`](Speaker::speak) a logged no-op rather
/// than an error — the pipeline still completes.
pub struct Speaker {
    synthesis: Arc<dyn SynthesisCapability>,
    config: SpeechConfig,
}

impl Speaker {
    pub fn new(synthesis: Arc<dyn SynthesisCapability>, config: SpeechConfig) -> Self {
        Self { synthesis, config }
    }

    /// Queue `text` for synthesis. Never fails and never blocks on the
    /// engine.
    pub fn speak(&self, text: &str) {
        if !self.synthesis.is_available() {
            log::debug!("speaker: synthesis unavailable, skipping utterance");
            return;
        }

        log::debug!("speaker: enqueueing {} chars", text.len());
        self.synthesis.enqueue(Utterance {
            text: text.to_string(),
            rate: self.config.rate,
            pitch: self.config.pitch,
            volume: self.config.volume,
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
