//! Speech-synthesis capability contract.
//!
//! Synthesis is fire-and-forget: the pipeline enqueues an utterance and
//! never consumes a completion signal, so the trait is synchronous and
//! returns nothing. Backends queue the request and render it on their own
//! schedule.

/// One queued synthesis request: the text plus fixed voice parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Text to vocalise.
    pub text: String,
    /// Speaking rate multiplier (1.0 = engine default).
    pub rate: f32,
    /// Voice pitch multiplier (1.0 = engine default).
    pub pitch: f32,
    /// Output volume in `[0.0, 1.0]`.
    pub volume: f32,
}

/// Object-safe, thread-safe interface to a speech-synthesis engine.
pub trait SynthesisCapability: Send + Sync {
    /// Feature detection. When `false`, [`enqueue`](Self::enqueue) is never
    /// called — a missing engine silently downgrades speaking to a no-op.
    fn is_available(&self) -> bool;

    /// Queue `utterance` for rendering. No result is reported back.
    fn enqueue(&self, utterance: Utterance);
}

// Compile-time assertion: Box<dyn SynthesisCapability> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SynthesisCapability>) {}
};
