//! Pipeline state machine and the shared run state.
//!
//! [`PipelineState`] drives the controller's state machine. The presentation
//! layer reads it via [`SharedState`] to render the appropriate view.
//!
//! [`RunState`] is the single source of truth for everything an observer
//! needs: current pipeline phase, the active audio source, the transcript
//! and summary of the current run, and any error message.
//!
//! [`SharedState`] is a type alias for `Arc<Mutex<RunState>>` — cheap to
//! clone and safe to share across threads.

use std::sync::{Arc, Mutex};

use crate::audio::AudioSource;

// ---------------------------------------------------------------------------
// PipelineState
// ---------------------------------------------------------------------------

/// States of the audio-to-summary pipeline.
///
/// The state machine transitions are:
///
/// ```text
/// Idle ──begin() ok────────▶ Recording ──end()──▶ Ready
/// Idle ──upload ok─────────▶ Ready
/// Ready ──run()────────────▶ Processing
/// Processing ──pipeline ok─▶ Done
/// Processing ──error───────▶ Failed
/// Done / Failed ──begin()/upload──▶ Recording / Ready  (prior run discarded)
/// ```
///
/// Exactly one state is active at a time; only the
/// [`PipelineController`](crate::pipeline::PipelineController) transitions
/// it.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    /// Nothing captured or uploaded yet.
    Idle,

    /// The capture device is held; fragments are being buffered.
    Recording,

    /// An [`AudioSource`] is present and the pipeline can be run.
    Ready,

    /// Transcription and summarisation are in flight.
    Processing,

    /// The summary is available and synthesis has been scheduled.
    Done,

    /// Transcription (or an earlier step) failed. A new recording or upload
    /// restarts the pipeline.
    Failed,
}

impl PipelineState {
    /// `true` while the pipeline holds a device or is mid-run — states in
    /// which new input is rejected.
    ///
    /// ```
    /// use voicebrief::pipeline::PipelineState;
    ///
    /// assert!(!PipelineState::Idle.is_busy());
    /// assert!(PipelineState::Recording.is_busy());
    /// assert!(!PipelineState::Ready.is_busy());
    /// assert!(PipelineState::Processing.is_busy());
    /// assert!(!PipelineState::Done.is_busy());
    /// assert!(!PipelineState::Failed.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, PipelineState::Recording | PipelineState::Processing)
    }

    /// `true` when a new recording or upload may start from this state.
    ///
    /// A pending `Ready` source may be replaced before it is run; `Done` and
    /// `Failed` accept fresh input, discarding the prior run.
    pub fn accepts_new_input(&self) -> bool {
        !self.is_busy()
    }

    /// A short human-readable label suitable for a status display.
    pub fn label(&self) -> &'static str {
        match self {
            PipelineState::Idle => "Idle",
            PipelineState::Recording => "Recording",
            PipelineState::Ready => "Ready",
            PipelineState::Processing => "Processing",
            PipelineState::Done => "Done",
            PipelineState::Failed => "Failed",
        }
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        PipelineState::Idle
    }
}

// ---------------------------------------------------------------------------
// RunState
// ---------------------------------------------------------------------------

/// Shared run state — the single source of truth for observers.
///
/// Held behind [`SharedState`] (`Arc<Mutex<RunState>>`). The pipeline
/// controller mutates it; the presentation layer reads it to re-render.
#[derive(Debug, Default)]
pub struct RunState {
    /// Current phase of the pipeline.
    pub phase: PipelineState,

    /// The active audio clip for this run.
    ///
    /// `Some` from `Ready` onwards; replaced as a unit when a new run
    /// starts.
    pub source: Option<AudioSource>,

    /// Recognised text of the current run.
    ///
    /// `None` until transcription completes; `Some` (possibly empty) after a
    /// successful transcription. Cleared on failure.
    pub transcript: Option<String>,

    /// Highlight phrase derived from the transcript.
    ///
    /// `None` until summarisation completes. Cleared on failure.
    pub summary: Option<String>,

    /// Error message to display when `phase == PipelineState::Failed`.
    pub error_message: Option<String>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the prior run's source, transcript, summary and error as a
    /// unit. The phase is set separately by the controller.
    pub fn reset_run(&mut self) {
        self.source = None;
        self.transcript = None;
        self.summary = None;
        self.error_message = None;
    }
}

// ---------------------------------------------------------------------------
// SharedState
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`RunState`].
///
/// Cheap to clone (`Arc` clone). Lock with `.lock().unwrap()` for a short
/// critical section; do **not** hold the lock across `.await` points.
pub type SharedState = Arc<Mutex<RunState>>;

/// Construct a new [`SharedState`] wrapping a default [`RunState`].
pub fn new_shared_state() -> SharedState {
    Arc::new(Mutex::new(RunState::new()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
