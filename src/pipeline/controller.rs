//! Pipeline controller — sequences capture/upload → transcription →
//! summarisation → synthesis and owns every state transition.
//!
//! # Pipeline flow
//!
//! ```text
//! begin_recording() ─▶ Recorder.begin            [Recording]
//! end_recording()   ─▶ Recorder.end → AudioSource [Ready]
//! ingest_upload()   ─▶ validate, AudioSource      [Ready]
//!
//! run()                                           [Processing]
//!   ├─ Transcriber.transcribe(source)  (awaited)
//!   ├─ summarize(transcript)           (pure, cannot fail)
//!   ├─ tokio::spawn(sleep → Speaker.speak)  — never awaited
//!   └─ Done   (or Failed, clearing transcript + summary)
//! ```
//!
//! All operations take `&mut self` and run on one logical control flow, so
//! two `run()` calls can never overlap; the `Ready` guard additionally
//! rejects a `run()` in any other phase without touching the state.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::audio::{
    is_audio_media_type, AudioSource, CaptureCapability, CaptureConstraints, CaptureError,
    Recorder,
};
use crate::config::AppConfig;
use crate::speak::{Speaker, SynthesisCapability};
use crate::summarize::summarize;
use crate::transcribe::{
    PlaybackCapability, RecognitionCapability, RecognitionConfig, TranscribeError, Transcriber,
};

use super::state::{new_shared_state, PipelineState, SharedState};

// ---------------------------------------------------------------------------
// PipelineError
// ---------------------------------------------------------------------------

/// Errors surfaced at the pipeline boundary.
///
/// Every variant carries a human-readable description so the presentation
/// layer can notify the user without knowing the internal cause.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// The capture device was denied or is missing. State is unchanged;
    /// retry or upload instead.
    #[error("audio capture unavailable: {0}")]
    CaptureUnavailable(String),

    /// The uploaded payload does not declare an audio media type. State is
    /// unchanged; pick another file.
    #[error("uploaded payload is not audio (declared type: {0:?})")]
    InvalidInput(String),

    /// Transcription failed; the run moved to `Failed` with transcript and
    /// summary cleared.
    #[error(transparent)]
    Transcribe(#[from] TranscribeError),

    /// A recording or a run is in flight; new input was rejected without a
    /// transition.
    #[error("pipeline is busy — stop the recording or wait for processing to finish")]
    Busy,

    /// `run()` was invoked outside `Ready`; rejected without a transition.
    #[error("pipeline is not ready — record or upload audio first")]
    NotReady,
}

impl PipelineError {
    /// `true` when the user can recover by retrying within the same
    /// environment (re-record, re-upload, or simply wait). Only a missing
    /// recognition engine is unrecoverable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            PipelineError::Transcribe(TranscribeError::RecognitionUnsupported)
        )
    }
}

// ---------------------------------------------------------------------------
// PipelineController
// ---------------------------------------------------------------------------

/// Owns the state machine and orchestrates recorder, transcriber, summariser
/// and speaker in sequence.
///
/// The controller is the only component that transitions [`PipelineState`]
/// and the exclusive owner of the current source/transcript/summary; a new
/// accepted recording or upload replaces all of them as a unit. Observers
/// read them through [`shared_state`](Self::shared_state).
pub struct PipelineController {
    state: SharedState,
    recorder: Recorder,
    transcriber: Arc<Transcriber>,
    speaker: Arc<Speaker>,
    config: AppConfig,
    speak_task: Option<JoinHandle<()>>,
}

impl PipelineController {
    /// Wire a controller from its four capability seams.
    pub fn new(
        config: AppConfig,
        capture: Arc<dyn CaptureCapability>,
        recognition: Arc<dyn RecognitionCapability>,
        playback: Arc<dyn PlaybackCapability>,
        synthesis: Arc<dyn SynthesisCapability>,
    ) -> Self {
        let recorder = Recorder::new(capture);
        let transcriber = Arc::new(Transcriber::new(
            recognition,
            playback,
            RecognitionConfig::for_locale(&config.locale),
        ));
        let speaker = Arc::new(Speaker::new(synthesis, config.speech.clone()));

        Self {
            state: new_shared_state(),
            recorder,
            transcriber,
            speaker,
            config,
            speak_task: None,
        }
    }

    /// Handle observers use to read phase, transcript and summary.
    pub fn shared_state(&self) -> SharedState {
        Arc::clone(&self.state)
    }

    /// Current phase (convenience over [`shared_state`](Self::shared_state)).
    pub fn phase(&self) -> PipelineState {
        self.state.lock().unwrap().phase.clone()
    }

    // -----------------------------------------------------------------------
    // Input operations
    // -----------------------------------------------------------------------

    /// Acquire the capture device and enter `Recording`, discarding any
    /// prior run.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Busy`] while `Recording` or `Processing`.
    /// - [`PipelineError::CaptureUnavailable`] when the device is denied or
    ///   missing — the state is left unchanged.
    pub async fn begin_recording(&mut self) -> Result<(), PipelineError> {
        {
            let st = self.state.lock().unwrap();
            if !st.phase.accepts_new_input() {
                return Err(PipelineError::Busy);
            }
        }

        let constraints = CaptureConstraints {
            sample_rate: self.config.capture.sample_rate,
            channels: self.config.capture.channels,
        };

        self.recorder.begin(&constraints).await.map_err(|e| {
            let CaptureError::Unavailable(msg) = e;
            log::warn!("pipeline: capture unavailable: {msg}");
            PipelineError::CaptureUnavailable(msg)
        })?;

        let mut st = self.state.lock().unwrap();
        st.reset_run();
        st.phase = PipelineState::Recording;
        log::debug!("pipeline: → Recording");
        Ok(())
    }

    /// Stop the recording, assemble the captured [`AudioSource`] and enter
    /// `Ready`. A no-op (state untouched) when not `Recording`.
    pub async fn end_recording(&mut self) -> Result<(), PipelineError> {
        let Some(source) = self.recorder.end().await else {
            log::debug!("pipeline: end_recording outside Recording — no-op");
            return Ok(());
        };

        let mut st = self.state.lock().unwrap();
        st.source = Some(source);
        st.phase = PipelineState::Ready;
        log::debug!("pipeline: → Ready (recorded)");
        Ok(())
    }

    /// Accept an externally supplied payload and enter `Ready`, discarding
    /// any prior run. Synchronous — validation only, no suspension.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Busy`] while `Recording` or `Processing`.
    /// - [`PipelineError::InvalidInput`] when `media_type` is not an audio
    ///   type — the state is left unchanged.
    pub fn ingest_upload(
        &mut self,
        bytes: Vec<u8>,
        media_type: &str,
    ) -> Result<(), PipelineError> {
        let mut st = self.state.lock().unwrap();
        if !st.phase.accepts_new_input() {
            return Err(PipelineError::Busy);
        }
        if !is_audio_media_type(media_type) {
            log::warn!("pipeline: rejected upload of type {media_type:?}");
            return Err(PipelineError::InvalidInput(media_type.to_string()));
        }

        st.reset_run();
        st.source = Some(AudioSource::new(bytes, media_type.trim()));
        st.phase = PipelineState::Ready;
        log::debug!("pipeline: → Ready (uploaded)");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // run
    // -----------------------------------------------------------------------

    /// Execute transcribe → summarise → (async-triggered) speak on the
    /// active source.
    ///
    /// Rejected without a transition when the phase is not `Ready`. On
    /// success the phase is `Done` and synthesis has been scheduled but not
    /// awaited; on transcription failure the phase is `Failed` with
    /// transcript and summary cleared.
    pub async fn run(&mut self) -> Result<(), PipelineError> {
        let source = {
            let mut st = self.state.lock().unwrap();
            if st.phase != PipelineState::Ready {
                return Err(PipelineError::NotReady);
            }
            // Ready guarantees a source; the clone keeps it visible to
            // observers while processing runs.
            let Some(source) = st.source.clone() else {
                return Err(PipelineError::NotReady);
            };
            st.phase = PipelineState::Processing;
            source
        };
        log::debug!("pipeline: → Processing ({} bytes)", source.len());

        let transcript = match self.transcriber.transcribe(&source).await {
            Ok(text) => text,
            Err(e) => {
                let mut st = self.state.lock().unwrap();
                st.phase = PipelineState::Failed;
                // No partially-updated run may stay visible.
                st.transcript = None;
                st.summary = None;
                st.error_message = Some(e.to_string());
                log::error!("pipeline: transcription failed: {e}");
                return Err(e.into());
            }
        };

        // The summariser is pure and total — no failure path from here on.
        let summary = summarize(&transcript);
        {
            let mut st = self.state.lock().unwrap();
            st.transcript = Some(transcript);
            st.summary = Some(summary.clone());
        }

        // Fire-and-forget synthesis after a fixed short delay. The handle is
        // retained so observers can await the scheduling, but run() never
        // does.
        let speaker = Arc::clone(&self.speaker);
        let delay = Duration::from_millis(self.config.speak_delay_ms);
        self.speak_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            speaker.speak(&summary);
        }));

        let mut st = self.state.lock().unwrap();
        st.phase = PipelineState::Done;
        log::debug!("pipeline: → Done");
        Ok(())
    }

    /// Take the handle of the most recently scheduled speak task.
    ///
    /// The pipeline itself never awaits synthesis; this hook lets the
    /// presentation layer (and tests) observe that the utterance was issued.
    pub fn take_speak_task(&mut self) -> Option<JoinHandle<()>> {
        self.speak_task.take()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioFragment, CaptureHandle, OpenedCapture};
    use crate::speak::Utterance;
    use crate::transcribe::{RecognitionError, RecognitionSession};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::mpsc;

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    /// Capture capability that emits fixed fragments and closes its channel
    /// on stop.
    struct FakeCapture {
        fragments: Vec<Vec<u8>>,
    }

    #[async_trait]
    impl CaptureCapability for FakeCapture {
        async fn open(
            &self,
            _constraints: &CaptureConstraints,
        ) -> Result<OpenedCapture, CaptureError> {
            let (tx, rx) = mpsc::unbounded_channel();
            for bytes in &self.fragments {
                tx.send(AudioFragment::new(bytes.clone())).unwrap();
            }
            Ok(OpenedCapture {
                handle: Box::new(FakeCaptureHandle { _tx: tx }),
                fragments: rx,
                media_type: "audio/webm".into(),
            })
        }
    }

    struct FakeCaptureHandle {
        _tx: mpsc::UnboundedSender<AudioFragment>,
    }

    #[async_trait]
    impl CaptureHandle for FakeCaptureHandle {
        async fn stop(self: Box<Self>) {}
    }

    struct DeniedCapture;

    #[async_trait]
    impl CaptureCapability for DeniedCapture {
        async fn open(
            &self,
            _constraints: &CaptureConstraints,
        ) -> Result<OpenedCapture, CaptureError> {
            Err(CaptureError::Unavailable("permission denied".into()))
        }
    }

    /// Recognition capability returning a fixed result, counting sessions.
    struct FakeRecognition {
        available: bool,
        result: Result<String, RecognitionError>,
        sessions: AtomicUsize,
    }

    impl FakeRecognition {
        fn ok(text: &str) -> Self {
            Self {
                available: true,
                result: Ok(text.into()),
                sessions: AtomicUsize::new(0),
            }
        }

        fn failing(msg: &str) -> Self {
            Self {
                available: true,
                result: Err(RecognitionError::Failed(msg.into())),
                sessions: AtomicUsize::new(0),
            }
        }

        fn absent() -> Self {
            Self {
                available: false,
                result: Ok(String::new()),
                sessions: AtomicUsize::new(0),
            }
        }

        fn session_count(&self) -> usize {
            self.sessions.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RecognitionCapability for FakeRecognition {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn start(
            &self,
            _config: &RecognitionConfig,
        ) -> Result<Box<dyn RecognitionSession>, RecognitionError> {
            self.sessions.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(FakeSession {
                result: self.result.clone(),
            }))
        }
    }

    struct FakeSession {
        result: Result<String, RecognitionError>,
    }

    #[async_trait]
    impl RecognitionSession for FakeSession {
        async fn stop(self: Box<Self>) -> Result<String, RecognitionError> {
            self.result
        }
    }

    /// Playback that completes immediately.
    struct InstantPlayback;

    #[async_trait]
    impl PlaybackCapability for InstantPlayback {
        async fn play(
            &self,
            _source: &AudioSource,
        ) -> Result<(), crate::transcribe::PlaybackError> {
            Ok(())
        }
    }

    /// Synthesis that records every utterance.
    struct RecordingSynthesis {
        utterances: Mutex<Vec<Utterance>>,
    }

    impl RecordingSynthesis {
        fn new() -> Self {
            Self {
                utterances: Mutex::new(Vec::new()),
            }
        }

        fn spoken(&self) -> Vec<String> {
            self.utterances
                .lock()
                .unwrap()
                .iter()
                .map(|u| u.text.clone())
                .collect()
        }
    }

    impl SynthesisCapability for RecordingSynthesis {
        fn is_available(&self) -> bool {
            true
        }

        fn enqueue(&self, utterance: Utterance) {
            self.utterances.lock().unwrap().push(utterance);
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Config with a zero speak delay so tests can await the speak task
    /// without waiting out the production delay.
    fn test_config() -> AppConfig {
        AppConfig {
            speak_delay_ms: 0,
            ..AppConfig::default()
        }
    }

    struct Harness {
        controller: PipelineController,
        recognition: Arc<FakeRecognition>,
        synthesis: Arc<RecordingSynthesis>,
    }

    fn make_harness(recognition: FakeRecognition) -> Harness {
        let recognition = Arc::new(recognition);
        let synthesis = Arc::new(RecordingSynthesis::new());
        let controller = PipelineController::new(
            test_config(),
            Arc::new(FakeCapture {
                fragments: vec![vec![1, 2, 3]],
            }),
            Arc::clone(&recognition) as Arc<dyn RecognitionCapability>,
            Arc::new(InstantPlayback),
            Arc::clone(&synthesis) as Arc<dyn SynthesisCapability>,
        );
        Harness {
            controller,
            recognition,
            synthesis,
        }
    }

    // -----------------------------------------------------------------------
    // Recording transitions
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn begin_recording_enters_recording() {
        let mut h = make_harness(FakeRecognition::ok("unused"));
        h.controller.begin_recording().await.unwrap();
        assert_eq!(h.controller.phase(), PipelineState::Recording);
    }

    #[tokio::test]
    async fn denied_capture_leaves_state_idle() {
        let synthesis = Arc::new(RecordingSynthesis::new());
        let mut controller = PipelineController::new(
            test_config(),
            Arc::new(DeniedCapture),
            Arc::new(FakeRecognition::ok("unused")) as Arc<dyn RecognitionCapability>,
            Arc::new(InstantPlayback),
            synthesis as Arc<dyn SynthesisCapability>,
        );

        let err = controller.begin_recording().await.unwrap_err();
        assert!(matches!(err, PipelineError::CaptureUnavailable(_)));
        assert_eq!(controller.phase(), PipelineState::Idle);
    }

    #[tokio::test]
    async fn end_recording_enters_ready_with_source() {
        let mut h = make_harness(FakeRecognition::ok("unused"));
        h.controller.begin_recording().await.unwrap();
        h.controller.end_recording().await.unwrap();

        assert_eq!(h.controller.phase(), PipelineState::Ready);
        let state = h.controller.shared_state();
        let st = state.lock().unwrap();
        let source = st.source.as_ref().expect("source after end_recording");
        assert_eq!(source.bytes(), &[1, 2, 3]);
        assert_eq!(source.media_type(), "audio/webm");
    }

    #[tokio::test]
    async fn end_recording_outside_recording_is_noop() {
        let mut h = make_harness(FakeRecognition::ok("unused"));
        h.controller.end_recording().await.unwrap();
        assert_eq!(h.controller.phase(), PipelineState::Idle);
        assert!(h.controller.shared_state().lock().unwrap().source.is_none());
    }

    #[tokio::test]
    async fn begin_while_recording_is_busy() {
        let mut h = make_harness(FakeRecognition::ok("unused"));
        h.controller.begin_recording().await.unwrap();
        let err = h.controller.begin_recording().await.unwrap_err();
        assert!(matches!(err, PipelineError::Busy));
        assert_eq!(h.controller.phase(), PipelineState::Recording);
    }

    // -----------------------------------------------------------------------
    // Upload ingestion
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn valid_upload_enters_ready() {
        let mut h = make_harness(FakeRecognition::ok("unused"));
        h.controller
            .ingest_upload(vec![9, 9], "audio/mpeg")
            .unwrap();
        assert_eq!(h.controller.phase(), PipelineState::Ready);
    }

    #[tokio::test]
    async fn non_audio_upload_is_rejected_without_transition() {
        let mut h = make_harness(FakeRecognition::ok("unused"));
        let err = h
            .controller
            .ingest_upload(vec![9, 9], "video/mp4")
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
        assert_eq!(h.controller.phase(), PipelineState::Idle);
        assert!(h.controller.shared_state().lock().unwrap().source.is_none());
    }

    #[tokio::test]
    async fn non_ascii_media_type_is_rejected_without_transition() {
        let mut h = make_harness(FakeRecognition::ok("unused"));
        let err = h
            .controller
            .ingest_upload(vec![9], "aaaaaéZ")
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
        assert_eq!(h.controller.phase(), PipelineState::Idle);
        assert!(h.controller.shared_state().lock().unwrap().source.is_none());
    }

    #[tokio::test]
    async fn upload_replaces_pending_source() {
        let mut h = make_harness(FakeRecognition::ok("unused"));
        h.controller.ingest_upload(vec![1], "audio/wav").unwrap();
        h.controller.ingest_upload(vec![2], "audio/ogg").unwrap();

        let state = h.controller.shared_state();
        let st = state.lock().unwrap();
        let source = st.source.as_ref().unwrap();
        assert_eq!(source.bytes(), &[2]);
        assert_eq!(source.media_type(), "audio/ogg");
    }

    // -----------------------------------------------------------------------
    // run()
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn run_outside_ready_is_rejected_without_invoking_transcriber() {
        let mut h = make_harness(FakeRecognition::ok("unused"));
        let err = h.controller.run().await.unwrap_err();
        assert!(matches!(err, PipelineError::NotReady));
        assert_eq!(h.controller.phase(), PipelineState::Idle);
        assert_eq!(h.recognition.session_count(), 0);
    }

    #[tokio::test]
    async fn successful_run_reaches_done_with_transcript_and_summary() {
        let text = "Mahendra Singh Dhoni was the captain and won 2 icc trophy.";
        let mut h = make_harness(FakeRecognition::ok(text));
        h.controller.ingest_upload(vec![1], "audio/wav").unwrap();

        h.controller.run().await.unwrap();

        assert_eq!(h.controller.phase(), PipelineState::Done);
        let state = h.controller.shared_state();
        let st = state.lock().unwrap();
        assert_eq!(st.transcript.as_deref(), Some(text));
        assert_eq!(
            st.summary.as_deref(),
            Some("Mahendra Singh Dhoni – captain, 2 icc trophy")
        );
    }

    #[tokio::test]
    async fn speak_is_scheduled_with_the_summary_text() {
        let mut h = make_harness(FakeRecognition::ok("hello there how are you"));
        h.controller.ingest_upload(vec![1], "audio/wav").unwrap();
        h.controller.run().await.unwrap();

        // run() returned before synthesis happened; awaiting the retained
        // handle observes the fire-and-forget task.
        h.controller.take_speak_task().unwrap().await.unwrap();
        assert_eq!(h.synthesis.spoken(), vec!["User".to_string()]);
    }

    #[tokio::test]
    async fn run_returns_before_speak_happens() {
        let mut h = make_harness(FakeRecognition::ok("hello there"));
        h.controller.ingest_upload(vec![1], "audio/wav").unwrap();
        h.controller.run().await.unwrap();

        // Done was reached even though the utterance may not have been
        // enqueued yet — synthesis is decoupled from the run.
        assert_eq!(h.controller.phase(), PipelineState::Done);
        assert!(h.controller.take_speak_task().is_some());
    }

    #[tokio::test]
    async fn empty_transcript_still_completes() {
        let mut h = make_harness(FakeRecognition::ok(""));
        h.controller.ingest_upload(vec![1], "audio/wav").unwrap();
        h.controller.run().await.unwrap();

        let state = h.controller.shared_state();
        let st = state.lock().unwrap();
        assert_eq!(st.phase, PipelineState::Done);
        assert_eq!(st.transcript.as_deref(), Some(""));
        // Sentence-less input passes through the summariser unchanged.
        assert_eq!(st.summary.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn recognition_failure_enters_failed_and_clears_run_text() {
        let mut h = make_harness(FakeRecognition::failing("engine crashed"));
        h.controller.ingest_upload(vec![1], "audio/wav").unwrap();

        let err = h.controller.run().await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Transcribe(TranscribeError::RecognitionFailed(_))
        ));
        assert!(err.is_recoverable());

        let state = h.controller.shared_state();
        let st = state.lock().unwrap();
        assert_eq!(st.phase, PipelineState::Failed);
        assert!(st.transcript.is_none());
        assert!(st.summary.is_none());
        assert!(st.error_message.is_some());
    }

    #[tokio::test]
    async fn absent_recognition_is_unsupported_and_unrecoverable() {
        let mut h = make_harness(FakeRecognition::absent());
        h.controller.ingest_upload(vec![1], "audio/wav").unwrap();

        let err = h.controller.run().await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Transcribe(TranscribeError::RecognitionUnsupported)
        ));
        assert!(!err.is_recoverable());
        assert_eq!(h.controller.phase(), PipelineState::Failed);
    }

    // -----------------------------------------------------------------------
    // Restarting after Done / Failed
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn done_accepts_new_upload_and_discards_prior_run() {
        let mut h = make_harness(FakeRecognition::ok("John Smith is a farmer"));
        h.controller.ingest_upload(vec![1], "audio/wav").unwrap();
        h.controller.run().await.unwrap();
        assert_eq!(h.controller.phase(), PipelineState::Done);

        h.controller.ingest_upload(vec![2], "audio/ogg").unwrap();

        let state = h.controller.shared_state();
        let st = state.lock().unwrap();
        assert_eq!(st.phase, PipelineState::Ready);
        assert!(st.transcript.is_none());
        assert!(st.summary.is_none());
        assert_eq!(st.source.as_ref().unwrap().bytes(), &[2]);
    }

    #[tokio::test]
    async fn failed_accepts_new_recording() {
        let mut h = make_harness(FakeRecognition::failing("boom"));
        h.controller.ingest_upload(vec![1], "audio/wav").unwrap();
        let _ = h.controller.run().await;
        assert_eq!(h.controller.phase(), PipelineState::Failed);

        h.controller.begin_recording().await.unwrap();
        assert_eq!(h.controller.phase(), PipelineState::Recording);
        assert!(h
            .controller
            .shared_state()
            .lock()
            .unwrap()
            .error_message
            .is_none());
    }

    #[tokio::test]
    async fn run_after_done_requires_new_input() {
        let mut h = make_harness(FakeRecognition::ok("hello"));
        h.controller.ingest_upload(vec![1], "audio/wav").unwrap();
        h.controller.run().await.unwrap();

        let err = h.controller.run().await.unwrap_err();
        assert!(matches!(err, PipelineError::NotReady));
        assert_eq!(h.controller.phase(), PipelineState::Done);
        // Only the first run opened a recognition session.
        assert_eq!(h.recognition.session_count(), 1);
    }
}
