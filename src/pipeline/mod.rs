//! Pipeline module — the state machine and the controller that sequences
//! capture → transcription → summarisation → synthesis.
//!
//! # Architecture
//!
//! ```text
//! presentation layer
//!        │ begin_recording / end_recording / ingest_upload / run
//!        ▼
//! PipelineController ── Recorder ──────▶ CaptureCapability
//!        │            ── Transcriber ──▶ RecognitionCapability + PlaybackCapability
//!        │            ── summarize()    (pure)
//!        │            ── Speaker ──────▶ SynthesisCapability  (spawned, not awaited)
//!        ▼
//! SharedState (Arc<Mutex<RunState>>) ◀── read by observers to re-render
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use voicebrief::audio::CpalCapture;
//! use voicebrief::config::AppConfig;
//! use voicebrief::pipeline::PipelineController;
//!
//! # use voicebrief::transcribe::{RecognitionCapability, PlaybackCapability};
//! # use voicebrief::speak::SynthesisCapability;
//! # fn recognition() -> Arc<dyn RecognitionCapability> { unimplemented!() }
//! # fn playback() -> Arc<dyn PlaybackCapability> { unimplemented!() }
//! # fn synthesis() -> Arc<dyn SynthesisCapability> { unimplemented!() }
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::load().unwrap();
//!     let mut controller = PipelineController::new(
//!         config,
//!         Arc::new(CpalCapture::new()),
//!         recognition(),
//!         playback(),
//!         synthesis(),
//!     );
//!
//!     controller.begin_recording().await.unwrap();
//!     // … user speaks …
//!     controller.end_recording().await.unwrap();
//!     controller.run().await.unwrap();
//!
//!     let state = controller.shared_state();
//!     println!("{:?}", state.lock().unwrap().summary);
//! }
//! ```

pub mod controller;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use controller::{PipelineController, PipelineError};
pub use state::{new_shared_state, PipelineState, RunState, SharedState};
