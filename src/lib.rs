//! voicebrief — turns a spoken or uploaded audio clip into a short, spoken
//! summary.
//!
//! A person records or supplies audio, the pipeline derives text through an
//! external recognition engine, condenses that text to a compact highlight
//! phrase with fixed keyword heuristics, and speaks the highlight back
//! through an external synthesis engine.
//!
//! # Pipeline
//!
//! ```text
//! Recorder / upload ─▶ AudioSource ─▶ Transcriber ─▶ transcript
//!                                        │
//!                                   summarize()
//!                                        │
//!                                  highlight phrase ─▶ Speaker (fire-and-forget)
//! ```
//!
//! Data flows strictly one direction; the
//! [`PipelineController`](pipeline::PipelineController) is the only
//! component with cross-cutting state. Platform services — microphone
//! capture, speech recognition, audio playback, speech synthesis — are
//! consumed as injected capability traits
//! ([`CaptureCapability`](audio::CaptureCapability),
//! [`RecognitionCapability`](transcribe::RecognitionCapability),
//! [`PlaybackCapability`](transcribe::PlaybackCapability),
//! [`SynthesisCapability`](speak::SynthesisCapability)), never as ambient
//! globals, so the whole pipeline runs against substitutes in tests.
//!
//! The presentation layer (buttons, notifications, file pickers) is not part
//! of this crate: it calls the controller's operations and reads
//! [`SharedState`](pipeline::SharedState) to render.

pub mod audio;
pub mod config;
pub mod pipeline;
pub mod speak;
pub mod summarize;
pub mod transcribe;
