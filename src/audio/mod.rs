//! Audio capture side of the pipeline — payload entities, the capture
//! capability seam, the recorder, and the cpal-backed device adapter.
//!
//! # Flow
//!
//! ```text
//! CaptureCapability::open ─▶ fragment channel ─▶ Recorder accumulator
//!                                                   │ end()
//!                                                   ▼
//!                                              AudioSource
//! ```
//!
//! Uploads bypass this module entirely: the pipeline controller builds an
//! [`AudioSource`] straight from the supplied bytes after checking
//! [`is_audio_media_type`].

pub mod capture;
pub mod device;
pub mod recorder;
pub mod source;

pub use capture::{
    CaptureCapability, CaptureConstraints, CaptureError, CaptureHandle, OpenedCapture,
};
pub use device::CpalCapture;
pub use recorder::Recorder;
pub use source::{is_audio_media_type, AudioFragment, AudioSource};
