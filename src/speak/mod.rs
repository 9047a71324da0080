//! Speech output — the synthesis capability seam and the [`Speaker`] that
//! queues the summary as an utterance.
//!
//! The pipeline never awaits synthesis: the controller schedules
//! [`Speaker::speak`] on a detached task after a short delay and moves to
//! `Done` immediately.

pub mod speaker;
pub mod synthesis;

pub use speaker::Speaker;
pub use synthesis::{SynthesisCapability, Utterance};
