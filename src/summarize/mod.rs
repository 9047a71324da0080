//! Summarisation — a pure, deterministic transcript-to-highlight function.
//!
//! The only subsystem with no capability seam: [`summarize`] takes text in
//! and returns a short phrase out, with no external calls and no side
//! effects, so the pipeline's `Processing` phase can never fail past
//! transcription.

pub mod highlight;

pub use highlight::{summarize, DEFAULT_SUBJECT, MAX_SUMMARY_WORDS};
