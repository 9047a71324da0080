//! Capture capability contract.
//!
//! [`CaptureCapability`] is the seam between the pipeline and whatever
//! actually owns the microphone. The pipeline never touches a device
//! directly: [`crate::audio::Recorder`] asks the capability to open a stream
//! and receives [`AudioFragment`]s over a channel, mirroring how real
//! capture backends deliver audio from a callback thread.
//!
//! [`CpalCapture`](crate::audio::CpalCapture) is the production
//! implementation; tests inject channel-backed fakes.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::audio::source::AudioFragment;

// ---------------------------------------------------------------------------
// CaptureError
// ---------------------------------------------------------------------------

/// Errors raised while acquiring the capture device.
///
/// Permission denial and a missing device share a single variant — the
/// pipeline treats both as "capture unavailable, retry or upload instead".
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    /// The device could not be opened (missing, busy, or permission denied).
    #[error("capture device unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// CaptureConstraints
// ---------------------------------------------------------------------------

/// Requested stream parameters passed to [`CaptureCapability::open`].
///
/// `None` fields mean "use the device default". Backends are free to treat
/// these as hints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureConstraints {
    /// Preferred sample rate in Hz.
    pub sample_rate: Option<u32>,
    /// Preferred channel count.
    pub channels: Option<u16>,
}

// ---------------------------------------------------------------------------
// OpenedCapture / CaptureHandle
// ---------------------------------------------------------------------------

/// A live capture stream returned by [`CaptureCapability::open`].
///
/// Fragments arrive on `fragments` from the backend's callback context; the
/// channel closes once [`CaptureHandle::stop`] has released the device and
/// the last fragment has been delivered.
pub struct OpenedCapture {
    /// Stop control for the stream. Holding this keeps the device open.
    pub handle: Box<dyn CaptureHandle>,
    /// Incoming audio fragments, in capture order.
    pub fragments: mpsc::UnboundedReceiver<AudioFragment>,
    /// Media type of the assembled payload (e.g. `"audio/wav"`).
    pub media_type: String,
}

/// Stop control for one open capture stream.
///
/// The physical device is held exclusively from `open` until `stop`
/// completes. Stopping must close the fragment channel so the recorder's
/// accumulator can finish draining.
#[async_trait]
pub trait CaptureHandle: Send {
    /// Stop capturing and release the device.
    async fn stop(self: Box<Self>);
}

// ---------------------------------------------------------------------------
// CaptureCapability
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface to an audio capture backend.
///
/// Implementations must be `Send + Sync` so they can be held behind an
/// `Arc<dyn CaptureCapability>` and shared with the pipeline controller.
#[async_trait]
pub trait CaptureCapability: Send + Sync {
    /// Open a capture stream.
    ///
    /// # Errors
    ///
    /// [`CaptureError::Unavailable`] when no device can be acquired — the
    /// caller must leave its own state unchanged in that case.
    async fn open(&self, constraints: &CaptureConstraints) -> Result<OpenedCapture, CaptureError>;
}

// Compile-time assertion: Box<dyn CaptureCapability> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn CaptureCapability>) {}
};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
