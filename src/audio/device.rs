//! Microphone-backed [`CaptureCapability`] built on `cpal`.
//!
//! `cpal::Stream` is not `Send` on every platform, so the stream lives on a
//! dedicated capture thread for its whole lifetime. The cpal callback runs
//! on the audio thread and forwards each hardware buffer as an
//! [`AudioFragment`] over an unbounded channel; [`CaptureHandle::stop`]
//! signals the capture thread to drop the stream, which releases the device
//! and closes the fragment channel.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::mpsc as std_mpsc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::audio::capture::{
    CaptureCapability, CaptureConstraints, CaptureError, CaptureHandle, OpenedCapture,
};
use crate::audio::source::AudioFragment;

// ---------------------------------------------------------------------------
// CpalCapture
// ---------------------------------------------------------------------------

/// Capture capability backed by the system default input device.
///
/// Samples are delivered by cpal as `f32` PCM; each callback buffer is
/// serialised little-endian into one fragment. The reported media type
/// records the negotiated rate and channel count, e.g.
/// `"audio/pcm;rate=48000;channels=2"`.
#[derive(Debug, Default)]
pub struct CpalCapture;

impl CpalCapture {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CaptureCapability for CpalCapture {
    async fn open(&self, constraints: &CaptureConstraints) -> Result<OpenedCapture, CaptureError> {
        let constraints = constraints.clone();
        let (frag_tx, frag_rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = oneshot::channel();
        let (stop_tx, stop_rx) = std_mpsc::channel::<()>();

        let join = std::thread::Builder::new()
            .name("capture".into())
            .spawn(move || capture_thread(constraints, frag_tx, ready_tx, stop_rx))
            .map_err(|e| CaptureError::Unavailable(format!("capture thread: {e}")))?;

        // The thread reports either the negotiated media type or the reason
        // the device could not be opened.
        let media_type = ready_rx
            .await
            .map_err(|_| CaptureError::Unavailable("capture thread exited early".into()))??;

        Ok(OpenedCapture {
            handle: Box::new(CpalHandle {
                stop_tx,
                join: Some(join),
            }),
            fragments: frag_rx,
            media_type,
        })
    }
}

// ---------------------------------------------------------------------------
// CpalHandle
// ---------------------------------------------------------------------------

struct CpalHandle {
    stop_tx: std_mpsc::Sender<()>,
    join: Option<std::thread::JoinHandle<()>>,
}

#[async_trait]
impl CaptureHandle for CpalHandle {
    async fn stop(mut self: Box<Self>) {
        let _ = self.stop_tx.send(());
        if let Some(join) = self.join.take() {
            // Joining blocks until the stream has been dropped, so push it
            // onto the blocking pool.
            let _ = tokio::task::spawn_blocking(move || {
                if join.join().is_err() {
                    log::warn!("capture thread panicked during stop");
                }
            })
            .await;
        }
    }
}

// ---------------------------------------------------------------------------
// Capture thread
// ---------------------------------------------------------------------------

/// Owns the cpal stream until `stop_rx` fires (or the handle is dropped,
/// which closes the stop channel).
fn capture_thread(
    constraints: CaptureConstraints,
    frag_tx: mpsc::UnboundedSender<AudioFragment>,
    ready_tx: oneshot::Sender<Result<String, CaptureError>>,
    stop_rx: std_mpsc::Receiver<()>,
) {
    match open_stream(&constraints, frag_tx) {
        Ok((stream, media_type)) => {
            if ready_tx.send(Ok(media_type)).is_err() {
                return; // caller gave up while we were opening
            }
            // Park until stop is signalled; recv() also returns on a dropped
            // handle, so an abandoned stream still releases the device.
            let _ = stop_rx.recv();
            drop(stream);
            log::debug!("capture: device released");
        }
        Err(e) => {
            let _ = ready_tx.send(Err(e));
        }
    }
}

fn open_stream(
    constraints: &CaptureConstraints,
    tx: mpsc::UnboundedSender<AudioFragment>,
) -> Result<(cpal::Stream, String), CaptureError> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| CaptureError::Unavailable("no input device on the default host".into()))?;

    let supported = device
        .default_input_config()
        .map_err(|e| CaptureError::Unavailable(format!("default input config: {e}")))?;

    let channels = constraints.channels.unwrap_or_else(|| supported.channels());
    let sample_rate = constraints
        .sample_rate
        .unwrap_or_else(|| supported.sample_rate().0);

    let config = cpal::StreamConfig {
        channels,
        sample_rate: cpal::SampleRate(sample_rate),
        buffer_size: cpal::BufferSize::Default,
    };

    let stream = device
        .build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                let mut bytes = Vec::with_capacity(data.len() * 4);
                for sample in data {
                    bytes.extend_from_slice(&sample.to_le_bytes());
                }
                // Ignore send errors; the receiver may have been dropped.
                let _ = tx.send(AudioFragment::new(bytes));
            },
            |err: cpal::StreamError| {
                log::error!("cpal stream error: {err}");
            },
            None, // no timeout
        )
        .map_err(|e| CaptureError::Unavailable(format!("build input stream: {e}")))?;

    stream
        .play()
        .map_err(|e| CaptureError::Unavailable(format!("start stream: {e}")))?;

    log::debug!("capture: stream open at {sample_rate} Hz, {channels} ch");
    Ok((
        stream,
        format!("audio/pcm;rate={sample_rate};channels={channels}"),
    ))
}
