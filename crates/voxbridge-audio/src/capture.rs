use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{Device, SampleRate, Stream, StreamConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use voxbridge_core::AudioError;

/// One queue item: `Some` carries the PCM bytes of a single capture
/// callback, `None` is the end-of-stream sentinel.
type QueueItem = Option<Vec<u8>>;

// ── MicrophoneStream ──────────────────────────────────────────

/// An open microphone capture stream.
///
/// The cpal callback pushes each captured frame buffer (mono, 16-bit
/// little-endian PCM) onto an unbounded queue; the paired [`ChunkStream`]
/// drains that queue. Dropping the stream stops the device and pushes the
/// sentinel so a blocked consumer wakes up and terminates.
pub struct MicrophoneStream {
    _stream: Stream,
    closed: Arc<AtomicBool>,
    queue_tx: mpsc::UnboundedSender<QueueItem>,
}

impl MicrophoneStream {
    /// Open `device` for capture and return the stream handle together
    /// with the chunk consumer. The consumer is only restartable by
    /// reopening the device.
    pub fn open(
        device: &Device,
        sample_rate: u32,
        chunk_frames: u32,
    ) -> Result<(Self, ChunkStream), AudioError> {
        let config = StreamConfig {
            channels: 1,
            sample_rate: SampleRate(sample_rate),
            buffer_size: cpal::BufferSize::Fixed(chunk_frames),
        };

        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        let closed = Arc::new(AtomicBool::new(false));
        let closed_flag = Arc::clone(&closed);
        let frame_tx = queue_tx.clone();

        let err_callback = |err: cpal::StreamError| {
            tracing::error!("capture stream error: {}", err);
        };

        let stream = device
            .build_input_stream(
                &config,
                move |data: &[i16], _: &cpal::InputCallbackInfo| {
                    if closed_flag.load(Ordering::Relaxed) {
                        return;
                    }
                    let mut bytes = Vec::with_capacity(data.len() * 2);
                    for sample in data {
                        bytes.extend_from_slice(&sample.to_le_bytes());
                    }
                    let _ = frame_tx.send(Some(bytes));
                },
                err_callback,
                None,
            )
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamStart(e.to_string()))?;

        tracing::debug!(sample_rate, chunk_frames, "microphone stream opened");

        Ok((
            Self {
                _stream: stream,
                closed,
                queue_tx,
            },
            ChunkStream { queue_rx },
        ))
    }

    /// Close the stream. Idempotent: the open→closed transition happens
    /// exactly once, and the sentinel is pushed exactly once.
    pub fn close(&self) {
        if !self.closed.swap(true, Ordering::Relaxed) {
            let _ = self.queue_tx.send(None);
            tracing::debug!("microphone stream closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }
}

impl Drop for MicrophoneStream {
    fn drop(&mut self) {
        self.close();
    }
}

// ── ChunkStream ───────────────────────────────────────────────

/// Pull side of the capture queue.
///
/// Each retrieval waits for at least one queued frame, then drains
/// everything currently queued and yields it as one coalesced chunk,
/// which keeps the request rate toward the network layer low.
pub struct ChunkStream {
    queue_rx: mpsc::UnboundedReceiver<QueueItem>,
}

impl ChunkStream {
    /// Await the next coalesced chunk. Returns `None` once the sentinel
    /// is observed (or every sender is gone); after that the stream
    /// never yields again.
    pub async fn next_chunk(&mut self) -> Option<Vec<u8>> {
        let mut chunk = match self.queue_rx.recv().await? {
            Some(bytes) => bytes,
            None => return None,
        };

        loop {
            match self.queue_rx.try_recv() {
                Ok(Some(more)) => chunk.extend_from_slice(&more),
                // Sentinel mid-drain: the stream is closed, terminate
                Ok(None) => return None,
                Err(_) => break,
            }
        }
        Some(chunk)
    }
}
