use crate::{CaptureError, Chunk, Frame, Recording};
use gaze_camera::Camera;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Configuration for one recording attempt.
#[derive(Clone, Debug)]
pub struct RecorderConfig {
    duration: Duration,
    target_frames: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(5),
            target_frames: 8,
        }
    }
}

impl RecorderConfig {
    /// Set the total recording duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the number of still frames to sample over the recording.
    pub fn with_target_frames(mut self, target_frames: usize) -> Self {
        self.target_frames = target_frames;
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn target_frames(&self) -> usize {
        self.target_frames
    }
}

/// Output of a completed recording attempt.
#[derive(Debug)]
pub struct CaptureOutcome {
    /// Stills sampled live, at most `target_frames` of them.
    pub frames: Vec<Frame>,
    /// The full clip, for fallback extraction when sampling under-delivered.
    pub recording: Recording,
}

/// Records a fixed-duration clip while sampling stills and ticking a
/// countdown.
///
/// Three concerns run concurrently for the duration of the attempt: the
/// camera loop feeding the recording, a sampler on a `duration /
/// target_frames` cadence, and a 1 Hz countdown. A single deadline stops
/// all of them; cancelling the recorder's token stops them early and fails
/// the attempt.
pub struct Recorder {
    config: RecorderConfig,
    cancel: CancellationToken,
    countdown_tx: watch::Sender<u64>,
    countdown_rx: watch::Receiver<u64>,
}

impl Recorder {
    pub fn new(config: RecorderConfig) -> Self {
        let (countdown_tx, countdown_rx) = watch::channel(config.duration().as_secs());
        Self {
            config,
            cancel: CancellationToken::new(),
            countdown_tx,
            countdown_rx,
        }
    }

    /// Token that aborts the attempt when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Remaining-seconds channel for UI feedback, updated once per second
    /// until it reaches zero.
    pub fn countdown(&self) -> watch::Receiver<u64> {
        self.countdown_rx.clone()
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Run the recording attempt to completion.
    ///
    /// Every camera frame is appended to the fallback clip and published to
    /// the sampler, which snapshots the latest frame on each tick. The
    /// camera is dropped (device released) before this returns, on the
    /// deadline and on cancellation alike. A sampling shortfall is a
    /// warning, not an error.
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::Cancelled` if the token was cancelled before
    /// the deadline, or `CaptureError::Task` if a helper task panicked.
    pub async fn record<C: Camera>(self, mut camera: C) -> Result<CaptureOutcome, CaptureError> {
        let duration = self.config.duration();
        let target = self.config.target_frames();
        let started = Instant::now();

        // Stops the sampler and countdown once the camera loop ends
        let stop = CancellationToken::new();
        let (latest_tx, latest_rx) = watch::channel::<Option<Chunk>>(None);

        let sampler = tokio::spawn(sample_loop(latest_rx, duration, target, stop.clone()));
        let countdown = tokio::spawn(countdown_loop(
            self.countdown_tx.clone(),
            duration.as_secs(),
            stop.clone(),
        ));

        let mut recording = Recording::new();
        let deadline = time::sleep(duration);
        tokio::pin!(deadline);
        let mut cancelled = false;

        loop {
            tokio::select! {
                _ = &mut deadline => break,
                _ = self.cancel.cancelled() => {
                    cancelled = true;
                    break;
                }
                result = camera.recv() => match result {
                    Ok(jpeg) => {
                        let chunk = Chunk::new(started.elapsed(), Arc::new(jpeg));
                        recording.push(chunk.clone());
                        let _ = latest_tx.send(Some(chunk));
                    }
                    Err(e) => {
                        // A failed grab is skipped, not retried
                        log::warn!("camera frame failed: {e}");
                        time::sleep(Duration::from_millis(100)).await;
                    }
                },
            }
        }

        stop.cancel();
        // Release the device before waiting on the helpers
        drop(camera);

        let frames = sampler
            .await
            .map_err(|e| CaptureError::Task(e.to_string()))?;
        countdown
            .await
            .map_err(|e| CaptureError::Task(e.to_string()))?;

        if cancelled {
            log::info!("recording cancelled after {:?}", started.elapsed());
            return Err(CaptureError::Cancelled);
        }

        // The deadline has passed; freeze the countdown at zero
        let _ = self.countdown_tx.send(0);

        recording.finalize(started.elapsed());
        if frames.len() < target {
            log::warn!(
                "sampled {} of {} frames; fallback extraction may be needed",
                frames.len(),
                target
            );
        }

        Ok(CaptureOutcome { frames, recording })
    }
}

/// Snapshot the most recent camera frame on a fixed cadence.
///
/// Sampling is capped at `target` frames. A tick that finds no frame (the
/// stream is not delivering yet) is skipped silently.
async fn sample_loop(
    latest: watch::Receiver<Option<Chunk>>,
    duration: Duration,
    target: usize,
    stop: CancellationToken,
) -> Vec<Frame> {
    if target == 0 {
        return Vec::new();
    }

    let period = (duration / target as u32).max(Duration::from_millis(1));
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut frames = Vec::with_capacity(target);
    loop {
        tokio::select! {
            _ = stop.cancelled() => break,
            _ = ticker.tick() => {
                let current = latest.borrow().clone();
                match current {
                    Some(chunk) => {
                        let index = frames.len() as u32 + 1;
                        frames.push(Frame::new(index, chunk.offset, chunk.data));
                        if frames.len() >= target {
                            break;
                        }
                    }
                    None => log::debug!("sampler tick skipped: no frame available yet"),
                }
            }
        }
    }
    frames
}

/// Tick the user-visible countdown once per second until it reaches zero.
async fn countdown_loop(tx: watch::Sender<u64>, total_secs: u64, stop: CancellationToken) {
    let mut remaining = total_secs;
    let mut ticker = time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // Consume the immediate first tick; the first decrement lands at ~1s
    ticker.tick().await;

    while remaining > 0 {
        tokio::select! {
            _ = stop.cancelled() => return,
            _ = ticker.tick() => {
                remaining -= 1;
                let _ = tx.send(remaining);
            }
        }
    }
}
