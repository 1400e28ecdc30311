//! Upload progress reporting.
//!
//! The upload session manager never computes progress itself. It hands a
//! `ProgressHandle` for each new entry to a `ProgressSource`, which decides
//! how and when the entry advances. `SimulatedProgress` is a fixed-cadence
//! UX simulation that says nothing about real transfer state; a source that
//! reports real transfer progress can replace it without touching the
//! manager's state machine.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::{Instant, interval_at, sleep_until};

use super::model::{PendingUpload, UploadId};

/// Write access to a single entry's progress.
///
/// Updates are clamped to 0..=100 and never lower the current value.
#[derive(Clone)]
pub struct ProgressHandle {
    id: UploadId,
    uploads: Arc<RwLock<Vec<PendingUpload>>>,
}

impl ProgressHandle {
    pub(crate) fn new(id: UploadId, uploads: Arc<RwLock<Vec<PendingUpload>>>) -> Self {
        Self { id, uploads }
    }

    pub fn id(&self) -> &UploadId {
        &self.id
    }

    /// Raises progress by `step` points.
    ///
    /// Returns `false` once the entry has been removed.
    pub async fn advance(&self, step: u8) -> bool {
        self.update(|current| current.saturating_add(step)).await
    }

    /// Raises progress to `percent`. Lower values are ignored.
    ///
    /// Returns `false` once the entry has been removed.
    pub async fn set(&self, percent: u8) -> bool {
        self.update(|_| percent).await
    }

    /// Marks the entry as fully uploaded.
    pub async fn complete(&self) -> bool {
        self.set(100).await
    }

    async fn update(&self, next: impl FnOnce(u8) -> u8) -> bool {
        let mut uploads = self.uploads.write().await;
        match uploads.iter_mut().find(|u| u.id == self.id) {
            Some(upload) => {
                let proposed = next(upload.progress).min(100);
                upload.progress = upload.progress.max(proposed);
                true
            }
            None => false,
        }
    }
}

/// Drives progress for newly added uploads.
#[async_trait]
pub trait ProgressSource: Send + Sync {
    /// Starts tracking one entry. Implementations must not block for the
    /// duration of the upload.
    async fn track(&self, handle: ProgressHandle);
}

/// Fixed-cadence progress simulation.
///
/// Each entry gains `step` points every `tick` and is forced to 100 once
/// `duration` has elapsed, independently of any real I/O. Every entry gets
/// its own timer task.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedProgress {
    pub step: u8,
    pub tick: Duration,
    pub duration: Duration,
}

impl Default for SimulatedProgress {
    fn default() -> Self {
        Self {
            step: 10,
            tick: Duration::from_millis(100),
            duration: Duration::from_millis(1100),
        }
    }
}

#[async_trait]
impl ProgressSource for SimulatedProgress {
    async fn track(&self, handle: ProgressHandle) {
        let SimulatedProgress {
            step,
            tick,
            duration,
        } = *self;

        tokio::spawn(async move {
            let start = Instant::now();
            let deadline = start + duration;
            let mut ticker = interval_at(start + tick, tick);

            loop {
                tokio::select! {
                    biased;
                    _ = sleep_until(deadline) => {
                        handle.complete().await;
                        break;
                    }
                    _ = ticker.tick() => {
                        if !handle.advance(step).await {
                            break;
                        }
                    }
                }
            }
        });
    }
}

/// Marks every entry complete as soon as it is added.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantProgress;

#[async_trait]
impl ProgressSource for InstantProgress {
    async fn track(&self, handle: ProgressHandle) {
        handle.complete().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::model::RawFile;

    fn single_upload() -> (Arc<RwLock<Vec<PendingUpload>>>, UploadId) {
        let upload = PendingUpload::new(Arc::new(RawFile::from_bytes(
            "notes.txt",
            "text/plain",
            b"x".to_vec(),
        )));
        let id = upload.id.clone();
        (Arc::new(RwLock::new(vec![upload])), id)
    }

    async fn progress_of(uploads: &RwLock<Vec<PendingUpload>>) -> u8 {
        uploads.read().await[0].progress
    }

    #[tokio::test]
    async fn test_handle_is_clamped_and_monotonic() {
        let (uploads, id) = single_upload();
        let handle = ProgressHandle::new(id, uploads.clone());

        assert!(handle.set(60).await);
        assert!(handle.set(30).await);
        assert_eq!(progress_of(&uploads).await, 60);

        assert!(handle.advance(250).await);
        assert_eq!(progress_of(&uploads).await, 100);
    }

    #[tokio::test]
    async fn test_handle_reports_removed_entry() {
        let (uploads, id) = single_upload();
        let handle = ProgressHandle::new(id, uploads.clone());
        uploads.write().await.clear();
        assert!(!handle.advance(10).await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulated_progress_reaches_exactly_100() {
        let (uploads, id) = single_upload();
        let source = SimulatedProgress::default();

        source.track(ProgressHandle::new(id, uploads.clone())).await;
        assert_eq!(progress_of(&uploads).await, 0);

        let mut previous = 0;
        for _ in 0..10 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            let current = progress_of(&uploads).await;
            assert!(current >= previous, "progress went from {previous} to {current}");
            assert!(current <= 100);
            previous = current;
        }

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(progress_of(&uploads).await, 100);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(progress_of(&uploads).await, 100);
    }

    #[tokio::test]
    async fn test_instant_progress_completes_immediately() {
        let (uploads, id) = single_upload();
        InstantProgress.track(ProgressHandle::new(id, uploads.clone())).await;
        assert_eq!(progress_of(&uploads).await, 100);
    }
}
