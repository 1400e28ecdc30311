//! Upload session management.
//!
//! Tracks the files selected for analysis and runs the
//! ingestion → gateway → conversation pipeline when the user commits.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ingest::ingest_all;
use super::model::{PendingUpload, RawFile, UploadId, UploadPhase};
use super::progress::{ProgressHandle, ProgressSource};
use crate::error::{Result, UnimindError};
use crate::gateway::AiGateway;

/// Receives finished analyses.
///
/// Implemented by the conversation orchestrator, which turns the analysis
/// into a user/assistant exchange.
#[async_trait]
pub trait AnalysisSink: Send + Sync {
    async fn complete_file_analysis(&self, analysis_text: String, file_names: Vec<String>);
}

/// Why a commit did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No files are pending.
    NothingPending,
    /// An analysis is already outstanding.
    AlreadyAnalyzing,
    /// At least one file has not finished uploading.
    UploadsInProgress,
}

/// Result of `commit_analysis`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Skipped(SkipReason),
    /// The analysis was handed to the sink and the pending set was cleared.
    Completed {
        analysis: String,
        file_names: Vec<String>,
    },
}

/// Clears the analyzing flag when the commit finishes.
struct Analyzing<'a>(&'a AtomicBool);

impl Drop for Analyzing<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns the ordered set of pending uploads.
///
/// State machine: `Idle -> FilesPending -> Analyzing -> Idle` on success, or
/// `Analyzing -> FilesPending` when no file was usable. A second commit
/// while one is outstanding is a no-op.
pub struct UploadSessionManager {
    /// Pending uploads, in selection order
    uploads: Arc<RwLock<Vec<PendingUpload>>>,
    /// True while a commit is outstanding
    analyzing: AtomicBool,
    progress: Arc<dyn ProgressSource>,
    gateway: Arc<dyn AiGateway>,
    sink: Arc<dyn AnalysisSink>,
}

impl UploadSessionManager {
    pub fn new(
        progress: Arc<dyn ProgressSource>,
        gateway: Arc<dyn AiGateway>,
        sink: Arc<dyn AnalysisSink>,
    ) -> Self {
        Self {
            uploads: Arc::new(RwLock::new(Vec::new())),
            analyzing: AtomicBool::new(false),
            progress,
            gateway,
            sink,
        }
    }

    /// Adds files at progress 0 and starts tracking their progress.
    ///
    /// Returns the ids of the new entries, in input order.
    pub async fn add_files(&self, files: Vec<RawFile>) -> Vec<UploadId> {
        let added: Vec<PendingUpload> = files
            .into_iter()
            .map(|file| PendingUpload::new(Arc::new(file)))
            .collect();
        let ids: Vec<UploadId> = added.iter().map(|u| u.id.clone()).collect();

        self.uploads.write().await.extend(added);

        for id in &ids {
            let handle = ProgressHandle::new(id.clone(), self.uploads.clone());
            self.progress.track(handle).await;
        }

        tracing::debug!("Added {} file(s) to the upload session", ids.len());
        ids
    }

    /// Drops one entry regardless of its progress.
    ///
    /// Returns `false` if no entry has the given id.
    pub async fn remove_file(&self, id: &UploadId) -> bool {
        let mut uploads = self.uploads.write().await;
        let before = uploads.len();
        uploads.retain(|u| &u.id != id);
        uploads.len() != before
    }

    /// Returns a snapshot of the pending uploads.
    pub async fn uploads(&self) -> Vec<PendingUpload> {
        self.uploads.read().await.clone()
    }

    pub async fn phase(&self) -> UploadPhase {
        if self.analyzing.load(Ordering::Acquire) {
            UploadPhase::Analyzing
        } else if self.uploads.read().await.is_empty() {
            UploadPhase::Idle
        } else {
            UploadPhase::FilesPending
        }
    }

    /// Analyzes every pending file and hands the result to the sink.
    ///
    /// # Errors
    ///
    /// Returns `NoSupportedFiles` when none of the files produced a content
    /// part; the pending set is left untouched so the user can fix it.
    pub async fn commit_analysis(&self) -> Result<AnalysisOutcome> {
        let Some(_analyzing) = self.begin_analysis() else {
            return Ok(AnalysisOutcome::Skipped(SkipReason::AlreadyAnalyzing));
        };

        let files: Vec<Arc<RawFile>> = {
            let uploads = self.uploads.read().await;
            if uploads.is_empty() {
                return Ok(AnalysisOutcome::Skipped(SkipReason::NothingPending));
            }
            if uploads.iter().any(|u| !u.is_complete()) {
                return Ok(AnalysisOutcome::Skipped(SkipReason::UploadsInProgress));
            }
            uploads.iter().map(|u| u.file.clone()).collect()
        };

        let parts = ingest_all(&files).await;
        if parts.is_empty() {
            tracing::warn!("None of the {} pending file(s) could be analyzed", files.len());
            return Err(UnimindError::NoSupportedFiles);
        }

        tracing::info!(
            "Analyzing {} part(s) from {} file(s)",
            parts.len(),
            files.len()
        );
        let analysis = self.gateway.analyze(parts).await;
        let file_names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();

        self.sink
            .complete_file_analysis(analysis.clone(), file_names.clone())
            .await;
        self.uploads.write().await.clear();

        Ok(AnalysisOutcome::Completed {
            analysis,
            file_names,
        })
    }

    fn begin_analysis(&self) -> Option<Analyzing<'_>> {
        self.analyzing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Analyzing(&self.analyzing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPart;
    use crate::upload::progress::{InstantProgress, SimulatedProgress};
    use std::sync::Mutex;
    use tokio::sync::Notify;

    // Mock gateway that records analyze calls and can be held open
    #[derive(Default)]
    struct RecordingGateway {
        calls: Mutex<Vec<Vec<ContentPart>>>,
        gate: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl AiGateway for RecordingGateway {
        async fn converse(&self, _prompt: &str) -> String {
            String::new()
        }

        async fn analyze(&self, parts: Vec<ContentPart>) -> String {
            self.calls.lock().unwrap().push(parts);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            "Summary: kinematics".to_string()
        }

        async fn search(&self, _prompt: &str) -> String {
            String::new()
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        completed: Mutex<Vec<(String, Vec<String>)>>,
    }

    #[async_trait]
    impl AnalysisSink for RecordingSink {
        async fn complete_file_analysis(&self, analysis_text: String, file_names: Vec<String>) {
            self.completed
                .lock()
                .unwrap()
                .push((analysis_text, file_names));
        }
    }

    fn manager(
        gateway: Arc<RecordingGateway>,
    ) -> (UploadSessionManager, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let manager = UploadSessionManager::new(Arc::new(InstantProgress), gateway, sink.clone());
        (manager, sink)
    }

    fn image() -> RawFile {
        RawFile::from_bytes("graph.png", "image/png", vec![1, 2, 3])
    }

    fn pdf() -> RawFile {
        RawFile::from_bytes("slides.pdf", "application/pdf", b"%PDF".to_vec())
    }

    #[tokio::test]
    async fn test_commit_on_empty_set_is_noop() {
        let gateway = Arc::new(RecordingGateway::default());
        let (manager, sink) = manager(gateway.clone());

        let outcome = manager.commit_analysis().await.unwrap();

        assert_eq!(outcome, AnalysisOutcome::Skipped(SkipReason::NothingPending));
        assert!(gateway.calls.lock().unwrap().is_empty());
        assert!(sink.completed.lock().unwrap().is_empty());
        assert_eq!(manager.phase().await, UploadPhase::Idle);
    }

    #[tokio::test]
    async fn test_unsupported_file_is_dropped_not_blocking() {
        let gateway = Arc::new(RecordingGateway::default());
        let (manager, sink) = manager(gateway.clone());
        manager.add_files(vec![image(), pdf()]).await;
        assert_eq!(manager.phase().await, UploadPhase::FilesPending);

        let outcome = manager.commit_analysis().await.unwrap();

        let calls = gateway.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 1);
        assert!(matches!(calls[0][0], ContentPart::InlineBinary { .. }));

        let names = vec!["graph.png".to_string(), "slides.pdf".to_string()];
        assert_eq!(
            outcome,
            AnalysisOutcome::Completed {
                analysis: "Summary: kinematics".to_string(),
                file_names: names.clone(),
            }
        );
        assert_eq!(
            *sink.completed.lock().unwrap(),
            vec![("Summary: kinematics".to_string(), names)]
        );
        assert!(manager.uploads().await.is_empty());
        assert_eq!(manager.phase().await, UploadPhase::Idle);
    }

    #[tokio::test]
    async fn test_only_unsupported_files_keeps_set() {
        let gateway = Arc::new(RecordingGateway::default());
        let (manager, sink) = manager(gateway.clone());
        manager.add_files(vec![pdf(), pdf()]).await;

        let err = manager.commit_analysis().await.unwrap_err();

        assert!(err.is_no_supported_files());
        assert_eq!(manager.uploads().await.len(), 2);
        assert!(gateway.calls.lock().unwrap().is_empty());
        assert!(sink.completed.lock().unwrap().is_empty());
        assert_eq!(manager.phase().await, UploadPhase::FilesPending);
    }

    #[tokio::test]
    async fn test_second_commit_while_analyzing_is_noop() {
        let gate = Arc::new(Notify::new());
        let gateway = Arc::new(RecordingGateway {
            calls: Mutex::new(Vec::new()),
            gate: Some(gate.clone()),
        });
        let (manager, _sink) = manager(gateway.clone());
        manager.add_files(vec![image()]).await;

        let first = manager.commit_analysis();
        let second = async {
            assert_eq!(manager.phase().await, UploadPhase::Analyzing);
            let outcome = manager.commit_analysis().await.unwrap();
            assert_eq!(outcome, AnalysisOutcome::Skipped(SkipReason::AlreadyAnalyzing));
            gate.notify_one();
        };

        let (first_outcome, ()) = tokio::join!(first, second);

        assert!(matches!(first_outcome, Ok(AnalysisOutcome::Completed { .. })));
        assert_eq!(gateway.calls.lock().unwrap().len(), 1);
        assert_eq!(manager.phase().await, UploadPhase::Idle);
    }

    #[tokio::test]
    async fn test_remove_file() {
        let gateway = Arc::new(RecordingGateway::default());
        let (manager, _) = manager(gateway);
        let ids = manager.add_files(vec![image(), pdf()]).await;

        assert!(manager.remove_file(&ids[1]).await);
        assert!(!manager.remove_file(&ids[1]).await);

        let remaining = manager.uploads().await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].file.name, "graph.png");
    }

    #[tokio::test(start_paused = true)]
    async fn test_commit_waits_for_simulated_upload() {
        let gateway = Arc::new(RecordingGateway::default());
        let sink = Arc::new(RecordingSink::default());
        let manager = UploadSessionManager::new(
            Arc::new(SimulatedProgress::default()),
            gateway.clone(),
            sink,
        );
        manager.add_files(vec![image()]).await;

        let early = manager.commit_analysis().await.unwrap();
        assert_eq!(early, AnalysisOutcome::Skipped(SkipReason::UploadsInProgress));

        tokio::time::sleep(std::time::Duration::from_millis(1200)).await;
        assert_eq!(manager.uploads().await[0].progress, 100);

        let outcome = manager.commit_analysis().await.unwrap();
        assert!(matches!(outcome, AnalysisOutcome::Completed { .. }));
        assert_eq!(gateway.calls.lock().unwrap().len(), 1);
    }
}
