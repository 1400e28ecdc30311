//! Upload domain module.
//!
//! # Module Structure
//!
//! - `model`: raw files, pending uploads and the session phase
//! - `ingest`: conversion of raw files into content parts
//! - `progress`: per-entry progress reporting
//! - `manager`: the upload session state machine

mod ingest;
mod manager;
mod model;
mod progress;

pub use ingest::{ingest, ingest_all};
pub use manager::{AnalysisOutcome, AnalysisSink, SkipReason, UploadSessionManager};
pub use model::{FileContent, PendingUpload, RawFile, UploadId, UploadPhase, format_bytes};
pub use progress::{InstantProgress, ProgressHandle, ProgressSource, SimulatedProgress};
