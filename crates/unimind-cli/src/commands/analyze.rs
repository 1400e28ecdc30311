use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, bail};
use colored::Colorize;
use unimind_application::StudyAssistant;
use unimind_core::upload::{AnalysisOutcome, SkipReason};

use crate::render;

const UPLOAD_POLL: Duration = Duration::from_millis(100);

pub async fn run(assistant: &StudyAssistant, paths: &[PathBuf]) -> Result<()> {
    assistant.upload_paths(paths).await?;
    render::print_uploads(&assistant.uploads().uploads().await);

    println!("{}", "Analyzing...".bright_black());
    match commit_when_uploaded(assistant).await? {
        AnalysisOutcome::Completed { analysis, .. } => {
            render::print_markdown(&analysis);
            Ok(())
        }
        AnalysisOutcome::Skipped(reason) => bail!("Analysis skipped: {reason:?}"),
    }
}

/// Commits the pending uploads, waiting for any still in progress.
pub async fn commit_when_uploaded(
    assistant: &StudyAssistant,
) -> unimind_core::error::Result<AnalysisOutcome> {
    loop {
        match assistant.uploads().commit_analysis().await? {
            AnalysisOutcome::Skipped(SkipReason::UploadsInProgress) => {
                tokio::time::sleep(UPLOAD_POLL).await;
            }
            outcome => return Ok(outcome),
        }
    }
}
