//! File ingestion: raw files to content parts.
//!
//! Images become inline base64 parts, plain text becomes a text part headed
//! by the file name. Everything else is skipped. Skipping is not an error;
//! the caller decides what an empty result means.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use futures::future::join_all;

use super::model::RawFile;
use crate::content::ContentPart;

/// Converts one file into a content part, or `None` if it is unsupported or
/// unreadable.
pub async fn ingest(file: &RawFile) -> Option<ContentPart> {
    let mime_type = file.mime_type.as_str();
    let is_image = mime_type.starts_with("image/");
    let is_text = mime_type == "text/plain";

    if !is_image && !is_text {
        tracing::warn!(
            "Unsupported file type: {}. Skipping {}.",
            mime_type,
            file.name
        );
        return None;
    }

    let bytes = match file.read_bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Could not read file {}: {}", file.name, e);
            return None;
        }
    };

    if is_image {
        let data = BASE64_STANDARD.encode(bytes);
        return Some(ContentPart::inline_binary(mime_type, data));
    }

    match String::from_utf8(bytes) {
        Ok(text) => Some(ContentPart::text(format!(
            "\n\n--- File Content: {} ---\n{}",
            file.name, text
        ))),
        Err(_) => {
            tracing::warn!("Could not read file {} as text.", file.name);
            None
        }
    }
}

/// Ingests all files concurrently, keeping input order and dropping files
/// that produced no part.
pub async fn ingest_all(files: &[Arc<RawFile>]) -> Vec<ContentPart> {
    join_all(files.iter().map(|file| ingest(file)))
        .await
        .into_iter()
        .flatten()
        .collect()
}
