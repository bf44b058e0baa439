// src/core/preview.rs

use crate::core::error::PreviewError;
use crate::core::models::{PendingFile, Preview};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use tokio::task::spawn_blocking;
use tracing::debug;

/// Re-encodes a file as a `data:` URI suitable for use as a background image.
///
/// Encoding runs on the blocking pool since payloads can be several megabytes.
/// No network is involved.
pub async fn read_as_data_uri(file: &PendingFile) -> Result<Preview, PreviewError> {
    let file = file.clone();
    let preview = spawn_blocking(move || encode(&file))
        .await
        .map_err(|e| PreviewError::Interrupted(e.to_string()))?;
    debug!(uri_len = preview.data_uri.len(), "Preview encoded.");
    Ok(preview)
}

pub fn encode(file: &PendingFile) -> Preview {
    let media_type = if file.media_type.is_empty() {
        "application/octet-stream"
    } else {
        file.media_type.as_str()
    };
    Preview {
        data_uri: format!("data:{};base64,{}", media_type, STANDARD.encode(&file.bytes)),
    }
}

/// Splits a `data:` URI back into its media type and decoded payload size.
/// Returns `None` for anything that is not a base64 data URI.
pub fn describe(data_uri: &str) -> Option<(&str, usize)> {
    let rest = data_uri.strip_prefix("data:")?;
    let (media_type, payload) = rest.split_once(";base64,")?;
    let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
    Some((media_type, ((payload.len() / 4) * 3).saturating_sub(padding.min(2))))
}
