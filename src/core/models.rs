// src/core/models.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use strum::{AsRefStr, Display};

// --- Workflow ---

/// The single phase of the upload lifecycle a controller is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum WorkflowState {
    #[default]
    Idle,
    Previewing,
    Submitting,
    ShowingResult,
    ShowingError,
}

/// Tag attached to an asynchronous operation when it is issued.
///
/// Tokens only ever grow; a completion whose token is no longer the live one
/// for its kind of operation belongs to a superseded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(pub u64);

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// --- Files ---

/// The most recently accepted image: payload, declared media type and filename.
///
/// The payload is shared so that the preview and upload tasks can each hold
/// the file without copying it.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Payloads can be megabytes; print the size instead.
impl fmt::Debug for PendingFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingFile")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A preview of a pending file, encoded as an embeddable data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub data_uri: String,
}

// --- Analysis service payload ---

/// One offer for the recognised product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub site: String,
    pub price: f64,
    pub rating: f64,
}

/// Aggregated customer sentiment: a score in `[0, 1]` and the reviews it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub score: f64,
    pub reviews: Vec<String>,
}

/// The body returned by the analysis endpoint on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub product: String,
    pub prices: Vec<PriceQuote>,
    pub sentiment: Sentiment,
}
