// src/core/mod.rs

/// Data shared by every stage: pending files, tokens, the service payload.
pub mod models;

/// Error taxonomy and the user-facing messages tied to it.
pub mod error;

/// Declared-type check run before anything else touches a file.
pub mod validator;

/// Local, network-free preview of an accepted file.
pub mod preview;

/// Multipart upload to the analysis endpoint.
pub mod submitter;

/// Pure mapping from an analysis result to the three result regions.
pub mod render;

/// The page contract the controller writes to, and its in-memory implementation.
pub mod page;

/// File input state, file loading and drop-payload parsing.
pub mod picker;
