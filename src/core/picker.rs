// src/core/picker.rs

use crate::core::error::PickError;
use crate::core::models::PendingFile;
use directories::BaseDirs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use url::Url;

/// The file-input element: whether the path prompt is open and what has been typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Picker {
    pub open: bool,
    pub input: String,
}

impl Picker {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn push_str(&mut self, s: &str) {
        self.input.push_str(s);
    }

    pub fn pop(&mut self) {
        self.input.pop();
    }

    /// Closes the prompt and hands back the typed path, if anything was typed.
    /// The text stays in the input, like a file input keeps its selection.
    pub fn submit(&mut self) -> Option<PathBuf> {
        self.open = false;
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(expand_home(trimmed))
        }
    }

    pub fn clear(&mut self) {
        self.open = false;
        self.input.clear();
    }
}

/// Reads a file from disk into a pending file.
///
/// The declared media type comes from the extension, as a browser does for
/// `File.type`; an unknown extension yields an empty type, which the
/// validator then rejects.
pub fn load_pending_file(path: &Path) -> Result<PendingFile, PickError> {
    if path.is_dir() {
        return Err(PickError::NotAFile(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| {
        warn!(path = %path.display(), error = %source, "Could not read picked file.");
        PickError::Unreadable {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let media_type = mime_guess::from_path(path).first_raw().unwrap_or("");
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    debug!(%name, media_type, bytes = bytes.len(), "Loaded picked file.");
    Ok(PendingFile::new(name, media_type, bytes))
}

/// Splits the text a terminal pastes when files are dropped onto it into paths.
///
/// Terminals differ: some quote paths with spaces, some backslash-escape
/// them, some paste `file://` URIs. All three forms are accepted, separated
/// by whitespace.
pub fn parse_dropped_paths(payload: &str) -> Vec<PathBuf> {
    split_shell_words(payload)
        .into_iter()
        .map(|word| {
            if word.starts_with("file://") {
                if let Some(path) = Url::parse(&word).ok().and_then(|u| u.to_file_path().ok()) {
                    return path;
                }
            }
            expand_home(&word)
        })
        .collect()
}

fn split_shell_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                for q in chars.by_ref() {
                    if q == '\'' {
                        break;
                    }
                    current.push(q);
                }
            }
            '"' => {
                in_word = true;
                while let Some(q) = chars.next() {
                    match q {
                        '"' => break,
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                current.push(escaped);
                            }
                        }
                        _ => current.push(q),
                    }
                }
            }
            '\\' => {
                in_word = true;
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            _ => {
                in_word = true;
                current.push(c);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}
