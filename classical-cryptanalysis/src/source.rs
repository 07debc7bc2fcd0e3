//! Where ciphertext and reference texts come from

use std::fmt;
use std::path::PathBuf;

use crate::error::{CryptanalysisError, Result};

/// A text to analyze: either a file on disk or a literal string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    File(PathBuf),
    Literal(String),
}

impl TextSource {
    /// Reads the whole text. A missing or unreadable file is reported as
    /// [`CryptanalysisError::InputUnavailable`]; nothing is retried.
    ///
    /// File contents are taken as bytes: sequences that are not valid UTF-8
    /// become U+FFFD and pass through the analyzers as non-letters.
    pub fn read_text(&self) -> Result<String> {
        match self {
            TextSource::File(path) => {
                let bytes = std::fs::read(path).map_err(|source| {
                    CryptanalysisError::InputUnavailable {
                        source_name: path.display().to_string(),
                        source,
                    }
                })?;
                let text = String::from_utf8_lossy(&bytes).into_owned();
                tracing::debug!(path = %path.display(), bytes = text.len(), "read text file");
                Ok(text)
            }
            TextSource::Literal(text) => Ok(text.clone()),
        }
    }
}

impl fmt::Display for TextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextSource::File(path) => write!(f, "{}", path.display()),
            TextSource::Literal(_) => f.write_str("<literal>"),
        }
    }
}

impl From<PathBuf> for TextSource {
    fn from(path: PathBuf) -> Self {
        TextSource::File(path)
    }
}
