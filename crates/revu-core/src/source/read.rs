use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::{fs, path::Path};

/// Source code submitted for review.
///
/// Holds the exact text sent to the model and a fingerprint that
/// identifies it in logs and report headings.
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Where the text came from (a path, or `<stdin>`).
    pub label: String,

    pub text: String,

    pub size_bytes: u64,

    /// Hash algorithm used for fingerprinting.
    pub hash_alg: String,

    /// Hex-encoded hash of the source bytes.
    pub hash_hex: String,
}

impl SourceContext {
    /// Build a context from text already in memory.
    pub fn from_text(label: impl Into<String>, text: String) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let digest = hasher.finalize();

        Self {
            label: label.into(),
            size_bytes: text.len() as u64,
            text,
            hash_alg: "sha256".to_string(),
            hash_hex: hex::encode(digest),
        }
    }

    /// First 12 hex digits of the fingerprint, for display.
    pub fn short_hash(&self) -> &str {
        &self.hash_hex[..self.hash_hex.len().min(12)]
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Read a source file. The fingerprint depends only on the file bytes.
pub fn read_source(path: &Path) -> Result<SourceContext> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read source: {}", path.display()))?;
    let text = String::from_utf8(bytes)
        .with_context(|| format!("source is not valid UTF-8: {}", path.display()))?;

    Ok(SourceContext::from_text(path.display().to_string(), text))
}
