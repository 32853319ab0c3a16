//! Decode reports.
//!
//! A report records what was decoded, how, and a digest of the result,
//! so a finding can be reproduced later from the same image.

mod digest;

pub use digest::{DigestAlgorithm, TextDigest};

use crate::assembly::{DecodeStats, DecodedText};
use crate::config::DecoderConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Digest entry of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestEntry {
    pub algorithm: DigestAlgorithm,
    pub hex: String,
}

impl From<TextDigest> for DigestEntry {
    fn from(digest: TextDigest) -> Self {
        Self {
            algorithm: digest.algorithm(),
            hex: digest.to_hex(),
        }
    }
}

/// Summary of one decode run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeReport {
    /// When the decode finished.
    pub decoded_at: DateTime<Utc>,
    /// Source image.
    pub input: PathBuf,
    /// Where the text was written, if anywhere.
    pub output: Option<PathBuf>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    pub config: DecoderConfig,
    pub stats: DecodeStats,
    pub digest: DigestEntry,
}

impl DecodeReport {
    /// Builds a report for `text`, timestamped now.
    pub fn new(
        input: impl Into<PathBuf>,
        dimensions: (u32, u32),
        config: DecoderConfig,
        text: &DecodedText,
        algorithm: DigestAlgorithm,
    ) -> Self {
        Self {
            decoded_at: Utc::now(),
            input: input.into(),
            output: None,
            width: dimensions.0,
            height: dimensions.1,
            config,
            stats: *text.stats(),
            digest: TextDigest::compute(algorithm, text.as_str()).into(),
        }
    }

    /// Records the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Renders the report as TOML.
    pub fn to_toml(&self) -> Result<String, ReportError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the report as TOML to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        std::fs::write(path.as_ref(), self.to_toml()?)?;
        tracing::debug!(path = %path.as_ref().display(), "Wrote decode report");
        Ok(())
    }
}
