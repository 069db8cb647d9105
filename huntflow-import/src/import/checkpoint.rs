//! Persisted row progress for resumable imports
//!
//! The checkpoint file is a JSON object with a single `start` key, the
//! same shape earlier runs of the importer leave behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Index of the next data row to process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// 1-based data row index; data row N sits on sheet row N + 1
    #[serde(rename = "start")]
    pub next_row: usize,
}

impl Default for Checkpoint {
    fn default() -> Self {
        Self { next_row: 1 }
    }
}

impl Checkpoint {
    pub fn new(next_row: usize) -> Self {
        Self { next_row }
    }

    /// Sheet row number (header is row 1) the run resumes from
    pub fn first_sheet_row(&self) -> usize {
        self.next_row.saturating_add(1)
    }

    pub fn advance(&mut self) {
        self.next_row = self.next_row.saturating_add(1);
    }

    /// Data rows are 1-based and the matching sheet row must be addressable
    fn is_valid(&self) -> bool {
        self.next_row >= 1 && self.next_row.checked_add(1).is_some()
    }
}

/// When the checkpoint moves past a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckpointPolicy {
    /// Advance before attempting a row; a failed row is skipped on resume
    #[default]
    SkipFailed,
    /// Advance only once a row fully succeeds; a failed row is retried
    RetryFailed,
}

impl std::fmt::Display for CheckpointPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckpointPolicy::SkipFailed => write!(f, "skip-failed"),
            CheckpointPolicy::RetryFailed => write!(f, "retry-failed"),
        }
    }
}

/// File-backed checkpoint storage
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored checkpoint, or the default when no file exists
    pub fn load(&self) -> Result<Checkpoint> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Checkpoint::default()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read checkpoint: {}", self.path.display())
                });
            }
        };

        let checkpoint: Checkpoint = serde_json::from_str(&content)
            .with_context(|| format!("Corrupt checkpoint file: {}", self.path.display()))?;
        anyhow::ensure!(
            checkpoint.is_valid(),
            "Corrupt checkpoint file: {}: start {} is out of range",
            self.path.display(),
            checkpoint.next_row
        );

        log::debug!(
            "Loaded checkpoint from {}: next row {}",
            self.path.display(),
            checkpoint.next_row
        );
        Ok(checkpoint)
    }

    /// Overwrite the checkpoint file (write to a sibling, then rename)
    pub fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        let json = serde_json::to_string(checkpoint).context("Failed to serialize checkpoint")?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write checkpoint: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace checkpoint: {}", self.path.display()))?;

        log::debug!("Saved checkpoint: next row {}", checkpoint.next_row);
        Ok(())
    }

    /// Remove the checkpoint file; a missing file is fine
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!("Removed checkpoint {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove checkpoint: {}", self.path.display())),
        }
    }
}
