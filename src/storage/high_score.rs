//! Persisted high score
//!
//! A single `highScore` slot kept in a small JSON file. Reading never fails:
//! a missing, unreadable or malformed file counts as a high score of zero.
//! Write failures are logged and the in-memory value still advances.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk shape of the high score file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct HighScoreRecord {
    #[serde(rename = "highScore")]
    high_score: u32,
}

/// Best score seen on this device
#[derive(Debug, Clone)]
pub struct HighScoreStore {
    path: Option<PathBuf>,
    best: u32,
}

impl HighScoreStore {
    /// Load the high score from `path`, falling back to zero
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = load_high_score(&path);
        log::info!("Loaded high score {} from {:?}", best, path);

        Self {
            path: Some(path),
            best,
        }
    }

    /// A store that is never written to disk
    pub fn in_memory(best: u32) -> Self {
        Self { path: None, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Offer a score; returns true when it beats the stored one.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }

        self.best = score;
        if let Err(e) = self.persist() {
            log::error!("Error saving high score: {:#}", e);
        }
        true
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let record = HighScoreRecord {
            high_score: self.best,
        };
        let json = serde_json::to_string_pretty(&record).context("Failed to serialize high score")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write high score to {:?}", path))?;

        Ok(())
    }
}

/// Read the stored value, treating anything unusable as zero
fn load_high_score(path: &Path) -> u32 {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return 0,
        Err(e) => {
            log::warn!("Error loading high score from {:?}: {}", path, e);
            return 0;
        }
    };

    parse_high_score(&contents).unwrap_or_else(|| {
        log::warn!("Ignoring malformed high score file {:?}", path);
        0
    })
}

/// Accept either the JSON record or a bare integer
fn parse_high_score(contents: &str) -> Option<u32> {
    if let Ok(record) = serde_json::from_str::<HighScoreRecord>(contents) {
        return Some(record.high_score);
    }
    contents.trim().parse().ok()
}
