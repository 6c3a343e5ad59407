use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File the best score is kept in when no other path is configured
pub const DEFAULT_HIGH_SCORE_FILE: &str = "game_highest.txt";

/// Best score ever achieved, backed by a plain-text file holding one integer.
///
/// Failures never reach the game: an unreadable file counts as "no high score
/// yet" and a failed write is logged and skipped.
#[derive(Debug)]
pub struct HighScoreStore {
    path: PathBuf,
    best: u32,
}

impl HighScoreStore {
    /// Load the stored score from `path`
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = match read_score(&path) {
            Ok(score) => score,
            Err(err) => {
                let missing = err
                    .downcast_ref::<std::io::Error>()
                    .is_some_and(|io| io.kind() == ErrorKind::NotFound);
                if missing {
                    debug!(path = %path.display(), "no high score file yet");
                } else {
                    warn!(path = %path.display(), "ignoring high score file: {err:#}");
                }
                0
            }
        };
        Self { path, best }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn is_new_high_score(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a finished game's score.
    ///
    /// Only a strictly greater score replaces the stored one. Returns whether it
    /// did.
    pub fn record(&mut self, score: u32) -> bool {
        if !self.is_new_high_score(score) {
            return false;
        }
        self.best = score;
        if let Err(err) = write_score(&self.path, score) {
            warn!(path = %self.path.display(), "could not save high score: {err:#}");
        }
        true
    }
}

fn read_score(path: &Path) -> Result<u32> {
    let text = std::fs::read_to_string(path)?;
    let token = text.split_whitespace().next().unwrap_or_default();
    token
        .parse()
        .with_context(|| format!("Invalid high score {:?} in {:?}", token, path))
}

fn write_score(path: &Path, score: u32) -> Result<()> {
    std::fs::write(path, score.to_string())
        .with_context(|| format!("Failed to write high score to {:?}", path))
}
